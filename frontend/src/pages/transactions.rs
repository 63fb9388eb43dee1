use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::format::{format_date, format_vnd};
use crate::models::Transaction;
use crate::resource::decode_list;

/// Only the most recent transactions are listed.
const SHOWN: usize = 10;

#[component]
pub fn TransactionsPage() -> impl IntoView {
    let (transactions, set_transactions) = signal(Vec::<Transaction>::new());

    spawn_local(async move {
        match api::get_value(api::TRANSACTIONS_PATH).await {
            Ok(value) => {
                let mut list: Vec<Transaction> = decode_list(value, None);
                list.truncate(SHOWN);
                set_transactions.try_set(list);
            }
            Err(e) => log::error!("Failed to fetch transactions: {e}"),
        }
    });

    view! {
        <section class="transactions-page">
            <header class="page-header">
                <h1>"Transactions"</h1>
                <p class="page-subtitle">"Latest sales and purchase activity"</p>
            </header>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Date"</th>
                        <th>"Customer"</th>
                        <th>"Type"</th>
                        <th>"Product"</th>
                        <th>"Revenue"</th>
                        <th>"Cost"</th>
                        <th>"Profit"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || transactions.get() key=|t| t.id let:tx>
                        <tr>
                            <td>{format_date(&tx.transaction_date)}</td>
                            <td>{tx.customer_name.clone()}</td>
                            <td>{tx.transaction_type.clone()}</td>
                            <td>{tx.product.clone()}</td>
                            <td>{format_vnd(tx.revenue)}</td>
                            <td>{format_vnd(tx.cost)}</td>
                            <td class:negative={tx.profit < 0.0}>{format_vnd(tx.profit)}</td>
                            <td>{tx.order_status.clone()}</td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </section>
    }
}
