use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::format::{format_change, format_vnd_compact, group_thousands};
use crate::models::{Kpi, KpiSet};
use crate::state::{AppState, Page};

const QUICK_LINKS: [Page; 4] = [Page::Customers, Page::Products, Page::Analytics, Page::Assistant];

#[component]
pub fn OverviewPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (kpis, set_kpis) = signal(KpiSet::default());

    spawn_local(async move {
        match api::get_json::<KpiSet>(api::KPI_PATH).await {
            Ok(set) => {
                set_kpis.try_set(set);
            }
            Err(e) => log::error!("Failed to fetch KPIs: {e}"),
        }
    });

    view! {
        <section class="overview-page">
            <header class="page-header">
                <h1>"Overview"</h1>
                <p class="page-subtitle">"Key figures for the current period"</p>
            </header>

            <div class="stat-grid">
                {move || {
                    let set = kpis.get();
                    view! {
                        <KpiCard label="Revenue" value=format_vnd_compact(set.revenue.value) kpi=set.revenue />
                        <KpiCard label="Profit" value=format_vnd_compact(set.profit.value) kpi=set.profit />
                        <KpiCard label="Orders" value=group_thousands(set.orders.value) kpi=set.orders />
                        <KpiCard label="Inventory" value=group_thousands(set.inventory.value) kpi=set.inventory />
                    }
                }}
            </div>

            <div class="quick-links">
                {QUICK_LINKS
                    .iter()
                    .map(|&page| {
                        view! {
                            <button class="quick-link" on:click=move |_| state.open(page)>
                                {page.title()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn KpiCard(label: &'static str, value: String, kpi: Kpi) -> impl IntoView {
    let class = if kpi.is_up() { "kpi-delta up" } else { "kpi-delta down" };
    view! {
        <div class="stat-card">
            <div class="stat-label">{label}</div>
            <div class="stat-value">{value}</div>
            <div class=class>{format!("{} vs last month", format_change(kpi.change))}</div>
        </div>
    }
}
