use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::format::format_date;
use crate::models::Report;
use crate::resource::decode_list;

#[component]
pub fn ReportsPage() -> impl IntoView {
    let (reports, set_reports) = signal(Vec::<Report>::new());
    let (loaded, set_loaded) = signal(false);

    spawn_local(async move {
        match api::get_value(api::REPORTS_PATH).await {
            Ok(value) => {
                set_reports.try_set(decode_list(value, Some("reports")));
            }
            Err(e) => log::error!("Failed to fetch reports: {e}"),
        }
        set_loaded.try_set(true);
    });

    view! {
        <section class="reports-page">
            <header class="page-header">
                <h1>"Reports"</h1>
                <p class="page-subtitle">"Reports generated in the last 30 days"</p>
            </header>

            {move || {
                (loaded.get() && reports.with(Vec::is_empty))
                    .then(|| view! { <div class="empty-state">"No reports yet"</div> })
            }}

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Type"</th>
                        <th>"Date"</th>
                        <th>"Created by"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || reports.get() key=|r| r.id let:report>
                        <tr>
                            <td>{report.name.clone()}</td>
                            <td>{report.kind.clone()}</td>
                            <td>{format_date(&report.date)}</td>
                            <td>{report.user.clone()}</td>
                            <td>
                                <span class=format!("status {}", report.status)>{report.status.clone()}</span>
                            </td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </section>
    }
}
