use leptos::prelude::*;
use serde_json::json;

use crate::components::dashboard::DashboardView;
use crate::dashboard::{ChartEntry, ChartKind, ChartSpec, DashboardSpec};

/// The fixed business-performance dashboard. Charts without rows are filled
/// with sample data by the interpreter.
pub fn analytics_dashboard() -> DashboardSpec {
    let charts = vec![
        ChartSpec::new(ChartKind::Kpi, "Revenue")
            .with_rows(vec![json!({ "value": 145_200_000, "change": 12.5 })]),
        ChartSpec::new(ChartKind::Kpi, "Profit")
            .with_rows(vec![json!({ "value": 38_600_000, "change": "-2.4%" })]),
        ChartSpec::new(ChartKind::Line, "Monthly performance")
            .with_metrics(["revenue", "profit", "cost"])
            .with_group_by("month"),
        ChartSpec::new(ChartKind::Pie, "Revenue by department"),
        ChartSpec::new(ChartKind::Bar, "Revenue vs cost").with_metrics(["revenue", "cost"]),
        ChartSpec::new(ChartKind::Table, "Top products"),
    ];

    DashboardSpec {
        title: "Business performance".to_string(),
        period: Some("Last 12 months".to_string()),
        charts: charts.into_iter().map(ChartEntry::Spec).collect(),
    }
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    view! {
        <section class="analytics-page">
            <header class="page-header">
                <h1>"Analytics"</h1>
                <p class="page-subtitle">"Detailed view of business performance"</p>
            </header>
            <DashboardView spec=analytics_dashboard() />
        </section>
    }
}
