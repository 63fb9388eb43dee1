use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{Value, json};

use crate::api;
use crate::components::dashboard::DashboardView;
use crate::dashboard::{ChartEntry, ChartKind, ChartSpec, DashboardSpec};
use crate::models::{ForecastInsight, ForecastInsights, ForecastPoint, ForecastTarget, Recommendation};
use crate::resource::decode_list;

/// The forecast service reports revenue in millions of đồng.
const MILLION: f64 = 1_000_000.0;

fn amount(millions: f64) -> Value {
    if millions > 0.0 {
        json!(millions * MILLION)
    } else {
        Value::Null
    }
}

/// Actual vs forecast revenue as a bar chart, one group per month.
pub fn revenue_dashboard(points: &[ForecastPoint]) -> DashboardSpec {
    let rows = points
        .iter()
        .map(|p| json!({ "name": p.month, "actual": amount(p.actual), "forecast": amount(p.forecast) }))
        .collect();

    let chart = ChartSpec::new(ChartKind::Bar, "Revenue: actual vs forecast")
        .with_metrics(["actual", "forecast"])
        .with_group_by("month")
        .with_rows(rows);

    DashboardSpec {
        title: "Revenue forecast".to_string(),
        period: points
            .first()
            .zip(points.last())
            .map(|(first, last)| format!("{} – {}", first.month, last.month)),
        charts: vec![ChartEntry::Spec(chart)],
    }
}

#[component]
pub fn ForecastPage() -> impl IntoView {
    let (insights, set_insights) = signal(ForecastInsights::default());
    let (points, set_points) = signal(Vec::<ForecastPoint>::new());
    let (targets, set_targets) = signal(Vec::<ForecastTarget>::new());
    let (recommendations, set_recommendations) = signal(Vec::<Recommendation>::new());

    spawn_local(async move {
        match api::get_json::<ForecastInsights>(api::FORECAST_INSIGHTS_PATH).await {
            Ok(value) => {
                set_insights.try_set(value);
            }
            Err(e) => log::error!("Failed to fetch forecast insights: {e}"),
        }
    });
    spawn_local(async move {
        match api::get_value(api::FORECAST_REVENUE_PATH).await {
            Ok(value) => {
                set_points.try_set(decode_list(value, Some("data")));
            }
            Err(e) => log::error!("Failed to fetch revenue forecast: {e}"),
        }
    });
    spawn_local(async move {
        match api::get_value(api::FORECAST_TARGETS_PATH).await {
            Ok(value) => {
                set_targets.try_set(decode_list(value, Some("targets")));
            }
            Err(e) => log::error!("Failed to fetch forecast targets: {e}"),
        }
    });
    spawn_local(async move {
        match api::get_value(api::FORECAST_RECOMMENDATIONS_PATH).await {
            Ok(value) => {
                set_recommendations.try_set(decode_list(value, Some("recommendations")));
            }
            Err(e) => log::error!("Failed to fetch recommendations: {e}"),
        }
    });

    view! {
        <section class="forecast-page">
            <header class="page-header">
                <h1>"AI forecast"</h1>
                <p class="page-subtitle">"Revenue projections and suggested actions"</p>
            </header>

            <div class="stat-grid">
                {move || {
                    let all = insights.get();
                    view! {
                        <InsightCard insight=all.q1_forecast />
                        <InsightCard insight=all.peak_season />
                        <InsightCard insight=all.inventory_warning />
                    }
                }}
            </div>

            {move || {
                points.with(|p| (!p.is_empty()).then(|| revenue_dashboard(p)))
                    .map(|spec| view! { <DashboardView spec=spec /> })
            }}

            <div class="forecast-columns">
                <div class="card">
                    <h3>"Targets"</h3>
                    <For each=move || targets.get() key=|t| t.target.clone() let:target>
                        <div class="target-row">
                            <div class="target-name">{target.target.clone()}</div>
                            <div class="target-expected">{target.expected.clone()}</div>
                            <div class="progress">
                                <div
                                    class=format!("progress-bar {}", target.status)
                                    style=format!("width:{:.0}%", target.probability.clamp(0.0, 100.0))
                                ></div>
                            </div>
                            <span class="probability">{format!("{:.0}%", target.probability)}</span>
                        </div>
                    </For>
                </div>

                <div class="card">
                    <h3>"Recommendations"</h3>
                    <ul class="recommendations">
                        <For each=move || recommendations.get() key=|r| r.title.clone() let:rec>
                            <li class=format!("recommendation priority-{}", rec.priority)>
                                <strong>{rec.title.clone()}</strong>
                                <p>{rec.description.clone()}</p>
                            </li>
                        </For>
                    </ul>
                </div>
            </div>
        </section>
    }
}

#[component]
fn InsightCard(insight: ForecastInsight) -> impl IntoView {
    let growth = (insight.growth_percent != 0.0).then(|| format!("{:+.1}%", insight.growth_percent));
    view! {
        <div class=format!("stat-card insight {}", insight.status)>
            <div class="stat-label">{insight.label}</div>
            {growth.map(|g| view! { <div class="stat-value">{g}</div> })}
            <div class="stat-hint">{insight.message}</div>
        </div>
    }
}
