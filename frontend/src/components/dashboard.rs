use leptos::prelude::*;

use crate::dashboard::{
    DashboardSpec, PieSlice, SeriesChart, SeriesStyle, TableRow, Widget, WidgetBody, render,
};
use crate::format::{format_change, format_vnd_compact};

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 240.0;
const PAD_LEFT: f64 = 72.0;
const PAD_RIGHT: f64 = 8.0;
const PAD_TOP: f64 = 12.0;
const PAD_BOTTOM: f64 = 28.0;

const PIE_RADIUS: f64 = 90.0;

/// Renders a dashboard configuration as a grid of widgets.
#[component]
pub fn DashboardView(spec: DashboardSpec) -> impl IntoView {
    let dashboard = render(&spec);

    view! {
        <div class="dashboard">
            <div class="dashboard-header">
                <h3>{dashboard.title}</h3>
                {dashboard.period.map(|period| view! { <span class="dashboard-period">{period}</span> })}
            </div>
            <div class="widget-grid">
                {dashboard
                    .widgets
                    .into_iter()
                    .map(|widget| view! { <WidgetCard widget=widget /> })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn WidgetCard(widget: Widget) -> impl IntoView {
    let body = match widget.body {
        WidgetBody::Kpi { value, delta } => view! { <KpiBody value=value delta=delta /> }.into_any(),
        WidgetBody::Table(rows) => view! { <TableBody rows=rows /> }.into_any(),
        WidgetBody::Series(chart) => view! { <SeriesBody chart=chart /> }.into_any(),
        WidgetBody::Pie(slices) => view! { <PieBody slices=slices /> }.into_any(),
        WidgetBody::Unsupported { kind } => view! {
            <div class="widget-placeholder">
                {format!("Unsupported chart type: {kind}")}
            </div>
        }
        .into_any(),
    };

    view! {
        <div class=widget.layout.css_class()>
            <div class="widget-header">
                <h4>{widget.title}</h4>
                {widget.subtitle.map(|s| view! { <span class="widget-subtitle">{s}</span> })}
                {widget.sampled.then(|| view! { <span class="sample-badge">"sample data"</span> })}
            </div>
            {body}
        </div>
    }
}

#[component]
fn KpiBody(value: f64, delta: f64) -> impl IntoView {
    let class = if delta > 0.0 { "kpi-delta up" } else { "kpi-delta down" };
    view! {
        <div class="kpi">
            <div class="kpi-value">{format_vnd_compact(value)}</div>
            <div class=class>{format_change(delta)}</div>
        </div>
    }
}

#[component]
fn TableBody(rows: Vec<TableRow>) -> impl IntoView {
    view! {
        <table class="widget-table">
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Value"</th>
                    <th>"Change"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        let class = if row.negative { "change negative" } else { "change positive" };
                        view! {
                            <tr>
                                <td>{row.name}</td>
                                <td>{format_vnd_compact(row.value)}</td>
                                <td class=class>{row.change}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

/// One bar of a grouped bar chart, in SVG user units.
#[derive(Clone, Debug, PartialEq)]
struct Bar {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: &'static str,
}

fn coord(value: f64) -> String {
    format!("{value:.1}")
}

fn plot_width() -> f64 {
    WIDTH - PAD_LEFT - PAD_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - PAD_TOP - PAD_BOTTOM
}

fn scale_max(chart: &SeriesChart) -> f64 {
    let max = chart.max_value();
    if max > 0.0 { max } else { 1.0 }
}

fn y_of(value: f64, max: f64) -> f64 {
    PAD_TOP + plot_height() * (1.0 - value.max(0.0) / max)
}

fn slot_width(chart: &SeriesChart) -> f64 {
    plot_width() / chart.labels.len().max(1) as f64
}

fn bars(chart: &SeriesChart) -> Vec<Bar> {
    let max = scale_max(chart);
    let slot = slot_width(chart);
    let width = slot * 0.8 / chart.series.len().max(1) as f64;

    let mut out = Vec::new();
    for (s, series) in chart.series.iter().enumerate() {
        for (i, value) in series.values.iter().enumerate() {
            let Some(value) = value else { continue };
            let y = y_of(*value, max);
            out.push(Bar {
                x: PAD_LEFT + slot * i as f64 + slot * 0.1 + width * s as f64,
                y,
                width,
                height: PAD_TOP + plot_height() - y,
                color: series.color,
            });
        }
    }
    out
}

/// `points` attribute for a polyline; rows without the metric are skipped.
fn polyline_points(values: &[Option<f64>], chart: &SeriesChart) -> String {
    let max = scale_max(chart);
    let slot = slot_width(chart);
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| {
            v.map(|v| format!("{:.1},{:.1}", PAD_LEFT + slot * (i as f64 + 0.5), y_of(v, max)))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
fn SeriesBody(chart: SeriesChart) -> impl IntoView {
    if chart.series.is_empty() {
        return view! { <div class="widget-empty">"No data for the requested metrics"</div> }
            .into_any();
    }

    let max = scale_max(&chart);
    let slot = slot_width(&chart);
    let baseline = PAD_TOP + plot_height();

    let marks = match chart.style {
        SeriesStyle::Bar => bars(&chart)
            .into_iter()
            .map(|bar| {
                view! {
                    <rect
                        x=coord(bar.x)
                        y=coord(bar.y)
                        width=coord(bar.width)
                        height=coord(bar.height)
                        fill=bar.color
                    />
                }
                .into_any()
            })
            .collect::<Vec<_>>(),
        SeriesStyle::Line => chart
            .series
            .iter()
            .map(|series| {
                view! {
                    <polyline
                        points=polyline_points(&series.values, &chart)
                        fill="none"
                        stroke=series.color
                        stroke-width="2"
                    />
                }
                .into_any()
            })
            .collect::<Vec<_>>(),
    };

    let x_labels = chart
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            view! {
                <text
                    x=coord(PAD_LEFT + slot * (i as f64 + 0.5))
                    y=coord(HEIGHT - 8.0)
                    text-anchor="middle"
                    class="axis-label"
                >
                    {label.clone()}
                </text>
            }
        })
        .collect_view();

    let legend = chart
        .series
        .iter()
        .map(|series| {
            view! {
                <span class="legend-item">
                    <span class="legend-swatch" style=format!("background:{}", series.color)></span>
                    {series.label.clone()}
                </span>
            }
        })
        .collect_view();

    view! {
        <div class="series-chart">
            <svg viewBox=format!("0 0 {WIDTH} {HEIGHT}") class="chart-svg">
                <line
                    x1=coord(PAD_LEFT)
                    y1=coord(baseline)
                    x2=coord(WIDTH - PAD_RIGHT)
                    y2=coord(baseline)
                    class="axis"
                />
                <text x=coord(PAD_LEFT - 6.0) y=coord(PAD_TOP + 4.0) text-anchor="end" class="axis-label">
                    {format_vnd_compact(max)}
                </text>
                <text x=coord(PAD_LEFT - 6.0) y=coord(baseline) text-anchor="end" class="axis-label">
                    "0"
                </text>
                {marks}
                {x_labels}
            </svg>
            <div class="legend">{legend}</div>
        </div>
    }
    .into_any()
}

/// SVG path for the slice between two cumulative fractions of the circle.
fn pie_path(start: f64, end: f64, cx: f64, cy: f64, r: f64) -> String {
    let point = |fraction: f64| {
        let angle = fraction * std::f64::consts::TAU - std::f64::consts::FRAC_PI_2;
        (cx + r * angle.cos(), cy + r * angle.sin())
    };
    if end - start >= 0.9999 {
        // A single arc cannot draw a full circle.
        return format!(
            "M {cx:.2} {:.2} A {r} {r} 0 1 1 {cx:.2} {:.2} A {r} {r} 0 1 1 {cx:.2} {:.2} Z",
            cy - r,
            cy + r,
            cy - r
        );
    }
    let (x1, y1) = point(start);
    let (x2, y2) = point(end);
    let large_arc = if end - start > 0.5 { 1 } else { 0 };
    format!("M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r} {r} 0 {large_arc} 1 {x2:.2} {y2:.2} Z")
}

#[component]
fn PieBody(slices: Vec<PieSlice>) -> impl IntoView {
    let size = PIE_RADIUS * 2.0 + 4.0;
    let center = size / 2.0;

    let mut cumulative = 0.0;
    let paths = slices
        .iter()
        .filter(|slice| slice.fraction > 0.0)
        .map(|slice| {
            let start = cumulative;
            cumulative += slice.fraction;
            view! {
                <path d=pie_path(start, cumulative, center, center, PIE_RADIUS) fill=slice.color />
            }
        })
        .collect_view();

    let labels = slices
        .iter()
        .map(|slice| {
            view! {
                <li>
                    <span class="legend-swatch" style=format!("background:{}", slice.color)></span>
                    {slice.label()}
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="pie-chart">
            <svg viewBox=format!("0 0 {size} {size}") class="pie-svg">{paths}</svg>
            <ul class="pie-legend">{labels}</ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Series;

    fn chart(values: Vec<Option<f64>>) -> SeriesChart {
        SeriesChart {
            style: SeriesStyle::Bar,
            labels: (1..=values.len()).map(|i| i.to_string()).collect(),
            series: vec![Series {
                metric: "revenue".into(),
                label: "Revenue".into(),
                color: "#3b82f6",
                values,
            }],
        }
    }

    #[test]
    fn tallest_bar_spans_the_plot() {
        let bars = bars(&chart(vec![Some(50.0), Some(100.0)]));
        assert_eq!(bars.len(), 2);
        assert!((bars[1].height - plot_height()).abs() < 1e-9);
        assert!((bars[0].height - plot_height() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn missing_values_leave_gaps() {
        let c = chart(vec![Some(10.0), None, Some(30.0)]);
        assert_eq!(bars(&c).len(), 2);
        assert_eq!(polyline_points(&c.series[0].values, &c).split(' ').count(), 2);
    }

    #[test]
    fn zero_data_does_not_divide_by_zero() {
        let bars = bars(&chart(vec![Some(0.0)]));
        assert!(bars[0].height.abs() < 1e-9);
    }

    #[test]
    fn full_pie_is_drawn_as_two_arcs() {
        let path = pie_path(0.0, 1.0, 50.0, 50.0, 40.0);
        assert_eq!(path.matches(" A ").count(), 2);
        let half = pie_path(0.0, 0.5, 50.0, 50.0, 40.0);
        assert!(half.contains("A 40 40 0 0 1"));
    }
}
