//! Interprets the dashboard configuration returned by the chat service into
//! one widget model per chart. Rendering to HTML/SVG lives in
//! `components::dashboard`; everything here is plain data so it can be
//! checked without a browser.

mod sample;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Slice colours, reused cyclically by index.
pub const PALETTE: [&str; 6] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899",
];

// ── Configuration (wire format) ─────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DashboardSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub charts: Vec<ChartEntry>,
}

/// A chart slot. Entries that do not parse are kept so the slot can still
/// show a placeholder without taking the rest of the dashboard down.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChartEntry {
    Spec(ChartSpec),
    Malformed(Value),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub metrics: Option<Vec<String>>,
    #[serde(default, rename = "groupBy")]
    pub group_by: Option<String>,
    #[serde(default, rename = "data", alias = "rows")]
    pub rows: Option<Vec<Value>>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            metrics: None,
            group_by: None,
            rows: None,
            columns: None,
        }
    }

    pub fn with_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = Some(metrics.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_rows(mut self, rows: Vec<Value>) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_group_by(mut self, group_by: impl Into<String>) -> Self {
        self.group_by = Some(group_by.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Kpi,
    Table,
    Unsupported(String),
}

impl From<String> for ChartKind {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "line" => ChartKind::Line,
            "bar" => ChartKind::Bar,
            "pie" => ChartKind::Pie,
            "kpi" => ChartKind::Kpi,
            "table" => ChartKind::Table,
            _ => ChartKind::Unsupported(raw),
        }
    }
}

impl ChartKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Kpi => "kpi",
            ChartKind::Table => "table",
            ChartKind::Unsupported(raw) => raw,
        }
    }

    pub fn layout(&self) -> LayoutSlot {
        match self {
            ChartKind::Table | ChartKind::Line | ChartKind::Bar => LayoutSlot::Wide,
            ChartKind::Pie => LayoutSlot::Medium,
            ChartKind::Kpi | ChartKind::Unsupported(_) => LayoutSlot::Narrow,
        }
    }
}

// ── Widget models ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutSlot {
    Wide,
    Medium,
    Narrow,
}

impl LayoutSlot {
    pub fn css_class(&self) -> &'static str {
        match self {
            LayoutSlot::Wide => "widget widget-wide",
            LayoutSlot::Medium => "widget widget-medium",
            LayoutSlot::Narrow => "widget widget-narrow",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedDashboard {
    pub title: String,
    pub period: Option<String>,
    pub widgets: Vec<Widget>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Widget {
    pub title: String,
    pub subtitle: Option<String>,
    pub layout: LayoutSlot,
    /// True when the numbers were synthesized because the chart carried no rows.
    pub sampled: bool,
    pub body: WidgetBody,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WidgetBody {
    Kpi { value: f64, delta: f64 },
    Table(Vec<TableRow>),
    Series(SeriesChart),
    Pie(Vec<PieSlice>),
    Unsupported { kind: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub name: String,
    pub value: f64,
    pub change: String,
    pub negative: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    Bar,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesChart {
    pub style: SeriesStyle,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl SeriesChart {
    /// Largest plotted value, used to scale the y axis.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .fold(0.0_f64, |acc, v| acc.max(*v))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub metric: String,
    pub label: String,
    pub color: &'static str,
    pub values: Vec<Option<f64>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
    pub fraction: f64,
    pub color: &'static str,
}

impl PieSlice {
    /// Label shown next to the slice, e.g. `"Sales: 30%"`.
    pub fn label(&self) -> String {
        format!("{}: {:.0}%", self.name, self.fraction * 100.0)
    }
}

// ── Interpretation ──────────────────────────────────────────────────────────

pub fn render(spec: &DashboardSpec) -> RenderedDashboard {
    RenderedDashboard {
        title: spec.title.clone(),
        period: spec.period.clone(),
        widgets: spec.charts.iter().map(render_entry).collect(),
    }
}

pub fn render_entry(entry: &ChartEntry) -> Widget {
    match entry {
        ChartEntry::Spec(chart) => render_chart(chart),
        ChartEntry::Malformed(raw) => {
            log::warn!("Skipping malformed chart entry: {raw}");
            let title = raw
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("Untitled chart")
                .to_string();
            let kind = raw
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            Widget {
                title,
                subtitle: None,
                layout: LayoutSlot::Narrow,
                sampled: false,
                body: WidgetBody::Unsupported { kind },
            }
        }
    }
}

pub fn render_chart(chart: &ChartSpec) -> Widget {
    let sampled = chart.rows.is_none();
    let rows: Vec<Map<String, Value>> = match &chart.rows {
        Some(rows) => rows.iter().filter_map(|r| r.as_object().cloned()).collect(),
        None => sample::rows_for(&chart.kind, &chart.title),
    };

    let body = match &chart.kind {
        ChartKind::Kpi => kpi_body(chart, &rows),
        ChartKind::Table => WidgetBody::Table(rows.iter().map(table_row).collect()),
        ChartKind::Line => WidgetBody::Series(series_chart(SeriesStyle::Line, chart, &rows)),
        ChartKind::Bar => WidgetBody::Series(series_chart(SeriesStyle::Bar, chart, &rows)),
        ChartKind::Pie => WidgetBody::Pie(pie_slices(&rows)),
        ChartKind::Unsupported(kind) => WidgetBody::Unsupported { kind: kind.clone() },
    };

    Widget {
        title: chart.title.clone(),
        subtitle: chart.group_by.clone(),
        layout: chart.kind.layout(),
        sampled,
        body,
    }
}

/// Reads a number from a JSON field; numeric strings such as `"-12.5%"` count.
fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kpi_body(chart: &ChartSpec, rows: &[Map<String, Value>]) -> WidgetBody {
    let (fallback_value, fallback_delta) = sample::kpi(&chart.kind, &chart.title);
    let first = rows.first();
    let value = first
        .and_then(|r| number(r.get("value")))
        .unwrap_or(fallback_value);
    let delta = first
        .and_then(|r| number(r.get("change")).or_else(|| number(r.get("delta"))))
        .unwrap_or(fallback_delta);
    WidgetBody::Kpi { value, delta }
}

fn table_row(row: &Map<String, Value>) -> TableRow {
    let change = match row.get("change") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => format!("{:.1}%", n.as_f64().unwrap_or(0.0)),
        _ => "0.0%".to_string(),
    };
    let negative = change.trim_start().starts_with('-');
    TableRow {
        name: text(row.get("name")).unwrap_or_else(|| "-".to_string()),
        value: number(row.get("value")).unwrap_or(0.0),
        change,
        negative,
    }
}

fn metric_label(metric: &str) -> String {
    match metric {
        "revenue" => "Revenue".to_string(),
        "profit" => "Profit".to_string(),
        "cost" => "Cost".to_string(),
        "actual" => "Actual".to_string(),
        "forecast" => "Forecast".to_string(),
        other => other.to_string(),
    }
}

fn metric_color(metric: &str, index: usize) -> &'static str {
    match metric {
        "revenue" => PALETTE[0],
        "profit" => PALETTE[1],
        "cost" => PALETTE[2],
        _ => PALETTE[index % PALETTE.len()],
    }
}

fn series_chart(style: SeriesStyle, chart: &ChartSpec, rows: &[Map<String, Value>]) -> SeriesChart {
    let labels = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            ["name", "month", "label"]
                .iter()
                .find_map(|key| text(row.get(*key)))
                .unwrap_or_else(|| (i + 1).to_string())
        })
        .collect();

    let mut seen: Vec<&str> = Vec::new();
    let mut series = Vec::new();
    for metric in chart.metrics.iter().flatten() {
        if seen.contains(&metric.as_str()) {
            continue;
        }
        seen.push(metric);

        let values: Vec<Option<f64>> = rows.iter().map(|r| number(r.get(metric))).collect();
        if values.iter().all(Option::is_none) {
            log::debug!("Metric '{metric}' not present in data for '{}'", chart.title);
            continue;
        }
        series.push(Series {
            metric: metric.clone(),
            label: metric_label(metric),
            color: metric_color(metric, series.len()),
            values,
        });
    }

    SeriesChart { style, labels, series }
}

fn pie_slices(rows: &[Map<String, Value>]) -> Vec<PieSlice> {
    let values: Vec<f64> = rows
        .iter()
        .map(|r| number(r.get("value")).unwrap_or(0.0).max(0.0))
        .collect();
    let total: f64 = values.iter().sum();

    rows.iter()
        .zip(values)
        .enumerate()
        .map(|(i, (row, value))| PieSlice {
            name: text(row.get("name")).unwrap_or_else(|| format!("#{}", i + 1)),
            value,
            fraction: if total > 0.0 { value / total } else { 0.0 },
            color: PALETTE[i % PALETTE.len()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> DashboardSpec {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn pie_fractions_follow_values_in_order() {
        let chart = ChartSpec::new(ChartKind::Pie, "Share")
            .with_rows(vec![json!({"name": "A", "value": 30}), json!({"name": "B", "value": 70})]);
        let WidgetBody::Pie(slices) = render_chart(&chart).body else {
            panic!("expected pie");
        };
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].name, "A");
        assert!((slices[0].fraction - 0.3).abs() < 1e-9);
        assert!((slices[1].fraction - 0.7).abs() < 1e-9);
        assert_eq!(slices[0].label(), "A: 30%");
        let sum: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pie_colors_cycle_through_palette() {
        let rows = (0..8).map(|i| json!({"name": format!("c{i}"), "value": 1})).collect();
        let chart = ChartSpec::new(ChartKind::Pie, "Many").with_rows(rows);
        let WidgetBody::Pie(slices) = render_chart(&chart).body else {
            panic!("expected pie");
        };
        assert_eq!(slices[6].color, PALETTE[0]);
        assert_eq!(slices[7].color, PALETTE[1]);
    }

    #[test]
    fn pie_with_zero_total_does_not_divide_by_zero() {
        let chart = ChartSpec::new(ChartKind::Pie, "Empty")
            .with_rows(vec![json!({"name": "A", "value": 0}), json!({"name": "B", "value": -4})]);
        let WidgetBody::Pie(slices) = render_chart(&chart).body else {
            panic!("expected pie");
        };
        assert!(slices.iter().all(|s| s.fraction == 0.0));
    }

    #[test]
    fn line_metric_missing_from_rows_is_omitted() {
        let chart = ChartSpec::new(ChartKind::Line, "Trend")
            .with_metrics(["revenue"])
            .with_rows(vec![json!({"name": "Jan", "units": 4}), json!({"name": "Feb", "units": 9})]);
        let widget = render_chart(&chart);
        let WidgetBody::Series(series) = widget.body else {
            panic!("expected series");
        };
        assert!(series.series.is_empty());
        assert_eq!(series.labels, vec!["Jan", "Feb"]);
        assert_eq!(widget.layout, LayoutSlot::Wide);
    }

    #[test]
    fn bar_keeps_only_present_metrics_in_order() {
        let chart = ChartSpec::new(ChartKind::Bar, "Monthly")
            .with_metrics(["profit", "margin", "revenue", "profit"])
            .with_rows(vec![
                json!({"month": "T1", "revenue": 10, "profit": 2}),
                json!({"month": "T2", "revenue": "12", "profit": null}),
            ]);
        let WidgetBody::Series(series) = render_chart(&chart).body else {
            panic!("expected series");
        };
        let metrics: Vec<_> = series.series.iter().map(|s| s.metric.as_str()).collect();
        assert_eq!(metrics, vec!["profit", "revenue"]);
        assert_eq!(series.series[0].values, vec![Some(2.0), None]);
        assert_eq!(series.series[1].values, vec![Some(10.0), Some(12.0)]);
        assert_eq!(series.series[1].color, "#3b82f6");
        assert_eq!(series.labels, vec!["T1", "T2"]);
        assert_eq!(series.max_value(), 12.0);
    }

    #[test]
    fn unknown_kind_becomes_placeholder_without_affecting_siblings() {
        let spec = parse(json!({
            "title": "Sales overview",
            "period": "Q3",
            "charts": [
                {"type": "kpi", "title": "Revenue", "data": [{"value": 1200, "change": "-4.5%"}]},
                {"type": "scatter", "title": "Spread"},
                {"type": "pie", "title": "Departments", "data": [{"name": "IT", "value": 5}]}
            ]
        }));
        let dashboard = render(&spec);
        assert_eq!(dashboard.widgets.len(), 3);
        assert_eq!(dashboard.period.as_deref(), Some("Q3"));
        assert_eq!(
            dashboard.widgets[0].body,
            WidgetBody::Kpi { value: 1200.0, delta: -4.5 }
        );
        assert_eq!(
            dashboard.widgets[1].body,
            WidgetBody::Unsupported { kind: "scatter".to_string() }
        );
        assert_eq!(dashboard.widgets[1].layout, LayoutSlot::Narrow);
        assert!(matches!(dashboard.widgets[2].body, WidgetBody::Pie(_)));
        assert_eq!(dashboard.widgets[2].layout, LayoutSlot::Medium);
    }

    #[test]
    fn malformed_entry_is_isolated() {
        let spec = parse(json!({
            "title": "Mixed",
            "charts": [
                "not a chart",
                {"title": "No type here"},
                {"type": "table", "title": "Top products", "data": [
                    {"name": "Laptop", "value": 5000000, "change": "-3.1%"},
                    {"name": "Phone", "value": 7000000, "change": 2.5}
                ]}
            ]
        }));
        let dashboard = render(&spec);
        assert_eq!(dashboard.widgets.len(), 3);
        assert!(matches!(dashboard.widgets[0].body, WidgetBody::Unsupported { .. }));
        assert_eq!(dashboard.widgets[1].title, "No type here");
        let WidgetBody::Table(rows) = &dashboard.widgets[2].body else {
            panic!("expected table");
        };
        assert!(rows[0].negative);
        assert_eq!(rows[1].change, "2.5%");
        assert!(!rows[1].negative);
    }

    #[test]
    fn missing_rows_are_synthesized_per_kind() {
        let line = render_chart(&ChartSpec::new(ChartKind::Line, "Revenue").with_metrics(["revenue", "cost"]));
        assert!(line.sampled);
        let WidgetBody::Series(series) = line.body else {
            panic!("expected series");
        };
        assert_eq!(series.labels.len(), 12);
        assert_eq!(series.series.len(), 2);

        let WidgetBody::Pie(slices) = render_chart(&ChartSpec::new(ChartKind::Pie, "Split")).body else {
            panic!("expected pie");
        };
        assert_eq!(slices.len(), 5);

        let WidgetBody::Table(rows) = render_chart(&ChartSpec::new(ChartKind::Table, "Top")).body else {
            panic!("expected table");
        };
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.change.ends_with('%')));
    }

    #[test]
    fn sample_data_is_stable_across_renders() {
        let spec = parse(json!({
            "title": "Demo",
            "charts": [
                {"type": "bar", "title": "Revenue", "metrics": ["revenue", "profit"]},
                {"type": "kpi", "title": "Orders"},
                {"type": "table", "title": "Products"}
            ]
        }));
        assert_eq!(render(&spec), render(&spec));
    }

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!(ChartKind::from("LINE".to_string()), ChartKind::Line);
        assert_eq!(
            ChartKind::from("heatmap".to_string()),
            ChartKind::Unsupported("heatmap".to_string())
        );
    }
}
