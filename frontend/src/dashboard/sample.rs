//! Placeholder data for charts that arrive without rows. Seeded from the
//! chart's kind and title so the same chart always shows the same numbers.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};

use super::ChartKind;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DEPARTMENTS: [&str; 5] = ["Sales", "Marketing", "Operations", "IT", "Finance"];

const PRODUCTS: [&str; 10] = [
    "Laptop Dell XPS",
    "iPhone 15 Pro",
    "Samsung Galaxy S24",
    "MacBook Pro M3",
    "Sony WH-1000XM5",
    "iPad Air",
    "AirPods Pro",
    "ThinkPad X1",
    "Surface Pro 9",
    "Magic Mouse",
];

fn rng_for(kind: &ChartKind, title: &str) -> SmallRng {
    let mut hasher = DefaultHasher::new();
    kind.as_str().hash(&mut hasher);
    title.hash(&mut hasher);
    SmallRng::seed_from_u64(hasher.finish())
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub(super) fn rows_for(kind: &ChartKind, title: &str) -> Vec<Map<String, Value>> {
    let mut rng = rng_for(kind, title);
    match kind {
        ChartKind::Line | ChartKind::Bar => MONTHS
            .iter()
            .map(|month| {
                object(json!({
                    "name": month,
                    "revenue": rng.gen_range(300_000_000u64..800_000_000),
                    "profit": rng.gen_range(100_000_000u64..300_000_000),
                    "cost": rng.gen_range(150_000_000u64..450_000_000),
                }))
            })
            .collect(),
        ChartKind::Pie => DEPARTMENTS
            .iter()
            .map(|dept| {
                object(json!({
                    "name": dept,
                    "value": rng.gen_range(100_000_000u64..400_000_000),
                }))
            })
            .collect(),
        ChartKind::Table => PRODUCTS
            .iter()
            .map(|product| {
                let change: f64 = rng.gen_range(-20.0..20.0);
                object(json!({
                    "name": product,
                    "value": rng.gen_range(50_000_000u64..150_000_000),
                    "change": format!("{change:.1}%"),
                }))
            })
            .collect(),
        ChartKind::Kpi | ChartKind::Unsupported(_) => Vec::new(),
    }
}

/// Value and percentage delta for a KPI card.
pub(super) fn kpi(kind: &ChartKind, title: &str) -> (f64, f64) {
    let mut rng = rng_for(kind, title);
    let value = rng.gen_range(300_000_000u64..800_000_000) as f64;
    let delta: f64 = rng.gen_range(-20.0..20.0);
    (value, (delta * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_rows_have_all_metrics_in_range() {
        let rows = rows_for(&ChartKind::Bar, "Revenue by month");
        assert_eq!(rows.len(), 12);
        for row in &rows {
            let revenue = row["revenue"].as_u64().unwrap();
            assert!((300_000_000..800_000_000).contains(&revenue));
            assert!(row.contains_key("profit"));
            assert!(row.contains_key("cost"));
        }
    }

    #[test]
    fn different_titles_give_different_samples() {
        assert_ne!(
            rows_for(&ChartKind::Pie, "By department"),
            rows_for(&ChartKind::Pie, "By region")
        );
    }

    #[test]
    fn kpi_delta_is_rounded() {
        let (value, delta) = kpi(&ChartKind::Kpi, "Orders");
        assert!(value >= 300_000_000.0);
        assert!((-20.0..=20.0).contains(&delta));
        assert_eq!((delta * 10.0).round() / 10.0, delta);
    }
}
