//! Number formatting in the Vietnamese locale conventions used across the UI
//! ("." groups thousands, "," marks decimals, amounts in đồng).

const COMPACT_UNITS: [(f64, &str); 4] = [
    (1e12, "NT"),
    (1e9, "T"),
    (1e6, "Tr"),
    (1e3, "N"),
];

/// Groups the integer part with dots: `1234567.0` → `"1.234.567"`.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if negative && out != "0" {
        out.insert(0, '-');
    }
    out
}

/// Full amount: `1234567.0` → `"1.234.567 ₫"`.
pub fn format_vnd(amount: f64) -> String {
    format!("{} ₫", group_thousands(amount))
}

/// One decimal at most, trailing zero dropped, decimal comma.
fn one_decimal(value: f64) -> String {
    let text = format!("{value:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text).to_string();
    text.replace('.', ",")
}

/// Compact amount: `350_000_000.0` → `"350 Tr ₫"`, `1_500_000_000.0` → `"1,5 T ₫"`.
pub fn format_vnd_compact(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();

    for (idx, (scale, unit)) in COMPACT_UNITS.iter().enumerate() {
        if abs >= *scale {
            let scaled = (abs / scale * 10.0).round() / 10.0;
            // 999.96 N rounds to 1000 N; promote to the next unit instead.
            if scaled >= 1000.0 && idx > 0 {
                let (bigger, bigger_unit) = COMPACT_UNITS[idx - 1];
                return format!("{sign}{} {bigger_unit} ₫", one_decimal(abs / bigger));
            }
            return format!("{sign}{} {unit} ₫", one_decimal(scaled));
        }
    }
    format!("{sign}{} ₫", one_decimal(abs))
}

/// Signed change with an arrow: `12.34` → `"↑ 12.3%"`, `-5.0` → `"↓ 5%"`.
pub fn format_change(change: f64) -> String {
    let arrow = if change > 0.0 { "↑" } else { "↓" };
    format!("{arrow} {}%", one_decimal(change.abs()).replace(',', "."))
}

/// ISO date as day/month/year: `"2024-09-05"` → `"5/9/2024"`. Timestamps are
/// cut to their date; anything else is shown as given.
pub fn format_date(raw: &str) -> String {
    let date_part = raw.get(..10).unwrap_or(raw);
    match chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%-d/%-m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1234.0), "1.234");
        assert_eq!(group_thousands(1234567.4), "1.234.567");
        assert_eq!(group_thousands(-45000.0), "-45.000");
    }

    #[test]
    fn full_currency() {
        assert_eq!(format_vnd(2_500_000.0), "2.500.000 ₫");
    }

    #[test]
    fn compact_currency_units() {
        assert_eq!(format_vnd_compact(350_000_000.0), "350 Tr ₫");
        assert_eq!(format_vnd_compact(1_500_000_000.0), "1,5 T ₫");
        assert_eq!(format_vnd_compact(52_000.0), "52 N ₫");
        assert_eq!(format_vnd_compact(750.0), "750 ₫");
        assert_eq!(format_vnd_compact(-2_100_000_000.0), "-2,1 T ₫");
    }

    #[test]
    fn compact_promotes_on_rounding_overflow() {
        assert_eq!(format_vnd_compact(999_990.0), "1 Tr ₫");
    }

    #[test]
    fn dates_in_day_month_year() {
        assert_eq!(format_date("2024-09-05"), "5/9/2024");
        assert_eq!(format_date("2024-12-31T08:00:00"), "31/12/2024");
        assert_eq!(format_date("next week"), "next week");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn change_arrows() {
        assert_eq!(format_change(12.34), "↑ 12.3%");
        assert_eq!(format_change(-5.0), "↓ 5%");
    }
}
