//! Text formatting shared by axis labels, tooltips and card copy.

use chrono::{DateTime, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ChartError, ChartResult};

/// Fixed-point rendering with `decimals` digits after the point.
///
/// Ties round away from zero on the exact binary value, so `0.125` prints
/// as `0.13` while `1.005` (stored just below the tie) prints as `1.00`.
#[must_use]
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let dp = u32::try_from(decimals).unwrap_or(u32::MAX);
    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let rounded =
                exact.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.decimals$}")
        }
        None => format!("{value:.decimals$}"),
    }
}

/// One-decimal percentage, e.g. `3.1%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_fixed(value, 1))
}

/// Integer with `,` thousands separators, e.g. `327,680`.
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Abbreviated month and day, e.g. `Mar 5`.
#[must_use]
pub fn format_month_day(day: NaiveDate) -> String {
    day.format("%b %-d").to_string()
}

/// Abbreviated month, day and year, e.g. `Feb 20, 2026`.
#[must_use]
pub fn format_long_date(day: NaiveDate) -> String {
    day.format("%b %-d, %Y").to_string()
}

/// Parses a `YYYY-MM-DD` calendar day.
pub fn parse_iso_day(label: &str) -> ChartResult<NaiveDate> {
    NaiveDate::parse_from_str(label.trim(), "%Y-%m-%d").map_err(|err| {
        ChartError::InvalidData(format!("`{label}` is not a YYYY-MM-DD date: {err}"))
    })
}

/// Parses a capture timestamp into the calendar day shown on the card.
///
/// Accepts RFC 3339 datetimes (the day is taken in the timestamp's own
/// offset) and bare `YYYY-MM-DD` dates.
pub fn parse_captured_at(input: &str) -> ChartResult<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    parse_iso_day(trimmed).map_err(|_| {
        ChartError::InvalidData(format!(
            "captured_at `{input}` is neither an RFC 3339 datetime nor a YYYY-MM-DD date"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(327_680), "327,680");
        assert_eq!(format_count(12_345_678), "12,345,678");
    }

    #[test]
    fn percent_uses_one_decimal() {
        assert_eq!(format_percent(20.0), "20.0%");
        assert_eq!(format_percent(3.07), "3.1%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(format_percent(12.25), "12.3%");
        assert_eq!(format_percent(2.25), "2.3%");
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(-0.125, 2), "-0.13");
        assert_eq!(format_fixed(1.005, 2), "1.00");
        assert_eq!(format_fixed(0.7385, 3), "0.739");
        assert_eq!(format_fixed(0.5, 0), "1");
    }

    #[test]
    fn month_day_drops_leading_zero() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 5).expect("valid date");
        assert_eq!(format_month_day(day), "Mar 5");
        assert_eq!(format_long_date(day), "Mar 5, 2026");
    }

    #[test]
    fn captured_at_accepts_datetime_and_plain_day() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 20).expect("valid date");
        assert_eq!(
            parse_captured_at("2026-02-20T08:00:00Z").expect("rfc3339"),
            expected
        );
        assert_eq!(parse_captured_at("2026-02-20").expect("plain day"), expected);
        assert!(parse_captured_at("last tuesday").is_err());
    }
}
