//! Rendering of minute counts and hour quantities for display.
//!
//! Two renderings of a minute count exist and callers must pick the right one:
//!
//! - [`format_minutes`] is a **duration**: hours keep growing past 23
//!   (`600` minutes of overtime in a week is `"10:00"`, 1500 is `"25:00"`).
//! - [`format_minutes_clock`] is a **clock time**: hours wrap modulo 24, used
//!   when a check-out time is derived from an entry time plus a duration.
//!
//! Hours are not zero-padded, minutes always are: `"8:05"`, `"0:30"`.
//!
//! ## Hour quantities
//!
//! Totals are kept in decimal hours with two places. Punches have second
//! precision, so a day's hours are built from whole seconds with
//! [`hours_from_seconds`] and rounded half-up with [`round2`] on a
//! [`Decimal`]. Rounding the binary `f64` instead would send midpoints like
//! 18 seconds (`0.005` h) the wrong way.
//!
//! ```rust
//! use tareo::libs::formatter::{format_minutes, format_minutes_clock};
//!
//! assert_eq!(format_minutes(1500), "25:00");
//! assert_eq!(format_minutes_clock(1500), "1:00");
//! ```

use crate::libs::time::{minutes_of_day, parse_time};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

const MINUTES_PER_DAY: i64 = 24 * 60;
const SECONDS_PER_HOUR: i64 = 3600;

/// Renders `total` minutes as a non-wrapping `H:MM` duration.
///
/// Used for worked hours and overtime, which may exceed a day when summed
/// over a week. Negative totals are clamped to `"0:00"`.
pub fn format_minutes(total: i64) -> String {
    let total = total.max(0);
    format!("{}:{:02}", total / 60, total % 60)
}

/// Renders `total` minutes as an `H:MM` clock time, wrapping past midnight.
///
/// Negative totals wrap forward, so `-30` is `"23:30"`.
pub fn format_minutes_clock(total: i64) -> String {
    let total = total.rem_euclid(MINUTES_PER_DAY);
    format!("{}:{:02}", total / 60, total % 60)
}

/// Renders a decimal hour quantity (`8.25`) as a duration (`"8:15"`),
/// rounded to the nearest minute.
pub fn format_hours(hours: f64) -> String {
    format_minutes((hours * 60.0).round() as i64)
}

/// Half-up rounding to two decimal places.
///
/// Works on [`Decimal`] so that exact midpoints such as `1.005` round up
/// instead of falling to the binary float just below them.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Exact hours in a whole number of seconds.
pub fn hours_from_seconds(seconds: i64) -> Decimal {
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}

/// An hour total that already has at most two decimals, back as a [`Decimal`].
pub fn hours_decimal(hours: f64) -> Decimal {
    Decimal::new((hours * 100.0).round() as i64, 2)
}

/// Rounds `value` with [`round2`] and returns the nearest `f64`.
pub fn hours_f64(value: Decimal) -> f64 {
    let hundredths = round2(value)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.to_i64())
        .unwrap_or(0);
    hundredths as f64 / 100.0
}

/// Normalises a raw punch string to zero-padded `HH:MM` for display.
pub fn display_time(raw: &str) -> Option<String> {
    parse_time(raw).map(|instant| instant.format("%H:%M").to_string())
}

/// Adds `minutes` to a raw clock string and renders the result as a clock time.
///
/// `None` when the punch does not parse or the sum does not fit an `i64`.
pub fn clock_after(raw: &str, minutes: i64) -> Option<String> {
    let instant = parse_time(raw)?;
    minutes_of_day(instant).checked_add(minutes).map(format_minutes_clock)
}
