//! Punch-time parsing and duration arithmetic.
//!
//! Attendance terminals report punches as bare clock strings (`"08:00"`,
//! `"17:30:15"`). To subtract two of them they are anchored to one fixed
//! reference date and handled as [`NaiveDateTime`] instants.
//!
//! Nothing in here returns an error: a string that cannot be read as a clock
//! time is simply "no punch", and a duration outside the `(0, 24)` hour window
//! is simply "no valid duration". Callers downgrade both to absence.
//!
//! ```rust
//! use tareo::libs::time::{duration_hours, parse_time};
//!
//! let start = parse_time("08:00").unwrap();
//! let end = parse_time("17:30").unwrap();
//! assert_eq!(duration_hours(start, end), 9.5);
//! assert!(parse_time("FALTA").is_none());
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A parsed punch, anchored to [`reference_date`].
pub type Instant = NaiveDateTime;

/// Placeholder some upstream screens send instead of an empty check-in.
pub const MISSING_SENTINEL: &str = "FALTA";

/// Placeholder used by exports for "no value".
pub const DASH_SENTINEL: &str = "-";

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// The arbitrary day every punch is anchored to.
pub fn reference_date() -> NaiveDate {
    NaiveDate::default()
}

/// Parses `"HH:MM"` or `"HH:MM:SS"` into an [`Instant`].
///
/// Returns `None` for the empty string, the `"FALTA"` and `"-"` sentinels and
/// anything that is not a valid clock time.
pub fn parse_time(s: &str) -> Option<Instant> {
    let s = s.trim();
    if s.is_empty() || s == DASH_SENTINEL || s.eq_ignore_ascii_case(MISSING_SENTINEL) {
        return None;
    }

    let time = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(s, format).ok());

    match time {
        Some(time) => Some(reference_date().and_time(time)),
        None => {
            tracing::warn!(value = s, "unparseable punch time treated as missing");
            None
        }
    }
}

/// Parses an optional raw punch, treating `None` like the empty string.
pub fn parse_optional(s: Option<&str>) -> Option<Instant> {
    s.and_then(parse_time)
}

/// `(end - start)` in hours, with second precision.
///
/// The raw value may be negative or exceed a day; use [`valid_hours`] or
/// [`shift_hours`] to discard those.
pub fn duration_hours(start: Instant, end: Instant) -> f64 {
    (end - start).num_seconds() as f64 / 3600.0
}

/// Keeps `hours` only when it lies strictly inside `(0, 24)`.
pub fn valid_hours(hours: f64) -> Option<f64> {
    (hours > 0.0 && hours < 24.0).then_some(hours)
}

/// Worked hours between two punches of the same shift.
///
/// Without `allow_overnight` a check-out earlier than the check-in is
/// rejected. With it, the check-out is taken to be on the following day.
pub fn shift_hours(start: Instant, end: Instant, allow_overnight: bool) -> Option<f64> {
    let mut hours = duration_hours(start, end);
    if allow_overnight && hours < 0.0 {
        hours += 24.0;
    }
    valid_hours(hours)
}

/// Minutes since midnight of the reference date.
pub fn minutes_of_day(instant: Instant) -> i64 {
    (instant - reference_date().and_time(NaiveTime::MIN)).num_minutes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_clock_formats() {
        let short = parse_time("08:05").unwrap();
        let long = parse_time("08:05:30").unwrap();
        assert_eq!(minutes_of_day(short), 8 * 60 + 5);
        assert_eq!((long - short).num_seconds(), 30);
    }

    #[test]
    fn sentinels_and_garbage_are_missing() {
        assert!(parse_time("").is_none());
        assert!(parse_time("   ").is_none());
        assert!(parse_time("FALTA").is_none());
        assert!(parse_time("falta").is_none());
        assert!(parse_time("-").is_none());
        assert!(parse_time("25:00").is_none());
        assert!(parse_time("8h").is_none());
        assert!(parse_optional(None).is_none());
    }

    #[test]
    fn duration_between_punches() {
        let start = parse_time("08:00").unwrap();
        let end = parse_time("17:30").unwrap();
        assert_eq!(duration_hours(start, end), 9.5);
        assert_eq!(duration_hours(end, start), -9.5);
    }

    #[test]
    fn validity_window_is_open() {
        assert_eq!(valid_hours(0.0), None);
        assert_eq!(valid_hours(-1.0), None);
        assert_eq!(valid_hours(24.0), None);
        assert_eq!(valid_hours(23.99), Some(23.99));
    }

    #[test]
    fn overnight_rollover_is_opt_in() {
        let start = parse_time("22:00").unwrap();
        let end = parse_time("06:00").unwrap();
        assert_eq!(shift_hours(start, end, false), None);
        assert_eq!(shift_hours(start, end, true), Some(8.0));
        assert_eq!(shift_hours(start, start, true), None);
    }
}
