//! Timestamp parsing and year correction.
//!
//! Raw timestamps come from hand-entered records, so two repair layers sit
//! in front of the calendar: a format ladder (RFC 3339, ISO date-time with
//! an optional trailing `Z`, plain date) with a regex fallback that pulls a
//! `YYYY-MM-DD` shaped substring out of noisy text, and a single-digit year
//! repair for the known transcription slip where one digit of the year was
//! miskeyed (`2925` for `2025`).
//!
//! [`correct_year`] is a pure function of the digits, the run year, and the
//! window half-width, so the repair policy is testable in isolation.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use std::collections::BTreeSet;

use crate::error::RecordError;

/// Naive date-time formats tried after RFC 3339, on the `Z`-stripped string.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a raw timestamp string and repair its year if needed.
///
/// Returns the corrected date-time; the caller derives both the canonical
/// `timestamp` field and the output filename from it. Fails with
/// [`RecordError::UnparseableTimestamp`] or [`RecordError::AmbiguousYear`],
/// never with a silently implausible year.
pub fn correct_timestamp(
    raw: &str,
    run_year: i32,
    window_years: i32,
) -> Result<NaiveDateTime, RecordError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RecordError::UnparseableTimestamp("(empty)".to_string()));
    }

    let dt = parse_datetime(trimmed)
        .ok_or_else(|| RecordError::UnparseableTimestamp(trimmed.to_string()))?;

    let year = correct_year(dt.year(), run_year, window_years)?;
    if year == dt.year() {
        return Ok(dt);
    }

    // The repaired year must still land on a real calendar day (Feb 29
    // does not survive every repair).
    NaiveDate::from_ymd_opt(year, dt.month(), dt.day())
        .and_then(|d| d.and_hms_opt(dt.hour(), dt.minute(), dt.second()))
        .ok_or_else(|| {
            RecordError::UnparseableTimestamp(format!(
                "{} is not a valid date with repaired year {}",
                trimmed, year
            ))
        })
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    let stripped = s.strip_suffix('Z').unwrap_or(s);

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(stripped, format) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(stripped, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    extract_date_like(stripped)
}

/// Heuristic fallback: first `YYYY-M-D` shaped substring anywhere in the
/// text, taken at midnight.
fn extract_date_like(s: &str) -> Option<NaiveDateTime> {
    let re = Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").expect("date pattern is valid");
    let caps = re.captures(s)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

/// Repair a year that fell outside the plausible window.
///
/// Years inside `run_year ± window_years` pass through unchanged. Outside
/// it, every single-digit substitution of the four-digit year is tried:
/// exactly one in-window candidate wins, several are an
/// [`RecordError::AmbiguousYear`], and none is an
/// [`RecordError::UnparseableTimestamp`]. Multi-digit edits are never
/// guessed.
pub fn correct_year(year: i32, run_year: i32, window_years: i32) -> Result<i32, RecordError> {
    let lo = run_year - window_years;
    let hi = run_year + window_years;
    if (lo..=hi).contains(&year) {
        return Ok(year);
    }

    if !(1000..=9999).contains(&year) {
        return Err(RecordError::UnparseableTimestamp(format!(
            "year {} is outside {}..={} and not a four-digit year",
            year, lo, hi
        )));
    }

    let mut candidates = BTreeSet::new();
    for pos in 0..4u32 {
        let place = 10_i32.pow(3 - pos);
        let digit = (year / place) % 10;
        for replacement in 0..=9 {
            if replacement == digit {
                continue;
            }
            // A leading zero would not be a four-digit year.
            if pos == 0 && replacement == 0 {
                continue;
            }
            let candidate = year + (replacement - digit) * place;
            if (lo..=hi).contains(&candidate) {
                candidates.insert(candidate);
            }
        }
    }

    let candidates: Vec<i32> = candidates.into_iter().collect();
    match candidates.as_slice() {
        [] => Err(RecordError::UnparseableTimestamp(format!(
            "year {} is outside {}..={} with no single-digit repair",
            year, lo, hi
        ))),
        [only] => Ok(*only),
        _ => Err(RecordError::AmbiguousYear { year, candidates }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUN_YEAR: i32 = 2025;
    const WINDOW: i32 = 2;

    fn correct(raw: &str) -> Result<NaiveDateTime, RecordError> {
        correct_timestamp(raw, RUN_YEAR, WINDOW)
    }

    #[test]
    fn valid_datetime_is_identity() {
        let dt = correct("2025-05-15T10:00:00").unwrap();
        assert_eq!(dt.to_string(), "2025-05-15 10:00:00");
    }

    #[test]
    fn trailing_z_is_accepted() {
        let dt = correct("2025-05-15T10:00:00Z").unwrap();
        assert_eq!(dt.year(), 2025);
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn rfc3339_offset_is_accepted() {
        let dt = correct("2025-05-15T10:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn fractional_seconds_are_accepted() {
        let dt = correct("2025-05-15T10:00:00.123").unwrap();
        assert_eq!(dt.second(), 0);
    }

    #[test]
    fn plain_date_is_midnight() {
        let dt = correct("2025-05-15").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.day(), 15);
    }

    #[test]
    fn space_separated_datetime_is_accepted() {
        assert!(correct("2025-05-15 10:30:00").is_ok());
    }

    #[test]
    fn heuristic_pulls_date_from_noise() {
        let dt = correct("logged on 2025-5-15 late evening").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 5, 15));
    }

    #[test]
    fn garbage_is_unparseable() {
        assert!(matches!(
            correct("yesterday-ish"),
            Err(RecordError::UnparseableTimestamp(_))
        ));
    }

    #[test]
    fn empty_is_unparseable() {
        assert!(matches!(
            correct(""),
            Err(RecordError::UnparseableTimestamp(_))
        ));
    }

    #[test]
    fn miskeyed_century_is_repaired() {
        let dt = correct("2925-05-15T10:00:00").unwrap();
        assert_eq!(dt.year(), 2025);
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn correct_year_identity_inside_window() {
        for year in 2023..=2027 {
            assert_eq!(correct_year(year, RUN_YEAR, WINDOW).unwrap(), year);
        }
    }

    #[test]
    fn correct_year_single_fix() {
        assert_eq!(correct_year(2925, RUN_YEAR, WINDOW).unwrap(), 2025);
        assert_eq!(correct_year(1025, RUN_YEAR, WINDOW).unwrap(), 2025);
        assert_eq!(correct_year(2725, RUN_YEAR, WINDOW).unwrap(), 2025);
    }

    #[test]
    fn correct_year_ambiguous_when_several_fit() {
        // Any last-digit substitution of 2020 reaches five in-window years.
        let err = correct_year(2020, RUN_YEAR, WINDOW).unwrap_err();
        match err {
            RecordError::AmbiguousYear { year, candidates } => {
                assert_eq!(year, 2020);
                assert_eq!(candidates, vec![2023, 2024, 2025, 2026, 2027]);
            }
            other => panic!("expected AmbiguousYear, got {:?}", other),
        }
    }

    #[test]
    fn correct_year_no_fix_is_unparseable() {
        // No single digit of 3936 can be rewritten into 2023..=2027.
        assert!(matches!(
            correct_year(3936, RUN_YEAR, WINDOW),
            Err(RecordError::UnparseableTimestamp(_))
        ));
    }

    #[test]
    fn correct_year_rejects_short_years() {
        assert!(correct_year(925, RUN_YEAR, WINDOW).is_err());
    }

    #[test]
    fn leap_day_survives_repair_to_leap_year() {
        let dt = correct("2924-02-29").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 2, 29));
    }

    #[test]
    fn repair_landing_on_nonexistent_day_is_unparseable() {
        // 2096 is a leap year; its unique repair 2026 is not, so the date
        // cannot be kept.
        assert!(matches!(
            correct_timestamp("2096-02-29", 2026, 1),
            Err(RecordError::UnparseableTimestamp(_))
        ));
    }

    #[test]
    fn nonexistent_calendar_day_is_unparseable() {
        assert!(matches!(
            correct("2025-02-30"),
            Err(RecordError::UnparseableTimestamp(_))
        ));
    }

    #[test]
    fn deterministic_across_calls() {
        let a = correct("2925-05-15T10:00:00").unwrap();
        let b = correct("2925-05-15T10:00:00").unwrap();
        assert_eq!(a, b);
    }
}
