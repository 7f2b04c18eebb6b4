//! Core data models used throughout Journal Harness.
//!
//! These types represent the raw records, canonical daily logs, and calendar
//! dates that flow through the cleaning pipeline and export commands.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output timestamp layout, e.g. `2025-05-15T10:00:00Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Raw daily-log record as read from one input file: an arbitrary JSON
/// object. Nothing about its shape is guaranteed — fields may be missing,
/// extra, or of the wrong type.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// One input file discovered by the scanner.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
}

/// Normalized daily log in the fixed output shape.
///
/// Every field is present on output even when the source lacked it, so
/// consumers never need to check for key absence. Field order here is the
/// serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanonicalDailyLog {
    pub timestamp: String,
    pub summary: String,
    pub status: Status,
    pub insights: Insights,
    pub goals: Vec<String>,
    pub tags: Vec<String>,
    pub trigger_events: Vec<String>,
    pub symptom_checklist: Vec<String>,
}

/// Self-reported state for the day. Numeric-looking values are kept as text
/// for display uniformity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Status {
    pub mood_level: String,
    pub sleep_quality: String,
    pub sleep_duration: String,
    pub energy_level: String,
    pub stability_score: String,
}

/// Extracted reflections for the day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insights {
    pub wins: Vec<String>,
    pub losses: Vec<String>,
    pub ideas: Vec<String>,
}

/// Calendar date derived from a corrected timestamp. The year is always the
/// full corrected year; the two-digit form only appears in the slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl CalendarDate {
    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        Self {
            day: dt.day(),
            month: dt.month(),
            year: dt.year(),
        }
    }

    /// Filename slug: day, month, and two-digit year with no zero padding
    /// (`15-5-25` for 2025-05-15).
    pub fn slug(&self) -> String {
        format!("{}-{}-{}", self.day, self.month, self.year.rem_euclid(100))
    }
}
