//! Retrieval-corpus export of cleaned daily logs.
//!
//! Prepares the text side of an embedding corpus: one JSONL record per
//! cleaned log carrying the date slug and the concatenated free text worth
//! retrieving on. Vector generation happens elsewhere; this step stays
//! local and model-free.

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::models::{CalendarDate, CanonicalDailyLog};
use crate::store;

#[derive(Debug, Serialize)]
pub struct CorpusRecord {
    pub date: String,
    pub text: String,
}

/// Concatenate the retrievable text of one log: summary, tags, insights,
/// and trigger events, space-joined. Empty fields contribute nothing.
pub fn build_text(log: &CanonicalDailyLog) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if !log.summary.is_empty() {
        parts.push(&log.summary);
    }
    parts.extend(log.tags.iter().map(String::as_str));
    parts.extend(log.insights.wins.iter().map(String::as_str));
    parts.extend(log.insights.losses.iter().map(String::as_str));
    parts.extend(log.insights.ideas.iter().map(String::as_str));
    parts.extend(log.trigger_events.iter().map(String::as_str));
    parts.join(" ")
}

/// Date slug for a corpus record, parsed from the log's timestamp with the
/// filename stem as fallback for hand-edited files.
pub fn extract_date(log: &CanonicalDailyLog, file_name: &str) -> String {
    let trimmed = log.timestamp.trim();
    let stripped = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    if let Ok(dt) = NaiveDateTime::parse_from_str(stripped, "%Y-%m-%dT%H:%M:%S") {
        return CalendarDate::from_datetime(&dt).slug();
    }
    file_name.trim_end_matches(".json").to_string()
}

/// Export every cleaned log as one JSONL corpus record, in sorted filename
/// order. `output` overrides the configured path.
pub fn run_export_corpus(config: &Config, output: Option<&Path>) -> Result<()> {
    let out_path = output.unwrap_or(&config.export.corpus_path);
    let files = store::list_cleaned(&config.output.dir)?;

    let mut lines = Vec::new();
    let mut skipped = 0usize;
    for file in &files {
        let log = match store::load_log(&file.path) {
            Ok(log) => log,
            Err(err) => {
                eprintln!("warn {}: {:#}", file.file_name, err);
                skipped += 1;
                continue;
            }
        };
        let record = CorpusRecord {
            date: extract_date(&log, &file.file_name),
            text: build_text(&log),
        };
        lines.push(serde_json::to_string(&record)?);
    }

    crate::chat::write_jsonl(out_path, &lines)?;

    eprintln!(
        "Exported {} corpus records to {}",
        lines.len(),
        out_path.display()
    );
    if skipped > 0 {
        eprintln!("  skipped {} unreadable file(s)", skipped);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Insights;

    #[test]
    fn text_concatenates_retrievable_fields() {
        let log = CanonicalDailyLog {
            summary: "long walk".to_string(),
            tags: vec!["outside".to_string()],
            insights: Insights {
                wins: vec!["sunlight".to_string()],
                losses: vec!["late start".to_string()],
                ideas: vec!["earlier alarm".to_string()],
            },
            trigger_events: vec!["traffic".to_string()],
            ..Default::default()
        };
        assert_eq!(
            build_text(&log),
            "long walk outside sunlight late start earlier alarm traffic"
        );
    }

    #[test]
    fn empty_log_builds_empty_text() {
        assert_eq!(build_text(&CanonicalDailyLog::default()), "");
    }

    #[test]
    fn date_comes_from_timestamp() {
        let log = CanonicalDailyLog {
            timestamp: "2025-05-15T10:00:00Z".to_string(),
            ..Default::default()
        };
        assert_eq!(extract_date(&log, "whatever.json"), "15-5-25");
    }

    #[test]
    fn date_falls_back_to_filename_stem() {
        let log = CanonicalDailyLog::default();
        assert_eq!(extract_date(&log, "15-5-25_2.json"), "15-5-25_2");
    }
}
