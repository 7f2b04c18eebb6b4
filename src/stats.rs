//! Cleaned-log statistics and health overview.
//!
//! Provides a quick summary of what has been cleaned: log counts, disk
//! footprint, and a by-month breakdown. Used by `jrn stats` to give
//! confidence that a clean run did what was expected.

use anyhow::Result;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::store;

/// Run the stats command: read the output directory and print a summary.
pub fn run_stats(config: &Config) -> Result<()> {
    let files = store::list_cleaned(&config.output.dir)?;

    let mut total_bytes = 0u64;
    let mut by_month: BTreeMap<String, u64> = BTreeMap::new();

    for file in &files {
        total_bytes += std::fs::metadata(&file.path).map(|m| m.len()).unwrap_or(0);

        let bucket = match store::load_log(&file.path) {
            Ok(log) => month_of(&log.timestamp).unwrap_or_else(|| "(no timestamp)".to_string()),
            Err(_) => "(unreadable)".to_string(),
        };
        *by_month.entry(bucket).or_default() += 1;
    }

    println!("Journal Harness — Cleaned Log Stats");
    println!("===================================");
    println!();
    println!("  Output dir:  {}", config.output.dir.display());
    println!("  Size:        {}", format_bytes(total_bytes));
    println!();
    println!("  Cleaned logs: {}", files.len());

    if !by_month.is_empty() {
        println!();
        println!("  By month:");
        println!("  {:<16} {:>6}", "MONTH", "LOGS");
        println!("  {}", "-".repeat(24));
        for (month, count) in &by_month {
            println!("  {:<16} {:>6}", month, count);
        }
    }

    println!();
    Ok(())
}

/// `YYYY-MM` bucket from a cleaned timestamp.
fn month_of(timestamp: &str) -> Option<String> {
    let trimmed = timestamp.trim();
    let stripped = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    let dt = NaiveDateTime::parse_from_str(stripped, "%Y-%m-%dT%H:%M:%S").ok()?;
    Some(dt.format("%Y-%m").to_string())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
