//! Daily-log cleaning pipeline.
//!
//! Coordinates the full clean flow: scan → normalize → timestamp repair →
//! slot allocation → atomic write. Per-record failures become skip entries
//! in the end-of-run summary and never abort the batch; only setup failures
//! (unreadable input directory, output directory that cannot be created)
//! propagate.

use anyhow::{Context, Result};
use chrono::Datelike;
use std::fs;
use std::path::Path;

use crate::allocate::SlotAllocator;
use crate::config::Config;
use crate::error::RecordError;
use crate::models::{CalendarDate, CanonicalDailyLog, SourceFile, TIMESTAMP_FORMAT};
use crate::normalize;
use crate::progress::{CleanProgressEvent, CleanProgressReporter};
use crate::scan;
use crate::store;
use crate::timestamp;

/// Outcome of one clean run.
#[derive(Debug, Default)]
pub struct CleanStats {
    pub sources_found: usize,
    pub written: u64,
    pub warnings: u64,
    pub collisions_resolved: u64,
    pub skipped: Vec<(String, RecordError)>,
}

pub fn run_clean(
    config: &Config,
    dry_run: bool,
    reporter: &dyn CleanProgressReporter,
) -> Result<CleanStats> {
    reporter.report(CleanProgressEvent::Scanning {
        dir: config.input.dir.display().to_string(),
    });
    let files = scan::scan_input(config)?;

    if !dry_run {
        fs::create_dir_all(&config.output.dir).with_context(|| {
            format!(
                "failed to create output directory: {}",
                config.output.dir.display()
            )
        })?;
    }

    let mut alloc = SlotAllocator::new();
    if config.output.preserve_existing && config.output.dir.is_dir() {
        for existing in store::list_cleaned(&config.output.dir)? {
            alloc.reserve(&existing.file_name);
        }
    }

    let run_year = config
        .correction
        .run_year
        .unwrap_or_else(|| chrono::Utc::now().year());

    let mut stats = CleanStats {
        sources_found: files.len(),
        ..Default::default()
    };
    let total = files.len() as u64;

    for (i, file) in files.iter().enumerate() {
        reporter.report(CleanProgressEvent::Cleaning {
            n: i as u64 + 1,
            total,
        });

        match clean_record(
            file,
            run_year,
            config.correction.window_years,
            &mut alloc,
            &mut stats,
        ) {
            Ok((log, name)) => {
                if !dry_run {
                    let json = serde_json::to_string_pretty(&log)?;
                    atomic_write(&config.output.dir.join(&name), &json)
                        .with_context(|| format!("failed to write {}", name))?;
                }
                stats.written += 1;
            }
            Err(err) => {
                eprintln!("skip {}: {}", file.file_name, err);
                stats.skipped.push((file.file_name.clone(), err));
            }
        }
    }

    stats.collisions_resolved = alloc.collisions_resolved();
    print_summary(config, dry_run, &stats);
    Ok(stats)
}

/// Clean one record end to end. Any [`RecordError`] is a skip, not an
/// abort.
fn clean_record(
    file: &SourceFile,
    run_year: i32,
    window_years: i32,
    alloc: &mut SlotAllocator,
    stats: &mut CleanStats,
) -> Result<(CanonicalDailyLog, String), RecordError> {
    let content =
        fs::read_to_string(&file.path).map_err(|err| RecordError::ParseError(err.to_string()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|err| RecordError::ParseError(err.to_string()))?;
    let raw = value
        .as_object()
        .ok_or_else(|| RecordError::ParseError("top-level value is not an object".to_string()))?;

    let (mut log, warnings) = normalize::normalize(raw);
    for warning in &warnings {
        eprintln!("warn {}: {}", file.file_name, warning);
    }
    stats.warnings += warnings.len() as u64;

    let dt = timestamp::correct_timestamp(&log.timestamp, run_year, window_years)?;
    log.timestamp = dt.format(TIMESTAMP_FORMAT).to_string();

    let name = alloc.allocate(&CalendarDate::from_datetime(&dt));
    Ok((log, name))
}

/// Write via a temp file and rename so an interrupted run never leaves a
/// half-written record behind.
fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp = path.with_extension(format!("json.tmp.{}", std::process::id()));
    fs::write(&tmp, content.as_bytes())?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    Ok(())
}

fn print_summary(config: &Config, dry_run: bool, stats: &CleanStats) {
    if dry_run {
        println!("clean {} (dry-run)", config.input.dir.display());
    } else {
        println!("clean {}", config.input.dir.display());
    }
    println!("  sources found: {}", stats.sources_found);
    println!("  written: {}", stats.written);
    println!("  skipped: {}", stats.skipped.len());
    for (file_name, err) in &stats.skipped {
        println!("    {}: {} ({})", file_name, err.reason(), err);
    }
    println!("  collisions resolved: {}", stats.collisions_resolved);
    if stats.warnings > 0 {
        println!("  normalizer warnings: {}", stats.warnings);
    }
    println!("ok");
}
