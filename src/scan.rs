//! Input-directory scanner.
//!
//! Enumerates the raw daily-log files for one pipeline run: applies the
//! include/exclude globs, drops the in-progress sentinel, and returns the
//! survivors in lexicographic filename order so every run processes sources
//! in the same stable sequence.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::Config;
use crate::models::SourceFile;

pub fn scan_input(config: &Config) -> Result<Vec<SourceFile>> {
    let root = &config.input.dir;
    if !root.is_dir() {
        bail!("input directory does not exist: {}", root.display());
    }

    let include_set = build_globset(&config.input.include_globs)?;
    let exclude_set = build_globset(&config.input.exclude_globs)?;

    let mut files = Vec::new();

    // Daily logs live flat in the input directory; nested directories are
    // not part of the layout.
    let walker = WalkDir::new(root).min_depth(1).max_depth(1);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();

        if !config.input.sentinel.is_empty() && file_name == config.input.sentinel {
            continue;
        }
        if exclude_set.is_match(&file_name) {
            continue;
        }
        if !include_set.is_match(&file_name) {
            continue;
        }

        files.push(SourceFile {
            path: entry.path().to_path_buf(),
            file_name,
        });
    }

    // Sort for deterministic ordering
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
