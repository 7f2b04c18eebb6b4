//! Cleaned-log store access.
//!
//! Durable state is one pretty-printed JSON file per calendar date in the
//! output directory. The export and inspection commands all go through
//! these helpers so they agree on ordering and on what counts as a cleaned
//! log.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::models::CanonicalDailyLog;

/// One cleaned file on disk.
#[derive(Debug, Clone)]
pub struct CleanedFile {
    pub path: PathBuf,
    pub file_name: String,
}

/// List the cleaned logs in `dir`, sorted by filename for stable export
/// order.
pub fn list_cleaned(dir: &Path) -> Result<Vec<CleanedFile>> {
    if !dir.is_dir() {
        bail!(
            "cleaned-log directory does not exist: {} (run `jrn clean` first)",
            dir.display()
        );
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        if !file_name.ends_with(".json") {
            continue;
        }
        files.push(CleanedFile {
            path: entry.path(),
            file_name,
        });
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}

/// Load one cleaned log. Missing keys deserialize to their empty defaults,
/// so hand-edited files stay readable.
pub fn load_log(path: &Path) -> Result<CanonicalDailyLog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
