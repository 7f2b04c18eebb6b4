//! Clean-run progress reporting.
//!
//! Emits observable progress during `jrn clean` so long runs show what is
//! being scanned and how much is left. Progress goes to **stderr** so stdout
//! stays parseable for scripts.

use std::io::Write;

/// A single progress event for a clean run.
#[derive(Clone, Debug)]
pub enum CleanProgressEvent {
    /// Input directory is being enumerated (no total yet).
    Scanning { dir: String },
    /// Records are being cleaned: n processed out of total.
    Cleaning { n: u64, total: u64 },
}

/// Reports clean progress. Implementations write to stderr (human or JSON).
pub trait CleanProgressReporter {
    fn report(&self, event: CleanProgressEvent);
}

/// Human-friendly progress: "clean  cleaning  12 / 340 records".
pub struct StderrProgress;

impl CleanProgressReporter for StderrProgress {
    fn report(&self, event: CleanProgressEvent) {
        let line = match &event {
            CleanProgressEvent::Scanning { dir } => {
                format!("clean {}  scanning...\n", dir)
            }
            CleanProgressEvent::Cleaning { n, total } => {
                format!(
                    "clean  cleaning  {} / {} records\n",
                    format_number(*n),
                    format_number(*total)
                )
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl CleanProgressReporter for JsonProgress {
    fn report(&self, event: CleanProgressEvent) {
        let obj = match &event {
            CleanProgressEvent::Scanning { dir } => serde_json::json!({
                "event": "progress",
                "phase": "scanning",
                "dir": dir
            }),
            CleanProgressEvent::Cleaning { n, total } => serde_json::json!({
                "event": "progress",
                "phase": "cleaning",
                "n": n,
                "total": total
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl CleanProgressReporter for NoProgress {
    fn report(&self, _event: CleanProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Build a reporter for this mode. The pipeline takes it by reference.
    pub fn reporter(&self) -> Box<dyn CleanProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
