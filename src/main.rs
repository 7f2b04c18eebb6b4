//! # Journal Harness CLI (`jrn`)
//!
//! The `jrn` binary is the primary interface for Journal Harness. It
//! provides commands for cleaning raw daily logs, exporting the cleaned
//! set, and inspecting what has been written.
//!
//! ## Usage
//!
//! ```bash
//! jrn [--config ./config/jrn.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `jrn clean` | Normalize raw daily logs into the canonical layout |
//! | `jrn export chat` | Write fine-tuning conversations as JSONL |
//! | `jrn export corpus` | Write the retrieval-text corpus as JSONL |
//! | `jrn get <date>` | Print the cleaned record(s) for a date slug |
//! | `jrn stats` | Summarize the cleaned-log directory |
//! | `jrn sources` | Show input/output location health |
//!
//! ## Examples
//!
//! ```bash
//! # Clean with the defaults (logs/daily → CleanedDaily)
//! jrn clean
//!
//! # Preview a clean without writing anything
//! jrn clean --dry-run
//!
//! # Export both downstream formats
//! jrn export chat
//! jrn export corpus --output data/corpus.jsonl
//!
//! # Inspect one day, collisions included
//! jrn get 15-5-25
//! ```

use anyhow::bail;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use journal_harness::progress::ProgressMode;
use journal_harness::{chat, clean, config, corpus, get, sources, stats};

/// Journal Harness CLI — a local-first normalization and export toolkit for
/// personal daily logs.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/jrn.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "jrn",
    about = "Journal Harness — a local-first normalization and export toolkit for personal daily logs",
    version,
    long_about = "Journal Harness reads ad-hoc daily log records (one JSON file per day), repairs \
    their timestamps, coerces them into a fixed canonical schema, and writes one collision-safe \
    file per calendar date. Export commands turn the cleaned logs into fine-tuning conversations \
    and a retrieval-text corpus."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/jrn.toml`. When the default path does not exist
    /// either, built-in defaults apply, so the tool runs with no arguments
    /// at all.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Normalize raw daily logs into the canonical layout.
    ///
    /// Reads every JSON file in the input directory (except the in-progress
    /// sentinel), repairs timestamps, coerces each record into the fixed
    /// schema, and writes one pretty-printed file per calendar date with
    /// `_2`, `_3`, … suffixes on same-date collisions. Records that cannot
    /// be cleaned are skipped and reported, never fatal.
    Clean {
        /// Show counts without writing any output files.
        #[arg(long)]
        dry_run: bool,

        /// Progress on stderr: `off`, `human`, or `json`.
        /// Defaults to `human` when stderr is a TTY.
        #[arg(long)]
        progress: Option<String>,
    },

    /// Export the cleaned logs for downstream consumers.
    Export {
        #[command(subcommand)]
        format: ExportFormat,
    },

    /// Print the cleaned record(s) for a date slug.
    ///
    /// The slug is `<day>-<month>-<2-digit-year>` with no zero padding,
    /// e.g. `15-5-25`. Collision entries (`_2`, `_3`, …) are printed too.
    Get {
        /// Date slug, e.g. `15-5-25`.
        date: String,
    },

    /// Summarize the cleaned-log directory.
    ///
    /// Shows log counts, disk footprint, and a by-month breakdown.
    Stats,

    /// Show input/output location health.
    ///
    /// Useful for verifying configuration before running a clean.
    Sources,
}

/// Export subcommands.
#[derive(Subcommand)]
enum ExportFormat {
    /// One fine-tuning conversation per cleaned log, as JSONL.
    ///
    /// The user turn recites the day's status, the assistant answers with
    /// the summary, and a follow-up exchange carries the extracted lists.
    Chat {
        /// Output path; defaults to `export.chat_path` from the config.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// One retrieval-corpus record per cleaned log, as JSONL.
    ///
    /// Each record holds the date slug and the concatenated retrievable
    /// text. Embedding vectors are generated elsewhere.
    Corpus {
        /// Output path; defaults to `export.corpus_path` from the config.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Clean { dry_run, progress } => {
            let mode = match progress.as_deref() {
                None => ProgressMode::default_for_tty(),
                Some("off") => ProgressMode::Off,
                Some("human") => ProgressMode::Human,
                Some("json") => ProgressMode::Json,
                Some(other) => {
                    bail!(
                        "Unknown progress mode: '{}'. Must be off, human, or json.",
                        other
                    )
                }
            };
            clean::run_clean(&cfg, dry_run, mode.reporter().as_ref())?;
        }
        Commands::Export { format } => match format {
            ExportFormat::Chat { output } => {
                chat::run_export_chat(&cfg, output.as_deref())?;
            }
            ExportFormat::Corpus { output } => {
                corpus::run_export_corpus(&cfg, output.as_deref())?;
            }
        },
        Commands::Get { date } => {
            get::run_get(&cfg, &date)?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg)?;
        }
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
    }

    Ok(())
}
