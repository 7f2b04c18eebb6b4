//! Chat-format export of cleaned daily logs.
//!
//! Emits one conversation per cleaned log as newline-delimited JSON,
//! suitable for fine-tuning datasets: a user turn reciting the day's
//! status, the assistant answering with the summary, then a follow-up
//! exchange carrying the extracted lists.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::models::CanonicalDailyLog;
use crate::store;

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRecord {
    pub messages: Vec<ChatMessage>,
}

/// Build the four-turn conversation for one cleaned log.
pub fn chat_record(log: &CanonicalDailyLog) -> ChatRecord {
    let status = &log.status;
    let user_prompt = format!(
        "Here is today's mental log data:\nMood: {}\nEnergy: {}\nSleep Duration: {} hrs\nSleep Quality: {}\nStability Score: {}",
        status.mood_level,
        status.energy_level,
        status.sleep_duration,
        status.sleep_quality,
        status.stability_score
    );

    let detailed_response = format!(
        "Wins: [{}]\nLosses: [{}]\nIdeas: [{}]\nGoals: [{}]\nTags: [{}]\nSymptoms: [{}]\nTriggers: [{}]",
        log.insights.wins.join(", "),
        log.insights.losses.join(", "),
        log.insights.ideas.join(", "),
        log.goals.join(", "),
        log.tags.join(", "),
        log.symptom_checklist.join(", "),
        log.trigger_events.join(", ")
    );

    ChatRecord {
        messages: vec![
            ChatMessage {
                role: "user",
                content: user_prompt,
            },
            ChatMessage {
                role: "assistant",
                content: log.summary.clone(),
            },
            ChatMessage {
                role: "user",
                content: "Now extract insights, goals, and tags.".to_string(),
            },
            ChatMessage {
                role: "assistant",
                content: detailed_response,
            },
        ],
    }
}

/// Export every cleaned log as one JSONL conversation, in sorted filename
/// order. `output` overrides the configured path.
pub fn run_export_chat(config: &Config, output: Option<&Path>) -> Result<()> {
    let out_path = output.unwrap_or(&config.export.chat_path);
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
        lines.push(serde_json::to_string(&chat_record(&log))?);
    }

    write_jsonl(out_path, &lines)?;

    eprintln!(
        "Exported {} conversations to {}",
        lines.len(),
        out_path.display()
    );
    if skipped > 0 {
        eprintln!("  skipped {} unreadable file(s)", skipped);
    }
    Ok(())
}

pub(crate) fn write_jsonl(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut out = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
