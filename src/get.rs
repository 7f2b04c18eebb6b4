//! Cleaned-log retrieval by date.
//!
//! Prints every cleaned record for a date slug (`15-5-25`), including the
//! `_2`, `_3`, … collision entries for that date.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::models::CanonicalDailyLog;
use crate::store;

pub fn run_get(config: &Config, date: &str) -> Result<()> {
    let files = store::list_cleaned(&config.output.dir)?;

    let matches: Vec<_> = files
        .iter()
        .filter(|file| {
            let stem = file.file_name.trim_end_matches(".json");
            stem == date || is_collision_entry(stem, date)
        })
        .collect();

    if matches.is_empty() {
        bail!("no cleaned log for date: {}", date);
    }

    for file in matches {
        let log = store::load_log(&file.path)?;
        print_log(&file.file_name, &log);
    }

    Ok(())
}

/// `15-5-25_2` is a collision entry for `15-5-25`.
fn is_collision_entry(stem: &str, date: &str) -> bool {
    match stem.strip_prefix(date) {
        Some(rest) => {
            rest.len() > 1
                && rest.starts_with('_')
                && rest[1..].chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

fn print_log(file_name: &str, log: &CanonicalDailyLog) {
    println!("--- {} ---", file_name);
    println!("timestamp:   {}", log.timestamp);
    println!("summary:     {}", log.summary);
    println!("mood:        {}", log.status.mood_level);
    println!("energy:      {}", log.status.energy_level);
    println!("sleep:       {} hrs ({})", log.status.sleep_duration, log.status.sleep_quality);
    println!("stability:   {}", log.status.stability_score);
    println!("wins:        {}", log.insights.wins.join(", "));
    println!("losses:      {}", log.insights.losses.join(", "));
    println!("ideas:       {}", log.insights.ideas.join(", "));
    println!("goals:       {}", log.goals.join(", "));
    println!("tags:        {}", log.tags.join(", "));
    println!("triggers:    {}", log.trigger_events.join(", "));
    println!("symptoms:    {}", log.symptom_checklist.join(", "));
    println!();
}
