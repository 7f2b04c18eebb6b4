use anyhow::Result;

use crate::config::Config;
use crate::scan;

/// Show the configured locations and whether they pass their health checks.
/// Useful for verifying configuration before running a clean.
pub fn list_sources(config: &Config) -> Result<()> {
    let (input_status, input_healthy) = if config.input.dir.is_dir() {
        ("OK", true)
    } else {
        ("MISSING", false)
    };
    let record_count = if input_healthy {
        scan::scan_input(config).map(|files| files.len()).unwrap_or(0)
    } else {
        0
    };

    let (output_status, output_healthy) = if config.output.dir.is_dir() {
        ("OK", true)
    } else {
        ("NOT CREATED YET", false)
    };
    let cleaned_count = if output_healthy {
        crate::store::list_cleaned(&config.output.dir)
            .map(|files| files.len())
            .unwrap_or(0)
    } else {
        0
    };

    println!(
        "{:<10} {:<32} {:<18} {:>6}",
        "LOCATION", "PATH", "STATUS", "FILES"
    );
    println!(
        "{:<10} {:<32} {:<18} {:>6}",
        "input",
        config.input.dir.display().to_string(),
        input_status,
        record_count
    );
    println!(
        "{:<10} {:<32} {:<18} {:>6}",
        "output",
        config.output.dir.display().to_string(),
        output_status,
        cleaned_count
    );

    if !config.input.sentinel.is_empty() && config.input.dir.join(&config.input.sentinel).exists() {
        println!();
        println!("sentinel {} present (always excluded)", config.input.sentinel);
    }

    Ok(())
}
