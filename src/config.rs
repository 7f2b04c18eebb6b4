use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked for when `--config` is not given. When this default
/// path does not exist either, the built-in defaults below apply, so the
/// tool runs with no arguments at all.
pub const DEFAULT_CONFIG_PATH: &str = "./config/jrn.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub correction: CorrectionConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// Directory holding one raw JSON file per daily log.
    #[serde(default = "default_input_dir")]
    pub dir: PathBuf,
    /// In-progress file that is never processed. Empty string disables the
    /// sentinel.
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: default_input_dir(),
            sentinel: default_sentinel(),
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("logs/daily")
}
fn default_sentinel() -> String {
    "daily_now.json".to_string()
}
fn default_include_globs() -> Vec<String> {
    vec!["*.json".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory receiving one cleaned JSON file per calendar date.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// When true, filenames already present in the output directory are
    /// reserved before the run and never overwritten; the suffix sequence
    /// extends past them. Leave false for byte-identical re-runs.
    #[serde(default)]
    pub preserve_existing: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            preserve_existing: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("CleanedDaily")
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorrectionConfig {
    /// Half-width of the plausible-year window around the run year.
    #[serde(default = "default_window_years")]
    pub window_years: i32,
    /// Fixed run year for reprocessing archives; defaults to the wall clock.
    #[serde(default)]
    pub run_year: Option<i32>,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            window_years: default_window_years(),
            run_year: None,
        }
    }
}

fn default_window_years() -> i32 {
    2
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_chat_path")]
    pub chat_path: PathBuf,
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            chat_path: default_chat_path(),
            corpus_path: default_corpus_path(),
        }
    }
}

fn default_chat_path() -> PathBuf {
    PathBuf::from("cleaned_chat_format.jsonl")
}
fn default_corpus_path() -> PathBuf {
    PathBuf::from("cleaned_log_corpus.jsonl")
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Resolve the effective config: an explicit `--config` path must load; the
/// default path is optional and falls back to built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => {
            let p = Path::new(DEFAULT_CONFIG_PATH);
            if p.exists() {
                load_config(p)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.input.include_globs.is_empty() {
        anyhow::bail!("input.include_globs must not be empty");
    }

    if config.correction.window_years < 1 {
        anyhow::bail!("correction.window_years must be >= 1");
    }

    if let Some(year) = config.correction.run_year {
        if !(1000..=9999).contains(&year) {
            anyhow::bail!("correction.run_year must be a four-digit year, got {}", year);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_conventional_layout() {
        let config = Config::default();
        assert_eq!(config.input.dir, PathBuf::from("logs/daily"));
        assert_eq!(config.input.sentinel, "daily_now.json");
        assert_eq!(config.output.dir, PathBuf::from("CleanedDaily"));
        assert_eq!(config.correction.window_years, 2);
        assert!(config.correction.run_year.is_none());
        assert!(!config.output.preserve_existing);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [input]
            dir = "raw"

            [correction]
            run_year = 2025
            "#,
        )
        .unwrap();
        assert_eq!(config.input.dir, PathBuf::from("raw"));
        assert_eq!(config.input.sentinel, "daily_now.json");
        assert_eq!(config.correction.run_year, Some(2025));
        assert_eq!(config.correction.window_years, 2);
    }

    #[test]
    fn rejects_zero_window() {
        let config: Config = toml::from_str("[correction]\nwindow_years = 0\n").unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_two_digit_run_year() {
        let config: Config = toml::from_str("[correction]\nrun_year = 25\n").unwrap();
        assert!(validate(&config).is_err());
    }
}
