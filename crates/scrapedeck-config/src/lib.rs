//! Shared configuration for the scrapedeck CLI and TUI.
//!
//! A single TOML file plus `SCRAPEDECK_*` environment overrides. The one
//! setting that matters is `api_url` -- the scraping service base URL.
//! Both binaries layer their own flag overrides on top.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API URL configured -- set api_url in the config file, SCRAPEDECK_API_URL, or pass --api-url")]
    NoApiUrl,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Scraping service base URL (e.g., "https://scraper.example.com").
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Default CLI output format: table | json | json-compact | yaml | plain.
    #[serde(default = "default_output")]
    pub output: String,

    /// When to color CLI output: auto | always | never.
    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout: default_timeout(),
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

impl Config {
    /// The configured API base URL, parsed and validated.
    pub fn api_url(&self) -> Result<url::Url, ConfigError> {
        let raw = self.api_url.as_deref().ok_or(ConfigError::NoApiUrl)?;
        raw.parse().map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {raw}"),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "scrapedeck", "scrapedeck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("scrapedeck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit file path (file may be absent).
///
/// Layering, lowest to highest precedence: built-in defaults, the TOML
/// file, `SCRAPEDECK_*` environment variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SCRAPEDECK_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults on any error.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML at an explicit path, creating parent dirs.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("missing.toml")).unwrap();

        assert_eq!(cfg.api_url, None);
        assert_eq!(cfg.timeout, 30);
        assert_eq!(cfg.output, "table");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_url = \"https://scraper.example.com\"\ntimeout = 5\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.api_url.as_deref(), Some("https://scraper.example.com"));
        assert_eq!(cfg.timeout, 5);
        assert_eq!(cfg.color, "auto");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_url: Some("https://scraper.example.com".into()),
            timeout: 10,
            ..Config::default()
        };
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.api_url, cfg.api_url);
        assert_eq!(loaded.timeout, 10);
    }

    #[test]
    fn missing_api_url_is_a_typed_error() {
        let cfg = Config::default();
        assert!(matches!(cfg.api_url(), Err(ConfigError::NoApiUrl)));
    }

    #[test]
    fn malformed_api_url_is_a_validation_error() {
        let cfg = Config {
            api_url: Some("not a url".into()),
            ..Config::default()
        };
        assert!(matches!(
            cfg.api_url(),
            Err(ConfigError::Validation { .. })
        ));
    }
}
