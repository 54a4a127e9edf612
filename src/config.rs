use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{
    CONFIG_FILE, DEFAULT_BASE_URL, DEFAULT_CATEGORY, DEFAULT_TIMEOUT_SECONDS, DEFAULT_TOP_N,
};
use crate::error::{ReportError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    /// Rocket name the category view filters on (case-insensitive)
    pub category: String,
    pub top_n: usize,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            top_n: DEFAULT_TOP_N,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Shape of the optional TOML file; every key may be left out
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    base_url: Option<String>,
    category: Option<String>,
    top_n: Option<usize>,
    timeout_seconds: Option<u64>,
}

impl Config {
    /// Defaults, then the TOML file, then `SPACEX_*` environment variables.
    ///
    /// An explicit `path` must exist. Without one, `spacex_report.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE).exists() => Self::from_file(Path::new(CONFIG_FILE))?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(content)?;
        let defaults = Self::default();
        Ok(Self {
            base_url: file.base_url.unwrap_or(defaults.base_url),
            category: file.category.unwrap_or(defaults.category),
            top_n: file.top_n.unwrap_or(defaults.top_n),
            timeout_seconds: file.timeout_seconds.unwrap_or(defaults.timeout_seconds),
        })
    }

    /// Override fields from environment-style lookups
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SPACEX_BASE_URL") {
            self.base_url = url;
        }
        if let Some(category) = lookup("SPACEX_CATEGORY") {
            self.category = category;
        }
        if let Some(raw) = lookup("SPACEX_TOP_N") {
            self.top_n = parse_number("SPACEX_TOP_N", &raw)?;
        }
        if let Some(raw) = lookup("SPACEX_TIMEOUT_SECONDS") {
            self.timeout_seconds = parse_number("SPACEX_TIMEOUT_SECONDS", &raw)?;
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ReportError::Config(format!("{} must be a non-negative integer, got '{}'", key, raw)))
}
