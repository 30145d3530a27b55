use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Summary cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Summary settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where computed summaries are kept
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    // @backend: SQLite file, survives restarts
    #[default]
    Sqlite,
    // @backend: Process memory, lost on exit
    Memory,
}

impl CacheBackend {
    // @returns: Capitalized backend name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Sqlite => "SQLite",
            Self::Memory => "In-memory",
        }
    }

    // @returns: Lowercase backend identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Sqlite => "sqlite".to_string(),
            Self::Memory => "memory".to_string(),
        }
    }
}

impl std::fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for CacheBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            _ => Err(anyhow!("Invalid cache backend: {}", s)),
        }
    }
}

/// Summary cache configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CacheConfig {
    /// Whether summaries are cached at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Storage used for the cache
    #[serde(default)]
    pub backend: CacheBackend,

    /// SQLite file to use instead of the one in the user's data directory
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: CacheBackend::default(),
            database_path: None,
        }
    }
}

/// Summary configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SummaryConfig {
    /// Strip introductory phrases and extra whitespace before display
    #[serde(default = "default_true")]
    pub clean_output: bool,

    /// Extensions of the files treated as notes when scanning a folder
    #[serde(default = "default_file_extensions")]
    pub file_extensions: Vec<String>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            clean_output: true,
            file_extensions: default_file_extensions(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_file_extensions() -> Vec<String> {
    vec!["txt".to_string(), "md".to_string()]
}

impl Config {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config
            .validate()
            .context("Configuration validation failed")?;

        Ok(config)
    }

    /// Load a configuration file, writing the defaults first if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if FileManager::file_exists(path) {
            return Self::load(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        FileManager::write_to_file(path, &config_json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.summary.file_extensions.is_empty() {
            return Err(anyhow!("At least one note file extension is required"));
        }

        if let Some(extension) = self
            .summary
            .file_extensions
            .iter()
            .find(|ext| ext.trim().trim_start_matches('.').is_empty())
        {
            return Err(anyhow!("Invalid note file extension: '{}'", extension));
        }

        if let Some(path) = &self.cache.database_path {
            if self.cache.backend == CacheBackend::Memory {
                warn!(
                    "cache.database_path {:?} is ignored by the memory cache backend",
                    path
                );
            }
            if path.as_os_str().is_empty() {
                return Err(anyhow!("cache.database_path must not be empty"));
            }
        }

        Ok(())
    }
}
