// Configuration utilities
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{CsvSource, SourceFiles};
use crate::processing::{ChartScope, ReportOptions, TimeSeriesOptions};
use super::{MAX_YEAR, MIN_YEAR};

/// Errors raised while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
    pub dashboard: DashboardConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
            enable_cors: false,
        }
    }
}

/// Where the entity tables are read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub delimiter: char,
    pub files: SourceFiles,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            path: PathBuf::from("data"),
            delimiter: ',',
            files: SourceFiles::default(),
        }
    }
}

impl SourceConfig {
    /// Build the CSV source this section describes
    pub fn csv_source(&self) -> CsvSource {
        CsvSource::with_files(&self.path, self.files.clone()).with_delimiter(self.delimiter as u8)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Dashboard defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub top_n: usize,
    pub default_year_range: (i32, i32),
    pub include_empty_years: bool,
    pub chart_scope: ChartScope,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            top_n: 5,
            default_year_range: (2021, 2024),
            include_empty_years: false,
            chart_scope: ChartScope::Full,
        }
    }
}

impl Config {
    /// Load configuration from a JSON or YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();

        let config: Config = match extension.as_str() {
            "json" => serde_json::from_str(&contents)?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.top_n == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.top_n must be at least 1".to_string(),
            ));
        }

        let (lo, hi) = self.dashboard.default_year_range;
        for year in [lo, hi] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(ConfigError::Invalid(format!(
                    "dashboard.default_year_range must hold four-digit years, got {}",
                    year
                )));
            }
        }
        if lo > hi {
            return Err(ConfigError::Invalid(format!(
                "dashboard.default_year_range is reversed: {} > {}",
                lo, hi
            )));
        }

        if !self.source.delimiter.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "source.delimiter must be a single ASCII character, got '{}'",
                self.source.delimiter
            )));
        }

        Ok(())
    }

    /// Get the log level filter
    pub fn log_level_filter(&self) -> log::LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }

    /// Report options derived from the dashboard section
    pub fn report_options(&self) -> ReportOptions {
        let dashboard = &self.dashboard;
        ReportOptions {
            top_n: dashboard.top_n,
            chart_scope: dashboard.chart_scope,
            time_series: TimeSeriesOptions {
                include_empty_years: dashboard.include_empty_years,
                bounds: Some(dashboard.default_year_range),
            },
            default_years: dashboard.default_year_range,
        }
    }
}
