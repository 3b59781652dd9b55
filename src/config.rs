use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::session::SessionLimits;
use crate::core::wheel::WheelTuning;
use crate::services::storage::MAX_HISTORY_ENTRIES;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub wheel: WheelSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf { PathBuf::from(".nomnom") }

#[derive(Debug, Clone, Deserialize)]
pub struct WheelSettings {
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_history_display")]
    pub history_display: usize,
    #[serde(default = "default_min_extra_turns")]
    pub min_extra_turns: u32,
    #[serde(default = "default_max_extra_turns")]
    pub max_extra_turns: u32,
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            history_display: default_history_display(),
            min_extra_turns: default_min_extra_turns(),
            max_extra_turns: default_max_extra_turns(),
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
        }
    }
}

fn default_history_limit() -> usize { 50 }
fn default_history_display() -> usize { 20 }
fn default_min_extra_turns() -> u32 { 4 }
fn default_max_extra_turns() -> u32 { 6 }
fn default_min_duration_ms() -> u64 { 3200 }
fn default_max_duration_ms() -> u64 { 4000 }

impl WheelSettings {
    pub fn tuning(&self) -> WheelTuning {
        WheelTuning {
            min_extra_turns: self.min_extra_turns,
            max_extra_turns: self.max_extra_turns.max(self.min_extra_turns),
            min_duration_ms: self.min_duration_ms,
            max_duration_ms: self.max_duration_ms.max(self.min_duration_ms),
        }
    }

    pub fn limits(&self) -> SessionLimits {
        let history_limit = self.history_limit.min(MAX_HISTORY_ENTRIES);
        SessionLimits {
            history_limit,
            history_display: self.history_display.min(history_limit),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LoggingSettings {
    /// Parsed `format`. Unknown values fall back to JSON.
    pub fn log_format(&self) -> LogFormat {
        match self.format.trim().to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Json,
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with NOMNOM_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NOMNOM__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("NOMNOM")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
