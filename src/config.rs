//! Configuration loading.
//!
//! Every section is optional; a missing file path means all defaults.
//!
//! ```toml
//! [input]
//! path = "chat.log"
//! max_line_len = 8192
//!
//! [output]
//! pretty = false
//! include_ignored = false
//!
//! [log]
//! level = "info"
//! json = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Decoder configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where lines come from.
    pub input: InputConfig,
    /// How decoded records are written.
    pub output: OutputConfig,
    /// Logging setup.
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Input configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Transcript to read. Stdin when unset.
    pub path: Option<PathBuf>,
    /// Longest accepted line, terminator excluded.
    pub max_line_len: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_line_len: tmi_proto::DEFAULT_MAX_LINE_LEN,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print each JSON record.
    pub pretty: bool,
    /// Also write records for lines the decoder ignored.
    pub include_ignored: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit logs as JSON.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
