// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_COMMAND_PORT, DEFAULT_COMMAND_TIMEOUT_MS, DEFAULT_CONFIG_FILES,
    DEFAULT_CONNECT_RETRY_DELAY_MS, DEFAULT_LEDS_PREFIX, DEFAULT_OPTICS_PREFIX,
    DEFAULT_TRIGGER_RETRY_DELAY_MS,
};
use crate::config::LuminaryProfile;
use crate::errors::ConfigError;
use crate::observability::messages::validation::ConfigProblem;
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for the inspection station.
///
/// Loaded from YAML (default), JSON or TOML depending on the file extension.
///
/// # Fields
/// * `bank` - Default trigger bank, used when the run does not name one (0 = none)
/// * `leds_prefix` / `optics_prefix` - Item prefixes classifying components
/// * `reader` - How to reach the reader's command interface
/// * `trigger` - Trigger retry budget and overwrite policy
/// * `images` - Where result images come from and go to (optional)
/// * `luminaries` - Layout profiles per luminary name
///
/// # Example
/// ```yaml
/// bank: 0
/// reader:
///   host: 192.168.100.100
///   connect_retry_count: 2
/// trigger:
///   retry_count: 2
///   retry_delay_ms: 500
/// luminaries:
///   LX-200:
///     - leds:
///         "7001": [{x1: 10, y1: 10, x2: 100, y2: 100}]
///       optics:
///         "6001": [{x1: 200, y1: 10, x2: 300, y2: 100}]
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bank: u8,
    #[serde(default = "default_leds_prefix")]
    pub leds_prefix: String,
    #[serde(default = "default_optics_prefix")]
    pub optics_prefix: String,
    pub reader: ReaderConfig,
    #[serde(default)]
    pub trigger: TriggerConfig,
    #[serde(default)]
    pub images: Option<ImageConfig>,
    #[serde(default)]
    pub luminaries: HashMap<String, Vec<LuminaryProfile>>,
}

fn default_leds_prefix() -> String {
    DEFAULT_LEDS_PREFIX.to_string()
}

fn default_optics_prefix() -> String {
    DEFAULT_OPTICS_PREFIX.to_string()
}

/// Connection settings for the reader's command interface.
#[derive(Debug, Deserialize)]
pub struct ReaderConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
    #[serde(default)]
    pub connect_retry_count: u32,
    #[serde(default = "default_connect_retry_delay_ms")]
    pub connect_retry_delay_ms: u64,
}

fn default_port() -> u16 {
    DEFAULT_COMMAND_PORT
}

fn default_command_timeout_ms() -> u64 {
    DEFAULT_COMMAND_TIMEOUT_MS
}

fn default_connect_retry_delay_ms() -> u64 {
    DEFAULT_CONNECT_RETRY_DELAY_MS
}

impl ReaderConfig {
    /// `host:port` socket address string.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn connect_retry_delay(&self) -> Duration {
        Duration::from_millis(self.connect_retry_delay_ms)
    }
}

/// How trigger attempts are repeated.
///
/// `retry_count` is the number of extra attempts after the first one.
#[derive(Debug, Deserialize)]
pub struct TriggerConfig {
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default = "default_trigger_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default)]
    pub overwrite: OverwritePolicy,
}

fn default_trigger_retry_delay_ms() -> u64 {
    DEFAULT_TRIGGER_RETRY_DELAY_MS
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            retry_count: 0,
            retry_delay_ms: DEFAULT_TRIGGER_RETRY_DELAY_MS,
            overwrite: OverwritePolicy::default(),
        }
    }
}

impl TriggerConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// What a later trigger attempt does to an area that already holds a code.
///
/// # Variants
/// * `Always` - The latest attempt's value replaces the previous one, even when empty
/// * `KeepNonEmpty` - Only a non-empty code replaces the previous one
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OverwritePolicy {
    #[default]
    Always,
    KeepNonEmpty,
}

/// Result image locations.
///
/// `source_dir` is the reader's image directory (mounted locally), `output_dir`
/// receives `latest.jpg` and `previous.jpg`.
#[derive(Debug, Deserialize)]
pub struct ImageConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
}

fn parse_config(path: &Path, content: &str) -> Result<Config, ConfigError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let cfg = match extension.as_deref() {
        Some("json") => serde_json::from_str(content)?,
        Some("toml") => toml::from_str(content)?,
        _ => serde_yaml::from_str(content)?,
    };
    Ok(cfg)
}

/// Load a config file, choosing the format by extension
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &content)
}

/// Load and validate a config file
///
/// All structural problems are collected and reported together.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let cfg = load_config(path)?;

    if let Err(errors) = crate::config::validate_config(&cfg) {
        let source = path.display().to_string();
        for problem in &errors {
            ConfigProblem {
                source: &source,
                problem,
            }
            .log();
        }
        return Err(ConfigError::Invalid { errors });
    }

    Ok(cfg)
}

/// Picks the config file to use: the explicit one, or the first of the
/// default names that exists in `dir`.
pub fn resolve_config_path(explicit: Option<&Path>, dir: &Path) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let searched: Vec<PathBuf> = DEFAULT_CONFIG_FILES.iter().map(|name| dir.join(name)).collect();
    searched
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .ok_or(ConfigError::NotFound { searched })
}
