//! Relay configuration parser
//!
//! Parses `msgrelay.toml` into the separator, missing-sink policy and
//! message-log settings. Every key is optional.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::relay::{MissingSinkPolicy, RelayBuilder, Separator};

/// Default config file name looked up by the CLI
pub const DEFAULT_CONFIG_FILE: &str = "msgrelay.toml";

const fn default_true() -> bool {
    true
}

fn default_title() -> String {
    "msgrelay".to_string()
}

/// Message log settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// Title written into the log file header
    #[serde(default = "default_title")]
    pub title: String,
    /// Log file mirroring every message (none by default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Append to an existing log file instead of truncating it (default: true)
    #[serde(default = "default_true")]
    pub append: bool,
    /// Dispatch to receivers; when false, messages print to the console (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory for a JSONL record of messages (none by default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonl_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            file: None,
            append: true,
            enabled: true,
            jsonl_dir: None,
        }
    }
}

/// Top-level relay configuration parsed from msgrelay.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayConfig {
    /// Text placed between arguments (default: single space)
    #[serde(default)]
    pub separator: Separator,
    /// Behavior when no log sink is bound (default: skip)
    #[serde(default)]
    pub missing_sink: MissingSinkPolicy,
    /// Also write each message to stdout (default: true)
    #[serde(default = "default_true")]
    pub echo_stdout: bool,
    /// Message log settings
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            separator: Separator::default(),
            missing_sink: MissingSinkPolicy::default(),
            echo_stdout: true,
            log: LogConfig::default(),
        }
    }
}

impl RelayConfig {
    /// Parse a msgrelay.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse msgrelay.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse msgrelay.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// A relay builder with this configuration's separator and policy applied
    #[must_use]
    pub fn relay_builder<'a>(&self) -> RelayBuilder<'a> {
        RelayBuilder::default()
            .separator(self.separator.clone())
            .missing_sink(self.missing_sink)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Separator::Custom(text) = &self.separator {
            if text.contains(['\n', '\r']) {
                bail!("Separator cannot contain a line break");
            }
        }

        if self
            .log
            .file
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            bail!("log.file cannot be empty");
        }

        if self
            .log
            .jsonl_dir
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            bail!("log.jsonl_dir cannot be empty");
        }

        Ok(())
    }
}
