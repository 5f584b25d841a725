//! JSONL (JSON Lines) record of relayed messages
//!
//! Provides append-only logging of messages to `<dir>/messages.jsonl`

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::sink::LineSink;

/// A single relayed message as stored in the JSONL file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRecord {
    /// When the message was written
    pub timestamp: DateTime<Utc>,
    /// The formatted message text
    pub message: String,
}

/// JSONL sink for relayed messages
///
/// Each line of the file is a JSON object holding one message.
pub struct JsonlSink {
    log_path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink
    ///
    /// # Arguments
    /// * `log_dir` - Directory where messages.jsonl will be stored
    ///
    /// # Errors
    /// Returns an error if the log directory cannot be created
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        Ok(Self {
            log_path: log_dir.join("messages.jsonl"),
        })
    }

    /// Append a record to the file
    pub fn append(&self, record: &MessageRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open log file: {}", self.log_path.display()))?;

        let json = serde_json::to_string(record).context("Failed to serialize message to JSON")?;

        writeln!(file, "{json}").context("Failed to write to log file")?;

        Ok(())
    }

    /// Read all records from the file, in the order written
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or any non-blank line is
    /// not a valid record
    pub fn read_all(&self) -> Result<Vec<MessageRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)
            .with_context(|| format!("Failed to read log file: {}", self.log_path.display()))?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_num, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))
            })
            .collect()
    }

    /// Get the path to the log file
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

impl LineSink for JsonlSink {
    fn write_line(&self, line: &str) -> Result<()> {
        self.append(&MessageRecord {
            timestamp: Utc::now(),
            message: line.to_string(),
        })
    }
}
