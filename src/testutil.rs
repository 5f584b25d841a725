//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use anyhow::{bail, Result};

use crate::sink::LineSink;

/// A sink whose every write fails with the given message.
pub struct FailingSink {
    message: String,
}

impl FailingSink {
    /// Create a sink that fails with `message`.
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl LineSink for FailingSink {
    fn write_line(&self, _line: &str) -> Result<()> {
        bail!("{}", self.message)
    }
}
