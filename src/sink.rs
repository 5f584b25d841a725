//! Line sinks
//!
//! A [`LineSink`] is the single capability the relay consumes: accept one
//! line of text. Sinks are owned by the host and lent to the relay.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};

/// Accepts one line of text and records or displays it
pub trait LineSink: Send + Sync {
    /// Write `line` followed by a line break
    fn write_line(&self, line: &str) -> Result<()>;
}

impl<T: LineSink + ?Sized> LineSink for Arc<T> {
    fn write_line(&self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }
}

/// Writes lines to the process's standard output
#[derive(Debug, Default)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}").context("Failed to write to stdout")?;
        out.flush().context("Failed to flush stdout")
    }
}

/// Writes lines to the process's standard error
#[derive(Debug, Default)]
pub struct StderrSink;

impl LineSink for StderrSink {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut err = std::io::stderr().lock();
        writeln!(err, "{line}").context("Failed to write to stderr")?;
        err.flush().context("Failed to flush stderr")
    }
}

/// Keeps every line in memory, in the order written
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return the lines written so far
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl LineSink for MemorySink {
    fn write_line(&self, line: &str) -> Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.write_line("one").unwrap();
        sink.write_line("").unwrap();
        sink.write_line("three").unwrap();
        assert_eq!(sink.lines(), vec!["one", "", "three"]);
    }

    #[test]
    fn test_memory_sink_take_clears() {
        let sink = MemorySink::new();
        sink.write_line("a").unwrap();
        assert_eq!(sink.take(), vec!["a"]);
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_stdout_and_stderr_sinks_accept_lines() {
        StdoutSink.write_line("stdout sink test").unwrap();
        StderrSink.write_line("stderr sink test").unwrap();
    }
}
