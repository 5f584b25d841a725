//! Console display for the message log
//!
//! Renders relayed messages as a human-readable message window on stderr,
//! so stdout stays clean for the relay's own echo.

use anyhow::Result;
use colored::Colorize;

use crate::sink::{LineSink, StderrSink};

/// A message-log receiver that prints each line to stderr with a time prefix
pub struct ConsoleReceiver {
    title: String,
    out: Box<dyn LineSink>,
}

impl ConsoleReceiver {
    /// Create a receiver printing to stderr under the given title
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self::with_output(title, Box::new(StderrSink))
    }

    /// Create a receiver that prints rendered lines to `out`
    #[must_use]
    pub fn with_output(title: &str, out: Box<dyn LineSink>) -> Self {
        Self {
            title: title.to_string(),
            out,
        }
    }

    /// Render one message line for display
    #[must_use]
    pub fn format_line(&self, line: &str) -> String {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        let body = if line.starts_with("===") {
            line.bold().cyan().to_string()
        } else {
            line.to_string()
        };
        format!("{} {} {body}", time.dimmed(), format!("[{}]", self.title).blue())
    }
}

impl LineSink for ConsoleReceiver {
    fn write_line(&self, line: &str) -> Result<()> {
        self.out.write_line(&self.format_line(line))
    }
}

/// Print an error and its causes to stderr
pub fn render_error(err: &anyhow::Error) {
    eprintln!("{} {err:#}", "error:".red().bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use std::sync::Arc;

    #[test]
    fn test_format_line_contains_title_and_message() {
        let receiver = ConsoleReceiver::new("Messages");
        let rendered = receiver.format_line("Hello number: 4711");
        assert!(rendered.contains("Messages"));
        assert!(rendered.contains("Hello number: 4711"));
    }

    #[test]
    fn test_header_line_keeps_text() {
        let receiver = ConsoleReceiver::new("Messages");
        let rendered = receiver.format_line("=== 2026-10-18 12:00:00 === Demo ===");
        assert!(rendered.contains("=== Demo ==="));
    }

    #[test]
    fn test_write_line_goes_to_output() {
        let out = Arc::new(MemorySink::new());
        let receiver = ConsoleReceiver::with_output("Messages", Box::new(Arc::clone(&out)));

        receiver.write_line("one").unwrap();
        receiver.write_line("two").unwrap();

        let lines = out.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("one"));
        assert!(lines[1].contains("two"));
    }

    #[test]
    fn test_render_error_no_panic() {
        let err = anyhow::anyhow!("inner").context("outer");
        render_error(&err);
    }
}
