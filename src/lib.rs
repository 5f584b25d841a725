//! msgrelay - Message relay for host application logs
//!
//! Formats a variable-length list of heterogeneous values into one line and
//! forwards it to an injected log sink and, optionally, to stdout.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod log;
pub mod relay;
pub mod sink;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use config::{LogConfig, RelayConfig};
pub use error::RelayError;
pub use log::{JsonlSink, MessageLog, MessageRecord};
pub use relay::{concat, format_message, MessageArg, MissingSinkPolicy, Relay, Separator};
pub use sink::{LineSink, MemorySink, StderrSink, StdoutSink};
