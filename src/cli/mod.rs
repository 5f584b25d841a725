//! CLI output formatting
//!
//! Human-readable terminal display for relayed messages and errors.

pub mod display;

pub use display::{render_error, ConsoleReceiver};
