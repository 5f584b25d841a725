//! Logging and observability
//!
//! Sinks that back the relay's log capability: the host-side message log
//! and a JSONL record of relayed messages.

pub mod jsonl;
pub mod writer;

pub use jsonl::{JsonlSink, MessageRecord};
pub use writer::MessageLog;
