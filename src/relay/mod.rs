//! Message relay
//!
//! Converts heterogeneous arguments to text, joins them, and forwards the
//! resulting line to injected sinks.

pub mod arg;
pub mod format;
pub mod message;

pub use arg::MessageArg;
pub use format::{concat, format_message, Separator};
pub use message::{MissingSinkPolicy, Relay, RelayBuilder};
