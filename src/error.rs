//! Relay error type

use thiserror::Error;

/// Errors returned by [`crate::relay::Relay::message`]
#[derive(Debug, Error)]
pub enum RelayError {
    /// No log sink is bound and the relay was configured to fail in that case
    #[error("log sink capability is unavailable")]
    CapabilityUnavailable,
    /// The bound sink failed to write; passed through unchanged
    #[error(transparent)]
    Sink(#[from] anyhow::Error),
}
