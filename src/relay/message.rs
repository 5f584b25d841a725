//! The message relay
//!
//! A [`Relay`] formats its arguments once and forwards the result to a
//! bound log sink and, when present, a secondary stdout sink.

use serde::{Deserialize, Serialize};

use super::arg::MessageArg;
use super::format::{format_message, Separator};
use crate::error::RelayError;
use crate::sink::LineSink;

/// What to do when no log sink is bound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSinkPolicy {
    /// Skip the log sink and still write to stdout
    #[default]
    Skip,
    /// Fail with [`RelayError::CapabilityUnavailable`] before writing anything
    Fail,
}

/// Formats heterogeneous arguments and forwards them to borrowed sinks
pub struct Relay<'a> {
    log: Option<&'a dyn LineSink>,
    stdout: Option<&'a dyn LineSink>,
    separator: Separator,
    missing_sink: MissingSinkPolicy,
}

impl<'a> Relay<'a> {
    /// Relay to `log` with the default separator and policy and no stdout sink
    #[must_use]
    pub fn new(log: &'a dyn LineSink) -> Self {
        Self::builder().log_sink(log).build()
    }

    /// Start building a relay with nothing bound
    #[must_use]
    pub fn builder() -> RelayBuilder<'a> {
        RelayBuilder::default()
    }

    /// The separator fixed for this relay
    #[must_use]
    pub const fn separator(&self) -> &Separator {
        &self.separator
    }

    /// The missing-sink policy fixed for this relay
    #[must_use]
    pub const fn missing_sink(&self) -> MissingSinkPolicy {
        self.missing_sink
    }

    /// Whether a log sink is bound
    #[must_use]
    pub const fn has_log_sink(&self) -> bool {
        self.log.is_some()
    }

    /// Format `args` with this relay's separator without sending them
    #[must_use]
    pub fn format(&self, args: &[&dyn MessageArg]) -> String {
        format_message(args, &self.separator)
    }

    /// Format `args` into one line and deliver it.
    ///
    /// The log sink is written first, then the stdout sink. An error from the
    /// log sink is returned as-is and the stdout sink is not written. Only the
    /// formatting is all-or-nothing: if the stdout sink fails, its error is
    /// returned even though the log sink already received the line.
    pub fn message(&self, args: &[&dyn MessageArg]) -> Result<(), RelayError> {
        let text = self.format(args);

        match self.log {
            Some(log) => log.write_line(&text)?,
            None if self.missing_sink == MissingSinkPolicy::Fail => {
                return Err(RelayError::CapabilityUnavailable);
            }
            None => {}
        }

        if let Some(stdout) = self.stdout {
            stdout.write_line(&text)?;
        }

        Ok(())
    }
}

/// Builder for [`Relay`]
#[derive(Default)]
pub struct RelayBuilder<'a> {
    log: Option<&'a dyn LineSink>,
    stdout: Option<&'a dyn LineSink>,
    separator: Separator,
    missing_sink: MissingSinkPolicy,
}

impl<'a> RelayBuilder<'a> {
    /// Bind the log sink
    #[must_use]
    pub fn log_sink(mut self, sink: &'a dyn LineSink) -> Self {
        self.log = Some(sink);
        self
    }

    /// Bind the secondary stdout sink
    #[must_use]
    pub fn stdout_sink(mut self, sink: &'a dyn LineSink) -> Self {
        self.stdout = Some(sink);
        self
    }

    /// Set the separator
    #[must_use]
    pub fn separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Set the missing-sink policy
    #[must_use]
    pub fn missing_sink(mut self, policy: MissingSinkPolicy) -> Self {
        self.missing_sink = policy;
        self
    }

    /// Finish the relay
    #[must_use]
    pub fn build(self) -> Relay<'a> {
        Relay {
            log: self.log,
            stdout: self.stdout,
            separator: self.separator,
            missing_sink: self.missing_sink,
        }
    }
}

/// Relay any number of arguments in one call.
///
/// ```
/// use msgrelay::{relay_message, MemorySink, Relay};
///
/// let log = MemorySink::new();
/// let relay = Relay::new(&log);
/// relay_message!(relay, "Hello number:", 4711).unwrap();
/// assert_eq!(log.lines(), vec!["Hello number: 4711"]);
/// ```
#[macro_export]
macro_rules! relay_message {
    ($relay:expr $(, $arg:expr)* $(,)?) => {
        $relay.message(&[$(&$arg as &dyn $crate::relay::MessageArg),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use crate::testutil::FailingSink;

    #[test]
    fn test_delivers_to_log_and_stdout() {
        let log = MemorySink::new();
        let stdout = MemorySink::new();
        let relay = Relay::builder()
            .log_sink(&log)
            .stdout_sink(&stdout)
            .build();

        relay_message!(relay, "Hello number:", 4711).unwrap();

        assert_eq!(log.lines(), vec!["Hello number: 4711"]);
        assert_eq!(stdout.lines(), vec!["Hello number: 4711"]);
    }

    #[test]
    fn test_double_space_range() {
        let log = MemorySink::new();
        let relay = Relay::builder()
            .log_sink(&log)
            .separator(Separator::DoubleSpace)
            .build();

        relay_message!(relay, "Show a range", 3_i32..11).unwrap();

        assert_eq!(log.lines(), vec!["Show a range  [3, 4, 5, 6, 7, 8, 9, 10]"]);
    }

    #[test]
    fn test_zero_arguments_deliver_empty_line() {
        let log = MemorySink::new();
        let relay = Relay::new(&log);

        relay_message!(relay).unwrap();

        assert_eq!(log.lines(), vec![String::new()]);
    }

    #[test]
    fn test_missing_sink_skip_still_writes_stdout() {
        let stdout = MemorySink::new();
        let relay = Relay::builder()
            .stdout_sink(&stdout)
            .missing_sink(MissingSinkPolicy::Skip)
            .build();

        relay_message!(relay, "only stdout").unwrap();

        assert!(!relay.has_log_sink());
        assert_eq!(stdout.lines(), vec!["only stdout"]);
    }

    #[test]
    fn test_missing_sink_skip_without_any_sink() {
        let relay = Relay::builder().build();
        assert!(relay_message!(relay, "nowhere").is_ok());
    }

    #[test]
    fn test_missing_sink_fail_writes_nothing() {
        let stdout = MemorySink::new();
        let relay = Relay::builder()
            .stdout_sink(&stdout)
            .missing_sink(MissingSinkPolicy::Fail)
            .build();

        let err = relay_message!(relay, "never shown").unwrap_err();

        assert!(matches!(err, RelayError::CapabilityUnavailable));
        assert!(stdout.lines().is_empty());
    }

    #[test]
    fn test_log_sink_error_propagates_and_skips_stdout() {
        let log = FailingSink::new("message window closed");
        let stdout = MemorySink::new();
        let relay = Relay::builder()
            .log_sink(&log)
            .stdout_sink(&stdout)
            .build();

        let err = relay_message!(relay, "lost").unwrap_err();

        assert!(matches!(err, RelayError::Sink(_)));
        assert_eq!(err.to_string(), "message window closed");
        assert!(stdout.lines().is_empty());
    }

    #[test]
    fn test_stdout_error_after_log_delivery() {
        let log = MemorySink::new();
        let stdout = FailingSink::new("stdout closed");
        let relay = Relay::builder()
            .log_sink(&log)
            .stdout_sink(&stdout)
            .build();

        let err = relay_message!(relay, "half delivered").unwrap_err();

        assert_eq!(err.to_string(), "stdout closed");
        assert_eq!(log.lines(), vec!["half delivered"]);
    }

    #[test]
    fn test_relay_keeps_no_state_between_calls() {
        let log = MemorySink::new();
        let relay = Relay::new(&log);

        relay_message!(relay, "a", 1).unwrap();
        relay_message!(relay, "b", 2).unwrap();

        assert_eq!(log.lines(), vec!["a 1", "b 2"]);
    }

    #[test]
    fn test_accessors_report_configuration() {
        let log = MemorySink::new();
        let relay = Relay::builder()
            .log_sink(&log)
            .separator(Separator::None)
            .missing_sink(MissingSinkPolicy::Fail)
            .build();

        assert_eq!(relay.separator(), &Separator::None);
        assert_eq!(relay.missing_sink(), MissingSinkPolicy::Fail);
        assert_eq!(relay.format(&[&"a", &"b"]), "ab");
        assert!(log.lines().is_empty());
    }
}
