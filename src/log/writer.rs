//! Host-side message log
//!
//! [`MessageLog`] is the sink a host application binds as the relay's log
//! capability. It mirrors each line to an optional log file and dispatches
//! it to named receivers (message windows, consoles). Lines logged while no
//! receiver is attached are queued and replayed to every receiver that
//! attaches later. Receivers run outside the state lock, so they may log
//! back into the same `MessageLog`.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write as IoWrite};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{bail, Context, Result};

use crate::sink::{LineSink, StdoutSink};

/// Width of the `=` rule that closes the log file header line
const HEADER_RULE_WIDTH: usize = 79;

struct LogState {
    title: String,
    logging_enabled: bool,
    shut_down: bool,
    file: Option<BufWriter<File>>,
    receivers: Vec<(String, Arc<dyn LineSink>)>,
    queue: Vec<String>,
}

/// Message log with an optional log file, named receivers and a replay queue
pub struct MessageLog {
    state: Mutex<LogState>,
    console: Box<dyn LineSink>,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageLog {
    /// Create a log with an empty title, logging to receivers disabled, and
    /// stdout as the console
    #[must_use]
    pub fn new() -> Self {
        Self::with_console(Box::new(StdoutSink))
    }

    /// Create a log that uses `console` instead of stdout while logging to
    /// receivers is disabled
    #[must_use]
    pub fn with_console(console: Box<dyn LineSink>) -> Self {
        Self {
            state: Mutex::new(LogState {
                title: String::new(),
                logging_enabled: false,
                shut_down: false,
                file: None,
                receivers: Vec::new(),
                queue: Vec::new(),
            }),
            console,
        }
    }

    fn state(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Title written into the log file header
    #[must_use]
    pub fn title(&self) -> String {
        self.state().title.clone()
    }

    /// Set the title written into the log file header
    pub fn set_title(&self, title: &str) {
        self.state().title = title.to_string();
    }

    /// Whether lines are dispatched to receivers (otherwise they go to the console)
    #[must_use]
    pub fn logging_enabled(&self) -> bool {
        self.state().logging_enabled
    }

    /// Switch between dispatching to receivers and printing to the console
    pub fn set_logging_enabled(&self, enabled: bool) {
        self.state().logging_enabled = enabled;
    }

    /// Open `path` as the log file and write the dated header line.
    ///
    /// An empty path is ignored. With `append` false an existing file is
    /// truncated. On failure the error is reported on stderr and through
    /// the log before being returned.
    pub fn open_file(&self, path: &Path, append: bool) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }

        let opened = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path);

        match opened {
            Ok(file) => {
                self.state().file = Some(BufWriter::new(file));
            }
            Err(e) => {
                let msg = format!(
                    "cannot open log file '{}' for writing: {e}",
                    path.display()
                );
                eprintln!("{msg}");
                self.state().file = None;
                self.write_line(&msg)?;
                bail!(msg);
            }
        }

        let header = format!(
            "=== {} === {} {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.title(),
            "=".repeat(HEADER_RULE_WIDTH)
        );
        self.write_line(&header)
    }

    /// Register `receiver` under `id` and replay every queued line to it.
    ///
    /// The queue is kept, so each receiver attached later gets the same
    /// backlog. If the replay fails the receiver is unregistered again.
    pub fn add_receiver(&self, id: &str, receiver: Arc<dyn LineSink>) -> Result<()> {
        let backlog = {
            let mut state = self.state();
            if state.receivers.iter().any(|(existing, _)| existing == id) {
                bail!("Duplicate message receiver id: '{id}'");
            }
            state.receivers.push((id.to_string(), Arc::clone(&receiver)));
            state.queue.clone()
        };

        for line in &backlog {
            if let Err(e) = receiver.write_line(line) {
                self.remove_receiver(id);
                return Err(e).with_context(|| {
                    format!("Failed to replay queued messages to receiver '{id}'")
                });
            }
        }
        Ok(())
    }

    /// Unregister the receiver `id`. Returns whether it was registered.
    pub fn remove_receiver(&self, id: &str) -> bool {
        let mut state = self.state();
        let before = state.receivers.len();
        state.receivers.retain(|(existing, _)| existing != id);
        state.receivers.len() != before
    }

    /// Ids of the registered receivers, in registration order
    #[must_use]
    pub fn receiver_ids(&self) -> Vec<String> {
        self.state()
            .receivers
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Lines logged while no receiver was attached
    #[must_use]
    pub fn queued(&self) -> Vec<String> {
        self.state().queue.clone()
    }

    /// Stop dispatching to receivers. Console and file output continue.
    pub fn shutdown(&self) {
        self.state().shut_down = true;
    }

    /// Whether [`MessageLog::shutdown`] has been called
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.state().shut_down
    }
}

impl LineSink for MessageLog {
    fn write_line(&self, line: &str) -> Result<()> {
        let (to_console, receivers) = {
            let mut state = self.state();

            if let Some(file) = state.file.as_mut() {
                writeln!(file, "{line}").context("Failed to write to log file")?;
                file.flush().context("Failed to flush log file")?;
            }

            let receivers = if state.shut_down || !state.logging_enabled {
                Vec::new()
            } else if state.receivers.is_empty() {
                state.queue.push(line.to_string());
                Vec::new()
            } else {
                state.receivers.clone()
            };
            (!state.logging_enabled, receivers)
        };

        if to_console {
            self.console.write_line(line)?;
        }

        for (id, receiver) in &receivers {
            receiver
                .write_line(line)
                .with_context(|| format!("Message receiver '{id}' failed"))?;
        }
        Ok(())
    }
}
