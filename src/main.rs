//! msgrelay - Message relay for host application logs
//!
//! CLI entry point: relays its arguments as one message.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use msgrelay::cli::{render_error, ConsoleReceiver};
use msgrelay::config::DEFAULT_CONFIG_FILE;
use msgrelay::{JsonlSink, MessageArg, MessageLog, MissingSinkPolicy, RelayConfig, Separator, StdoutSink};

/// Relay values as one message to the message log and stdout
///
/// Joins the given values with the configured separator and writes the
/// result to the message log (console, log file, JSONL record) and stdout.
#[derive(Parser, Debug)]
#[command(name = "msgrelay", version, about)]
struct Cli {
    /// Path to the msgrelay.toml configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Separator: none, space, double-space, or any literal text
    #[arg(long)]
    separator: Option<String>,

    /// Fail instead of skipping when no log sink is bound
    #[arg(long)]
    fail_on_missing_sink: bool,

    /// Leave the log sink unbound
    #[arg(long)]
    no_log: bool,

    /// Do not echo the message to stdout
    #[arg(long)]
    no_stdout: bool,

    /// Values to relay
    args: Vec<String>,
}

/// Load the explicit config file, else `msgrelay.toml` in `dir` if present, else defaults.
fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<RelayConfig> {
    if let Some(path) = explicit {
        return RelayConfig::from_path(path)
            .with_context(|| format!("Failed to load config from '{}'", path.display()));
    }

    let default_path = dir.join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return RelayConfig::from_path(&default_path)
            .with_context(|| format!("Failed to load config from '{}'", default_path.display()));
    }

    Ok(RelayConfig::default())
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(mut config: RelayConfig, cli: &Cli) -> Result<RelayConfig> {
    if let Some(name) = &cli.separator {
        config.separator = Separator::from_name(name);
    }
    if cli.fail_on_missing_sink {
        config.missing_sink = MissingSinkPolicy::Fail;
    }
    if cli.no_stdout {
        config.echo_stdout = false;
    }
    config.validate()?;
    Ok(config)
}

/// Build the message log described by `config`.
fn build_message_log(config: &RelayConfig) -> Result<MessageLog> {
    let log = MessageLog::new();
    log.set_title(&config.log.title);
    log.set_logging_enabled(config.log.enabled);
    log.add_receiver("console", Arc::new(ConsoleReceiver::new(&config.log.title)))?;

    if let Some(dir) = &config.log.jsonl_dir {
        let jsonl = JsonlSink::new(dir).context("Failed to initialize JSONL sink")?;
        log.add_receiver("jsonl", Arc::new(jsonl))?;
    }

    if let Some(file) = &config.log.file {
        log.open_file(file, config.log.append)?;
    }

    Ok(log)
}

fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    let config = apply_overrides(load_config(cli.config.as_deref(), &cwd)?, cli)?;

    let log = build_message_log(&config)?;
    let stdout = StdoutSink;

    let mut builder = config.relay_builder();
    if !cli.no_log {
        builder = builder.log_sink(&log);
    }
    if config.echo_stdout {
        builder = builder.stdout_sink(&stdout);
    }
    let relay = builder.build();

    let args: Vec<&dyn MessageArg> = cli.args.iter().map(|a| a as &dyn MessageArg).collect();
    let result = relay.message(&args);
    log.shutdown();
    result.context("Failed to relay message")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            render_error(&e);
            ExitCode::FAILURE
        }
    }
}
