//! calllog-export - export a call log as CSV and send it to a collector
//!
//! This tool provides commands for:
//! - Checking the effective configuration
//! - Previewing the CSV that would be sent
//! - Sending the CSV to the configured collector
//!
//! Uses XDG Base Directory specification for file locations:
//! - Config: $XDG_CONFIG_HOME/calllog-export/config.toml (~/.config/calllog-export/config.toml)
//! - Logs: $XDG_STATE_HOME/calllog-export/calllog-export.log (~/.local/state/calllog-export/calllog-export.log)

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use calllog_core::upload::BlockingUploader;
use calllog_core::{export, format, source, Config, EncodedPayload, RecordSource};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "calllog-export")]
#[command(about = "Export a call log as CSV and upload it to a collector")]
#[command(version)]
struct Args {
    /// Write a debug log to the state directory
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the effective configuration
    Status,

    /// Print the CSV that would be sent, without sending it
    Preview {
        /// Call-log database (.db) or JSON lines file (default: from config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Maximum characters to print
        #[arg(short, long, default_value_t = format::PREVIEW_CHARS)]
        limit: usize,
    },

    /// Send the call log to the collector
    Send {
        /// Call-log database (.db) or JSON lines file (default: from config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Collector URL (default: from config)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Don't print the payload preview
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load().context("failed to load configuration")?;

    let _log_guard = if args.verbose {
        Some(calllog_core::logging::init(&config.logging).context("failed to initialize logging")?)
    } else {
        None
    };

    match args.command {
        Command::Status => cmd_status(&config),
        Command::Preview { input, limit } => cmd_preview(&config, input, limit),
        Command::Send {
            input,
            endpoint,
            yes,
            quiet,
        } => {
            if let Some(endpoint) = endpoint {
                config.upload.endpoint = endpoint;
            }
            cmd_send(&config, input, yes, quiet)
        }
    }
}

fn cmd_status(config: &Config) -> Result<()> {
    println!("Call Log Export Configuration");
    println!("=============================");
    println!();

    let config_path = Config::config_path();
    println!(
        "Config File:  {}{}",
        config_path.display(),
        if config_path.exists() { "" } else { " (not found, using defaults)" }
    );
    println!(
        "Source:       {}",
        config
            .source
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<not set>".to_string())
    );
    println!("Endpoint:     {}", config.upload.endpoint);
    println!(
        "Timeout:      {}",
        config
            .upload
            .timeout_secs
            .map(|s| format!("{}s", s))
            .unwrap_or_else(|| "transport default".to_string())
    );
    println!("Log File:     {}", calllog_core::logging::log_file_path().display());

    println!();
    match config.upload.validate() {
        Ok(()) => println!("Status: Ready to send"),
        Err(e) => println!("Status: Not ready ({})", e),
    }

    Ok(())
}

fn cmd_preview(config: &Config, input: Option<PathBuf>, limit: usize) -> Result<()> {
    let path = resolve_input(config, input)?;
    let payload = read_payload(&path)?;

    print_preview(&payload, limit);
    println!();
    println!("{} record(s), {} bytes", payload.record_count(), payload.len());

    Ok(())
}

fn cmd_send(config: &Config, input: Option<PathBuf>, yes: bool, quiet: bool) -> Result<()> {
    let path = resolve_input(config, input)?;

    // Build the uploader first so a bad endpoint fails before the prompt
    let uploader =
        BlockingUploader::new(config.upload.clone()).context("invalid upload configuration")?;
    let endpoint = uploader.uploader().endpoint().to_string();

    if !yes && !confirm(&endpoint)? {
        println!("Export cancelled");
        return Ok(());
    }

    let payload = read_payload(&path)?;
    if !quiet {
        print_preview(&payload, format::PREVIEW_CHARS);
        println!();
    }

    println!(
        "Sending {} record(s) to {}...",
        payload.record_count(),
        endpoint
    );
    tracing::info!(endpoint = %endpoint, records = payload.record_count(), "Sending call log");

    let pending = uploader.dispatch(payload);
    let outcome = pending.wait_blocking();

    tracing::info!(outcome = outcome.as_str(), status = ?outcome.status(), "Upload finished");

    if outcome.is_delivered() {
        println!("Done: {}", outcome);
        Ok(())
    } else {
        bail!("{}", outcome)
    }
}

fn resolve_input(config: &Config, input: Option<PathBuf>) -> Result<PathBuf> {
    match input.or_else(|| config.source.path.clone()) {
        Some(path) => Ok(path),
        None => bail!("no call log given; pass --input or set source.path in config.toml"),
    }
}

fn read_payload(path: &Path) -> Result<EncodedPayload> {
    let source = source::open(path);
    tracing::info!(source = %source.describe(), "Reading call log");
    export::prepare(source.as_ref())
        .with_context(|| format!("failed to export {}", path.display()))
}

fn print_preview(payload: &EncodedPayload, limit: usize) {
    print!("{}", format::preview(payload, limit));
    if format::is_truncated(payload, limit) {
        println!();
        println!("... (preview truncated)");
    }
}

/// Ask before reading and sending anything
fn confirm(endpoint: &str) -> Result<bool> {
    print!(
        "This will read your call history and send it to {}. Proceed? [y/N] ",
        endpoint
    );
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;

    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
