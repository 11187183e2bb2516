#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod errors;

use crate::commands::history::HistoryCommands;
use crate::commands::utils::TuningArgs;
use selprobe::OutputFormat;

// Exit codes
const EXIT_SUCCESS: i32 = 0;

#[derive(Parser)]
#[command(name = "selprobe")]
#[command(about = "CSS selector synthesis for HTML elements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Key-value store holding the capture history (default: ~/.selprobe/storage.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate ranked selectors for an element
    Synth {
        /// HTML file, `-` for stdin, or an http(s) URL
        source: String,

        /// CSS selector locating the element
        selector: String,

        /// Use the match at this index (0-based)
        #[arg(long, default_value = "0")]
        index: usize,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Check existing selectors against an element
    Check {
        /// HTML file, `-` for stdin, or an http(s) URL
        source: String,

        /// CSS selector locating the element
        selector: String,

        /// Selectors to check
        #[arg(required = true)]
        candidates: Vec<String>,

        /// Use the match at this index (0-based)
        #[arg(long, default_value = "0")]
        index: usize,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Select an element, then record, log and optionally copy its selectors
    Capture {
        /// HTML file, `-` for stdin, or an http(s) URL
        source: String,

        /// CSS selector locating the element
        selector: String,

        /// Use the match at this index (0-based)
        #[arg(long, default_value = "0")]
        index: usize,

        /// What the captured element is, stored with the record
        #[arg(short, long)]
        description: Option<String>,

        /// Copy the best selector to the system clipboard
        #[arg(long)]
        copy: bool,

        /// Do not write the capture to history
        #[arg(long)]
        no_history: bool,

        /// Append selection messages as JSON lines to this file
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Show or clear the capture history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let result = run().await;

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            // Convert to our error type to get proper exit code
            let selprobe_err: errors::SelprobeError = err.into();

            // Output JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": selprobe_err.to_string(),
                "exit_code": selprobe_err.exit_code()
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            // Also log to stderr for human reading
            eprintln!("Error: {}", selprobe_err);
            std::process::exit(selprobe_err.exit_code());
        }
    }
}

async fn run() -> Result<()> {
    // Initialize tracing to stderr (so JSON output to stdout remains clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "selprobe=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Synth {
            source,
            selector,
            index,
            format,
            tuning,
        } => commands::synth::handle_synth(source, selector, index, format, tuning).await?,

        Commands::Check {
            source,
            selector,
            candidates,
            index,
            format,
        } => commands::check::handle_check(source, selector, candidates, index, format).await?,

        Commands::Capture {
            source,
            selector,
            index,
            description,
            copy,
            no_history,
            log_file,
            format,
            tuning,
        } => {
            commands::capture::handle_capture(
                source,
                selector,
                index,
                commands::capture::CaptureOptions {
                    description,
                    copy,
                    history: !no_history,
                    log_file,
                    store: cli.store,
                },
                format,
                tuning,
            )
            .await?
        }

        Commands::History { command } => {
            commands::history::handle_history_command(command, cli.store).await?
        }

        Commands::Version => commands::version::handle_version().await?,
    }

    Ok(())
}
