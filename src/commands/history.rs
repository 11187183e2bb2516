use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use crate::commands::utils;
use selprobe::OutputFormat;

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List past captures, newest first
    List {
        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Remove every recorded capture
    Clear,
}

pub async fn handle_history_command(command: HistoryCommands, store: Option<PathBuf>) -> Result<()> {
    let mut history = utils::open_history(store)?;

    match command {
        HistoryCommands::List { format } => {
            let entries = history.load();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Simple => {
                    if entries.is_empty() {
                        println!("No captures recorded");
                    }
                    for entry in &entries {
                        let selector = if entry.best_selector.is_empty() {
                            "(no selector)"
                        } else {
                            entry.best_selector.as_str()
                        };
                        println!(
                            "{}  <{}> {}  {}",
                            entry.recorded_at, entry.tag_name, selector, entry.text_snippet
                        );
                    }
                }
            }
        }
        HistoryCommands::Clear => {
            history.clear()?;
            println!("History cleared");
        }
    }
    Ok(())
}
