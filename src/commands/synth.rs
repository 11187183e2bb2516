use anyhow::Result;
use tracing::info;

use crate::commands::utils::{self, TuningArgs};
use selprobe::{OutputFormat, Synthesis, Synthesizer};

pub async fn handle_synth(
    source: String,
    selector: String,
    index: usize,
    format: OutputFormat,
    tuning: TuningArgs,
) -> Result<()> {
    info!("Synthesizing selectors for {}[{}] in {}", selector, index, source);

    let config = tuning.resolve()?;
    let (document, target) = utils::load_target(&source, &selector, index).await?;
    let synthesis = Synthesizer::new(config).synthesize(&document, target);

    if synthesis.is_empty() {
        info!("No identifiable selector for {}[{}]", selector, index);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&synthesis)?),
        OutputFormat::Simple => print_simple(&synthesis),
    }
    Ok(())
}

pub(crate) fn print_simple(synthesis: &Synthesis) {
    if synthesis.is_empty() {
        println!("No identifiable selector");
    }
    for (i, candidate) in synthesis.candidates.iter().enumerate() {
        let mut flags = Vec::new();
        if !candidate.unique {
            flags.push("ambiguous");
        }
        if !candidate.stable {
            flags.push("positional");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags.join(", "))
        };
        println!("[{}] {}{}", i, candidate.selector, flags);
        println!("    {}", candidate.description);
    }
    for hint in &synthesis.hints {
        println!("hint: {}", hint.selector);
        println!("    {}", hint.description);
    }
}
