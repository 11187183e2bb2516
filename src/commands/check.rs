use anyhow::Result;
use tracing::info;

use crate::commands::utils;
use selprobe::{OutputFormat, Synthesizer};

/// Report how each candidate behaves against the located element.
///
/// Exits successfully even when candidates fail; the report says which ones.
pub async fn handle_check(
    source: String,
    selector: String,
    candidates: Vec<String>,
    index: usize,
    format: OutputFormat,
) -> Result<()> {
    info!("Checking {} selectors against {}[{}]", candidates.len(), selector, index);

    let (document, target) = utils::load_target(&source, &selector, index).await?;
    let synthesizer = Synthesizer::default();
    let assessments: Vec<_> = candidates
        .iter()
        .map(|candidate| synthesizer.assess(&document, target, candidate))
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assessments)?),
        OutputFormat::Simple => {
            for assessment in &assessments {
                let verdict = if !assessment.parses {
                    "invalid".to_string()
                } else if assessment.resolves_to_target() {
                    "ok".to_string()
                } else if assessment.targets_element {
                    format!("ambiguous ({} matches)", assessment.match_count)
                } else {
                    format!("misses target ({} matches)", assessment.match_count)
                };
                println!("{}: {}", assessment.selector, verdict);
            }
        }
    }
    Ok(())
}
