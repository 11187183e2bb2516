//! Structural fallback and the text-content hint

use super::Probe;
use super::step::indexed_step;
use crate::escape::{escape_identifier, quote_attribute_value};
use crate::features::{is_root_boundary, parent_element, tag_name, trimmed_text};
use crate::types::{CandidateKind, SelectorCandidate};

/// Full `tag.class:nth-of-type` path from the root boundary down to the target
pub(crate) fn fallback(probe: &Probe<'_>) -> Vec<SelectorCandidate> {
    let mut steps = vec![indexed_step(&probe.target)];
    let mut root = None;
    let mut current = parent_element(&probe.target);

    while let Some(element) = current {
        if is_root_boundary(&element) {
            root = Some(tag_name(&element));
            break;
        }
        if steps.len() >= probe.config.max_structural_depth {
            break;
        }
        steps.insert(0, indexed_step(&element));
        current = parent_element(&element);
    }

    let path = steps.join(" > ");
    let selector = match root {
        Some(root) => format!("{} > {}", root, path),
        None => path,
    };

    if !probe.resolves_to_target(&selector) {
        return Vec::new();
    }

    vec![
        SelectorCandidate::new(
            CandidateKind::StructuralPath,
            selector,
            format!("Structural path ({} levels)", steps.len()),
            8,
            steps.len() as u32,
        )
        .positional(),
    ]
}

/// `tag:contains("text")` for short single-line text.
///
/// Not part of any standard selector grammar: returned as a hint only, never
/// validated and never marked unique.
pub(crate) fn text_hint(probe: &Probe<'_>) -> Option<SelectorCandidate> {
    let text = trimmed_text(&probe.target);
    if text.is_empty() || text.contains('\n') {
        return None;
    }
    if text.chars().count() >= probe.config.max_text_length {
        return None;
    }

    let selector = format!(
        "{}:contains({})",
        escape_identifier(tag_name(&probe.target)),
        quote_attribute_value(&text)
    );
    Some(
        SelectorCandidate::new(
            CandidateKind::TextContent,
            selector,
            "Text content match (non-standard, unsupported by CSS selector engines)",
            10,
            0,
        )
        .positional()
        .ambiguous(),
    )
}
