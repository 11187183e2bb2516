//! Ancestor path search: anchor on the nearest uniquely identifiable ancestor

use tracing::debug;

use super::Probe;
use super::step::{LocalKind, StepDescriptor};
use crate::features::{is_root_boundary, parent_element};
use crate::types::{CandidateKind, SelectorCandidate};

pub(crate) fn search(probe: &Probe<'_>) -> Vec<SelectorCandidate> {
    let Some((anchor, intermediates)) = find_anchor(probe) else {
        debug!("No unique ancestor within {} levels", probe.config.max_ancestor_depth);
        return Vec::new();
    };

    let target = StepDescriptor::describe(probe, &probe.target);
    let path: Vec<&StepDescriptor> = intermediates.iter().rev().chain([&target]).collect();
    let path_len = path.len() as u32;
    let anchor_specificity = anchor.kind.anchor_specificity();
    // An anchor that is only unique by position makes the whole path positional
    let positional = anchor.kind == LocalKind::TagIndexed;

    let mut candidates = Vec::new();

    let direct = std::iter::once(anchor.local.as_str())
        .chain(path.iter().map(|step| step.strict.as_str()))
        .collect::<Vec<_>>()
        .join(" > ");
    if probe.resolves_to_target(&direct) {
        candidates.push(with_stability(
            SelectorCandidate::new(
                CandidateKind::AncestorPath,
                direct,
                format!("Child chain from anchor {}", anchor.local),
                5,
                anchor_specificity + path_len,
            ),
            positional,
        ));
    }

    let relaxed = std::iter::once(anchor.local.as_str())
        .chain(path.iter().map(|step| step.relaxed.as_str()))
        .collect::<Vec<_>>()
        .join(" ");
    if probe.resolves_to_target(&relaxed) {
        candidates.push(with_stability(
            SelectorCandidate::new(
                CandidateKind::AncestorPath,
                relaxed,
                format!("Descendant chain from anchor {}", anchor.local),
                6,
                anchor_specificity + path_len.div_ceil(2),
            ),
            positional,
        ));
    }

    candidates
}

fn with_stability(candidate: SelectorCandidate, positional: bool) -> SelectorCandidate {
    if positional {
        candidate.positional()
    } else {
        candidate
    }
}

/// Walk upward to the first ancestor whose local selector is globally unique.
///
/// Returns the anchor and the non-unique steps passed on the way, nearest first.
fn find_anchor(probe: &Probe<'_>) -> Option<(StepDescriptor, Vec<StepDescriptor>)> {
    let mut intermediates = Vec::new();
    let mut current = parent_element(&probe.target);

    for _ in 0..probe.config.max_ancestor_depth {
        let element = current?;
        if is_root_boundary(&element) {
            return None;
        }

        let step = StepDescriptor::describe(probe, &element);
        if step.globally_unique {
            return Some((step, intermediates));
        }

        intermediates.push(step);
        current = parent_element(&element);
    }

    None
}
