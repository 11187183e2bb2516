//! Sibling-context disambiguation for list items, table rows and other repeats

use tracing::debug;

use super::Probe;
use super::step::{identifier, indexed_step};
use crate::escape::escape_identifier;
use crate::features::{
    has_similar_sibling, is_root_boundary, nth_child, nth_of_type, parent_element, tag_name,
};
use crate::types::{CandidateKind, SelectorCandidate};

pub(crate) fn disambiguate(probe: &Probe<'_>) -> Vec<SelectorCandidate> {
    let element = &probe.target;
    let Some(parent) = parent_element(element) else {
        return Vec::new();
    };

    let tag = tag_name(element);
    let mut candidates = Vec::new();

    let repeated = probe.config.is_repeating_tag(tag)
        || has_similar_sibling(element, probe.config.child_count_tolerance);

    if repeated {
        match indexed_chain(probe) {
            Some(IndexedChain::Anchored {
                selector,
                specificity,
            }) => candidates.push(SelectorCandidate::new(
                CandidateKind::ParentIndexed,
                selector,
                format!("Position among repeated <{}> under an identified container", tag),
                7,
                specificity,
            )),
            Some(IndexedChain::Bare {
                selector,
                specificity,
            }) => candidates.push(
                SelectorCandidate::new(
                    CandidateKind::ParentIndexed,
                    selector,
                    format!("Position among repeated <{}>", tag),
                    7,
                    specificity,
                )
                .positional(),
            ),
            None => debug!("Repeated <{}> without a usable indexed chain", tag),
        }
    }

    let fallback = format!(
        "{} > {}:nth-child({})",
        escape_identifier(tag_name(&parent)),
        escape_identifier(tag),
        nth_child(element)
    );
    candidates.push(
        SelectorCandidate::new(
            CandidateKind::ParentIndexed,
            fallback,
            "Child position under parent tag",
            9,
            1,
        )
        .positional(),
    );

    candidates
}

enum IndexedChain {
    /// Rooted at a container with an id, test attribute or unique class
    Anchored { selector: String, specificity: u32 },
    /// Indexed tags only, unique as it stands
    Bare { selector: String, specificity: u32 },
}

/// Climb from the target through unidentified containers, indexing each step,
/// until a container with an identifier is found.
///
/// Falls back to the shortest bare chain that already resolves to the target.
fn indexed_chain(probe: &Probe<'_>) -> Option<IndexedChain> {
    let element = &probe.target;
    let mut steps = vec![format!(
        "{}:nth-of-type({})",
        escape_identifier(tag_name(element)),
        nth_of_type(element)
    )];
    let mut bare: Option<IndexedChain> = None;
    let mut current = parent_element(element);

    for _ in 0..probe.config.max_ancestor_depth {
        let Some(container) = current else {
            break;
        };
        if is_root_boundary(&container) {
            break;
        }

        if let Some((kind, anchor)) = identifier(probe, &container) {
            return Some(IndexedChain::Anchored {
                selector: format!("{} > {}", anchor, steps.join(" > ")),
                specificity: kind.anchor_specificity() + steps.len() as u32,
            });
        }

        if bare.is_none() {
            let selector = steps.join(" > ");
            if probe.resolves_to_target(&selector) {
                bare = Some(IndexedChain::Bare {
                    specificity: steps.len() as u32,
                    selector,
                });
            }
        }

        steps.insert(0, indexed_step(&container));
        current = parent_element(&container);
    }

    if bare.is_none() {
        let selector = steps.join(" > ");
        if probe.resolves_to_target(&selector) {
            bare = Some(IndexedChain::Bare {
                specificity: steps.len() as u32,
                selector,
            });
        }
    }

    bare
}
