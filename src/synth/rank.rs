//! Validator and ranker

use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

use super::Probe;
use crate::types::SelectorCandidate;

/// Re-validate every proposal against the live document and order the survivors.
///
/// Unparsable or non-matching proposals are dropped one by one; a bad proposal
/// never affects the others.
pub(crate) fn rank(probe: &Probe<'_>, proposals: Vec<SelectorCandidate>) -> Vec<SelectorCandidate> {
    let mut survivors = Vec::with_capacity(proposals.len());

    for candidate in proposals {
        if !candidate.is_standard() {
            debug!("Skipping non-standard candidate {}", candidate.selector);
            continue;
        }

        let assessment = probe.assess(&candidate.selector);
        if !assessment.parses {
            debug!("Dropping unparsable candidate {}", candidate.selector);
        } else if assessment.resolves_to_target() {
            survivors.push(SelectorCandidate {
                unique: true,
                ..candidate
            });
        } else if probe.config.include_ambiguous && assessment.targets_element {
            survivors.push(candidate.ambiguous());
        } else {
            debug!(
                "Dropping candidate {} ({} matches, target matched: {})",
                candidate.selector, assessment.match_count, assessment.targets_element
            );
        }
    }

    survivors.sort_by(ranking_order);

    let mut seen = HashSet::new();
    survivors.retain(|candidate| seen.insert(candidate.selector.clone()));
    survivors
}

/// Unique first, then stable, then lower priority, higher specificity,
/// shorter selector text, and finally the text itself
pub(crate) fn ranking_order(a: &SelectorCandidate, b: &SelectorCandidate) -> Ordering {
    b.unique
        .cmp(&a.unique)
        .then(b.stable.cmp(&a.stable))
        .then(a.priority.cmp(&b.priority))
        .then(b.specificity.cmp(&a.specificity))
        .then(a.selector.len().cmp(&b.selector.len()))
        .then_with(|| a.selector.cmp(&b.selector))
}
