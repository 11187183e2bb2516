//! Direct identifier scan: identity carried by the element itself

use super::Probe;
use crate::escape::{attribute_selector, escape_identifier};
use crate::features::{class_tokens, element_id};
use crate::types::{CandidateKind, SelectorCandidate};

pub(crate) fn scan(probe: &Probe<'_>) -> Vec<SelectorCandidate> {
    let element = &probe.target;
    let mut candidates = Vec::new();

    if let Some(id) = element_id(element) {
        let selector = format!("#{}", escape_identifier(id));
        if probe.resolves_to_target(&selector) {
            candidates.push(SelectorCandidate::new(
                CandidateKind::Identifier,
                selector,
                format!("Unique id \"{}\"", id),
                1,
                100,
            ));
        }
    }

    for attr in &probe.config.test_attributes {
        if let Some(selector) = attribute_candidate(probe, attr) {
            candidates.push(SelectorCandidate::new(
                CandidateKind::TestAttribute,
                selector,
                format!("Test attribute {}", attr),
                2,
                50,
            ));
        }
    }

    for attr in &probe.config.semantic_attributes {
        if let Some(selector) = attribute_candidate(probe, attr) {
            candidates.push(SelectorCandidate::new(
                CandidateKind::SemanticAttribute,
                selector,
                format!("Semantic attribute {}", attr),
                3,
                10,
            ));
        }
    }

    let classes = class_tokens(element);
    for class in &classes {
        let selector = format!(".{}", escape_identifier(class));
        if probe.resolves_to_target(&selector) {
            candidates.push(SelectorCandidate::new(
                CandidateKind::UniqueClass,
                selector,
                format!("Unique class \"{}\"", class),
                4,
                10,
            ));
        }
    }

    if classes.len() > 1 {
        let selector: String = classes
            .iter()
            .map(|class| format!(".{}", escape_identifier(class)))
            .collect();
        if probe.resolves_to_target(&selector) {
            candidates.push(SelectorCandidate::new(
                CandidateKind::MultiClass,
                selector,
                format!("Class combination ({} classes)", classes.len()),
                4,
                10 * classes.len() as u32,
            ));
        }
    }

    candidates
}

fn attribute_candidate(probe: &Probe<'_>, attr: &str) -> Option<String> {
    let value = probe.target.value().attr(attr)?;
    if value.trim().is_empty() {
        return None;
    }
    let selector = attribute_selector(attr, value);
    probe.resolves_to_target(&selector).then_some(selector)
}
