//! Selector synthesis pipeline
//!
//! Four independent generators propose candidates for a target element; the
//! ranker re-validates every proposal against the document and orders the
//! survivors. The pipeline holds no state between runs.

mod ancestor;
mod direct;
mod rank;
mod sibling;
mod step;
mod structural;

use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::config::SynthesisConfig;
use crate::document::{Document, ElementHandle};
use crate::types::{Assessment, SelectorCandidate, Synthesis};

/// Produces ranked selector candidates for elements of a document
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    config: SynthesisConfig,
}

impl Synthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Run every enabled stage for the target and return the validated, ranked result.
    ///
    /// `<html>` itself and handles that no longer resolve to an attached element
    /// yield an empty synthesis.
    pub fn synthesize(&self, document: &Document, target: ElementHandle) -> Synthesis {
        let Some(element) = document.element(target) else {
            debug!("Target element is not attached to the document");
            return Synthesis::default();
        };
        if element.value().name() == "html" {
            debug!("Refusing to synthesize selectors for the document element");
            return Synthesis::default();
        }

        let probe = Probe::new(document, element, &self.config);
        let stages = &self.config.stages;

        let mut proposals: Vec<SelectorCandidate> = Vec::new();
        let mut hints: Vec<SelectorCandidate> = Vec::new();

        if stages.direct {
            proposals.extend(direct::scan(&probe));
        }
        if stages.ancestor {
            proposals.extend(ancestor::search(&probe));
        }
        if stages.sibling {
            proposals.extend(sibling::disambiguate(&probe));
        }
        if stages.structural {
            proposals.extend(structural::fallback(&probe));
        }
        if stages.text_hint {
            hints.extend(structural::text_hint(&probe));
        }

        let generated = proposals.len();
        let candidates = rank::rank(&probe, proposals);
        debug!(
            "Synthesized {} candidates ({} proposed) for <{}>",
            candidates.len(),
            generated,
            element.value().name()
        );

        Synthesis { candidates, hints }
    }

    /// Check arbitrary selector text against a target element
    pub fn assess(&self, document: &Document, target: ElementHandle, selector: &str) -> Assessment {
        match document.element(target) {
            Some(element) => Probe::new(document, element, &self.config).assess(selector),
            None => Assessment {
                selector: selector.to_string(),
                parses: Document::compile(selector).is_ok(),
                match_count: document.query(selector).map(|m| m.len()).unwrap_or(0),
                unique: false,
                targets_element: false,
            },
        }
    }
}

/// Live view of one target inside one document, shared by every stage
pub(crate) struct Probe<'a> {
    pub document: &'a Document,
    pub target: ElementRef<'a>,
    pub config: &'a SynthesisConfig,
}

impl<'a> Probe<'a> {
    pub fn new(document: &'a Document, target: ElementRef<'a>, config: &'a SynthesisConfig) -> Self {
        Probe {
            document,
            target,
            config,
        }
    }

    /// Attached matches of a compiled selector
    pub fn matches(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.document.select(selector)
    }

    /// Number of attached matches, `None` when the selector does not parse
    pub fn count(&self, selector: &str) -> Option<usize> {
        Document::compile(selector)
            .ok()
            .map(|compiled| self.matches(&compiled).len())
    }

    /// Selector matches exactly one element, whichever it is
    pub fn is_globally_unique(&self, selector: &str) -> bool {
        self.count(selector) == Some(1)
    }

    /// Selector matches exactly the target
    pub fn resolves_to_target(&self, selector: &str) -> bool {
        self.assess(selector).resolves_to_target()
    }

    pub fn assess(&self, selector: &str) -> Assessment {
        let Ok(compiled) = Document::compile(selector) else {
            return Assessment {
                selector: selector.to_string(),
                parses: false,
                match_count: 0,
                unique: false,
                targets_element: false,
            };
        };

        let matches = self.matches(&compiled);
        Assessment {
            selector: selector.to_string(),
            parses: true,
            match_count: matches.len(),
            unique: matches.len() == 1,
            targets_element: matches.iter().any(|el| el.id() == self.target.id()),
        }
    }
}
