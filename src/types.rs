use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Output format for CLI results
#[derive(Clone, Copy, Debug, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for programmatic consumption
    Json,
    /// Human-readable simple format
    Simple,
}

/// Which generator produced a selector candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    /// `#id`
    Identifier,
    /// `[data-testid="..."]` and friends
    TestAttribute,
    /// `[name="..."]`, `[aria-label="..."]`, ...
    SemanticAttribute,
    /// A single class token
    UniqueClass,
    /// The full class combination
    MultiClass,
    /// Path from a uniquely identified ancestor
    AncestorPath,
    /// Parent identifier plus positional index
    ParentIndexed,
    /// Full tag/class/index path to the root boundary
    StructuralPath,
    /// Non-standard `:contains()` text hint
    TextContent,
}

/// A synthesized selector together with its quality metadata
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectorCandidate {
    pub kind: CandidateKind,
    /// Selector text
    pub selector: String,
    /// Human-readable explanation of how the selector was built
    pub description: String,
    /// Lower is better
    pub priority: u32,
    /// Synthetic tie-breaking score, higher is better
    pub specificity: u32,
    /// Resolves to exactly the target element
    pub unique: bool,
    /// Does not depend on element position
    pub stable: bool,
}

impl SelectorCandidate {
    /// A stable candidate the generator already believes unique
    pub fn new(
        kind: CandidateKind,
        selector: impl Into<String>,
        description: impl Into<String>,
        priority: u32,
        specificity: u32,
    ) -> Self {
        SelectorCandidate {
            kind,
            selector: selector.into(),
            description: description.into(),
            priority,
            specificity,
            unique: true,
            stable: true,
        }
    }

    /// Mark as position-dependent
    pub fn positional(mut self) -> Self {
        self.stable = false;
        self
    }

    /// Mark as not (yet) known to be unique
    pub fn ambiguous(mut self) -> Self {
        self.unique = false;
        self
    }

    /// Whether standard selector engines can evaluate this candidate
    pub fn is_standard(&self) -> bool {
        self.kind != CandidateKind::TextContent
    }
}

/// Result of running the selector pipeline for one element
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Synthesis {
    /// Validated candidates, best first
    pub candidates: Vec<SelectorCandidate>,
    /// Human-readable hints standard engines cannot evaluate
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<SelectorCandidate>,
}

impl Synthesis {
    pub fn best(&self) -> Option<&SelectorCandidate> {
        self.candidates.first()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn selectors(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.selector.clone()).collect()
    }
}

/// How a piece of selector text behaves against a target element
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Assessment {
    pub selector: String,
    /// Selector text is valid CSS
    pub parses: bool,
    /// Number of attached elements matched
    pub match_count: usize,
    /// Matches exactly one element
    pub unique: bool,
    /// The target is among the matches
    pub targets_element: bool,
}

impl Assessment {
    /// Unique and pointing at the target
    pub fn resolves_to_target(&self) -> bool {
        self.unique && self.targets_element
    }
}

/// Everything captured about an element when a selection is confirmed
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedRecord {
    /// Trimmed text content, at most 100 characters
    pub text: String,
    /// Validated selectors, best first
    pub selectors: Vec<String>,
    pub tag_name: String,
    pub attributes: BTreeMap<String, String>,
    /// What the user says this element is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Where the document came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Document `<title>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub captured_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
