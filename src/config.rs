//! Synthesis configuration
//!
//! One pipeline, tuned by data: which stages run, how far they search, and
//! which attributes count as test or semantic identifiers.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which generator stages run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageToggles {
    pub direct: bool,
    pub ancestor: bool,
    pub sibling: bool,
    pub structural: bool,
    /// Emit `:contains()` hints for short text
    pub text_hint: bool,
}

impl Default for StageToggles {
    fn default() -> Self {
        Self {
            direct: true,
            ancestor: true,
            sibling: true,
            structural: true,
            text_hint: true,
        }
    }
}

/// Thresholds and attribute preference lists for the selector pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub stages: StageToggles,
    /// Levels walked upward when looking for an anchor
    pub max_ancestor_depth: usize,
    /// Steps in a structural fallback path
    pub max_structural_depth: usize,
    /// Text shorter than this (in characters) gets a text hint
    pub max_text_length: usize,
    /// Allowed child-count difference between similar siblings
    pub child_count_tolerance: usize,
    /// Attributes checked in order for test identifiers
    pub test_attributes: Vec<String>,
    /// Attributes checked in order for semantic identifiers
    pub semantic_attributes: Vec<String>,
    /// Tags that always form repeated structures
    pub repeating_tags: Vec<String>,
    /// Keep candidates that match the target among other nodes (marked non-unique)
    pub include_ambiguous: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            stages: StageToggles::default(),
            max_ancestor_depth: 10,
            max_structural_depth: 15,
            max_text_length: 30,
            child_count_tolerance: 2,
            test_attributes: to_strings(&[
                "data-testid",
                "data-test-id",
                "data-test",
                "data-cy",
                "data-qa",
            ]),
            semantic_attributes: to_strings(&["name", "aria-label", "title", "alt", "href", "src"]),
            repeating_tags: to_strings(&["li", "tr", "td", "th", "dt", "dd", "option", "article"]),
            include_ambiguous: false,
        }
    }
}

impl SynthesisConfig {
    /// Default location: `~/.selprobe/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".selprobe").join("config.json"))
    }

    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SynthesisConfig = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        debug!("Loaded synthesis config from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, else from the default path when it exists, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_ancestor_depth == 0 {
            anyhow::bail!("max_ancestor_depth must be at least 1");
        }
        if self.max_structural_depth == 0 {
            anyhow::bail!("max_structural_depth must be at least 1");
        }
        Ok(())
    }

    pub fn is_repeating_tag(&self, tag: &str) -> bool {
        self.repeating_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
