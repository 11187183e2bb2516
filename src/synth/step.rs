//! Local selectors for single elements on a path

use scraper::ElementRef;

use super::Probe;
use crate::escape::{attribute_selector, escape_identifier};
use crate::features::{class_tokens, element_id, has_same_tag_siblings, nth_of_type, tag_name};

/// Quality of the best local selector an element offers, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LocalKind {
    Identifier,
    TestAttribute,
    UniqueClass,
    TagClass,
    TagIndexed,
    Tag,
}

impl LocalKind {
    /// Specificity an anchor of this kind contributes to its paths
    pub fn anchor_specificity(self) -> u32 {
        match self {
            LocalKind::Identifier => 100,
            LocalKind::TestAttribute => 50,
            LocalKind::UniqueClass => 10,
            LocalKind::TagClass => 5,
            LocalKind::TagIndexed | LocalKind::Tag => 1,
        }
    }
}

/// How one element on a path is written
#[derive(Debug, Clone)]
pub(crate) struct StepDescriptor {
    pub kind: LocalKind,
    /// Best local selector
    pub local: String,
    /// Form used in `>` chains: indexed when same-tag siblings exist
    pub strict: String,
    /// Form used in descendant chains: never indexed
    pub relaxed: String,
    /// `local` alone matches exactly one element
    pub globally_unique: bool,
}

impl StepDescriptor {
    pub fn describe(probe: &Probe<'_>, element: &ElementRef<'_>) -> Self {
        if let Some((kind, selector)) = identifier(probe, element) {
            return StepDescriptor {
                kind,
                local: selector.clone(),
                strict: selector.clone(),
                relaxed: selector,
                globally_unique: true,
            };
        }

        let tag_class = tag_with_first_class(element);
        let strict = indexed_step(element);
        let has_class = !class_tokens(element).is_empty();

        let (kind, local) = if has_class {
            (LocalKind::TagClass, tag_class.clone())
        } else if strict != tag_class {
            (LocalKind::TagIndexed, strict.clone())
        } else {
            (LocalKind::Tag, tag_class.clone())
        };

        StepDescriptor {
            kind,
            globally_unique: probe.is_globally_unique(&local),
            strict,
            relaxed: tag_class,
            local,
        }
    }
}

/// Globally unique id, test attribute or class of an element, in that order of preference
pub(crate) fn identifier(probe: &Probe<'_>, element: &ElementRef<'_>) -> Option<(LocalKind, String)> {
    if let Some(id) = element_id(element) {
        let selector = format!("#{}", escape_identifier(id));
        if probe.is_globally_unique(&selector) {
            return Some((LocalKind::Identifier, selector));
        }
    }

    for attr in &probe.config.test_attributes {
        if let Some(value) = element.value().attr(attr).filter(|v| !v.trim().is_empty()) {
            let selector = attribute_selector(attr, value);
            if probe.is_globally_unique(&selector) {
                return Some((LocalKind::TestAttribute, selector));
            }
        }
    }

    class_tokens(element)
        .iter()
        .map(|class| format!(".{}", escape_identifier(class)))
        .find(|selector| probe.is_globally_unique(selector))
        .map(|selector| (LocalKind::UniqueClass, selector))
}

/// `tag[.firstClass]`, with `:nth-of-type(n)` when same-tag siblings exist
pub(crate) fn indexed_step(element: &ElementRef<'_>) -> String {
    let tag_class = tag_with_first_class(element);
    if has_same_tag_siblings(element) {
        format!("{}:nth-of-type({})", tag_class, nth_of_type(element))
    } else {
        tag_class
    }
}

/// `tag` or `tag.firstClass`
pub(crate) fn tag_with_first_class(element: &ElementRef<'_>) -> String {
    let tag = escape_identifier(tag_name(element));
    match class_tokens(element).first() {
        Some(class) => format!("{}.{}", tag, escape_identifier(class)),
        None => tag,
    }
}
