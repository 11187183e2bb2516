//! Element feature extraction used by the selector stages

use scraper::ElementRef;
use std::collections::BTreeSet;

pub fn tag_name<'a>(element: &ElementRef<'a>) -> &'a str {
    element.value().name()
}

/// Class tokens in source order, duplicates removed
pub fn class_tokens(element: &ElementRef<'_>) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    if let Some(class) = element.value().attr("class") {
        for token in class.split_ascii_whitespace() {
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }
    }
    tokens
}

/// Non-empty `id` attribute
pub fn element_id<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element.value().id().filter(|id| !id.is_empty())
}

pub fn parent_element<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.parent().and_then(ElementRef::wrap)
}

pub fn child_elements<'a>(element: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap).collect()
}

/// Siblings with the same tag, excluding the element itself
pub fn same_tag_siblings<'a>(element: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let tag = tag_name(element);
    element
        .prev_siblings()
        .chain(element.next_siblings())
        .filter_map(ElementRef::wrap)
        .filter(|sibling| tag_name(sibling) == tag)
        .collect()
}

pub fn has_same_tag_siblings(element: &ElementRef<'_>) -> bool {
    let tag = tag_name(element);
    element
        .prev_siblings()
        .chain(element.next_siblings())
        .filter_map(ElementRef::wrap)
        .any(|sibling| tag_name(&sibling) == tag)
}

/// 1-based position among same-tag siblings (the `:nth-of-type` argument)
pub fn nth_of_type(element: &ElementRef<'_>) -> usize {
    let tag = tag_name(element);
    element
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|sibling| tag_name(sibling) == tag)
        .count()
        + 1
}

/// 1-based position among all element siblings (the `:nth-child` argument)
pub fn nth_child(element: &ElementRef<'_>) -> usize {
    element.prev_siblings().filter_map(ElementRef::wrap).count() + 1
}

/// Text content with surrounding whitespace removed
pub fn trimmed_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// `body` and `html` bound every upward walk
pub fn is_root_boundary(element: &ElementRef<'_>) -> bool {
    matches!(tag_name(element), "body" | "html")
}

/// Shape of an element, used to spot repeated list/table-like patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSnapshot {
    pub tag_name: String,
    pub child_count: usize,
    pub class_set: BTreeSet<String>,
    pub has_id: bool,
    pub has_attributes: bool,
    pub has_text: bool,
    pub child_tag_sequence: Vec<String>,
}

impl FeatureSnapshot {
    pub fn capture(element: &ElementRef<'_>) -> Self {
        let children = child_elements(element);
        FeatureSnapshot {
            tag_name: tag_name(element).to_string(),
            child_count: children.len(),
            class_set: class_tokens(element).into_iter().collect(),
            has_id: element_id(element).is_some(),
            has_attributes: element.value().attrs().next().is_some(),
            has_text: !trimmed_text(element).is_empty(),
            child_tag_sequence: children.iter().map(|c| tag_name(c).to_string()).collect(),
        }
    }

    /// Same tag, child counts within `tolerance`, and either a shared class
    /// or the same sequence of child tags
    pub fn resembles(&self, other: &FeatureSnapshot, tolerance: usize) -> bool {
        if self.tag_name != other.tag_name {
            return false;
        }
        if self.child_count.abs_diff(other.child_count) > tolerance {
            return false;
        }
        let shares_class = self.class_set.intersection(&other.class_set).next().is_some();
        shares_class || self.child_tag_sequence == other.child_tag_sequence
    }
}

/// At least one same-tag sibling has a similar shape
pub fn has_similar_sibling(element: &ElementRef<'_>, tolerance: usize) -> bool {
    let snapshot = FeatureSnapshot::capture(element);
    same_tag_siblings(element)
        .iter()
        .any(|sibling| snapshot.resembles(&FeatureSnapshot::capture(sibling), tolerance))
}

#[cfg(test)]
#[path = "features_test.rs"]
mod features_test;
