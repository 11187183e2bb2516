//! Parsed HTML document with opaque element handles
//!
//! Wraps a `scraper::Html` tree. Selector queries only ever see elements that
//! are still attached to the document root, so a detached node can never make
//! a selector look ambiguous (or unique) when it is not.

use ego_tree::NodeId;
use std::fmt;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

/// Errors raised while resolving selectors or handles against a document
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No elements found matching selector: {0}")]
    NoMatch(String),

    #[error("Index {index} out of range for selector '{selector}' ({count} matches)")]
    IndexOutOfRange {
        selector: String,
        index: usize,
        count: usize,
    },
}

/// Opaque reference to an element node inside a [`Document`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementHandle(NodeId);

impl ElementHandle {
    pub fn of(element: ElementRef<'_>) -> Self {
        ElementHandle(element.id())
    }
}

/// An HTML document the synthesizer reads from
pub struct Document {
    html: Html,
    url: Option<String>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("nodes", &self.html.tree.nodes().count())
            .finish()
    }
}

impl Document {
    /// Parse a full HTML document (missing `html`/`body` are synthesized by the parser)
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        if !html.errors.is_empty() {
            debug!("Parsed document with {} recoverable errors", html.errors.len());
        }
        Document { html, url: None }
    }

    /// Record where the document was loaded from
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Whitespace-collapsed text of the first attached `<title>`, if not blank
    pub fn title(&self) -> Option<String> {
        let title = self
            .html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "title")?;
        let text = title.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        (!text.is_empty()).then_some(text)
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Resolve a handle to an attached element
    pub fn element(&self, handle: ElementHandle) -> Option<ElementRef<'_>> {
        let node = self.html.tree.get(handle.0)?;
        let element = ElementRef::wrap(node)?;
        self.is_attached(element).then_some(element)
    }

    /// Whether the element's ancestor chain reaches the document root
    pub fn is_attached(&self, element: ElementRef<'_>) -> bool {
        let root = self.html.tree.root().id();
        element.ancestors().last().map(|node| node.id()) == Some(root)
    }

    /// The `<body>` element, if the document has one
    pub fn body(&self) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "body")
    }

    /// Parse selector text into a compiled selector
    pub fn compile(selector: &str) -> Result<Selector, DocumentError> {
        Selector::parse(selector).map_err(|e| DocumentError::InvalidSelector {
            selector: selector.to_string(),
            reason: format!("{:?}", e),
        })
    }

    /// All attached elements matching a compiled selector, in document order
    pub fn select<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| selector.matches(el))
            .collect()
    }

    /// All attached elements matching selector text
    pub fn query(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, DocumentError> {
        let compiled = Self::compile(selector)?;
        Ok(self.select(&compiled))
    }

    /// Locate one element by selector and 0-based index among its matches
    pub fn locate(&self, selector: &str, index: usize) -> Result<ElementHandle, DocumentError> {
        let matches = self.query(selector)?;
        if matches.is_empty() {
            return Err(DocumentError::NoMatch(selector.to_string()));
        }
        matches
            .get(index)
            .map(|el| ElementHandle::of(*el))
            .ok_or(DocumentError::IndexOutOfRange {
                selector: selector.to_string(),
                index,
                count: matches.len(),
            })
    }

    /// Remove an element (and its subtree) from the document tree.
    ///
    /// Returns false when the handle does not name a node of this document.
    pub fn detach(&mut self, handle: ElementHandle) -> bool {
        match self.html.tree.get_mut(handle.0) {
            Some(mut node) => {
                node.detach();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;
