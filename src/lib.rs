//! # selprobe
#![allow(clippy::uninlined_format_args)]
//!
//! CSS selector synthesis for HTML elements, designed for scrapers and test automation.
//!
//! Given one element of a document, selprobe proposes a ranked list of CSS
//! selectors that identify exactly that element: ids and test attributes first,
//! then anchored ancestor paths, positional selectors for repeated structures,
//! and a full structural path as the last resort. Every candidate is re-queried
//! against the document before it is returned.
//!
//! ## Installation
//!
//! ```bash
//! cargo install selprobe
//! # with system clipboard support
//! cargo install selprobe --features clipboard
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Ranked selectors for the first matching element
//! selprobe synth page.html "button.submit"
//!
//! # Third list item of a remote page, human-readable
//! selprobe synth "https://example.com" "li" --index 2 --format simple
//!
//! # Read HTML from stdin
//! curl -s https://example.com | selprobe synth - "h1"
//!
//! # Check selectors you already have against an element
//! selprobe check page.html "#cart li" "ul > li:nth-child(2)" ".item" --index 1
//!
//! # Capture an element: record history, log the capture, copy the best selector
//! selprobe capture page.html "td" --index 5 -d "Second price" --copy --log-file captures.jsonl
//!
//! # Past captures, newest first
//! selprobe history list
//! selprobe history clear
//! ```
//!
//! ### JSON Output and Processing with jq
//!
//! ```bash
//! # Best selector only
//! selprobe synth page.html "button" | jq -r '.candidates[0].selector'
//!
//! # Stable selectors only
//! selprobe synth page.html "td" --index 5 | jq '.candidates[] | select(.stable)'
//! ```
//!
//! ## Configuration
//!
//! `~/.selprobe/config.json` (or `--config PATH`) tunes the pipeline; every
//! field is optional:
//!
//! ```json
//! {
//!   "max_ancestor_depth": 10,
//!   "max_text_length": 30,
//!   "test_attributes": ["data-testid", "data-qa"],
//!   "stages": { "text_hint": false }
//! }
//! ```
//!
//! ## Library Usage
//!
//! ```
//! use selprobe::{Document, Synthesizer, SynthesisConfig};
//!
//! let document = Document::parse(r#"<ul id="menu"><li>Home</li><li>About</li></ul>"#);
//! let target = document.locate("li", 1).unwrap();
//!
//! let synthesis = Synthesizer::new(SynthesisConfig::default()).synthesize(&document, target);
//! assert_eq!(synthesis.best().unwrap().selector, "#menu > li:nth-of-type(2)");
//! ```

/// Clipboard output for captured selectors
pub mod clipboard;

/// Synthesis configuration
pub mod config;

/// Parsed HTML documents and element handles
pub mod document;

/// CSS identifier and string escaping
pub mod escape;

/// Element feature extraction
pub mod features;

/// Capture history over a key-value store
pub mod history;

/// Selection messages and sinks
pub mod messaging;

/// Interactive selection state machine
pub mod session;

/// Selector synthesis pipeline
pub mod synth;

/// Candidate, synthesis and capture types
pub mod types;

pub use clipboard::{ClipboardError, ClipboardWriter, SystemClipboard};
pub use config::{StageToggles, SynthesisConfig};
pub use document::{Document, DocumentError, ElementHandle};
pub use history::{
    FileStore, HISTORY_KEY, HISTORY_LIMIT, HistoryEntry, HistoryLog, KeyValueStore, MemoryStore,
};
pub use messaging::{JsonLinesSink, Message, MessageSink, RecordingSink, TracingSink};
pub use session::{
    Collaborators, Presenter, SelectionController, SelectionEvent, SelectionOutcome,
    SelectionState,
};
pub use synth::Synthesizer;
pub use types::{
    Assessment, CandidateKind, CapturedRecord, OutputFormat, SelectorCandidate, Synthesis,
};
