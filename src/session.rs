//! Interactive selection: an explicit {Idle, Selecting} state machine
//!
//! The controller owns the selection state and nothing else. Rendering,
//! message delivery, persistence and the clipboard are collaborators borrowed
//! for the duration of one event, so the same controller runs behind a
//! terminal, a test harness or any other host.

use chrono::{DateTime, Utc};
use scraper::ElementRef;
use tracing::{debug, info, warn};

use crate::clipboard::ClipboardWriter;
use crate::document::{Document, ElementHandle};
use crate::features::{tag_name, trimmed_text};
use crate::history::{HistoryLog, KeyValueStore};
use crate::messaging::{Message, MessageSink};
use crate::synth::Synthesizer;
use crate::types::{CapturedRecord, Synthesis};

/// Captured text is cut to this many characters
pub const CAPTURED_TEXT_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting {
        hovered: Option<ElementHandle>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Start,
    /// Pointer moved; `None` when nothing is under it
    Hover(Option<ElementHandle>),
    Confirm,
    Cancel,
}

/// What handling one event produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Event does not apply in the current state
    Ignored,
    Started,
    Hovered(Synthesis),
    Captured(CapturedRecord),
    Cancelled,
}

/// Visual feedback for a selection in progress
pub trait Presenter {
    fn selection_started(&mut self);
    fn highlight(&mut self, element: ElementRef<'_>, synthesis: &Synthesis);
    fn clear_highlight(&mut self);
    /// Remove every trace of the selection UI
    fn teardown(&mut self);
    fn status(&mut self, message: &str);
    fn captured(&mut self, _record: &CapturedRecord) {}
}

/// Everything the controller talks to while handling one event
pub struct Collaborators<'a> {
    pub presenter: &'a mut dyn Presenter,
    pub messages: &'a mut dyn MessageSink,
    pub history: Option<&'a mut HistoryLog<Box<dyn KeyValueStore>>>,
    pub clipboard: Option<&'a mut dyn ClipboardWriter>,
}

pub struct SelectionController {
    synthesizer: Synthesizer,
    state: SelectionState,
}

impl SelectionController {
    pub fn new(synthesizer: Synthesizer) -> Self {
        Self {
            synthesizer,
            state: SelectionState::Idle,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, SelectionState::Selecting { .. })
    }

    /// React to a host message: start, stop and capture requests drive the controller
    pub fn handle_message(
        &mut self,
        document: &Document,
        message: &Message,
        collaborators: &mut Collaborators<'_>,
    ) -> SelectionOutcome {
        match message {
            Message::StartSelection => self.handle(document, SelectionEvent::Start, collaborators),
            Message::StopSelection => self.handle(document, SelectionEvent::Cancel, collaborators),
            Message::CaptureData { description } => {
                self.capture_described(document, description, collaborators)
            }
            other => {
                debug!("Controller ignores {} messages", other.action());
                SelectionOutcome::Ignored
            }
        }
    }

    pub fn handle(
        &mut self,
        document: &Document,
        event: SelectionEvent,
        collaborators: &mut Collaborators<'_>,
    ) -> SelectionOutcome {
        match (self.state, event) {
            (SelectionState::Idle, SelectionEvent::Start) => {
                self.state = SelectionState::Selecting { hovered: None };
                collaborators.presenter.selection_started();
                info!("Started element selection");
                SelectionOutcome::Started
            }
            (SelectionState::Selecting { .. }, SelectionEvent::Start) => {
                debug!("Selection already in progress");
                SelectionOutcome::Ignored
            }
            (SelectionState::Selecting { .. }, SelectionEvent::Hover(None)) => {
                SelectionOutcome::Ignored
            }
            (SelectionState::Selecting { .. }, SelectionEvent::Hover(Some(handle))) => {
                self.hover(document, handle, collaborators)
            }
            (SelectionState::Selecting { hovered }, SelectionEvent::Confirm) => {
                self.confirm(document, hovered, None, collaborators)
            }
            (SelectionState::Selecting { .. }, SelectionEvent::Cancel) => {
                self.state = SelectionState::Idle;
                collaborators.presenter.teardown();
                notify(collaborators, &Message::SelectionCancelled);
                info!("Selection cancelled");
                SelectionOutcome::Cancelled
            }
            (SelectionState::Idle, _) => SelectionOutcome::Ignored,
        }
    }

    fn hover(
        &mut self,
        document: &Document,
        handle: ElementHandle,
        collaborators: &mut Collaborators<'_>,
    ) -> SelectionOutcome {
        let Some(element) = document.element(handle) else {
            debug!("Hovered element is not attached");
            collaborators.presenter.clear_highlight();
            self.state = SelectionState::Selecting { hovered: None };
            return SelectionOutcome::Ignored;
        };

        let synthesis = self.synthesizer.synthesize(document, handle);
        collaborators.presenter.highlight(element, &synthesis);
        self.state = SelectionState::Selecting {
            hovered: Some(handle),
        };
        SelectionOutcome::Hovered(synthesis)
    }

    /// Confirm the hovered element under a non-blank description
    fn capture_described(
        &mut self,
        document: &Document,
        description: &str,
        collaborators: &mut Collaborators<'_>,
    ) -> SelectionOutcome {
        let SelectionState::Selecting { hovered } = self.state else {
            debug!("No selection to capture");
            return SelectionOutcome::Ignored;
        };
        let description = description.trim();
        if description.is_empty() {
            collaborators
                .presenter
                .status("Add a description before capturing");
            return SelectionOutcome::Ignored;
        }
        self.confirm(document, hovered, Some(description.to_string()), collaborators)
    }

    fn confirm(
        &mut self,
        document: &Document,
        hovered: Option<ElementHandle>,
        description: Option<String>,
        collaborators: &mut Collaborators<'_>,
    ) -> SelectionOutcome {
        let Some(handle) = hovered else {
            collaborators.presenter.status("Nothing selected");
            return SelectionOutcome::Ignored;
        };
        // The document may have changed since the hover: synthesize again
        let Some(element) = document.element(handle) else {
            warn!("Selected element left the document before confirmation");
            collaborators
                .presenter
                .status("Selected element is no longer in the document");
            self.state = SelectionState::Selecting { hovered: None };
            return SelectionOutcome::Ignored;
        };
        let synthesis = self.synthesizer.synthesize(document, handle);
        let record = captured_record(document, element, &synthesis, description, Utc::now());

        self.state = SelectionState::Idle;
        collaborators.presenter.teardown();
        notify(collaborators, &Message::SelectionComplete);

        if let Some(history) = collaborators.history.as_deref_mut()
            && let Err(e) = history.record(&record)
        {
            warn!("Failed to record history: {:#}", e);
        }

        notify(collaborators, &Message::LogData(record.clone()));

        if let Some(best) = record.selectors.first() {
            copy_selector(collaborators, best);
        }

        collaborators.presenter.captured(&record);
        info!(
            "Captured <{}> with {} selectors",
            record.tag_name,
            record.selectors.len()
        );
        SelectionOutcome::Captured(record)
    }
}

/// Snapshot of an element, its validated selectors and the page it came from
pub fn captured_record(
    document: &Document,
    element: ElementRef<'_>,
    synthesis: &Synthesis,
    description: Option<String>,
    captured_at: DateTime<Utc>,
) -> CapturedRecord {
    CapturedRecord {
        text: trimmed_text(&element)
            .chars()
            .take(CAPTURED_TEXT_LIMIT)
            .collect(),
        selectors: synthesis.selectors(),
        tag_name: tag_name(&element).to_string(),
        attributes: element
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        description,
        url: document.url().map(str::to_string),
        title: document.title(),
        captured_at,
    }
}

fn notify(collaborators: &mut Collaborators<'_>, message: &Message) {
    if let Err(e) = collaborators.messages.send(message) {
        warn!("Failed to deliver {} message: {:#}", message.action(), e);
        collaborators
            .presenter
            .status(&format!("Could not deliver {} message", message.action()));
    }
}

fn copy_selector(collaborators: &mut Collaborators<'_>, selector: &str) {
    let Some(clipboard) = collaborators.clipboard.as_deref_mut() else {
        return;
    };
    match clipboard.set_text(selector) {
        Ok(()) => collaborators
            .presenter
            .status(&format!("Copied {}", selector)),
        Err(e) => {
            warn!("{}", e);
            collaborators
                .presenter
                .status(&format!("Clipboard unavailable, selector: {}", selector));
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
