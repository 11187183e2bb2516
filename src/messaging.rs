//! Selection messages and the sinks that carry them
//!
//! Every message is a JSON object with a string `action` and an optional
//! `data` payload, written one per line.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::info;

use crate::types::CapturedRecord;

/// Messages exchanged between the selection controller and its host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum Message {
    StartSelection,
    StopSelection,
    SelectionComplete,
    SelectionCancelled,
    /// Capture the current selection under a user description
    CaptureData { description: String },
    LogData(CapturedRecord),
}

impl Message {
    pub fn action(&self) -> &'static str {
        match self {
            Message::StartSelection => "startSelection",
            Message::StopSelection => "stopSelection",
            Message::SelectionComplete => "selectionComplete",
            Message::SelectionCancelled => "selectionCancelled",
            Message::CaptureData { .. } => "captureData",
            Message::LogData(_) => "logData",
        }
    }
}

/// Destination for selection messages
pub trait MessageSink {
    fn send(&mut self, message: &Message) -> Result<()>;
}

/// Writes each message as one line of JSON
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink for JsonLinesSink<W> {
    fn send(&mut self, message: &Message) -> Result<()> {
        let line = serde_json::to_string(message)?;
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.write_all(b"\n"))
            .and_then(|_| self.writer.flush())
            .with_context(|| format!("Failed to write {} message", message.action()))?;
        Ok(())
    }
}

/// Background collector: logs every message through `tracing`
#[derive(Debug, Default)]
pub struct TracingSink;

impl MessageSink for TracingSink {
    fn send(&mut self, message: &Message) -> Result<()> {
        match message {
            Message::LogData(record) => {
                info!(
                    "Captured <{}> \"{}\" ({}): {}",
                    record.tag_name,
                    record.text,
                    record.description.as_deref().unwrap_or("no description"),
                    serde_json::to_string(&record.selectors)?
                );
            }
            other => info!("Selection message: {}", other.action()),
        }
        Ok(())
    }
}

/// Sink that keeps every message, for hosts that inspect them afterwards
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub messages: Vec<Message>,
}

impl MessageSink for RecordingSink {
    fn send(&mut self, message: &Message) -> Result<()> {
        self.messages.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "messaging_test.rs"]
mod messaging_test;
