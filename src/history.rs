//! Capture history persisted in a small JSON key-value store

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::types::CapturedRecord;

/// Key the history array is stored under
pub const HISTORY_KEY: &str = "selectorHistory";

/// Maximum number of entries kept; the oldest are evicted first
pub const HISTORY_LIMIT: usize = 20;

const SNIPPET_LENGTH: usize = 50;

/// Named JSON values that survive between runs
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Store backed by one JSON object file
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.selprobe/storage.json`
    pub fn default_location() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Unable to determine home directory")?;
        Ok(Self::new(home_dir.join(".selprobe").join("storage.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store {}", self.path.display()))?;
        if json.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&json)
            .with_context(|| format!("Store {} is not a JSON object", self.path.display()))
    }

    fn write_all(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write store {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        // An unreadable file is replaced rather than blocking every write
        let mut entries = self.read_all().unwrap_or_else(|e| {
            warn!("Discarding unreadable store: {:#}", e);
            Map::new()
        });
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Discarding unreadable store: {:#}", e);
                return self.write_all(&Map::new());
            }
        };
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One past capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Capture time in milliseconds since the epoch
    pub id: i64,
    /// Capture time for display
    pub recorded_at: String,
    pub tag_name: String,
    pub text_snippet: String,
    /// Best selector, empty when none was found
    pub best_selector: String,
}

impl HistoryEntry {
    pub fn new(record: &CapturedRecord, now: DateTime<Utc>) -> Self {
        HistoryEntry {
            id: now.timestamp_millis(),
            recorded_at: now
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            tag_name: record.tag_name.clone(),
            text_snippet: record.text.chars().take(SNIPPET_LENGTH).collect(),
            best_selector: record.selectors.first().cloned().unwrap_or_default(),
        }
    }
}

/// Newest-first capture log kept under [`HISTORY_KEY`]
pub struct HistoryLog<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HistoryLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current entries, newest first; unreadable or corrupt history reads as empty
    pub fn load(&self) -> Vec<HistoryEntry> {
        let value = match self.store.get(HISTORY_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read history, treating it as empty: {:#}", e);
                return Vec::new();
            }
        };

        match serde_json::from_value(value) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Corrupt history, treating it as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Prepend a capture and evict beyond [`HISTORY_LIMIT`]
    pub fn record(&mut self, record: &CapturedRecord) -> Result<HistoryEntry> {
        self.push(HistoryEntry::new(record, record.captured_at))
    }

    pub fn push(&mut self, entry: HistoryEntry) -> Result<HistoryEntry> {
        let mut entries = self.load();
        entries.insert(0, entry.clone());
        entries.truncate(HISTORY_LIMIT);

        self.store
            .set(HISTORY_KEY, serde_json::to_value(&entries)?)
            .context("Failed to save history")?;
        debug!("History now holds {} entries", entries.len());
        Ok(entry)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store
            .remove(HISTORY_KEY)
            .context("Failed to clear history")?;
        info!("Cleared capture history");
        Ok(())
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;
