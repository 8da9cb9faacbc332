//! Auxiliary snapshot files and the refresher loop that tails them.
//!
//! Alongside the rotating journal, the producer maintains a handful of
//! files it rewrites wholesale whenever the corresponding subsystem
//! changes. Each one holds a single JSON object shaped like a journal
//! record. A refresher thread re-reads its file on every change signal and
//! feeds the decoded event into a [`SharedBuffer`] for enrichment lookups.

use crate::buffer::SharedBuffer;
use crate::error::{JournalError, ShapeError};
use crate::event::{Event, EventRegistry};
use crate::timestamp::Timestamp;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

/// The snapshot files the producer maintains, keyed by the journal event
/// name each one corresponds to.
pub const AUX_FILES: &[(&str, &str)] = &[
    ("Cargo", "Cargo.json"),
    ("Market", "Market.json"),
    ("ModuleInfo", "ModulesInfo.json"),
    ("NavRoute", "NavRoute.json"),
    ("Outfitting", "Outfitting.json"),
    ("Shipyard", "Shipyard.json"),
    ("Status", "Status.json"),
];

/// One auxiliary file: its path, the event name it must carry, and the
/// buffer its refresher feeds.
#[derive(Debug)]
pub struct SnapshotFile {
    event_name: &'static str,
    path: PathBuf,
    buffer: SharedBuffer,
}

impl SnapshotFile {
    pub fn new(event_name: &'static str, path: PathBuf, backlog: usize) -> Self {
        SnapshotFile {
            event_name,
            path,
            buffer: SharedBuffer::new(backlog),
        }
    }

    pub fn event_name(&self) -> &'static str {
        self.event_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    /// Reads and decodes the file's current contents.
    ///
    /// The record must name the expected event. A missing `timestamp` is
    /// backfilled from the file's modification time, matching how the
    /// producer treats these files as point-in-time state.
    pub fn read_event(&self) -> Result<Event, JournalError> {
        let raw = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&raw).map_err(ShapeError::from)?;
        let Value::Object(mut record) = value else {
            return Err(ShapeError::NotAnObject.into());
        };

        match record.get("event").and_then(Value::as_str) {
            Some(name) if name == self.event_name => {}
            _ => {
                return Err(ShapeError::invalid(
                    "event",
                    format!("expected {:?}", self.event_name),
                )
                .into());
            }
        }

        if !record.contains_key("timestamp") {
            let modified = fs::metadata(&self.path)?.modified()?;
            record.insert(
                "timestamp".to_string(),
                Value::from(Timestamp::from_system_time(modified).to_journal_string()),
            );
        }

        let event = EventRegistry::global().decode_object(record)?;
        Ok(event)
    }

    /// Runs until the signal channel disconnects.
    ///
    /// Change signals carry no payload and are collapsed: a burst of
    /// rewrites results in one read of the final contents. A failed read
    /// leaves the buffer untouched; the next signal retries.
    pub fn refresh_loop(&self, signals: Receiver<()>) {
        loop {
            while signals.try_recv().is_ok() {}

            match self.read_event() {
                Ok(event) => {
                    log::trace!("refreshed {} from {}", self.event_name, self.path.display());
                    self.buffer.insert(event);
                }
                Err(JournalError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("{} does not exist yet", self.path.display());
                }
                Err(e) => {
                    log::warn!("failed to refresh {}: {e}", self.path.display());
                }
            }

            if signals.recv().is_err() {
                return;
            }
        }
    }
}
