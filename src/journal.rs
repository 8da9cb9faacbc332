//! The journal reader: opens the active log file, tails it line by line,
//! follows rotation, and emits decoded events downstream.
//!
//! The reader is a small state machine. It starts with no active file (or
//! the latest rotation name found on disk), tails the active file until a
//! `Continued` marker or an external replacement moves it to the next one,
//! and stops for good on a `Shutdown` record or when its notification
//! channel disconnects.

use crate::enrich;
use crate::error::JournalError;
use crate::event::{Event, EventRegistry};
use crate::filename::JournalFileName;
use crate::snapshot::SnapshotFile;
use crate::timestamp::Timestamp;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

/// The `Fileheader` record that must open every journal file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileHeader {
    pub timestamp: Option<String>,
    pub part: Option<u32>,
    pub language: Option<String>,
    #[serde(rename = "gameversion")]
    pub game_version: Option<String>,
    pub build: Option<String>,
}

/// Why tailing one file ended.
enum TailOutcome {
    /// A `Continued` marker or an external replacement named the next file.
    Rotated,
    /// A `Shutdown` record was emitted, or the notification source went away.
    Finished,
}

/// Reads a complete line at a time from a file that is still being written.
///
/// A partially written trailing line is held back until its newline
/// arrives, so a record is never decoded from half a write.
struct LineTail {
    reader: BufReader<File>,
    partial: String,
}

impl LineTail {
    fn open(path: &PathBuf) -> io::Result<Self> {
        Ok(LineTail {
            reader: BufReader::new(File::open(path)?),
            partial: String::new(),
        })
    }

    /// Returns the next complete line, or `None` at (possibly temporary)
    /// end of file.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let n = self.reader.read_line(&mut self.partial)?;
        if n == 0 || !self.partial.ends_with('\n') {
            return Ok(None);
        }

        let mut line = std::mem::take(&mut self.partial);
        line.truncate(line.trim_end().len());
        Ok(Some(line))
    }
}

/// Tails the rotating journal and pushes each decoded [`Event`] into a sink.
pub struct JournalReader {
    dir: PathBuf,
    current: Option<JournalFileName>,
    header: Option<FileHeader>,
    timestamp: Option<Timestamp>,
    snapshots: HashMap<&'static str, Arc<SnapshotFile>>,
    enrich_timeout: Duration,
}

impl JournalReader {
    pub fn new(
        dir: PathBuf,
        snapshots: HashMap<&'static str, Arc<SnapshotFile>>,
        enrich_timeout: Duration,
    ) -> Self {
        JournalReader {
            dir,
            current: None,
            header: None,
            timestamp: None,
            snapshots,
            enrich_timeout,
        }
    }

    /// Picks the greatest untagged rotation name on disk as the initial
    /// active file, if any exists.
    pub fn find_initial(&mut self) -> io::Result<()> {
        self.current = crate::filename::scan_latest(&self.dir)?;
        if let Some(current) = &self.current {
            log::debug!("initial journal file {}", current.path().display());
        }
        Ok(())
    }

    /// The active file's name, if the reader currently has one.
    pub fn current(&self) -> Option<&JournalFileName> {
        self.current.as_ref()
    }

    /// The header of the most recently opened file.
    pub fn header(&self) -> Option<&FileHeader> {
        self.header.as_ref()
    }

    /// When the most recently opened file's session started.
    pub fn session_started(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// Tails files until shutdown, feeding every decoded event to `sink`.
    ///
    /// `files` delivers the paths of changed rotation files; the reader
    /// blocks on it at end of file and whenever it has no active file. The
    /// loop ends cleanly when the channel disconnects or after forwarding a
    /// `Shutdown` record.
    pub fn run(
        &mut self,
        files: &Receiver<PathBuf>,
        sink: &mut dyn FnMut(Event),
    ) -> Result<(), JournalError> {
        loop {
            while self.current.is_none() {
                let Ok(path) = files.recv() else {
                    return Ok(());
                };
                match JournalFileName::parse(&path) {
                    Some(name) => self.current = Some(name),
                    None => log::warn!("ignoring unrecognized file {}", path.display()),
                }
            }

            match self.tail_current(files, sink)? {
                TailOutcome::Rotated => continue,
                TailOutcome::Finished => return Ok(()),
            }
        }
    }

    /// Tails the current file from the top until rotation or shutdown.
    fn tail_current(
        &mut self,
        files: &Receiver<PathBuf>,
        sink: &mut dyn FnMut(Event),
    ) -> Result<TailOutcome, JournalError> {
        // current is always set when this is called
        let path = match &self.current {
            Some(name) => name.path(),
            None => return Ok(TailOutcome::Finished),
        };
        log::info!("tailing {}", path.display());

        let mut tail = LineTail::open(&path)?;
        self.read_header(&mut tail, &path)?;

        loop {
            while let Some(line) = tail.next_line()? {
                if line.is_empty() {
                    continue;
                }

                let record: Value = match serde_json::from_str(&line) {
                    Ok(v) => v,
                    Err(e) => {
                        log::error!("skipping malformed journal line: {e}");
                        continue;
                    }
                };
                let Value::Object(record) = record else {
                    log::error!("skipping non-object journal line");
                    continue;
                };

                if record.get("event").and_then(Value::as_str) == Some("Continued") {
                    let part = record.get("part").and_then(Value::as_u64);
                    let Some(part) = part.and_then(|p| u32::try_from(p).ok()) else {
                        log::error!("Continued record without a usable part number");
                        continue;
                    };
                    if let Some(current) = &self.current {
                        self.current = Some(current.with_part(part));
                    }
                    return Ok(TailOutcome::Rotated);
                }

                let mut event = match EventRegistry::global().decode_object(record) {
                    Ok(event) => event,
                    Err(e) => {
                        log::warn!("skipping undecodable journal record: {e}");
                        continue;
                    }
                };

                if let Some(snapshot) = self.snapshots.get(event.name()) {
                    event = enrich::enrich(snapshot.buffer(), event, self.enrich_timeout);
                }

                if event.is_unknown() {
                    log::debug!("{event:?}");
                } else {
                    log::trace!("{event:?}");
                }

                let stop = event.is_shutdown();
                sink(event);
                if stop {
                    return Ok(TailOutcome::Finished);
                }
            }

            match self.wait_for_change(files)? {
                Some(outcome) => return Ok(outcome),
                None => continue,
            }
        }
    }

    /// Blocks at end of file until something changes.
    ///
    /// Bursts are coalesced by draining pending notifications without
    /// blocking. When the latest signal still names the open file, tailing
    /// resumes from where it left off (`None`); a different parseable name
    /// becomes the new active file.
    fn wait_for_change(
        &mut self,
        files: &Receiver<PathBuf>,
    ) -> Result<Option<TailOutcome>, JournalError> {
        let current_path = match &self.current {
            Some(name) => name.path(),
            None => return Ok(Some(TailOutcome::Finished)),
        };

        let Ok(mut path) = files.recv() else {
            return Ok(Some(TailOutcome::Finished));
        };

        loop {
            if path != current_path {
                match JournalFileName::parse(&path) {
                    Some(name) => {
                        log::info!("journal replaced by {}", path.display());
                        self.current = Some(name);
                        return Ok(Some(TailOutcome::Rotated));
                    }
                    None => {
                        log::warn!("ignoring unrecognized file {}", path.display());
                    }
                }
            }
            match files.try_recv() {
                Ok(next) => path = next,
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => return Ok(Some(TailOutcome::Finished)),
            }
        }
    }

    /// Reads and validates the `Fileheader` record that opens `path`.
    ///
    /// Anything else on the first line makes the file unusable; there is no
    /// sensible substitute header to guess.
    fn read_header(&mut self, tail: &mut LineTail, path: &PathBuf) -> Result<(), JournalError> {
        let header_error = || JournalError::Header { path: path.clone() };

        let line = tail.next_line()?.ok_or_else(header_error)?;
        let record: Value = serde_json::from_str(&line).map_err(|_| header_error())?;
        if record.get("event").and_then(Value::as_str) != Some("Fileheader") {
            return Err(header_error());
        }

        let header: FileHeader =
            serde_json::from_value(record).map_err(|_| header_error())?;

        self.timestamp = match header.timestamp.as_deref() {
            // A present but malformed timestamp fails the header rather than
            // being papered over with the file's age.
            Some(raw) => Some(Timestamp::parse(raw).map_err(|_| header_error())?),
            None => {
                // Untimestamped headers fall back to the file's own age.
                let modified = fs::metadata(path)?.modified()?;
                Some(Timestamp::from_system_time(modified))
            }
        };

        self.header = Some(header);
        Ok(())
    }
}
