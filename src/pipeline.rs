//! End-to-end assembly: snapshot refreshers, the journal reader, and the
//! filesystem watch that drives them both.
//!
//! The pipeline owns one thread per snapshot file plus one for the journal
//! reader, all fed by a single directory watch. Dropping the handle (or
//! calling [`PipelineHandle::shutdown`]) ends the watch subscription, which
//! disconnects every channel and winds the threads down deterministically.

use crate::buffer::DEFAULT_BACKLOG;
use crate::enrich::ENRICH_TIMEOUT;
use crate::error::PipelineError;
use crate::event::Event;
use crate::journal::JournalReader;
use crate::snapshot::{AUX_FILES, SnapshotFile};
use crate::watch::{self, FileWatchMultiplexer};
use notify::RecommendedWatcher;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Bound on journal change notifications queued while the reader is busy.
pub const JOURNAL_CHANNEL_CAPACITY: usize = 100;

/// Where the producer writes its journal on this machine, if a home
/// directory is known.
pub fn default_journal_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Saved Games/Frontier Developments/Elite Dangerous"))
}

/// Configures and starts a [`Pipeline`].
pub struct PipelineBuilder {
    dir: PathBuf,
    backlog: usize,
    enrich_timeout: Duration,
    notify_capacity: usize,
}

impl PipelineBuilder {
    /// Snapshot history kept per auxiliary file behind the newest entry.
    pub fn backlog(mut self, backlog: usize) -> Self {
        self.backlog = backlog;
        self
    }

    /// How long a journal event waits for its matching snapshot.
    pub fn enrich_timeout(mut self, timeout: Duration) -> Self {
        self.enrich_timeout = timeout;
        self
    }

    /// Capacity of the journal notification channel.
    pub fn notify_capacity(mut self, capacity: usize) -> Self {
        self.notify_capacity = capacity;
        self
    }

    /// Spawns the refresher threads and the reader, subscribes to the
    /// directory watch, and hands every decoded event to `sink` in file
    /// order.
    pub fn spawn<F>(self, mut sink: F) -> Result<PipelineHandle, PipelineError>
    where
        F: FnMut(Event) + Send + 'static,
    {
        let mut snapshot_channels = HashMap::new();
        let mut event_map = HashMap::new();
        let mut threads = Vec::new();

        for &(event_name, file_name) in AUX_FILES {
            let file = Arc::new(SnapshotFile::new(
                event_name,
                self.dir.join(file_name),
                self.backlog,
            ));

            // Rendezvous channel: a signal is either taken immediately by a
            // waiting refresher or dropped, so bursts collapse to one read.
            let (signal_tx, signal_rx) = mpsc::sync_channel(0);
            snapshot_channels.insert(file.path().to_path_buf(), signal_tx);
            event_map.insert(event_name, Arc::clone(&file));

            threads.push(
                thread::Builder::new()
                    .name(format!("refresh-{file_name}"))
                    .spawn(move || file.refresh_loop(signal_rx))?,
            );
        }

        let (journal_tx, journal_rx) = mpsc::sync_channel(self.notify_capacity);

        let mut reader = JournalReader::new(self.dir.clone(), event_map, self.enrich_timeout);
        reader.find_initial()?;

        threads.push(thread::Builder::new().name("journal-reader".into()).spawn(
            move || {
                if let Err(e) = reader.run(&journal_rx, &mut sink) {
                    log::error!("journal reader stopped: {e}");
                }
            },
        )?);

        let mux = FileWatchMultiplexer::new(snapshot_channels, journal_tx);
        let watcher = watch::spawn_watcher(&self.dir, mux)?;

        Ok(PipelineHandle {
            watcher: Some(watcher),
            threads,
        })
    }
}

/// The whole ingestion pipeline for one journal directory.
pub struct Pipeline;

impl Pipeline {
    /// Starts configuring a pipeline over `dir`.
    pub fn builder(dir: impl Into<PathBuf>) -> PipelineBuilder {
        PipelineBuilder {
            dir: dir.into(),
            backlog: DEFAULT_BACKLOG,
            enrich_timeout: ENRICH_TIMEOUT,
            notify_capacity: JOURNAL_CHANNEL_CAPACITY,
        }
    }

    /// Like [`Pipeline::builder`] with the platform's default journal
    /// directory.
    pub fn builder_default() -> Result<PipelineBuilder, PipelineError> {
        let dir = default_journal_dir().ok_or(PipelineError::NoJournalDir)?;
        Ok(Pipeline::builder(dir))
    }
}

/// A running pipeline. Keeps the watch subscription and worker threads
/// alive for as long as it is held.
pub struct PipelineHandle {
    watcher: Option<RecommendedWatcher>,
    threads: Vec<thread::JoinHandle<()>>,
}

impl PipelineHandle {
    /// Ends the watch subscription and joins every worker thread.
    ///
    /// The reader finishes the line it is on; an in-flight enrichment wait
    /// runs out on its own bounded timeout.
    pub fn shutdown(mut self) {
        self.watcher.take();
        for handle in self.threads.drain(..) {
            if handle.join().is_err() {
                log::error!("pipeline worker panicked during shutdown");
            }
        }
    }
}

impl Drop for PipelineHandle {
    fn drop(&mut self) {
        self.watcher.take();
    }
}
