//! Fans raw filesystem notifications out to the consumers that own each
//! watched path.
//!
//! The OS watcher reports coalesced, sometimes spurious change batches for
//! the whole journal directory. The multiplexer turns each batch into at
//! most one wake-up per snapshot refresher plus at most one path for the
//! journal reader, dropping everything else on the floor.

use crate::filename::JournalFileName;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{SyncSender, TrySendError};

/// Routes changed paths to the per-file channels that care about them.
pub struct FileWatchMultiplexer {
    snapshot_channels: HashMap<PathBuf, SyncSender<()>>,
    journal_channel: SyncSender<PathBuf>,
}

impl FileWatchMultiplexer {
    pub fn new(
        snapshot_channels: HashMap<PathBuf, SyncSender<()>>,
        journal_channel: SyncSender<PathBuf>,
    ) -> Self {
        FileWatchMultiplexer {
            snapshot_channels,
            journal_channel,
        }
    }

    /// Dispatches one batch of changed paths.
    ///
    /// A path owned by a snapshot refresher wakes it with an empty signal;
    /// a full signal channel means a refresh is already pending, so the
    /// signal is dropped. Of the remaining paths, only untagged rotation
    /// names count, and only the greatest of them reaches the journal
    /// reader, since any earlier part is already stale.
    pub fn dispatch(&self, changed: impl IntoIterator<Item = PathBuf>) {
        let mut latest: Option<JournalFileName> = None;

        for path in changed {
            if let Some(signals) = self.snapshot_channels.get(&path) {
                match signals.try_send(()) {
                    Ok(()) | Err(TrySendError::Full(())) => {}
                    Err(TrySendError::Disconnected(())) => {
                        log::debug!("refresher for {} is gone", path.display());
                    }
                }
                continue;
            }

            let Some(name) = JournalFileName::parse(&path) else {
                continue;
            };
            if !name.tag.is_empty() {
                continue;
            }

            let newer = match &latest {
                None => true,
                Some(current) => matches!(name.try_cmp(current), Ok(Ordering::Greater)),
            };
            if newer {
                latest = Some(name);
            }
        }

        if let Some(name) = latest {
            match self.journal_channel.try_send(name.path()) {
                Ok(()) => {}
                Err(TrySendError::Full(path)) => {
                    log::warn!("journal notification backlog full, dropping {}", path.display());
                }
                Err(TrySendError::Disconnected(_)) => {
                    log::debug!("journal reader is gone");
                }
            }
        }
    }
}

/// Starts watching `dir` (non-recursively) and feeds every relevant change
/// batch through `mux`.
///
/// The returned watcher owns the subscription; dropping it ends delivery,
/// which in turn disconnects the per-file channels and winds down their
/// consumers.
pub fn spawn_watcher(
    dir: &Path,
    mux: FileWatchMultiplexer,
) -> notify::Result<RecommendedWatcher> {
    let mut watcher =
        notify::recommended_watcher(move |result: notify::Result<notify::Event>| match result {
            Ok(event) => {
                // Deleted files are of no interest to any consumer.
                if !matches!(event.kind, EventKind::Remove(_)) {
                    mux.dispatch(event.paths);
                }
            }
            Err(e) => log::error!("filesystem watch error: {e}"),
        })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
