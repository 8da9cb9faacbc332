mod common;

use common::{HEADER, journal_name, music_line, write_lines};
use flightlog::{FileWatchMultiplexer, spawn_watcher};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;
use tempfile::tempdir;

fn mux_with(
    snapshot_paths: &[PathBuf],
    journal_capacity: usize,
) -> (
    FileWatchMultiplexer,
    Vec<mpsc::Receiver<()>>,
    mpsc::Receiver<PathBuf>,
) {
    let mut channels = HashMap::new();
    let mut receivers = Vec::new();
    for path in snapshot_paths {
        // Capacity 1 here stands in for a rendezvous with a waiting
        // refresher thread.
        let (tx, rx) = mpsc::sync_channel(1);
        channels.insert(path.clone(), tx);
        receivers.push(rx);
    }
    let (journal_tx, journal_rx) = mpsc::sync_channel(journal_capacity);
    (
        FileWatchMultiplexer::new(channels, journal_tx),
        receivers,
        journal_rx,
    )
}

#[test]
fn test_snapshot_paths_get_signals() {
    let status = PathBuf::from("/journals/Status.json");
    let (mux, receivers, journal_rx) = mux_with(std::slice::from_ref(&status), 4);

    mux.dispatch([status]);

    assert!(receivers[0].try_recv().is_ok());
    assert!(journal_rx.try_recv().is_err());
}

#[test]
fn test_signal_bursts_collapse() {
    let status = PathBuf::from("/journals/Status.json");
    let (mux, receivers, _journal_rx) = mux_with(std::slice::from_ref(&status), 4);

    // Three rewrites in one batch: the refresher needs exactly one wake-up.
    mux.dispatch([status.clone(), status.clone(), status]);

    assert!(receivers[0].try_recv().is_ok());
    assert!(receivers[0].try_recv().is_err());
}

#[test]
fn test_only_latest_rotation_name_reaches_reader() {
    let (mux, _receivers, journal_rx) = mux_with(&[], 4);

    mux.dispatch([
        PathBuf::from("/journals").join(journal_name(1)),
        PathBuf::from("/journals").join(journal_name(3)),
        PathBuf::from("/journals").join(journal_name(2)),
    ]);

    assert_eq!(
        journal_rx.try_recv().unwrap(),
        PathBuf::from("/journals").join(journal_name(3))
    );
    assert!(journal_rx.try_recv().is_err());
}

#[test]
fn test_tagged_and_unparsable_paths_are_dropped() {
    let (mux, _receivers, journal_rx) = mux_with(&[], 4);

    mux.dispatch([
        PathBuf::from("/journals/JournalBeta.240301100000.01.log"),
        PathBuf::from("/journals/notes.txt"),
    ]);

    assert!(journal_rx.try_recv().is_err());
}

#[test]
fn test_full_journal_channel_drops_notification() {
    let (mux, _receivers, journal_rx) = mux_with(&[], 1);

    mux.dispatch([PathBuf::from("/journals").join(journal_name(1))]);
    // Second dispatch finds the channel full and drops the path.
    mux.dispatch([PathBuf::from("/journals").join(journal_name(2))]);

    assert!(journal_rx.try_recv().is_ok());
    assert!(journal_rx.try_recv().is_err());
}

#[test]
fn test_watcher_reports_new_journal_files() {
    let dir = tempdir().unwrap();
    let (mux, _receivers, journal_rx) = mux_with(&[], 16);
    let _watcher = spawn_watcher(dir.path(), mux).unwrap();

    write_lines(
        &dir.path().join(journal_name(1)),
        &[HEADER, &music_line("2024-03-01T10:00:01Z")],
    );

    match journal_rx.recv_timeout(Duration::from_secs(5)) {
        Ok(path) => assert_eq!(path, dir.path().join(journal_name(1))),
        Err(RecvTimeoutError::Timeout) => panic!("no notification within 5s"),
        Err(e) => panic!("watch channel failed: {e}"),
    }
}
