mod common;

use common::status_line;
use flightlog::{AUX_FILES, JournalError, SnapshotFile};
use std::fs;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tempfile::tempdir;

#[test]
fn test_aux_file_map_covers_the_stub_events() {
    let names: Vec<&str> = AUX_FILES.iter().map(|&(name, _)| name).collect();
    assert!(names.contains(&"Status"));
    assert!(names.contains(&"Market"));
    // ModuleInfo is the one case where event name and file name diverge.
    assert!(AUX_FILES.contains(&("ModuleInfo", "ModulesInfo.json")));
}

#[test]
fn test_read_event_decodes_the_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Status.json");
    fs::write(&path, status_line("2024-03-01T10:00:05Z")).unwrap();

    let file = SnapshotFile::new("Status", path, 10);
    let event = file.read_event().unwrap();
    assert_eq!(event.name(), "Status");
    assert_eq!(event.entity().get("legal_state").unwrap().as_str(), Some("Clean"));
}

#[test]
fn test_read_event_rejects_wrong_event_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Status.json");
    fs::write(&path, r#"{"timestamp":"2024-03-01T10:00:05Z","event":"Market"}"#).unwrap();

    let file = SnapshotFile::new("Status", path, 10);
    assert!(matches!(
        file.read_event(),
        Err(JournalError::Shape(_))
    ));
}

#[test]
fn test_missing_timestamp_backfills_from_mtime() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Status.json");
    fs::write(&path, r#"{"event":"Status","Flags":0}"#).unwrap();

    let file = SnapshotFile::new("Status", path.clone(), 10);
    let event = file.read_event().unwrap();

    let modified = fs::metadata(&path).unwrap().modified().unwrap();
    let expected = flightlog::Timestamp::from_system_time(modified);
    assert_eq!(event.timestamp(), expected);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let file = SnapshotFile::new("Status", dir.path().join("Status.json"), 10);
    assert!(matches!(file.read_event(), Err(JournalError::Io(_))));
}

#[test]
fn test_refresh_loop_fills_the_buffer_and_exits_on_disconnect() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Status.json");
    fs::write(&path, status_line("2024-03-01T10:00:05Z")).unwrap();

    let file = Arc::new(SnapshotFile::new("Status", path, 10));
    let (tx, rx) = mpsc::sync_channel::<()>(0);
    drop(tx);

    let worker = {
        let file = Arc::clone(&file);
        thread::spawn(move || file.refresh_loop(rx))
    };
    worker.join().unwrap();

    assert_eq!(file.buffer().lock().len(), 1);
}

#[test]
fn test_refresh_loop_survives_a_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Status.json");
    fs::write(&path, "{broken").unwrap();

    let file = Arc::new(SnapshotFile::new("Status", path, 10));
    let (tx, rx) = mpsc::sync_channel::<()>(0);
    drop(tx);

    let worker = {
        let file = Arc::clone(&file);
        thread::spawn(move || file.refresh_loop(rx))
    };
    worker.join().unwrap();

    assert!(file.buffer().lock().is_empty());
}
