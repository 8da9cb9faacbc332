mod common;

use common::{HEADER, append_line, journal_name, music_line, write_lines};
use flightlog::{Event, JournalError, JournalReader, Timestamp};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

fn reader_for(dir: PathBuf) -> JournalReader {
    JournalReader::new(dir, HashMap::new(), Duration::from_millis(10))
}

fn run_to_completion(mut reader: JournalReader) -> Result<Vec<Event>, JournalError> {
    // No sender is kept, so the reader drains the files on disk and stops
    // at the first blocking wait.
    let (_tx, rx) = mpsc::sync_channel::<PathBuf>(1);
    drop(_tx);

    let mut events = Vec::new();
    reader.run(&rx, &mut |event| events.push(event))?;
    Ok(events)
}

#[test]
fn test_reads_events_in_file_order() {
    let dir = tempdir().unwrap();
    write_lines(
        &dir.path().join(journal_name(1)),
        &[
            HEADER,
            &music_line("2024-03-01T10:00:01Z"),
            &music_line("2024-03-01T10:00:02Z"),
            r#"{"timestamp":"2024-03-01T10:00:03Z","event":"Shutdown"}"#,
        ],
    );

    let mut reader = reader_for(dir.path().to_path_buf());
    reader.find_initial().unwrap();
    assert!(reader.current().is_some());

    let events = run_to_completion(reader).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].name(), "Music");
    assert!(events[2].is_shutdown());
}

#[test]
fn test_continued_marker_rotates_exactly_once() {
    let dir = tempdir().unwrap();
    write_lines(
        &dir.path().join(journal_name(1)),
        &[
            HEADER,
            &music_line("2024-03-01T10:00:01Z"),
            &music_line("2024-03-01T10:00:02Z"),
            r#"{"timestamp":"2024-03-01T10:00:03Z","event":"Continued","part":2}"#,
        ],
    );
    write_lines(
        &dir.path().join(journal_name(2)),
        &[
            HEADER,
            &music_line("2024-03-01T10:00:04Z"),
            r#"{"timestamp":"2024-03-01T10:00:05Z","event":"Shutdown"}"#,
        ],
    );

    // Startup would pick the greatest part; point the reader at part 1 by
    // feeding it through the channel instead.
    let (tx, rx) = mpsc::sync_channel(1);
    tx.send(dir.path().join(journal_name(1))).unwrap();

    let mut reader = reader_for(dir.path().to_path_buf());
    let mut events = Vec::new();
    reader.run(&rx, &mut |event| events.push(event)).unwrap();

    // The Continued marker itself is not emitted downstream.
    let names: Vec<&str> = events.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["Music", "Music", "Music", "Shutdown"]);
    let timestamps: Vec<String> = events.iter().map(|e| e.timestamp().to_string()).collect();
    assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(reader.current().unwrap().part, 2);
}

#[test]
fn test_header_is_parsed() {
    let dir = tempdir().unwrap();
    write_lines(
        &dir.path().join(journal_name(1)),
        &[HEADER, r#"{"timestamp":"2024-03-01T10:00:01Z","event":"Shutdown"}"#],
    );

    let mut reader = reader_for(dir.path().to_path_buf());
    reader.find_initial().unwrap();
    run_to_completion_inspect(&mut reader);

    let header = reader.header().unwrap();
    assert_eq!(header.part, Some(1));
    assert_eq!(header.language.as_deref(), Some("English/UK"));
    assert_eq!(header.game_version.as_deref(), Some("4.0.1.100"));
    assert_eq!(
        reader.session_started().unwrap().to_string(),
        "2024-03-01T10:00:00Z"
    );
}

fn run_to_completion_inspect(reader: &mut JournalReader) {
    let (_tx, rx) = mpsc::sync_channel::<PathBuf>(1);
    drop(_tx);
    reader.run(&rx, &mut |_| {}).unwrap();
}

#[test]
fn test_missing_header_is_fatal() {
    let dir = tempdir().unwrap();
    write_lines(
        &dir.path().join(journal_name(1)),
        &[&music_line("2024-03-01T10:00:01Z")],
    );

    let mut reader = reader_for(dir.path().to_path_buf());
    reader.find_initial().unwrap();

    let (_tx, rx) = mpsc::sync_channel::<PathBuf>(1);
    drop(_tx);
    let err = reader.run(&rx, &mut |_| {}).unwrap_err();
    assert!(matches!(err, JournalError::Header { .. }));
}

#[test]
fn test_malformed_header_timestamp_is_fatal() {
    let dir = tempdir().unwrap();
    write_lines(
        &dir.path().join(journal_name(1)),
        &[
            r#"{"timestamp":"yesterday-ish","event":"Fileheader","part":1,"language":"English/UK","gameversion":"4.0.1.100","build":"r308767"}"#,
            &music_line("2024-03-01T10:00:01Z"),
        ],
    );

    let mut reader = reader_for(dir.path().to_path_buf());
    reader.find_initial().unwrap();

    let (_tx, rx) = mpsc::sync_channel::<PathBuf>(1);
    drop(_tx);
    let err = reader.run(&rx, &mut |_| {}).unwrap_err();
    assert!(matches!(err, JournalError::Header { .. }));
}

#[test]
fn test_untimestamped_header_uses_file_age() {
    let dir = tempdir().unwrap();
    write_lines(
        &dir.path().join(journal_name(1)),
        &[
            r#"{"event":"Fileheader","part":1,"language":"English/UK","gameversion":"4.0.1.100","build":"r308767"}"#,
            r#"{"timestamp":"2024-03-01T10:00:01Z","event":"Shutdown"}"#,
        ],
    );

    let mut reader = reader_for(dir.path().to_path_buf());
    reader.find_initial().unwrap();
    run_to_completion_inspect(&mut reader);

    // The file was just written, so its age stands in for the session start.
    let started = reader.session_started().unwrap();
    assert!(started <= Timestamp::now());
}

#[test]
fn test_malformed_lines_are_skipped() {
    let dir = tempdir().unwrap();
    write_lines(
        &dir.path().join(journal_name(1)),
        &[
            HEADER,
            "{not json",
            &music_line("2024-03-01T10:00:01Z"),
            r#"{"timestamp":"2024-03-01T10:00:02Z","event":"Shutdown"}"#,
        ],
    );

    let mut reader = reader_for(dir.path().to_path_buf());
    reader.find_initial().unwrap();
    let events = run_to_completion(reader).unwrap();
    let names: Vec<&str> = events.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["Music", "Shutdown"]);
}

#[test]
fn test_unknown_events_are_forwarded() {
    let dir = tempdir().unwrap();
    write_lines(
        &dir.path().join(journal_name(1)),
        &[
            HEADER,
            r#"{"timestamp":"2024-03-01T10:00:01Z","event":"SomethingNew","Data":1}"#,
            r#"{"timestamp":"2024-03-01T10:00:02Z","event":"Shutdown"}"#,
        ],
    );

    let mut reader = reader_for(dir.path().to_path_buf());
    reader.find_initial().unwrap();
    let events = run_to_completion(reader).unwrap();
    assert_eq!(events.len(), 2);
    assert!(events[0].is_unknown());
}

#[test]
fn test_resumes_same_file_after_notification() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(journal_name(1));
    write_lines(&path, &[HEADER, &music_line("2024-03-01T10:00:01Z")]);

    let (tx, rx) = mpsc::sync_channel(4);
    let mut reader = reader_for(dir.path().to_path_buf());
    reader.find_initial().unwrap();

    let worker = thread::spawn(move || {
        let mut events = Vec::new();
        reader.run(&rx, &mut |event| events.push(event)).unwrap();
        events
    });

    // Reader hits end of file after the first event and blocks. Append
    // more, then name the same file to make it resume in place.
    thread::sleep(Duration::from_millis(50));
    append_line(&path, &music_line("2024-03-01T10:00:02Z"));
    append_line(&path, r#"{"timestamp":"2024-03-01T10:00:03Z","event":"Shutdown"}"#);
    tx.send(path.clone()).unwrap();

    let events = worker.join().unwrap();
    let names: Vec<&str> = events.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["Music", "Music", "Shutdown"]);
}

#[test]
fn test_waits_for_first_file_when_directory_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(journal_name(1));

    let mut reader = reader_for(dir.path().to_path_buf());
    reader.find_initial().unwrap();
    assert!(reader.current().is_none());

    let (tx, rx) = mpsc::sync_channel(1);
    let worker = thread::spawn(move || {
        let mut events = Vec::new();
        reader.run(&rx, &mut |event| events.push(event)).unwrap();
        events
    });

    thread::sleep(Duration::from_millis(50));
    write_lines(
        &path,
        &[
            HEADER,
            &music_line("2024-03-01T10:00:01Z"),
            r#"{"timestamp":"2024-03-01T10:00:02Z","event":"Shutdown"}"#,
        ],
    );
    tx.send(path).unwrap();

    let events = worker.join().unwrap();
    assert_eq!(events.len(), 2);
}
