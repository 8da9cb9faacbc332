mod common;

use common::{decode, status_line};
use flightlog::{Event, SharedBuffer, enrich};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn status_at(second: u32) -> Event {
    decode(&status_line(&format!("2024-03-01T10:00:{second:02}Z")))
}

fn stub_at(second: u32) -> Event {
    // What the journal itself carries for an aux-file event: name and
    // timestamp only, the payload lives in the snapshot file.
    decode(&format!(
        r#"{{"timestamp":"2024-03-01T10:00:{second:02}Z","event":"Status"}}"#
    ))
}

#[test]
fn test_exact_match_replaces_event() {
    let buffer = SharedBuffer::new(10);
    buffer.insert(status_at(5));

    let enriched = enrich(&buffer, stub_at(5), Duration::from_secs(1));
    assert_eq!(
        enriched.entity().get("flags").unwrap().as_int(),
        Some(16842765)
    );
}

#[test]
fn test_newer_snapshot_means_no_wait() {
    let buffer = SharedBuffer::new(10);
    buffer.insert(status_at(8));

    let started = Instant::now();
    let result = enrich(&buffer, stub_at(5), Duration::from_secs(5));
    // The matching snapshot can never arrive anymore, so the original
    // event comes back immediately.
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(result.entity().get("flags").is_none());
}

#[test]
fn test_timeout_falls_back_to_original() {
    let buffer = SharedBuffer::new(10);

    let started = Instant::now();
    let result = enrich(&buffer, stub_at(5), Duration::from_millis(50));
    assert!(started.elapsed() >= Duration::from_millis(50));
    assert!(result.entity().get("flags").is_none());
}

#[test]
fn test_waits_for_late_snapshot() {
    let buffer = Arc::new(SharedBuffer::new(10));

    let writer = {
        let buffer = Arc::clone(&buffer);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            buffer.insert(status_at(5));
        })
    };

    let enriched = enrich(&buffer, stub_at(5), Duration::from_secs(5));
    writer.join().unwrap();

    assert_eq!(
        enriched.entity().get("flags").unwrap().as_int(),
        Some(16842765)
    );
}

#[test]
fn test_enrichment_purges_consumed_history() {
    let buffer = SharedBuffer::new(10);
    buffer.insert(status_at(3));
    buffer.insert(status_at(5));

    let _ = enrich(&buffer, stub_at(5), Duration::from_secs(1));
    assert!(buffer.lock().is_empty());
}
