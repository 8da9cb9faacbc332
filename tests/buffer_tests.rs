mod common;

use common::{decode, status_line};
use flightlog::{Event, SnapshotBuffer, Timestamp};

fn status_at(second: u32) -> Event {
    decode(&status_line(&format!("2024-03-01T10:00:{second:02}Z")))
}

fn ts(second: u32) -> Timestamp {
    Timestamp::parse(&format!("2024-03-01T10:00:{second:02}Z")).unwrap()
}

#[test]
fn test_enqueue_keeps_newest_first() {
    let mut buffer = SnapshotBuffer::new(10);
    buffer.enqueue(status_at(1));
    buffer.enqueue(status_at(2));
    buffer.enqueue(status_at(3));

    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.find(ts(3)).unwrap().timestamp(), ts(3));
}

#[test]
fn test_enqueue_out_of_order_inserts_in_place() {
    let mut buffer = SnapshotBuffer::new(10);
    buffer.enqueue(status_at(1));
    buffer.enqueue(status_at(5));
    buffer.enqueue(status_at(3));

    // 3 is older than the head, so it slots behind 5.
    assert_eq!(buffer.find(ts(3)).unwrap().timestamp(), ts(3));
    assert_eq!(buffer.find(ts(5)).unwrap().timestamp(), ts(5));
}

#[test]
fn test_capacity_evicts_oldest() {
    let mut buffer = SnapshotBuffer::new(2);
    for second in 1..=5 {
        buffer.enqueue(status_at(second));
    }

    assert_eq!(buffer.len(), 3);
    // 1 and 2 were evicted; 3 survives as the oldest.
    assert!(buffer.find(ts(3)).is_some());
}

#[test]
fn test_find_exact_on_head() {
    let mut buffer = SnapshotBuffer::new(10);
    buffer.enqueue(status_at(5));

    assert_eq!(buffer.find(ts(5)).unwrap().timestamp(), ts(5));
    // Nothing newer than the head can ever arrive for an older request.
    assert!(buffer.find(ts(6)).is_none());
}

#[test]
fn test_find_older_than_head_returns_nearest_at_or_after() {
    let mut buffer = SnapshotBuffer::new(10);
    buffer.enqueue(status_at(2));
    buffer.enqueue(status_at(4));
    buffer.enqueue(status_at(6));

    // Exact hit below the head.
    assert_eq!(buffer.find(ts(4)).unwrap().timestamp(), ts(4));
    // Miss: the oldest entry at or after the request decides the outcome.
    assert_eq!(buffer.find(ts(3)).unwrap().timestamp(), ts(4));
}

#[test]
fn test_find_empty_buffer() {
    let buffer = SnapshotBuffer::new(10);
    assert!(buffer.find(ts(1)).is_none());
}

#[test]
fn test_purge_up_to_clears_at_or_before() {
    let mut buffer = SnapshotBuffer::new(10);
    for second in [2, 4, 6] {
        buffer.enqueue(status_at(second));
    }

    buffer.purge_up_to(ts(4));
    assert_eq!(buffer.len(), 1);
    assert!(buffer.find(ts(6)).is_some());

    buffer.purge_up_to(ts(9));
    assert!(buffer.is_empty());

    // Purging an empty buffer is a no-op.
    buffer.purge_up_to(ts(9));
    assert!(buffer.is_empty());
}
