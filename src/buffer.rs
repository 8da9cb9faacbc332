//! Bounded, newest-first buffers of snapshot-derived events.
//!
//! Each auxiliary file keeps a small history of its most recent decoded
//! snapshots so that a journal line can be matched against a snapshot that
//! arrived slightly before or after it. The buffer is ordered newest-first
//! and capped, so lookups stay O(backlog) and memory stays flat no matter
//! how often the producer rewrites the file.

use crate::event::Event;
use crate::timestamp::Timestamp;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

/// Default number of historical snapshots kept behind the newest one.
pub const DEFAULT_BACKLOG: usize = 10;

/// A bounded ring of timestamped events, newest at the front.
#[derive(Debug)]
pub struct SnapshotBuffer {
    entries: VecDeque<Event>,
    capacity: usize,
}

impl SnapshotBuffer {
    pub fn new(backlog: usize) -> Self {
        let capacity = 1 + backlog;
        SnapshotBuffer {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an event, keeping the buffer sorted newest-first and dropping
    /// the oldest entry once full. Out-of-order arrivals take the slow path.
    pub fn enqueue(&mut self, event: Event) {
        match self.entries.front() {
            Some(head) if event.timestamp() < head.timestamp() => {}
            _ => {
                if self.entries.len() == self.capacity {
                    self.entries.pop_back();
                }
                self.entries.push_front(event);
                return;
            }
        }

        // Arrivals are almost always in order, so this stays rare.
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        let at = self
            .entries
            .iter()
            .position(|e| event.timestamp() >= e.timestamp())
            .unwrap_or(self.entries.len());
        self.entries.insert(at, event);
    }

    /// Looks up the entry that decides an exact-match request for
    /// `timestamp`.
    ///
    /// If the newest entry is at or before `timestamp`, only an exact hit on
    /// the head can ever satisfy the request (no newer snapshot exists yet).
    /// Otherwise the oldest entry at or after `timestamp` is returned; the
    /// caller compares timestamps to tell a hit from a miss.
    pub fn find(&self, timestamp: Timestamp) -> Option<&Event> {
        let head = self.entries.front()?;
        if timestamp >= head.timestamp() {
            return (timestamp == head.timestamp()).then_some(head);
        }

        self.entries
            .iter()
            .rev()
            .find(|e| timestamp <= e.timestamp())
    }

    /// Drops every entry at or before `timestamp`. Entries older than the
    /// floor can never satisfy a later exact-match request.
    pub fn purge_up_to(&mut self, timestamp: Timestamp) {
        match self.entries.front() {
            None => return,
            Some(head) if timestamp >= head.timestamp() => {
                self.entries.clear();
                return;
            }
            Some(_) => {}
        }

        while self
            .entries
            .back()
            .is_some_and(|e| timestamp >= e.timestamp())
        {
            self.entries.pop_back();
        }
    }
}

/// A [`SnapshotBuffer`] shared between its refresher thread and the journal
/// reader, with a condition variable guarding mutation and lookup as a
/// single critical section.
#[derive(Debug)]
pub struct SharedBuffer {
    inner: Mutex<SnapshotBuffer>,
    updated: Condvar,
}

impl SharedBuffer {
    pub fn new(backlog: usize) -> Self {
        SharedBuffer {
            inner: Mutex::new(SnapshotBuffer::new(backlog)),
            updated: Condvar::new(),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, SnapshotBuffer> {
        // A poisoned buffer still holds consistent data; keep going.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inserts an event and wakes every thread blocked in
    /// [`SharedBuffer::wait_timeout`].
    pub fn insert(&self, event: Event) {
        let mut buffer = self.lock();
        buffer.enqueue(event);
        self.updated.notify_all();
    }

    /// Releases the guard until the buffer changes or `timeout` elapses,
    /// then reacquires it.
    pub fn wait_timeout<'a>(
        &'a self,
        guard: MutexGuard<'a, SnapshotBuffer>,
        timeout: Duration,
    ) -> (MutexGuard<'a, SnapshotBuffer>, bool) {
        match self.updated.wait_timeout(guard, timeout) {
            Ok((guard, result)) => (guard, result.timed_out()),
            Err(poisoned) => {
                let (guard, result) = poisoned.into_inner();
                (guard, result.timed_out())
            }
        }
    }
}
