//! Timeout-bounded replacement of a journal event with a snapshot event.
//!
//! A handful of journal records (`Cargo`, `Market`, `Status`, …) are stubs
//! whose full payload lands in a sibling snapshot file an instant before or
//! after the log line. When the timestamps match exactly, the snapshot event
//! carries strictly more data and stands in for the stub.

use crate::buffer::SharedBuffer;
use crate::event::Event;
use std::time::{Duration, Instant};

/// How long a journal event waits for its matching snapshot before giving up.
pub const ENRICH_TIMEOUT: Duration = Duration::from_secs(10);

/// Waits up to `timeout` for `buffer` to produce an event whose timestamp
/// equals the journal event's, and returns that snapshot event on a hit.
///
/// Every wake-up purges entries at or before the requested timestamp, so
/// the buffer only ever holds history that a later request could still use.
/// A miss or timeout hands back the original event unchanged; enrichment is
/// best effort, never a failure.
pub fn enrich(buffer: &SharedBuffer, event: Event, timeout: Duration) -> Event {
    let deadline = Instant::now() + timeout;
    let timestamp = event.timestamp();

    let mut guard = buffer.lock();
    loop {
        let candidate = guard.find(timestamp).cloned();
        guard.purge_up_to(timestamp);

        if let Some(candidate) = candidate {
            drop(guard);
            if candidate.timestamp() == timestamp {
                return candidate;
            }
            // A newer snapshot already exists, so the matching one will
            // never arrive. Keep the journal event.
            return event;
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return event;
        }
        (guard, _) = buffer.wait_timeout(guard, remaining);
    }
}
