//! Second-resolution event timestamps with the journal's canonical text form.

use chrono::{DateTime, SubsecRound, Utc};
use std::fmt;
use std::time::SystemTime;

/// The canonical journal timestamp format: ISO-8601, UTC, no fractional
/// seconds (`2020-05-09T16:35:40Z`).
const JOURNAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// An event timestamp.
///
/// Journal records carry timestamps with second resolution; anything finer is
/// truncated away on construction so that equality between a log event and
/// its snapshot counterpart is exact. The canonical text encoding round-trips
/// through [`Timestamp::parse`] / [`Timestamp::to_journal_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parse a journal timestamp string.
    ///
    /// Accepts any RFC 3339 timestamp, converts it to UTC, and truncates
    /// sub-second precision.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let dt = DateTime::parse_from_rfc3339(s)?;
        Ok(Timestamp(dt.with_timezone(&Utc).trunc_subsecs(0)))
    }

    /// The current wall-clock time, truncated to whole seconds.
    pub fn now() -> Self {
        Timestamp(Utc::now().trunc_subsecs(0))
    }

    /// Build a timestamp from a filesystem time (used as the fallback when a
    /// header or snapshot file carries no `timestamp` field).
    pub fn from_system_time(t: SystemTime) -> Self {
        Timestamp(DateTime::<Utc>::from(t).trunc_subsecs(0))
    }

    /// The canonical text encoding: ISO-8601, UTC, no fractional seconds.
    pub fn to_journal_string(&self) -> String {
        self.0.format(JOURNAL_FORMAT).to_string()
    }

    /// The underlying UTC instant.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_journal_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.trunc_subsecs(0))
    }
}
