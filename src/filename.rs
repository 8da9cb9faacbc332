//! Rotation-aware journal file names.
//!
//! The external process names its log files
//! `Journal<tag>.<YYMMDDHHmmSS>.<part>.log<suffix>`: a calendar timestamp for
//! the session, a rotation `part` counter within that session, an optional
//! session `tag`, and an optional trailing `suffix` (e.g. a compression
//! extension). Names that do not match the pattern are "unnamed"; they never
//! participate in ordering and are simply skipped as rotation candidates.

use crate::error::OrderingError;
use regex::Regex;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^
        Journal
        (?P<tag>\w*)\.
        (?P<year>\d{2,})
        (?P<month>0[1-9]|1[0-2])
        (?P<day>0[1-9]|[12]\d|3[01])
        (?P<hour>[01]\d|2[0-3])
        (?P<minute>[0-5]\d)
        (?P<second>[0-5]\d)
        \.(?P<part>0*[1-9]\d*)
        \.log
        (?P<suffix>\W.*)?
        $",
    )
    .unwrap()
});

/// A parsed rotation-aware journal file name.
///
/// Value object: rotation never mutates an instance, it produces a new one
/// via [`JournalFileName::with_part`]. Two-digit years are normalized to the
/// 2000s on construction and written back in short form by
/// [`JournalFileName::file_name`], so parse and format round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JournalFileName {
    dir: PathBuf,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub part: u32,
    pub tag: String,
    pub suffix: String,
}

impl JournalFileName {
    /// Parse a path whose final component follows the rotation naming scheme.
    ///
    /// Returns `None` for non-matching names; an unparsable name is not an
    /// error, it is just not a rotation file.
    pub fn parse(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let name = path.file_name()?.to_str()?;
        let caps = FILENAME_RE.captures(name)?;

        let year: u16 = caps["year"].parse().ok()?;
        Some(JournalFileName {
            dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            year: if year < 1900 { year + 2000 } else { year },
            month: caps["month"].parse().ok()?,
            day: caps["day"].parse().ok()?,
            hour: caps["hour"].parse().ok()?,
            minute: caps["minute"].parse().ok()?,
            second: caps["second"].parse().ok()?,
            part: caps["part"].parse().ok()?,
            tag: caps.name("tag").map_or(String::new(), |m| m.as_str().to_string()),
            suffix: caps
                .name("suffix")
                .map_or(String::new(), |m| m.as_str().to_string()),
        })
    }

    /// Format the file name (without directory), the inverse of [`parse`].
    ///
    /// Years in 2000..=2099 are written in two-digit short form; anything
    /// else is written in full.
    ///
    /// [`parse`]: JournalFileName::parse
    pub fn file_name(&self) -> String {
        let year = if (2000..=2099).contains(&self.year) {
            format!("{:02}", self.year % 100)
        } else {
            format!("{}", self.year)
        };
        format!(
            "Journal{tag}.{year}{month:02}{day:02}{hour:02}{minute:02}{second:02}.{part:02}.log{suffix}",
            tag = self.tag,
            month = self.month,
            day = self.day,
            hour = self.hour,
            minute = self.minute,
            second = self.second,
            part = self.part,
            suffix = self.suffix,
        )
    }

    /// The full path: parent directory joined with the formatted name.
    pub fn path(&self) -> PathBuf {
        self.dir.join(self.file_name())
    }

    /// The parent directory this name lives in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// A copy of this name with only `part` replaced, for the successor file
    /// within the same session.
    pub fn with_part(&self, part: u32) -> Self {
        JournalFileName {
            part,
            ..self.clone()
        }
    }

    /// Total order between names in the same directory and with the same tag.
    ///
    /// The comparison key is `(year, month, day, hour, minute, second, part)`.
    /// Comparing across directories or tags has no meaning and is an error.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, OrderingError> {
        if self.dir != other.dir {
            return Err(OrderingError::DifferentDirectories);
        }
        if self.tag != other.tag {
            return Err(OrderingError::DifferentTags);
        }
        Ok(self.sort_key().cmp(&other.sort_key()))
    }

    fn sort_key(&self) -> (u16, u8, u8, u8, u8, u8, u32) {
        (
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.part,
        )
    }
}

/// Order two optional parse results, treating `None` (an unparsable name) as
/// an error rather than an ordering.
pub fn try_cmp_parsed(
    left: Option<&JournalFileName>,
    right: Option<&JournalFileName>,
) -> Result<Ordering, OrderingError> {
    match (left, right) {
        (Some(l), Some(r)) => l.try_cmp(r),
        _ => Err(OrderingError::Unnamed),
    }
}

/// Scan a journal directory for the latest untagged, unsuffixed rotation file.
///
/// This selects the initial active file at startup: the greatest rotation
/// name by `(timestamp, part)` among plain `Journal.<ts>.<part>.log` entries.
/// Returns `Ok(None)` when no valid candidate exists.
pub fn scan_latest(dir: impl AsRef<Path>) -> io::Result<Option<JournalFileName>> {
    let mut latest: Option<JournalFileName> = None;

    for entry in fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let Some(candidate) = JournalFileName::parse(entry.path()) else {
            continue;
        };
        if !candidate.tag.is_empty() || !candidate.suffix.is_empty() {
            continue;
        }
        // Same directory and tag by construction, so the comparison cannot fail.
        latest = match latest.take() {
            Some(best) if candidate.try_cmp(&best) != Ok(Ordering::Greater) => Some(best),
            _ => Some(candidate),
        };
    }

    Ok(latest)
}
