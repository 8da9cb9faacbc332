use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A record failed a descriptor's shape contract during decoding.
///
/// Shape errors abort the offending record only; the journal stream keeps
/// going, the record is logged and skipped.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// A value failed a precheck, conversion, or validation for a claimed key.
    #[error("invalid value for key `{key}`: {reason}")]
    Invalid { key: String, reason: String },

    /// The record is not a JSON object at the top level.
    #[error("record is not a JSON object")]
    NotAnObject,

    /// The raw line is not valid JSON at all.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ShapeError {
    pub(crate) fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ShapeError::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Comparing values that have no defined order.
///
/// This is a programming contract violation, not something well-formed input
/// produces at runtime, so the fallible comparison APIs surface it loudly
/// instead of silently absorbing it into a boolean.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderingError {
    #[error("cannot order journal files in different directories")]
    DifferentDirectories,

    #[error("cannot order journal files with different tags")]
    DifferentTags,

    #[error("cannot order a journal file without a parseable rotation name")]
    Unnamed,

    #[error("cannot order events of different types (`{left}` vs `{right}`)")]
    DifferentEventTypes { left: String, right: String },
}

/// Errors raised while opening and tailing journal files.
#[derive(Debug, Error)]
pub enum JournalError {
    /// The first record of a log file is missing, incomplete, or not a
    /// `Fileheader`. Fatal for that file, as there is no substitute header
    /// worth guessing.
    #[error("missing or invalid Fileheader in `{path}`")]
    Header { path: PathBuf },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Errors raised while assembling and starting the ingestion pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No journal directory was given and none could be derived from the
    /// user's home directory.
    #[error("no journal directory available")]
    NoJournalDir,

    /// Subscribing to filesystem notifications failed.
    #[error(transparent)]
    Watch(#[from] notify::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
