pub mod catalog;

mod buffer;
mod enrich;
mod entity;
mod error;
mod event;
mod filename;
mod journal;
mod pipeline;
mod schema;
mod snapshot;
mod timestamp;
mod watch;

pub use buffer::{DEFAULT_BACKLOG, SharedBuffer, SnapshotBuffer};
pub use enrich::{ENRICH_TIMEOUT, enrich};
pub use entity::{DecodedEntity, FieldValue, Localised};
pub use error::{JournalError, OrderingError, PipelineError, ShapeError};
pub use event::{Event, EventRegistry};
pub use filename::{JournalFileName, scan_latest, try_cmp_parsed};
pub use journal::{FileHeader, JournalReader};
pub use pipeline::{
    JOURNAL_CHANNEL_CAPACITY, Pipeline, PipelineBuilder, PipelineHandle, default_journal_dir,
};
pub use schema::{
    FieldDescriptor, FieldKind, JsonMap, Schema, SchemaBuilder, field_to_key, key_to_field,
};
pub use snapshot::{AUX_FILES, SnapshotFile};
pub use timestamp::Timestamp;
pub use watch::{FileWatchMultiplexer, spawn_watcher};
