//! Typed journal events and the process-wide event registry.

use crate::catalog;
use crate::entity::DecodedEntity;
use crate::error::{OrderingError, ShapeError};
use crate::schema::{JsonMap, Schema};
use crate::timestamp::Timestamp;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// One decoded journal record, identified by `(event name, timestamp)`.
///
/// Events of unknown names decode through a passthrough schema that claims
/// only `event` and `timestamp` and keeps everything else in the residual.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    entity: DecodedEntity,
}

impl Event {
    pub(crate) fn from_entity(entity: DecodedEntity) -> Self {
        Event { entity }
    }

    /// The wire event name. Empty for a passthrough record that carried no
    /// `event` key at all.
    pub fn name(&self) -> &str {
        self.entity
            .get("event")
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }

    /// The event timestamp. Every decoded event has one: records without a
    /// `timestamp` key default to the decode time.
    pub fn timestamp(&self) -> Timestamp {
        self.entity
            .get("timestamp")
            .and_then(|v| v.as_timestamp())
            .unwrap_or_else(Timestamp::now)
    }

    /// The decoded entity backing this event.
    pub fn entity(&self) -> &DecodedEntity {
        &self.entity
    }

    /// True when this event decoded through the passthrough schema because
    /// its name is not registered.
    pub fn is_unknown(&self) -> bool {
        Arc::ptr_eq(self.entity.schema(), EventRegistry::global().passthrough())
    }

    /// True for the terminal `Shutdown` marker.
    pub fn is_shutdown(&self) -> bool {
        self.name() == "Shutdown" && !self.is_unknown()
    }

    /// True for the `Continued` rotation marker.
    pub fn is_continued(&self) -> bool {
        self.name() == "Continued" && !self.is_unknown()
    }

    /// The successor part number carried by a `Continued` marker.
    pub fn continued_part(&self) -> Option<u32> {
        if !self.is_continued() {
            return None;
        }
        self.entity
            .get("part")
            .and_then(|v| v.as_int())
            .and_then(|i| u32::try_from(i).ok())
    }

    /// Equality between events of the identical concrete schema; comparing
    /// across schema types is a contract violation.
    pub fn try_eq(&self, other: &Self) -> Result<bool, OrderingError> {
        self.check_comparable(other)?;
        Ok(self.name() == other.name() && self.timestamp() == other.timestamp())
    }

    /// Ordering between events of the identical concrete schema, by
    /// timestamp; comparing across schema types is a contract violation.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, OrderingError> {
        self.check_comparable(other)?;
        if self.name() != other.name() {
            return Err(OrderingError::DifferentEventTypes {
                left: self.name().to_string(),
                right: other.name().to_string(),
            });
        }
        Ok(self.timestamp().cmp(&other.timestamp()))
    }

    fn check_comparable(&self, other: &Self) -> Result<(), OrderingError> {
        if Arc::ptr_eq(self.entity.schema(), other.entity.schema()) {
            Ok(())
        } else {
            Err(OrderingError::DifferentEventTypes {
                left: self.entity.schema().name().to_string(),
                right: other.entity.schema().name().to_string(),
            })
        }
    }
}

/// The process-wide mapping from wire event name to schema.
///
/// Built once, before any decoding begins, by the explicit registration list
/// in the `catalog` module; never mutated afterwards.
pub struct EventRegistry {
    schemas: HashMap<&'static str, Arc<Schema>>,
    passthrough: Arc<Schema>,
}

static GLOBAL: LazyLock<EventRegistry> = LazyLock::new(|| EventRegistry {
    schemas: catalog::registered_schemas(),
    passthrough: Schema::passthrough().build(),
});

impl EventRegistry {
    pub fn global() -> &'static EventRegistry {
        &GLOBAL
    }

    /// The schema registered for a wire event name.
    pub fn schema(&self, event_name: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(event_name)
    }

    /// The passthrough schema used for unknown event names.
    pub fn passthrough(&self) -> &Arc<Schema> {
        &self.passthrough
    }

    /// Registered event names (useful for diagnostics and tests).
    pub fn event_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schemas.keys().copied()
    }

    /// Decode one raw JSON object into an [`Event`].
    ///
    /// Unknown event names fall back to the passthrough schema instead of
    /// erroring; shape violations against a registered schema are errors.
    pub fn decode_object(&self, raw: JsonMap) -> Result<Event, ShapeError> {
        let schema = raw
            .get("event")
            .and_then(Value::as_str)
            .and_then(|name| self.schemas.get(name))
            .unwrap_or(&self.passthrough);
        schema.decode(raw).map(Event::from_entity)
    }

    /// Decode one journal line (a complete JSON object) into an [`Event`].
    pub fn decode_line(&self, line: &str) -> Result<Event, ShapeError> {
        let value: Value = serde_json::from_str(line)?;
        match value {
            Value::Object(raw) => self.decode_object(raw),
            _ => Err(ShapeError::NotAnObject),
        }
    }
}
