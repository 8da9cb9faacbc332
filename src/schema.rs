//! Declarative schema and attribute descriptors.
//!
//! A [`Schema`] is a named, ordered list of [`FieldDescriptor`]s, built once
//! at startup and consumed by a generic decode/encode engine. Each descriptor
//! maps one logical field to the wire key (or keys) it claims, carries the
//! declared [`FieldKind`], and optionally hooks the pipeline with a custom
//! precheck, convert, validate, or revert closure. Schemas compose by
//! inheritance: a derived schema starts from its parent's descriptor list and
//! overrides by field name, keeping the parent's position.
//!
//! Decoding pops every claimed key out of the incoming JSON object; whatever
//! is left over becomes the entity's residual, preserved verbatim for
//! round-trip fidelity.

use crate::entity::{DecodedEntity, FieldValue, Localised};
use crate::error::ShapeError;
use crate::timestamp::Timestamp;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub type JsonMap = serde_json::Map<String, Value>;

/// Cheap shape test run against the raw value before conversion.
pub type Precheck = Box<dyn Fn(&Value) -> bool + Send + Sync>;
/// Custom raw-to-typed conversion; errors become [`ShapeError`]s naming the key.
pub type Convert = Box<dyn Fn(Value) -> Result<FieldValue, String> + Send + Sync>;
/// Invariant check on the converted value.
pub type Validate = Box<dyn Fn(&FieldValue) -> bool + Send + Sync>;
/// Custom typed-to-raw serialization for the encode path.
pub type Revert = Box<dyn Fn(&FieldValue) -> Value + Send + Sync>;

/// The declared value type of a field, driving the default coercion matrix.
#[derive(Clone)]
pub enum FieldKind {
    /// A JSON string, kept as-is.
    Text,
    /// A string paired with its `<Key>_Localised` companion.
    Localised,
    /// Literal `true`/`false` only.
    Bool,
    /// A whole JSON number.
    Int,
    /// Any JSON number.
    Float,
    /// A canonical journal timestamp string.
    Timestamp,
    /// An array of exactly three numbers.
    Coords,
    /// A JSON object kept in wire form.
    Map,
    /// An array of strings.
    Strings,
    /// An arbitrary JSON array kept in wire form.
    Seq,
    /// A nested object decoded through another schema.
    Entity(Arc<Schema>),
    /// An array of objects, each decoded through another schema.
    EntitySeq(Arc<Schema>),
    /// Kept verbatim with no coercion.
    Raw,
}

/// The wire key (or keys) a descriptor claims from the incoming object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyClaim {
    /// One key, the common case.
    Single(String),
    /// A localized-string delegate: the plain key and its `_Localised` companion.
    Pair(String, String),
    /// A nested delegate that inlines another schema's keys into this flat
    /// namespace. The key list is expanded at build time.
    Flatten(Vec<String>),
}

/// What to do when a descriptor's claimed key(s) are absent from the input.
#[derive(Debug, Clone)]
pub enum FieldDefault {
    /// Omit the field entirely (distinct from present-but-empty).
    Absent,
    /// Materialize an empty collection of the declared kind.
    Empty,
    /// A fixed default value, run through the kind coercion.
    Value(Value),
    /// The current wall-clock time (timestamp fields only).
    Now,
}

/// One field of a schema: logical name, claimed wire key(s), declared kind,
/// default, and the optional hook closures.
pub struct FieldDescriptor {
    name: &'static str,
    claim: KeyClaim,
    kind: FieldKind,
    default: FieldDefault,
    precheck: Option<Precheck>,
    convert: Option<Convert>,
    validate: Option<Validate>,
    revert: Option<Revert>,
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("claim", &self.claim)
            .finish()
    }
}

impl FieldDescriptor {
    /// Create a descriptor with the wire key derived from the field name via
    /// [`field_to_key`], and the default implied by the kind (collections
    /// default to present-but-empty, everything else to absent).
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        let key = field_to_key(name);
        let claim = match kind {
            FieldKind::Localised => {
                let companion = format!("{key}_Localised");
                KeyClaim::Pair(key, companion)
            }
            _ => KeyClaim::Single(key),
        };
        let default = match kind {
            FieldKind::Map | FieldKind::Strings | FieldKind::Seq | FieldKind::EntitySeq(_) => {
                FieldDefault::Empty
            }
            _ => FieldDefault::Absent,
        };
        FieldDescriptor {
            name,
            claim,
            kind,
            default,
            precheck: None,
            convert: None,
            validate: None,
            revert: None,
        }
    }

    /// Override the claimed wire key (fixed-casing exceptions such as `FID`,
    /// or keys that do not follow the title-case convention).
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.claim = match self.kind {
            FieldKind::Localised => {
                let key = key.into();
                let companion = format!("{key}_Localised");
                KeyClaim::Pair(key, companion)
            }
            _ => KeyClaim::Single(key.into()),
        };
        self
    }

    /// Claim a whole set of wire keys as a nested delegate.
    pub fn flatten_keys(mut self, keys: Vec<String>) -> Self {
        self.claim = KeyClaim::Flatten(keys);
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = FieldDefault::Value(value);
        self
    }

    pub fn default_now(mut self) -> Self {
        self.default = FieldDefault::Now;
        self
    }

    pub fn precheck(mut self, f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.precheck = Some(Box::new(f));
        self
    }

    pub fn convert(
        mut self,
        f: impl Fn(Value) -> Result<FieldValue, String> + Send + Sync + 'static,
    ) -> Self {
        self.convert = Some(Box::new(f));
        self
    }

    pub fn validate(mut self, f: impl Fn(&FieldValue) -> bool + Send + Sync + 'static) -> Self {
        self.validate = Some(Box::new(f));
        self
    }

    pub fn revert(mut self, f: impl Fn(&FieldValue) -> Value + Send + Sync + 'static) -> Self {
        self.revert = Some(Box::new(f));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn claim(&self) -> &KeyClaim {
        &self.claim
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// True when this descriptor claims more than one wire key.
    pub fn is_delegate(&self) -> bool {
        !matches!(self.claim, KeyClaim::Single(_))
    }

    pub(crate) fn revert_value(&self, value: &FieldValue) -> Value {
        match &self.revert {
            Some(revert) => revert(value),
            None => value.to_wire(),
        }
    }

    fn decode_present(&self, key: &str, raw: Value) -> Result<FieldValue, ShapeError> {
        if let Some(precheck) = &self.precheck {
            if !precheck(&raw) {
                return Err(ShapeError::invalid(key, "precheck failed"));
            }
        }
        let value = match &self.convert {
            Some(convert) => convert(raw).map_err(|reason| ShapeError::invalid(key, reason))?,
            None => coerce(&self.kind, raw, key)?,
        };
        if let Some(validate) = &self.validate {
            if !validate(&value) {
                return Err(ShapeError::invalid(key, "validation failed"));
            }
        }
        Ok(value)
    }

    fn default_value_for_kind(&self) -> Result<Option<FieldValue>, ShapeError> {
        match &self.default {
            FieldDefault::Absent => Ok(None),
            FieldDefault::Empty => Ok(Some(match &self.kind {
                FieldKind::Map => FieldValue::Map(JsonMap::new()),
                FieldKind::Strings => FieldValue::Strings(Vec::new()),
                FieldKind::Seq => FieldValue::Seq(Vec::new()),
                FieldKind::EntitySeq(_) => FieldValue::Entities(Vec::new()),
                _ => return Ok(None),
            })),
            FieldDefault::Value(v) => {
                let key = match &self.claim {
                    KeyClaim::Single(k) | KeyClaim::Pair(k, _) => k.as_str(),
                    KeyClaim::Flatten(_) => self.name,
                };
                Ok(Some(coerce(&self.kind, v.clone(), key)?))
            }
            FieldDefault::Now => Ok(Some(FieldValue::Timestamp(Timestamp::now()))),
        }
    }
}

/// A named, ordered set of field descriptors.
///
/// Schemas are defined once at process start (see the `catalog` module) and
/// never mutated; they are shared behind `Arc` by every entity decoded
/// through them.
pub struct Schema {
    name: &'static str,
    fields: Vec<Arc<FieldDescriptor>>,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field(
                "fields",
                &self.fields.iter().map(|d| d.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Schema {
    /// Start a schema for a nested data structure.
    pub fn data(name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            name,
            fields: Vec::new(),
        }
    }

    /// Start a schema for a journal event.
    ///
    /// Seeds the `event` descriptor, which defaults to and is prechecked
    /// against the registered name, plus the `timestamp` descriptor, which
    /// defaults to the current time.
    pub fn event(name: &'static str) -> SchemaBuilder {
        let event_field = FieldDescriptor::new("event", FieldKind::Text)
            .key("event")
            .default_value(Value::String(name.to_string()))
            .precheck(move |v| v.as_str() == Some(name));
        SchemaBuilder {
            name,
            fields: Vec::new(),
        }
        .field(event_field)
        .field(timestamp_field())
    }

    /// The generic passthrough schema for unknown event names: claims only
    /// `event` and `timestamp`, everything else lands in the residual.
    pub fn passthrough() -> SchemaBuilder {
        SchemaBuilder {
            name: "Unknown",
            fields: Vec::new(),
        }
        .field(FieldDescriptor::new("event", FieldKind::Text).key("event"))
        .field(timestamp_field())
    }

    /// Start a schema that inherits all of `parent`'s descriptors.
    pub fn derive(name: &'static str, parent: &Arc<Schema>) -> SchemaBuilder {
        SchemaBuilder {
            name,
            fields: parent.fields.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().map(AsRef::as_ref)
    }

    /// Every wire key this schema claims, delegates expanded.
    pub fn wire_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for desc in &self.fields {
            match desc.claim() {
                KeyClaim::Single(k) => keys.push(k.clone()),
                KeyClaim::Pair(k, companion) => {
                    keys.push(k.clone());
                    keys.push(companion.clone());
                }
                KeyClaim::Flatten(nested) => keys.extend(nested.iter().cloned()),
            }
        }
        keys
    }

    /// The descriptor that claims `key`, if any.
    pub fn descriptor_for_key(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().map(AsRef::as_ref).find(|d| match d.claim() {
            KeyClaim::Single(k) => k == key,
            KeyClaim::Pair(k, companion) => k == key || companion == key,
            KeyClaim::Flatten(nested) => nested.iter().any(|k| k == key),
        })
    }

    /// Decode one JSON object into an entity of this schema.
    ///
    /// Every descriptor pops its claimed key(s) out of the object; leftovers
    /// become the residual. Shape failures abort this record only and name
    /// the offending key.
    pub fn decode(self: &Arc<Self>, mut raw: JsonMap) -> Result<DecodedEntity, ShapeError> {
        let mut fields: Vec<(&'static str, FieldValue)> = Vec::with_capacity(self.fields.len());

        for desc in &self.fields {
            match desc.claim() {
                KeyClaim::Single(key) => match raw.shift_remove(key) {
                    Some(value) => {
                        fields.push((desc.name, desc.decode_present(key, value)?));
                    }
                    None => {
                        if let Some(value) = desc.default_value_for_kind()? {
                            fields.push((desc.name, value));
                        }
                    }
                },
                KeyClaim::Pair(key, companion_key) => {
                    let plain = raw.shift_remove(key);
                    let companion = raw.shift_remove(companion_key);
                    match plain {
                        Some(Value::String(text)) => {
                            let localised = match companion {
                                Some(Value::String(s)) => Some(s),
                                Some(Value::Null) | None => None,
                                Some(other) => {
                                    return Err(ShapeError::invalid(
                                        companion_key,
                                        format!("expected a string, got {other}"),
                                    ));
                                }
                            };
                            let value = FieldValue::Localised(Localised::new(text, localised));
                            if let Some(validate) = &desc.validate {
                                if !validate(&value) {
                                    return Err(ShapeError::invalid(key, "validation failed"));
                                }
                            }
                            fields.push((desc.name, value));
                        }
                        Some(other) => {
                            return Err(ShapeError::invalid(
                                key,
                                format!("expected a string, got {other}"),
                            ));
                        }
                        None => {
                            if let Some(value) = desc.default_value_for_kind()? {
                                fields.push((desc.name, value));
                            }
                        }
                    }
                }
                KeyClaim::Flatten(keys) => {
                    let FieldKind::Entity(nested) = desc.kind() else {
                        return Err(ShapeError::invalid(
                            desc.name,
                            "flatten delegate without a nested schema",
                        ));
                    };
                    let mut sub = JsonMap::new();
                    for key in keys {
                        if let Some(value) = raw.shift_remove(key) {
                            sub.insert(key.clone(), value);
                        }
                    }
                    // A nested delegate is always materialized, possibly empty.
                    fields.push((desc.name, FieldValue::Entity(nested.decode(sub)?)));
                }
            }
        }

        Ok(DecodedEntity::new(Arc::clone(self), fields, raw))
    }
}

fn timestamp_field() -> FieldDescriptor {
    FieldDescriptor::new("timestamp", FieldKind::Timestamp)
        .key("timestamp")
        .default_now()
}

/// Builder for [`Schema`]. The typed helpers cover the coercion matrix; use
/// [`SchemaBuilder::field`] directly when a descriptor needs hooks.
pub struct SchemaBuilder {
    name: &'static str,
    fields: Vec<Arc<FieldDescriptor>>,
}

impl SchemaBuilder {
    /// Add a descriptor. A field with the same logical name as an inherited
    /// one overrides it in place.
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        let descriptor = Arc::new(descriptor);
        match self.fields.iter().position(|d| d.name == descriptor.name) {
            Some(i) => self.fields[i] = descriptor,
            None => self.fields.push(descriptor),
        }
        self
    }

    /// Merge every descriptor of another schema (mixin composition, e.g. the
    /// `market_id` base shared by all station events).
    pub fn inherit(mut self, other: &Arc<Schema>) -> Self {
        for desc in &other.fields {
            match self.fields.iter().position(|d| d.name == desc.name) {
                Some(i) => self.fields[i] = Arc::clone(desc),
                None => self.fields.push(Arc::clone(desc)),
            }
        }
        self
    }

    pub fn text(self, name: &'static str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Text))
    }

    pub fn text_key(self, name: &'static str, key: &str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Text).key(key))
    }

    pub fn localised(self, name: &'static str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Localised))
    }

    pub fn localised_key(self, name: &'static str, key: &str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Localised).key(key))
    }

    pub fn boolean(self, name: &'static str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Bool))
    }

    pub fn boolean_key(self, name: &'static str, key: &str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Bool).key(key))
    }

    pub fn int(self, name: &'static str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Int))
    }

    pub fn int_key(self, name: &'static str, key: &str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Int).key(key))
    }

    pub fn float(self, name: &'static str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Float))
    }

    pub fn float_key(self, name: &'static str, key: &str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Float).key(key))
    }

    pub fn timestamp(self, name: &'static str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Timestamp))
    }

    pub fn coords(self, name: &'static str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Coords))
    }

    pub fn map(self, name: &'static str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Map))
    }

    pub fn map_key(self, name: &'static str, key: &str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Map).key(key))
    }

    pub fn strings(self, name: &'static str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Strings))
    }

    pub fn strings_key(self, name: &'static str, key: &str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Strings).key(key))
    }

    pub fn seq(self, name: &'static str) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Seq))
    }

    /// A nested object under a single wire key.
    pub fn entity(self, name: &'static str, schema: &Arc<Schema>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Entity(Arc::clone(schema))))
    }

    pub fn entity_key(self, name: &'static str, key: &str, schema: &Arc<Schema>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::Entity(Arc::clone(schema))).key(key))
    }

    /// An array of nested objects under a single wire key.
    pub fn entities(self, name: &'static str, schema: &Arc<Schema>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::EntitySeq(Arc::clone(schema))))
    }

    pub fn entities_key(self, name: &'static str, key: &str, schema: &Arc<Schema>) -> Self {
        self.field(FieldDescriptor::new(name, FieldKind::EntitySeq(Arc::clone(schema))).key(key))
    }

    /// A nested delegate: inline every wire key of `schema` into this schema's
    /// flat key namespace.
    pub fn flatten(self, name: &'static str, schema: &Arc<Schema>) -> Self {
        let keys = schema.wire_keys();
        self.field(
            FieldDescriptor::new(name, FieldKind::Entity(Arc::clone(schema))).flatten_keys(keys),
        )
    }

    /// Finish the schema.
    ///
    /// # Panics
    ///
    /// Panics when two descriptors claim the same wire key; schemas are
    /// built once at startup, so a collision is a definition bug, not a
    /// runtime condition.
    pub fn build(self) -> Arc<Schema> {
        let schema = Schema {
            name: self.name,
            fields: self.fields,
        };
        let mut seen = std::collections::HashSet::new();
        for key in schema.wire_keys() {
            assert!(
                seen.insert(key.clone()),
                "schema `{}` claims wire key `{}` twice",
                schema.name,
                key
            );
        }
        Arc::new(schema)
    }
}

fn coerce(kind: &FieldKind, raw: Value, key: &str) -> Result<FieldValue, ShapeError> {
    match kind {
        FieldKind::Text => match raw {
            Value::String(s) => Ok(FieldValue::Text(s)),
            other => Err(ShapeError::invalid(key, format!("expected a string, got {other}"))),
        },
        FieldKind::Localised => match raw {
            Value::String(s) => Ok(FieldValue::Localised(Localised::new(s, None))),
            other => Err(ShapeError::invalid(key, format!("expected a string, got {other}"))),
        },
        FieldKind::Bool => match raw {
            Value::Bool(b) => Ok(FieldValue::Bool(b)),
            other => Err(ShapeError::invalid(key, format!("expected true or false, got {other}"))),
        },
        FieldKind::Int => match raw.as_i64() {
            Some(i) => Ok(FieldValue::Int(i)),
            None => Err(ShapeError::invalid(key, format!("expected a whole number, got {raw}"))),
        },
        FieldKind::Float => match raw.as_f64() {
            Some(f) => Ok(FieldValue::Float(f)),
            None => Err(ShapeError::invalid(key, format!("expected a number, got {raw}"))),
        },
        FieldKind::Timestamp => match raw {
            Value::String(s) => Timestamp::parse(&s)
                .map(FieldValue::Timestamp)
                .map_err(|e| ShapeError::invalid(key, e.to_string())),
            other => Err(ShapeError::invalid(key, format!("expected a timestamp string, got {other}"))),
        },
        FieldKind::Coords => {
            let Value::Array(items) = raw else {
                return Err(ShapeError::invalid(key, "expected an array of three numbers"));
            };
            if items.len() != 3 {
                return Err(ShapeError::invalid(key, "expected exactly three coordinates"));
            }
            let mut coords = [0.0f64; 3];
            for (slot, item) in coords.iter_mut().zip(&items) {
                *slot = item
                    .as_f64()
                    .ok_or_else(|| ShapeError::invalid(key, format!("non-numeric coordinate {item}")))?;
            }
            Ok(FieldValue::Coords(coords))
        }
        FieldKind::Map => match raw {
            Value::Object(m) => Ok(FieldValue::Map(m)),
            other => Err(ShapeError::invalid(key, format!("expected an object, got {other}"))),
        },
        FieldKind::Strings => {
            let Value::Array(items) = raw else {
                return Err(ShapeError::invalid(key, "expected an array of strings"));
            };
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => out.push(s),
                    other => {
                        return Err(ShapeError::invalid(key, format!("expected a string, got {other}")));
                    }
                }
            }
            Ok(FieldValue::Strings(out))
        }
        FieldKind::Seq => match raw {
            Value::Array(items) => Ok(FieldValue::Seq(items)),
            other => Err(ShapeError::invalid(key, format!("expected an array, got {other}"))),
        },
        FieldKind::Entity(schema) => match raw {
            Value::Object(m) => Ok(FieldValue::Entity(schema.decode(m)?)),
            other => Err(ShapeError::invalid(key, format!("expected an object, got {other}"))),
        },
        FieldKind::EntitySeq(schema) => {
            let Value::Array(items) = raw else {
                return Err(ShapeError::invalid(key, "expected an array of objects"));
            };
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(m) => out.push(schema.decode(m)?),
                    other => {
                        return Err(ShapeError::invalid(key, format!("expected an object, got {other}")));
                    }
                }
            }
            Ok(FieldValue::Entities(out))
        }
        FieldKind::Raw => Ok(FieldValue::Raw(raw)),
    }
}

/// Fixed-casing exceptions: words written all-caps on the wire.
const ACRONYMS: &[&str] = &["cqc", "fid", "id", "ls", "uss"];

/// Turn a logical field name (`lowercase_with_underscores`) into its wire key
/// (`TitleCase`, acronyms all-caps). Inverse of [`key_to_field`].
pub fn field_to_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for word in name.split('_').filter(|w| !w.is_empty()) {
        if ACRONYMS.contains(&word.to_ascii_lowercase().as_str()) {
            key.push_str(&word.to_ascii_uppercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                if first.is_uppercase() {
                    key.push_str(word);
                } else {
                    key.extend(first.to_uppercase());
                    key.push_str(chars.as_str());
                }
            }
        }
    }
    key
}

/// Turn a wire key back into a logical field name. Inverse of
/// [`field_to_key`] for names built from lowercase words.
pub fn key_to_field(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    // Walk backwards, growing the current word while it stays uniformly
    // cased (all-lower, all-upper, or Title).
    let mut words: Vec<String> = Vec::new();
    let mut word: String = chars[chars.len() - 1].to_string();

    for &c in chars[..chars.len() - 1].iter().rev() {
        let candidate: String = std::iter::once(c).chain(word.chars()).collect();
        if is_uniform_case(&candidate) {
            word = candidate;
        } else {
            words.push(word.to_lowercase());
            word = c.to_string();
        }
    }
    words.push(word.to_lowercase());

    words.reverse();
    words.join("_")
}

fn is_uniform_case(word: &str) -> bool {
    let all_lower = word.chars().all(|c| !c.is_uppercase());
    let all_upper = word.chars().all(|c| !c.is_lowercase());
    let title = {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.is_uppercase() && chars.all(|c| !c.is_uppercase()),
            None => false,
        }
    };
    all_lower || all_upper || title
}
