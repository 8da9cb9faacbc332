//! Decoded entities: typed field values plus the residual of unclaimed keys.

use crate::schema::{JsonMap, KeyClaim, Schema};
use crate::timestamp::Timestamp;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A string carrying a companion human-readable form.
///
/// On the wire this is a pair of keys: the plain value and its
/// `<Key>_Localised` variant. When the companion is absent, it defaults to
/// the plain text itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localised {
    pub text: String,
    pub localised: String,
}

impl Localised {
    pub fn new(text: impl Into<String>, localised: Option<String>) -> Self {
        let text = text.into();
        let localised = localised.unwrap_or_else(|| text.clone());
        Localised { text, localised }
    }
}

impl fmt::Display for Localised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A typed field value produced by the coercion matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Localised(Localised),
    Bool(bool),
    Int(i64),
    Float(f64),
    Timestamp(Timestamp),
    Coords([f64; 3]),
    /// Key/value pairs kept in wire form.
    Map(JsonMap),
    Strings(Vec<String>),
    /// An arbitrary array kept in wire form.
    Seq(Vec<Value>),
    Entity(DecodedEntity),
    Entities(Vec<DecodedEntity>),
    Raw(Value),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Localised(l) => Some(&l.text),
            _ => None,
        }
    }

    pub fn as_localised(&self) -> Option<&Localised> {
        match self {
            FieldValue::Localised(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&DecodedEntity> {
        match self {
            FieldValue::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_entities(&self) -> Option<&[DecodedEntity]> {
        match self {
            FieldValue::Entities(e) => Some(e),
            _ => None,
        }
    }

    /// The default typed-to-raw serialization (descriptors may override it
    /// with a custom revert closure).
    pub fn to_wire(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Localised(l) => Value::String(l.text.clone()),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::Float(f) => Value::from(*f),
            FieldValue::Timestamp(t) => Value::String(t.to_journal_string()),
            FieldValue::Coords(c) => Value::from(c.to_vec()),
            FieldValue::Map(m) => Value::Object(m.clone()),
            FieldValue::Strings(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            FieldValue::Seq(items) => Value::Array(items.clone()),
            FieldValue::Entity(e) => Value::Object(e.encode()),
            FieldValue::Entities(items) => {
                Value::Array(items.iter().map(|e| Value::Object(e.encode())).collect())
            }
            FieldValue::Raw(v) => v.clone(),
        }
    }
}

/// An instance of a [`Schema`]: typed fields keyed by logical name, plus the
/// residual of wire keys no descriptor claimed.
///
/// Immutable after decoding; entities are freely shared across threads
/// without copying. The wire-view accessors ([`wire_get`],
/// [`DecodedEntity::encode`]) reconstruct the raw representation on demand,
/// with delegate fields re-expanded into their constituent keys and the
/// residual merged back in; iteration favors schema field order, then
/// residual order.
///
/// [`wire_get`]: DecodedEntity::wire_get
#[derive(Clone)]
pub struct DecodedEntity {
    schema: Arc<Schema>,
    fields: Vec<(&'static str, FieldValue)>,
    residual: JsonMap,
}

impl DecodedEntity {
    pub(crate) fn new(
        schema: Arc<Schema>,
        fields: Vec<(&'static str, FieldValue)>,
        residual: JsonMap,
    ) -> Self {
        DecodedEntity {
            schema,
            fields,
            residual,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Typed lookup by logical field name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Wire keys the input carried that no descriptor claimed.
    pub fn residual(&self) -> &JsonMap {
        &self.residual
    }

    /// Raw-view lookup by wire key, covering claimed keys (reverted through
    /// the owning descriptor) and residual entries.
    pub fn wire_get(&self, key: &str) -> Option<Value> {
        let Some(desc) = self.schema.descriptor_for_key(key) else {
            return self.residual.get(key).cloned();
        };
        let value = self.get(desc.name())?;
        match desc.claim() {
            KeyClaim::Single(_) => Some(desc.revert_value(value)),
            KeyClaim::Pair(plain, _) => {
                let localised = value.as_localised()?;
                if key == plain {
                    Some(Value::String(localised.text.clone()))
                } else {
                    Some(Value::String(localised.localised.clone()))
                }
            }
            KeyClaim::Flatten(_) => value.as_entity()?.wire_get(key),
        }
    }

    pub fn wire_contains(&self, key: &str) -> bool {
        self.wire_get(key).is_some()
    }

    /// Every wire key this entity exposes, schema order first, then residual.
    pub fn wire_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for desc in self.schema.fields() {
            let Some(value) = self.get(desc.name()) else {
                continue;
            };
            match desc.claim() {
                KeyClaim::Single(k) => keys.push(k.clone()),
                KeyClaim::Pair(k, companion) => {
                    keys.push(k.clone());
                    keys.push(companion.clone());
                }
                KeyClaim::Flatten(_) => {
                    if let Some(entity) = value.as_entity() {
                        keys.extend(entity.wire_keys());
                    }
                }
            }
        }
        keys.extend(self.residual.keys().cloned());
        keys
    }

    pub fn wire_len(&self) -> usize {
        self.wire_keys().len()
    }

    /// Rebuild the raw JSON object: the inverse of decoding.
    ///
    /// Delegate fields expand back into their constituent keys, every other
    /// field goes through its descriptor's revert, and the residual is merged
    /// in last. Satisfies `decode(encode(decode(x))) == decode(x)`.
    pub fn encode(&self) -> JsonMap {
        let mut out = JsonMap::new();
        for desc in self.schema.fields() {
            let Some(value) = self.get(desc.name()) else {
                continue;
            };
            match desc.claim() {
                KeyClaim::Single(key) => {
                    out.insert(key.clone(), desc.revert_value(value));
                }
                KeyClaim::Pair(key, companion) => {
                    if let Some(localised) = value.as_localised() {
                        out.insert(key.clone(), Value::String(localised.text.clone()));
                        out.insert(companion.clone(), Value::String(localised.localised.clone()));
                    }
                }
                KeyClaim::Flatten(_) => {
                    if let Some(entity) = value.as_entity() {
                        out.extend(entity.encode());
                    }
                }
            }
        }
        for (key, value) in &self.residual {
            out.insert(key.clone(), value.clone());
        }
        out
    }
}

impl PartialEq for DecodedEntity {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema)
            && self.fields == other.fields
            && self.residual == other.residual
    }
}

impl fmt::Debug for DecodedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct(self.schema.name());
        for (name, value) in &self.fields {
            dbg.field(name, value);
        }
        if !self.residual.is_empty() {
            dbg.field("residual", &self.residual);
        }
        dbg.finish()
    }
}
