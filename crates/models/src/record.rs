//! Records and their identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a record: integers for sequential collections, opaque
/// strings for UUID collections.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(u64),
    Str(String),
}

impl RecordId {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(RecordId::Int),
            Value::String(s) => Some(RecordId::Str(s.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Int(n) => Value::from(*n),
            RecordId::Str(s) => Value::String(s.clone()),
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            RecordId::Int(n) => Some(*n),
            RecordId::Str(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self { RecordId::Int(n) }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self { RecordId::Str(s.to_string()) }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self { RecordId::Str(s) }
}

/// How a collection hands out identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdStrategy {
    /// `max(existing) + 1`, starting at 1.
    Sequential,
    /// Random UUID v4 strings.
    Uuid,
}

impl IdStrategy {
    /// Coerce a path segment into an id of this strategy's shape.
    /// Returns `None` when the segment cannot name any record.
    pub fn parse_id(&self, raw: &str) -> Option<RecordId> {
        let raw = raw.trim();
        match self {
            IdStrategy::Sequential => raw.parse::<u64>().ok().map(RecordId::Int),
            IdStrategy::Uuid if raw.is_empty() => None,
            IdStrategy::Uuid => Some(RecordId::Str(raw.to_string())),
        }
    }
}

/// One stored entity: a JSON object that carries an `id` once persisted.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub const ID_FIELD: &'static str = "id";

    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value; `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.0.get(Self::ID_FIELD).and_then(RecordId::from_value)
    }

    pub fn has_id(&self, id: &RecordId) -> bool {
        self.id().as_ref() == Some(id)
    }

    /// Put `id` first so persisted documents read naturally.
    pub fn set_id(&mut self, id: &RecordId) {
        let mut map = Map::with_capacity(self.0.len() + 1);
        map.insert(Self::ID_FIELD.to_string(), id.to_value());
        for (k, v) in std::mem::take(&mut self.0) {
            if k != Self::ID_FIELD {
                map.insert(k, v);
            }
        }
        self.0 = map;
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.0.get_mut(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Shallow merge: supplied fields overwrite, others are retained.
    /// The `id` field is never overwritten.
    pub fn merge(&mut self, partial: &Map<String, Value>) {
        for (k, v) in partial {
            if k == Self::ID_FIELD {
                continue;
            }
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Copy without the given fields (used to hide secrets on output).
    pub fn without(&self, hidden: &[&str]) -> Record {
        let mut out = self.clone();
        for field in hidden {
            out.0.remove(*field);
        }
        out
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The ordered set of records of one resource type.
pub type Collection = Vec<Record>;
