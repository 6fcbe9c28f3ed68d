//! Untyped records and patches.

use heritage_core::Record;
use heritage_error::{StoreError, StoreErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ID_FIELD: &str = "id";

/// A flat JSON object carrying a string `id`.
///
/// Construction checks the id, so every `Document` in hand has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Document(Map<String, Value>);

impl Document {
    /// The record's primary key.
    pub fn id(&self) -> &str {
        // Checked at construction and never removed by `merge`.
        self.0.get(ID_FIELD).and_then(Value::as_str).unwrap_or_default()
    }

    /// Look up a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Borrow the underlying object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    ///
    /// A patch can replace a value (including with `null`) but never drops a
    /// field. The `id` key is skipped; ids are immutable.
    pub fn merge(&mut self, patch: &Patch) {
        for (field, value) in patch.fields() {
            if field == ID_FIELD {
                continue;
            }
            self.0.insert(field.clone(), value.clone());
        }
    }

    /// Serialize a typed record into a document.
    #[track_caller]
    pub fn from_record<R: Record>(record: &R) -> Result<Self, StoreError> {
        let value = serde_json::to_value(record).map_err(|e| {
            StoreError::new(StoreErrorKind::Format(format!(
                "record '{}' did not serialize: {}",
                record.id(),
                e
            )))
        })?;
        Self::try_from(value)
    }

    /// Deserialize this document into a typed record.
    #[track_caller]
    pub fn into_record<R: Record>(self) -> Result<R, StoreError> {
        let id = self.id().to_string();
        serde_json::from_value(Value::Object(self.0)).map_err(|e| {
            StoreError::new(StoreErrorKind::Format(format!(
                "record '{}' does not match the expected shape: {}",
                id, e
            )))
        })
    }
}

impl TryFrom<Map<String, Value>> for Document {
    type Error = StoreError;

    #[track_caller]
    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        match map.get(ID_FIELD) {
            Some(Value::String(_)) => Ok(Self(map)),
            Some(other) => Err(StoreError::new(StoreErrorKind::Format(format!(
                "record id must be a string, got {}",
                other
            )))),
            None => Err(StoreError::new(StoreErrorKind::Format(
                "record has no id".to_string(),
            ))),
        }
    }
}

impl TryFrom<Value> for Document {
    type Error = StoreError;

    #[track_caller]
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(StoreError::new(StoreErrorKind::Format(format!(
                "record must be a JSON object, got {}",
                other
            )))),
        }
    }
}

impl From<Document> for Map<String, Value> {
    fn from(document: Document) -> Self {
        document.0
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Value::Object(document.0)
    }
}

/// Fields to overwrite on an existing record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to the patch.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Build a patch from anything that serializes to a JSON object.
    ///
    /// Typed patches skip unset fields when serializing, so only the fields
    /// the caller supplied end up here.
    #[track_caller]
    pub fn from_serializable<T: Serialize + ?Sized>(patch: &T) -> Result<Self, StoreError> {
        match serde_json::to_value(patch) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(StoreError::new(StoreErrorKind::Format(format!(
                "patch must be a JSON object, got {}",
                other
            )))),
            Err(e) => Err(StoreError::new(StoreErrorKind::Format(format!(
                "patch did not serialize: {}",
                e
            )))),
        }
    }

    /// The fields carried by this patch.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Patch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
