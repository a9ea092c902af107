//! Typed log fields
//!
//! A [`Field`] is one `(key, value)` pair of a log call's payload. Every field
//! carries a [`FieldKind`] set when it is built, which is how the enrichment
//! core tells label contributions apart from ordinary fields.

use super::keys::{ERROR_KEY, LABEL_PREFIX};
use crate::fields::ErrorValue;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Discriminant separating label contributions from ordinary fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldKind {
    #[default]
    Generic,
    Label,
}

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Object(ObjectValue),
    Error(ErrorValue),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
            FieldValue::Object(obj) => write!(f, "{}", obj),
            FieldValue::Error(err) => write!(f, "{}", err.message()),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            FieldValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Object(obj) => obj.serialize(serializer),
            FieldValue::Error(err) => serializer.serialize_str(err.message()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<ObjectValue> for FieldValue {
    fn from(obj: ObjectValue) -> Self {
        FieldValue::Object(obj)
    }
}

impl From<ErrorValue> for FieldValue {
    fn from(err: ErrorValue) -> Self {
        FieldValue::Error(err)
    }
}

/// Ordered object with unique keys
///
/// Members are emitted in insertion order; inserting an existing key replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectValue {
    members: Vec<(String, FieldValue)>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Add a member (builder form)
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.members.iter_mut().find(|(k, _)| *k == key) {
            Some(member) => member.1 = value,
            None => self.members.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.members
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Serialize for ObjectValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.members.len()))?;
        for (key, value) in &self.members {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl fmt::Display for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .members
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>();
        write!(f, "{{{}}}", parts.join(" "))
    }
}

/// Value objects that render themselves as an ordered object
pub trait MarshalObject {
    fn marshal_object(&self) -> ObjectValue;
}

/// A single structured field of a log call
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub kind: FieldKind,
    pub value: FieldValue,
}

impl Field {
    /// Create an ordinary field
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self::with_kind(key, FieldKind::Generic, value)
    }

    pub(crate) fn with_kind<K, V>(key: K, kind: FieldKind, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            key: key.into(),
            kind,
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, FieldValue::Int(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, FieldValue::Float(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    /// Create a field holding a marshalled value object
    pub fn object<T: MarshalObject + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        Self::new(key, FieldValue::Object(value.marshal_object()))
    }

    /// Attach an error under the `error` key
    pub fn error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::named_error(ERROR_KEY, err)
    }

    pub fn named_error(key: impl Into<String>, err: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(key, FieldValue::Error(ErrorValue::from_error(err)))
    }

    /// Create a label field (`labels.<name>`)
    ///
    /// Label fields are never emitted verbatim; the enrichment core folds
    /// them into the single labels object of the entry.
    pub fn label(name: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self::with_kind(
            format!("{}{}", LABEL_PREFIX, name.as_ref()),
            FieldKind::Label,
            FieldValue::String(value.into()),
        )
    }

    pub fn is_label(&self) -> bool {
        self.kind == FieldKind::Label
    }

    /// Label name of a single label field, without the `labels.` prefix
    pub fn label_name(&self) -> Option<&str> {
        if !self.is_label() || self.value.as_str().is_none() {
            return None;
        }
        self.key.strip_prefix(LABEL_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_field() {
        let field = Field::label("key", "value");

        assert_eq!(field.key, "labels.key");
        assert_eq!(field.kind, FieldKind::Label);
        assert_eq!(field.value, FieldValue::String("value".to_string()));
        assert_eq!(field.label_name(), Some("key"));
    }

    #[test]
    fn test_prefixed_generic_field_is_not_a_label() {
        let field = Field::string("labels.key", "value");

        assert!(!field.is_label());
        assert_eq!(field.label_name(), None);
    }

    #[test]
    fn test_object_insert_replaces_in_place() {
        let mut obj = ObjectValue::new().with("a", 1).with("b", 2);
        obj.insert("a", 3);

        let keys: Vec<&str> = obj.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(obj.get("a"), Some(&FieldValue::Int(3)));
    }

    #[test]
    fn test_object_serializes_in_insertion_order() {
        let obj = ObjectValue::new()
            .with("id", "op-1")
            .with("producer", "svc")
            .with("first", true);

        let json = serde_json::to_string(&FieldValue::Object(obj)).unwrap();
        assert_eq!(json, r#"{"id":"op-1","producer":"svc","first":true}"#);
    }

    #[test]
    fn test_display() {
        let obj = ObjectValue::new().with("file", "main.rs").with("line", "7");
        assert_eq!(FieldValue::Object(obj).to_string(), "{file=main.rs line=7}");
        assert_eq!(FieldValue::Null.to_string(), "null");
    }

    #[test]
    fn test_error_field_uses_message() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let field = Field::error(&io_err);

        assert_eq!(field.key, "error");
        assert_eq!(field.value.to_json_value(), serde_json::json!("disk full"));
    }
}
