//! Label storage for the enrichment core
//!
//! This module provides:
//! - `LabelStore`: contextual labels attached to a derived core
//! - `Labels`: the transient label view of a single write
//! - `label` / `labels`: field builders for label contributions

use super::field::{Field, FieldKind, FieldValue, MarshalObject, ObjectValue};
use super::keys::LABELS_KEY;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Contextual labels shared by every thread logging through one derived core
///
/// A store is never changed after it is handed out: [`LabelStore::extend`]
/// builds a new store from a snapshot of the receiver, so a child's labels
/// never reach its parent or siblings.
///
/// Thread-safe: Can be safely shared across threads.
///
/// # Example
///
/// ```
/// use rust_logdriver::core::LabelStore;
///
/// let root = LabelStore::new();
/// let child = root.extend([("env".to_string(), "prod".to_string())]);
///
/// assert!(root.is_empty());
/// assert_eq!(child.get("env").as_deref(), Some("prod"));
/// ```
#[derive(Debug, Clone)]
pub struct LabelStore {
    store: Arc<RwLock<HashMap<String, String>>>,
}

impl LabelStore {
    /// Create a new empty label store
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new store holding the receiver's labels overwritten by `pairs`
    ///
    /// The receiver is left unchanged.
    #[must_use]
    pub fn extend<I>(&self, pairs: I) -> LabelStore
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut snapshot = self.store.read().clone();
        snapshot.extend(pairs);

        LabelStore {
            store: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Merge `other` over a snapshot of this store
    ///
    /// `other` wins on key collision. The result is never written back.
    pub fn snapshot_merge(&self, other: &Labels) -> Labels {
        let mut merged = self.snapshot();
        for (key, value) in other.iter() {
            merged.insert(key.to_string(), value.to_string());
        }
        merged
    }

    /// Consistent copy of the current labels
    pub fn snapshot(&self) -> Labels {
        let store = self.store.read();
        Labels {
            entries: store
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.store.read().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }
}

impl Default for LabelStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Label view of one write; keys are emitted in sorted order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    entries: BTreeMap<String, String>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect the label contributions of `field`
    ///
    /// Single label fields add one entry; a label bundle adds each of its
    /// string members. Returns false when `field` is not a label field.
    pub(crate) fn absorb(&mut self, field: &Field) -> bool {
        if !field.is_label() {
            return false;
        }

        if let Some(name) = field.label_name() {
            if let Some(value) = field.value.as_str() {
                self.insert(name, value);
            }
        } else if let Some(bundle) = field.value.as_object() {
            for (key, value) in bundle.iter() {
                if let Some(value) = value.as_str() {
                    self.insert(key, value);
                }
            }
        }

        true
    }

    pub fn into_pairs(self) -> impl Iterator<Item = (String, String)> {
        self.entries.into_iter()
    }
}

impl MarshalObject for Labels {
    fn marshal_object(&self) -> ObjectValue {
        let mut obj = ObjectValue::new();
        for (key, value) in self.iter() {
            obj.insert(key, value);
        }
        obj
    }
}

/// Add an optional label to the payload
///
/// Labels are user-defined `(key, value)` data that provide additional
/// information about the log entry, e.g. `{"name": "wrench", "count": "3"}`.
pub fn label(key: impl AsRef<str>, value: impl Into<String>) -> Field {
    Field::label(key, value)
}

/// Bundle the label fields among `fields` into one labels object
///
/// Non-label fields are ignored. The bundle still counts as a label
/// contribution when it reaches the enrichment core.
pub fn labels(fields: &[Field]) -> Field {
    let mut collected = Labels::new();
    for field in fields {
        collected.absorb(field);
    }
    labels_field(LABELS_KEY, &collected)
}

pub(crate) fn labels_field(key: &str, labels: &Labels) -> Field {
    Field::with_kind(
        key,
        FieldKind::Label,
        FieldValue::Object(labels.marshal_object()),
    )
}
