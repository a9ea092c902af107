//! Long-running operation correlation
//!
//! Entries sharing an operation `id` (and `producer`) are grouped together by
//! the backend; `first` and `last` mark the boundaries.

use crate::core::field::{Field, MarshalObject, ObjectValue};
use crate::core::keys::OPERATION_KEY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Entries with the same id belong to the same operation
    pub id: String,
    /// Combined with `id` must be globally unique, e.g. `github.com/org/app`
    pub producer: String,
    pub first: bool,
    pub last: bool,
}

impl MarshalObject for Operation {
    fn marshal_object(&self) -> ObjectValue {
        ObjectValue::new()
            .with("id", self.id.as_str())
            .with("producer", self.producer.as_str())
            .with("first", self.first)
            .with("last", self.last)
    }
}

pub fn operation(id: impl Into<String>, producer: impl Into<String>, first: bool, last: bool) -> Field {
    let op = Operation {
        id: id.into(),
        producer: producer.into(),
        first,
        last,
    };
    Field::object(OPERATION_KEY, &op)
}

/// First entry of an operation
pub fn operation_start(id: impl Into<String>, producer: impl Into<String>) -> Field {
    operation(id, producer, true, false)
}

pub fn operation_cont(id: impl Into<String>, producer: impl Into<String>) -> Field {
    operation(id, producer, false, false)
}

/// Last entry of an operation
pub fn operation_end(id: impl Into<String>, producer: impl Into<String>) -> Field {
    operation(id, producer, false, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation() {
        let field = operation("id", "producer", true, false);

        assert_eq!(field.key, OPERATION_KEY);
        let json = serde_json::to_string(&field.value).unwrap();
        assert_eq!(
            json,
            r#"{"id":"id","producer":"producer","first":true,"last":false}"#
        );
    }

    #[test]
    fn test_operation_helpers() {
        assert_eq!(operation_start("a", "p"), operation("a", "p", true, false));
        assert_eq!(operation_cont("a", "p"), operation("a", "p", false, false));
        assert_eq!(operation_end("a", "p"), operation("a", "p", false, true));
    }
}
