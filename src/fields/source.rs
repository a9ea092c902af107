//! Source location of a log call

use crate::core::entry::EntryCaller;
use crate::core::field::{Field, MarshalObject, ObjectValue};
use crate::core::keys::SOURCE_LOCATION_KEY;

/// Where in the program a log entry was written
///
/// The backend expects `line` as a string. `function` is left out when the
/// caller has no function name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: String,
    pub function: String,
}

impl SourceLocation {
    /// `None` when the caller location is undefined
    pub fn from_caller(caller: &EntryCaller) -> Option<Self> {
        if !caller.defined {
            return None;
        }

        Some(Self {
            file: caller.file.clone(),
            line: caller.line.to_string(),
            function: caller.function.clone(),
        })
    }
}

impl MarshalObject for SourceLocation {
    fn marshal_object(&self) -> ObjectValue {
        let obj = ObjectValue::new()
            .with("file", self.file.as_str())
            .with("line", self.line.as_str());
        if self.function.is_empty() {
            obj
        } else {
            obj.with("function", self.function.as_str())
        }
    }
}

/// Source location field under the default key
pub fn source_location(caller: &EntryCaller) -> Option<Field> {
    source_location_with_key(SOURCE_LOCATION_KEY, caller)
}

pub fn source_location_with_key(key: &str, caller: &EntryCaller) -> Option<Field> {
    SourceLocation::from_caller(caller).map(|location| Field::object(key, &location))
}
