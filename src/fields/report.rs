//! Error report context
//!
//! Entries carrying `context.reportLocation` are picked up by error reporting
//! even when they hold no stack trace.

use crate::core::entry::EntryCaller;
use crate::core::field::{Field, MarshalObject, ObjectValue};
use crate::core::keys::ERROR_CONTEXT_KEY;

/// `functionName` is omitted when the caller has no function name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLocation {
    pub file_path: String,
    pub line_number: String,
    pub function_name: String,
}

impl MarshalObject for ReportLocation {
    fn marshal_object(&self) -> ObjectValue {
        let obj = ObjectValue::new()
            .with("filePath", self.file_path.as_str())
            .with("lineNumber", self.line_number.as_str());
        if self.function_name.is_empty() {
            obj
        } else {
            obj.with("functionName", self.function_name.as_str())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub report_location: ReportLocation,
}

impl ReportContext {
    /// `None` when the caller location is undefined
    pub fn from_caller(caller: &EntryCaller) -> Option<Self> {
        if !caller.defined {
            return None;
        }

        Some(Self {
            report_location: ReportLocation {
                file_path: caller.file.clone(),
                line_number: caller.line.to_string(),
                function_name: caller.function.clone(),
            },
        })
    }
}

impl MarshalObject for ReportContext {
    fn marshal_object(&self) -> ObjectValue {
        ObjectValue::new().with("reportLocation", self.report_location.marshal_object())
    }
}

pub fn error_report(caller: &EntryCaller) -> Option<Field> {
    ReportContext::from_caller(caller).map(|context| Field::object(ERROR_CONTEXT_KEY, &context))
}
