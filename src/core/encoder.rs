//! JSON entry encoding
//!
//! Produces one JSON object per entry with the keys the ingestion backend
//! reads first (`severity`, `timestamp`, `logger`, `caller`, `message`),
//! followed by the sink's context fields and then the call fields.

use super::entry::Entry;
use super::error::Result;
use super::field::Field;
use super::keys::{CALLER_KEY, LOGGER_KEY, MESSAGE_KEY, SEVERITY_KEY, TIME_KEY};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde_json::{Map, Value};

/// Backend severity string for `level`
#[inline]
pub fn encode_level(level: LogLevel) -> &'static str {
    level.severity().as_str()
}

#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    timestamp_format: TimestampFormat,
    pretty: bool,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty printed output; one entry spans several lines
    pub fn new_pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Build the JSON object for one entry
    ///
    /// A call field sharing a key with a context field replaces its value.
    pub fn to_object(
        &self,
        entry: &Entry,
        context: &[Field],
        fields: &[Field],
    ) -> Map<String, Value> {
        let mut obj = Map::new();

        obj.insert(
            SEVERITY_KEY.to_string(),
            Value::String(encode_level(entry.level).to_string()),
        );
        obj.insert(TIME_KEY.to_string(), self.timestamp_value(entry));

        if let Some(ref name) = entry.logger_name {
            obj.insert(LOGGER_KEY.to_string(), Value::String(name.clone()));
        }
        if entry.caller.defined {
            obj.insert(
                CALLER_KEY.to_string(),
                Value::String(entry.caller.trimmed_path()),
            );
        }

        obj.insert(
            MESSAGE_KEY.to_string(),
            Value::String(entry.message.clone()),
        );

        for field in context.iter().chain(fields) {
            obj.insert(field.key.clone(), field.value.to_json_value());
        }

        obj
    }

    pub fn encode(&self, entry: &Entry, context: &[Field], fields: &[Field]) -> Result<String> {
        let obj = Value::Object(self.to_object(entry, context, fields));

        let json = if self.pretty {
            serde_json::to_string_pretty(&obj)?
        } else {
            serde_json::to_string(&obj)?
        };
        Ok(json)
    }

    fn timestamp_value(&self, entry: &Entry) -> Value {
        match self.timestamp_format {
            TimestampFormat::UnixMillis => Value::Number(entry.timestamp.timestamp_millis().into()),
            _ => Value::String(self.timestamp_format.format(&entry.timestamp)),
        }
    }
}
