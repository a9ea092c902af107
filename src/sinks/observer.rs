//! In-memory sink recording every write, for assertions in tests

use crate::core::{Entry, Field, LogLevel, Result, Sink};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::sync::Arc;

/// One recorded write: the entry plus the sink context and call fields
#[derive(Debug, Clone)]
pub struct LoggedEntry {
    pub entry: Entry,
    pub context: Vec<Field>,
}

impl LoggedEntry {
    /// Fields keyed by name, values as JSON; later fields win on duplicates
    pub fn context_map(&self) -> Map<String, Value> {
        self.context
            .iter()
            .map(|field| (field.key.clone(), field.value.to_json_value()))
            .collect()
    }
}

/// Handle to the entries recorded by an [`ObservedSink`] and its derivations
#[derive(Debug, Clone, Default)]
pub struct ObservedLogs {
    entries: Arc<Mutex<Vec<LoggedEntry>>>,
}

impl ObservedLogs {
    pub fn all(&self) -> Vec<LoggedEntry> {
        self.entries.lock().clone()
    }

    /// Return and clear the recorded entries
    pub fn take_all(&self) -> Vec<LoggedEntry> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn filter_message(&self, message: &str) -> Vec<LoggedEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|logged| logged.entry.message == message)
            .cloned()
            .collect()
    }

    pub fn filter_field_key(&self, key: &str) -> Vec<LoggedEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|logged| logged.context.iter().any(|field| field.key == key))
            .cloned()
            .collect()
    }

    fn record(&self, logged: LoggedEntry) {
        self.entries.lock().push(logged);
    }
}

/// Sink that keeps every entry in memory
///
/// # Example
///
/// ```
/// use rust_logdriver::core::{Entry, Field, LogLevel, Sink};
/// use rust_logdriver::sinks::ObservedSink;
///
/// let (sink, logs) = ObservedSink::new(LogLevel::Info);
/// sink.write(&Entry::new(LogLevel::Info, "hi"), vec![Field::int("n", 1)]).unwrap();
///
/// assert_eq!(logs.len(), 1);
/// assert_eq!(logs.all()[0].context_map()["n"], 1);
/// ```
#[derive(Debug, Clone)]
pub struct ObservedSink {
    min_level: LogLevel,
    context: Vec<Field>,
    logs: ObservedLogs,
}

impl ObservedSink {
    pub fn new(min_level: LogLevel) -> (Self, ObservedLogs) {
        let logs = ObservedLogs::default();
        let sink = Self {
            min_level,
            context: Vec::new(),
            logs: logs.clone(),
        };
        (sink, logs)
    }
}

impl Sink for ObservedSink {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Sink> {
        let mut derived = self.clone();
        derived.context.extend(fields);
        Arc::new(derived)
    }

    fn write(&self, entry: &Entry, fields: Vec<Field>) -> Result<()> {
        let mut context = self.context.clone();
        context.extend(fields);

        self.logs.record(LoggedEntry {
            entry: entry.clone(),
            context,
        });
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "observer"
    }
}
