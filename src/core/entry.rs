//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::panic::Location;

// Thread-local cache for the thread id to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Program location of a log call
///
/// When `defined` is false the location is unknown and no location-derived
/// field is injected for the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCaller {
    pub defined: bool,
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl EntryCaller {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            defined: true,
            file: file.into(),
            line,
            function: function.into(),
        }
    }

    pub fn undefined() -> Self {
        Self::default()
    }

    /// Build from a `#[track_caller]` location; the function name is unknown
    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line(), "")
    }

    /// `dir/file.rs:42`, or `undefined`
    pub fn trimmed_path(&self) -> String {
        if !self.defined {
            return "undefined".to_string();
        }

        let mut parts = self.file.rsplitn(3, ['/', '\\']);
        let file = parts.next().unwrap_or_default();
        match parts.next() {
            Some(dir) => format!("{}/{}:{}", dir, file, self.line),
            None => format!("{}:{}", file, self.line),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub logger_name: Option<String>,
    pub caller: EntryCaller,
    pub thread_id: String,
}

impl Entry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            logger_name: None,
            caller: EntryCaller::undefined(),
            thread_id: get_thread_id(),
        }
    }

    pub fn with_caller(mut self, caller: EntryCaller) -> Self {
        self.caller = caller;
        self
    }

    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = Some(name.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
