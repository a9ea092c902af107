//! Sink that discards everything

use crate::core::{Entry, Field, LogLevel, Result, Sink};
use std::sync::Arc;

/// Never enabled; writes succeed without output
#[derive(Debug, Clone, Copy, Default)]
pub struct NopSink;

impl NopSink {
    pub fn new() -> Self {
        NopSink
    }
}

impl Sink for NopSink {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn with(&self, _fields: Vec<Field>) -> Arc<dyn Sink> {
        Arc::new(NopSink)
    }

    fn write(&self, _entry: &Entry, _fields: Vec<Field>) -> Result<()> {
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "nop"
    }
}
