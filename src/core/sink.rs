//! Sink trait for the logging core wrapped by the enrichment layer

use super::{entry::Entry, error::Result, field::Field, log_level::LogLevel};
use std::sync::Arc;

/// A logging core: decides which levels are enabled, carries context fields,
/// and serializes entries to an output.
///
/// Implementations must tolerate concurrent `write` calls from many threads.
pub trait Sink: Send + Sync {
    /// Whether entries at `level` should be written
    fn enabled(&self, level: LogLevel) -> bool;

    /// Derive a sink that adds `fields` to every entry it writes
    fn with(&self, fields: Vec<Field>) -> Arc<dyn Sink>;

    fn write(&self, entry: &Entry, fields: Vec<Field>) -> Result<()>;

    fn flush(&self) -> Result<()>;

    fn name(&self) -> &str;
}
