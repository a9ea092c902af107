//! JSON lines sink
//!
//! Writes each entry as a single-line JSON object (JSONL format) to stdout, a
//! file, or any writer. This is the default sink behind [`crate::Logger`].

use crate::core::{Entry, Field, JsonEncoder, LogLevel, LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// JSON lines sink
///
/// Derived sinks share the writer of their parent; each line is written
/// under the writer lock so concurrent entries never interleave.
#[derive(Clone)]
pub struct JsonSink {
    writer: SharedWriter,
    encoder: JsonEncoder,
    min_level: LogLevel,
    context: Vec<Field>,
}

impl JsonSink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            encoder: JsonEncoder::new(),
            min_level: LogLevel::Trace,
            context: Vec::new(),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Append to the file at `path`, creating it if needed
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self::new(BufWriter::new(file)))
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: JsonEncoder) -> Self {
        self.encoder = encoder;
        self
    }
}

impl Sink for JsonSink {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Sink> {
        let mut derived = self.clone();
        derived.context.extend(fields);
        Arc::new(derived)
    }

    fn write(&self, entry: &Entry, fields: Vec<Field>) -> Result<()> {
        let line = self.encoder.encode(entry, &self.context, &fields)?;

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}
