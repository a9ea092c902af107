//! Logger facade over the enrichment core

use super::{
    config::DriverConfig,
    driver::DriverCore,
    entry::{Entry, EntryCaller},
    error::Result,
    field::Field,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sink::Sink,
};
use crate::sinks::JsonSink;
use std::panic::Location;
use std::sync::Arc;

/// Structured logger writing through a [`DriverCore`]
///
/// Cheap to clone; clones and derived loggers share the sink and metrics.
///
/// Level side effects apply whether or not the level is enabled: `DPanic`
/// panics in development mode, `Panic` panics, and `Fatal` flushes and exits
/// the process with status 1.
#[derive(Clone)]
pub struct Logger {
    core: DriverCore,
    min_level: LogLevel,
    name: Option<String>,
    add_caller: bool,
    development: bool,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_logdriver::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .sink(NopSink::new())
    ///     .service_context("checkout", "v2")
    ///     .build()
    ///     .unwrap();
    ///
    /// logger.info("started", vec![label("region", "eu-west1")]);
    /// ```
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// `Info` and above as JSON lines on stdout
    pub fn production() -> Self {
        LoggerBuilder::new().assemble()
    }

    /// `Debug` and above as JSON lines on stdout; `DPanic` panics
    pub fn development() -> Self {
        LoggerBuilder::new()
            .min_level(LogLevel::Debug)
            .development(true)
            .assemble()
    }

    /// Derive a logger adding `fields` to every entry
    ///
    /// Label fields become contextual labels; the receiver is unchanged.
    #[must_use]
    pub fn with(&self, fields: Vec<Field>) -> Logger {
        Logger {
            core: self.core.derive(fields),
            ..self.clone()
        }
    }

    /// Derive a logger with `name` appended to the logger name, dot separated
    #[must_use]
    pub fn named(&self, name: &str) -> Logger {
        let name = match &self.name {
            Some(parent) if !name.is_empty() => format!("{}.{}", parent, name),
            Some(parent) => parent.clone(),
            None => name.to_string(),
        };

        Logger {
            name: (!name.is_empty()).then_some(name),
            ..self.clone()
        }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level && self.core.enabled(level)
    }

    /// Write an entry located at the caller of this method
    ///
    /// The caller's file and line are known here but not its function name,
    /// so `function`/`functionName` are left out of the location fields. The
    /// `info!` family of macros records the enclosing module path as the
    /// function.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>, fields: Vec<Field>) {
        let caller = EntryCaller::from_location(Location::caller());
        self.log_at(level, message, fields, caller);
    }

    /// Write an entry with an explicit caller location
    ///
    /// Sink failures are reported on stderr and counted in [`Logger::metrics`].
    pub fn log_at(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        fields: Vec<Field>,
        caller: EntryCaller,
    ) {
        let message = message.into();

        if self.enabled(level) {
            let mut entry = Entry::new(level, message.as_str());
            if self.add_caller {
                entry = entry.with_caller(caller);
            }
            if let Some(ref name) = self.name {
                entry = entry.with_logger_name(name.as_str());
            }

            match self.core.write(&entry, fields) {
                Ok(()) => {
                    self.metrics.record_written();
                }
                Err(e) => {
                    self.metrics.record_failed();
                    eprintln!("[LOGGER ERROR] Failed to write log entry: {}", e);
                }
            }
        }

        self.after_write(level, &message);
    }

    fn after_write(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::DPanic if self.development => panic!("{}", message),
            LogLevel::Panic => panic!("{}", message),
            LogLevel::Fatal => {
                if let Err(e) = self.flush() {
                    eprintln!("[LOGGER ERROR] Failed to flush before exit: {}", e);
                }
                std::process::exit(1);
            }
            _ => {}
        }
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(LogLevel::Trace, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(LogLevel::Debug, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(LogLevel::Info, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(LogLevel::Warn, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(LogLevel::Error, message, fields);
    }

    /// Panics after writing when the logger is in development mode
    #[inline]
    #[track_caller]
    pub fn dpanic(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(LogLevel::DPanic, message, fields);
    }

    /// Panics after writing
    #[inline]
    #[track_caller]
    pub fn panic(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(LogLevel::Panic, message, fields);
    }

    /// Flushes and exits the process with status 1 after writing
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>, fields: Vec<Field>) {
        self.log(LogLevel::Fatal, message, fields);
    }

    pub fn flush(&self) -> Result<()> {
        self.core.flush()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn core(&self) -> &DriverCore {
        &self.core
    }

    /// Get the logger metrics for observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logdriver::prelude::*;
    ///
    /// let (sink, _logs) = ObservedSink::new(LogLevel::Debug);
    /// let logger = Logger::builder().sink(sink).build().unwrap();
    ///
    /// logger.info("ping", vec![]);
    /// assert_eq!(logger.metrics().written_count(), 1);
    /// println!("Failure rate: {:.2}%", logger.metrics().failure_rate());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::production()
    }
}

/// Builder for Logger with fluent API
pub struct LoggerBuilder {
    min_level: LogLevel,
    sink: Option<Arc<dyn Sink>>,
    config: DriverConfig,
    name: Option<String>,
    add_caller: bool,
    development: bool,
    fields: Vec<Field>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            sink: None,
            config: DriverConfig::default(),
            name: None,
            add_caller: true,
            development: false,
            fields: Vec::new(),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the wrapped sink; JSON lines on stdout when not set
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Replace the whole enrichment configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn report_all_errors(mut self, enabled: bool) -> Self {
        self.config = self.config.report_all_errors(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn service_context(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.config = self.config.service_context(name, version);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fmt_stack_traces(mut self, enabled: bool) -> Self {
        self.config = self.config.fmt_stack_traces(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Record the caller location of every entry (default on)
    #[must_use = "builder methods return a new value"]
    pub fn add_caller(mut self, enabled: bool) -> Self {
        self.add_caller = enabled;
        self
    }

    /// Make `DPanic` entries panic
    #[must_use = "builder methods return a new value"]
    pub fn development(mut self, enabled: bool) -> Self {
        self.development = enabled;
        self
    }

    /// Initial fields of the logger; label fields become contextual labels
    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;
        Ok(self.assemble())
    }

    fn assemble(self) -> Logger {
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(JsonSink::stdout().with_min_level(self.min_level)));

        let mut core = DriverCore::new(sink, self.config);
        if !self.fields.is_empty() {
            core = core.derive(self.fields);
        }

        Logger {
            core,
            min_level: self.min_level,
            name: self.name,
            add_caller: self.add_caller,
            development: self.development,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
