//! Colored console sink for local development

use crate::core::{encode_level, Entry, Field, LogLevel, Result, Sink, TimestampFormat};
use colored::Colorize;
use std::sync::Arc;

/// Human readable sink writing to stdout, or stderr for `Error` and above
///
/// `[timestamp] [SEVERITY] caller - message key=value ...`
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    min_level: LogLevel,
    context: Vec<Field>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::Iso8601,
            min_level: LogLevel::Trace,
            context: Vec::new(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set the timestamp format for this sink
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_logdriver::core::TimestampFormat;
    /// use rust_logdriver::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::new()
    ///     .with_timestamp_format(TimestampFormat::Custom("%H:%M:%S".to_string()));
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    fn format_text(&self, entry: &Entry, fields: &[Field]) -> String {
        let severity = format!("{:9}", encode_level(entry.level));
        let level_str = if self.use_colors {
            severity.color(entry.level.color_code()).to_string()
        } else {
            severity
        };

        let mut output = format!(
            "[{}] [{}] {} - {}",
            self.timestamp_format.format(&entry.timestamp),
            level_str,
            entry.caller.trimmed_path(),
            entry.message
        );

        for field in self.context.iter().chain(fields) {
            output.push(' ');
            output.push_str(&field.key);
            output.push('=');
            output.push_str(&field.value.to_string());
        }

        output
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Sink> {
        let mut derived = self.clone();
        derived.context.extend(fields);
        Arc::new(derived)
    }

    fn write(&self, entry: &Entry, fields: Vec<Field>) -> Result<()> {
        let output = self.format_text(entry, &fields);

        if entry.level >= LogLevel::Error {
            eprintln!("{}", output);
        } else {
            println!("{}", output);
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        // Both streams are written to
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntryCaller, ObjectValue};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_text() {
        let entry = Entry::new(LogLevel::Warn, "slow query")
            .with_timestamp(Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap())
            .with_caller(EntryCaller::new("/app/src/db.rs", 88, "app::db"));

        let sink = ConsoleSink {
            context: vec![Field::string("host", "db-1")],
            ..ConsoleSink::with_colors(false)
        };
        let line = sink.format_text(&entry, &[Field::int("ms", 1200)]);

        assert_eq!(
            line,
            "[2025-01-08T10:30:45.000Z] [WARNING  ] src/db.rs:88 - slow query host=db-1 ms=1200"
        );
    }

    #[test]
    fn test_object_fields_render_inline() {
        let sink = ConsoleSink::with_colors(false);
        let labels = ObjectValue::new().with("env", "prod");
        let line = sink.format_text(
            &Entry::new(LogLevel::Info, "ready"),
            &[Field::new("labels", labels)],
        );

        assert!(line.contains("undefined - ready labels={env=prod}"));
    }

    #[test]
    fn test_min_level() {
        let sink = ConsoleSink::new().with_min_level(LogLevel::Error);
        assert!(!sink.enabled(LogLevel::Warn));
        assert!(sink.enabled(LogLevel::DPanic));
    }
}
