//! Enrichment configuration

use super::error::{LoggerError, Result};
use super::keys::{LABELS_KEY, SOURCE_LOCATION_KEY};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// Options controlling which fields the enrichment core injects
///
/// # Example
///
/// ```
/// use rust_logdriver::core::DriverConfig;
///
/// let config = DriverConfig::new()
///     .report_all_errors(true)
///     .service_context("billing", "v1.4.2");
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Entries at or above this level get an error report context
    pub error_report_level: Option<LogLevel>,
    pub service_name: Option<String>,
    pub service_version: Option<String>,
    /// Render error fields into their stack trace text
    pub fmt_stack_traces: bool,
    pub labels_key: String,
    pub source_location_key: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            error_report_level: None,
            service_name: None,
            service_version: None,
            fmt_stack_traces: true,
            labels_key: LABELS_KEY.to_string(),
            source_location_key: SOURCE_LOCATION_KEY.to_string(),
        }
    }
}

impl DriverConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every entry at `Error` or above to error reporting
    #[must_use = "builder methods return a new value"]
    pub fn report_all_errors(mut self, enabled: bool) -> Self {
        self.error_report_level = enabled.then_some(LogLevel::Error);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn error_report_level(mut self, level: LogLevel) -> Self {
        self.error_report_level = Some(level);
        self
    }

    /// Service identity attached to every entry; an empty version is omitted
    #[must_use = "builder methods return a new value"]
    pub fn service_context(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let version = version.into();
        self.service_name = Some(name.into());
        self.service_version = (!version.is_empty()).then_some(version);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fmt_stack_traces(mut self, enabled: bool) -> Self {
        self.fmt_stack_traces = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn labels_key(mut self, key: impl Into<String>) -> Self {
        self.labels_key = key.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn source_location_key(mut self, key: impl Into<String>) -> Self {
        self.source_location_key = key.into();
        self
    }

    /// Whether an entry at `level` gets an error report context
    pub fn reports(&self, level: LogLevel) -> bool {
        self.error_report_level
            .is_some_and(|threshold| level >= threshold)
    }

    pub fn validate(&self) -> Result<()> {
        if self.labels_key.is_empty() {
            return Err(LoggerError::config("labels_key", "key must not be empty"));
        }
        if self.source_location_key.is_empty() {
            return Err(LoggerError::config(
                "source_location_key",
                "key must not be empty",
            ));
        }
        if matches!(&self.service_name, Some(name) if name.is_empty()) {
            return Err(LoggerError::config(
                "service_name",
                "service name must not be empty when set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();

        assert_eq!(config.error_report_level, None);
        assert!(config.fmt_stack_traces);
        assert_eq!(config.labels_key, LABELS_KEY);
        assert_eq!(config.source_location_key, SOURCE_LOCATION_KEY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_report_all_errors() {
        let config = DriverConfig::new().report_all_errors(true);

        assert!(!config.reports(LogLevel::Warn));
        assert!(config.reports(LogLevel::Error));
        assert!(config.reports(LogLevel::Fatal));

        let config = config.report_all_errors(false);
        assert!(!config.reports(LogLevel::Fatal));
    }

    #[test]
    fn test_service_context_without_version() {
        let config = DriverConfig::new().service_context("svc", "");

        assert_eq!(config.service_name.as_deref(), Some("svc"));
        assert_eq!(config.service_version, None);
    }

    #[test]
    fn test_validate_rejects_empty_keys() {
        let err = DriverConfig::new().labels_key("").validate().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        assert!(DriverConfig::new()
            .source_location_key("")
            .validate()
            .is_err());
        assert!(DriverConfig::new()
            .service_context("", "v1")
            .validate()
            .is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DriverConfig =
            serde_json::from_str(r#"{"error_report_level":"Error","service_name":"api"}"#)
                .unwrap();

        assert_eq!(config.error_report_level, Some(LogLevel::Error));
        assert_eq!(config.service_name.as_deref(), Some("api"));
        assert!(config.fmt_stack_traces);
        assert_eq!(config.labels_key, LABELS_KEY);
    }
}
