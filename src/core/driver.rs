//! Entry enrichment core
//!
//! [`DriverCore`] wraps another [`Sink`] and rewrites the field list of every
//! write before forwarding it:
//!
//! 1. label fields are folded into one labels object, merged over the labels
//!    collected by [`DriverCore::derive`]
//! 2. the source location is added when the caller is known
//! 3. the configured service context is added
//! 4. error report context is added for entries at the report level
//! 5. error fields are rendered into their stack trace text
//!
//! Injected fields never replace a field the caller supplied under the same
//! key, whether it came with the write or with a derived core's context.
//! Enrichment itself cannot fail; only the wrapped sink's errors are returned.

use super::config::DriverConfig;
use super::entry::Entry;
use super::error::Result;
use super::field::{Field, FieldValue};
use super::keys::{ERROR_CONTEXT_KEY, SERVICE_CONTEXT_KEY, UNKNOWN_SERVICE};
use super::labels::{labels_field, LabelStore, Labels};
use super::log_level::LogLevel;
use super::sink::Sink;
use crate::fields::{error_report, source_location_with_key, ServiceContext};
use std::collections::HashSet;
use std::sync::Arc;

/// Enrichment decorator around a logging core
///
/// Thread-safe: one core can be shared by any number of writers. Deriving a
/// child never changes the parent.
///
/// # Example
///
/// ```
/// use rust_logdriver::core::{label, DriverConfig, DriverCore, Entry, LogLevel, Sink};
/// use rust_logdriver::sinks::ObservedSink;
/// use std::sync::Arc;
///
/// let (sink, logs) = ObservedSink::new(LogLevel::Debug);
/// let core = DriverCore::new(Arc::new(sink), DriverConfig::default())
///     .derive(vec![label("env", "prod")]);
///
/// core.write(&Entry::new(LogLevel::Info, "hello"), vec![label("request", "42")])
///     .unwrap();
///
/// let context = logs.all()[0].context_map();
/// let labels = &context["logging.googleapis.com/labels"];
/// assert_eq!(labels["env"], "prod");
/// assert_eq!(labels["request"], "42");
/// ```
#[derive(Clone)]
pub struct DriverCore {
    sink: Arc<dyn Sink>,
    labels: LabelStore,
    /// Reserved keys already present in the wrapped sink's context
    context_keys: Arc<HashSet<String>>,
    config: Arc<DriverConfig>,
}

impl DriverCore {
    pub fn new(sink: Arc<dyn Sink>, config: DriverConfig) -> Self {
        Self {
            sink,
            labels: LabelStore::new(),
            context_keys: Arc::new(HashSet::new()),
            config: Arc::new(config),
        }
    }

    /// Wrap `sink` with the default configuration
    pub fn wrap<S: Sink + 'static>(sink: S) -> Self {
        Self::new(Arc::new(sink), DriverConfig::default())
    }

    /// Derive a core carrying additional context
    ///
    /// Label fields extend the child's label store; every other field is
    /// handed to the wrapped sink's `with`. Reserved keys among those fields
    /// are remembered so later writes do not inject them again.
    #[must_use]
    pub fn derive(&self, fields: Vec<Field>) -> DriverCore {
        let (labels, rest) = extract_labels(fields);

        let mut context_keys = Arc::clone(&self.context_keys);
        for field in rest.iter().filter(|field| self.is_reserved(&field.key)) {
            Arc::make_mut(&mut context_keys).insert(field.key.clone());
        }

        let sink = if rest.is_empty() {
            Arc::clone(&self.sink)
        } else {
            self.sink.with(rest)
        };

        DriverCore {
            sink,
            labels: self.labels.extend(labels.into_pairs()),
            context_keys,
            config: Arc::clone(&self.config),
        }
    }

    pub fn labels(&self) -> &LabelStore {
        &self.labels
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Replace label fields with the merged labels object
    fn with_labels(&self, fields: Vec<Field>) -> Vec<Field> {
        let (call_labels, mut out) = extract_labels(fields);
        let merged = self.labels.snapshot_merge(&call_labels);

        out.push(labels_field(&self.config.labels_key, &merged));
        out
    }

    fn is_reserved(&self, key: &str) -> bool {
        key == self.config.source_location_key
            || key == ERROR_CONTEXT_KEY
            || key == SERVICE_CONTEXT_KEY
    }

    /// Whether `key` is set by this write or by the derived context
    fn has_key(&self, fields: &[Field], key: &str) -> bool {
        self.context_keys.contains(key) || fields.iter().any(|field| field.key == key)
    }

    fn push_service_context(&self, mut fields: Vec<Field>, context: &ServiceContext) -> Vec<Field> {
        if !self.has_key(&fields, SERVICE_CONTEXT_KEY) {
            fields.push(Field::object(SERVICE_CONTEXT_KEY, context));
        }
        fields
    }

    fn with_source_location(&self, entry: &Entry, mut fields: Vec<Field>) -> Vec<Field> {
        if self.has_key(&fields, &self.config.source_location_key) {
            return fields;
        }

        let key = &self.config.source_location_key;
        if let Some(field) = source_location_with_key(key, &entry.caller) {
            fields.push(field);
        }
        fields
    }

    fn with_service_context(&self, fields: Vec<Field>) -> Vec<Field> {
        match &self.config.service_name {
            Some(name) => {
                let mut context = ServiceContext::new(name.as_str());
                if let Some(version) = &self.config.service_version {
                    context = context.with_version(version.as_str());
                }
                self.push_service_context(fields, &context)
            }
            None => fields,
        }
    }

    fn with_error_report(&self, entry: &Entry, mut fields: Vec<Field>) -> Vec<Field> {
        if !self.config.reports(entry.level) || self.has_key(&fields, ERROR_CONTEXT_KEY) {
            return fields;
        }

        match error_report(&entry.caller) {
            Some(report) => {
                fields.push(report);
                self.push_service_context(fields, &ServiceContext::new(UNKNOWN_SERVICE))
            }
            None => fields,
        }
    }
}

impl Sink for DriverCore {
    fn enabled(&self, level: LogLevel) -> bool {
        self.sink.enabled(level)
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Sink> {
        Arc::new(self.derive(fields))
    }

    fn write(&self, entry: &Entry, fields: Vec<Field>) -> Result<()> {
        let fields = self.with_labels(fields);
        let fields = self.with_source_location(entry, fields);
        let fields = self.with_service_context(fields);
        let fields = self.with_error_report(entry, fields);
        let fields = if self.config.fmt_stack_traces {
            format_errors(fields)
        } else {
            fields
        };

        self.sink.write(entry, fields)
    }

    fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    fn name(&self) -> &str {
        "driver"
    }
}

/// Split `fields` into the label set and the remaining fields, order kept
fn extract_labels(fields: Vec<Field>) -> (Labels, Vec<Field>) {
    let mut labels = Labels::new();
    let rest = fields
        .into_iter()
        .filter(|field| !labels.absorb(field))
        .collect();
    (labels, rest)
}

fn format_errors(fields: Vec<Field>) -> Vec<Field> {
    fields
        .into_iter()
        .map(|mut field| {
            let rendered = match &field.value {
                FieldValue::Error(err) => Some(err.render_stack_trace()),
                _ => None,
            };
            if let Some(text) = rendered {
                field.value = FieldValue::String(text);
            }
            field
        })
        .collect()
}
