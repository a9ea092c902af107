//! # Rust Log Driver
//!
//! Structured logging enrichment for a cloud log ingestion backend.
//!
//! A [`DriverCore`] wraps any [`Sink`] and adds the fields the backend
//! understands to every entry before it is written.
//!
//! ## Features
//!
//! - **Labels**: contextual labels on derived loggers merged with per-call labels
//! - **Source Location**: call site of every entry
//! - **Error Reporting**: report context, service identity and stack traces
//! - **Correlation**: trace context, HTTP request metadata, operations
//! - **Thread Safe**: one logger can be shared by any number of threads
//!
//! ## Example
//!
//! ```
//! use rust_logdriver::prelude::*;
//!
//! let (sink, logs) = ObservedSink::new(LogLevel::Debug);
//! let logger = Logger::builder()
//!     .sink(sink)
//!     .report_all_errors(true)
//!     .service_context("checkout", "v1.2.0")
//!     .build()
//!     .unwrap();
//!
//! let request = logger.with(vec![label("request_id", "r-42")]);
//! request.error("payment declined", vec![Field::string("card", "visa")]);
//!
//! let context = logs.all()[0].context_map();
//! assert_eq!(context["logging.googleapis.com/labels"]["request_id"], "r-42");
//! assert_eq!(context["serviceContext"]["service"], "checkout");
//! assert!(context.contains_key("context"));
//! ```

pub mod core;
pub mod fields;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        label, labels, DriverConfig, DriverCore, Entry, EntryCaller, Field, FieldValue, LogLevel,
        Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result, Sink,
    };
    pub use crate::fields::{
        http_request, operation, operation_cont, operation_end, operation_start,
        service_context, source_location, trace_context, HttpPayload, TracedError,
    };
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    pub use crate::sinks::{JsonSink, NopSink, ObservedLogs, ObservedSink};
}

pub use crate::core::{
    label, labels, DriverConfig, DriverCore, Entry, EntryCaller, Field, FieldKind, FieldValue,
    LabelStore, LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result, Severity,
    Sink, TimestampFormat,
};
