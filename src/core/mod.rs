//! Core types: fields, entries, the sink trait and the enrichment core

pub mod config;
pub mod driver;
pub mod encoder;
pub mod entry;
pub mod error;
pub mod field;
pub mod keys;
pub mod labels;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod timestamp;

pub use config::DriverConfig;
pub use driver::DriverCore;
pub use encoder::{encode_level, JsonEncoder};
pub use entry::{Entry, EntryCaller};
pub use error::{LoggerError, Result};
pub use field::{Field, FieldKind, FieldValue, MarshalObject, ObjectValue};
pub use labels::{label, labels, LabelStore, Labels};
pub use log_level::{LogLevel, Severity};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use sink::Sink;
pub use timestamp::{rfc3339_nano, TimestampFormat};
