//! Field builders for the values the log ingestion backend recognizes

pub mod error;
pub mod http;
pub mod operation;
pub mod report;
pub mod service;
pub mod source;
pub mod trace;

pub use error::{ErrorValue, StackFrame, StackTrace, TracedError};
pub use http::{http_request, HttpPayload};
pub use operation::{operation, operation_cont, operation_end, operation_start, Operation};
pub use report::{error_report, ReportContext, ReportLocation};
pub use service::{service_context, service_context_versioned, ServiceContext};
pub use source::{source_location, source_location_with_key, SourceLocation};
pub use trace::{trace_context, trace_context_from_headers, trace_fields, TraceContext};
