//! Reserved field keys recognized by the log ingestion backend
//!
//! Shared by the enrichment core, the field builders and the encoders.

/// Prefix marking a single label field (`labels.<name>`)
pub const LABEL_PREFIX: &str = "labels.";

pub const LABELS_KEY: &str = "logging.googleapis.com/labels";
pub const SOURCE_LOCATION_KEY: &str = "logging.googleapis.com/sourceLocation";
pub const OPERATION_KEY: &str = "logging.googleapis.com/operation";

pub const TRACE_KEY: &str = "logging.googleapis.com/trace";
pub const SPAN_KEY: &str = "logging.googleapis.com/spanId";
pub const TRACE_SAMPLED_KEY: &str = "logging.googleapis.com/trace_sampled";

/// Error reporting context (`context.reportLocation`)
pub const ERROR_CONTEXT_KEY: &str = "context";
pub const SERVICE_CONTEXT_KEY: &str = "serviceContext";
pub const HTTP_REQUEST_KEY: &str = "httpRequest";
pub const ERROR_KEY: &str = "error";

/// Service name used when error reporting runs without a configured service
pub const UNKNOWN_SERVICE: &str = "unknown";

/// Request header carrying `<trace>/<span>;o=<0|1>`
pub const TRACE_CONTEXT_HEADER: &str = "x-cloud-trace-context";

pub const SEVERITY_KEY: &str = "severity";
pub const TIME_KEY: &str = "timestamp";
pub const MESSAGE_KEY: &str = "message";
pub const CALLER_KEY: &str = "caller";
pub const LOGGER_KEY: &str = "logger";
