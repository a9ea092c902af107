//! Distributed trace correlation
//!
//! Parses the `<trace-id>/<span-id>;o=<0|1>` trace context format and turns it
//! into the trace, span and sampling fields of a log entry.

use crate::core::field::Field;
use crate::core::keys::{SPAN_KEY, TRACE_CONTEXT_HEADER, TRACE_KEY, TRACE_SAMPLED_KEY};
use http::HeaderMap;
use regex::Regex;
use std::sync::LazyLock;

static TRACE_CONTEXT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9a-zA-Z]+)/([0-9a-zA-Z]+);o=([0-1])").expect("Trace context regex should be valid")
});

/// Parsed trace context header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
    pub sampled: bool,
}

impl TraceContext {
    /// `None` when `header` does not hold a trace context
    pub fn parse(header: &str) -> Option<Self> {
        let caps = TRACE_CONTEXT_REGEX.captures(header)?;

        Some(Self {
            trace_id: caps[1].to_string(),
            span_id: caps[2].to_string(),
            sampled: &caps[3] == "1",
        })
    }

    pub fn into_fields(self, project: &str) -> Vec<Field> {
        trace_fields(&self.trace_id, &self.span_id, self.sampled, project)
    }
}

/// Trace, span and sampling fields for `header`
///
/// A header that does not match yields no fields; missing correlation never
/// breaks logging.
pub fn trace_context(header: &str, project: &str) -> Vec<Field> {
    TraceContext::parse(header)
        .map(|ctx| ctx.into_fields(project))
        .unwrap_or_default()
}

pub fn trace_fields(trace_id: &str, span_id: &str, sampled: bool, project: &str) -> Vec<Field> {
    vec![
        Field::string(TRACE_KEY, format!("projects/{}/traces/{}", project, trace_id)),
        Field::string(SPAN_KEY, span_id),
        Field::bool(TRACE_SAMPLED_KEY, sampled),
    ]
}

/// Trace fields from the `X-Cloud-Trace-Context` request header
pub fn trace_context_from_headers(headers: &HeaderMap, project: &str) -> Vec<Field> {
    headers
        .get(TRACE_CONTEXT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|header| trace_context(header, project))
        .unwrap_or_default()
}
