//! Sink implementations

#[cfg(feature = "console")]
pub mod console;
pub mod json;
pub mod nop;
pub mod observer;

#[cfg(feature = "console")]
pub use console::ConsoleSink;
pub use json::JsonSink;
pub use nop::NopSink;
pub use observer::{LoggedEntry, ObservedLogs, ObservedSink};

pub use crate::core::Sink;
