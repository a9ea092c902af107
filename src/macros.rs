//! Logging macros for ergonomic log message formatting.
//!
//! These macros format the message like `format!` and record the call site
//! (file, line and module path) as the caller of the entry. Fields go in a
//! `fields: [...]` list ahead of the message.
//!
//! # Examples
//!
//! ```
//! use rust_logdriver::prelude::*;
//! use rust_logdriver::info;
//!
//! let (sink, logs) = ObservedSink::new(LogLevel::Debug);
//! let logger = Logger::builder().sink(sink).build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With fields
//! info!(logger, fields: [label("region", "eu"), Field::int("port", port)], "Listening");
//!
//! assert_eq!(logs.len(), 3);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_logdriver::prelude::*;
/// # let logger = Logger::builder().sink(NopSink::new()).build().unwrap();
/// use rust_logdriver::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, fields: [Field::int("attempt", 3)], "Retrying");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, fields: [$($field:expr),* $(,)?], $($arg:tt)+) => {
        $logger.log_at(
            $level,
            format!($($arg)+),
            vec![$($field),*],
            $crate::core::EntryCaller::new(file!(), line!(), module_path!()),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!($logger, $level, fields: [], $($arg)+)
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use rust_logdriver::prelude::*;
/// # let logger = Logger::builder().min_level(LogLevel::Trace).sink(NopSink::new()).build().unwrap();
/// use rust_logdriver::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_logdriver::prelude::*;
/// # let logger = Logger::builder().sink(NopSink::new()).build().unwrap();
/// use rust_logdriver::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_logdriver::prelude::*;
/// # let logger = Logger::builder().sink(NopSink::new()).build().unwrap();
/// use rust_logdriver::error;
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "connection refused");
/// error!(logger, fields: [Field::error(&err)], "Failed to connect to {}", "db-1");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a message that panics in development mode.
#[macro_export]
macro_rules! dpanic {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::DPanic, $($arg)+)
    };
}

/// Log a fatal-level message, then flush and exit the process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
