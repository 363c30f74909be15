//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Each one returns
//! the `Result` of the underlying log call.
//!
//! # Examples
//!
//! ```
//! use newrelic_logger::prelude::*;
//! use newrelic_logger::{context, critical, debug};
//!
//! let agent = RecordingAgent::new();
//! let logger = NewRelicLogger::new(&agent);
//!
//! // Basic logging
//! critical!(logger, "Payment gateway unreachable").unwrap();
//!
//! // With format arguments
//! let retries = 3;
//! critical!(logger, "Gave up after {} retries", retries).unwrap();
//!
//! // With context, separated from the message by a semicolon
//! critical!(logger, context! { "gateway" => "stripe" }; "Gateway {} down", "eu-1").unwrap();
//!
//! // Below the report threshold: nothing reaches the agent
//! debug!(logger, "Cache miss for {}", "user:42").unwrap();
//!
//! assert_eq!(agent.noticed_errors().len(), 3);
//! ```

/// Build a [`Context`](crate::Context) from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use newrelic_logger::context;
///
/// let ctx = context! { "user_id" => 42_i64, "admin" => false };
/// assert_eq!(ctx.len(), 2);
/// ```
#[macro_export]
macro_rules! context {
    () => {
        $crate::Context::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Context::new()$(.with($key, $value))+
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use newrelic_logger::prelude::*;
/// # let logger = NewRelicLogger::new(RecordingAgent::new());
/// use newrelic_logger::{context, log};
/// log!(logger, LogLevel::Critical, "Simple message").unwrap();
/// log!(logger, LogLevel::Alert, "Error code: {}", 500).unwrap();
/// log!(logger, LogLevel::Alert, context! { "code" => 500_i64 }; "Request failed").unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $context:expr; $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.log($level, &format!($($arg)+), &$context)
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!($logger, $level, $crate::Context::new(); $($arg)+)
    };
}

/// Log an emergency-level message.
///
/// # Examples
///
/// ```
/// # use newrelic_logger::prelude::*;
/// # let logger = NewRelicLogger::new(RecordingAgent::new());
/// use newrelic_logger::emergency;
/// emergency!(logger, "Database cluster lost quorum").unwrap();
/// ```
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Emergency, $($arg)+)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use newrelic_logger::prelude::*;
/// # let logger = NewRelicLogger::new(RecordingAgent::new());
/// use newrelic_logger::critical;
/// critical!(logger, "Unable to recover from error: {}", "disk full").unwrap();
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}
