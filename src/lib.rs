//! # New Relic Logger
//!
//! A leveled, structured logger that forwards severe events to an APM agent.
//!
//! ## Features
//!
//! - **Severity Filter**: Only critical, alert and emergency calls reach the agent by default
//! - **Custom Parameters**: The level and every context entry become custom parameters
//! - **Exception Reporting**: Exceptions and fatal errors in the context are reported with the message
//! - **Pluggable Agent**: Any [`AgentClient`] implementation can receive the calls

pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        AgentCall, AgentClient, Context, ContextValue, ExceptionLike, FatalError, FieldValue,
        LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, NewRelicLogger,
        RecordingAgent, ReportableException, Result, Throwable, DEFAULT_REPORT_THRESHOLD,
        EXCEPTION_KEY, LEVEL_PARAMETER,
    };
}

pub use crate::core::{
    dump, AgentCall, AgentClient, Context, ContextValue, ExceptionLike, FatalError, FieldValue,
    LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, NewRelicLogger, RecordingAgent,
    ReportableException, Result, Throwable, DEFAULT_REPORT_THRESHOLD, EXCEPTION_KEY,
    LEVEL_PARAMETER,
};
