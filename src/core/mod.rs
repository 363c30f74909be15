//! Core logger types and traits

pub mod agent;
pub mod config;
pub mod dump;
pub mod error;
pub mod exception;
pub mod log_context;
pub mod log_level;
pub mod logger;

pub use agent::{AgentCall, AgentClient, RecordingAgent};
pub use config::LoggerConfig;
pub use dump::dump;
pub use error::{LoggerError, Result};
pub use exception::{ExceptionLike, FatalError, ReportableException, Throwable};
pub use log_context::{Context, ContextValue, FieldValue, EXCEPTION_KEY};
pub use log_level::{LogLevel, DEFAULT_REPORT_THRESHOLD};
pub use logger::{Logger, LoggerBuilder, NewRelicLogger, LEVEL_PARAMETER};
