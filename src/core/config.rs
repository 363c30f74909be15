//! Logger configuration

use super::error::{LoggerError, Result};
use super::log_level::{LogLevel, DEFAULT_REPORT_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Configuration for [`NewRelicLogger`](super::logger::NewRelicLogger).
///
/// Can be embedded in an application's own configuration file:
///
/// ```
/// use newrelic_logger::{LogLevel, LoggerConfig};
///
/// let config = LoggerConfig::from_json(r#"{ "report_threshold": "alert" }"#).unwrap();
/// assert_eq!(config.report_threshold, LogLevel::Alert);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Least severe level forwarded to the agent
    pub report_threshold: LogLevel,
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds that would forward every debug message to the agent.
    pub fn validate(&self) -> Result<()> {
        if self.report_threshold == LogLevel::Debug {
            return Err(LoggerError::config(
                "LoggerConfig",
                "report_threshold 'debug' would report every log call as an error",
            ));
        }
        Ok(())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            report_threshold: DEFAULT_REPORT_THRESHOLD,
        }
    }
}
