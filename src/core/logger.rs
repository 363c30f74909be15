//! Logger that forwards severe log calls to the monitoring agent

use super::{
    agent::AgentClient,
    config::LoggerConfig,
    dump::dump,
    error::Result,
    exception::Throwable,
    log_context::{Context, ContextValue, FieldValue, EXCEPTION_KEY},
    log_level::LogLevel,
};
use std::borrow::Cow;

/// Custom parameter carrying the level of every reported call.
///
/// Its value is always the lowercase level name, whatever casing the caller
/// used with [`Logger::log_str`].
pub const LEVEL_PARAMETER: &str = "level";

/// Leveled logging contract: a message plus structured context.
pub trait Logger {
    fn log(&self, level: LogLevel, message: &str, context: &Context) -> Result<()>;

    /// Log with a level given by name, e.g. read from configuration.
    fn log_str(&self, level: &str, message: &str, context: &Context) -> Result<()> {
        self.log(level.parse()?, message, context)
    }

    #[inline]
    fn emergency(&self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Emergency, message, context)
    }

    #[inline]
    fn alert(&self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Alert, message, context)
    }

    #[inline]
    fn critical(&self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Critical, message, context)
    }

    #[inline]
    fn error(&self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Error, message, context)
    }

    #[inline]
    fn warning(&self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Warning, message, context)
    }

    #[inline]
    fn notice(&self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Notice, message, context)
    }

    #[inline]
    fn info(&self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Info, message, context)
    }

    #[inline]
    fn debug(&self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Debug, message, context)
    }
}

/// Forwards log calls at or above the report threshold to an [`AgentClient`].
///
/// A reportable call attaches the `level` parameter, then one parameter per
/// context entry in insertion order, then reports the message through
/// `notice_error`. The entry under `exception` is not attached; it becomes the
/// reported exception instead, with fatal errors converted first. Calls below
/// the threshold touch nothing.
///
/// Agent failures are returned as-is. Parameters attached before a failure
/// stay attached.
///
/// # Example
///
/// ```
/// use newrelic_logger::prelude::*;
///
/// let agent = RecordingAgent::new();
/// let logger = NewRelicLogger::new(&agent);
///
/// logger.critical("an error message", &Context::new().with("foo", "bar")).unwrap();
/// logger.debug("a debug message", &Context::new()).unwrap();
///
/// assert_eq!(
///     agent.custom_parameters(),
///     vec![
///         ("level".to_string(), FieldValue::from("critical")),
///         ("foo".to_string(), FieldValue::from("bar")),
///     ]
/// );
/// assert_eq!(agent.noticed_errors(), vec![("an error message".to_string(), None)]);
/// ```
#[derive(Debug, Clone)]
pub struct NewRelicLogger<A> {
    agent: A,
    threshold: LogLevel,
}

impl<A: AgentClient> NewRelicLogger<A> {
    #[must_use]
    pub fn new(agent: A) -> Self {
        Self {
            agent,
            threshold: LoggerConfig::default().report_threshold,
        }
    }

    /// Create a logger from an explicit configuration.
    ///
    /// Fails with [`LoggerError::InvalidConfiguration`](super::error::LoggerError::InvalidConfiguration) when `config` does not
    /// pass [`LoggerConfig::validate`].
    pub fn with_config(agent: A, config: LoggerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            agent,
            threshold: config.report_threshold,
        })
    }

    /// Create a builder for a logger wrapping `agent`
    ///
    /// # Example
    /// ```
    /// use newrelic_logger::prelude::*;
    ///
    /// let logger = NewRelicLogger::builder(RecordingAgent::new())
    ///     .threshold(LogLevel::Error)
    ///     .build()
    ///     .unwrap();
    /// assert!(logger.is_reportable(LogLevel::Error));
    /// ```
    #[must_use]
    pub fn builder(agent: A) -> LoggerBuilder<A> {
        LoggerBuilder::new(agent)
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn into_inner(self) -> A {
        self.agent
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    #[inline]
    pub fn is_reportable(&self, level: LogLevel) -> bool {
        level.is_at_least(self.threshold)
    }
}

impl<A: AgentClient> Logger for NewRelicLogger<A> {
    fn log(&self, level: LogLevel, message: &str, context: &Context) -> Result<()> {
        if !self.is_reportable(level) {
            return Ok(());
        }

        self.agent
            .add_custom_parameter(LEVEL_PARAMETER, &FieldValue::from(level.to_str()))?;

        for (key, value) in context.iter() {
            if key == EXCEPTION_KEY {
                continue;
            }
            self.agent.add_custom_parameter(key, &parameter_value(value))?;
        }

        let exception = context.exception().map(Throwable::normalize);
        self.agent.notice_error(message, exception.as_deref())
    }
}

/// Value attached for a context entry: scalars pass through, anything else
/// is rendered to a string.
fn parameter_value(value: &ContextValue) -> Cow<'_, FieldValue> {
    match value {
        ContextValue::Scalar(scalar) => Cow::Borrowed(scalar),
        ContextValue::Composite(composite) => Cow::Owned(FieldValue::String(dump(composite))),
        ContextValue::Exception(throwable) => {
            Cow::Owned(FieldValue::String(format!("{:#?}", throwable)))
        }
    }
}

/// Builder for constructing NewRelicLogger with a fluent API
///
/// # Example
/// ```
/// use newrelic_logger::prelude::*;
///
/// let config = LoggerConfig::from_json(r#"{"report_threshold":"alert"}"#).unwrap();
/// let logger = NewRelicLogger::builder(RecordingAgent::new())
///     .config(config)
///     .build()
///     .unwrap();
/// assert_eq!(logger.threshold(), LogLevel::Alert);
/// ```
pub struct LoggerBuilder<A> {
    agent: A,
    config: LoggerConfig,
}

impl<A: AgentClient> LoggerBuilder<A> {
    /// Create a new builder with default values
    pub fn new(agent: A) -> Self {
        Self {
            agent,
            config: LoggerConfig::default(),
        }
    }

    /// Set the least severe level that is reported
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: LogLevel) -> Self {
        self.config.report_threshold = level;
        self
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the NewRelicLogger, validating the configuration
    pub fn build(self) -> Result<NewRelicLogger<A>> {
        NewRelicLogger::with_config(self.agent, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::agent::RecordingAgent;
    use crate::core::error::LoggerError;
    use crate::core::exception::FatalError;
    use serde_json::json;

    #[test]
    fn test_builder_default() {
        let logger = NewRelicLogger::builder(RecordingAgent::new()).build().unwrap();
        assert_eq!(logger.threshold(), LogLevel::Critical);
    }

    #[test]
    fn test_builder_threshold() {
        let logger = NewRelicLogger::builder(RecordingAgent::new())
            .threshold(LogLevel::Warning)
            .build()
            .unwrap();

        assert!(logger.is_reportable(LogLevel::Warning));
        assert!(logger.is_reportable(LogLevel::Emergency));
        assert!(!logger.is_reportable(LogLevel::Notice));
    }

    #[test]
    fn test_builder_rejects_debug_threshold() {
        let agent = RecordingAgent::new();
        let result = NewRelicLogger::builder(&agent)
            .threshold(LogLevel::Debug)
            .build();
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));

        let config = LoggerConfig {
            report_threshold: LogLevel::Debug,
        };
        assert!(NewRelicLogger::with_config(&agent, config).is_err());
        assert!(agent.calls().is_empty());
    }

    #[test]
    fn test_default_reportable_levels() {
        let logger = NewRelicLogger::new(RecordingAgent::new());
        let reportable: Vec<LogLevel> = LogLevel::ALL
            .into_iter()
            .filter(|level| logger.is_reportable(*level))
            .collect();

        assert_eq!(
            reportable,
            vec![LogLevel::Emergency, LogLevel::Alert, LogLevel::Critical]
        );
    }

    #[test]
    fn test_parameter_value() {
        let scalar = ContextValue::from(12_i64);
        assert!(matches!(parameter_value(&scalar), Cow::Borrowed(FieldValue::Int(12))));

        let composite = ContextValue::from(json!({"b": 1, "a": [true]}));
        assert_eq!(
            parameter_value(&composite).into_owned(),
            FieldValue::String("{\n    \"a\": [\n        true,\n    ],\n    \"b\": 1,\n}".to_string())
        );

        let throwable = ContextValue::from(FatalError::new("halt"));
        let FieldValue::String(rendered) = parameter_value(&throwable).into_owned() else {
            panic!("throwable should render to a string");
        };
        assert!(rendered.starts_with("Fatal("));
        assert!(rendered.contains("\"halt\""));
    }

    #[test]
    fn test_log_str_rejects_unknown_level() {
        let agent = RecordingAgent::new();
        let logger = NewRelicLogger::new(&agent);

        assert!(logger.log_str("verbose", "msg", &Context::new()).is_err());
        assert!(agent.calls().is_empty());

        logger.log_str("CRITICAL", "msg", &Context::new()).unwrap();
        assert_eq!(agent.noticed_errors().len(), 1);
        assert_eq!(
            agent.custom_parameters(),
            vec![(LEVEL_PARAMETER.to_string(), FieldValue::from("critical"))]
        );
    }

    #[test]
    fn test_into_inner() {
        let logger = NewRelicLogger::new(RecordingAgent::new());
        logger.alert("paging", &Context::new()).unwrap();

        let agent = logger.into_inner();
        assert_eq!(agent.calls().len(), 2);
    }
}
