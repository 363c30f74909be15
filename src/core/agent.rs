//! Monitoring agent collaborator
//!
//! The logger talks to the APM agent through [`AgentClient`] only. The agent
//! owns transport and thread-safety; errors it returns reach the caller of
//! `log` unchanged.

use super::error::{LoggerError, Result};
use super::exception::ReportableException;
use super::log_context::FieldValue;
use parking_lot::Mutex;
use std::sync::Arc;

/// Agent operation names, as used in [`LoggerError::Agent`].
pub const ADD_CUSTOM_PARAMETER: &str = "addCustomParameter";
pub const NOTICE_ERROR: &str = "noticeError";

pub trait AgentClient {
    /// Attach a custom parameter to the current transaction.
    fn add_custom_parameter(&self, key: &str, value: &FieldValue) -> Result<()>;

    /// Report an error, optionally with the exception that caused it.
    fn notice_error(&self, message: &str, exception: Option<&ReportableException>) -> Result<()>;
}

impl<A: AgentClient + ?Sized> AgentClient for &A {
    fn add_custom_parameter(&self, key: &str, value: &FieldValue) -> Result<()> {
        (**self).add_custom_parameter(key, value)
    }

    fn notice_error(&self, message: &str, exception: Option<&ReportableException>) -> Result<()> {
        (**self).notice_error(message, exception)
    }
}

impl<A: AgentClient + ?Sized> AgentClient for Box<A> {
    fn add_custom_parameter(&self, key: &str, value: &FieldValue) -> Result<()> {
        (**self).add_custom_parameter(key, value)
    }

    fn notice_error(&self, message: &str, exception: Option<&ReportableException>) -> Result<()> {
        (**self).notice_error(message, exception)
    }
}

impl<A: AgentClient + ?Sized> AgentClient for Arc<A> {
    fn add_custom_parameter(&self, key: &str, value: &FieldValue) -> Result<()> {
        (**self).add_custom_parameter(key, value)
    }

    fn notice_error(&self, message: &str, exception: Option<&ReportableException>) -> Result<()> {
        (**self).notice_error(message, exception)
    }
}

/// A single call received by a [`RecordingAgent`]
#[derive(Debug, Clone, PartialEq)]
pub enum AgentCall {
    CustomParameter {
        key: String,
        value: FieldValue,
    },
    NoticeError {
        message: String,
        exception: Option<ReportableException>,
    },
}

/// In-memory agent that records every call, for tests and local runs.
///
/// # Example
///
/// ```
/// use newrelic_logger::prelude::*;
///
/// let agent = RecordingAgent::new();
/// let logger = NewRelicLogger::new(&agent);
/// logger.critical("disk full", &Context::new().with("mount", "/var")).unwrap();
///
/// assert_eq!(agent.custom_parameters().len(), 2);
/// assert_eq!(agent.noticed_errors().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingAgent {
    calls: Mutex<Vec<AgentCall>>,
    fail_on: Mutex<Option<(&'static str, usize)>>,
}

impl RecordingAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `nth` (zero based) upcoming call to `operation`.
    ///
    /// `operation` is [`ADD_CUSTOM_PARAMETER`] or [`NOTICE_ERROR`]. The failing
    /// call is not recorded.
    pub fn fail_on(&self, operation: &'static str, nth: usize) {
        *self.fail_on.lock() = Some((operation, nth));
    }

    pub fn calls(&self) -> Vec<AgentCall> {
        self.calls.lock().clone()
    }

    pub fn custom_parameters(&self) -> Vec<(String, FieldValue)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                AgentCall::CustomParameter { key, value } => Some((key.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn noticed_errors(&self) -> Vec<(String, Option<ReportableException>)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                AgentCall::NoticeError { message, exception } => {
                    Some((message.clone(), exception.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn check_failure(&self, operation: &'static str) -> Result<()> {
        let mut fail_on = self.fail_on.lock();
        let Some((op, remaining)) = *fail_on else {
            return Ok(());
        };
        if op != operation {
            return Ok(());
        }

        if remaining == 0 {
            *fail_on = None;
            Err(LoggerError::agent(operation, "injected agent failure"))
        } else {
            *fail_on = Some((op, remaining - 1));
            Ok(())
        }
    }
}

impl AgentClient for RecordingAgent {
    fn add_custom_parameter(&self, key: &str, value: &FieldValue) -> Result<()> {
        self.check_failure(ADD_CUSTOM_PARAMETER)?;
        self.calls.lock().push(AgentCall::CustomParameter {
            key: key.to_string(),
            value: value.clone(),
        });
        Ok(())
    }

    fn notice_error(&self, message: &str, exception: Option<&ReportableException>) -> Result<()> {
        self.check_failure(NOTICE_ERROR)?;
        self.calls.lock().push(AgentCall::NoticeError {
            message: message.to_string(),
            exception: exception.cloned(),
        });
        Ok(())
    }
}
