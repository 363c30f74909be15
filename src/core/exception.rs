//! Exception objects handed to the agent's error report
//!
//! A log call may carry either a regular [`ReportableException`] or a
//! [`FatalError`] (an unrecoverable failure such as a caught panic). The agent
//! only accepts the former, so a [`Throwable`] is normalized before it is
//! forwarded.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location};

/// Code carried by a [`FatalError`] unless one is set explicitly.
pub const FATAL_ERROR_CODE: i64 = 1;

/// Class reported for exceptions built from a [`FatalError`].
///
/// Matches the class other agents report for converted fatal errors, so the
/// agent groups them together.
pub const FATAL_ERROR_CLASS: &str = "ErrorException";

const DEFAULT_EXCEPTION_CLASS: &str = "Exception";

/// Common shape of everything that can be reported as an error.
pub trait ExceptionLike {
    fn class(&self) -> &str;
    fn message(&self) -> &str;
    fn code(&self) -> i64;
    fn file(&self) -> Option<&str>;
    fn line(&self) -> Option<u32>;
}

/// Exception passed to [`AgentClient::notice_error`](super::agent::AgentClient::notice_error).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportableException {
    class: String,
    message: String,
    code: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
}

impl ReportableException {
    /// Create an exception located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = Location::caller();
        Self {
            class: DEFAULT_EXCEPTION_CLASS.to_string(),
            message: message.into(),
            code: 0,
            file: Some(location.file().to_string()),
            line: Some(location.line()),
        }
    }

    /// Wrap a Rust error, using its type name as the class.
    #[track_caller]
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        Self::new(error.to_string()).with_class(short_type_name::<E>())
    }

    /// Copy every field of another exception-like value.
    pub fn from_exception_like<E: ExceptionLike + ?Sized>(source: &E) -> Self {
        Self {
            class: source.class().to_string(),
            message: source.message().to_string(),
            code: source.code(),
            file: source.file().map(String::from),
            line: source.line(),
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }
}

impl ExceptionLike for ReportableException {
    fn class(&self) -> &str {
        &self.class
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> i64 {
        self.code
    }

    fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    fn line(&self) -> Option<u32> {
        self.line
    }
}

impl fmt::Display for ReportableException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class, self.message)
    }
}

impl std::error::Error for ReportableException {}

/// An unrecoverable failure, typically a panic caught at a boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatalError {
    message: String,
    code: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
}

impl FatalError {
    /// Create a fatal error located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = Location::caller();
        Self {
            message: message.into(),
            code: FATAL_ERROR_CODE,
            file: Some(location.file().to_string()),
            line: Some(location.line()),
        }
    }

    /// Build a fatal error from a panic payload.
    ///
    /// Payloads that are neither `&str` nor `String` are reported as
    /// "Unknown panic". The location is unknown at this point; attach it with
    /// [`with_location`](Self::with_location) when the caller has one.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        Self {
            message,
            code: FATAL_ERROR_CODE,
            file: None,
            line: None,
        }
    }

    /// Run `f`, turning a panic into a `FatalError`.
    pub fn catch<F, R>(f: F) -> Result<R, FatalError>
    where
        F: FnOnce() -> R,
    {
        panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| Self::from_panic(&*payload))
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// Build the exception reported in place of this fatal error.
    pub fn to_exception(&self) -> ReportableException {
        ReportableException::from_exception_like(self)
    }
}

impl ExceptionLike for FatalError {
    fn class(&self) -> &str {
        FATAL_ERROR_CLASS
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> i64 {
        self.code
    }

    fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    fn line(&self) -> Option<u32> {
        self.line
    }
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FatalError {}

/// Value stored under the `exception` context key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Throwable {
    Exception(ReportableException),
    Fatal(FatalError),
}

impl Throwable {
    /// The exception to report: a regular exception is returned untouched,
    /// a fatal error is converted into a new one.
    pub fn normalize(&self) -> Cow<'_, ReportableException> {
        match self {
            Throwable::Exception(exception) => Cow::Borrowed(exception),
            Throwable::Fatal(fatal) => Cow::Owned(fatal.to_exception()),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Throwable::Fatal(_))
    }

    fn inner(&self) -> &dyn ExceptionLike {
        match self {
            Throwable::Exception(exception) => exception,
            Throwable::Fatal(fatal) => fatal,
        }
    }
}

impl ExceptionLike for Throwable {
    fn class(&self) -> &str {
        self.inner().class()
    }

    fn message(&self) -> &str {
        self.inner().message()
    }

    fn code(&self) -> i64 {
        self.inner().code()
    }

    fn file(&self) -> Option<&str> {
        self.inner().file()
    }

    fn line(&self) -> Option<u32> {
        self.inner().line()
    }
}

impl From<ReportableException> for Throwable {
    fn from(exception: ReportableException) -> Self {
        Throwable::Exception(exception)
    }
}

impl From<FatalError> for Throwable {
    fn from(fatal: FatalError) -> Self {
        Throwable::Fatal(fatal)
    }
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_captures_caller_location() {
        let exception = ReportableException::new("boom");
        assert_eq!(exception.file(), Some(file!()));
        assert!(exception.line().is_some());
        assert_eq!(exception.code(), 0);
        assert_eq!(exception.class(), "Exception");
    }

    #[test]
    fn test_from_error_uses_type_name() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let exception = ReportableException::from_error(&io_err);
        assert_eq!(exception.class(), "Error");
        assert_eq!(exception.message(), "missing file");
    }

    #[test]
    fn test_exception_is_not_rebuilt() {
        let exception = ReportableException::new("runtime failure").with_code(42);
        let throwable = Throwable::from(exception.clone());

        let normalized = throwable.normalize();
        assert!(matches!(normalized, Cow::Borrowed(_)));
        assert_eq!(*normalized, exception);
    }

    #[test]
    fn test_fatal_error_is_converted() {
        let fatal = FatalError::new("out of memory").with_location("src/main.rs", 12);
        let throwable = Throwable::from(fatal.clone());

        let normalized = throwable.normalize();
        assert!(matches!(normalized, Cow::Owned(_)));
        assert_eq!(normalized.class(), FATAL_ERROR_CLASS);
        assert_eq!(normalized.message(), fatal.message());
        assert_eq!(normalized.code(), FATAL_ERROR_CODE);
        assert_eq!(normalized.file(), Some("src/main.rs"));
        assert_eq!(normalized.line(), Some(12));
    }

    #[test]
    fn test_from_panic_payloads() {
        let static_payload: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(FatalError::from_panic(&*static_payload).message(), "static str");

        let owned_payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(FatalError::from_panic(&*owned_payload).message(), "owned");

        let other_payload: Box<dyn Any + Send> = Box::new(17_u8);
        assert_eq!(FatalError::from_panic(&*other_payload).message(), "Unknown panic");
    }

    #[test]
    fn test_catch() {
        assert_eq!(FatalError::catch(|| 5).unwrap(), 5);

        let fatal = FatalError::catch::<_, ()>(|| panic!("worker died")).unwrap_err();
        assert_eq!(fatal.message(), "worker died");
        assert_eq!(fatal.code(), FATAL_ERROR_CODE);
        assert!(fatal.file().is_none());
    }

    #[test]
    fn test_display() {
        let exception = ReportableException::new("bad input").with_class("ValidationError");
        assert_eq!(exception.to_string(), "ValidationError: bad input");
        assert_eq!(FatalError::new("halt").to_string(), "halt");
    }
}
