//! Structured context attached to a log call
//!
//! This module provides:
//! - `FieldValue`: scalar value of a custom parameter
//! - `ContextValue`: scalar, composite or exception entry of a context
//! - `Context`: insertion-ordered mapping of keys to context values

use super::error::Result;
use super::exception::{FatalError, ReportableException, Throwable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Context key whose value is reported as the exception instead of a parameter.
pub const EXCEPTION_KEY: &str = "exception";

/// Scalar value of a custom parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::UInt(u)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::UInt(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// One entry of a [`Context`]
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    /// Forwarded to the agent unchanged
    Scalar(FieldValue),
    /// Arrays and objects, forwarded as a dump string
    Composite(serde_json::Value),
    /// Reported through the error report when stored under [`EXCEPTION_KEY`]
    Exception(Throwable),
}

impl ContextValue {
    /// Serialize any value into a context entry.
    ///
    /// Values that serialize to a JSON scalar become `Scalar`, everything
    /// else becomes `Composite`.
    pub fn composite<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, ContextValue::Scalar(_))
    }

    pub fn as_throwable(&self) -> Option<&Throwable> {
        match self {
            ContextValue::Exception(throwable) => Some(throwable),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for ContextValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ContextValue::Scalar(FieldValue::Null),
            Value::Bool(b) => ContextValue::Scalar(FieldValue::Bool(b)),
            Value::String(s) => ContextValue::Scalar(FieldValue::String(s)),
            Value::Number(n) => {
                let scalar = if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                };
                ContextValue::Scalar(scalar)
            }
            composite => ContextValue::Composite(composite),
        }
    }
}

impl From<FieldValue> for ContextValue {
    fn from(value: FieldValue) -> Self {
        ContextValue::Scalar(value)
    }
}

impl From<Throwable> for ContextValue {
    fn from(throwable: Throwable) -> Self {
        ContextValue::Exception(throwable)
    }
}

impl From<ReportableException> for ContextValue {
    fn from(exception: ReportableException) -> Self {
        ContextValue::Exception(exception.into())
    }
}

impl From<FatalError> for ContextValue {
    fn from(fatal: FatalError) -> Self {
        ContextValue::Exception(fatal.into())
    }
}

macro_rules! scalar_context_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ContextValue {
                fn from(value: $ty) -> Self {
                    ContextValue::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_context_value!(String, &str, i64, i32, u32, u64, usize, f64, bool);

impl<T: Into<FieldValue>> From<Option<T>> for ContextValue {
    fn from(value: Option<T>) -> Self {
        ContextValue::Scalar(value.into())
    }
}

/// Per-call context, iterated in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    entries: Vec<(String, ContextValue)>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an entry to the context
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<ContextValue>,
    {
        self.insert(key, value);
        self
    }

    /// Attach the exception reported alongside the log message
    pub fn with_exception(self, throwable: impl Into<Throwable>) -> Self {
        self.with(EXCEPTION_KEY, throwable.into())
    }

    /// Add an entry, returning the value it replaced.
    ///
    /// A replaced entry keeps its original position.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<ContextValue>
    where
        K: Into<String>,
        V: Into<ContextValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, key: &str) -> Option<ContextValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// The throwable stored under [`EXCEPTION_KEY`], if any
    pub fn exception(&self) -> Option<&Throwable> {
        self.get(EXCEPTION_KEY).and_then(ContextValue::as_throwable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Context::new();
        context.extend(iter);
        context
    }
}

impl<K, V> Extend<(K, V)> for Context
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Context {
    type Item = (String, ContextValue);
    type IntoIter = std::vec::IntoIter<(String, ContextValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
