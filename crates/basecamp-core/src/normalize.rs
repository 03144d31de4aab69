//! Turning the readings endpoint's payload into an unread count.
//!
//! The endpoint has answered with several shapes over time. The payload is
//! decoded once into a [`Shape`] and every shape maps to exactly one outcome:
//!
//! | Payload | Outcome |
//! |---|---|
//! | empty body | 0 |
//! | `{"unreads": [...]}` | array length |
//! | `{"readings": [...]}` | array length |
//! | `{"error": ...}` | [`Error::Api`] |
//! | any other object | [`Error::Shape`] |
//! | `[...]` | array length |
//! | any other value | [`Error::Shape`] |
//! | not JSON | [`Error::Parse`] |

use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fmt;

/// Number of unread notifications reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct NotificationCount(usize);

impl NotificationCount {
    pub fn new(count: usize) -> Self {
        Self(count)
    }

    pub fn get(&self) -> usize {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NotificationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recognized top-level payload shapes, in priority order
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Object with an `unreads` array (current API)
    Unreads(Vec<Value>),
    /// Object with a `readings` array but no `unreads` array (older API)
    Readings(Vec<Value>),
    /// Object carrying an `error` field
    ApiErr(String),
    /// Bare array at the root
    Array(Vec<Value>),
    /// Anything else
    Unknown(Value),
}

impl Shape {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::classify_object(map),
            Value::Array(items) => Shape::Array(items),
            other => Shape::Unknown(other),
        }
    }

    fn classify_object(mut map: Map<String, Value>) -> Self {
        if let Some(Value::Array(items)) = map.remove("unreads") {
            return Shape::Unreads(items);
        }
        if let Some(Value::Array(items)) = map.remove("readings") {
            return Shape::Readings(items);
        }
        match map.remove("error") {
            Some(Value::String(message)) => Shape::ApiErr(message),
            Some(other) => Shape::ApiErr(other.to_string()),
            None => Shape::Unknown(Value::Object(map)),
        }
    }
}

/// Extract the unread count from a response body
///
/// `status` is the HTTP status the body arrived with; it is carried into
/// parse and shape errors so a login page or proxy error is recognizable.
pub fn normalize(body: &[u8], status: u16) -> Result<NotificationCount> {
    if body.is_empty() {
        tracing::debug!("Empty response body (Status: {}), treating as no unreads", status);
        return Ok(NotificationCount::default());
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| Error::Parse {
        status,
        message: e.to_string(),
    })?;

    match Shape::classify(value) {
        Shape::Unreads(items) => Ok(NotificationCount::new(items.len())),
        Shape::Readings(items) => {
            tracing::debug!("No 'unreads' array, falling back to 'readings'");
            Ok(NotificationCount::new(items.len()))
        }
        Shape::Array(items) => Ok(NotificationCount::new(items.len())),
        Shape::ApiErr(message) => Err(Error::Api(message)),
        Shape::Unknown(Value::Object(_)) => Err(Error::Shape {
            status,
            message: "no unreads property found".to_string(),
        }),
        Shape::Unknown(other) => Err(Error::Shape {
            status,
            message: format!("unknown JSON structure: {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
