use crate::stack::CallFrame;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Level of a [`LogRecord`], as handed over by the logging host.
///
/// `Trace` has no Stackdriver counterpart and produces no severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
    Panic,
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// One log entry as produced by the host, before formatting.
///
/// The formatter only reads a record; extraction of special fields works
/// on a copy of `fields`.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub message: String,
    pub level: Level,
    pub fields: BTreeMap<String, serde_json::Value>,
    pub timestamp: Option<DateTime<Utc>>,
    /// Call site reported by the host, used to fill in the file and line
    /// of a stack frame resolved without debug info.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<CallFrame>,
}

impl LogRecord {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        LogRecord {
            message: message.into(),
            level,
            fields: BTreeMap::new(),
            timestamp: None,
            location: None,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_location(mut self, location: CallFrame) -> Self {
        self.location = Some(location);
        self
    }
}
