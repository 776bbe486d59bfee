//! Wire shape of one Stackdriver log line.
//!
//! Every optional member is skipped when empty so that zero values never
//! show up as JSON keys.

use crate::severity::Severity;
use serde::Serialize;
use std::collections::BTreeMap;

pub type JsonMap = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLocation {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file_path: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub line_number: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub function_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceLocation {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file: String,
    /// Cloud Logging takes the source line as a string.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub line: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub function: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub producer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_location: Option<ReportLocation>,
    #[serde(skip_serializing_if = "JsonMap::is_empty")]
    pub http_request: JsonMap,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
}

impl Context {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
            && self.report_location.is_none()
            && self.http_request.is_empty()
            && self.user.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timestamp: String,
    /// Set on every error-tier line; serialized as `{}` when neither
    /// service nor version is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_context: Option<ServiceContext>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Context::is_empty")]
    pub context: Context,
    #[serde(rename = "logging.googleapis.com/trace", skip_serializing_if = "String::is_empty")]
    pub trace: String,
    #[serde(rename = "logging.googleapis.com/span_id", skip_serializing_if = "String::is_empty")]
    pub span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_location: Option<SourceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    /// Leftover data fields hoisted to the top level when the formatter
    /// flattens data. Never holds an envelope key.
    #[serde(flatten)]
    pub flattened: BTreeMap<String, serde_json::Value>,
}

/// Top-level keys an [`Entry`] can emit; flattened data must not reuse them.
pub const ENVELOPE_KEYS: &[&str] = &[
    "timestamp",
    "serviceContext",
    "message",
    "severity",
    "context",
    "logging.googleapis.com/trace",
    "logging.googleapis.com/span_id",
    "sourceLocation",
    "operation",
];

fn is_zero(n: &u32) -> bool {
    *n == 0
}
