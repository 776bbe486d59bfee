use crate::record::Level;
use serde::Serialize;

/// Stackdriver `LogSeverity` values this formatter emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    Alert,
}

impl Severity {
    /// Map a host level onto a severity. Levels without a counterpart
    /// return `None` and the `severity` key is left out of the output.
    pub fn from_level(level: Level) -> Option<Self> {
        match level {
            Level::Trace => None,
            Level::Debug => Some(Severity::Debug),
            Level::Info => Some(Severity::Info),
            Level::Warning => Some(Severity::Warning),
            Level::Error => Some(Severity::Error),
            Level::Fatal => Some(Severity::Critical),
            Level::Panic => Some(Severity::Alert),
        }
    }

    /// Error-tier severities are reported to Error Reporting and carry a
    /// service context and report location.
    pub fn is_error_tier(self) -> bool {
        matches!(self, Severity::Error | Severity::Critical | Severity::Alert)
    }
}
