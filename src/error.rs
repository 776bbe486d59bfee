/// Error returned by [`Formatter::format`](crate::formatter::Formatter::format).
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("failed to encode log entry as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error returned when installing the global subscriber.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}
