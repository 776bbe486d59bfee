//! Stackdriver (Google Cloud Logging / Error Reporting) JSON formatting for
//! `tracing`.
//!
//! [`Formatter`] turns one [`LogRecord`] into one JSON line; the
//! [`StackdriverLayer`] feeds it from `tracing` events.

pub mod entry;
pub mod env;
pub mod error;
pub mod formatter;
pub mod init;
pub mod layer;
pub mod record;
pub mod severity;
pub mod stack;

pub use error::{FormatError, InitError};
pub use formatter::{
    Formatter, FormatterBuilder, DEFAULT_OPERATION_ID_KEY, DEFAULT_STACK_SKIP, DEFAULT_SUBJECT_KEY,
    SPAN_ID_KEY, TRACE_ID_KEY,
};
pub use init::{init_tracing, init_tracing_with_config, install_panic_hook, LayerConfig};
pub use layer::StackdriverLayer;
pub use record::{Level, LogRecord};
pub use severity::Severity;
pub use stack::{
    BacktraceIntrospector, CallFrame, NoNormalize, PathNormalizer, StackIntrospector,
    StaticFrames, VendorSegment,
};
