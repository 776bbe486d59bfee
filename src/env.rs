//! Environment variable names used by this crate for convenient
//! configuration from services.
//!
//! These are purely helpers; [`Formatter`](crate::Formatter) itself never
//! reads the environment.

use crate::formatter::FormatterBuilder;
use crate::init::LayerConfig;
use tracing_subscriber::filter::LevelFilter;

/// Service name reported to Error Reporting.
pub const STACKDRIVER_SERVICE_ENV: &str = "STACKDRIVER_SERVICE";

/// Service version reported to Error Reporting.
pub const STACKDRIVER_VERSION_ENV: &str = "STACKDRIVER_VERSION";

/// Most verbose level written, e.g. `debug` or `warn`.
pub const STACKDRIVER_LOG_LEVEL_ENV: &str = "STACKDRIVER_LOG_LEVEL";

/// Service name set by Cloud Run and Knative.
pub const K_SERVICE_ENV: &str = "K_SERVICE";

/// Revision name set by Cloud Run and Knative.
pub const K_REVISION_ENV: &str = "K_REVISION";

/// Read the first of `keys` that is set to a non-empty value.
pub fn env_first(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
}

impl FormatterBuilder {
    /// Builder seeded with service and version from the environment:
    /// `STACKDRIVER_SERVICE` (falling back to `K_SERVICE`) and
    /// `STACKDRIVER_VERSION` (falling back to `K_REVISION`).
    pub fn from_env() -> Self {
        let mut builder = FormatterBuilder::default();
        if let Some(service) = env_first(&[STACKDRIVER_SERVICE_ENV, K_SERVICE_ENV]) {
            builder = builder.service(service);
        }
        if let Some(version) = env_first(&[STACKDRIVER_VERSION_ENV, K_REVISION_ENV]) {
            builder = builder.version(version);
        }
        builder
    }
}

impl LayerConfig {
    /// Default config with `max_level` taken from `STACKDRIVER_LOG_LEVEL`
    /// when it holds a valid level.
    pub fn from_env() -> Self {
        let mut config = LayerConfig::default();
        if let Some(level) = env_first(&[STACKDRIVER_LOG_LEVEL_ENV])
            .and_then(|value| value.parse::<LevelFilter>().ok())
        {
            config.max_level = level;
        }
        config
    }
}
