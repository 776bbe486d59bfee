use crate::error::{FormatError, InitError};
use crate::formatter::Formatter;
use crate::layer::StackdriverLayer;
use crate::record::{Level, LogRecord};
use crate::stack::{CallFrame, StaticFrames};
use std::any::Any;
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Settings for the global subscriber installed by
/// [`init_tracing_with_config`].
///
/// **Fields**
/// - `max_level`: most verbose level that reaches the formatter. Events
///   below it are discarded before any field is visited.
#[derive(Clone, Debug)]
pub struct LayerConfig {
    pub max_level: LevelFilter,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            max_level: LevelFilter::INFO,
        }
    }
}

/// Install a global `tracing` subscriber that writes every event to stdout
/// as a Stackdriver JSON line.
///
/// **Parameters**
/// - `formatter`: configured [`Formatter`] used for every event.
/// - `config`: [`LayerConfig`] controlling level filtering.
///
/// **Returns**
/// - `Err(InitError::SetGlobalDefault)` if a global subscriber was already
///   set.
pub fn init_tracing_with_config(formatter: Formatter, config: LayerConfig) -> Result<(), InitError> {
    let subscriber = Registry::default()
        .with(config.max_level)
        .with(StackdriverLayer::new(formatter));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Equivalent to [`init_tracing_with_config`] with [`LayerConfig::default`].
pub fn init_tracing(formatter: Formatter) -> Result<(), InitError> {
    init_tracing_with_config(formatter, LayerConfig::default())
}

/// Report panics as `ALERT` lines on stdout, then run the previously
/// installed hook.
///
/// The panic location becomes the report location; the payload becomes
/// the message.
pub fn install_panic_hook(formatter: Formatter) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        match panic_line(&formatter, info.payload(), info.location()) {
            Ok(line) => {
                if let Err(e) = std::io::stdout().lock().write_all(&line) {
                    eprintln!("error writing panic record: {}", e);
                }
            }
            Err(e) => eprintln!("error formatting panic: {}", e),
        }
        previous(info);
    }));
}

fn panic_line(
    formatter: &Formatter,
    payload: &(dyn Any + Send),
    location: Option<&Location<'_>>,
) -> Result<Vec<u8>, FormatError> {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    };

    let mut record = LogRecord::new(Level::Panic, message);
    if let Some(name) = std::thread::current().name() {
        record = record.with_field("thread", name);
    }

    let stack = match location {
        Some(loc) => StaticFrames::at_origin(CallFrame::new("", "", loc.file(), loc.line())),
        None => StaticFrames::default(),
    };
    formatter.with_introspector(Arc::new(stack)).format(&record)
}
