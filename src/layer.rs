use crate::formatter::Formatter;
use crate::record::LogRecord;
use crate::stack::CallFrame;
use chrono::Utc;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, atomic::{AtomicU64, Ordering}};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that turns every event into a
/// [`LogRecord`], formats it with a [`Formatter`] and writes the resulting
/// JSON line to a [`MakeWriter`] (stdout by default).
///
/// Failures to format or write are reported on stderr and counted; they
/// never propagate into the instrumented code.
pub struct StackdriverLayer<W = fn() -> io::Stdout> {
    formatter: Formatter,
    make_writer: W,
    /// Lines successfully written.
    pub formatted_events: Arc<AtomicU64>,
    /// Events lost to a formatting or write error.
    pub failed_events: Arc<AtomicU64>,
}

impl StackdriverLayer {
    /// Create a layer that writes to stdout, where Cloud Run, GKE and
    /// Cloud Functions pick up structured logs.
    pub fn new(formatter: Formatter) -> Self {
        StackdriverLayer::with_writer(formatter, io::stdout as fn() -> io::Stdout)
    }
}

impl<W> StackdriverLayer<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    /// Create a layer writing each line to a writer obtained from
    /// `make_writer`.
    pub fn with_writer(formatter: Formatter, make_writer: W) -> Self {
        StackdriverLayer {
            formatter,
            make_writer,
            formatted_events: Arc::new(AtomicU64::new(0)),
            failed_events: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }
}

impl<S, W> Layer<S> for StackdriverLayer<W>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'a> MakeWriter<'a> + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        let mut message: Option<String> = None;

        let mut visitor = FieldVisitor { fields: &mut fields, message: &mut message };
        event.record(&mut visitor);

        let meta = event.metadata();
        let record = LogRecord {
            message: message.unwrap_or_default(),
            level: (*meta.level()).into(),
            fields,
            timestamp: Some(Utc::now()),
            location: meta.file().map(|file| {
                CallFrame::new(
                    meta.module_path().unwrap_or_default(),
                    "",
                    file,
                    meta.line().unwrap_or(0),
                )
            }),
        };

        let line = match self.formatter.format(&record) {
            Ok(line) => line,
            Err(e) => {
                self.failed_events.fetch_add(1, Ordering::Relaxed);
                eprintln!("error formatting log record: {}", e);
                return;
            }
        };

        // One write per line so concurrent events do not interleave.
        let mut writer = self.make_writer.make_writer_for(meta);
        match writer.write_all(&line) {
            Ok(()) => {
                self.formatted_events.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.failed_events.fetch_add(1, Ordering::Relaxed);
                eprintln!("error writing log record: {}", e);
            }
        }
    }
}

use tracing::field::{Field, Visit};

/// Collects event fields into JSON values. The `message` field becomes the
/// record message; a string `httpRequest` field holding a JSON object is
/// stored as that object so it can be reported as `context.httpRequest`.
pub struct FieldVisitor<'a> {
    pub fields: &'a mut BTreeMap<String, serde_json::Value>,
    pub message: &'a mut Option<String>,
}

impl<'a> FieldVisitor<'a> {
    fn insert(&mut self, field: &Field, value: serde_json::Value) {
        self.fields.insert(field.name().to_string(), value);
    }

    fn insert_text(&mut self, field: &Field, text: String) {
        if field.name() == "message" {
            *self.message = Some(text);
            return;
        }
        if field.name() == "httpRequest" {
            if let Ok(object @ serde_json::Value::Object(_)) = serde_json::from_str(&text) {
                self.insert(field, object);
                return;
            }
        }
        self.insert(field, serde_json::Value::String(text));
    }
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert_text(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, serde_json::Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, serde_json::Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        // NaN and infinities have no JSON form and become null.
        self.insert(field, serde_json::Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, serde_json::Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert_text(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert_text(field, format!("{:?}", value));
    }
}
