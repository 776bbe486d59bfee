use crate::entry::{
    Context, Entry, JsonMap, Operation, ReportLocation, ServiceContext, SourceLocation,
    ENVELOPE_KEYS,
};
use crate::error::FormatError;
use crate::record::LogRecord;
use crate::severity::Severity;
use crate::stack::{
    in_crate_source, module_matches, BacktraceIntrospector, CallFrame, PathNormalizer, StackIntrospector,
    VendorSegment, FORMATTER_FRAMES,
};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Field holding the authenticated subject, reported as `context.user`.
pub const DEFAULT_SUBJECT_KEY: &str = "X-Subject-Id";

/// Field holding the request id, reported as `operation.id`.
pub const DEFAULT_OPERATION_ID_KEY: &str = "X-Request-Id";

// Mirrors the basictracer text-map propagation keys; keep in sync.
pub const TRACE_ID_KEY: &str = "ot-tracer-traceid";
pub const SPAN_ID_KEY: &str = "ot-tracer-spanid";

/// Module paths that belong to the logging host and are never reported as
/// the origin of a log line.
pub const DEFAULT_STACK_SKIP: &[&str] = &[
    "tracing",
    "tracing_core",
    "tracing_subscriber",
    env!("CARGO_CRATE_NAME"),
    "backtrace",
    "std",
    "core",
    "alloc",
];

/// Formats [`LogRecord`]s as Stackdriver JSON lines.
///
/// A `Formatter` is immutable once built and cheap to clone, so one
/// instance can be shared by every thread that logs.
///
/// ```
/// use tracing_stackdriver_format::{Formatter, Level, LogRecord};
///
/// let formatter = Formatter::builder()
///     .service("billing")
///     .version("1.4.0")
///     .timestamps(false)
///     .build();
///
/// let line = formatter
///     .format(&LogRecord::new(Level::Info, "ready").with_field("port", 8080))
///     .unwrap();
/// assert!(line.ends_with(b"\n"));
/// ```
#[derive(Clone)]
pub struct Formatter {
    service: Option<String>,
    version: Option<String>,
    stack_skip: Vec<String>,
    subject_key: String,
    operation_id_key: String,
    timestamps: bool,
    flatten_data: bool,
    introspector: Arc<dyn StackIntrospector>,
    normalizer: Arc<dyn PathNormalizer>,
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter {
            service: None,
            version: None,
            stack_skip: DEFAULT_STACK_SKIP.iter().map(|s| s.to_string()).collect(),
            subject_key: DEFAULT_SUBJECT_KEY.to_string(),
            operation_id_key: DEFAULT_OPERATION_ID_KEY.to_string(),
            timestamps: true,
            flatten_data: false,
            introspector: Arc::new(BacktraceIntrospector),
            normalizer: Arc::new(VendorSegment::default()),
        }
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatter")
            .field("service", &self.service)
            .field("version", &self.version)
            .field("stack_skip", &self.stack_skip)
            .field("subject_key", &self.subject_key)
            .field("operation_id_key", &self.operation_id_key)
            .field("timestamps", &self.timestamps)
            .field("flatten_data", &self.flatten_data)
            .finish_non_exhaustive()
    }
}

impl Formatter {
    /// Formatter with default settings; see [`Formatter::builder`].
    pub fn new() -> Self {
        Formatter::default()
    }

    pub fn builder() -> FormatterBuilder {
        FormatterBuilder {
            formatter: Formatter::default(),
        }
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn stack_skip(&self) -> &[String] {
        &self.stack_skip
    }

    /// Same formatter, but origins are resolved through `introspector`.
    pub(crate) fn with_introspector(&self, introspector: Arc<dyn StackIntrospector>) -> Self {
        Formatter {
            introspector,
            ..self.clone()
        }
    }

    /// Encode `record` as one newline-terminated JSON document.
    ///
    /// The record is left untouched; special fields are extracted from a
    /// copy of its field map.
    #[inline(never)]
    pub fn format(&self, record: &LogRecord) -> Result<Vec<u8>, FormatError> {
        let severity = Severity::from_level(record.level);

        let mut entry = Entry {
            message: record.message.clone(),
            severity,
            context: Context {
                data: record.fields.clone(),
                ..Context::default()
            },
            ..Entry::default()
        };

        if self.timestamps {
            let timestamp = record.timestamp.unwrap_or_else(Utc::now);
            entry.timestamp = timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        }

        match severity {
            Some(severity) if severity.is_error_tier() => {
                // Always present on error-tier lines, even as `{}`.
                entry.service_context = Some(ServiceContext {
                    service: self.service.clone(),
                    version: self.version.clone(),
                });

                // Error Reporting expects the error text inside the message.
                if let Some(err) = entry.context.data.remove("error") {
                    entry.message = format!("{}: {}", record.message, value_text(&err));
                }

                if let Some(request) = take_object(&mut entry.context.data, "httpRequest") {
                    entry.context.http_request = request;
                }

                if let Some(user) = take_string(&mut entry.context.data, &self.subject_key) {
                    entry.context.user = user;
                }

                if let Some(origin) = self.origin_for(record) {
                    entry.context.report_location = Some(ReportLocation {
                        file_path: origin.file,
                        line_number: origin.line,
                        function_name: origin.function,
                    });
                }
            }
            _ => {
                if let Some(origin) = self.origin_for(record) {
                    entry.source_location = Some(SourceLocation {
                        file: origin.file,
                        line: if origin.line == 0 {
                            String::new()
                        } else {
                            origin.line.to_string()
                        },
                        function: origin.function,
                    });
                }
            }
        }

        if let Some(id) = take_string(&mut entry.context.data, &self.operation_id_key) {
            entry.operation = Some(Operation {
                id,
                ..Operation::default()
            });
        }

        if let Some(trace) = take_string(&mut entry.context.data, TRACE_ID_KEY) {
            entry.trace = trace;
        }
        if let Some(span_id) = take_string(&mut entry.context.data, SPAN_ID_KEY) {
            entry.span_id = span_id;
        }

        if self.flatten_data {
            let data = std::mem::take(&mut entry.context.data);
            for (key, value) in data {
                if ENVELOPE_KEYS.contains(&key.as_str()) {
                    entry.context.data.insert(key, value);
                } else {
                    entry.flattened.insert(key, value);
                }
            }
        }

        let mut line = serde_json::to_vec(&entry)?;
        line.push(b'\n');
        Ok(line)
    }

    /// Origin of `record`: the resolved stack frame, with file and line
    /// taken from the record's own location when debug info is missing or
    /// points into a skipped crate's macro source.
    fn origin_for(&self, record: &LogRecord) -> Option<CallFrame> {
        let mut origin = self.error_origin()?;
        if origin.file.is_empty() || self.in_skipped_source(&origin.file) {
            if let Some(location) = record.location.as_ref().filter(|l| !l.file.is_empty()) {
                origin.file = self.normalizer.normalize(&location.file).into_owned();
                origin.line = location.line;
            }
        }
        Some(origin)
    }

    /// First frame above the formatter whose module is not on the skip
    /// list, or `None` when the stack runs out or a frame cannot be
    /// resolved.
    #[inline(never)]
    pub fn error_origin(&self) -> Option<CallFrame> {
        let mut origin = None;
        self.introspector.walk(FORMATTER_FRAMES, &mut |frame| {
            let Some(mut frame) = frame else {
                return false;
            };
            frame.module_path = self.normalizer.normalize(&frame.module_path).into_owned();
            frame.file = self.normalizer.normalize(&frame.file).into_owned();
            if self.is_skipped(&frame) {
                return true;
            }
            origin = Some(frame);
            false
        });
        origin
    }

    fn is_skipped(&self, frame: &CallFrame) -> bool {
        if self
            .stack_skip
            .iter()
            .any(|prefix| module_matches(&frame.module_path, prefix))
        {
            return true;
        }
        // Closures generated by a logging macro belong to the caller's
        // module but resolve to the macro's source file.
        frame.is_closure() && self.in_skipped_source(&frame.file)
    }

    fn in_skipped_source(&self, file: &str) -> bool {
        self.stack_skip
            .iter()
            .filter(|prefix| !prefix.contains("::"))
            .any(|krate| in_crate_source(file, krate))
    }
}

/// Builder for [`Formatter`]; each method is one configuration option.
#[derive(Debug, Clone, Default)]
pub struct FormatterBuilder {
    formatter: Formatter,
}

impl FormatterBuilder {
    /// Service name reported in `serviceContext.service`.
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.formatter.service = Some(service.into());
        self
    }

    /// Service version reported in `serviceContext.version`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.formatter.version = Some(version.into());
        self
    }

    /// Skip frames from `module_path` and its submodules when locating the
    /// origin of a log line. Adds to the defaults.
    pub fn stack_skip(mut self, module_path: impl Into<String>) -> Self {
        self.formatter.stack_skip.push(module_path.into());
        self
    }

    pub fn subject_key(mut self, key: impl Into<String>) -> Self {
        self.formatter.subject_key = key.into();
        self
    }

    pub fn operation_id_key(mut self, key: impl Into<String>) -> Self {
        self.formatter.operation_id_key = key.into();
        self
    }

    /// Disable to get byte-for-byte reproducible output.
    pub fn timestamps(mut self, enabled: bool) -> Self {
        self.formatter.timestamps = enabled;
        self
    }

    /// Hoist leftover data fields to the top level of each line instead of
    /// nesting them under `context.data`.
    pub fn flatten_data(mut self, enabled: bool) -> Self {
        self.formatter.flatten_data = enabled;
        self
    }

    pub fn introspector(mut self, introspector: impl StackIntrospector + 'static) -> Self {
        self.formatter.introspector = Arc::new(introspector);
        self
    }

    pub fn path_normalizer(mut self, normalizer: impl PathNormalizer + 'static) -> Self {
        self.formatter.normalizer = Arc::new(normalizer);
        self
    }

    pub fn build(self) -> Formatter {
        self.formatter
    }
}

/// Remove `key` if it holds a non-empty string.
fn take_string(data: &mut BTreeMap<String, Value>, key: &str) -> Option<String> {
    match data.get(key) {
        Some(Value::String(s)) if !s.is_empty() => {}
        _ => return None,
    }
    match data.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Remove `key` if it holds a JSON object.
fn take_object(data: &mut BTreeMap<String, Value>, key: &str) -> Option<JsonMap> {
    if !matches!(data.get(key), Some(Value::Object(_))) {
        return None;
    }
    match data.remove(key) {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;
    use crate::stack::{NoNormalize, StaticFrames};
    use chrono::TimeZone;
    use serde_json::json;

    fn app_stack() -> StaticFrames {
        StaticFrames(vec![
            CallFrame::new(
                "tracing_stackdriver_format::formatter::Formatter",
                "error_origin",
                "src/formatter.rs",
                210,
            ),
            CallFrame::new(
                "tracing_stackdriver_format::formatter::Formatter",
                "format",
                "src/formatter.rs",
                120,
            ),
            CallFrame::new(
                "tracing_core::dispatcher",
                "get_default",
                "/root/.cargo/registry/src/tracing-core-0.1.32/src/dispatcher.rs",
                391,
            ),
            CallFrame::new("my_app::handlers", "login", "/srv/app/src/handlers.rs", 42),
            CallFrame::new("my_app", "main", "/srv/app/src/main.rs", 7),
        ])
    }

    fn formatter() -> FormatterBuilder {
        Formatter::builder()
            .service("test")
            .version("0.1")
            .timestamps(false)
            .introspector(app_stack())
    }

    fn render(formatter: &Formatter, record: &LogRecord) -> Value {
        let line = formatter.format(record).unwrap();
        serde_json::from_slice(&line).unwrap()
    }

    #[test]
    fn info_gets_source_location_only() {
        let f = formatter().build();
        let out = render(&f, &LogRecord::new(Level::Info, "my log entry").with_field("foo", "bar"));

        assert_eq!(
            out,
            json!({
                "message": "my log entry",
                "severity": "INFO",
                "context": { "data": { "foo": "bar" } },
                "sourceLocation": {
                    "file": "/srv/app/src/handlers.rs",
                    "line": "42",
                    "function": "login",
                },
            })
        );
    }

    #[test]
    fn error_gets_service_context_and_report_location() {
        let f = formatter().build();
        let out = render(&f, &LogRecord::new(Level::Error, "my log entry").with_field("foo", "bar"));

        assert_eq!(
            out,
            json!({
                "serviceContext": { "service": "test", "version": "0.1" },
                "message": "my log entry",
                "severity": "ERROR",
                "context": {
                    "data": { "foo": "bar" },
                    "reportLocation": {
                        "filePath": "/srv/app/src/handlers.rs",
                        "lineNumber": 42,
                        "functionName": "login",
                    },
                },
            })
        );
    }

    #[test]
    fn error_field_is_merged_into_message() {
        let f = formatter().build();
        let record = LogRecord::new(Level::Error, "my log entry")
            .with_field("foo", "bar")
            .with_field("error", "test error");
        let out = render(&f, &record);

        assert_eq!(out["message"], "my log entry: test error");
        assert!(out["context"]["data"].get("error").is_none());
        assert_eq!(out["context"]["data"]["foo"], "bar");
        // The caller's record is not touched.
        assert_eq!(record.fields["error"], json!("test error"));
    }

    #[test]
    fn non_string_error_is_rendered_as_json() {
        let f = formatter().build();
        let out = render(&f, &LogRecord::new(Level::Fatal, "boom").with_field("error", 7));
        assert_eq!(out["message"], "boom: 7");
        assert_eq!(out["severity"], "CRITICAL");
    }

    #[test]
    fn error_field_below_error_tier_stays_in_data() {
        let f = formatter().build();
        let out = render(&f, &LogRecord::new(Level::Warning, "careful").with_field("error", "x"));
        assert_eq!(out["message"], "careful");
        assert_eq!(out["context"]["data"]["error"], "x");
    }

    #[test]
    fn http_request_object_moves_to_context() {
        let f = formatter().build();
        let out = render(
            &f,
            &LogRecord::new(Level::Error, "my log entry")
                .with_field("httpRequest", json!({ "method": "GET" })),
        );

        assert_eq!(out["context"]["httpRequest"], json!({ "method": "GET" }));
        assert!(out["context"].get("data").is_none());
    }

    #[test]
    fn malformed_http_request_is_left_in_data() {
        let f = formatter().build();
        let out = render(
            &f,
            &LogRecord::new(Level::Error, "my log entry").with_field("httpRequest", "GET /"),
        );

        assert!(out["context"].get("httpRequest").is_none());
        assert_eq!(out["context"]["data"]["httpRequest"], "GET /");
    }

    #[test]
    fn subject_becomes_user_only_for_errors() {
        let f = formatter().build();

        let out = render(&f, &LogRecord::new(Level::Panic, "x").with_field("X-Subject-Id", "u-1"));
        assert_eq!(out["severity"], "ALERT");
        assert_eq!(out["context"]["user"], "u-1");
        assert!(out["context"].get("data").is_none());

        let out = render(&f, &LogRecord::new(Level::Info, "x").with_field("X-Subject-Id", "u-1"));
        assert!(out.get("context").unwrap().get("user").is_none());
        assert_eq!(out["context"]["data"]["X-Subject-Id"], "u-1");

        let out = render(&f, &LogRecord::new(Level::Error, "x").with_field("X-Subject-Id", 12));
        assert_eq!(out["context"]["data"]["X-Subject-Id"], 12);
    }

    #[test]
    fn operation_and_tracing_ids_are_extracted_for_every_level() {
        let f = formatter().build();
        for level in [Level::Debug, Level::Error] {
            let record = LogRecord::new(level, "x")
                .with_field("X-Request-Id", "req-9")
                .with_field(TRACE_ID_KEY, "t-1")
                .with_field(SPAN_ID_KEY, "s-1")
                .with_field("keep", true);
            let out = render(&f, &record);

            assert_eq!(out["operation"], json!({ "id": "req-9" }));
            assert_eq!(out["logging.googleapis.com/trace"], "t-1");
            assert_eq!(out["logging.googleapis.com/span_id"], "s-1");
            assert_eq!(out["context"]["data"], json!({ "keep": true }));
        }
    }

    #[test]
    fn custom_keys_replace_defaults() {
        let f = formatter()
            .subject_key("user_id")
            .operation_id_key("request_id")
            .build();
        let record = LogRecord::new(Level::Error, "x")
            .with_field("user_id", "alice")
            .with_field("request_id", "r-1")
            .with_field("X-Request-Id", "ignored");
        let out = render(&f, &record);

        assert_eq!(out["context"]["user"], "alice");
        assert_eq!(out["operation"]["id"], "r-1");
        assert_eq!(out["context"]["data"]["X-Request-Id"], "ignored");
    }

    #[test]
    fn trace_level_has_no_severity() {
        let f = formatter().build();
        let out = render(&f, &LogRecord::new(Level::Trace, "noise"));
        assert!(out.get("severity").is_none());
        assert!(out.get("serviceContext").is_none());
        assert_eq!(out["sourceLocation"]["function"], "login");
    }

    #[test]
    fn timestamp_uses_record_time_in_rfc3339_seconds() {
        let f = formatter().timestamps(true).build();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 5).unwrap();
        let out = render(&f, &LogRecord::new(Level::Info, "x").with_timestamp(at));
        assert_eq!(out["timestamp"], "2024-03-01T12:00:05Z");

        let out = render(&f, &LogRecord::new(Level::Info, "x"));
        let now = out["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(now).is_ok());
        assert!(now.ends_with('Z'));
    }

    #[test]
    fn exhausted_stack_omits_location() {
        let f = formatter()
            .introspector(StaticFrames(app_stack().0[..3].to_vec()))
            .build();

        let out = render(&f, &LogRecord::new(Level::Info, "x"));
        assert_eq!(out, json!({ "message": "x", "severity": "INFO" }));

        let out = render(&f, &LogRecord::new(Level::Error, "x"));
        assert!(out.get("context").is_none());
    }

    struct Unresolvable;

    impl StackIntrospector for Unresolvable {
        fn walk(&self, _skip: usize, visit: &mut dyn FnMut(Option<CallFrame>) -> bool) {
            if visit(None) {
                visit(Some(CallFrame::new("my_app", "main", "main.rs", 1)));
            }
        }
    }

    #[test]
    fn unresolvable_frame_ends_the_walk() {
        let f = formatter().introspector(Unresolvable).build();
        assert_eq!(f.error_origin(), None);
    }

    #[test]
    fn extra_stack_skip_moves_origin_outward() {
        let f = formatter().stack_skip("my_app::handlers").build();
        let origin = f.error_origin().unwrap();
        assert_eq!(origin.function, "main");
        assert_eq!(origin.line, 7);
    }

    #[test]
    fn vendored_file_paths_are_shortened() {
        let stack = StaticFrames(vec![
            CallFrame::default(),
            CallFrame::default(),
            CallFrame::new("dep::api", "call", "/srv/app/vendor/dep/src/api.rs", 3),
        ]);

        let f = formatter().introspector(stack.clone()).build();
        assert_eq!(f.error_origin().unwrap().file, "dep/src/api.rs");

        let f = formatter()
            .introspector(stack)
            .path_normalizer(NoNormalize)
            .build();
        assert_eq!(f.error_origin().unwrap().file, "/srv/app/vendor/dep/src/api.rs");
    }

    #[test]
    fn service_context_present_on_error_tier_when_unconfigured() {
        let f = Formatter::builder()
            .timestamps(false)
            .introspector(app_stack())
            .build();

        for level in [Level::Error, Level::Fatal, Level::Panic] {
            let out = render(&f, &LogRecord::new(level, "x"));
            assert_eq!(out["serviceContext"], json!({}), "{level:?}");
            assert!(out["context"].get("reportLocation").is_some());
        }

        let out = render(&f, &LogRecord::new(Level::Warning, "x"));
        assert!(out.get("serviceContext").is_none());
    }

    #[test]
    fn macro_closures_resolving_into_skipped_crates_are_passed_over() {
        let stack = StaticFrames::at_origin(CallFrame::new(
            "my_app::handlers",
            "login::{{closure}}",
            "/home/u/.cargo/registry/src/index.crates.io-6f17d22bba15001f/tracing-0.1.44/src/macros.rs",
            905,
        ));
        let mut frames = stack.0;
        frames.push(CallFrame::new("my_app::handlers", "login", "/srv/app/src/handlers.rs", 42));

        let f = formatter().introspector(StaticFrames(frames)).build();
        let origin = f.error_origin().unwrap();
        assert_eq!(origin.function, "login");
        assert_eq!(origin.file, "/srv/app/src/handlers.rs");
        assert_eq!(origin.line, 42);
    }

    #[test]
    fn macro_source_lines_are_replaced_by_record_location() {
        let f = formatter()
            .introspector(StaticFrames::at_origin(CallFrame::new(
                "my_app::handlers",
                "login",
                "/home/u/.cargo/registry/src/index.crates.io-6f17d22bba15001f/tracing-0.1.44/src/macros.rs",
                884,
            )))
            .build();
        let record = LogRecord::new(Level::Error, "x")
            .with_location(CallFrame::new("my_app::handlers", "", "src/handlers.rs", 40));

        let out = render(&f, &record);
        assert_eq!(
            out["context"]["reportLocation"],
            json!({ "filePath": "src/handlers.rs", "lineNumber": 40, "functionName": "login" })
        );
    }

    #[test]
    fn closures_in_application_sources_are_kept() {
        let f = formatter()
            .introspector(StaticFrames::at_origin(CallFrame::new(
                "my_app::jobs",
                "run::{{closure}}",
                "/srv/app/src/jobs.rs",
                17,
            )))
            .build();
        let origin = f.error_origin().unwrap();
        assert_eq!(origin.function, "run::{{closure}}");
        assert_eq!(origin.line, 17);
    }

    #[test]
    fn record_location_fills_frames_without_debug_info() {
        let f = formatter()
            .introspector(StaticFrames::at_origin(CallFrame::new("my_app::jobs", "run", "", 0)))
            .build();
        let record = LogRecord::new(Level::Info, "x")
            .with_location(CallFrame::new("my_app::jobs", "", "src/jobs.rs", 88));

        let out = render(&f, &record);
        assert_eq!(
            out["sourceLocation"],
            json!({ "file": "src/jobs.rs", "line": "88", "function": "run" })
        );

        let out = render(&f, &LogRecord::new(Level::Error, "x"));
        assert_eq!(out["context"]["reportLocation"], json!({ "functionName": "run" }));
    }

    #[test]
    fn resolved_file_wins_over_record_location() {
        let f = formatter().build();
        let record = LogRecord::new(Level::Info, "x")
            .with_location(CallFrame::new("my_app::handlers", "", "elsewhere.rs", 1));
        let out = render(&f, &record);
        assert_eq!(out["sourceLocation"]["file"], "/srv/app/src/handlers.rs");
        assert_eq!(out["sourceLocation"]["line"], "42");
    }

    #[test]
    fn flatten_data_hoists_fields_without_clobbering_envelope() {
        let f = formatter().flatten_data(true).build();
        let out = render(
            &f,
            &LogRecord::new(Level::Info, "my log entry")
                .with_field("foo", "bar")
                .with_field("severity", "spoofed"),
        );

        assert_eq!(out["foo"], "bar");
        assert_eq!(out["severity"], "INFO");
        assert_eq!(out["context"]["data"], json!({ "severity": "spoofed" }));
    }

    #[test]
    fn output_is_a_single_line() {
        let f = formatter().build();
        let line = f
            .format(&LogRecord::new(Level::Info, "multi\nline"))
            .unwrap();
        assert_eq!(line.iter().filter(|b| **b == b'\n').count(), 1);
        assert_eq!(line.last(), Some(&b'\n'));
    }

    #[test]
    fn defaults_seed_host_modules() {
        let f = Formatter::new();
        assert!(f.stack_skip().iter().any(|s| s == "tracing_core"));
        assert!(f.stack_skip().iter().any(|s| s == "tracing_stackdriver_format"));
        assert_eq!(f.service(), None);
        assert_eq!(f.version(), None);
    }
}
