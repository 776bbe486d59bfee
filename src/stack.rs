//! Call-stack inspection used to attribute a log line to the code that
//! emitted it.
//!
//! [`StackIntrospector`] is the seam: production code walks the real stack
//! through the `backtrace` crate, tests hand in a [`StaticFrames`] list.

use serde::Serialize;
use std::borrow::Cow;

/// Frames the formatter itself occupies above a `walk` call: the origin
/// lookup and `Formatter::format`.
pub(crate) const FORMATTER_FRAMES: usize = 2;

/// One resolved stack frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallFrame {
    /// Source file, empty when debug info is unavailable.
    pub file: String,
    /// 1-based line, `0` when unknown.
    pub line: u32,
    /// Function name without its module path, e.g. `handle` or
    /// `main::{{closure}}`.
    pub function: String,
    /// Module path that owns the function, e.g. `my_app::routes`.
    pub module_path: String,
}

impl CallFrame {
    pub fn new(
        module_path: impl Into<String>,
        function: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        CallFrame {
            file: file.into(),
            line,
            function: function.into(),
            module_path: module_path.into(),
        }
    }

    /// Build a frame from a demangled symbol name such as
    /// `<my_app::Db as my_app::Store>::get`.
    pub fn from_symbol(symbol: &str, file: impl Into<String>, line: u32) -> Self {
        let (module_path, function) = split_symbol(symbol);
        CallFrame::new(module_path, function, file, line)
    }

    /// `true` if the function is a closure body, e.g. `run::{{closure}}`.
    pub fn is_closure(&self) -> bool {
        self.function
            .rsplit("::")
            .next()
            .is_some_and(|segment| segment.starts_with('{'))
    }
}

/// Capability to enumerate the frames above the current call.
pub trait StackIntrospector: Send + Sync {
    /// Visit frames innermost-first, starting `skip` frames above the
    /// caller of `walk`. The visitor receives `None` for a frame that
    /// cannot be resolved to a symbol and returns `false` to stop.
    fn walk(&self, skip: usize, visit: &mut dyn FnMut(Option<CallFrame>) -> bool);

    /// Resolve the single frame `depth` levels above the caller.
    fn resolve_frame(&self, depth: usize) -> Option<CallFrame> {
        let mut found = None;
        self.walk(depth, &mut |frame| {
            found = frame;
            false
        });
        found
    }
}

/// Walks the live stack of the calling thread.
///
/// Inlined functions are reported as frames of their own, so depths are
/// only approximate in optimized builds; callers should rely on module
/// skip lists rather than exact depths.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceIntrospector;

impl StackIntrospector for BacktraceIntrospector {
    fn walk(&self, skip: usize, visit: &mut dyn FnMut(Option<CallFrame>) -> bool) {
        let mut remaining = skip;
        // Frames of the backtrace crate and of this walker are not part of
        // the caller's stack.
        let mut in_prologue = true;

        backtrace::trace(|frame| {
            let mut symbols = Vec::new();
            backtrace::resolve_frame(frame, |symbol| {
                let Some(name) = symbol.name() else {
                    return;
                };
                let file = symbol
                    .filename()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                let line = symbol.lineno().unwrap_or(0);
                symbols.push(CallFrame::from_symbol(&format!("{name:#}"), file, line));
            });

            if symbols.is_empty() {
                if in_prologue {
                    return true;
                }
                if remaining > 0 {
                    remaining -= 1;
                    return true;
                }
                return visit(None);
            }

            for frame in symbols {
                if in_prologue {
                    if is_walker_frame(&frame) {
                        continue;
                    }
                    in_prologue = false;
                }
                if remaining > 0 {
                    remaining -= 1;
                    continue;
                }
                if !visit(Some(frame)) {
                    return false;
                }
            }
            true
        });
    }
}

fn is_walker_frame(frame: &CallFrame) -> bool {
    // Unwinder entry points such as `_Unwind_Backtrace` have no module.
    frame.module_path.is_empty()
        || module_matches(&frame.module_path, "backtrace")
        || frame.module_path == concat!(module_path!(), "::BacktraceIntrospector")
}

/// A fixed list of frames, innermost first.
///
/// Used for testing and for callers that already know the origin, such as
/// a panic hook holding the panic location.
#[derive(Debug, Clone, Default)]
pub struct StaticFrames(pub Vec<CallFrame>);

impl StaticFrames {
    /// A stack whose first frame above the formatter is `origin`.
    pub fn at_origin(origin: CallFrame) -> Self {
        let mut frames = vec![CallFrame::default(); FORMATTER_FRAMES];
        frames.push(origin);
        StaticFrames(frames)
    }
}

impl StackIntrospector for StaticFrames {
    fn walk(&self, skip: usize, visit: &mut dyn FnMut(Option<CallFrame>) -> bool) {
        for frame in self.0.iter().skip(skip) {
            if !visit(Some(frame.clone())) {
                return;
            }
        }
    }
}

/// Rewrites module and file paths before they are compared against the
/// skip list and recorded in the output.
pub trait PathNormalizer: Send + Sync {
    fn normalize<'a>(&self, path: &'a str) -> Cow<'a, str>;
}

/// Keeps only the part of a path after the last occurrence of a marker
/// segment, `/vendor/` by default (the layout `cargo vendor` produces).
#[derive(Debug, Clone)]
pub struct VendorSegment {
    marker: String,
}

impl VendorSegment {
    pub fn new(marker: impl Into<String>) -> Self {
        VendorSegment {
            marker: marker.into(),
        }
    }
}

impl Default for VendorSegment {
    fn default() -> Self {
        VendorSegment::new("/vendor/")
    }
}

impl PathNormalizer for VendorSegment {
    fn normalize<'a>(&self, path: &'a str) -> Cow<'a, str> {
        if self.marker.is_empty() {
            return Cow::Borrowed(path);
        }
        match path.rfind(&self.marker) {
            Some(idx) => Cow::Borrowed(&path[idx + self.marker.len()..]),
            None => Cow::Borrowed(path),
        }
    }
}

/// Leaves paths untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNormalize;

impl PathNormalizer for NoNormalize {
    fn normalize<'a>(&self, path: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(path)
    }
}

/// `true` if `path` is `prefix` itself or one of its submodules.
pub fn module_matches(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

/// `true` if `file` lies in the sources of crate `krate`: a `src`
/// directory whose parent is named after the crate, optionally with a
/// version suffix as in the cargo registry (`tracing-0.1.44/src/...`).
pub fn in_crate_source(file: &str, krate: &str) -> bool {
    let components: Vec<&str> = file.split(['/', '\\']).collect();
    components
        .windows(2)
        .any(|pair| pair[1] == "src" && names_crate(pair[0], krate))
}

fn names_crate(dir: &str, krate: &str) -> bool {
    let dir = dir.replace('-', "_");
    match dir.strip_prefix(krate) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('_')
            .is_some_and(|version| version.starts_with(|c: char| c.is_ascii_digit())),
        None => false,
    }
}

/// Split a demangled symbol into `(module_path, function)`.
///
/// Trailing `{{closure}}`-style segments stay attached to the function, and
/// a qualified impl `<A as B>::f` is owned by `A`. Generic arguments are
/// dropped from the module path.
pub fn split_symbol(symbol: &str) -> (String, String) {
    let mut segments = split_top_level(symbol, "::");
    // Turbofish arguments such as `call_once::<F, ()>` are not path
    // segments.
    let mut index = 0;
    segments.retain(|segment| {
        index += 1;
        index == 1 || !is_generic_args(segment)
    });

    let mut fn_start = segments.len().saturating_sub(1);
    while fn_start > 0 && segments[fn_start].starts_with('{') {
        fn_start -= 1;
    }

    let function = segments[fn_start..].join("::");
    let module = segments[..fn_start]
        .iter()
        .map(|segment| owner_of(segment))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("::");

    (module, function)
}

/// For `<A as B>` returns `A`, or `B` when `A` is not a path (a type
/// parameter or primitive). Generics are removed.
fn owner_of(segment: &str) -> String {
    let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) else {
        return strip_generics(segment);
    };
    // Legacy `<impl Trait for T>` segments carry no module of their own.
    if inner.starts_with("impl ") {
        return String::new();
    }
    let parts = split_top_level(inner, " as ");
    let self_ty = strip_generics(
        parts[0]
            .trim_start_matches('&')
            .trim_start_matches("mut ")
            .trim_start_matches("dyn "),
    );
    match parts.get(1) {
        Some(trait_path) if !is_module_path(&self_ty) => strip_generics(trait_path),
        _ => self_ty,
    }
}

/// `true` for `<...>` segments that are neither a qualified impl nor a
/// legacy `<impl ..>` block.
fn is_generic_args(segment: &str) -> bool {
    match segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Some(inner) => !inner.starts_with("impl ") && split_top_level(inner, " as ").len() == 1,
        None => false,
    }
}

/// A self type names a module only when it is a plain path; type
/// parameters, primitives, fn pointers, tuples and slices do not.
fn is_module_path(ty: &str) -> bool {
    ty.contains("::")
        && ty.starts_with(|c: char| c.is_alphabetic() || c == '_')
        && !ty.contains(['(', '[', ' '])
}

fn strip_generics(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    let mut prev = '\0';
    for c in s.chars() {
        match c {
            '<' => depth += 1,
            '>' if prev != '-' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
        prev = c;
    }
    out.trim_end_matches("::").to_string()
}

/// Split on `sep` wherever it occurs outside of `<...>`.
fn split_top_level<'a>(s: &'a str, sep: &str) -> Vec<&'a str> {
    let bytes = s.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 && bytes[i..].starts_with(sep.as_bytes()) {
            parts.push(&s[start..i]);
            i += sep.len();
            start = i;
            continue;
        }
        i += 1;
    }
    parts.push(&s[start..]);
    parts
}
