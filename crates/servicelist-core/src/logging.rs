//! Logging and tracing facilities for the service list engine.
//!
//! The engine is instrumented with the `tracing` crate but never installs a
//! subscriber itself. Hosts decide where logs go:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("servicelist::descriptor=debug")
//!     .init();
//! ```
//!
//! Every event carries one of the [`targets`] so a host can turn on, say,
//! picon resolution diagnostics without drowning in cursor traces.

/// Span names used for performance tracing.
pub mod span_names {
    /// Root change and list repopulation.
    pub const SET_ROOT: &str = "servicelist::set_root";
    /// Stable re-sort of the list.
    pub const SORT: &str = "servicelist::sort";
    /// Descriptor computation for one row.
    pub const DESCRIBE: &str = "servicelist::describe";
    /// Paint of one row.
    pub const PAINT: &str = "servicelist::paint";
}

/// Target names for log filtering.
pub mod targets {
    /// Ordered list store (root changes, insert/remove, sort).
    pub const CONTENT: &str = "servicelist::content";
    /// Cursor movement, save/restore, searches.
    pub const CURSOR: &str = "servicelist::cursor";
    /// Marked-set manager and move mode.
    pub const MARKED: &str = "servicelist::marked";
    /// Visual descriptor computation.
    pub const DESCRIPTOR: &str = "servicelist::descriptor";
    /// Paint adapter.
    pub const PAINT: &str = "servicelist::paint";
    /// Picon resolution and decoding.
    pub const PICON: &str = "servicelist::picon";
    /// Visual configuration setters.
    pub const CONFIG: &str = "servicelist::config";
    /// Signal emission.
    pub const SIGNAL: &str = "servicelist_core::signal";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time the hot paths listed in [`span_names`].
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span for `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "servicelist::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level event on the content target.
#[macro_export]
macro_rules! servicelist_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "servicelist::content", $($arg)*)
    };
}

/// Debug-level event on the content target.
#[macro_export]
macro_rules! servicelist_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "servicelist::content", $($arg)*)
    };
}

/// Warn-level event on the content target.
#[macro_export]
macro_rules! servicelist_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "servicelist::content", $($arg)*)
    };
}
