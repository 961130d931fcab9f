//! Result handlers: what happens with the anomalies of a parse
//!
//! A session invokes its handler exactly once per parse, after the scan and
//! validation, with the [`ParseReport`] of that pass. The stock policies are:
//!
//! - [`ResultHandler::exit_on_error`]: print diagnostics to stderr and exit
//!   the process with a failure status if anything was found (the default)
//! - [`ResultHandler::report_to`]: print the same diagnostics to a sink and
//!   carry on
//! - [`ResultHandler::collect`]: store every report for later inspection
//! - [`ResultHandler::ignore`]: do nothing
//!
//! Any `Fn(&ParseReport)` closure can be installed as well.

use std::{
    fmt,
    io::{self, Write},
    sync::Arc,
};

use parking_lot::Mutex;

use crate::types::ParseReport;

/// Shared, lockable output sink
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

type HandlerFn = dyn Fn(&ParseReport) + Send + Sync;

/// Policy invoked with the anomalies of each parse
#[derive(Clone)]
pub struct ResultHandler(Option<Arc<HandlerFn>>);

impl ResultHandler {
    /// Wrap a closure
    #[must_use]
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ParseReport) + Send + Sync + 'static,
    {
        Self(Some(Arc::new(handler)))
    }

    /// The null handler, refused by
    /// [`Session::set_result_handler`](crate::Session::set_result_handler)
    #[must_use]
    pub fn empty() -> Self {
        Self(None)
    }

    /// Whether this is the null handler
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Print one diagnostic line per anomaly to stderr, then exit with
    /// status 1 if the report is not clean
    #[must_use]
    pub fn exit_on_error() -> Self {
        Self::new(|report| {
            write_diagnostics(&mut io::stderr().lock(), report).ok();
            if !report.is_clean() {
                tracing::debug!(
                    anomalies = report.anomaly_count(),
                    "Exiting after invalid command line"
                );
                std::process::exit(1);
            }
        })
    }

    /// Print one diagnostic line per anomaly to `sink`, never exiting
    #[must_use]
    pub fn report_to(sink: SharedWriter) -> Self {
        Self::new(move |report| {
            let mut out = sink.lock();
            if let Err(e) = write_diagnostics(&mut *out, report) {
                tracing::warn!("Failed to write parse diagnostics: {e}");
            }
        })
    }

    /// Push a copy of every report into `store`
    #[must_use]
    pub fn collect(store: Arc<Mutex<Vec<ParseReport>>>) -> Self {
        Self::new(move |report| store.lock().push(report.clone()))
    }

    /// Discard every report
    #[must_use]
    pub fn ignore() -> Self {
        Self::new(|_| {})
    }

    pub(crate) fn invoke(&self, report: &ParseReport) {
        if let Some(handler) = &self.0 {
            handler(report);
        }
    }
}

impl<F> From<F> for ResultHandler
where
    F: Fn(&ParseReport) + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl fmt::Debug for ResultHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_empty() {
            "ResultHandler(empty)"
        } else {
            "ResultHandler(..)"
        })
    }
}

/// Write the diagnostic lines for `report`
///
/// Lines are ordered unknown tokens, options without a value, invalid
/// options, then missing required options.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_diagnostics(out: &mut dyn Write, report: &ParseReport) -> io::Result<()> {
    for name in &report.unknown {
        writeln!(out, "* unknown option: {name}")?;
    }
    for name in &report.valueless {
        writeln!(out, "* option requires an argument: {name}")?;
    }
    for name in &report.invalid {
        let value = report.value_of(name).unwrap_or_default();
        writeln!(out, "* invalid argument: {name} = {value}")?;
    }
    for name in &report.missing_required {
        writeln!(out, "* option is required: {name}")?;
    }
    out.flush()
}
