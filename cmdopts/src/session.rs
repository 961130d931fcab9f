//! The session: declarations, parsing and queries behind one lock

use std::{io::Write, sync::Arc};

use parking_lot::{Mutex, RwLock};

use crate::{
    cast::FromArg,
    errors::{CmdOptsError, CmdOptsResult},
    handler::{ResultHandler, SharedWriter},
    parser::{classify, scan_tokens},
    registry::OptionRegistry,
    strings::split,
    types::{OptionKind, SwitchOption},
    usage::{UsageView, render},
    validator::{Validator, ValidatorRegistry},
};

/// Switch declared by every session; prints usage when present
pub const HELP_SWITCH: &str = "-h";

/// A set of declared options and the state of their last parse
///
/// Declarations, validator attachment, handler replacement and parsing take
/// the session lock exclusively; queries share it. Independent sessions share
/// nothing.
///
/// The result handler runs after [`parse`](Self::parse) releases the lock, so
/// a handler may query the session. Another thread may mutate the session
/// between the end of the scan and the handler call; the handler still gets
/// the [`ParseReport`](crate::ParseReport) built from that scan.
///
/// # Examples
///
/// ```
/// use cmdopts::{ResultHandler, Session};
///
/// let session = Session::new("Copies a file");
/// session.set_result_handler(ResultHandler::ignore())?;
/// session.declare_required("-in", "an input file")?;
/// session.declare_required("-out", "an output file")?;
/// session.declare_optional("-opt1", "this is optional", "5")?;
///
/// let left_overs = session.parse(["copy", "-in", "a.txt", "-out", "b.txt", "stray"]);
///
/// assert_eq!(left_overs, vec!["stray"]);
/// assert_eq!(session.get_value("-in")?, "a.txt");
/// assert_eq!(session.get_value_as::<u32>("-opt1")?, 5);
/// # Ok::<(), cmdopts::CmdOptsError>(())
/// ```
pub struct Session {
    state: RwLock<SessionState>,
}

struct SessionState {
    description: String,
    extra_usage: String,
    program_name: String,
    options: OptionRegistry,
    validators: ValidatorRegistry,
    handler: ResultHandler,
    usage_output: SharedWriter,
    exit_on_help: bool,
    help_requested: bool,
}

impl SessionState {
    fn usage_view(&self) -> UsageView<'_> {
        UsageView {
            program_name: &self.program_name,
            description: &self.description,
            extra_usage: &self.extra_usage,
            options: &self.options,
            validators: &self.validators,
        }
    }
}

impl Session {
    /// Create a session with a program description shown in usage text
    ///
    /// The session starts with the [`HELP_SWITCH`] declared, usage printed
    /// to stdout and the [`ResultHandler::exit_on_error`] policy.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_extra_usage(description, "")
    }

    /// Like [`new`](Self::new), with text appended to the usage line
    ///
    /// Typically names the positional arguments left over after parsing, for
    /// example `"FILE..."`.
    #[must_use]
    pub fn with_extra_usage(description: impl Into<String>, extra_usage: impl Into<String>) -> Self {
        let mut options = OptionRegistry::new();
        options.insert_switch(SwitchOption::new(
            HELP_SWITCH.to_string(),
            "Show program help.".to_string(),
            false,
        ));
        let stdout: SharedWriter = Arc::new(Mutex::new(std::io::stdout()));

        Self {
            state: RwLock::new(SessionState {
                description: description.into(),
                extra_usage: extra_usage.into(),
                program_name: String::new(),
                options,
                validators: ValidatorRegistry::new(),
                handler: ResultHandler::exit_on_error(),
                usage_output: stdout,
                exit_on_help: true,
                help_requested: false,
            }),
        }
    }

    /// Declare a value-option that must appear on the command line
    ///
    /// # Errors
    ///
    /// Returns [`CmdOptsError::DuplicateOption`] if the name is taken, or
    /// [`CmdOptsError::InvalidOption`] if it is empty once trimmed.
    pub fn declare_required(&self, name: &str, description: &str) -> CmdOptsResult<()> {
        self.state
            .write()
            .options
            .declare_value(name, description, "", true)?;
        tracing::debug!(name, "Declared required option");
        Ok(())
    }

    /// Declare a value-option that falls back to `default_value`
    ///
    /// # Errors
    ///
    /// Same conditions as [`declare_required`](Self::declare_required).
    pub fn declare_optional(
        &self,
        name: &str,
        description: &str,
        default_value: &str,
    ) -> CmdOptsResult<()> {
        self.state
            .write()
            .options
            .declare_value(name, description, default_value, false)?;
        tracing::debug!(name, default_value, "Declared optional option");
        Ok(())
    }

    /// Declare a switch; its presence sets it to `!default_on`
    ///
    /// # Errors
    ///
    /// Same conditions as [`declare_required`](Self::declare_required).
    pub fn declare_switch(&self, name: &str, description: &str, default_on: bool) -> CmdOptsResult<()> {
        self.state
            .write()
            .options
            .declare_switch(name, description, default_on)?;
        tracing::debug!(name, default_on, "Declared switch");
        Ok(())
    }

    /// Attach a validator to a declared value-option
    ///
    /// Validators run after every parse, in attachment order, against the
    /// option's effective value.
    ///
    /// # Errors
    ///
    /// Returns [`CmdOptsError::UndefinedOption`] if `name` is not a declared
    /// value-option, or [`CmdOptsError::InvalidValidator`] if the validator is
    /// [`Validator::empty`].
    pub fn attach_validator(&self, name: &str, validator: impl Into<Validator>) -> CmdOptsResult<()> {
        let mut state = self.state.write();
        let SessionState {
            options,
            validators,
            ..
        } = &mut *state;
        validators.attach(options, name, validator.into())?;
        tracing::debug!(name, "Attached validator");
        Ok(())
    }

    /// Replace the policy invoked with the anomalies of each parse
    ///
    /// # Errors
    ///
    /// Returns [`CmdOptsError::InvalidHandler`] if the handler is
    /// [`ResultHandler::empty`].
    pub fn set_result_handler(&self, handler: impl Into<ResultHandler>) -> CmdOptsResult<()> {
        let handler = handler.into();
        if handler.is_empty() {
            return Err(CmdOptsError::InvalidHandler);
        }
        self.state.write().handler = handler;
        tracing::debug!("Replaced result handler");
        Ok(())
    }

    /// Replace the sink the help switch prints usage to
    pub fn set_usage_output(&self, sink: SharedWriter) {
        self.state.write().usage_output = sink;
    }

    /// Choose whether the help switch exits the process after printing usage
    ///
    /// When disabled, [`parse`](Self::parse) returns right after printing
    /// usage without classifying anomalies or invoking the result handler;
    /// check [`help_requested`](Self::help_requested) afterwards.
    pub fn set_exit_on_help(&self, exit: bool) {
        self.state.write().exit_on_help = exit;
    }

    /// Parse a raw argument vector, `args[0]` being the program invocation
    ///
    /// Matched options are updated, then the result handler receives the
    /// anomalies of this pass. Returns the left-over tokens that matched no
    /// declared option, in input order.
    ///
    /// If the [`HELP_SWITCH`] is present, usage is printed and the process
    /// exits successfully (see [`set_exit_on_help`](Self::set_exit_on_help)).
    #[must_use = "the left-over tokens are the positional arguments"]
    pub fn parse<I, S>(&self, args: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let mut state = self.state.write();

        let scan = scan_tokens(&args, &mut state.options);
        state.program_name.clone_from(&scan.program_name);
        state.help_requested = scan.help;

        if scan.help {
            tracing::info!(program = %state.program_name, "Help requested");
            let mut out = state.usage_output.lock();
            if let Err(e) = render(&mut *out, &state.usage_view()) {
                tracing::warn!("Failed to print usage: {e}");
            }
            drop(out);
            if state.exit_on_help {
                std::process::exit(0);
            }
            return scan.unknown;
        }

        let report = classify(&state.options, &state.validators, scan);
        let handler = state.handler.clone();
        drop(state);

        handler.invoke(&report);
        report.unknown
    }

    /// Parse the arguments of the current process
    #[must_use = "the left-over tokens are the positional arguments"]
    pub fn parse_env(&self) -> Vec<String> {
        self.parse(std::env::args())
    }

    /// Effective text value of a value-option
    ///
    /// # Errors
    ///
    /// Returns [`CmdOptsError::UndefinedOption`] if no value-option has this
    /// name, or [`CmdOptsError::OptionNotSet`] for a required option no parse
    /// has set.
    pub fn get_value(&self, name: &str) -> CmdOptsResult<String> {
        self.state.read().options.get_value(name).map(str::to_string)
    }

    /// Effective value of a value-option, converted with [`FromArg`]
    ///
    /// # Errors
    ///
    /// Same conditions as [`get_value`](Self::get_value), plus
    /// [`CmdOptsError::CastError`] if the text does not convert to `T`.
    pub fn get_value_as<T: FromArg>(&self, name: &str) -> CmdOptsResult<T> {
        let value = self.get_value(name)?;
        cast(name, &value)
    }

    /// Split the value of a value-option on `separator` and convert each piece
    ///
    /// Runs of the separator count as one and empty pieces are skipped, so
    /// `"a,,b,"` yields two items.
    ///
    /// # Errors
    ///
    /// Same conditions as [`get_value_as`](Self::get_value_as); the first piece
    /// that fails to convert is reported.
    pub fn get_values_as<T: FromArg>(&self, name: &str, separator: char) -> CmdOptsResult<Vec<T>> {
        let value = self.get_value(name)?;
        split(&value, separator)
            .iter()
            .map(|piece| cast(name, piece))
            .collect()
    }

    /// State of a switch; `false` if `name` is not a declared switch
    #[must_use]
    pub fn get_switch(&self, name: &str) -> bool {
        self.state.read().options.get_switch(name)
    }

    /// Whether a parse matched the option, of either kind
    ///
    /// # Errors
    ///
    /// Returns [`CmdOptsError::UndefinedOption`] if nothing is declared
    /// under `name`.
    pub fn is_set(&self, name: &str) -> CmdOptsResult<bool> {
        let state = self.state.read();
        match state.options.kind_of(name) {
            Some(OptionKind::Switch) => Ok(state
                .options
                .lookup_switch(name)
                .is_some_and(|s| s.is_set())),
            Some(OptionKind::Value) => Ok(state
                .options
                .lookup_value(name)
                .is_some_and(|o| o.is_set())),
            None => Err(CmdOptsError::UndefinedOption(name.to_string())),
        }
    }

    /// Whether the last parse saw the [`HELP_SWITCH`]
    #[must_use]
    pub fn help_requested(&self) -> bool {
        self.state.read().help_requested
    }

    /// Program name taken from the last parse; empty before any parse
    #[must_use]
    pub fn program_name(&self) -> String {
        self.state.read().program_name.clone()
    }

    /// Description given at construction
    #[must_use]
    pub fn program_description(&self) -> String {
        self.state.read().description.clone()
    }

    /// Write the usage text to `out`
    ///
    /// # Errors
    ///
    /// Returns [`CmdOptsError::IoError`] if writing fails.
    pub fn print_usage(&self, out: &mut dyn Write) -> CmdOptsResult<()> {
        render(out, &self.state.read().usage_view())?;
        Ok(())
    }

    /// Usage text as a string
    #[must_use]
    pub fn usage(&self) -> String {
        let mut out = Vec::new();
        // Writing to a Vec cannot fail
        render(&mut out, &self.state.read().usage_view()).ok();
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Session")
            .field("description", &state.description)
            .field("program_name", &state.program_name)
            .field("options", &state.options)
            .field("validators", &state.validators)
            .field("handler", &state.handler)
            .field("exit_on_help", &state.exit_on_help)
            .field("help_requested", &state.help_requested)
            .finish_non_exhaustive()
    }
}

fn cast<T: FromArg>(name: &str, value: &str) -> CmdOptsResult<T> {
    T::from_arg(value).map_err(|reason| CmdOptsError::CastError {
        name: name.to_string(),
        value: value.to_string(),
        target: std::any::type_name::<T>(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParseReport;

    fn quiet(description: &str) -> (Session, Arc<Mutex<Vec<ParseReport>>>) {
        let session = Session::new(description);
        let reports = Arc::new(Mutex::new(Vec::new()));
        session
            .set_result_handler(ResultHandler::collect(Arc::clone(&reports)))
            .unwrap();
        (session, reports)
    }

    #[test]
    fn test_new_session() {
        let session = Session::new("test program");
        assert!(session.program_name().is_empty());
        assert_eq!(session.program_description(), "test program");
        assert!(!session.help_requested());
        assert!(matches!(
            session.declare_switch(HELP_SWITCH, "again", false),
            Err(CmdOptsError::DuplicateOption(_))
        ));
    }

    #[test]
    fn test_handler_invoked_once_per_parse() {
        let (session, reports) = quiet("prog");
        let _ = session.parse(["prog"]);
        let _ = session.parse(["prog", "x"]);

        let reports = reports.lock();
        assert_eq!(reports.len(), 2);
        assert!(reports[0].is_clean());
        assert_eq!(reports[1].unknown, vec!["x"]);
    }

    #[test]
    fn test_handler_may_query_session() {
        let session = Arc::new(Session::new("prog"));
        session.declare_optional("-x", "x", "5").unwrap();
        let seen = Arc::new(Mutex::new(String::new()));

        let (inner, out) = (Arc::downgrade(&session), Arc::clone(&seen));
        session
            .set_result_handler(move |_: &ParseReport| {
                if let Some(session) = inner.upgrade() {
                    *out.lock() = session.get_value("-x").unwrap();
                }
            })
            .unwrap();
        let _ = session.parse(["prog", "-x", "7"]);
        assert_eq!(*seen.lock(), "7");
    }

    #[test]
    fn test_empty_handler_rejected() {
        let session = Session::new("prog");
        assert!(matches!(
            session.set_result_handler(ResultHandler::empty()),
            Err(CmdOptsError::InvalidHandler)
        ));
    }

    #[test]
    fn test_is_set() {
        let (session, _) = quiet("prog");
        session.declare_switch("-v", "verbose", false).unwrap();
        session.declare_optional("-x", "x", "5").unwrap();
        let _ = session.parse(["prog", "-v"]);

        assert!(session.is_set("-v").unwrap());
        assert!(!session.is_set("-x").unwrap());
        assert!(matches!(
            session.is_set("-nope"),
            Err(CmdOptsError::UndefinedOption(_))
        ));
    }

    #[test]
    fn test_cast_error_details() {
        let (session, _) = quiet("prog");
        session.declare_required("-a1", "argument #1").unwrap();
        let _ = session.parse(["prog", "-a1", "a1_value"]);

        let err = session.get_value_as::<i32>("-a1").unwrap_err();
        match err {
            CmdOptsError::CastError {
                name,
                value,
                target,
                ..
            } => {
                assert_eq!(name, "-a1");
                assert_eq!(value, "a1_value");
                assert_eq!(target, "i32");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_get_values_as() {
        let (session, _) = quiet("prog");
        session.declare_optional("-ports", "ports", "80,,443,").unwrap();
        assert_eq!(
            session.get_values_as::<u16>("-ports", ',').unwrap(),
            vec![80, 443]
        );

        let _ = session.parse(["prog", "-ports", "80,http"]);
        assert!(matches!(
            session.get_values_as::<u16>("-ports", ','),
            Err(CmdOptsError::CastError { value, .. }) if value == "http"
        ));
    }

    #[test]
    fn test_session_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
    }
}
