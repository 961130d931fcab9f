//! Token scan and anomaly classification
//!
//! Parsing runs in two steps over a session's registries:
//!
//! 1. [`scan_tokens`] walks the tokens left to right, updating matched
//!    options and collecting unknown tokens and value-options with no value.
//! 2. [`classify`] walks the declared value-options, flagging missing
//!    required options and running validators on everything else.
//!
//! The session sits between the two so the help switch can short-circuit
//! before any anomaly is classified.

use crate::{
    registry::OptionRegistry,
    session::HELP_SWITCH,
    types::{OptionKind, ParseReport},
    validator::ValidatorRegistry,
};

/// Output of [`scan_tokens`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Scan {
    /// Invocation name with any leading directories removed
    pub(crate) program_name: String,
    /// Tokens matching no declared option, in input order
    pub(crate) unknown: Vec<String>,
    /// Value-options found as the last token
    pub(crate) valueless: Vec<String>,
    /// Whether the help switch appeared in this pass
    pub(crate) help: bool,
}

/// Scan `args` against `options`, mutating every matched option
///
/// `args[0]` is the program invocation. Each following token is tested
/// first against the switches, then against the value-options. A
/// value-option takes the next token verbatim unless that token names a
/// declared option, in which case the value-option is reported valueless and
/// the next token is matched on its own.
pub(crate) fn scan_tokens<S: AsRef<str>>(args: &[S], options: &mut OptionRegistry) -> Scan {
    let mut scan = Scan {
        program_name: args
            .first()
            .map(|invocation| program_name(invocation.as_ref()))
            .unwrap_or_default(),
        ..Scan::default()
    };
    let mut i = 1;

    while i < args.len() {
        let token: &str = args[i].as_ref();

        match options.kind_of(token) {
            Some(OptionKind::Switch) => {
                let value = options.toggle_switch(token);
                tracing::trace!(token, ?value, "Matched switch");
                scan.help |= token == HELP_SWITCH;
                i += 1;
            }
            Some(OptionKind::Value) => {
                let value = args
                    .get(i + 1)
                    .map(AsRef::<str>::as_ref)
                    .filter(|next| options.kind_of(next).is_none());
                if let Some(value) = value {
                    options.assign_value(token, value);
                    tracing::trace!(token, value, "Matched value-option");
                    i += 2;
                } else {
                    tracing::trace!(token, "Value-option without a value");
                    scan.valueless.push(token.to_string());
                    i += 1;
                }
            }
            None => {
                tracing::trace!(token, "Unknown token");
                scan.unknown.push(token.to_string());
                i += 1;
            }
        }
    }

    scan
}

/// Turn a finished scan into the report handed to the result handler
///
/// A required option that was not set is reported missing and is not
/// validated; every other value-option is validated against its effective
/// value.
pub(crate) fn classify(
    options: &OptionRegistry,
    validators: &ValidatorRegistry,
    scan: Scan,
) -> ParseReport {
    let mut report = ParseReport::new();
    report.unknown = scan.unknown;
    report.valueless = scan.valueless;

    for option in options.values() {
        if option.is_required() && !option.is_set() {
            report.missing_required.push(option.name().to_string());
        } else if !validators.accepts(option.name(), option.current_value()) {
            report.mark_invalid(option.name(), option.current_value());
        }
    }

    tracing::debug!(
        unknown = report.unknown.len(),
        missing_required = report.missing_required.len(),
        valueless = report.valueless.len(),
        invalid = report.invalid.len(),
        "Parsed command line"
    );
    report
}

/// Strip leading directories from an invocation path
///
/// Both `/` and `\` count as separators. A path ending in a separator is
/// kept whole.
pub(crate) fn program_name(invocation: &str) -> String {
    match invocation.rfind(['/', '\\']) {
        Some(pos) if pos + 1 < invocation.len() => invocation[pos + 1..].to_string(),
        _ => invocation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::Validator;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| (*s).to_string()).collect()
    }

    fn registry() -> OptionRegistry {
        let mut options = OptionRegistry::new();
        options.declare_switch("-s1", "switch #1", false).unwrap();
        options.declare_switch("-s2", "switch #2", true).unwrap();
        options.declare_value("-a1", "argument #1", "empty", false).unwrap();
        options.declare_value("-a2", "argument #2", "", true).unwrap();
        options
    }

    #[test]
    fn test_program_name() {
        assert_eq!(program_name("/usr/local/bin/tool"), "tool");
        assert_eq!(program_name("tool"), "tool");
        assert_eq!(program_name(r"C:\bin\tool.exe"), "tool.exe");
        assert_eq!(program_name("weird/"), "weird/");
        assert_eq!(program_name(""), "");
    }

    #[test]
    fn test_scan_matches_switches_and_values() {
        let mut options = registry();
        let scan = scan_tokens(&args(&["./bin/prog", "-s1", "-a1", "v1", "-s2"]), &mut options);

        assert_eq!(scan.program_name, "prog");
        assert!(scan.unknown.is_empty());
        assert!(scan.valueless.is_empty());
        assert!(options.get_switch("-s1"));
        assert!(!options.get_switch("-s2"));
        assert_eq!(options.get_value("-a1").unwrap(), "v1");
    }

    #[test]
    fn test_scan_value_at_end_is_valueless() {
        let mut options = registry();
        let scan = scan_tokens(&args(&["prog", "stray", "-a1"]), &mut options);

        assert_eq!(scan.unknown, vec!["stray"]);
        assert_eq!(scan.valueless, vec!["-a1"]);
        assert!(!options.lookup_value("-a1").unwrap().is_set());
    }

    #[test]
    fn test_scan_option_value_may_look_like_a_flag() {
        let mut options = registry();
        scan_tokens(&args(&["prog", "-a1", "-undeclared"]), &mut options);
        assert_eq!(options.get_value("-a1").unwrap(), "-undeclared");
    }

    #[test]
    fn test_scan_declared_name_is_not_a_value() {
        let mut options = registry();
        let scan = scan_tokens(&args(&["prog", "-a2", "-s1", "x"]), &mut options);
        assert_eq!(scan.valueless, vec!["-a2"]);
        assert_eq!(scan.unknown, vec!["x"]);
        assert!(options.get_switch("-s1"));
        assert!(!options.lookup_value("-a2").unwrap().is_set());

        let mut options = registry();
        let scan = scan_tokens(&args(&["prog", "-a1", "-a1", "v"]), &mut options);
        assert_eq!(scan.valueless, vec!["-a1"]);
        assert_eq!(options.get_value("-a1").unwrap(), "v");
    }

    #[test]
    fn test_scan_flags_help_per_pass() {
        let mut options = registry();
        options.insert_switch(crate::types::SwitchOption::new(
            HELP_SWITCH.to_string(),
            "help".to_string(),
            false,
        ));

        assert!(scan_tokens(&args(&["prog", "-s1", HELP_SWITCH]), &mut options).help);
        assert!(!scan_tokens(&args(&["prog", "-s1"]), &mut options).help);
        assert!(options.get_switch(HELP_SWITCH));
    }

    #[test]
    fn test_scan_last_assignment_wins() {
        let mut options = registry();
        scan_tokens(&args(&["prog", "-a1", "first", "-a1", "second"]), &mut options);
        assert_eq!(options.get_value("-a1").unwrap(), "second");
    }

    #[test]
    fn test_scan_empty_input() {
        let mut options = registry();
        let scan = scan_tokens(&args(&["prog"]), &mut options);
        assert_eq!(scan, Scan {
            program_name: "prog".to_string(),
            ..Scan::default()
        });

        let none: [&str; 0] = [];
        assert_eq!(scan_tokens(&none, &mut options), Scan::default());
    }

    #[test]
    fn test_classify_missing_excludes_validation() {
        let mut options = registry();
        let mut validators = ValidatorRegistry::new();
        validators
            .attach(&options, "-a2", Validator::new(|_, _| panic!("must not run")))
            .unwrap();
        validators
            .attach(&options, "-a1", Validator::new(|_, value| value != "empty"))
            .unwrap();

        let scan = scan_tokens(&args(&["prog"]), &mut options);
        let report = classify(&options, &validators, scan);

        assert_eq!(report.missing_required, vec!["-a2"]);
        assert_eq!(report.invalid, vec!["-a1"]);
        assert_eq!(report.value_of("-a1"), Some("empty"));
    }

    #[test]
    fn test_classify_invalid_once_for_many_failures() {
        let mut options = registry();
        let mut validators = ValidatorRegistry::new();
        validators
            .attach(&options, "-a1", Validator::new(|_, _| false))
            .unwrap();
        validators
            .attach(&options, "-a1", Validator::new(|_, _| false))
            .unwrap();

        let scan = scan_tokens(&args(&["prog", "-a2", "x"]), &mut options);
        let report = classify(&options, &validators, scan);
        assert_eq!(report.invalid, vec!["-a1"]);
        assert!(report.missing_required.is_empty());
    }
}
