//! Usage text rendering

use std::io::{self, Write};

use crate::{
    cast::bool_to_arg, registry::OptionRegistry, types::OptionRecord,
    validator::ValidatorRegistry,
};

/// Read-only view of everything the usage text shows
pub(crate) struct UsageView<'a> {
    pub(crate) program_name: &'a str,
    pub(crate) description: &'a str,
    pub(crate) extra_usage: &'a str,
    pub(crate) options: &'a OptionRegistry,
    pub(crate) validators: &'a ValidatorRegistry,
}

/// Write the usage text: header, description, switches, then value-options
pub(crate) fn render(out: &mut dyn Write, view: &UsageView<'_>) -> io::Result<()> {
    write!(out, "Usage: {} [options]", view.program_name)?;
    if !view.extra_usage.is_empty() {
        write!(out, " {}", view.extra_usage)?;
    }
    writeln!(out)?;

    if !view.description.is_empty() {
        writeln!(out, "Description: ")?;
        writeln!(out, " {}", view.description)?;
        writeln!(out)?;
    }

    writeln!(out, "Available options:")?;
    for switch in view.options.switches() {
        let line = describe(switch, |v| bool_to_arg(*v).to_string());
        writeln!(out, " {:<20}{line}", switch.name())?;
    }
    for option in view.options.values() {
        let mut line = describe(option, Clone::clone);
        let validators = view.validators.validators_for(option.name()).len();
        if validators > 0 {
            let plural = if validators == 1 { "" } else { "s" };
            line.push_str(&format!(" [{validators} validator{plural}]"));
        }
        writeln!(out, " {:<20}{line}", format!("{} [...]", option.name()))?;
    }
    writeln!(out)?;
    out.flush()
}

/// Description plus the `(def = ..)` or `(required)` annotation
fn describe<T>(record: &OptionRecord<T>, show: impl Fn(&T) -> String) -> String
where
    T: Clone,
{
    let mut text = format!("{} (", record.description());
    if record.is_required() {
        text.push_str("required");
    } else {
        text.push_str(&format!("def = {}", show(record.default_value())));
    }
    if record.is_set() {
        text.push_str(&format!(", curr = {}", show(record.current_value())));
    }
    text.push(')');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::Validator;

    fn render_to_string(view: &UsageView<'_>) -> String {
        let mut out = Vec::new();
        render(&mut out, view).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_layout() {
        let mut options = OptionRegistry::new();
        options.declare_switch("-v", "verbose", false).unwrap();
        options.declare_value("-in", "an input file", "", true).unwrap();
        options.declare_value("-opt1", "this is optional", "5", false).unwrap();
        options.assign_value("-opt1", "7");
        let mut validators = ValidatorRegistry::new();
        validators
            .attach(&options, "-opt1", Validator::new(|_, _| true))
            .unwrap();
        validators
            .attach(&options, "-in", Validator::new(|_, _| true))
            .unwrap();
        validators
            .attach(&options, "-in", Validator::new(|_, _| true))
            .unwrap();

        let text = render_to_string(&UsageView {
            program_name: "prog",
            description: "does things",
            extra_usage: "FILE...",
            options: &options,
            validators: &validators,
        });

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Usage: prog [options] FILE...");
        assert_eq!(lines[1], "Description: ");
        assert_eq!(lines[2], " does things");
        assert_eq!(lines[4], "Available options:");
        assert_eq!(lines[5], format!(" {:<20}verbose (def = false)", "-v"));
        assert_eq!(
            lines[6],
            format!(" {:<20}an input file (required) [2 validators]", "-in [...]")
        );
        assert_eq!(
            lines[7],
            format!(
                " {:<20}this is optional (def = 5, curr = 7) [1 validator]",
                "-opt1 [...]"
            )
        );
    }

    #[test]
    fn test_render_without_description() {
        let options = OptionRegistry::new();
        let validators = ValidatorRegistry::new();
        let text = render_to_string(&UsageView {
            program_name: "",
            description: "",
            extra_usage: "",
            options: &options,
            validators: &validators,
        });
        assert_eq!(text, "Usage:  [options]\nAvailable options:\n\n");
    }
}
