//! Registry of declared value-options and switches

use crate::{
    errors::{CmdOptsError, CmdOptsResult},
    strings::trim,
    types::{OptionKind, StringOption, SwitchOption},
};

/// Declared options, in declaration order
///
/// Names are unique across both kinds: a value-option and a switch can never
/// share a name.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    values: Vec<StringOption>,
    switches: Vec<SwitchOption>,
}

impl OptionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a value-option
    ///
    /// Surrounding spaces are removed from `name` before it is stored.
    /// Required options have no usable default; reading one before a parse
    /// has set it fails with [`CmdOptsError::OptionNotSet`].
    ///
    /// # Errors
    ///
    /// Returns [`CmdOptsError::InvalidOption`] if the trimmed name is empty, or
    /// [`CmdOptsError::DuplicateOption`] if the name is already declared.
    pub fn declare_value(
        &mut self,
        name: &str,
        description: &str,
        default_value: &str,
        required: bool,
    ) -> CmdOptsResult<()> {
        let name = self.checked_name(name)?;
        let option = StringOption::new(name, description.to_string(), default_value.to_string());
        self.values.push(if required {
            option.into_required()
        } else {
            option
        });
        Ok(())
    }

    /// Declare a switch with its default state
    ///
    /// # Errors
    ///
    /// Same conditions as [`declare_value`](Self::declare_value).
    pub fn declare_switch(
        &mut self,
        name: &str,
        description: &str,
        default_on: bool,
    ) -> CmdOptsResult<()> {
        let name = self.checked_name(name)?;
        self.insert_switch(SwitchOption::new(name, description.to_string(), default_on));
        Ok(())
    }

    /// Store a switch without the name checks; used for reserved switches
    pub(crate) fn insert_switch(&mut self, switch: SwitchOption) {
        self.switches.push(switch);
    }

    fn checked_name(&self, name: &str) -> CmdOptsResult<String> {
        let trimmed = trim(name);
        if trimmed.is_empty() {
            return Err(CmdOptsError::InvalidOption(name.to_string()));
        }
        if self.kind_of(trimmed).is_some() {
            return Err(CmdOptsError::DuplicateOption(trimmed.to_string()));
        }
        Ok(trimmed.to_string())
    }

    /// Find a value-option by name
    #[must_use]
    pub fn lookup_value(&self, name: &str) -> Option<&StringOption> {
        self.values.iter().find(|o| o.name() == name)
    }

    /// Find a switch by name
    #[must_use]
    pub fn lookup_switch(&self, name: &str) -> Option<&SwitchOption> {
        self.switches.iter().find(|o| o.name() == name)
    }

    /// Assign `value` to a value-option; `false` if no such option exists
    pub(crate) fn assign_value(&mut self, name: &str, value: &str) -> bool {
        let Some(option) = self.values.iter_mut().find(|o| o.name() == name) else {
            return false;
        };
        option.set(value.to_string());
        true
    }

    /// Toggle a switch away from its default; `None` if no such switch exists
    pub(crate) fn toggle_switch(&mut self, name: &str) -> Option<bool> {
        let switch = self.switches.iter_mut().find(|o| o.name() == name)?;
        switch.toggle();
        Some(*switch.current_value())
    }

    /// Kind of the option declared under `name`, if any
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<OptionKind> {
        if self.lookup_switch(name).is_some() {
            Some(OptionKind::Switch)
        } else if self.lookup_value(name).is_some() {
            Some(OptionKind::Value)
        } else {
            None
        }
    }

    /// Effective value of a value-option
    ///
    /// Optional options always yield a value: the parsed one, or the default.
    ///
    /// # Errors
    ///
    /// Returns [`CmdOptsError::UndefinedOption`] if no value-option has this
    /// name, or [`CmdOptsError::OptionNotSet`] if the option is required and
    /// no parse has set it.
    pub fn get_value(&self, name: &str) -> CmdOptsResult<&str> {
        let option = self
            .lookup_value(name)
            .ok_or_else(|| CmdOptsError::UndefinedOption(name.to_string()))?;
        if option.is_required() && !option.is_set() {
            return Err(CmdOptsError::OptionNotSet(name.to_string()));
        }
        Ok(option.current_value())
    }

    /// State of a switch; `false` for names that are not declared switches
    #[must_use]
    pub fn get_switch(&self, name: &str) -> bool {
        self.lookup_switch(name)
            .is_some_and(|s| *s.current_value())
    }

    /// Declared value-options
    #[must_use]
    pub fn values(&self) -> &[StringOption] {
        &self.values
    }

    /// Declared switches
    #[must_use]
    pub fn switches(&self) -> &[SwitchOption] {
        &self.switches
    }
}
