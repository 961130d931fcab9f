//! Type definitions for declared options and parse results

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A declared option together with its parse state
///
/// `T` is `String` for value-options and `bool` for switches. The name is
/// fixed at declaration; only the parser moves `current_value` and `is_set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRecord<T> {
    name: String,
    description: String,
    default_value: T,
    current_value: T,
    is_set: bool,
    is_required: bool,
}

/// A value-option: consumes the following token as its text value
pub type StringOption = OptionRecord<String>;

/// A switch: toggles away from its default when present
pub type SwitchOption = OptionRecord<bool>;

impl<T: Clone> OptionRecord<T> {
    /// Create an optional record whose current value starts at the default
    pub(crate) fn new(name: String, description: String, default_value: T) -> Self {
        Self {
            name,
            description,
            current_value: default_value.clone(),
            default_value,
            is_set: false,
            is_required: false,
        }
    }

    /// Mark the record as required
    pub(crate) fn into_required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Assign a value and mark the record as set
    pub(crate) fn set(&mut self, value: T) {
        self.current_value = value;
        self.is_set = true;
    }

    /// Option name, including any prefix such as `-` or `--`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description shown in usage text
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Value used when the option does not appear on the command line
    #[must_use]
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// Effective value: the parsed value if set, the default otherwise
    #[must_use]
    pub fn current_value(&self) -> &T {
        &self.current_value
    }

    /// Whether a parse matched this option
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.is_set
    }

    /// Whether the option must appear on the command line
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.is_required
    }
}

impl SwitchOption {
    /// Set the switch to the negation of its declared default
    ///
    /// Repeating the switch keeps the same toggled value.
    pub(crate) fn toggle(&mut self) {
        let toggled = !self.default_value;
        self.set(toggled);
    }
}

/// Kind of a declared option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptionKind {
    /// Option that takes the following token as its value
    Value,
    /// Boolean switch
    Switch,
}

impl OptionKind {
    /// Convert the kind to a string
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Switch => "switch",
        }
    }
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anomalies found by one parse pass
///
/// Built fresh by every call to [`Session::parse`](crate::Session::parse) and
/// handed once to the session's [`ResultHandler`](crate::ResultHandler). Each
/// list keeps the order in which entries were found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParseReport {
    /// Tokens that matched no declared switch or value-option
    pub unknown: Vec<String>,
    /// Required value-options absent from the command line
    pub missing_required: Vec<String>,
    /// Value-options that appeared as the last token, without a value
    pub valueless: Vec<String>,
    /// Value-options rejected by at least one validator
    pub invalid: Vec<String>,
    /// Effective value of each invalid option at validation time
    invalid_values: BTreeMap<String, String>,
}

impl ParseReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether all four lists are empty
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty()
            && self.missing_required.is_empty()
            && self.valueless.is_empty()
            && self.invalid.is_empty()
    }

    /// Total number of entries across the four lists
    #[must_use]
    pub fn anomaly_count(&self) -> usize {
        self.unknown.len() + self.missing_required.len() + self.valueless.len() + self.invalid.len()
    }

    /// Value that was rejected for an invalid option
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.invalid_values.get(name).map(String::as_str)
    }

    /// Record an option that failed validation; repeated calls keep one entry
    pub(crate) fn mark_invalid(&mut self, name: &str, value: &str) {
        if self.invalid_values.contains_key(name) {
            return;
        }
        self.invalid.push(name.to_string());
        self.invalid_values
            .insert(name.to_string(), value.to_string());
    }
}
