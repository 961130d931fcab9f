//! Validators attached to value-options

use std::{collections::BTreeMap, fmt, sync::Arc};

use crate::{
    errors::{CmdOptsError, CmdOptsResult},
    registry::OptionRegistry,
};

type ValidatorFn = dyn Fn(&str, &str) -> bool + Send + Sync;

/// Predicate over an option's name and effective value
///
/// Any `Fn(&str, &str) -> bool` closure converts into a `Validator`.
/// [`Validator::empty`] builds the null validator, which the session refuses
/// to attach.
///
/// # Examples
///
/// ```
/// use cmdopts::Validator;
///
/// let is_number = Validator::new(|_name, value| value.parse::<u32>().is_ok());
/// assert!(is_number.check("-n", "42"));
/// assert!(!is_number.check("-n", "forty-two"));
/// assert!(Validator::empty().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct Validator(Option<Arc<ValidatorFn>>);

impl Validator {
    /// Wrap a predicate
    #[must_use]
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        Self(Some(Arc::new(predicate)))
    }

    /// The null validator
    #[must_use]
    pub fn empty() -> Self {
        Self(None)
    }

    /// Whether this is the null validator
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Run the predicate; the null validator accepts everything
    #[must_use]
    pub fn check(&self, name: &str, value: &str) -> bool {
        self.0.as_ref().is_none_or(|predicate| predicate(name, value))
    }
}

impl<F> From<F> for Validator
where
    F: Fn(&str, &str) -> bool + Send + Sync + 'static,
{
    fn from(predicate: F) -> Self {
        Self::new(predicate)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_empty() {
            "Validator(empty)"
        } else {
            "Validator(..)"
        })
    }
}

/// Ordered validator lists, keyed by option name
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    entries: BTreeMap<String, Vec<Validator>>,
}

impl ValidatorRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator to the list of a declared value-option
    ///
    /// Validators run in attachment order.
    ///
    /// # Errors
    ///
    /// Returns [`CmdOptsError::UndefinedOption`] if `name` is not a declared
    /// value-option (switches cannot be validated), or
    /// [`CmdOptsError::InvalidValidator`] if `validator` is empty.
    pub fn attach(
        &mut self,
        options: &OptionRegistry,
        name: &str,
        validator: Validator,
    ) -> CmdOptsResult<()> {
        if options.lookup_value(name).is_none() {
            return Err(CmdOptsError::UndefinedOption(name.to_string()));
        }
        if validator.is_empty() {
            return Err(CmdOptsError::InvalidValidator(name.to_string()));
        }
        self.entries
            .entry(name.to_string())
            .or_default()
            .push(validator);
        Ok(())
    }

    /// Validators attached to `name`, in attachment order
    #[must_use]
    pub fn validators_for(&self, name: &str) -> &[Validator] {
        self.entries
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Run every validator of `name` against `value`
    ///
    /// All validators are invoked even after one rejects the value; the
    /// result is `true` only if none rejected it.
    #[must_use]
    pub fn accepts(&self, name: &str, value: &str) -> bool {
        self.validators_for(name)
            .iter()
            .fold(true, |accepted, validator| {
                validator.check(name, value) && accepted
            })
    }
}
