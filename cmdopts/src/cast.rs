//! Conversion of option text to typed values

use std::path::PathBuf;

/// Words accepted as `true` by the `bool` conversion
pub const TRUE_WORDS: [&str; 2] = ["true", "yes"];

/// Words accepted as `false` by the `bool` conversion
pub const FALSE_WORDS: [&str; 2] = ["false", "no"];

/// Fallible conversion from the text of an option
///
/// Implemented for the standard scalar types, `String`, `PathBuf` and
/// `bool`. Implement it for your own types to read them with
/// [`Session::get_value_as`](crate::Session::get_value_as).
pub trait FromArg: Sized {
    /// Convert `text`, returning a human-readable reason on failure
    ///
    /// # Errors
    ///
    /// Returns the reason the text cannot represent `Self`.
    fn from_arg(text: &str) -> Result<Self, String>;
}

/// Render a boolean the way option text spells it
#[must_use]
pub fn bool_to_arg(value: bool) -> &'static str {
    if value { TRUE_WORDS[0] } else { FALSE_WORDS[0] }
}

impl FromArg for bool {
    fn from_arg(text: &str) -> Result<Self, String> {
        let lowered = text.to_lowercase();
        if TRUE_WORDS.contains(&lowered.as_str()) {
            Ok(true)
        } else if FALSE_WORDS.contains(&lowered.as_str()) {
            Ok(false)
        } else {
            Err(format!("expected one of {TRUE_WORDS:?} or {FALSE_WORDS:?}"))
        }
    }
}

impl FromArg for String {
    fn from_arg(text: &str) -> Result<Self, String> {
        Ok(text.to_string())
    }
}

impl FromArg for PathBuf {
    fn from_arg(text: &str) -> Result<Self, String> {
        if text.is_empty() {
            return Err("empty path".to_string());
        }
        Ok(PathBuf::from(text))
    }
}

macro_rules! from_arg_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromArg for $ty {
                fn from_arg(text: &str) -> Result<Self, String> {
                    text.parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

from_arg_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char,
);
