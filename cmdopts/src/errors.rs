//! Error types for option declaration and lookup

use thiserror::Error;

/// Errors raised synchronously by the declaration and query surface
///
/// Problems with the parsed command line itself (unknown tokens, missing
/// required options, ...) are never reported through this type; they are
/// collected into a [`ParseReport`](crate::ParseReport) and handed to the
/// session's [`ResultHandler`](crate::ResultHandler).
#[derive(Debug, Error)]
pub enum CmdOptsError {
    /// The name is already used by a value-option or a switch
    #[error("Option '{0}' is already declared")]
    DuplicateOption(String),

    /// The name is empty once surrounding spaces are removed
    #[error("Invalid option name '{0}': name must not be empty")]
    InvalidOption(String),

    /// No option of the expected kind is declared under this name
    #[error("Option '{0}' is not declared")]
    UndefinedOption(String),

    /// A required option was read before a parse assigned it a value
    #[error("Required option '{0}' has not been set")]
    OptionNotSet(String),

    /// An empty validator was attached to an option
    #[error("Validator attached to option '{0}' is empty")]
    InvalidValidator(String),

    /// An empty result handler was installed
    #[error("Result handler is empty")]
    InvalidHandler,

    /// The stored text of an option cannot be converted to the requested type
    #[error("Cannot convert value '{value}' of option '{name}' to {target}: {reason}")]
    CastError {
        /// Name of the option being read
        name: String,
        /// Text that failed to convert
        value: String,
        /// Name of the target type
        target: &'static str,
        /// Reason reported by the conversion
        reason: String,
    },

    /// IO error while rendering usage text
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Result type for option declaration and lookup
pub type CmdOptsResult<T> = Result<T, CmdOptsError>;
