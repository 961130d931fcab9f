#![deny(
    unsafe_code,
    unused_must_use,
    unreachable_pub,
    rust_2018_idioms,
    missing_docs,
    clippy::pedantic
)]

//! Command-Line Option Declaration, Parsing and Validation
//!
//! This crate lets a program declare the options it understands, parse a raw
//! argument vector against those declarations, validate the resulting values
//! and print usage text.
//!
//! # Features
//!
//! - **Value-options**: `-name VALUE` pairs, either required or with a default
//! - **Switches**: boolean flags that toggle away from their default when present
//! - **Validators**: ordered predicates run against option values after parsing
//! - **Pluggable result handling**: unknown tokens, missing required options,
//!   options without a value and invalid options are gathered into a
//!   [`ParseReport`] and handed to a replaceable [`ResultHandler`]
//! - **Help switch**: `-h` is always declared and prints usage text
//! - **Typed reads**: [`Session::get_value_as`] converts values through [`FromArg`]
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use cmdopts::{ResultHandler, Session};
//!
//! let session = Session::new("Program that shows you how this thing works.");
//! session.set_result_handler(ResultHandler::ignore())?;
//! session.declare_required("-in", "an input file")?;
//! session.declare_switch("-v", "enable verbose mode", false)?;
//! session.declare_optional("-opt1", "this is optional", "5")?;
//!
//! let left_overs = session.parse(["/usr/bin/example", "-in", "a.txt", "-v", "extra"]);
//!
//! assert_eq!(session.program_name(), "example");
//! assert_eq!(session.get_value("-in")?, "a.txt");
//! assert!(session.get_switch("-v"));
//! assert_eq!(session.get_value_as::<i32>("-opt1")?, 5);
//! assert_eq!(left_overs, vec!["extra"]);
//! # Ok::<(), cmdopts::CmdOptsError>(())
//! ```
//!
//! ## Validators and Custom Handlers
//!
//! ```
//! use std::sync::Arc;
//! use cmdopts::{ParseReport, ResultHandler, Session};
//! use parking_lot::Mutex;
//!
//! let session = Session::new("validated");
//! let reports = Arc::new(Mutex::new(Vec::<ParseReport>::new()));
//! session.set_result_handler(ResultHandler::collect(Arc::clone(&reports)))?;
//!
//! session.declare_optional("-level", "between 1 and 3", "1")?;
//! session.attach_validator("-level", |_: &str, value: &str| {
//!     matches!(value, "1" | "2" | "3")
//! })?;
//! session.declare_required("-out", "an output file")?;
//!
//! let _ = session.parse(["prog", "-level", "9"]);
//!
//! let reports = reports.lock();
//! assert_eq!(reports[0].invalid, vec!["-level"]);
//! assert_eq!(reports[0].value_of("-level"), Some("9"));
//! assert_eq!(reports[0].missing_required, vec!["-out"]);
//! # Ok::<(), cmdopts::CmdOptsError>(())
//! ```

mod cast;
mod errors;
mod handler;
mod parser;
mod registry;
mod session;
pub mod strings;
mod types;
mod usage;
mod validator;

pub use cast::{FALSE_WORDS, FromArg, TRUE_WORDS, bool_to_arg};
pub use errors::{CmdOptsError, CmdOptsResult};
pub use handler::{ResultHandler, SharedWriter, write_diagnostics};
pub use registry::OptionRegistry;
pub use session::{HELP_SWITCH, Session};
pub use types::{OptionKind, OptionRecord, ParseReport, StringOption, SwitchOption};
pub use validator::{Validator, ValidatorRegistry};
