//! Text helpers for option names and list values
//!
//! # Examples
//!
//! ```
//! use cmdopts::strings::{split, trim};
//!
//! assert_eq!(trim("  -verbose "), "-verbose");
//! assert_eq!(split("a,,b,", ','), vec!["a", "b"]);
//! ```

/// Remove leading and trailing spaces
///
/// Only the space character is stripped; tabs and other whitespace are kept.
#[must_use]
pub fn trim(text: &str) -> &str {
    text.trim_matches(' ')
}

/// Split `input` on `separator`, compressing runs of the separator
///
/// Empty pieces are skipped, so leading, trailing and repeated separators
/// never produce empty strings.
#[must_use]
pub fn split(input: &str, separator: char) -> Vec<String> {
    input
        .split(separator)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_spaces() {
        assert_eq!(trim("    spaces in front"), "spaces in front");
        assert_eq!(trim("spaces in back    "), "spaces in back");
        assert_eq!(trim("     spaces front and back    "), "spaces front and back");
        assert_eq!(trim("     "), "");
        assert_eq!(trim(" "), "");
        assert_eq!(trim(""), "");
    }

    #[test]
    fn test_trim_keeps_tabs() {
        assert_eq!(trim("\t-x "), "\t-x");
    }

    #[test]
    fn test_split_simple() {
        assert_eq!(split("b=1", '='), vec!["b", "1"]);
    }

    #[test]
    fn test_split_compresses_separator() {
        assert_eq!(split("b======1", '='), vec!["b", "1"]);
    }

    #[test]
    fn test_split_skips_empty() {
        assert_eq!(split("b======", '='), vec!["b"]);
        assert_eq!(split("======b", '='), vec!["b"]);
        assert!(split("======", '=').is_empty());
        assert!(split("", '=').is_empty());
    }
}
