//! Error types for conversion operations

use std::fmt;

/// Structural errors that abort the current document conversion.
///
/// Only these unwind the conversion; recoverable content issues go through
/// [`crate::report::Report`] instead and never stop a run.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Dialect not found in registry
    DialectNotFound(String),
    /// End tag does not match the innermost open element
    MismatchedTag { expected: String, found: String },
    /// End tag with no open element at all
    DanglingEndTag(String),
    /// An element was still open at end of document
    UnclosedElement(String),
    /// Malformed tag or attribute syntax
    MalformedTag(String),
    /// A `----` fence opened while a paragraph was being accumulated
    FenceInParagraph { line: usize },
    /// A `----` fence was never closed
    UnterminatedFence { line: usize },
    /// Stylesheets are restricted to class selectors
    NonClassSelector(String),
    /// Stylesheet text that cannot be scanned at all
    MalformedStylesheet(String),
    /// Width values must be given in `in` or `%`
    UnsupportedUnit(String),
    /// A hints-file line that is not a valid `pattern ==> replacement` rule
    BadHintPattern { line: usize, message: String },
    /// Wrapped I/O failure from the output sink. The library takes its
    /// source as `&str`, so writing is the only I/O it performs.
    Io(String),
}

impl ConvertError {
    /// Wrap an output I/O error.
    pub fn io(err: std::io::Error) -> Self {
        ConvertError::Io(err.to_string())
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::DialectNotFound(name) => write!(f, "Dialect '{name}' not found"),
            ConvertError::MismatchedTag { expected, found } => {
                write!(f, "Mismatched end tag: expected </{expected}>, found </{found}>")
            }
            ConvertError::DanglingEndTag(tag) => {
                write!(f, "End tag </{tag}> without a matching start tag")
            }
            ConvertError::UnclosedElement(tag) => {
                write!(f, "Unclosed element <{tag}> at end of document")
            }
            ConvertError::MalformedTag(msg) => write!(f, "Malformed tag: {msg}"),
            ConvertError::FenceInParagraph { line } => {
                write!(f, "Block fence opened inside a paragraph at line {line}")
            }
            ConvertError::UnterminatedFence { line } => {
                write!(f, "Unterminated block fence starting at line {line}")
            }
            ConvertError::NonClassSelector(selector) => {
                write!(f, "Unsupported selector '{selector}': only class selectors are allowed")
            }
            ConvertError::MalformedStylesheet(msg) => write!(f, "Malformed stylesheet: {msg}"),
            ConvertError::UnsupportedUnit(value) => {
                write!(f, "Unsupported width unit in '{value}'")
            }
            ConvertError::BadHintPattern { line, message } => {
                write!(f, "Invalid hint rule at line {line}: {message}")
            }
            ConvertError::Io(message) => {
                write!(f, "I/O error writing output: {message}")
            }
        }
    }
}

impl std::error::Error for ConvertError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_wrapping_and_display() {
        let err = ConvertError::io(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err, ConvertError::Io("pipe closed".to_string()));
        assert_eq!(err.to_string(), "I/O error writing output: pipe closed");
    }

    #[test]
    fn test_structural_error_display() {
        let err = ConvertError::UnclosedElement("p".to_string());
        assert_eq!(err.to_string(), "Unclosed element <p> at end of document");
    }
}
