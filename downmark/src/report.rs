//! Recoverable content warnings
//!
//! Structural errors abort a conversion; everything else is collected here
//! and the run continues with a best-effort substitution. The library never
//! prints — callers decide what to do with the accumulated warnings.

use std::fmt;

/// A recoverable issue found while converting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Tag with no translation rule; a bracketed placeholder was emitted
    UnknownTag(String),
    /// Attribute not understood by the rule for an otherwise known tag
    UnknownAttribute { tag: String, attribute: String },
    /// `&name;` entity with no mapping in the active dialect; left verbatim
    UnknownEntity(String),
    /// Image without an `alt` attribute; the source path was used instead
    MissingAlt(String),
    /// Element missing its target attribute (`src`, `href`)
    MissingTarget(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownTag(tag) => write!(f, "unknown tag <{tag}>, emitted placeholder"),
            Warning::UnknownAttribute { tag, attribute } => {
                write!(f, "unknown attribute '{attribute}' on <{tag}>, ignored")
            }
            Warning::UnknownEntity(name) => {
                write!(f, "unknown entity &{name};, left unresolved")
            }
            Warning::MissingAlt(src) => {
                write!(f, "image '{src}' has no alt text, using the source path")
            }
            Warning::MissingTarget(tag) => {
                write!(f, "<{tag}> has no target attribute, emitted empty target")
            }
        }
    }
}

/// Warning sink owned by the caller and threaded through one conversion run.
#[derive(Debug, Default)]
pub struct Report {
    warnings: Vec<Warning>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Report::default()
    }

    /// Record a warning.
    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// All warnings recorded so far, in emission order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// True when no warnings were recorded.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Consume the report, yielding the warnings.
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
