//! Markup down-conversion for exported documents
//!
//!     This crate turns exported HTML/XHTML-like documents into lightweight
//!     markup (AsciiDoc, Textile), and reflows existing markup documents in
//!     place. It is the conversion core behind the downmark CLI.
//!
//!     TLDR: For dialect authors:
//!         - A dialect is a rule table (tag name -> start/end callbacks) plus the
//!           entity escapes of the target; see ./dialect.rs for the trait.
//!         - Rules only talk to the Emitter (./engine.rs); they never write to the
//!           sink directly, so wrapping and entity handling stay in one place.
//!         - Style hints come from the analyzer (./style/analysis.rs); a rule asks
//!           for its element family and gets back a small `key: value;` string.
//!         - Register the dialect in DialectRegistry::with_defaults and give it a
//!           test module mirroring the asciidoc one.
//!
//! Architecture
//!
//!     Conversion is a single synchronous pass: tokenize -> translate -> format.
//!     The tokenizer (./tokenizer.rs) yields text runs and element tokens; the
//!     engine (./engine.rs) walks them, keeps an element stack for structural
//!     validation, and dispatches to the active dialect's rules; every emission
//!     funnels through the line formatter (./formatter.rs), which owns word-wrap
//!     and entity substitution. An optional hints sidecar (./hints.rs) rewrites
//!     the source with ordered regex substitutions before the walk, and an
//!     optional stylesheet (./style/) contributes presentation hints.
//!
//!     Reformatting an existing document goes through the scanner (./scanner.rs)
//!     instead: lines are classified and grouped into blocks, paragraph blocks
//!     are reflowed, everything else is copied verbatim.
//!
//!     This is a pure lib, that is, it powers the downmark-cli but is shell
//!     agnostic; no code here should suppose a shell environment, be it to std
//!     print, env vars etc. Recoverable issues go into a Report the caller
//!     drains; structural problems are ConvertError values.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── report.rs               # Warning sink for recoverable issues
//!     ├── options.rs
//!     ├── scanner.rs              # Line/block classification and reflow
//!     ├── tokenizer.rs            # Text runs vs element tokens
//!     ├── formatter.rs            # Line buffer, wrap, entities, blockReformat
//!     ├── hints.rs                # Regex rewrite sidecar
//!     ├── style
//!     │   ├── mod.rs              # Class-selector stylesheet parser
//!     │   └── analysis.rs         # Declarations -> presentation hints
//!     ├── dialect.rs              # Dialect trait, rule tables
//!     ├── engine.rs               # Emitter + Pipeline (tokenizer-driven walk)
//!     ├── dialects
//!     │   ├── asciidoc.rs
//!     │   └── textile.rs
//!     ├── registry.rs             # DialectRegistry for discovery and selection
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # mod declarations (no subdirectory discovery)
//!     ├── asciidoc/
//!     ├── textile/
//!     ├── reflow/
//!     └── fixtures/
//!
//! Dialects
//!
//!     Dialect capabilities are implemented with the Dialect trait; dialects
//!     have a rule table, a name and file extensions. See the trait def
//!     [./dialect.rs].
//!     - Dialect trait: uniform interface for all targets
//!     - DialectRegistry: centralized discovery and selection of dialects
//!     - Dialect implementations: AsciiDoc and Textile
//!
//!     Down-conversion is lossy by design: source constructs with no
//!     counterpart in the target come out as bracketed placeholders plus a
//!     warning, so nothing disappears silently.

pub mod dialect;
pub mod dialects;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod hints;
pub mod options;
pub mod registry;
pub mod report;
pub mod scanner;
pub mod style;
pub mod tokenizer;

pub use dialect::{Dialect, ElementRule, RuleSet};
pub use dialects::{AsciidocDialect, TextileDialect};
pub use engine::{Emitter, Pipeline, SpanFrame};
pub use error::ConvertError;
pub use formatter::{block_reformat, split_sentences, EntityMap, LineFormatter};
pub use hints::Hints;
pub use options::ConvertOptions;
pub use registry::DialectRegistry;
pub use report::{Report, Warning};
pub use scanner::{reformat_blocks, Block, BlockType, LineKind, Scanner};
pub use style::{StyleAnalyzer, StyleFamily, Stylesheet};
pub use tokenizer::{ElementStack, ElementToken, Token, Tokenizer};

/// Convert `source` to the named dialect using the built-in registry.
///
/// Convenience wrapper over [`Pipeline`] for callers without a stylesheet
/// or hints file.
pub fn convert(
    source: &str,
    dialect: &str,
    options: &ConvertOptions,
    report: &mut Report,
) -> Result<String, ConvertError> {
    let registry = DialectRegistry::with_defaults();
    let dialect = registry.get(dialect)?;
    Pipeline::new(dialect)
        .with_options(options.clone())
        .run_to_string(source, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_selects_dialect_by_name() {
        let mut report = Report::new();
        let options = ConvertOptions::default();
        let adoc = convert("<h1>T</h1>", "asciidoc", &options, &mut report).unwrap();
        assert_eq!(adoc, "= T\n");
        let textile = convert("<h1>T</h1>", "textile", &options, &mut report).unwrap();
        assert_eq!(textile, "h1. T\n\n");
    }

    #[test]
    fn test_convert_unknown_dialect() {
        let mut report = Report::new();
        let options = ConvertOptions::default();
        let err = convert("<p>x</p>", "markdown", &options, &mut report).unwrap_err();
        assert_eq!(err, ConvertError::DialectNotFound("markdown".to_string()));
    }
}
