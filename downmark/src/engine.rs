//! Translation engine
//!
//! Drives a tokenizer walk over the source document, dispatching each
//! element to the active dialect's rule table. All output funnels through
//! an [`Emitter`], which owns the line formatter plus the small amount of
//! cross-element state the rules need (open spans, link targets, list
//! nesting).

use std::io;

use crate::dialect::Dialect;
use crate::error::ConvertError;
use crate::formatter::{EntityMap, LineFormatter};
use crate::hints::Hints;
use crate::options::ConvertOptions;
use crate::report::{Report, Warning};
use crate::style::{StyleAnalyzer, StyleFamily, Stylesheet};
use crate::tokenizer::{ElementStack, ElementToken, Token, Tokenizer};

/// Tags with no content model; treated as self-closing even when written
/// as bare start tags.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// What a styled `<span>` opened, so its end tag can close it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanFrame {
    /// No markup was opened.
    Plain,
    /// An inline mark was opened; the stored string closes it.
    Inline(String),
    /// The span was promoted to a heading line.
    Heading,
}

/// Shared output state handed to every translation rule.
pub struct Emitter<'a> {
    formatter: LineFormatter<&'a mut dyn io::Write>,
    report: &'a mut Report,
    stylesheet: Option<&'a Stylesheet>,
    analyzer: StyleAnalyzer,
    span_frames: Vec<SpanFrame>,
    link_targets: Vec<String>,
    list_markers: Vec<char>,
}

impl<'a> Emitter<'a> {
    pub fn new(
        out: &'a mut dyn io::Write,
        options: &ConvertOptions,
        entities: EntityMap,
        report: &'a mut Report,
        stylesheet: Option<&'a Stylesheet>,
    ) -> Self {
        Emitter {
            formatter: LineFormatter::new(out, options, entities),
            report,
            stylesheet,
            analyzer: StyleAnalyzer::new(options.reference_page_width_mm),
            span_frames: Vec::new(),
            link_targets: Vec::new(),
            list_markers: Vec::new(),
        }
    }

    /// Insert running text with wrapping and entity substitution.
    pub fn text(&mut self, text: &str) -> Result<(), ConvertError> {
        self.formatter.insert(text, self.report)
    }

    /// Append markup verbatim to the pending line.
    pub fn raw(&mut self, text: &str) {
        self.formatter.raw(text);
    }

    pub fn newline(&mut self) -> Result<(), ConvertError> {
        self.formatter.newline()
    }

    pub fn blank_line(&mut self) -> Result<(), ConvertError> {
        self.formatter.blank_line()
    }

    pub fn flush_if_pending(&mut self) -> Result<(), ConvertError> {
        self.formatter.flush_if_pending()
    }

    pub fn trim_pending(&mut self) {
        self.formatter.trim_pending();
    }

    /// Record a recoverable issue.
    pub fn warn(&mut self, warning: Warning) {
        self.report.warn(warning);
    }

    /// Style hint for the element's `class` attribute, analysed for the
    /// given family. The first class with declarations in the active
    /// stylesheet wins; `None` when nothing applies.
    pub fn hint_for(
        &mut self,
        family: StyleFamily,
        token: &ElementToken,
    ) -> Result<Option<String>, ConvertError> {
        let sheet = match self.stylesheet {
            Some(sheet) => sheet,
            None => return Ok(None),
        };
        let classes = match token.attr("class") {
            Some(classes) => classes,
            None => return Ok(None),
        };
        for class in classes.split_whitespace() {
            if let Some(rules) = sheet.rules_for(class) {
                let hint = self.analyzer.analyse(family, rules)?;
                if !hint.is_empty() {
                    return Ok(Some(hint));
                }
            }
        }
        Ok(None)
    }

    pub fn push_span(&mut self, frame: SpanFrame) {
        self.span_frames.push(frame);
    }

    pub fn pop_span(&mut self) -> Option<SpanFrame> {
        self.span_frames.pop()
    }

    pub fn push_link(&mut self, target: String) {
        self.link_targets.push(target);
    }

    pub fn pop_link(&mut self) -> Option<String> {
        self.link_targets.pop()
    }

    pub fn push_list(&mut self, marker: char) {
        self.list_markers.push(marker);
    }

    pub fn pop_list(&mut self) {
        self.list_markers.pop();
    }

    /// Nested list marker prefix, e.g. `**` inside two unordered levels.
    pub fn list_marker_string(&self) -> String {
        self.list_markers.iter().collect()
    }

    fn finalize(&mut self) -> Result<(), ConvertError> {
        self.formatter.finalize()
    }
}

/// One configured conversion: dialect plus options, stylesheet, and hints.
pub struct Pipeline<'a> {
    dialect: &'a dyn Dialect,
    options: ConvertOptions,
    stylesheet: Option<&'a Stylesheet>,
    hints: Option<&'a Hints>,
}

impl<'a> Pipeline<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Pipeline {
            dialect,
            options: ConvertOptions::default(),
            stylesheet: None,
            hints: None,
        }
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_stylesheet(mut self, stylesheet: &'a Stylesheet) -> Self {
        self.stylesheet = Some(stylesheet);
        self
    }

    pub fn with_hints(mut self, hints: &'a Hints) -> Self {
        self.hints = Some(hints);
        self
    }

    /// Convert `source`, writing translated markup to `out`. The sink is
    /// flushed on every exit path, including errors.
    pub fn run(
        &self,
        source: &str,
        out: &mut dyn io::Write,
        report: &mut Report,
    ) -> Result<(), ConvertError> {
        let rewritten = match self.hints {
            Some(hints) => hints.apply(source),
            None => source.to_string(),
        };
        let mut emitter = Emitter::new(
            out,
            &self.options,
            self.dialect.entities(),
            report,
            self.stylesheet,
        );
        let walked = self.walk(&rewritten, &mut emitter);
        let finalized = emitter.finalize();
        walked?;
        finalized
    }

    /// Convert `source` into an owned string.
    pub fn run_to_string(&self, source: &str, report: &mut Report) -> Result<String, ConvertError> {
        let mut out = Vec::new();
        self.run(source, &mut out, report)?;
        String::from_utf8(out).map_err(|e| ConvertError::Io(e.to_string()))
    }

    fn walk(&self, source: &str, emitter: &mut Emitter<'_>) -> Result<(), ConvertError> {
        let rules = self.dialect.rules();
        let mut tokenizer = Tokenizer::new(source);
        let mut stack = ElementStack::new();

        while let Some(token) = tokenizer.next_token()? {
            match token {
                Token::Text(text) => {
                    let text = text.replace(['\n', '\r', '\t'], " ");
                    emitter.text(&text)?;
                }
                Token::Element(element) => {
                    if element.closing {
                        stack.close(&element.tag)?;
                        let (rule, _) = rules.rule_or_unknown(&element.tag);
                        (rule.on_end)(emitter, &element)?;
                    } else {
                        let (rule, known) = rules.rule_or_unknown(&element.tag);
                        if !known {
                            emitter.warn(Warning::UnknownTag(element.tag.clone()));
                        }
                        if element.self_closing || VOID_TAGS.contains(&element.tag.as_str()) {
                            // Start then end in sequence; the two emissions
                            // are never merged into one.
                            (rule.on_start)(emitter, &element)?;
                            (rule.on_end)(emitter, &element)?;
                        } else {
                            stack.open(&element.tag);
                            (rule.on_start)(emitter, &element)?;
                        }
                    }
                }
            }
        }
        stack.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialects::asciidoc::AsciidocDialect;

    #[test]
    fn test_heading_and_paragraph() {
        let dialect = AsciidocDialect::default();
        let mut report = Report::new();
        let output = Pipeline::new(&dialect)
            .run_to_string("<h1>Title</h1><p>Hello world</p>", &mut report)
            .unwrap();
        assert_eq!(output, "= Title\nHello world\n\n");
        assert!(report.is_clean());
    }

    #[test]
    fn test_unbalanced_input_fails_naming_the_tag() {
        let dialect = AsciidocDialect::default();
        let mut report = Report::new();
        let err = Pipeline::new(&dialect)
            .run_to_string("<p><b>bold</p>", &mut report)
            .unwrap_err();
        assert_eq!(
            err,
            ConvertError::MismatchedTag {
                expected: "b".to_string(),
                found: "p".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_tag_placeholder_and_warning() {
        let dialect = AsciidocDialect::default();
        let mut report = Report::new();
        let output = Pipeline::new(&dialect)
            .run_to_string("<p><aside>x</aside></p>", &mut report)
            .unwrap();
        assert_eq!(output, "<<aside>>x <</aside>>\n\n");
        assert_eq!(
            report.warnings(),
            &[Warning::UnknownTag("aside".to_string())]
        );
    }

    #[test]
    fn test_hints_rewrite_runs_before_translation() {
        let dialect = AsciidocDialect::default();
        let hints = Hints::parse("world ==> there").unwrap();
        let mut report = Report::new();
        let output = Pipeline::new(&dialect)
            .with_hints(&hints)
            .run_to_string("<p>Hello world</p>", &mut report)
            .unwrap();
        assert_eq!(output, "Hello there\n\n");
    }
}
