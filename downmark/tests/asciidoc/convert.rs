//! Conversion tests for the AsciiDoc dialect (HTML → AsciiDoc)
//!
//! These tests verify that exported HTML documents are correctly translated
//! to AsciiDoc by checking the emitted markup.

use downmark::{AsciidocDialect, ConvertOptions, Pipeline, Report, Warning};
use insta::assert_snapshot;

/// Helper to convert HTML source to AsciiDoc
fn html_to_adoc(source: &str) -> (String, Report) {
    let dialect = AsciidocDialect::default();
    let mut report = Report::new();
    let output = Pipeline::new(&dialect)
        .run_to_string(source, &mut report)
        .expect("conversion to succeed");
    (output, report)
}

// ============================================================================
// BASIC ELEMENT TESTS
// ============================================================================

#[test]
fn test_paragraph_simple() {
    let (output, report) = html_to_adoc("<p>This is a simple paragraph.</p>");
    assert_eq!(output, "This is a simple paragraph.\n\n");
    assert!(report.is_clean());
}

#[test]
fn test_heading_levels() {
    let (output, _) = html_to_adoc("<h1>One</h1><h2>Two</h2><h3>Three</h3>");
    assert_eq!(output, "= One\n== Two\n=== Three\n");
}

#[test]
fn test_inline_emphasis() {
    // Punctuation directly after a closing tag becomes its own word; the
    // translation does not reattach it.
    let (output, _) =
        html_to_adoc("<p>with <b>bold</b>, <em>italic</em> and <code>mono</code> text</p>");
    assert_eq!(output, "with **bold** , __italic__ and `mono` text\n\n");
}

#[test]
fn test_kitchensink_contains_all_constructs() {
    let source = include_str!("../fixtures/kitchensink.html");
    let (output, report) = html_to_adoc(source);

    assert!(output.contains("= Kitchen Sink"));
    assert!(output.contains("== Lists"));
    assert!(output.contains("**bold**"));
    assert!(output.contains("__italic__"));
    assert!(output.contains("`inline code`"));
    assert!(output.contains("link:https://example.org[example]"));
    assert!(output.contains("* first item"));
    assert!(output.contains(". step one"));
    assert!(output.contains("|==="));
    assert!(output.contains("|key"));
    assert!(output.contains("image::diagram.png[A diagram]"));
    assert!(output.contains("____\nQuoted wisdom goes here.\n____"));
    assert!(output.contains("'''"));
    assert!(output.contains("Line one +"));
    assert!(output.contains("a{nbsp}non-breaking"));
    assert!(report.is_clean());
}

#[test]
fn test_word_wrap_at_configured_column() {
    let dialect = AsciidocDialect::default();
    let mut report = Report::new();
    let options = ConvertOptions {
        max_line_length: 20,
        ..ConvertOptions::default()
    };
    let output = Pipeline::new(&dialect)
        .with_options(options)
        .run_to_string(
            "<p>these words should wrap neatly at twenty columns</p>",
            &mut report,
        )
        .expect("conversion to succeed");

    for line in output.lines() {
        assert!(
            line.len() <= 20,
            "line exceeds the column limit: {line:?}"
        );
    }
    let rejoined: Vec<&str> = output.split_whitespace().collect();
    assert_eq!(
        rejoined.join(" "),
        "these words should wrap neatly at twenty columns"
    );
}

#[test]
fn test_nested_emphasis_in_link() {
    let (output, _) =
        html_to_adoc(r#"<p><a href="https://x.org">a <b>bold</b> link</a></p>"#);
    assert_eq!(output, "link:https://x.org[a **bold** link]\n\n");
}

#[test]
fn test_small_document_snapshot() {
    let (output, _) = html_to_adoc("<h1>Notes</h1><p>Alpha beta.</p><ul><li>one</li></ul>");
    assert_snapshot!(output.trim_end(), @r###"
    = Notes
    Alpha beta.


    * one
    "###);
}

#[test]
fn test_unclosed_element_is_fatal() {
    let dialect = AsciidocDialect::default();
    let mut report = Report::new();
    let err = Pipeline::new(&dialect)
        .run_to_string("<p>never closed", &mut report)
        .unwrap_err();
    assert_eq!(err.to_string(), "Unclosed element <p> at end of document");
}

#[test]
fn test_missing_image_source_warns() {
    let (output, report) = html_to_adoc(r#"<img alt="lost"/>"#);
    assert_eq!(output, "image::[lost]\n");
    assert_eq!(
        report.warnings(),
        &[Warning::MissingTarget("img".to_string())]
    );
}
