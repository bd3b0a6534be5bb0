//! Conversion tests for the Textile dialect (HTML → Textile)

use downmark::{Pipeline, Report, Stylesheet, TextileDialect};

fn html_to_textile(source: &str) -> (String, Report) {
    let dialect = TextileDialect::default();
    let mut report = Report::new();
    let output = Pipeline::new(&dialect)
        .run_to_string(source, &mut report)
        .expect("conversion to succeed");
    (output, report)
}

#[test]
fn test_heading_and_paragraph() {
    let (output, report) = html_to_textile("<h1>Title</h1><p>Some text here.</p>");
    assert_eq!(output, "h1. Title\n\nSome text here.\n\n");
    assert!(report.is_clean());
}

#[test]
fn test_kitchensink_contains_all_constructs() {
    let source = include_str!("../fixtures/kitchensink.html");
    let (output, report) = html_to_textile(source);

    assert!(output.contains("h1. Kitchen Sink"));
    assert!(output.contains("h2. Lists"));
    assert!(output.contains("*bold*"));
    assert!(output.contains("_italic_"));
    assert!(output.contains("@inline code@"));
    assert!(output.contains("\"example\":https://example.org"));
    assert!(output.contains("* first item"));
    assert!(output.contains("# step one"));
    assert!(output.contains("|_. key|value|"));
    assert!(output.contains("!diagram.png(A diagram)!"));
    assert!(output.contains("bq. Quoted wisdom goes here."));
    assert!(output.contains("---"));
    assert!(output.contains("a\u{a0}non-breaking"));
    assert!(report.is_clean());
}

#[test]
fn test_row_on_a_single_line() {
    let (output, _) = html_to_textile(
        "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>",
    );
    assert_eq!(output, "\n|a|b|\n|c|d|\n\n");
}

#[test]
fn test_cell_and_paragraph_style_modifiers() {
    let css = include_str!("../fixtures/page.css");
    let sheet = Stylesheet::parse(css).unwrap();
    let dialect = TextileDialect::default();
    let mut report = Report::new();
    let output = Pipeline::new(&dialect)
        .with_stylesheet(&sheet)
        .run_to_string(
            r#"<p class="spaced">text</p><table><tr><td class="half">v</td></tr></table>"#,
            &mut report,
        )
        .unwrap();
    assert!(output.contains("p{margin: 1em 0;}. text"));
    assert!(output.contains("|{width: 31%; border: none;}. v|"));
}

#[test]
fn test_span_promoted_to_heading() {
    let css = include_str!("../fixtures/page.css");
    let sheet = Stylesheet::parse(css).unwrap();
    let dialect = TextileDialect::default();
    let mut report = Report::new();
    let output = Pipeline::new(&dialect)
        .with_stylesheet(&sheet)
        .run_to_string(r#"<p><span class="big">Section</span></p>"#, &mut report)
        .unwrap();
    assert_eq!(output, "h3. Section\n\n\n");
}

#[test]
fn test_unknown_tag_placeholder() {
    let (output, report) = html_to_textile("<p><q>inline quote</q></p>");
    assert_eq!(output, "<<q>>inline quote <</q>>\n\n");
    assert_eq!(report.warnings().len(), 1);
}
