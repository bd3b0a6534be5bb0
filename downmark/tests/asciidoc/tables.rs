//! Table and stylesheet tests for the AsciiDoc dialect

use downmark::{AsciidocDialect, Pipeline, Report, Stylesheet};

fn convert_with_css(source: &str, css: &str) -> String {
    let sheet = Stylesheet::parse(css).expect("stylesheet to parse");
    let dialect = AsciidocDialect::default();
    let mut report = Report::new();
    Pipeline::new(&dialect)
        .with_stylesheet(&sheet)
        .run_to_string(source, &mut report)
        .expect("conversion to succeed")
}

#[test]
fn test_plain_table() {
    let dialect = AsciidocDialect::default();
    let mut report = Report::new();
    let output = Pipeline::new(&dialect)
        .run_to_string(
            "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>",
            &mut report,
        )
        .unwrap();
    assert_eq!(
        output,
        "\n[cols=\"\"]\n|===\n\n|a\n|b\n\n|c\n|d\n|===\n"
    );
}

#[test]
fn test_table_width_bucketed_from_css() {
    let css = include_str!("../fixtures/page.css");
    let output = convert_with_css(
        r#"<table class="wide"><tr><td>x</td></tr></table>"#,
        css,
    );
    assert!(output.contains("[cols=\"\", width=100%]"));

    let output = convert_with_css(
        r#"<table class="half"><tr><td>x</td></tr></table>"#,
        css,
    );
    assert!(output.contains("[cols=\"\", width=50%]"));
}

#[test]
fn test_header_cells_use_same_delimiter() {
    let dialect = AsciidocDialect::default();
    let mut report = Report::new();
    let output = Pipeline::new(&dialect)
        .run_to_string("<table><tr><th>k</th><td>v</td></tr></table>", &mut report)
        .unwrap();
    assert!(output.contains("|k\n|v"));
}

#[test]
fn test_image_frame_width_from_css() {
    let css = include_str!("../fixtures/page.css");
    let output = convert_with_css(r#"<img src="a.png" alt="x" class="half"/>"#, css);
    assert_eq!(output, "image::a.png[x,role=half,width=50%]\n");
}
