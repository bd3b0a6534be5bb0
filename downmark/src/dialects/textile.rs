//! Textile dialect
//!
//! Translation rules targeting Textile: `h1.`-style block signatures,
//! `*`/`_` emphasis, `"text":url` links, `!src(alt)!` images, and
//! pipe-delimited table rows. Style hints attach as `{...}` modifiers on
//! block signatures and cells.

use crate::dialect::{Dialect, ElementRule, RuleSet};
use crate::dialects::hint_value;
use crate::engine::{Emitter, SpanFrame};
use crate::error::ConvertError;
use crate::formatter::EntityMap;
use crate::report::Warning;
use crate::style::StyleFamily;
use crate::tokenizer::ElementToken;

const ENTITIES: EntityMap = EntityMap::new(&[("nbsp", "\u{a0}"), ("amp", "&")]);

/// The Textile target.
pub struct TextileDialect {
    rules: RuleSet,
}

impl Default for TextileDialect {
    fn default() -> Self {
        let mut rules = RuleSet::new(ElementRule::new(unknown_start, unknown_end));
        rules.insert("p", ElementRule::new(p_start, p_end));
        rules.insert("div", ElementRule::new(noop, div_end));
        rules.insert("span", ElementRule::new(span_start, span_end));
        rules.insert("a", ElementRule::new(a_start, a_end));
        rules.insert("img", ElementRule::new(img_start, noop));
        rules.insert("strong", ElementRule::new(strong_start, strong_end));
        rules.insert("b", ElementRule::new(strong_start, strong_end));
        rules.insert("em", ElementRule::new(em_start, em_end));
        rules.insert("i", ElementRule::new(em_start, em_end));
        rules.insert("code", ElementRule::new(code_start, code_end));
        rules.insert("br", ElementRule::new(br_start, noop));
        rules.insert("hr", ElementRule::new(hr_start, noop));
        rules.insert("ul", ElementRule::new(ul_start, list_end));
        rules.insert("ol", ElementRule::new(ol_start, list_end));
        rules.insert("li", ElementRule::new(li_start, noop));
        rules.insert("table", ElementRule::new(table_start, table_end));
        rules.insert("tr", ElementRule::new(tr_start, tr_end));
        rules.insert("td", ElementRule::new(td_start, noop));
        rules.insert("th", ElementRule::new(th_start, noop));
        rules.insert("blockquote", ElementRule::new(blockquote_start, blockquote_end));
        for tag in ["h1", "h2", "h3", "h4", "h5", "h6"] {
            rules.insert(tag, ElementRule::new(heading_start, heading_end));
        }
        TextileDialect { rules }
    }
}

impl Dialect for TextileDialect {
    fn name(&self) -> &str {
        "textile"
    }

    fn description(&self) -> &str {
        "Textile markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["textile"]
    }

    fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn entities(&self) -> EntityMap {
        ENTITIES
    }
}

fn noop(_emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    Ok(())
}

fn p_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    if let Some(hint) = emitter.hint_for(StyleFamily::Paragraph, token)? {
        emitter.flush_if_pending()?;
        emitter.raw(&format!("p{{{}}}. ", hint.trim_end()));
    }
    Ok(())
}

fn p_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.blank_line()
}

fn div_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()
}

fn heading_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    let level: usize = token.tag[1..].parse().unwrap_or(1);
    emitter.flush_if_pending()?;
    emitter.raw(&format!("h{level}. "));
    Ok(())
}

fn heading_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.blank_line()
}

fn a_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    let href = match token.attr("href") {
        Some(href) => href.to_string(),
        None => {
            emitter.warn(Warning::MissingTarget("a".to_string()));
            String::new()
        }
    };
    emitter.push_link(href);
    emitter.raw("\"");
    Ok(())
}

fn a_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    let href = emitter.pop_link().unwrap_or_default();
    emitter.trim_pending();
    emitter.raw(&format!("\":{href} "));
    Ok(())
}

fn img_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    let src = match token.attr("src") {
        Some(src) => src,
        None => {
            emitter.warn(Warning::MissingTarget("img".to_string()));
            ""
        }
    };
    match token.attr("alt") {
        Some(alt) => emitter.raw(&format!("!{src}({alt})! ")),
        None => {
            emitter.warn(Warning::MissingAlt(src.to_string()));
            emitter.raw(&format!("!{src}! "));
        }
    }
    Ok(())
}

fn strong_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.raw("*");
    Ok(())
}

fn strong_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.trim_pending();
    emitter.raw("* ");
    Ok(())
}

fn em_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.raw("_");
    Ok(())
}

fn em_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.trim_pending();
    emitter.raw("_ ");
    Ok(())
}

fn code_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.raw("@");
    Ok(())
}

fn code_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.trim_pending();
    emitter.raw("@ ");
    Ok(())
}

fn br_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.newline()
}

fn hr_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()?;
    emitter.raw("---");
    emitter.newline()
}

fn ul_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.push_list('*');
    emitter.blank_line()
}

fn ol_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.push_list('#');
    emitter.blank_line()
}

fn list_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.pop_list();
    emitter.blank_line()
}

fn li_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()?;
    let markers = emitter.list_marker_string();
    if markers.is_empty() {
        emitter.raw("* ");
    } else {
        emitter.raw(&markers);
        emitter.raw(" ");
    }
    Ok(())
}

fn table_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    emitter.blank_line()?;
    if let Some(hint) = emitter.hint_for(StyleFamily::Table, token)? {
        if hint_value(&hint, "width").is_some() {
            emitter.raw(&format!("table{{{}}}.", hint.trim_end()));
            emitter.newline()?;
        }
    }
    Ok(())
}

fn table_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.blank_line()
}

fn tr_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()
}

fn tr_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.trim_pending();
    emitter.raw("|");
    emitter.newline()
}

fn td_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    emitter.trim_pending();
    match emitter.hint_for(StyleFamily::Cell, token)? {
        Some(hint) => emitter.raw(&format!("|{{{}}}. ", hint.trim_end())),
        None => emitter.raw("|"),
    }
    Ok(())
}

fn th_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.trim_pending();
    emitter.raw("|_. ");
    Ok(())
}

fn blockquote_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()?;
    emitter.raw("bq. ");
    Ok(())
}

fn blockquote_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.blank_line()
}

fn span_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    let hint = emitter.hint_for(StyleFamily::Span, token)?;
    let frame = match hint.as_deref() {
        Some(hint) if hint_value(hint, "heading").is_some() => {
            emitter.flush_if_pending()?;
            emitter.raw("h3. ");
            SpanFrame::Heading
        }
        Some(hint) => {
            if let Some(color) = hint_value(hint, "color") {
                emitter.raw(&format!("%{{color:{color}}}"));
                SpanFrame::Inline("%".to_string())
            } else if hint_value(hint, "text-decoration") == Some("underline") {
                emitter.raw("+");
                SpanFrame::Inline("+".to_string())
            } else {
                SpanFrame::Plain
            }
        }
        None => SpanFrame::Plain,
    };
    emitter.push_span(frame);
    Ok(())
}

fn span_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    match emitter.pop_span() {
        Some(SpanFrame::Heading) => emitter.blank_line(),
        Some(SpanFrame::Inline(mark)) => {
            emitter.trim_pending();
            emitter.raw(&mark);
            emitter.raw(" ");
            Ok(())
        }
        Some(SpanFrame::Plain) | None => Ok(()),
    }
}

fn unknown_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    emitter.raw(&format!("<<{}{}>>", token.tag, token.attr_string()));
    Ok(())
}

fn unknown_end(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    emitter.raw(&format!("<</{}>>", token.tag));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Pipeline;
    use crate::report::Report;
    use crate::style::Stylesheet;

    fn convert(source: &str) -> (String, Report) {
        let dialect = TextileDialect::default();
        let mut report = Report::new();
        let output = Pipeline::new(&dialect)
            .run_to_string(source, &mut report)
            .unwrap();
        (output, report)
    }

    #[test]
    fn test_heading_signature() {
        let (output, _) = convert("<h1>Title</h1><p>Hello world</p>");
        assert_eq!(output, "h1. Title\n\nHello world\n\n");
    }

    #[test]
    fn test_emphasis_marks() {
        let (output, _) = convert("<p>a <b>bold</b> and <em>soft</em> word</p>");
        assert_eq!(output, "a *bold* and _soft_ word\n\n");
    }

    #[test]
    fn test_link_notation() {
        let (output, _) = convert(r#"<p><a href="https://example.org">go</a> now</p>"#);
        assert_eq!(output, "\"go\":https://example.org now\n\n");
    }

    #[test]
    fn test_image_notation() {
        let (output, report) = convert(r#"<p><img src="a.png" alt="pic"/> here</p>"#);
        assert_eq!(output, "!a.png(pic)! here\n\n");
        assert!(report.is_clean());
    }

    #[test]
    fn test_image_without_alt() {
        let (output, report) = convert(r#"<p><img src="a.png"/></p>"#);
        assert_eq!(output, "!a.png!\n\n");
        assert_eq!(
            report.warnings(),
            &[Warning::MissingAlt("a.png".to_string())]
        );
    }

    #[test]
    fn test_ordered_list_markers() {
        let (output, _) = convert("<ol><li>one</li><li>two</li></ol>");
        assert_eq!(output, "\n# one\n# two\n\n");
    }

    #[test]
    fn test_table_row_line() {
        let (output, _) = convert("<table><tr><th>k</th><td>v</td></tr></table>");
        assert_eq!(output, "\n|_. k|v|\n\n");
    }

    #[test]
    fn test_cell_style_modifier() {
        let sheet = Stylesheet::parse(".c { width: 50%; }").unwrap();
        let dialect = TextileDialect::default();
        let mut report = Report::new();
        let output = Pipeline::new(&dialect)
            .with_stylesheet(&sheet)
            .run_to_string(
                r#"<table><tr><td class="c">v</td></tr></table>"#,
                &mut report,
            )
            .unwrap();
        assert_eq!(output, "\n|{width: 31%; border: none;}. v|\n\n");
    }

    #[test]
    fn test_paragraph_margin_signature() {
        let sheet = Stylesheet::parse(".spaced { margin: 0.2in 0 0.2in 0; }").unwrap();
        let dialect = TextileDialect::default();
        let mut report = Report::new();
        let output = Pipeline::new(&dialect)
            .with_stylesheet(&sheet)
            .run_to_string(r#"<p class="spaced">text</p>"#, &mut report)
            .unwrap();
        assert_eq!(output, "p{margin: 1em 0;}. text\n\n");
    }

    #[test]
    fn test_span_color_modifier() {
        let sheet = Stylesheet::parse(".hot { color: red; }").unwrap();
        let dialect = TextileDialect::default();
        let mut report = Report::new();
        let output = Pipeline::new(&dialect)
            .with_stylesheet(&sheet)
            .run_to_string(r#"<p><span class="hot">hot</span> text</p>"#, &mut report)
            .unwrap();
        assert_eq!(output, "%{color:red}hot% text\n\n");
    }

    #[test]
    fn test_blockquote_signature() {
        let (output, _) = convert("<blockquote>quoted text</blockquote>");
        assert_eq!(output, "bq. quoted text\n\n");
    }

    #[test]
    fn test_nonbreaking_space_entity() {
        let (output, report) = convert("<p>a&nbsp;b</p>");
        assert_eq!(output, "a\u{a0}b\n\n");
        assert!(report.is_clean());
    }
}
