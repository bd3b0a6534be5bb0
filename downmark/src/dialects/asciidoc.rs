//! AsciiDoc dialect
//!
//! Translation rules targeting AsciiDoc: `=` heading markers, `**`/`__`
//! emphasis, `link:`/`image::` macros, `|===` tables. Unknown tags come
//! out as bracketed placeholders so nothing is silently dropped.

use crate::dialect::{Dialect, ElementRule, RuleSet};
use crate::dialects::hint_value;
use crate::engine::{Emitter, SpanFrame};
use crate::error::ConvertError;
use crate::formatter::EntityMap;
use crate::report::Warning;
use crate::style::StyleFamily;
use crate::tokenizer::ElementToken;

const ENTITIES: EntityMap = EntityMap::new(&[("nbsp", "{nbsp}"), ("amp", "&")]);

const IMG_ATTRIBUTES: &[&str] = &["src", "alt", "width", "height", "class", "style"];

/// The AsciiDoc target.
pub struct AsciidocDialect {
    rules: RuleSet,
}

impl Default for AsciidocDialect {
    fn default() -> Self {
        let mut rules = RuleSet::new(ElementRule::new(unknown_start, unknown_end));
        rules.insert("p", ElementRule::new(noop, p_end));
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
        rules.insert("tr", ElementRule::new(tr_start, noop));
        rules.insert("td", ElementRule::new(cell_start, noop));
        rules.insert("th", ElementRule::new(cell_start, noop));
        rules.insert("blockquote", ElementRule::new(blockquote_start, blockquote_end));
        for tag in ["h1", "h2", "h3", "h4", "h5", "h6"] {
            rules.insert(tag, ElementRule::new(heading_start, heading_end));
        }
        AsciidocDialect { rules }
    }
}

impl Dialect for AsciidocDialect {
    fn name(&self) -> &str {
        "asciidoc"
    }

    fn description(&self) -> &str {
        "AsciiDoc markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["adoc", "asciidoc"]
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

fn p_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.blank_line()
}

fn div_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()
}

fn heading_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    let level: usize = token.tag[1..].parse().unwrap_or(1);
    emitter.flush_if_pending()?;
    emitter.raw(&"=".repeat(level));
    emitter.raw(" ");
    Ok(())
}

fn heading_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()
}

fn a_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    let href = match token.attr("href") {
        Some(href) => href,
        None => {
            emitter.warn(Warning::MissingTarget("a".to_string()));
            ""
        }
    };
    emitter.raw(&format!("link:{href}["));
    Ok(())
}

fn a_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.trim_pending();
    emitter.raw("] ");
    Ok(())
}

fn strong_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.raw("**");
    Ok(())
}

fn strong_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.trim_pending();
    emitter.raw("** ");
    Ok(())
}

fn em_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.raw("__");
    Ok(())
}

fn em_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.trim_pending();
    emitter.raw("__ ");
    Ok(())
}

fn code_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.raw("`");
    Ok(())
}

fn code_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.trim_pending();
    emitter.raw("` ");
    Ok(())
}

fn br_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.trim_pending();
    emitter.raw(" +");
    emitter.newline()
}

fn hr_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()?;
    emitter.raw("'''");
    emitter.newline()
}

fn ul_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.push_list('*');
    emitter.blank_line()
}

fn ol_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.push_list('.');
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

fn img_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()?;
    let src = match token.attr("src") {
        Some(src) => src,
        None => {
            emitter.warn(Warning::MissingTarget("img".to_string()));
            ""
        }
    };
    let alt = match token.attr("alt") {
        Some(alt) => alt,
        None => {
            emitter.warn(Warning::MissingAlt(src.to_string()));
            src
        }
    };
    for (name, _) in &token.attributes {
        if !IMG_ATTRIBUTES.contains(&name.as_str()) {
            emitter.warn(Warning::UnknownAttribute {
                tag: "img".to_string(),
                attribute: name.clone(),
            });
        }
    }

    let mut parts = vec![alt.to_string()];
    if let Some(width) = token.attr("width") {
        parts.push(format!("width={width}"));
    }
    if let Some(height) = token.attr("height") {
        parts.push(format!("height={height}"));
    }
    if let Some(class) = token.attr("class") {
        parts.push(format!("role={class}"));
    }
    if let Some(hint) = emitter.hint_for(StyleFamily::Frame, token)? {
        if token.attr("width").is_none() {
            if let Some(width) = hint_value(&hint, "width") {
                parts.push(format!("width={width}"));
            }
        }
        if let Some(float) = hint_value(&hint, "float") {
            parts.push(format!("float={float}"));
        }
    }

    emitter.raw(&format!("image::{src}[{}]", parts.join(",")));
    emitter.newline()
}

fn table_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    emitter.blank_line()?;
    let width = emitter
        .hint_for(StyleFamily::Table, token)?
        .and_then(|hint| hint_value(&hint, "width").map(str::to_string));
    match width {
        Some(width) => emitter.raw(&format!("[cols=\"\", width={width}]")),
        None => emitter.raw("[cols=\"\"]"),
    }
    emitter.newline()?;
    emitter.raw("|===");
    emitter.newline()
}

fn table_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()?;
    emitter.raw("|===");
    emitter.newline()
}

fn tr_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.blank_line()
}

fn cell_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()?;
    emitter.raw("|");
    Ok(())
}

fn blockquote_start(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.blank_line()?;
    emitter.raw("____");
    emitter.newline()
}

fn blockquote_end(emitter: &mut Emitter<'_>, _token: &ElementToken) -> Result<(), ConvertError> {
    emitter.flush_if_pending()?;
    emitter.raw("____");
    emitter.newline()
}

fn span_start(emitter: &mut Emitter<'_>, token: &ElementToken) -> Result<(), ConvertError> {
    let hint = emitter.hint_for(StyleFamily::Span, token)?;
    let frame = match hint.as_deref() {
        Some(hint) if hint_value(hint, "heading").is_some() => {
            emitter.flush_if_pending()?;
            emitter.raw("=== ");
            SpanFrame::Heading
        }
        Some(hint) => {
            if let Some(color) = hint_value(hint, "color") {
                emitter.raw(&format!("[.{color}]#"));
                SpanFrame::Inline("#".to_string())
            } else if hint_value(hint, "text-decoration") == Some("underline") {
                emitter.raw("[.underline]#");
                SpanFrame::Inline("#".to_string())
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
        Some(SpanFrame::Heading) => emitter.flush_if_pending(),
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
