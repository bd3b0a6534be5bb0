//! Markup tokenizer
//!
//! A small hand-rolled lexer that splits a document into text runs and
//! element tokens. It understands just enough tag syntax for exported
//! documents: start tags with double-quoted attributes, end tags, and
//! self-closing tags. Anything looser is a structural error.

use crate::error::ConvertError;

/// One lexical unit of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of character data between tags.
    Text(String),
    /// A start, end, or self-closing tag.
    Element(ElementToken),
}

/// A parsed tag with its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementToken {
    /// Tag name, as written in the source.
    pub tag: String,
    /// Attributes in source order.
    pub attributes: Vec<(String, String)>,
    /// True for `</tag>`.
    pub closing: bool,
    /// True for `<tag/>`.
    pub self_closing: bool,
}

impl ElementToken {
    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes rendered back to source form, each with a leading
    /// space. Used by placeholder output for unknown tags.
    pub fn attr_string(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out
    }
}

/// Pull-based tokenizer over a source string.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer { input, pos: 0 }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, ConvertError> {
        let rest = &self.input[self.pos..];
        if rest.is_empty() {
            return Ok(None);
        }
        if let Some(stripped) = rest.strip_prefix('<') {
            let close = stripped.find('>').ok_or_else(|| {
                ConvertError::MalformedTag("unterminated tag, missing '>'".to_string())
            })?;
            let inner = &stripped[..close];
            self.pos += close + 2;
            return parse_element(inner).map(|e| Some(Token::Element(e)));
        }
        let end = rest.find('<').unwrap_or(rest.len());
        self.pos += end;
        Ok(Some(Token::Text(rest[..end].to_string())))
    }
}

/// Parse the text between `<` and `>` into an element token.
fn parse_element(inner: &str) -> Result<ElementToken, ConvertError> {
    let mut body = inner.trim();
    if body.is_empty() {
        return Err(ConvertError::MalformedTag("empty tag".to_string()));
    }

    let closing = if let Some(rest) = body.strip_prefix('/') {
        body = rest.trim_start();
        true
    } else {
        false
    };
    let self_closing = if let Some(rest) = body.strip_suffix('/') {
        body = rest.trim_end();
        true
    } else {
        false
    };
    if body.is_empty() {
        return Err(ConvertError::MalformedTag(format!("no tag name in '<{inner}>'")));
    }

    let name_end = body.find(char::is_whitespace).unwrap_or(body.len());
    let tag = body[..name_end].to_string();
    let mut attrs = &body[name_end..];

    let mut attributes = Vec::new();
    loop {
        attrs = attrs.trim_start();
        if attrs.is_empty() {
            break;
        }
        let mut chars = attrs.char_indices();
        match chars.next() {
            Some((_, c)) if c.is_ascii_alphabetic() => {}
            _ => {
                return Err(ConvertError::MalformedTag(format!(
                    "bad attribute syntax in '<{inner}>'"
                )));
            }
        }
        let name_len = attrs
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':'))
            .unwrap_or(attrs.len());
        let name = &attrs[..name_len];
        let after_name = &attrs[name_len..];
        let after_eq = after_name.strip_prefix('=').ok_or_else(|| {
            ConvertError::MalformedTag(format!("attribute '{name}' has no value in '<{inner}>'"))
        })?;
        let after_quote = after_eq.strip_prefix('"').ok_or_else(|| {
            ConvertError::MalformedTag(format!("attribute '{name}' value is not quoted in '<{inner}>'"))
        })?;
        let value_len = after_quote.find('"').ok_or_else(|| {
            ConvertError::MalformedTag(format!("attribute '{name}' value is not terminated in '<{inner}>'"))
        })?;
        attributes.push((name.to_string(), after_quote[..value_len].to_string()));
        attrs = &after_quote[value_len + 1..];
    }

    Ok(ElementToken {
        tag,
        attributes,
        closing,
        self_closing,
    })
}

/// Stack of open elements, enforcing strict nesting.
#[derive(Debug, Default)]
pub struct ElementStack {
    stack: Vec<String>,
}

impl ElementStack {
    pub fn new() -> Self {
        ElementStack::default()
    }

    /// Record a newly opened element.
    pub fn open(&mut self, tag: &str) {
        self.stack.push(tag.to_string());
    }

    /// Close the innermost element; it must match `tag`.
    pub fn close(&mut self, tag: &str) -> Result<(), ConvertError> {
        match self.stack.pop() {
            Some(expected) if expected == tag => Ok(()),
            Some(expected) => Err(ConvertError::MismatchedTag {
                expected,
                found: tag.to_string(),
            }),
            None => Err(ConvertError::DanglingEndTag(tag.to_string())),
        }
    }

    /// Verify nothing was left open at end of document.
    pub fn finish(&self) -> Result<(), ConvertError> {
        match self.stack.last() {
            Some(tag) => Err(ConvertError::UnclosedElement(tag.clone())),
            None => Ok(()),
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
