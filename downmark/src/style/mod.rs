//! Stylesheet support
//!
//! Parses the restricted CSS subset exporters emit alongside documents:
//! class selectors only, flat declaration blocks, optional `/* */`
//! comments. The parsed sheet feeds [`analysis::StyleAnalyzer`], which maps
//! declarations to presentation hints the dialects understand.

pub mod analysis;

pub use analysis::{StyleAnalyzer, StyleFamily};

use crate::error::ConvertError;

/// A single `key: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub key: String,
    pub value: String,
}

/// A parsed stylesheet, restricted to class selectors.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    classes: Vec<(String, Vec<CssRule>)>,
}

impl Stylesheet {
    /// Parse stylesheet text.
    ///
    /// Selectors must be single class selectors (`.name`); anything else is
    /// a [`ConvertError::NonClassSelector`]. Declarations without a
    /// terminating `;` before the closing brace are silently dropped.
    pub fn parse(text: &str) -> Result<Self, ConvertError> {
        let text = strip_comments(text);
        let mut classes = Vec::new();
        let mut rest = text.trim();

        while !rest.is_empty() {
            let open = rest
                .find('{')
                .ok_or_else(|| ConvertError::MalformedStylesheet("missing '{'".to_string()))?;
            let selector = rest[..open].trim();
            let class = selector.strip_prefix('.').ok_or_else(|| {
                ConvertError::NonClassSelector(selector.to_string())
            })?;
            if class.is_empty() || class.contains(char::is_whitespace) || class.contains(',') {
                return Err(ConvertError::NonClassSelector(selector.to_string()));
            }

            let body_rest = &rest[open + 1..];
            let close = body_rest
                .find('}')
                .ok_or_else(|| ConvertError::MalformedStylesheet("missing '}'".to_string()))?;
            let mut rules = Vec::new();
            let mut body = &body_rest[..close];
            // A declaration counts only when a ';' terminates it before the
            // closing brace; an unterminated trailing declaration is dropped.
            while let Some(semi) = body.find(';') {
                let declaration = body[..semi].trim();
                if let Some((key, value)) = declaration.split_once(':') {
                    rules.push(CssRule {
                        key: key.trim().to_string(),
                        value: value.trim().to_string(),
                    });
                }
                body = &body[semi + 1..];
            }
            classes.push((class.to_string(), rules));
            rest = body_rest[close + 1..].trim();
        }

        Ok(Stylesheet { classes })
    }

    /// Declarations for the given class name, if the sheet defines it.
    pub fn rules_for(&self, class: &str) -> Option<&[CssRule]> {
        self.classes
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, rules)| rules.as_slice())
    }

    /// Number of classes defined.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}
