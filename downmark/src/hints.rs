//! Hints sidecar
//!
//! A hints file is an ordered list of regex substitutions applied to the
//! source text before structural translation. One rule per line,
//! `pattern ==> replacement`; blank lines and `#` comments are skipped.
//! An empty replacement deletes the match.

use regex::Regex;

use crate::error::ConvertError;

#[derive(Debug, Clone)]
struct HintRule {
    pattern: Regex,
    replacement: String,
}

/// Parsed hints file.
#[derive(Debug, Clone, Default)]
pub struct Hints {
    rules: Vec<HintRule>,
}

impl Hints {
    /// Parse hints text. Line numbers in errors are 1-based.
    pub fn parse(text: &str) -> Result<Self, ConvertError> {
        let mut rules = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (pattern, replacement) = line.split_once("==>").ok_or_else(|| {
                ConvertError::BadHintPattern {
                    line: line_no,
                    message: "missing '==>' separator".to_string(),
                }
            })?;
            let pattern = pattern.trim();
            if pattern.is_empty() {
                return Err(ConvertError::BadHintPattern {
                    line: line_no,
                    message: "empty pattern".to_string(),
                });
            }
            let pattern = Regex::new(pattern).map_err(|e| ConvertError::BadHintPattern {
                line: line_no,
                message: e.to_string(),
            })?;
            rules.push(HintRule {
                pattern,
                replacement: replacement.trim().to_string(),
            });
        }
        Ok(Hints { rules })
    }

    /// Apply all rules to the text, in file order.
    pub fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        for rule in &self.rules {
            current = rule
                .pattern
                .replace_all(&current, rule.replacement.as_str())
                .into_owned();
        }
        current
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
