//! Dialect abstraction
//!
//! A dialect is a target markup language: a table of per-tag translation
//! rules plus the entity escapes the target uses. Dialects are registered
//! in a [`crate::registry::DialectRegistry`] and selected by name.

use std::collections::HashMap;

use crate::engine::Emitter;
use crate::error::ConvertError;
use crate::formatter::EntityMap;
use crate::tokenizer::ElementToken;

/// Start-tag callback: emits target markup for an opening element.
pub type StartFn = fn(&mut Emitter<'_>, &ElementToken) -> Result<(), ConvertError>;

/// End-tag callback.
pub type EndFn = fn(&mut Emitter<'_>, &ElementToken) -> Result<(), ConvertError>;

/// The `(on_start, on_end)` pair for one element kind.
#[derive(Clone, Copy)]
pub struct ElementRule {
    pub on_start: StartFn,
    pub on_end: EndFn,
}

impl ElementRule {
    pub const fn new(on_start: StartFn, on_end: EndFn) -> Self {
        ElementRule { on_start, on_end }
    }
}

/// Tag-name to rule table, with a fallback rule for unknown tags.
pub struct RuleSet {
    rules: HashMap<&'static str, ElementRule>,
    unknown: ElementRule,
}

impl RuleSet {
    pub fn new(unknown: ElementRule) -> Self {
        RuleSet {
            rules: HashMap::new(),
            unknown,
        }
    }

    pub fn insert(&mut self, tag: &'static str, rule: ElementRule) {
        self.rules.insert(tag, rule);
    }

    pub fn get(&self, tag: &str) -> Option<&ElementRule> {
        self.rules.get(tag)
    }

    pub fn unknown(&self) -> &ElementRule {
        &self.unknown
    }

    /// The rule for a tag, falling back to the unknown-tag rule. The bool
    /// is true when the tag was actually known.
    pub fn rule_or_unknown(&self, tag: &str) -> (&ElementRule, bool) {
        match self.rules.get(tag) {
            Some(rule) => (rule, true),
            None => (&self.unknown, false),
        }
    }
}

/// A target markup language.
pub trait Dialect: Send + Sync {
    /// Registry name, e.g. `"asciidoc"`.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str {
        ""
    }

    /// File extensions conventionally used for this dialect, without dots.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Per-tag translation rules.
    fn rules(&self) -> &RuleSet;

    /// Entity escapes for this target.
    fn entities(&self) -> EntityMap;
}
