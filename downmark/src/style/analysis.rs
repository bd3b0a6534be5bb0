//! Style analysis
//!
//! Maps groups of CSS declarations to presentation hints, one analysis per
//! semantic element family. A hint is a small `key: value; ` fragment
//! string the dialects translate into target-markup attributes.

use crate::error::ConvertError;
use crate::style::CssRule;

/// Assumed page width for normalizing percentage widths: 6.26 inches.
pub const REFERENCE_PAGE_WIDTH_MM: f64 = 6.26 * 25.4;

/// Nominal full width of a table, against which cell widths are expressed.
pub const CELL_FULL_WIDTH_MM: f64 = 254.0;

/// Element family a class is analysed for. The same class can yield a
/// different hint depending on where it is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFamily {
    Paragraph,
    Span,
    Frame,
    Cell,
    Row,
    Table,
    Body,
}

/// Fixed heuristics that turn declarations into hints.
#[derive(Debug, Clone)]
pub struct StyleAnalyzer {
    reference_page_width_mm: f64,
}

impl Default for StyleAnalyzer {
    fn default() -> Self {
        StyleAnalyzer {
            reference_page_width_mm: REFERENCE_PAGE_WIDTH_MM,
        }
    }
}

impl StyleAnalyzer {
    pub fn new(reference_page_width_mm: f64) -> Self {
        StyleAnalyzer {
            reference_page_width_mm,
        }
    }

    /// Analyse a declaration group for the given element family.
    ///
    /// Returns the hint fragment, possibly empty when nothing in the group
    /// maps to a supported hint.
    pub fn analyse(
        &self,
        family: StyleFamily,
        rules: &[CssRule],
    ) -> Result<String, ConvertError> {
        match family {
            StyleFamily::Paragraph => Ok(self.analyse_paragraph_rules(rules)),
            StyleFamily::Span => Ok(self.analyse_span_rules(rules)),
            StyleFamily::Frame => self.analyse_frame_rules(rules),
            StyleFamily::Cell => self.analyse_cell_table_rules(rules),
            StyleFamily::Row => Ok(self.analyse_row_rules(rules)),
            StyleFamily::Table => self.analyse_table_rules(rules),
            StyleFamily::Body => Ok(self.analyse_body_rules(rules)),
        }
    }

    /// Convert a width value to millimeters. Only `in` and `%` are
    /// supported; `%` is taken against the reference page width.
    pub fn width_to_mm(&self, value: &str) -> Result<f64, ConvertError> {
        let value = value.trim();
        if let Some(number) = value.strip_suffix("in") {
            return number
                .trim()
                .parse::<f64>()
                .map(|n| n * 25.4)
                .map_err(|_| ConvertError::UnsupportedUnit(value.to_string()));
        }
        if let Some(number) = value.strip_suffix('%') {
            return number
                .trim()
                .parse::<f64>()
                .map(|n| n * self.reference_page_width_mm / 100.0)
                .map_err(|_| ConvertError::UnsupportedUnit(value.to_string()));
        }
        Err(ConvertError::UnsupportedUnit(value.to_string()))
    }

    /// Bucket an absolute width into the coarse percentages frames and
    /// tables use.
    pub fn width_bucket_percent(&self, mm: f64) -> u32 {
        if mm > 110.0 {
            100
        } else if mm > 55.0 {
            50
        } else {
            25
        }
    }

    fn analyse_paragraph_rules(&self, rules: &[CssRule]) -> String {
        let mut hint = String::new();
        let mut vertical_margin: Option<bool> = None;
        for rule in rules {
            match rule.key.as_str() {
                "margin" => {
                    let parts: Vec<&str> = rule.value.split_whitespace().collect();
                    if let Some(top) = parts.first() {
                        let bottom = parts.get(2).copied().unwrap_or(top);
                        vertical_margin = Some(!is_zero_length(top) || !is_zero_length(bottom));
                    }
                }
                "margin-top" | "margin-bottom" => {
                    let nonzero = !is_zero_length(&rule.value);
                    vertical_margin = Some(vertical_margin.unwrap_or(false) || nonzero);
                }
                "text-align" => {
                    if rule.value == "center" || rule.value == "right" {
                        hint.push_str(&format!("text-align: {}; ", rule.value));
                    }
                }
                _ => {}
            }
        }
        match vertical_margin {
            Some(true) => hint.push_str("margin: 1em 0; "),
            Some(false) => hint.push_str("margin: none; "),
            None => {}
        }
        hint
    }

    fn analyse_span_rules(&self, rules: &[CssRule]) -> String {
        let mut hint = String::new();
        let mut color: Option<&str> = None;
        let mut underline = false;
        for rule in rules {
            match rule.key.as_str() {
                "font-size" => {
                    if let Some(points) = rule.value.strip_suffix("pt") {
                        if let Ok(size) = points.trim().parse::<f64>() {
                            if size > 12.0 {
                                hint.push_str("heading: 3; ");
                            }
                        }
                    }
                }
                "color" => color = Some(rule.value.as_str()),
                "text-decoration" => {
                    if rule.value == "underline" {
                        underline = true;
                    }
                }
                _ => {}
            }
        }
        // Color plus underline together is hyperlink styling; the link
        // element already carries that meaning, so neither is emitted.
        match (color, underline) {
            (Some(c), false) => hint.push_str(&format!("color: {c}; ")),
            (None, true) => hint.push_str("text-decoration: underline; "),
            _ => {}
        }
        hint
    }

    fn analyse_frame_rules(&self, rules: &[CssRule]) -> Result<String, ConvertError> {
        let mut hint = String::new();
        for rule in rules {
            match rule.key.as_str() {
                "width" => {
                    let mm = self.width_to_mm(&rule.value)?;
                    let percent = self.width_bucket_percent(mm);
                    hint.push_str(&format!("width: {percent}%; "));
                }
                "float" => {
                    if rule.value == "left" || rule.value == "right" {
                        hint.push_str(&format!("float: {}; ", rule.value));
                    }
                }
                _ => {}
            }
        }
        Ok(hint)
    }

    fn analyse_cell_table_rules(&self, rules: &[CssRule]) -> Result<String, ConvertError> {
        let mut hint = String::new();
        let mut bordered = false;
        for rule in rules {
            match rule.key.as_str() {
                "width" => {
                    let mm = self.width_to_mm(&rule.value)?;
                    let percent = (mm / CELL_FULL_WIDTH_MM * 100.0).round() as u32;
                    hint.push_str(&format!("width: {percent}%; "));
                }
                "border" | "border-top" | "border-bottom" | "border-left" | "border-right" => {
                    if rule.value != "none" {
                        bordered = true;
                    }
                }
                _ => {}
            }
        }
        if !bordered {
            hint.push_str("border: none; ");
        }
        Ok(hint)
    }

    fn analyse_row_rules(&self, rules: &[CssRule]) -> String {
        let mut hint = String::new();
        for rule in rules {
            match rule.key.as_str() {
                "text-align" | "vertical-align" => {
                    hint.push_str(&format!("{}: {}; ", rule.key, rule.value));
                }
                _ => {}
            }
        }
        hint
    }

    fn analyse_table_rules(&self, rules: &[CssRule]) -> Result<String, ConvertError> {
        let mut hint = String::new();
        for rule in rules {
            if rule.key == "width" {
                let mm = self.width_to_mm(&rule.value)?;
                let percent = self.width_bucket_percent(mm);
                hint.push_str(&format!("width: {percent}%; "));
            }
        }
        Ok(hint)
    }

    fn analyse_body_rules(&self, rules: &[CssRule]) -> String {
        let mut hint = String::new();
        for rule in rules {
            if rule.key == "text-align" && (rule.value == "center" || rule.value == "right") {
                hint.push_str(&format!("text-align: {}; ", rule.value));
            }
        }
        hint
    }
}

/// True when the value parses as a zero length. Unparseable values count
/// as zero.
fn is_zero_length(value: &str) -> bool {
    let digits: String = value
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+')
        .collect();
    digits.parse::<f64>().map(|n| n == 0.0).unwrap_or(true)
}
