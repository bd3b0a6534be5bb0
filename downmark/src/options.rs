//! Conversion options

use crate::style::analysis::REFERENCE_PAGE_WIDTH_MM;

/// Knobs shared by the formatter, the reflow engine, and the style analyzer.
///
/// Mirrored by `downmark-config` for file-based configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Column limit for word wrapping.
    pub max_line_length: usize,
    /// When false, a word ending in `.` forces a line break (one sentence
    /// per line while inserting).
    pub paragraph_layout: bool,
    /// When true, `block_reformat` splits text into sentences first and
    /// reflows each one independently.
    pub sentence_mode: bool,
    /// Assumed page width used to normalize percentage widths, in
    /// millimeters. Historical default: 6.26in.
    pub reference_page_width_mm: f64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            max_line_length: 80,
            paragraph_layout: true,
            sentence_mode: false,
            reference_page_width_mm: REFERENCE_PAGE_WIDTH_MM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.max_line_length, 80);
        assert!(options.paragraph_layout);
        assert!(!options.sentence_mode);
        assert!((options.reference_page_width_mm - 159.004).abs() < 1e-9);
    }
}
