//! Built-in dialects

pub mod asciidoc;
pub mod textile;

pub use asciidoc::AsciidocDialect;
pub use textile::TextileDialect;

/// Extract one `key: value;` fragment from a style hint string.
pub(crate) fn hint_value<'h>(hint: &'h str, key: &str) -> Option<&'h str> {
    for fragment in hint.split(';') {
        if let Some((k, v)) = fragment.split_once(':') {
            if k.trim() == key {
                return Some(v.trim());
            }
        }
    }
    None
}
