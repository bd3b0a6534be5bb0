//! Line formatter and reflow engine
//!
//! The formatter is the single output funnel for a conversion: translation
//! rules push words and raw fragments into a line buffer, and the buffer is
//! flushed to the sink with word-wrap applied at a configurable column.
//! Words are never split mid-token; a token longer than the column limit is
//! written on a line of its own.
//!
//! A standalone [`block_reformat`] covers the other mode of operation,
//! reflowing a whole paragraph of already-plain text (used when reformatting
//! an existing document in place rather than translating one).

use std::io;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ConvertError;
use crate::options::ConvertOptions;
use crate::report::{Report, Warning};

/// Entity-name to target-markup substitution table. Each dialect supplies
/// its own, since the escape for a non-breaking space differs per target.
#[derive(Debug, Clone, Copy)]
pub struct EntityMap {
    pairs: &'static [(&'static str, &'static str)],
}

impl EntityMap {
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        EntityMap { pairs }
    }

    /// Target text for the entity name, if mapped.
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, target)| *target)
    }
}

/// Buffered, wrapping writer over a character sink.
pub struct LineFormatter<W: io::Write> {
    out: W,
    buf: String,
    max_line_length: usize,
    paragraph_layout: bool,
    entities: EntityMap,
}

impl<W: io::Write> LineFormatter<W> {
    pub fn new(out: W, options: &ConvertOptions, entities: EntityMap) -> Self {
        LineFormatter {
            out,
            buf: String::with_capacity(options.max_line_length + 1),
            max_line_length: options.max_line_length,
            paragraph_layout: options.paragraph_layout,
            entities,
        }
    }

    /// Insert running text, wrapping at spaces. In sentence layout
    /// (`paragraph_layout == false`) a word ending in `.` forces a line
    /// break immediately after it.
    pub fn insert(&mut self, text: &str, report: &mut Report) -> Result<(), ConvertError> {
        for word in text.split(' ') {
            if word.is_empty() {
                continue;
            }
            self.insert_no_break(&format!("{word} "), report)?;
            if !self.paragraph_layout && word.ends_with('.') {
                self.newline()?;
            }
        }
        Ok(())
    }

    /// Insert a segment that must never be split across lines. Entity
    /// references are substituted first.
    pub fn insert_no_break(&mut self, text: &str, report: &mut Report) -> Result<(), ConvertError> {
        let text = self.substitute_entities(text, report);
        if self.buf.len() + text.len() > self.max_line_length {
            self.flush_line()?;
        }
        if text.len() > self.max_line_length {
            // Too long to ever fit; gets a line of its own.
            self.write_line(text.trim_end())?;
        } else {
            self.buf.push_str(&text);
        }
        Ok(())
    }

    /// Append markup verbatim, with no entity substitution and no wrap
    /// check. Used for emitted markers like list bullets and macros.
    pub fn raw(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Force the current buffer out, even when empty (emits a bare `\n`).
    pub fn newline(&mut self) -> Result<(), ConvertError> {
        let line = self.buf.trim_end().to_string();
        self.buf.clear();
        self.write_line(&line)
    }

    /// Flush the buffer only when it holds something.
    pub fn flush_if_pending(&mut self) -> Result<(), ConvertError> {
        if !self.buf.trim_end().is_empty() {
            self.flush_line()?;
        } else {
            self.buf.clear();
        }
        Ok(())
    }

    /// Flush any pending text, then emit an empty line.
    pub fn blank_line(&mut self) -> Result<(), ConvertError> {
        self.flush_if_pending()?;
        self.write_line("")
    }

    /// Drop trailing spaces from the pending buffer. Inline close marks
    /// (`**`, `__`) must attach directly to the preceding word.
    pub fn trim_pending(&mut self) {
        while self.buf.ends_with(' ') {
            self.buf.pop();
        }
    }

    /// True when the buffer holds unflushed text.
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Flush remaining text and the underlying sink. Must be called on
    /// every exit path of a conversion.
    pub fn finalize(&mut self) -> Result<(), ConvertError> {
        self.flush_if_pending()?;
        self.out
            .flush()
            .map_err(ConvertError::io)
    }

    fn flush_line(&mut self) -> Result<(), ConvertError> {
        if !self.buf.is_empty() {
            let line = self.buf.trim_end().to_string();
            self.buf.clear();
            self.write_line(&line)?;
        }
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<(), ConvertError> {
        self.out
            .write_all(line.as_bytes())
            .and_then(|_| self.out.write_all(b"\n"))
            .map_err(ConvertError::io)
    }

    /// Replace `&name;` references using the dialect's entity map. Unknown
    /// names are reported and left verbatim.
    fn substitute_entities(&self, text: &str, report: &mut Report) -> String {
        if !text.contains('&') {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(amp) = rest.find('&') {
            out.push_str(&rest[..amp]);
            let after = &rest[amp + 1..];
            let semi = after.find(';');
            let name_ok = semi
                .map(|s| {
                    s > 0
                        && after[..s]
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric() || c == '#')
                })
                .unwrap_or(false);
            if let (Some(s), true) = (semi, name_ok) {
                let name = &after[..s];
                match self.entities.resolve(name) {
                    Some(target) => out.push_str(target),
                    None => {
                        report.warn(Warning::UnknownEntity(name.to_string()));
                        out.push('&');
                        out.push_str(&after[..=s]);
                    }
                }
                rest = &after[s + 1..];
            } else {
                out.push('&');
                rest = after;
            }
        }
        out.push_str(rest);
        out
    }
}

static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(.*?\.)\s+").unwrap());

/// Split text into sentences: non-greedy runs ending in `.` followed by
/// whitespace, plus whatever remains.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut last_end = 0;
    for captures in SENTENCE_RE.captures_iter(text) {
        if let (Some(whole), Some(sentence)) = (captures.get(0), captures.get(1)) {
            sentences.push(sentence.as_str());
            last_end = whole.end();
        }
    }
    if last_end < text.len() {
        sentences.push(&text[last_end..]);
    }
    sentences
}

/// Reflow a whole block of plain text with greedy word-wrap. In sentence
/// mode each sentence is reflowed independently, starting on its own line.
pub fn block_reformat(text: &str, max_line_length: usize, sentence_mode: bool) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    if sentence_mode {
        for sentence in split_sentences(text) {
            reflow_into(sentence.trim_start(), max_line_length, &mut out);
        }
    } else {
        reflow_into(text, max_line_length, &mut out);
    }
    out
}

fn reflow_into(text: &str, max_line_length: usize, out: &mut String) {
    if text.is_empty() {
        return;
    }
    let mut line_start = 0;
    let mut last_space: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if i - line_start > max_line_length {
            if let Some(space) = last_space.filter(|s| *s > line_start) {
                out.push_str(&text[line_start..space]);
                out.push('\n');
                line_start = space + 1;
            }
        }
        if c == ' ' {
            last_space = Some(i);
        }
    }
    if line_start < text.len() {
        out.push_str(&text[line_start..]);
        out.push('\n');
    }
}
