//! Line/block scanner
//!
//! Classifies raw document lines and groups them into logical blocks with
//! stable byte offsets. The scanner drives the whole-document reflow
//! ([`reformat_blocks`]) and offset-to-block lookup for range operations.
//!
//! Concatenating the raw text of every scanned block reproduces the source
//! document exactly; blocks never overlap and never leave gaps.

use crate::error::ConvertError;
use crate::formatter::block_reformat;
use crate::options::ConvertOptions;

/// Classification of a single raw line, including its trailing newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A line that always opens a fresh block (heading, list item, table line)
    StartLine,
    /// Ordinary paragraph text
    Line,
    /// A line ending in ` +` (hard break), closing the current block
    EndLine,
    /// Blank or whitespace-only line
    EmptyLine,
    /// A line starting with `:` (attribute/command line)
    CommandLine,
    /// A `----` fence delimiter
    BlockBracketLine,
    /// A lone `+` (block continuation)
    Continuation,
}

/// Structural tag of a completed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    /// Paragraph terminated by a blank line (the blank line is included)
    Paragraph,
    /// Fenced `----` block, copied verbatim by the reflow engine
    Block,
    /// Single command line
    CommandLine,
    /// Single continuation line
    Continuation,
    /// Paragraph terminated by something other than a blank line
    /// (hard break, a following start line, or end of document)
    Newline,
}

/// A contiguous run of source lines with one structural classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub block_type: BlockType,
    /// Byte offset of the first line, inclusive.
    pub start: usize,
    /// Byte offset past the last line, exclusive.
    pub end: usize,
}

impl Block {
    /// Whether the given byte offset falls inside this block.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Line classification hook. The default is [`classify_asciidoc_line`].
pub type LineClassifier = fn(&str) -> LineKind;

/// Default classifier for AsciiDoc-style sources.
pub fn classify_asciidoc_line(line: &str) -> LineKind {
    let content = line.strip_suffix('\n').unwrap_or(line);
    let content = content.strip_suffix('\r').unwrap_or(content);

    if content.trim().is_empty() {
        return LineKind::EmptyLine;
    }
    if content == "----" {
        return LineKind::BlockBracketLine;
    }
    if content == "+" {
        return LineKind::Continuation;
    }
    if content.starts_with(':') {
        return LineKind::CommandLine;
    }
    if content.ends_with(" +") {
        return LineKind::EndLine;
    }
    if is_block_start(content) {
        return LineKind::StartLine;
    }
    LineKind::Line
}

fn is_block_start(content: &str) -> bool {
    const MARKERS: [&str; 9] = [
        "= ", "== ", "=== ", "==== ", "===== ", "* ", "- ", ". ", "|",
    ];
    MARKERS.iter().any(|m| content.starts_with(m)) || content.starts_with("image::")
}

enum State {
    Outside,
    InsidePara,
    InsideBlock,
}

/// Lazy block scanner over an immutable source snapshot.
///
/// Restartable: [`Scanner::seek`] repositions the cursor at an arbitrary
/// byte offset (callers are expected to seek to line starts).
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    classify: LineClassifier,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_classifier(source, classify_asciidoc_line)
    }

    pub fn with_classifier(source: &'a str, classify: LineClassifier) -> Self {
        Scanner {
            source,
            pos: 0,
            line: 1,
            classify,
        }
    }

    /// Current cursor offset (start of the next unread line).
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reposition the cursor at `offset`, clamped to the source length.
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset.min(self.source.len());
        self.line = self.source[..self.pos].matches('\n').count() + 1;
    }

    /// The raw source text covered by a block.
    pub fn text_of(&self, block: &Block) -> &'a str {
        &self.source[block.start..block.end]
    }

    fn next_line(&mut self) -> Option<&'a str> {
        if self.pos >= self.source.len() {
            return None;
        }
        let rest = &self.source[self.pos..];
        let end = rest.find('\n').map(|i| i + 1).unwrap_or(rest.len());
        let line = &rest[..end];
        self.pos += end;
        self.line += 1;
        Some(line)
    }

    /// Produce the next block, or `None` at end of document.
    pub fn next_block(&mut self) -> Result<Option<Block>, ConvertError> {
        let mut state = State::Outside;
        let start = self.pos;
        let mut fence_line = self.line;

        loop {
            let line_start = self.pos;
            let line_no = self.line;
            let Some(line) = self.next_line() else {
                return match state {
                    State::Outside => Ok(None),
                    State::InsidePara => Ok(Some(Block {
                        block_type: BlockType::Newline,
                        start,
                        end: self.pos,
                    })),
                    State::InsideBlock => Err(ConvertError::UnterminatedFence { line: fence_line }),
                };
            };
            let kind = (self.classify)(line);

            match state {
                State::Outside => match kind {
                    LineKind::StartLine | LineKind::Line => state = State::InsidePara,
                    LineKind::BlockBracketLine => {
                        state = State::InsideBlock;
                        fence_line = line_no;
                    }
                    LineKind::CommandLine => {
                        return Ok(Some(Block {
                            block_type: BlockType::CommandLine,
                            start,
                            end: self.pos,
                        }))
                    }
                    LineKind::Continuation => {
                        return Ok(Some(Block {
                            block_type: BlockType::Continuation,
                            start,
                            end: self.pos,
                        }))
                    }
                    LineKind::EndLine | LineKind::EmptyLine => {
                        return Ok(Some(Block {
                            block_type: BlockType::Newline,
                            start,
                            end: self.pos,
                        }))
                    }
                },
                State::InsidePara => match kind {
                    LineKind::Line => {}
                    LineKind::StartLine | LineKind::Continuation | LineKind::CommandLine => {
                        // The triggering line belongs to the next block: rewind.
                        self.pos = line_start;
                        self.line = line_no;
                        return Ok(Some(Block {
                            block_type: BlockType::Newline,
                            start,
                            end: line_start,
                        }));
                    }
                    LineKind::EndLine => {
                        return Ok(Some(Block {
                            block_type: BlockType::Newline,
                            start,
                            end: self.pos,
                        }))
                    }
                    LineKind::EmptyLine => {
                        return Ok(Some(Block {
                            block_type: BlockType::Paragraph,
                            start,
                            end: self.pos,
                        }))
                    }
                    LineKind::BlockBracketLine => {
                        return Err(ConvertError::FenceInParagraph { line: line_no })
                    }
                },
                State::InsideBlock => {
                    if kind == LineKind::BlockBracketLine {
                        return Ok(Some(Block {
                            block_type: BlockType::Block,
                            start,
                            end: self.pos,
                        }));
                    }
                }
            }
        }
    }

    /// Map a cursor offset (e.g. an editor selection) to its containing
    /// block by sequential scan from the start of the document.
    pub fn block_at(&mut self, offset: usize) -> Result<Option<Block>, ConvertError> {
        self.seek(0);
        while let Some(block) = self.next_block()? {
            if block.contains(offset) {
                return Ok(Some(block));
            }
        }
        Ok(None)
    }
}

/// Rewrap an entire document block by block.
///
/// Paragraph text is joined into one logical run and rewrapped with
/// [`block_reformat`]; fenced blocks, command lines, continuations, and
/// blank runs are copied verbatim.
pub fn reformat_blocks(source: &str, options: &ConvertOptions) -> Result<String, ConvertError> {
    let mut scanner = Scanner::new(source);
    let mut out = String::with_capacity(source.len() + 16);

    while let Some(block) = scanner.next_block()? {
        let text = scanner.text_of(&block);
        match block.block_type {
            BlockType::Paragraph | BlockType::Newline if !text.trim().is_empty() => {
                let joined = text.trim_end().replace('\n', " ");
                out.push_str(&block_reformat(
                    &joined,
                    options.max_line_length,
                    options.sentence_mode,
                ));
                if block.block_type == BlockType::Paragraph {
                    // Restore the blank separator the paragraph ended with.
                    out.push('\n');
                }
            }
            _ => out.push_str(text),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(source: &str) -> Vec<Block> {
        let mut scanner = Scanner::new(source);
        let mut blocks = Vec::new();
        while let Some(block) = scanner.next_block().expect("scan should succeed") {
            blocks.push(block);
        }
        blocks
    }

    #[test]
    fn test_classify_lines() {
        assert_eq!(classify_asciidoc_line("\n"), LineKind::EmptyLine);
        assert_eq!(classify_asciidoc_line("   \n"), LineKind::EmptyLine);
        assert_eq!(classify_asciidoc_line("----\n"), LineKind::BlockBracketLine);
        assert_eq!(classify_asciidoc_line("+\n"), LineKind::Continuation);
        assert_eq!(classify_asciidoc_line(":toc:\n"), LineKind::CommandLine);
        assert_eq!(classify_asciidoc_line("hard break +\n"), LineKind::EndLine);
        assert_eq!(classify_asciidoc_line("= Title\n"), LineKind::StartLine);
        assert_eq!(classify_asciidoc_line("* item\n"), LineKind::StartLine);
        assert_eq!(classify_asciidoc_line("plain text\n"), LineKind::Line);
        // Final line without a newline classifies the same way
        assert_eq!(classify_asciidoc_line("plain text"), LineKind::Line);
    }

    #[test]
    fn test_paragraph_ended_by_blank_line() {
        let blocks = scan_all("one\ntwo\n\nnext\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].block_type, BlockType::Paragraph);
        assert_eq!((blocks[0].start, blocks[0].end), (0, 9));
        assert_eq!(blocks[1].block_type, BlockType::Newline);
    }

    #[test]
    fn test_start_line_rewinds_and_opens_next_block() {
        let blocks = scan_all("text\n= Heading\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].block_type, BlockType::Newline);
        assert_eq!((blocks[0].start, blocks[0].end), (0, 5));
        assert_eq!((blocks[1].start, blocks[1].end), (5, 15));
    }

    #[test]
    fn test_list_items_are_separate_blocks() {
        let blocks = scan_all("* a\n* b\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].block_type, BlockType::Newline);
        assert_eq!(blocks[1].block_type, BlockType::Newline);
    }

    #[test]
    fn test_command_and_continuation_blocks() {
        let blocks = scan_all(":toc:\n+\n");
        assert_eq!(blocks[0].block_type, BlockType::CommandLine);
        assert_eq!(blocks[1].block_type, BlockType::Continuation);
    }

    #[test]
    fn test_fenced_block_copied_as_one_unit() {
        let blocks = scan_all("----\ncode here\nmore code\n----\nafter\n");
        assert_eq!(blocks[0].block_type, BlockType::Block);
        assert_eq!((blocks[0].start, blocks[0].end), (0, 30));
        assert_eq!(blocks[1].block_type, BlockType::Newline);
    }

    #[test]
    fn test_fence_inside_paragraph_is_fatal() {
        let mut scanner = Scanner::new("text\n----\n");
        let err = scanner.next_block().unwrap_err();
        assert_eq!(err, ConvertError::FenceInParagraph { line: 2 });
    }

    #[test]
    fn test_unterminated_fence_is_fatal() {
        let mut scanner = Scanner::new("----\ncode\n");
        let err = scanner.next_block().unwrap_err();
        assert_eq!(err, ConvertError::UnterminatedFence { line: 1 });
    }

    #[test]
    fn test_eof_inside_paragraph_completes_as_newline() {
        let blocks = scan_all("trailing text");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].block_type, BlockType::Newline);
        assert_eq!(blocks[0].end, 13);
    }

    #[test]
    fn test_round_trip_concatenation() {
        let source = "= Title\n\nfirst para\nstill first\n\n----\nverbatim\n----\n:cmd:\nlast +\ntail";
        let mut scanner = Scanner::new(source);
        let mut rebuilt = String::new();
        while let Some(block) = scanner.next_block().unwrap() {
            rebuilt.push_str(scanner.text_of(&block));
        }
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_block_at_offset() {
        let source = "first\n\nsecond\n";
        let mut scanner = Scanner::new(source);
        let block = scanner.block_at(8).unwrap().expect("offset is in a block");
        assert_eq!(block.start, 7);
        assert_eq!(scanner.text_of(&block), "second\n");
        assert!(scanner.block_at(500).unwrap().is_none());
    }

    #[test]
    fn test_seek_restarts_scan() {
        let source = "first\n\nsecond\n";
        let mut scanner = Scanner::new(source);
        scanner.seek(7);
        let block = scanner.next_block().unwrap().unwrap();
        assert_eq!(scanner.text_of(&block), "second\n");
    }

    #[test]
    fn test_reformat_preserves_fences_and_commands() {
        let source = ":toc:\n----\n  raw   spacing\n----\nword word\n";
        let options = ConvertOptions::default();
        let result = reformat_blocks(source, &options).unwrap();
        assert_eq!(result, ":toc:\n----\n  raw   spacing\n----\nword word\n");
    }

    #[test]
    fn test_reformat_joins_and_wraps_paragraph() {
        let source = "aaaa bbbb\ncccc\n\n";
        let options = ConvertOptions {
            max_line_length: 8,
            ..ConvertOptions::default()
        };
        let result = reformat_blocks(source, &options).unwrap();
        // Greedy wrap: the break lands at the last space seen before the
        // column limit was crossed; the tail is flushed as-is.
        assert_eq!(result, "aaaa\nbbbb cccc\n\n");
    }
}
