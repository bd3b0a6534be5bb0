//! Reflow and scanner tests
//!
//! Exercises in-place reformatting of markup documents: block
//! classification, paragraph rewrap, and the invariants both must hold.

use downmark::{block_reformat, reformat_blocks, ConvertOptions, Scanner};
use proptest::prelude::*;

#[test]
fn test_reformat_joins_short_lines() {
    let options = ConvertOptions::default();
    let result = reformat_blocks("one\ntwo\nthree\n\n", &options).unwrap();
    assert_eq!(result, "one two three\n\n");
}

#[test]
fn test_reformat_leaves_structure_alone() {
    let source = "= Heading\n\n:toc:\n\n----\n  verbatim   code\n----\n* item one\n";
    let options = ConvertOptions::default();
    let result = reformat_blocks(source, &options).unwrap();
    assert_eq!(result, source);
}

#[test]
fn test_sentence_mode_one_sentence_per_line() {
    let options = ConvertOptions {
        sentence_mode: true,
        ..ConvertOptions::default()
    };
    let result =
        reformat_blocks("First sentence. Second one here. Third.\n\n", &options).unwrap();
    assert_eq!(result, "First sentence.\nSecond one here.\nThird.\n\n");
}

#[test]
fn test_continuation_line_is_kept_verbatim() {
    let source = "first paragraph\n+\nsecond paragraph\n";
    let options = ConvertOptions::default();
    let result = reformat_blocks(source, &options).unwrap();
    assert_eq!(result, source);
}

proptest! {
    /// Concatenating a scanned document's blocks must reproduce the source.
    #[test]
    fn scanned_blocks_partition_the_source(source in "[a-z :=*|+\n]{0,120}") {
        let mut scanner = Scanner::new(&source);
        let mut rebuilt = String::new();
        while let Ok(Some(block)) = scanner.next_block() {
            rebuilt.push_str(scanner.text_of(&block));
        }
        // Fence errors abort the walk; only compare complete scans.
        if rebuilt.len() == source.len() {
            prop_assert_eq!(rebuilt, source);
        }
    }

    /// Reflowing never changes the words, only the whitespace between them.
    #[test]
    fn reflow_preserves_words(text in "[a-z ]{0,100}", max in 5usize..40) {
        let reflowed = block_reformat(&text, max, false);
        let before: Vec<&str> = text.split_whitespace().collect();
        let after: Vec<&str> = reflowed.split_whitespace().collect();
        prop_assert_eq!(before, after);
    }
}
