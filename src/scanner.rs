//! Word scanning around a cursor position
//!
//! A "word" is a maximal run of ASCII letters, digits and underscores. Non-ASCII
//! bytes never belong to a word, so span borders always fall on char boundaries.

use std::ops::Range;

/// Whether a byte is an ASCII word character (`[A-Za-z0-9_]`)
pub fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Find the byte span of the word containing or touching `column`
///
/// Returns the empty span `column..column` when the cursor sits between two
/// non-word characters. Columns past the end of the line are clamped.
pub fn word_span(line: &str, column: usize) -> Range<usize> {
    let bytes = line.as_bytes();
    let column = column.min(bytes.len());

    let mut start = column;
    while start > 0 && is_word_byte(bytes[start - 1]) {
        start -= 1;
    }

    let mut end = column;
    while end < bytes.len() && is_word_byte(bytes[end]) {
        end += 1;
    }

    start..end
}

/// The word under `column`, or `""` if there is none
pub fn word_at(line: &str, column: usize) -> &str {
    let span = word_span(line, column);
    if span.is_empty() {
        return "";
    }
    &line[span]
}
