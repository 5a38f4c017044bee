//! Text position utilities for byte offset and line:column conversions.
//!
//! Lines and columns are 1-indexed (matching editor conventions); byte
//! offsets are 0-indexed. Columns count Unicode scalar values, not bytes,
//! so positions stay meaningful for multi-byte content.

use crate::span::Span;

/// Convert a byte offset to 1-indexed line and column.
///
/// If `offset` exceeds the content length, returns the position just past
/// the end of the content.
pub fn offset_to_position(content: &str, offset: usize) -> (u32, u32) {
    let mut line = 1u32;
    let mut col = 1u32;
    let mut current = 0usize;

    for ch in content.chars() {
        if current >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
        current += ch.len_utf8();
    }

    (line, col)
}

/// Convert 1-indexed line and column to a byte offset.
///
/// Line/column values of 0 are treated as 1. Positions beyond the end of a
/// line clamp to the end of that line; lines beyond the content clamp to
/// the content length.
pub fn position_to_offset(content: &str, line: u32, col: u32) -> usize {
    let line = line.max(1);
    let col = col.max(1);

    let mut current_line = 1u32;
    let mut line_start = 0usize;

    if line > 1 {
        let mut found = false;
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                current_line += 1;
                if current_line == line {
                    line_start = i + 1;
                    found = true;
                    break;
                }
            }
        }
        if !found {
            return content.len();
        }
    }

    let mut current_col = 1u32;
    for (i, ch) in content[line_start..].char_indices() {
        if current_col == col || ch == '\n' {
            return line_start + i;
        }
        current_col += 1;
    }
    content.len()
}

/// Extract the text content of a span.
///
/// Returns `None` if the span is out of bounds or not on character
/// boundaries.
pub fn extract_span<'a>(content: &'a str, span: &Span) -> Option<&'a str> {
    content.get(span.start..span.end)
}
