// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Line-wrapping layout.
//!
//! [`layout`] is pure and re-run from scratch on every text, metrics or width change. There is no
//! incremental update; assignment-length documents (tens of KB) make full recomputation cheap
//! relative to one interactive render pass.

use crate::metrics::TextMetrics;

/// One visually wrapped row of text plus the document offset of its first character.
///
/// The character that closed the line (a newline, or the character whose advance pushed the line
/// past the maximum width) stays in `text`, so concatenating all line texts in order reproduces
/// the document exactly and every document offset resolves to exactly one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    text: String,
    start: usize,
    char_len: usize,
}

impl LayoutLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Document offset of the first character.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Document offset one past the last character.
    pub fn end(&self) -> usize {
        self.start + self.char_len
    }
}

/// Wraps `text` into lines no wider than `max_width` (except for a single oversized glyph).
///
/// Walks the text one character at a time, accumulating the candidate line's width; the line is
/// closed when the character is a newline or the accumulated width exceeds `max_width`. The width
/// check runs only after at least one character has been appended, so a glyph wider than
/// `max_width` still lands alone on its own line instead of looping. Trailing content is flushed
/// as a final line. Empty text yields zero lines.
pub fn layout(text: &str, metrics: &impl TextMetrics, max_width: f64) -> Vec<LayoutLine> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_start = 0usize;
    let mut line_chars = 0usize;
    let mut line_width = 0.0f64;

    for (offset, ch) in text.chars().enumerate() {
        line.push(ch);
        line_chars += 1;
        line_width += metrics.advance(ch);

        if ch == '\n' || line_width > max_width {
            lines.push(LayoutLine {
                text: std::mem::take(&mut line),
                start: line_start,
                char_len: line_chars,
            });
            line_start = offset + 1;
            line_chars = 0;
            line_width = 0.0;
        }
    }

    if !line.is_empty() {
        lines.push(LayoutLine {
            text: line,
            start: line_start,
            char_len: line_chars,
        });
    }

    lines
}
