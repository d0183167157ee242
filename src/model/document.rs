// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

use std::fmt;

/// The full extracted text of one uploaded assignment.
///
/// Character offsets (Unicode scalar values, as produced by the upstream extraction pipeline) are
/// the universal coordinate system for all annotations. A document is replaced wholesale when a
/// new file is processed; it is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    text: String,
    char_len: usize,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self { text, char_len }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::Document;

    #[test]
    fn char_len_counts_chars_not_bytes() {
        let doc = Document::new("αβγ");
        assert_eq!(doc.char_len(), 3);
        assert_eq!(doc.text().len(), 6);
    }

    #[test]
    fn empty_document_is_valid() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert_eq!(doc.char_len(), 0);
    }
}
