// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Text measurement.
//!
//! The layout engine and span projector measure substrings through this trait instead of a
//! rendering context, so the same engine runs against terminal cells, a monospace canvas font or
//! a proportional glyph table.

use std::collections::BTreeMap;

pub trait TextMetrics {
    /// Rendered advance of one character. Newlines advance by zero.
    fn advance(&self, ch: char) -> f64;

    /// Rendered width of a string as the sum of character advances.
    fn measure(&self, text: &str) -> f64 {
        text.chars().map(|ch| self.advance(ch)).sum()
    }
}

/// Fixed-advance metrics: one width for every glyph (terminal cells, monospace fonts).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    cell_width: f64,
}

impl MonospaceMetrics {
    pub fn new(cell_width: f64) -> Self {
        Self { cell_width }
    }

    /// One terminal cell per character.
    pub fn cells() -> Self {
        Self::new(1.0)
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::cells()
    }
}

impl TextMetrics for MonospaceMetrics {
    fn advance(&self, ch: char) -> f64 {
        if ch == '\n' {
            0.0
        } else {
            self.cell_width
        }
    }
}

/// Table-driven proportional metrics with a default advance for unlisted glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMetrics {
    widths: BTreeMap<char, f64>,
    default_advance: f64,
}

impl GlyphMetrics {
    pub fn new(default_advance: f64) -> Self {
        Self {
            widths: BTreeMap::new(),
            default_advance,
        }
    }

    pub fn with_width(mut self, ch: char, width: f64) -> Self {
        self.widths.insert(ch, width);
        self
    }
}

impl TextMetrics for GlyphMetrics {
    fn advance(&self, ch: char) -> f64 {
        if ch == '\n' {
            return 0.0;
        }
        self.widths.get(&ch).copied().unwrap_or(self.default_advance)
    }
}
