// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Feedback items, spans, score tiers and generation-stamped snapshots.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A half-open character-offset range `[start, end)` into the document text.
///
/// Endpoints are raw `i64` so malformed model output (negative offsets, inverted ranges) stays
/// representable; validity is decided at projection time via [`Span::resolve`]. A malformed span
/// simply projects zero rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Resolves the span against a document of `char_len` characters.
    ///
    /// Returns `None` for any malformed or out-of-range span (`start < 0`, `end > char_len`,
    /// `start >= end`). Such spans are silently dropped from highlighting and hit-testing; the
    /// owning item still appears in textual feedback lists.
    pub fn resolve(self, char_len: usize) -> Option<(usize, usize)> {
        if self.start < 0 || self.start >= self.end {
            return None;
        }
        let start = self.start as usize;
        let end = u64::try_from(self.end).ok()? as usize;
        if end > char_len {
            return None;
        }
        Some((start, end))
    }
}

/// A fixed highlight color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// One of three fixed score bands determining highlight color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Good,
    Average,
    NeedsImprovement,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Good, Tier::Average, Tier::NeedsImprovement];

    /// Fixed three-tier thresholding: `score >= 80` good, `score >= 50` average, else needs
    /// improvement.
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            Tier::Good
        } else if score >= 50.0 {
            Tier::Average
        } else {
            Tier::NeedsImprovement
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Tier::Good => Rgb { r: 0xb9, g: 0xfb, b: 0xc0 },
            Tier::Average => Rgb { r: 0xff, g: 0xf3, b: 0xbf },
            Tier::NeedsImprovement => Rgb { r: 0xff, g: 0xa8, b: 0xa8 },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Good => "Good (80-100%)",
            Tier::Average => "Average (50-79%)",
            Tier::NeedsImprovement => "Needs Improvement (<50%)",
        }
    }
}

/// One rubric-criterion evaluation produced by the feedback-generation service.
///
/// The serde shape matches the upstream wire payload (camelCase, `highlightSpan` optional).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub criterion: SmolStr,
    pub score: f64,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_span: Option<Span>,
}

impl FeedbackItem {
    pub fn tier(&self) -> Tier {
        Tier::for_score(self.score)
    }
}

/// Stable identity of one feedback item within one generation cycle.
///
/// Locks and external highlight signals hold keys, never criterion labels, so identity survives
/// nothing across generations: a new snapshot invalidates every outstanding key by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeedbackKey {
    generation: u64,
    index: usize,
}

impl FeedbackKey {
    pub fn new(generation: u64, index: usize) -> Self {
        Self { generation, index }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// One atomic snapshot of feedback items, stamped with the generation cycle that produced it.
///
/// The item sequence is read-only for the lifetime of one feedback result; a new generation call
/// replaces the entire snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedbackSet {
    generation: u64,
    items: Vec<FeedbackItem>,
}

impl FeedbackSet {
    pub fn with_generation(items: Vec<FeedbackItem>, generation: u64) -> Self {
        Self { generation, items }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn items(&self) -> &[FeedbackItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<FeedbackItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The key for `index`, or `None` when out of range.
    pub fn key(&self, index: usize) -> Option<FeedbackKey> {
        (index < self.items.len()).then(|| FeedbackKey::new(self.generation, index))
    }

    /// Looks up an item by key; stale-generation keys resolve to `None`.
    pub fn get(&self, key: FeedbackKey) -> Option<&FeedbackItem> {
        if key.generation() != self.generation {
            return None;
        }
        self.items.get(key.index())
    }
}
