// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Span projection onto layout geometry.
//!
//! For each feedback item with a valid span, computes the overlap with every wrapped line and
//! measures the pre-overlap and overlap substrings into screen-space rectangles. A multi-line
//! span yields one rectangle per overlapped line, all sharing the owning item's key.

use smallvec::SmallVec;

use crate::layout::LayoutLine;
use crate::metrics::TextMetrics;
use crate::model::{FeedbackKey, FeedbackSet, Tier};

/// Fixed rendering geometry.
///
/// Defaults mirror the production canvas: 22px line height over a 700px wrap width with 10px
/// padding, a 4px highlight inset, and an 8px minimap strip with a 2px minimum segment width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub line_height: f64,
    pub padding: f64,
    pub max_width: f64,
    pub highlight_inset: f64,
    pub minimap_height: f64,
    pub minimap_min_segment: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            line_height: 22.0,
            padding: 10.0,
            max_width: 700.0,
            highlight_inset: 4.0,
            minimap_height: 8.0,
            minimap_min_segment: 2.0,
        }
    }
}

impl Geometry {
    /// Terminal-cell geometry: one cell per character, one row per line, no padding or inset.
    pub fn cells(max_width: f64) -> Self {
        Self {
            line_height: 1.0,
            padding: 0.0,
            max_width,
            highlight_inset: 0.0,
            minimap_height: 1.0,
            minimap_min_segment: 1.0,
        }
    }

    /// Overall surface size for `line_count` laid-out lines.
    pub fn canvas_size(&self, line_count: usize) -> (f64, f64) {
        (
            self.max_width + self.padding * 2.0,
            line_count as f64 * self.line_height + self.padding * 2.0,
        )
    }
}

/// The visible portion of one feedback span on one wrapped line.
///
/// `height` is the full line height so the whole row band is hit-testable; the draw pass applies
/// [`Geometry::highlight_inset`] to the fill for visual separation between adjacent lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub tier: Tier,
    pub item: FeedbackKey,
}

/// Projects every valid feedback span onto the wrapped lines, in feedback-item order.
///
/// Malformed or out-of-range spans project zero rectangles; items without a span are skipped
/// entirely. Neither case is an error: the owning item still appears in textual feedback lists,
/// it just never highlights.
pub fn project(
    lines: &[LayoutLine],
    set: &FeedbackSet,
    metrics: &impl TextMetrics,
    geometry: &Geometry,
) -> Vec<HighlightRect> {
    // Lines partition the document, so the document length is the last line's end offset.
    let char_len = lines.last().map(LayoutLine::end).unwrap_or(0);

    let mut rects = Vec::new();
    for (index, item) in set.items().iter().enumerate() {
        let Some(span) = item.highlight_span else {
            continue;
        };
        let Some((start, end)) = span.resolve(char_len) else {
            continue;
        };
        let Some(key) = set.key(index) else {
            continue;
        };
        rects.extend(rects_for_span(
            lines,
            key,
            item.tier(),
            start,
            end,
            metrics,
            geometry,
        ));
    }

    rects
}

/// Rectangles for one resolved span; most spans overlap one or two wrapped lines.
fn rects_for_span(
    lines: &[LayoutLine],
    key: FeedbackKey,
    tier: Tier,
    start: usize,
    end: usize,
    metrics: &impl TextMetrics,
    geometry: &Geometry,
) -> SmallVec<[HighlightRect; 2]> {
    let mut rects = SmallVec::new();

    for (line_index, line) in lines.iter().enumerate() {
        let overlap_start = start.max(line.start());
        let overlap_end = end.min(line.end());
        if overlap_start >= overlap_end {
            continue;
        }

        let pre_cols = overlap_start - line.start();
        let overlap_cols = overlap_end - overlap_start;
        let pre_width = measure_cols(line, 0, pre_cols, metrics);
        let overlap_width = measure_cols(line, pre_cols, overlap_cols, metrics);

        rects.push(HighlightRect {
            x: geometry.padding + pre_width,
            y: geometry.padding + line_index as f64 * geometry.line_height,
            width: overlap_width,
            height: geometry.line_height,
            tier,
            item: key,
        });
    }

    rects
}

fn measure_cols(line: &LayoutLine, skip: usize, take: usize, metrics: &impl TextMetrics) -> f64 {
    line.text()
        .chars()
        .skip(skip)
        .take(take)
        .map(|ch| metrics.advance(ch))
        .sum()
}
