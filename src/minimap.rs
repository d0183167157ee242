// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Condensed overview strip.
//!
//! Derives a single horizontal strip from the projected rectangles: one tier-colored segment per
//! rectangle at the rectangle's x position, clamped to a minimum width so narrow spans stay
//! visible. Decorative only; the strip does not participate in hit-testing.

use crate::model::Tier;
use crate::project::{Geometry, HighlightRect};

/// One colored segment on the minimap strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapSegment {
    pub x: f64,
    pub width: f64,
    pub tier: Tier,
}

/// Segments in rectangle order; overlapping segments are drawn in order (last painted wins).
pub fn minimap_segments(rects: &[HighlightRect], geometry: &Geometry) -> Vec<MinimapSegment> {
    rects
        .iter()
        .map(|rect| MinimapSegment {
            x: rect.x,
            width: rect.width.max(geometry.minimap_min_segment),
            tier: rect.tier,
        })
        .collect()
}
