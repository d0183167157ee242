// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Pointer hit-testing over projected rectangles.

use crate::model::FeedbackKey;
use crate::project::HighlightRect;

/// A hit-test result: the owning item plus the matched rectangle's top-right corner, which is the
/// default tooltip anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedHit {
    pub key: FeedbackKey,
    pub anchor: (f64, f64),
}

/// Returns the first rectangle containing `(x, y)`, or `None`.
///
/// Linear scan in rectangle order; rectangles are emitted in feedback-item order, so on overlap
/// the first-defined item wins. Bounds are inclusive on all four edges. The scan runs fresh on
/// every pointer event rather than through a cached spatial structure: rectangle counts are
/// bounded by criterion count times average wrapped-line span, single digits to low tens.
pub fn hit_test(x: f64, y: f64, rects: &[HighlightRect]) -> Option<ProjectedHit> {
    rects
        .iter()
        .find(|rect| {
            x >= rect.x && x <= rect.x + rect.width && y >= rect.y && y <= rect.y + rect.height
        })
        .map(|rect| ProjectedHit {
            key: rect.item,
            anchor: (rect.x + rect.width, rect.y),
        })
}
