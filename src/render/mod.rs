// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Frame composition.
//!
//! One render pass flows text + feedback through layout → projection → {minimap, emphasis,
//! tooltip placement} into a [`Frame`], the complete draw list for one pass. Layout and
//! projection run fresh every time; there is no hidden cross-call state.

use crate::interact::{InteractionState, Selection};
use crate::layout::{layout, LayoutLine};
use crate::metrics::TextMetrics;
use crate::minimap::{minimap_segments, MinimapSegment};
use crate::model::{Document, FeedbackKey, FeedbackSet};
use crate::project::{project, Geometry, HighlightRect};

/// Fill opacity for the active item (locked, or externally referenced).
pub const EMPHASIS_ACTIVE: f64 = 0.9;
/// Fill opacity for every other highlight.
pub const EMPHASIS_BASE: f64 = 0.5;

/// One highlight fill plus the emphasis the draw pass should use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameHighlight {
    pub rect: HighlightRect,
    pub emphasis: f64,
}

impl FrameHighlight {
    pub fn is_active(&self) -> bool {
        self.emphasis >= EMPHASIS_ACTIVE
    }
}

/// One tooltip placement. `(x, y)` is the top-left anchor in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTooltip {
    pub x: f64,
    pub y: f64,
    pub item: FeedbackKey,
}

/// The complete draw list for one render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub lines: Vec<LayoutLine>,
    pub highlights: Vec<FrameHighlight>,
    pub tooltips: Vec<FrameTooltip>,
    pub minimap: Vec<MinimapSegment>,
    pub width: f64,
    pub height: f64,
}

/// Composes one frame from the current document, feedback snapshot and interaction state.
///
/// `active_highlight` is the externally-set "currently referenced item" signal; it gets the same
/// emphasis priority as a lock. In show-all mode one tooltip is emitted per item at the item's
/// first rectangle; otherwise the single hover-or-locked tooltip (a locked tooltip anchors at the
/// item's first rectangle, falling back to the padding origin for span-less items).
pub fn render_frame(
    document: &Document,
    set: &FeedbackSet,
    state: &InteractionState,
    active_highlight: Option<FeedbackKey>,
    metrics: &impl TextMetrics,
    geometry: &Geometry,
) -> Frame {
    let lines = layout(document.text(), metrics, geometry.max_width);
    let rects = project(&lines, set, metrics, geometry);

    let locked = state.selection().locked_key();
    let highlights = rects
        .iter()
        .map(|&rect| {
            let active =
                Some(rect.item) == locked || Some(rect.item) == active_highlight;
            FrameHighlight {
                rect,
                emphasis: if active { EMPHASIS_ACTIVE } else { EMPHASIS_BASE },
            }
        })
        .collect();

    let tooltips = if state.show_all() {
        (0..set.len())
            .filter_map(|index| {
                let key = set.key(index)?;
                let rect = first_rect(&rects, key)?;
                Some(FrameTooltip {
                    x: rect.x + rect.width,
                    y: rect.y,
                    item: key,
                })
            })
            .collect()
    } else {
        match state.selection() {
            Selection::Hovering { key, anchor } => vec![FrameTooltip {
                x: anchor.0,
                y: anchor.1,
                item: key,
            }],
            Selection::Locked { key } => {
                let (x, y) = first_rect(&rects, key)
                    .map(|rect| (rect.x + rect.width, rect.y))
                    .unwrap_or((geometry.padding, geometry.padding));
                vec![FrameTooltip { x, y, item: key }]
            }
            Selection::Idle => Vec::new(),
        }
    };

    let minimap = minimap_segments(&rects, geometry);
    let (width, height) = geometry.canvas_size(lines.len());

    Frame {
        lines,
        highlights,
        tooltips,
        minimap,
        width,
        height,
    }
}

fn first_rect(rects: &[HighlightRect], key: FeedbackKey) -> Option<&HighlightRect> {
    rects.iter().find(|rect| rect.item == key)
}

#[cfg(test)]
mod tests {
    use super::{render_frame, EMPHASIS_ACTIVE, EMPHASIS_BASE};
    use crate::interact::InteractionState;
    use crate::metrics::MonospaceMetrics;
    use crate::model::{Document, FeedbackItem, FeedbackKey, FeedbackSet, Span};
    use crate::project::Geometry;

    fn item(criterion: &str, score: f64, span: Option<Span>) -> FeedbackItem {
        FeedbackItem {
            criterion: criterion.into(),
            score,
            feedback: format!("feedback for {criterion}"),
            highlight_span: span,
        }
    }

    fn fixture() -> (Document, FeedbackSet) {
        let document = Document::new("The cat sat. The dog ran.");
        let set = FeedbackSet::with_generation(
            vec![
                item("Clarity", 85.0, Some(Span::new(4, 11))),
                item("Flow", 55.0, Some(Span::new(13, 24))),
                item("Citations", 30.0, None),
            ],
            0,
        );
        (document, set)
    }

    fn compose(
        document: &Document,
        set: &FeedbackSet,
        state: &InteractionState,
        active: Option<FeedbackKey>,
    ) -> super::Frame {
        render_frame(
            document,
            set,
            state,
            active,
            &MonospaceMetrics::cells(),
            &Geometry::cells(100.0),
        )
    }

    #[test]
    fn idle_frame_has_base_emphasis_and_no_tooltips() {
        let (document, set) = fixture();
        let frame = compose(&document, &set, &InteractionState::default(), None);
        assert_eq!(frame.lines.len(), 1);
        assert_eq!(frame.highlights.len(), 2);
        assert!(frame.highlights.iter().all(|h| h.emphasis == EMPHASIS_BASE));
        assert!(frame.tooltips.is_empty());
        assert_eq!(frame.minimap.len(), 2);
    }

    #[test]
    fn locked_item_renders_active_with_tooltip_at_first_rect() {
        let (document, set) = fixture();
        let mut state = InteractionState::default();
        state.click(Some(crate::hittest::ProjectedHit {
            key: set.key(0).expect("key"),
            anchor: (11.0, 0.0),
        }));

        let frame = compose(&document, &set, &state, None);
        assert!(frame.highlights[0].is_active());
        assert_eq!(frame.highlights[0].emphasis, EMPHASIS_ACTIVE);
        assert_eq!(frame.highlights[1].emphasis, EMPHASIS_BASE);

        assert_eq!(frame.tooltips.len(), 1);
        // "cat sat" ends at column 11 on row 0.
        assert_eq!((frame.tooltips[0].x, frame.tooltips[0].y), (11.0, 0.0));
    }

    #[test]
    fn external_active_highlight_gets_lock_level_emphasis() {
        let (document, set) = fixture();
        let frame = compose(&document, &set, &InteractionState::default(), set.key(1));
        assert_eq!(frame.highlights[0].emphasis, EMPHASIS_BASE);
        assert!(frame.highlights[1].is_active());
        assert!(frame.tooltips.is_empty());
    }

    #[test]
    fn show_all_emits_one_tooltip_per_highlighted_item() {
        let (document, set) = fixture();
        let mut state = InteractionState::default();
        state.toggle_show_all();

        let frame = compose(&document, &set, &state, None);
        // The span-less "Citations" item has no rect, so no tooltip either.
        assert_eq!(frame.tooltips.len(), 2);
        assert_eq!(frame.tooltips[0].item, set.key(0).expect("key"));
        assert_eq!(frame.tooltips[1].item, set.key(1).expect("key"));
    }

    #[test]
    fn empty_document_still_composes() {
        let frame = compose(
            &Document::default(),
            &FeedbackSet::default(),
            &InteractionState::default(),
            None,
        );
        assert!(frame.lines.is_empty());
        assert!(frame.highlights.is_empty());
        assert!(frame.minimap.is_empty());
    }
}
