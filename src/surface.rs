// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! The rendering surface.
//!
//! A [`Surface`] owns the document, the feedback snapshot, the interaction state, the external
//! active-highlight signal and the selection-change callback. Event entry points are synchronous
//! and idempotent; layout, projection and hit structures are recomputed fresh per event and per
//! frame. Handler lifetime is the surface value's lifetime: dropping the surface drops the
//! callback with it, so a torn-down surface can never receive a dangling dispatch.

use crate::hittest::{hit_test, ProjectedHit};
use crate::interact::{InteractionState, LockChange, NavKey, Selection};
use crate::layout::layout;
use crate::metrics::TextMetrics;
use crate::model::{Document, FeedbackItem, FeedbackKey, FeedbackSet};
use crate::project::{project, Geometry};
use crate::render::{render_frame, Frame};

/// Invoked with the newly locked item (or `None`) whenever the lock changes, so a separate
/// report view can scroll to the corresponding criterion.
pub type SelectionCallback = Box<dyn FnMut(Option<&FeedbackItem>)>;

pub struct Surface<M: TextMetrics> {
    document: Document,
    feedback: FeedbackSet,
    metrics: M,
    geometry: Geometry,
    state: InteractionState,
    active_highlight: Option<FeedbackKey>,
    next_generation: u64,
    on_selection_change: Option<SelectionCallback>,
}

impl<M: TextMetrics> Surface<M> {
    pub fn new(metrics: M, geometry: Geometry) -> Self {
        Self {
            document: Document::default(),
            feedback: FeedbackSet::default(),
            metrics,
            geometry,
            state: InteractionState::default(),
            active_highlight: None,
            next_generation: 1,
            on_selection_change: None,
        }
    }

    pub fn with_content(
        metrics: M,
        geometry: Geometry,
        document: Document,
        items: Vec<FeedbackItem>,
    ) -> Self {
        let mut surface = Self::new(metrics, geometry);
        surface.document = document;
        surface.install(items);
        surface
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn feedback(&self) -> &FeedbackSet {
        &self.feedback
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn selection(&self) -> Selection {
        self.state.selection()
    }

    pub fn show_all(&self) -> bool {
        self.state.show_all()
    }

    pub fn active_highlight(&self) -> Option<FeedbackKey> {
        self.active_highlight
    }

    /// The currently locked item, if any.
    pub fn locked_item(&self) -> Option<&FeedbackItem> {
        self.state
            .selection()
            .locked_key()
            .and_then(|key| self.feedback.get(key))
    }

    /// Registers the callback fired whenever the locked item changes.
    pub fn on_selection_change(&mut self, callback: SelectionCallback) {
        self.on_selection_change = Some(callback);
    }

    /// Replaces the document wholesale. The feedback snapshot is re-stamped into a new
    /// generation, so any lock or active-highlight signal is dropped.
    pub fn set_document(&mut self, document: Document) {
        self.document = document;
        let items = std::mem::take(&mut self.feedback).into_items();
        self.install(items);
    }

    /// Installs a new feedback snapshot (one generation cycle). Resets interaction state.
    pub fn set_feedback(&mut self, items: Vec<FeedbackItem>) {
        self.install(items);
    }

    /// Changes the wrap geometry (e.g. on a viewport resize). Identity is unaffected: an
    /// existing lock survives, only the projected coordinates move.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    /// Externally-set "currently referenced item" (a report view clicked a criterion).
    ///
    /// Out-of-range indices clear the signal rather than erroring.
    pub fn set_active_highlight(&mut self, index: Option<usize>) {
        self.active_highlight = index.and_then(|index| self.feedback.key(index));
    }

    /// Show-all tooltips toggle; orthogonal to hover/lock.
    pub fn toggle_show_all(&mut self) {
        self.state.toggle_show_all();
    }

    /// Pointer moved to `(x, y)` in surface coordinates.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let hit = self.hit_at(x, y);
        let change = self.state.pointer_move(hit, (x, y));
        self.notify(change);
    }

    /// Pointer left the surface.
    pub fn pointer_leave(&mut self) {
        let change = self.state.pointer_leave();
        self.notify(change);
    }

    /// Click at `(x, y)` in surface coordinates.
    pub fn click(&mut self, x: f64, y: f64) {
        let hit = self.hit_at(x, y);
        let change = self.state.click(hit);
        self.notify(change);
    }

    /// Keyboard navigation (cycle / clear).
    pub fn nav_key(&mut self, key: NavKey) {
        let change = self.state.nav_key(key, self.feedback.len());
        self.notify(change);
    }

    /// Hit-tests surface coordinates against a freshly projected rectangle set.
    pub fn hit_at(&self, x: f64, y: f64) -> Option<ProjectedHit> {
        let lines = layout(self.document.text(), &self.metrics, self.geometry.max_width);
        let rects = project(&lines, &self.feedback, &self.metrics, &self.geometry);
        hit_test(x, y, &rects)
    }

    /// Composes the current frame. Layout and projection run fresh each pass.
    pub fn frame(&self) -> Frame {
        render_frame(
            &self.document,
            &self.feedback,
            &self.state,
            self.active_highlight,
            &self.metrics,
            &self.geometry,
        )
    }

    fn install(&mut self, items: Vec<FeedbackItem>) {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        self.feedback = FeedbackSet::with_generation(items, generation);
        self.active_highlight = None;
        let change = self.state.sync_generation(generation);
        self.notify(change);
    }

    fn notify(&mut self, change: LockChange) {
        let LockChange::Changed(key) = change else {
            return;
        };
        if let Some(mut callback) = self.on_selection_change.take() {
            let item = key.and_then(|key| self.feedback.get(key));
            callback(item);
            self.on_selection_change = Some(callback);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::Surface;
    use crate::interact::NavKey;
    use crate::metrics::MonospaceMetrics;
    use crate::model::{Document, FeedbackItem, Span};
    use crate::project::Geometry;

    fn item(criterion: &str, score: f64, span: Option<Span>) -> FeedbackItem {
        FeedbackItem {
            criterion: criterion.into(),
            score,
            feedback: String::new(),
            highlight_span: span,
        }
    }

    fn surface_with(text: &str, items: Vec<FeedbackItem>) -> Surface<MonospaceMetrics> {
        Surface::with_content(
            MonospaceMetrics::cells(),
            Geometry::cells(100.0),
            Document::new(text),
            items,
        )
    }

    #[test]
    fn click_on_highlight_locks_and_fires_callback() {
        let mut surface = surface_with(
            "The cat sat. The dog ran.",
            vec![item("Clarity", 85.0, Some(Span::new(4, 11)))],
        );
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        surface.on_selection_change(Box::new(move |selected| {
            sink.borrow_mut().push(selected.map(|item| item.criterion.to_string()));
        }));

        surface.click(5.0, 0.5);
        assert_eq!(surface.locked_item().map(|i| i.criterion.as_str()), Some("Clarity"));
        assert_eq!(seen.borrow().as_slice(), [Some("Clarity".to_owned())]);

        // Toggle-unlock on the same rectangle.
        surface.click(5.0, 0.5);
        assert_eq!(surface.locked_item(), None);
        assert_eq!(seen.borrow().as_slice(), [Some("Clarity".to_owned()), None]);
    }

    #[test]
    fn replacing_feedback_drops_the_lock_even_with_same_criterion_names() {
        let items = vec![item("Clarity", 85.0, Some(Span::new(4, 11)))];
        let mut surface = surface_with("The cat sat. The dog ran.", items.clone());
        surface.click(5.0, 0.5);
        assert!(surface.locked_item().is_some());

        // Identity, not criterion-name equality, governs the lock.
        surface.set_feedback(items);
        assert!(surface.locked_item().is_none());
        assert!(surface.selection().is_idle());
    }

    #[test]
    fn replacing_document_resets_state() {
        let mut surface = surface_with(
            "The cat sat. The dog ran.",
            vec![item("Clarity", 85.0, Some(Span::new(4, 11)))],
        );
        surface.nav_key(NavKey::Next);
        assert!(surface.locked_item().is_some());

        surface.set_document(Document::new("Entirely new essay text."));
        assert!(surface.locked_item().is_none());
        // The items themselves survive a document swap; only identity is renewed.
        assert_eq!(surface.feedback().len(), 1);
    }

    #[test]
    fn stale_active_highlight_index_is_ignored() {
        let mut surface = surface_with(
            "The cat sat.",
            vec![item("Clarity", 85.0, Some(Span::new(0, 3)))],
        );
        surface.set_active_highlight(Some(5));
        assert_eq!(surface.active_highlight(), None);

        surface.set_active_highlight(Some(0));
        assert!(surface.active_highlight().is_some());

        // A new generation clears the signal.
        surface.set_feedback(Vec::new());
        assert_eq!(surface.active_highlight(), None);
    }

    #[test]
    fn pointer_events_on_empty_surface_are_no_ops() {
        let mut surface = Surface::new(MonospaceMetrics::cells(), Geometry::cells(10.0));
        surface.pointer_move(3.0, 3.0);
        surface.click(3.0, 3.0);
        surface.pointer_leave();
        surface.nav_key(NavKey::Next);
        assert!(surface.selection().is_idle());
        assert!(surface.frame().lines.is_empty());
    }

    #[test]
    fn geometry_change_preserves_the_lock() {
        let mut surface = surface_with(
            "The cat sat. The dog ran.",
            vec![item("Clarity", 85.0, Some(Span::new(4, 11)))],
        );
        surface.nav_key(NavKey::Next);
        assert!(surface.locked_item().is_some());

        surface.set_geometry(Geometry::cells(10.0));
        assert!(surface.locked_item().is_some());
        assert!(surface.frame().lines.len() > 1);
    }
}
