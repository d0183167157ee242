// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Hover / lock / keyboard-cycle selection state.
//!
//! One [`InteractionState`] per rendering surface. Pointer and keyboard handlers are synchronous
//! and idempotent for repeated identical events; every transition reports whether the locked item
//! changed so the surface can fire its selection-change callback.

use crate::hittest::ProjectedHit;
use crate::model::FeedbackKey;

/// Hover tooltip offset from the pointer position.
pub const TOOLTIP_POINTER_DX: f64 = 10.0;
pub const TOOLTIP_POINTER_DY: f64 = -10.0;

/// Keyboard navigation over the feedback sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// ArrowRight: lock the next item, wrapping; with no lock, start at the first item.
    Next,
    /// ArrowLeft: lock the previous item, wrapping; with no lock, start at the last item.
    Prev,
    /// Escape: drop the lock.
    Clear,
}

/// The current selection.
///
/// A lock suppresses hover updates entirely; at most one of "hover tooltip" or "locked tooltip"
/// is authoritative at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Hovering {
        key: FeedbackKey,
        /// Tooltip anchor derived from the pointer position at hover time.
        anchor: (f64, f64),
    },
    Locked {
        key: FeedbackKey,
    },
}

impl Selection {
    pub fn locked_key(&self) -> Option<FeedbackKey> {
        match self {
            Selection::Locked { key } => Some(*key),
            _ => None,
        }
    }

    pub fn hover_key(&self) -> Option<FeedbackKey> {
        match self {
            Selection::Hovering { key, .. } => Some(*key),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }
}

/// Whether a transition changed the locked item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockChange {
    Unchanged,
    Changed(Option<FeedbackKey>),
}

/// Tracks hover, click-lock and keyboard-cycle state for one rendering surface.
///
/// The owner must call [`InteractionState::sync_generation`] whenever the document or the
/// feedback snapshot is replaced, so a lock can never outlive the items it referenced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    selection: Selection,
    show_all: bool,
    generation: u64,
}

impl InteractionState {
    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Show-all is a rendering mode switch, orthogonal to hover/lock.
    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
    }

    /// Forces `Idle` when the surface contents were replaced with a new generation.
    pub fn sync_generation(&mut self, generation: u64) -> LockChange {
        if generation == self.generation {
            return LockChange::Unchanged;
        }
        self.generation = generation;
        let had_lock = self.selection.locked_key().is_some();
        self.selection = Selection::Idle;
        if had_lock {
            LockChange::Changed(None)
        } else {
            LockChange::Unchanged
        }
    }

    /// Pointer moved to `pointer`, hitting `hit` (if anything). Suppressed while locked.
    pub fn pointer_move(&mut self, hit: Option<ProjectedHit>, pointer: (f64, f64)) -> LockChange {
        if self.selection.locked_key().is_some() {
            return LockChange::Unchanged;
        }
        self.selection = match hit {
            Some(hit) => Selection::Hovering {
                key: hit.key,
                anchor: (pointer.0 + TOOLTIP_POINTER_DX, pointer.1 + TOOLTIP_POINTER_DY),
            },
            None => Selection::Idle,
        };
        LockChange::Unchanged
    }

    /// Pointer left the surface. Clears hover; a lock stays put.
    pub fn pointer_leave(&mut self) -> LockChange {
        if self.selection.locked_key().is_none() {
            self.selection = Selection::Idle;
        }
        LockChange::Unchanged
    }

    /// Click at a hit-tested position.
    ///
    /// Clicking a different item locks it directly (no intermediate `Idle`); clicking the
    /// already-locked item, or empty space, returns to `Idle`.
    pub fn click(&mut self, hit: Option<ProjectedHit>) -> LockChange {
        match hit {
            Some(hit) => {
                if self.selection.locked_key() == Some(hit.key) {
                    self.selection = Selection::Idle;
                    LockChange::Changed(None)
                } else {
                    self.selection = Selection::Locked { key: hit.key };
                    LockChange::Changed(Some(hit.key))
                }
            }
            None => {
                let had_lock = self.selection.locked_key().is_some();
                self.selection = Selection::Idle;
                if had_lock {
                    LockChange::Changed(None)
                } else {
                    LockChange::Unchanged
                }
            }
        }
    }

    /// Keyboard navigation over `item_count` items in feedback order.
    pub fn nav_key(&mut self, key: NavKey, item_count: usize) -> LockChange {
        match key {
            NavKey::Clear => {
                let had_lock = self.selection.locked_key().is_some();
                self.selection = Selection::Idle;
                if had_lock {
                    LockChange::Changed(None)
                } else {
                    LockChange::Unchanged
                }
            }
            NavKey::Next | NavKey::Prev => {
                if item_count == 0 {
                    return LockChange::Unchanged;
                }
                let index = match (key, self.selection.locked_key()) {
                    (NavKey::Next, Some(locked)) => (locked.index() + 1) % item_count,
                    (NavKey::Next, None) => 0,
                    (NavKey::Prev, Some(locked)) => {
                        (locked.index() + item_count - 1) % item_count
                    }
                    (NavKey::Prev, None) => item_count - 1,
                    (NavKey::Clear, _) => unreachable!("handled above"),
                };
                let next = FeedbackKey::new(self.generation, index);
                if self.selection.locked_key() == Some(next) {
                    return LockChange::Unchanged;
                }
                self.selection = Selection::Locked { key: next };
                LockChange::Changed(Some(next))
            }
        }
    }
}
