// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Marginalia: canvas-style text highlighting for rubric feedback.
//!
//! Takes extracted assignment text plus model-produced highlight spans (character offset ranges
//! tied to rubric criteria and scores) and renders an interactive, keyboard-navigable annotation
//! view: wrapped layout, tier-colored highlight rectangles, pointer hit-testing, hover/lock
//! tooltips and a minimap overview. Document ingestion (PDF/OCR) and feedback generation are
//! external collaborators; this crate starts at "plain text plus feedback items" and ends at a
//! drawn frame.

pub mod hittest;
pub mod interact;
pub mod layout;
pub mod metrics;
pub mod minimap;
pub mod model;
pub mod project;
pub mod render;
pub mod surface;
pub mod tui;
