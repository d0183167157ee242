// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Core data model.
//!
//! Documents are immutable extracted text; feedback arrives as atomic, generation-stamped
//! snapshots whose items are identified by `(generation, index)`, never by label text.

pub mod document;
pub mod feedback;
pub(crate) mod fixtures;

pub use document::Document;
pub use feedback::{FeedbackItem, FeedbackKey, FeedbackSet, Rgb, Span, Tier};
