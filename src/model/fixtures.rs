// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

use super::document::Document;
use super::feedback::{FeedbackItem, Span};

const DEMO_TEXT: &str = "The water cycle moves water between the oceans, the air and the land.\n\
Evaporation lifts water from the surface, and the warm vapor rises until it cools.\n\
Condensation turns the vapor into clouds, clouds form rain, and rain falls back down.\n\
Some of the rain soaks into the ground and some of it runs off into rivers.\n\
Rivers carry the water back to the sea so the cycle can start over again.\n";

fn span_of(text: &str, needle: &str) -> Span {
    // Fixture text is ASCII, so byte offsets and char offsets agree.
    debug_assert!(text.is_ascii());
    let start = text.find(needle).expect("needle in fixture text");
    Span::new(start as i64, (start + needle.len()) as i64)
}

pub(crate) fn demo_document() -> Document {
    Document::new(DEMO_TEXT)
}

pub(crate) fn demo_feedback() -> Vec<FeedbackItem> {
    let text = DEMO_TEXT;
    vec![
        FeedbackItem {
            criterion: "Clarity".into(),
            score: 88.0,
            feedback: "Strong opening sentence that states the topic plainly.".to_owned(),
            highlight_span: Some(span_of(text, "The water cycle moves water")),
        },
        FeedbackItem {
            criterion: "Vocabulary".into(),
            score: 72.0,
            feedback: "Good use of 'evaporation' and 'condensation'; define them on first use."
                .to_owned(),
            highlight_span: Some(span_of(text, "Evaporation lifts water from the surface")),
        },
        FeedbackItem {
            criterion: "Sentence structure".into(),
            score: 41.0,
            feedback: "This sentence chains three clauses with commas; split it up.".to_owned(),
            highlight_span: Some(span_of(
                text,
                "Condensation turns the vapor into clouds, clouds form rain, and rain falls back down.",
            )),
        },
        FeedbackItem {
            criterion: "Conclusion".into(),
            score: 65.0,
            feedback: "The closing sentence restates the cycle but adds no summary of the stages."
                .to_owned(),
            highlight_span: Some(span_of(text, "Rivers carry the water back to the sea")),
        },
        FeedbackItem {
            criterion: "Citations".into(),
            score: 30.0,
            feedback: "No sources are referenced anywhere in the essay.".to_owned(),
            highlight_span: None,
        },
    ]
}
