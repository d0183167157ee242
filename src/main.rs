// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

//! Marginalia CLI entrypoint.
//!
//! Loads extracted assignment text (and optionally the feedback-generation JSON payload) and
//! runs the interactive terminal viewer. `--demo` uses a built-in essay and feedback set.

use std::error::Error;
use std::fs;

use marginalia::model::{Document, FeedbackItem};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <text-file> [--feedback <json-file>]\n  {program} --demo\n\n\
<text-file> is the plain extracted assignment text (character offsets in the feedback\n\
payload index into it). --feedback takes the generation payload: a JSON array of\n\
{{criterion, score, feedback, highlightSpan?}} objects."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    text_path: Option<String>,
    feedback_path: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--feedback" => {
                if options.feedback_path.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.feedback_path = Some(path);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.text_path.is_some() {
                    return Err(());
                }
                options.text_path = Some(arg);
            }
        }
    }

    if options.demo && (options.text_path.is_some() || options.feedback_path.is_some()) {
        return Err(());
    }

    if !options.demo && options.text_path.is_none() {
        return Err(());
    }

    Ok(options)
}

fn load_feedback(path: &str) -> Result<Vec<FeedbackItem>, Box<dyn Error>> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed reading feedback from {path}: {err}"))?;
    let items: Vec<FeedbackItem> = serde_json::from_str(&raw)
        .map_err(|err| format!("failed parsing feedback JSON from {path}: {err}"))?;
    Ok(items)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "marginalia".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.demo {
            return marginalia::tui::run_demo();
        }

        let Some(text_path) = options.text_path else {
            print_usage(&program);
            std::process::exit(2);
        };
        let text = fs::read_to_string(&text_path)
            .map_err(|err| format!("failed reading {text_path}: {err}"))?;

        let items = match options.feedback_path.as_deref() {
            Some(path) => load_feedback(path)?,
            None => Vec::new(),
        };

        marginalia::tui::run(Document::new(text), items)
    })();

    if let Err(err) = result {
        eprintln!("marginalia: {err}");
        std::process::exit(1);
    }
}
