// SPDX-FileCopyrightText: 2026 Marginalia contributors
// SPDX-License-Identifier: MIT

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use marginalia::hittest::hit_test;
use marginalia::layout::layout;
use marginalia::metrics::MonospaceMetrics;
use marginalia::model::{FeedbackItem, FeedbackSet, Span};
use marginalia::project::{project, Geometry};

// Benchmark identity (keep stable):
// - Group names in this file: `engine.layout`, `engine.project`, `engine.hit_test`
// - Case IDs (the string after the `/`) must remain stable across refactors so results stay
//   comparable over time (e.g. `essay_2k`, `essay_40k`).

fn essay(words: usize) -> String {
    let sentence = "The water cycle moves water between the oceans, the air and the land. ";
    let mut text = String::new();
    let mut count = 0;
    while count < words {
        text.push_str(sentence);
        count += sentence.split_whitespace().count();
        if count % 120 == 0 {
            text.push('\n');
        }
    }
    text
}

fn feedback_over(text: &str, criteria: usize) -> FeedbackSet {
    let len = text.chars().count() as i64;
    let items = (0..criteria)
        .map(|idx| {
            let start = (idx as i64 * 97) % len.max(1);
            FeedbackItem {
                criterion: format!("criterion-{idx}").into(),
                score: (idx * 17 % 100) as f64,
                feedback: "advice".to_owned(),
                highlight_span: Some(Span::new(start, (start + 40).min(len))),
            }
        })
        .collect();
    FeedbackSet::with_generation(items, 0)
}

fn benches_engine(c: &mut Criterion) {
    let metrics = MonospaceMetrics::cells();
    let geometry = Geometry::cells(90.0);

    let small = essay(300);
    let large = essay(6000);

    let mut group = c.benchmark_group("engine.layout");
    group.bench_function("essay_2k", |b| {
        b.iter(|| black_box(layout(black_box(&small), &metrics, 90.0)).len())
    });
    group.bench_function("essay_40k", |b| {
        b.iter(|| black_box(layout(black_box(&large), &metrics, 90.0)).len())
    });
    group.finish();

    let small_lines = layout(&small, &metrics, 90.0);
    let large_lines = layout(&large, &metrics, 90.0);
    let small_set = feedback_over(&small, 8);
    let large_set = feedback_over(&large, 24);

    let mut group = c.benchmark_group("engine.project");
    group.bench_function("essay_2k", |b| {
        b.iter(|| {
            black_box(project(
                black_box(&small_lines),
                black_box(&small_set),
                &metrics,
                &geometry,
            ))
            .len()
        })
    });
    group.bench_function("essay_40k", |b| {
        b.iter(|| {
            black_box(project(
                black_box(&large_lines),
                black_box(&large_set),
                &metrics,
                &geometry,
            ))
            .len()
        })
    });
    group.finish();

    let large_rects = project(&large_lines, &large_set, &metrics, &geometry);
    let mut group = c.benchmark_group("engine.hit_test");
    group.bench_function("essay_40k", |b| {
        b.iter(|| black_box(hit_test(black_box(45.0), black_box(12.0), &large_rects)))
    });
    group.finish();
}

criterion_group!(benches, benches_engine);
criterion_main!(benches);
