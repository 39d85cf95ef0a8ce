// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Convoscribe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Convoscribe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use convoscribe::idgen::KeyGenerator;
use convoscribe::model::Screen;
use convoscribe::text::TextEngine;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Groups: `text.externalize`, `text.round_trip`, `text.export_pairs`, `graph.remove_screen`
// - Case ids come from `fixtures::CASES` (`small`, `medium_dense`, `large_long_text`).
fn slot_count(screens: &[Screen]) -> u64 {
    screens.iter().map(|s| 1 + s.options().len() as u64).sum()
}

fn benches_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("text.externalize");
    for case in fixtures::CASES {
        let screens = fixtures::conversation(case);
        group.throughput(Throughput::Elements(slot_count(&screens)));
        group.bench_function(case.id, |b| {
            b.iter_batched(
                || (TextEngine::with_keys(KeyGenerator::from_seed(7)), screens.clone()),
                |(mut engine, mut screens)| {
                    engine.externalize(&mut screens, black_box("bench"));
                    black_box(engine.table().len())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();

    let mut group = c.benchmark_group("text.round_trip");
    for case in fixtures::CASES {
        let screens = fixtures::conversation(case);
        group.throughput(Throughput::Elements(slot_count(&screens)));
        group.bench_function(case.id, |b| {
            b.iter_batched(
                || (TextEngine::with_keys(KeyGenerator::from_seed(7)), screens.clone()),
                |(mut engine, mut screens)| {
                    engine.externalize(&mut screens, "bench");
                    engine.internalize(&mut screens);
                    black_box(screens.len())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();

    let mut group = c.benchmark_group("text.export_pairs");
    for case in fixtures::CASES {
        let mut screens = fixtures::conversation(case);
        let mut engine = TextEngine::with_keys(KeyGenerator::from_seed(7));
        engine.externalize(&mut screens, "bench");
        group.throughput(Throughput::Elements(slot_count(&screens)));
        group.bench_function(case.id, |b| {
            b.iter(|| black_box(engine.export_pairs(black_box(&screens)).len()))
        });
    }
    group.finish();
}

fn benches_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph.remove_screen");
    for case in fixtures::CASES {
        let graph = fixtures::graph(case);
        let target = graph.screens()[graph.len() / 2].screen_id();
        group.bench_function(case.id, |b| {
            b.iter_batched(
                || graph.clone(),
                |mut graph| black_box(graph.remove_screen(black_box(target))),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_text, benches_graph
}
criterion_main!(benches);
