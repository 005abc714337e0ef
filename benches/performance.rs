// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for CHIME
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Single token resolution
//! - Whole-melody resolution with carried state
//! - Schedule generation (resolution plus tempo scaling)

use std::time::Duration;

use chime::music::{resolve, resolve_all, Melody, ParserState};
use chime::sequencer::Schedule;
use chime::Tempo;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Benchmark resolving individual tokens of increasing complexity
fn bench_resolve_token(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_token");

    for token in ["c", "c#5", "eb3:16", "r:8"] {
        group.bench_with_input(BenchmarkId::from_parameter(token), &token, |b, token| {
            b.iter(|| resolve(black_box(token), ParserState::default()))
        });
    }

    group.finish();
}

/// Benchmark resolving whole built-in melodies
fn bench_resolve_melody(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_melody");

    for melody in [Melody::JumpUp, Melody::Prelude, Melody::Nyan] {
        group.bench_with_input(
            BenchmarkId::new("resolve_all", melody.name()),
            &melody,
            |b, melody| b.iter(|| resolve_all(black_box(melody.tokens()))),
        );
    }

    group.finish();
}

/// Benchmark schedule generation including phase splitting
fn bench_schedule(c: &mut Criterion) {
    let tempo = Tempo::default();
    let articulation = Duration::from_millis(10);

    c.bench_function("schedule_nyan", |b| {
        b.iter(|| {
            let mut total = Duration::ZERO;
            for step in Schedule::new(black_box(Melody::Nyan.tokens()), tempo, articulation) {
                if let Ok(step) = step {
                    total += step.phases().iter().map(|p| p.wait).sum::<Duration>();
                }
            }
            black_box(total)
        })
    });
}

criterion_group!(benches, bench_resolve_token, bench_resolve_melody, bench_schedule);
criterion_main!(benches);
