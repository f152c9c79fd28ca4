//! Benchmarks for the pure consolidation path
//!
//! Substring subsumption is quadratic in the number of kept phrases; this
//! keeps an eye on it for realistic per-person phrase counts.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skillscan::skills::remove_substring_phrases;

fn phrase_set(n: usize) -> Vec<String> {
    let stems = [
        "deep learning",
        "reinforcement learning",
        "computer vision",
        "natural language processing",
        "graph neural networks",
    ];
    (0..n)
        .map(|i| {
            let stem = stems[i % stems.len()];
            match i % 3 {
                0 => stem.to_string(),
                1 => format!("{stem} methods"),
                _ => format!("applied {stem} for healthcare"),
            }
        })
        .collect()
}

fn bench_subsumption(c: &mut Criterion) {
    let small = phrase_set(15);
    let large = phrase_set(200);

    c.bench_function("subsumption_15_phrases", |b| {
        b.iter(|| remove_substring_phrases(black_box(small.clone())))
    });
    c.bench_function("subsumption_200_phrases", |b| {
        b.iter(|| remove_substring_phrases(black_box(large.clone())))
    });
}

criterion_group!(benches, bench_subsumption);
criterion_main!(benches);
