//! Criterion microbenches for isometry algebra and geodesic constructions.
//!
//! - composition, inverse, point action on random inputs;
//! - fixed points / axis of hyperbolic elements;
//! - common perpendicular of disjoint geodesics;
//! - word evaluation in the regular genus-2 representation.
//!
//! Results live under `target/criterion`.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use fuchsian::group::Word;
use fuchsian::h2::{common_perpendicular, H2Geodesic};
use fuchsian::representation::IsomH2Representation;
use fuchsian::sample::{random_isometry, random_point, ReplayToken};
use fuchsian::Complex;

fn bench_isometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("isometry");
    group.bench_function(BenchmarkId::new("compose", "random"), |b| {
        b.iter_batched(
            || {
                let tok = ReplayToken::new(42, 0);
                (random_isometry(tok, 0.9), random_isometry(tok.next(), 0.9))
            },
            |(f, g)| {
                let _ = black_box(f * g);
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("inverse_act", "random"), |b| {
        b.iter_batched(
            || {
                let tok = ReplayToken::new(7, 3);
                (random_isometry(tok, 0.9), random_point(tok.next(), 0.9))
            },
            |(f, p)| {
                let _ = black_box(f.inverse() * (f * p));
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("axis", "random"), |b| {
        b.iter_batched(
            || random_isometry(ReplayToken::new(9, 5), 0.95),
            |f| {
                let _ = black_box(f.axis());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_geodesics(c: &mut Criterion) {
    let mut group = c.benchmark_group("geodesic");
    let l1 = H2Geodesic::new(Complex::new(1.0, 0.0), Complex::new(0.0, 1.0));
    let l2 = H2Geodesic::new(Complex::new(-1.0, 0.0), Complex::new(0.0, -1.0));
    if let (Ok(l1), Ok(l2)) = (l1, l2) {
        group.bench_function(BenchmarkId::new("common_perpendicular", "quadrants"), |b| {
            b.iter(|| black_box(common_perpendicular(&l1, &l2)))
        });
    }
    group.finish();
}

fn bench_words(c: &mut Criterion) {
    let mut group = c.benchmark_group("words");
    let Ok(rho) = IsomH2Representation::regular(2) else {
        return;
    };
    for len in [2usize, 3] {
        let words: Vec<Word> = rho.group().words_of_length_equal_to(len);
        group.bench_with_input(BenchmarkId::new("evaluate_all", len), &words, |b, words| {
            b.iter(|| black_box(rho.evaluate_all(words)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_isometry, bench_geodesics, bench_words);
criterion_main!(benches);
