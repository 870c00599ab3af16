//! Benchmarks for the Jam evaluator.
//!
//! Run with: `cargo bench` in the core/ directory.
//!
//! Benchmark groups:
//! 1. eval_only: recursive arithmetic under each of the nine strategies
//!    (programs are pre-parsed/analyzed)
//! 2. streams: walking an infinite list under the lazy cons strategies
//! 3. full_pipeline: parse + analyze + eval together (for comparison)

use bumpalo::Bump;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jam_core::{
    analyzer,
    evaluator::{Evaluator, EvaluatorOptions, Strategy},
    parser,
};

const OPTIONS: EvaluatorOptions = EvaluatorOptions {
    max_depth: 100_000,
    max_iterations: Some(1_000_000),
};

/// `sum(n) = n + sum(n - 1)`, evaluated at `n`.
fn recursive_sum(n: usize) -> String {
    format!(
        "let sum := map n to if n = 0 then 0 else n + sum(n - 1); in sum({})",
        n
    )
}

/// The `n`th natural number, read off an infinite list.
fn nth_natural(n: usize) -> String {
    format!(
        "let nats := map n to cons(n, nats(n + 1));
             nth := map l, k to if k = 0 then first(l) else nth(rest(l), k - 1);
         in nth(nats(0), {})",
        n
    )
}

fn bench_eval_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_only");

    for size in [10, 50, 100] {
        group.throughput(Throughput::Elements(size as u64));

        let arena = Bump::new();
        let source = arena.alloc_str(&recursive_sum(size));
        let parsed = parser::parse(&arena, source).expect("Parse failed");
        let expr = analyzer::analyze(&arena, &parsed).expect("Analysis failed");

        for strategy in Strategy::ALL {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        let eval_arena = Bump::new();
                        let mut evaluator = Evaluator::new(&eval_arena, strategy, OPTIONS);
                        let value = evaluator.eval(black_box(expr)).expect("Eval failed");
                        black_box(value.as_int())
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_streams(c: &mut Criterion) {
    let mut group = c.benchmark_group("streams");
    let lazy = [
        Strategy::VALUE_NAME,
        Strategy::VALUE_NEED,
        Strategy::NAME_NAME,
        Strategy::NAME_NEED,
        Strategy::NEED_NAME,
        Strategy::NEED_NEED,
    ];

    for size in [10, 50, 100] {
        group.throughput(Throughput::Elements(size as u64));

        let arena = Bump::new();
        let source = arena.alloc_str(&nth_natural(size));
        let parsed = parser::parse(&arena, source).expect("Parse failed");
        let expr = analyzer::analyze(&arena, &parsed).expect("Analysis failed");

        for strategy in lazy {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        let eval_arena = Bump::new();
                        let mut evaluator = Evaluator::new(&eval_arena, strategy, OPTIONS);
                        let value = evaluator.eval(black_box(expr)).expect("Eval failed");
                        black_box(value.as_int())
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for size in [10, 50, 100] {
        group.throughput(Throughput::Elements(size as u64));
        let source = recursive_sum(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| {
                let arena = Bump::new();
                let source = arena.alloc_str(black_box(source));
                let parsed = parser::parse(&arena, source).expect("Parse failed");
                let expr = analyzer::analyze(&arena, &parsed).expect("Analysis failed");
                let mut evaluator = Evaluator::new(&arena, Strategy::NEED_NEED, OPTIONS);
                black_box(evaluator.eval(expr).expect("Eval failed").as_int())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_eval_only, bench_streams, bench_full_pipeline);
criterion_main!(benches);
