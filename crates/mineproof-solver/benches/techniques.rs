//! Micro-benchmarks for individual techniques and the full engine.
//!
//! Each input is a two-row strip: a hidden top row over a fully revealed
//! bottom row whose counts come from a fixed mine pattern.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench techniques
//! ```

use std::hint;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mineproof_core::BoardView;
use mineproof_solver::{
    Constraint, ConstraintStore, InferenceEngine,
    technique::{PairwiseBound, SingleConstraint, SubsetDifference, Technique},
};

/// Builds the constraints of a strip whose top row hides mines at every `*`.
fn strip(pattern: &str) -> Vec<Constraint> {
    let mines: Vec<bool> = pattern.chars().map(|c| c == '*').collect();
    let hidden = vec!["_"; mines.len()].join(" ");
    let counts = (0..mines.len())
        .map(|col| {
            let lo = col.saturating_sub(1);
            let hi = (col + 1).min(mines.len() - 1);
            mines[lo..=hi].iter().filter(|&&m| m).count().to_string()
        })
        .collect::<Vec<_>>()
        .join(" ");
    let view: BoardView = format!("{hidden}\n{counts}").parse().unwrap();
    ConstraintStore::from_view(&view)
        .unwrap()
        .constraints()
        .unwrap()
}

fn inputs() -> [(&'static str, Vec<Constraint>); 3] {
    [
        ("sparse", strip("*.......*.......*.......*.......")),
        ("dense", strip("*.**.*..**.*.**..*.**.*..**.*.**")),
        ("alternating", strip("*.*.*.*.*.*.*.*.*.*.*.*.*.*.*.*.")),
    ]
}

fn bench_technique<T>(c: &mut Criterion, technique: &T)
where
    T: Technique,
{
    for (param, constraints) in inputs() {
        c.bench_with_input(
            BenchmarkId::new(technique.name().replace(' ', "_"), param),
            &constraints,
            |b, constraints| {
                b.iter(|| hint::black_box(technique.deduce(hint::black_box(constraints))));
            },
        );
    }
}

fn bench_single_constraint(c: &mut Criterion) {
    bench_technique(c, &SingleConstraint::new());
}

fn bench_subset_difference(c: &mut Criterion) {
    bench_technique(c, &SubsetDifference::new());
}

fn bench_pairwise_bound(c: &mut Criterion) {
    bench_technique(c, &PairwiseBound::new());
}

fn bench_engine(c: &mut Criterion) {
    let engine = InferenceEngine::with_all_techniques();
    for (param, constraints) in inputs() {
        c.bench_with_input(
            BenchmarkId::new("engine_deduce", param),
            &constraints,
            |b, constraints| {
                b.iter(|| {
                    let deduction = engine.deduce(hint::black_box(constraints)).unwrap();
                    hint::black_box(deduction)
                });
            },
        );
    }
}

criterion_group!(
    benches,
    bench_single_constraint,
    bench_subset_difference,
    bench_pairwise_bound,
    bench_engine
);
criterion_main!(benches);
