//! Partition engine benchmark over a corpus-2-shaped synthetic corpus.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use trialdeck_core::engine::{partition, PartitionConfig};
use trialdeck_core::model::{CorpusIndex, GridPair, Problem};

fn reference_scale_corpus() -> CorpusIndex {
    // 160 problems with 10 tests each, index 0 held out: 1440 slots.
    let problems = (0..160)
        .map(|i| Problem {
            problem_index: i,
            category: "Bench".into(),
            task_name: format!("Bench/task{i}.json"),
            task_path: format!("corpus/Bench/task{i}.json"),
            train: vec![GridPair {
                input: vec![vec![0; 5]; 5],
                output: vec![vec![1; 5]; 5],
            }],
            test: (0..10)
                .map(|t| GridPair {
                    input: vec![vec![t as u8; 5]; 5],
                    output: vec![vec![(t + 1) as u8; 5]; 5],
                })
                .collect(),
            usable_test_indices: (1..10).collect(),
        })
        .collect();
    CorpusIndex::new(problems)
}

fn bench_partition(c: &mut Criterion) {
    let corpus = reference_scale_corpus();
    let config = PartitionConfig::default();
    c.bench_function("partition_48x30_from_1440", |b| {
        b.iter(|| partition(black_box(&corpus), black_box(&config)).unwrap())
    });
}

criterion_group!(benches, bench_partition);
criterion_main!(benches);
