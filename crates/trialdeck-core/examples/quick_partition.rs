//! Quick partition example — minimal programmatic usage of trialdeck.
//!
//! ```bash
//! cargo run --example quick_partition
//! ```

use trialdeck_core::coverage::verify_coverage;
use trialdeck_core::engine::{partition, PartitionConfig};
use trialdeck_core::model::{CorpusIndex, GridPair, Problem};

fn main() -> anyhow::Result<()> {
    // Build a small synthetic corpus: 8 problems with 3 test cases each.
    let problems = (0..8)
        .map(|i| Problem {
            problem_index: i,
            category: "Demo".into(),
            task_name: format!("Demo/task{i}.json"),
            task_path: format!("corpus/Demo/task{i}.json"),
            train: vec![GridPair {
                input: vec![vec![0, 1], vec![1, 0]],
                output: vec![vec![1, 0], vec![0, 1]],
            }],
            test: (0..3)
                .map(|t| GridPair {
                    input: vec![vec![i as u8, t as u8]],
                    output: vec![vec![t as u8, i as u8]],
                })
                .collect(),
            usable_test_indices: vec![0, 1, 2],
        })
        .collect();
    let corpus = CorpusIndex::new(problems);

    // Partition into 6 trials of 5.
    let config = PartitionConfig {
        trial_count: 6,
        trial_size: 5,
        seed: 12345,
    };
    let trials = partition(&corpus, &config)?;

    for trial in &trials.trials {
        println!("Trial {}: {} test cases", trial.trial_number, trial.len());
    }

    // Check that every test case landed in at least one trial.
    let coverage = verify_coverage(&corpus, &trials);
    println!(
        "Covered {}/{} test cases (max reuse {})",
        coverage.covered(),
        coverage.total_keys,
        coverage.max_usage
    );

    trials.save_json("quick_partition_trials.json".as_ref())?;
    println!("Trial set saved to quick_partition_trials.json");

    Ok(())
}
