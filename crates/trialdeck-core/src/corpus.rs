//! Corpus enumeration and loading.
//!
//! Walks a corpus root of category subdirectories, each holding task JSON
//! documents with `train` and `test` pair lists. Problem indices are
//! assignment order: categories sorted by name, files sorted within each
//! category, so the same tree always produces the same corpus.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::TrialdeckError;
use crate::model::{CorpusIndex, GridPair, Problem};

/// Problems with exactly this many test entries have index 0 held out.
pub const DEFAULT_SKIP_RULE_TEST_COUNT: usize = 10;

/// Usable test indices for a problem with `test_count` test entries.
///
/// Exactly `skip_rule_test_count` entries: indices 1..test_count (index 0
/// is the held-out calibration case). Any other count: all indices. There
/// are deliberately no further cases.
pub fn usable_test_indices(test_count: usize, skip_rule_test_count: usize) -> Vec<usize> {
    if test_count == skip_rule_test_count {
        (1..test_count).collect()
    } else {
        (0..test_count).collect()
    }
}

/// Raw task document shape. Fields are optional so a missing list can be
/// reported as a malformed entry instead of a bare parse error.
#[derive(Debug, Deserialize)]
struct TaskDocument {
    train: Option<Vec<GridPair>>,
    test: Option<Vec<GridPair>>,
}

/// A non-fatal problem encountered while loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    pub task_path: String,
    pub message: String,
}

/// A loaded corpus plus the entries that were excluded on the way.
#[derive(Debug)]
pub struct LoadedCorpus {
    pub corpus: CorpusIndex,
    pub warnings: Vec<LoadWarning>,
}

fn parse_task_document(
    task_name: &str,
    content: &str,
) -> Result<(Vec<GridPair>, Vec<GridPair>), TrialdeckError> {
    let doc: TaskDocument =
        serde_json::from_str(content).map_err(|e| TrialdeckError::MalformedCorpusEntry {
            task_name: task_name.to_string(),
            reason: e.to_string(),
        })?;
    let train = doc.train.ok_or_else(|| TrialdeckError::MalformedCorpusEntry {
        task_name: task_name.to_string(),
        reason: "missing train field".to_string(),
    })?;
    let test = doc.test.ok_or_else(|| TrialdeckError::MalformedCorpusEntry {
        task_name: task_name.to_string(),
        reason: "missing test field".to_string(),
    })?;
    Ok((train, test))
}

fn sorted_entries(dir: &Path, want_dirs: bool) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if want_dirs && path.is_dir() {
            entries.push(path);
        } else if !want_dirs && path.extension().is_some_and(|ext| ext == "json") {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}

/// Load every task document under `root` into a corpus.
///
/// Malformed entries (unreadable, unparsable, or missing train/test) are
/// excluded and reported in the warning list; loading never aborts on one
/// bad document. A root with no category subdirectories is treated as a
/// single category.
pub fn load_corpus_directory(root: &Path, skip_rule_test_count: usize) -> Result<LoadedCorpus> {
    anyhow::ensure!(root.is_dir(), "not a directory: {}", root.display());

    let root_name = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("corpus")
        .to_string();

    let mut categories = sorted_entries(root, true)?;
    if categories.is_empty() {
        categories.push(root.to_path_buf());
    }

    let mut problems = Vec::new();
    let mut warnings = Vec::new();

    for category_dir in &categories {
        let category = category_dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        for path in sorted_entries(category_dir, false)? {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            let task_name = format!("{category}/{file_name}");
            // Forward slashes regardless of platform; consumed by web pages.
            let task_path = if *category_dir == *root {
                format!("{root_name}/{file_name}")
            } else {
                format!("{root_name}/{category}/{file_name}")
            };

            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                    warnings.push(LoadWarning {
                        task_path,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            match parse_task_document(&task_name, &content) {
                Ok((train, test)) => {
                    let usable = usable_test_indices(test.len(), skip_rule_test_count);
                    problems.push(Problem {
                        problem_index: problems.len(),
                        category: category.clone(),
                        task_name,
                        task_path,
                        train,
                        test,
                        usable_test_indices: usable,
                    });
                }
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                    warnings.push(LoadWarning {
                        task_path,
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    Ok(LoadedCorpus {
        corpus: CorpusIndex::new(problems),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASK_JSON: &str = r#"{
        "train": [{"input": [[0, 1]], "output": [[1, 0]]}],
        "test": [
            {"input": [[1]], "output": [[2]]},
            {"input": [[3]], "output": [[4]]}
        ]
    }"#;

    fn write_task(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn skip_rule_holds_out_index_zero() {
        assert_eq!(usable_test_indices(10, 10), (1..10).collect::<Vec<_>>());
        assert_eq!(usable_test_indices(3, 10), vec![0, 1, 2]);
        assert_eq!(usable_test_indices(11, 10), (0..11).collect::<Vec<_>>());
        assert_eq!(usable_test_indices(0, 10), Vec::<usize>::new());
    }

    #[test]
    fn loads_sorted_categories_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let cat_b = dir.path().join("BetaCat");
        let cat_a = dir.path().join("AlphaCat");
        std::fs::create_dir_all(&cat_b).unwrap();
        std::fs::create_dir_all(&cat_a).unwrap();
        write_task(&cat_b, "task1.json", TASK_JSON);
        write_task(&cat_a, "task2.json", TASK_JSON);
        write_task(&cat_a, "task1.json", TASK_JSON);

        let loaded = load_corpus_directory(dir.path(), DEFAULT_SKIP_RULE_TEST_COUNT).unwrap();
        assert!(loaded.warnings.is_empty());

        let names: Vec<&str> = loaded
            .corpus
            .problems
            .iter()
            .map(|p| p.task_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "AlphaCat/task1.json",
                "AlphaCat/task2.json",
                "BetaCat/task1.json"
            ]
        );
        assert_eq!(loaded.corpus.problems[0].problem_index, 0);
        assert_eq!(loaded.corpus.problems[2].problem_index, 2);
        assert_eq!(loaded.corpus.total_slots(), 6);
    }

    #[test]
    fn malformed_entry_is_excluded_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cat = dir.path().join("Cat");
        std::fs::create_dir_all(&cat).unwrap();
        write_task(&cat, "good.json", TASK_JSON);
        write_task(&cat, "no_test.json", r#"{"train": []}"#);
        write_task(&cat, "not_json.json", "{broken");

        let loaded = load_corpus_directory(dir.path(), DEFAULT_SKIP_RULE_TEST_COUNT).unwrap();
        assert_eq!(loaded.corpus.len(), 1);
        assert_eq!(loaded.warnings.len(), 2);
        assert!(loaded
            .warnings
            .iter()
            .any(|w| w.message.contains("missing test field")));
    }

    #[test]
    fn ten_test_problem_loses_index_zero() {
        let tests: Vec<String> = (0..10)
            .map(|i| format!(r#"{{"input": [[{i}]], "output": [[{i}]]}}"#))
            .collect();
        let doc = format!(r#"{{"train": [], "test": [{}]}}"#, tests.join(","));

        let dir = tempfile::tempdir().unwrap();
        let cat = dir.path().join("Cat");
        std::fs::create_dir_all(&cat).unwrap();
        write_task(&cat, "ten.json", &doc);

        let loaded = load_corpus_directory(dir.path(), DEFAULT_SKIP_RULE_TEST_COUNT).unwrap();
        let problem = &loaded.corpus.problems[0];
        assert_eq!(problem.test.len(), 10);
        assert_eq!(problem.usable_test_indices, (1..10).collect::<Vec<_>>());
    }

    #[test]
    fn flat_root_is_one_category() {
        let dir = tempfile::tempdir().unwrap();
        write_task(dir.path(), "solo.json", TASK_JSON);

        let loaded = load_corpus_directory(dir.path(), DEFAULT_SKIP_RULE_TEST_COUNT).unwrap();
        assert_eq!(loaded.corpus.len(), 1);
        assert!(loaded.corpus.problems[0]
            .task_name
            .ends_with("/solo.json"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(load_corpus_directory(&missing, DEFAULT_SKIP_RULE_TEST_COUNT).is_err());
    }
}
