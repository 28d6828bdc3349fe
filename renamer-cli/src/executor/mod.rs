//! Applies a finalized rename plan to disk.
//!
//! Execution is validated up front, staged through temporary sibling names
//! and rolled back completely when any rename fails. The outcome is always
//! reported as an [`ExecuteResult`], never as an error.

pub mod staging;
pub mod validate;

pub use staging::{RenameTransaction, TokenSource, UuidTokens};

use tracing::{error, info, warn};

use crate::core::{ErrorKind, ExecuteResult, RenameOperation, RenamerError};

pub const NO_CHANGES_MESSAGE: &str = "No changes: names already match the pattern.";

/// Runs rename batches, drawing staging tokens from `T`
#[derive(Debug, Default)]
pub struct Executor<T: TokenSource = UuidTokens> {
    tokens: T,
}

impl Executor<UuidTokens> {
    pub fn new() -> Self {
        Self { tokens: UuidTokens }
    }
}

impl<T: TokenSource> Executor<T> {
    pub fn with_tokens(tokens: T) -> Self {
        Self { tokens }
    }

    pub fn execute(&mut self, operations: &[RenameOperation]) -> ExecuteResult {
        let pending: Vec<&RenameOperation> = operations.iter().filter(|op| op.is_change()).collect();
        if pending.is_empty() {
            return ExecuteResult::no_changes(NO_CHANGES_MESSAGE);
        }

        info!("Renaming {} of {} entries", pending.len(), operations.len());
        match self.run(&pending) {
            Ok(renamed) => {
                info!("Renamed {} entries", renamed);
                ExecuteResult::success(renamed)
            }
            Err(e) => {
                match e.kind() {
                    ErrorKind::Io => error!("Rename batch failed: {}", e),
                    ErrorKind::Input | ErrorKind::Validation => warn!("Rename batch refused: {}", e),
                }
                ExecuteResult::failed(&e)
            }
        }
    }

    fn run(&mut self, pending: &[&RenameOperation]) -> Result<usize, RenamerError> {
        validate::check(pending)?;

        let mut tx = RenameTransaction::new();
        let outcome = pending
            .iter()
            .try_for_each(|op| tx.stage(op, &mut self.tokens))
            .and_then(|()| tx.commit());

        if outcome.is_err() {
            let stranded = tx.rollback();
            if stranded > 0 {
                warn!("Rollback left {} entries displaced", stranded);
            }
        }
        outcome
    }
}

/// Execute `operations` with random staging tokens
pub fn execute(operations: &[RenameOperation]) -> ExecuteResult {
    Executor::new().execute(operations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExecuteStatus;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn op(dir: &Path, old: &str, new: &str) -> RenameOperation {
        RenameOperation {
            old_path: dir.join(old),
            new_path: dir.join(new),
            old_name: old.to_string(),
            new_name: new.to_string(),
            is_directory: false,
        }
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_identity_is_no_changes() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a"), "").unwrap();
        let result = execute(&[op(temp_dir.path(), "a", "a")]);
        assert_eq!(result.status, ExecuteStatus::NoChanges);
        assert_eq!(result.renamed_count, 0);
        assert_eq!(result.message, NO_CHANGES_MESSAGE);
    }

    #[test]
    fn test_count_excludes_unchanged_entries() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a"), "").unwrap();
        fs::write(temp_dir.path().join("b"), "").unwrap();
        let result = execute(&[op(temp_dir.path(), "a", "a"), op(temp_dir.path(), "b", "c")]);
        assert_eq!(result, ExecuteResult::success(1));
        assert_eq!(listing(temp_dir.path()), vec!["a", "c"]);
    }

    #[test]
    fn test_rotation() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["1", "2", "3"] {
            fs::write(temp_dir.path().join(name), name).unwrap();
        }
        let ops = [
            op(temp_dir.path(), "1", "2"),
            op(temp_dir.path(), "2", "3"),
            op(temp_dir.path(), "3", "1"),
        ];
        assert!(execute(&ops).is_success());
        assert_eq!(fs::read_to_string(temp_dir.path().join("2")).unwrap(), "1");
        assert_eq!(fs::read_to_string(temp_dir.path().join("3")).unwrap(), "2");
        assert_eq!(fs::read_to_string(temp_dir.path().join("1")).unwrap(), "3");
    }

    #[test]
    fn test_case_only_rename() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("File.TXT"), "data").unwrap();
        let result = execute(&[op(temp_dir.path(), "File.TXT", "file.txt")]);
        assert!(result.is_success());
        assert_eq!(listing(temp_dir.path()), vec!["file.txt"]);
    }

    #[test]
    fn test_validation_failure_is_classified() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a"), "").unwrap();
        fs::write(temp_dir.path().join("b"), "").unwrap();
        let result = execute(&[op(temp_dir.path(), "a", "c"), op(temp_dir.path(), "b", "C")]);
        assert_eq!(result.error_kind, Some(ErrorKind::Validation));
        assert_eq!(listing(temp_dir.path()), vec!["a", "b"]);
    }

    #[test]
    fn test_missing_source_rolls_back_staged_entries() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a"), "a").unwrap();
        // "b" was removed by someone else after planning
        let result = execute(&[op(temp_dir.path(), "a", "x"), op(temp_dir.path(), "b", "y")]);
        assert_eq!(result.status, ExecuteStatus::Error);
        assert_eq!(result.error_kind, Some(ErrorKind::Io));
        assert_eq!(result.renamed_count, 0);
        assert!(result.message.contains('b'));
        assert_eq!(listing(temp_dir.path()), vec!["a"]);
    }

    #[test]
    fn test_commit_failure_rolls_back_promoted_entries() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_path_buf();
        fs::write(dir.join("a"), "a").unwrap();
        fs::write(dir.join("b"), "b").unwrap();

        // The second token request occupies "b2" right after validation passed
        let mut calls = 0;
        let blocker = dir.clone();
        let tokens = move || {
            calls += 1;
            if calls == 2 {
                fs::write(blocker.join("b2"), "external").unwrap();
            }
            format!("tok{}", calls)
        };

        let result = Executor::with_tokens(tokens).execute(&[op(&dir, "a", "a2"), op(&dir, "b", "b2")]);

        assert_eq!(result.status, ExecuteStatus::Error);
        assert_eq!(result.error_kind, Some(ErrorKind::Io));
        assert!(result.message.contains("b2"));
        assert_eq!(listing(&dir), vec!["a", "b", "b2"]);
        assert_eq!(fs::read_to_string(dir.join("a")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dir.join("b2")).unwrap(), "external");
    }
}
