use std::collections::HashSet;
use std::ffi::OsStr;

use crate::core::error::cap_names;
use crate::core::paths::{entry_exists, is_valid_entry_name, path_key};
use crate::core::{RenameOperation, RenamerError};

/// Reject a batch before anything on disk is touched
pub fn check(operations: &[&RenameOperation]) -> Result<(), RenamerError> {
    check_names(operations)?;
    check_duplicates(operations)?;
    check_conflicts(operations)
}

/// Targets must be plain names inside the folder the entry already lives in
fn check_names(operations: &[&RenameOperation]) -> Result<(), RenamerError> {
    let invalid: Vec<String> = operations
        .iter()
        .filter(|op| {
            !is_valid_entry_name(&op.new_name)
                || op.new_path.parent() != op.old_path.parent()
                || op.new_path.file_name() != Some(OsStr::new(&op.new_name))
        })
        .map(|op| format!("{} → {:?}", op.old_name, op.new_name))
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(RenamerError::InvalidTargetNames(cap_names(invalid)))
    }
}

/// No two operations may land on the same path, compared case-insensitively
fn check_duplicates(operations: &[&RenameOperation]) -> Result<(), RenamerError> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();

    for op in operations {
        if !seen.insert(path_key(&op.new_path)) && !duplicates.contains(&op.new_name) {
            duplicates.push(op.new_name.clone());
        }
    }

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(RenamerError::DuplicateTargets(cap_names(duplicates)))
    }
}

/// A target may already exist only if it is itself being renamed away
fn check_conflicts(operations: &[&RenameOperation]) -> Result<(), RenamerError> {
    let sources: HashSet<String> = operations.iter().map(|op| path_key(&op.old_path)).collect();

    let conflicts: Vec<String> = operations
        .iter()
        .filter(|op| entry_exists(&op.new_path) && !sources.contains(&path_key(&op.new_path)))
        .map(|op| op.new_name.clone())
        .collect();

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(RenamerError::TargetConflicts(cap_names(conflicts)))
    }
}
