use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Maximum number of offending names listed in a validation message
pub const MAX_LISTED_NAMES: usize = 10;

/// Coarse classification of engine failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad folder or pattern; detected before anything is read or touched
    Input,
    /// Planned names collide or are unusable; nothing was renamed
    Validation,
    /// A rename call failed while executing; staged entries were rolled back
    Io,
}

#[derive(Error, Debug)]
pub enum RenamerError {
    #[error("Specify a folder.")]
    FolderNotSpecified,

    #[error("Folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("Failed to read folder contents.")]
    FolderUnreadable(#[source] walkdir::Error),

    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),

    #[error("Duplicate names after replacement:\n{}", .0.join("\n"))]
    DuplicateTargets(Vec<String>),

    #[error("These entries already exist:\n{}", .0.join("\n"))]
    TargetConflicts(Vec<String>),

    #[error("Invalid target names:\n{}", .0.join("\n"))]
    InvalidTargetNames(Vec<String>),

    #[error("Failed to move {name} to a temporary name: {source}")]
    Stage {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to finish renaming to {name}: {source}")]
    Commit {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ErrorKind {
    /// Process exit status for a failed `apply`
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Input => 2,
            ErrorKind::Validation => 3,
            ErrorKind::Io => 4,
        }
    }
}

impl RenamerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenamerError::FolderNotSpecified
            | RenamerError::FolderNotFound(_)
            | RenamerError::FolderUnreadable(_)
            | RenamerError::InvalidRegex(_) => ErrorKind::Input,
            RenamerError::DuplicateTargets(_)
            | RenamerError::TargetConflicts(_)
            | RenamerError::InvalidTargetNames(_) => ErrorKind::Validation,
            RenamerError::Stage { .. } | RenamerError::Commit { .. } => ErrorKind::Io,
        }
    }
}

/// Keep at most [`MAX_LISTED_NAMES`] entries for display
pub fn cap_names(mut names: Vec<String>) -> Vec<String> {
    names.truncate(MAX_LISTED_NAMES);
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_lists_names() {
        let err = RenamerError::TargetConflicts(vec!["b.txt".to_string(), "c.txt".to_string()]);
        assert_eq!(err.to_string(), "These entries already exist:\nb.txt\nc.txt");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_cap_names() {
        let names: Vec<String> = (0..25).map(|i| format!("f{}", i)).collect();
        let capped = cap_names(names);
        assert_eq!(capped.len(), MAX_LISTED_NAMES);
        assert_eq!(capped[0], "f0");
    }

    #[test]
    fn test_stage_error_kind() {
        let err = RenamerError::Stage {
            name: "a.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("a.txt"));
    }
}
