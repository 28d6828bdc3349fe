use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::error::{ErrorKind, RenamerError};

/// One candidate rename inside the target folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOperation {
    /// Current absolute location of the entry
    pub old_path: PathBuf,

    /// Computed absolute location, always a sibling of `old_path`
    pub new_path: PathBuf,

    /// File name component of `old_path`
    pub old_name: String,

    /// File name component of `new_path`
    pub new_name: String,

    pub is_directory: bool,
}

impl RenameOperation {
    /// Whether applying this operation would actually move anything
    pub fn is_change(&self) -> bool {
        self.old_path != self.new_path
    }
}

/// Output of planning: a possibly capped preview plus the true match count
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectResult {
    /// Accepted operations in ordinal order of the original names
    pub operations: Vec<RenameOperation>,

    /// Human-readable summary of the mode and counts, or the input error
    pub status: String,

    /// Number of accepted entries, independent of the preview cap
    pub total_count: usize,
}

impl CollectResult {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            operations: Vec::new(),
            status: status.into(),
            total_count: 0,
        }
    }

    /// Number of accepted entries that did not fit under the preview cap
    pub fn hidden_count(&self) -> usize {
        self.total_count.saturating_sub(self.operations.len())
    }

    pub fn is_truncated(&self) -> bool {
        self.hidden_count() > 0
    }
}

/// Terminal state of an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteStatus {
    Success,
    NoChanges,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResult {
    pub status: ExecuteStatus,

    /// Empty on success, otherwise the detail shown to the user
    pub message: String,

    /// Entries actually renamed; zero unless `status` is `Success`
    pub renamed_count: usize,

    /// Set when `status` is `Error` and the cause came from the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl ExecuteResult {
    pub fn success(renamed_count: usize) -> Self {
        Self {
            status: ExecuteStatus::Success,
            message: String::new(),
            renamed_count,
            error_kind: None,
        }
    }

    pub fn no_changes(message: impl Into<String>) -> Self {
        Self {
            status: ExecuteStatus::NoChanges,
            message: message.into(),
            renamed_count: 0,
            error_kind: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ExecuteStatus::Error,
            message: message.into(),
            renamed_count: 0,
            error_kind: None,
        }
    }

    pub fn failed(error: &RenamerError) -> Self {
        Self {
            error_kind: Some(error.kind()),
            ..Self::error(error.to_string())
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExecuteStatus::Success
    }
}
