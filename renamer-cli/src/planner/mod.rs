//! Rename planning: lists the folder, matches names and computes targets.
//!
//! Planning never mutates the filesystem. Every failure ends up in
//! [`CollectResult::status`] with an empty operation list.

pub mod matcher;
pub mod mode;

pub use matcher::NameMatcher;
pub use mode::RenameMode;

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::core::paths::normalize;
use crate::core::{CollectResult, RenameOperation, RenamerError};

/// Preview cap meaning "return every operation"
pub const UNLIMITED: usize = 0;

/// Inputs of a single planning call
#[derive(Debug, Clone, Default)]
pub struct PlanRequest {
    /// Target folder as typed; surrounding whitespace is ignored
    pub folder: String,
    pub pattern: String,
    /// Literal text, regex template, or `<text`/`>text` when the pattern is empty
    pub replacement: String,
    pub use_regex: bool,
    pub ignore_case: bool,
    /// Maximum operations returned; [`UNLIMITED`] returns all of them
    pub preview_cap: usize,
}

impl PlanRequest {
    pub fn new(folder: impl Into<String>, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
            ..Self::default()
        }
    }

    pub fn regex(mut self, use_regex: bool) -> Self {
        self.use_regex = use_regex;
        self
    }

    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn preview_cap(mut self, cap: usize) -> Self {
        self.preview_cap = cap;
        self
    }

    /// Same request without a cap, as used right before executing
    pub fn uncapped(&self) -> Self {
        Self {
            preview_cap: UNLIMITED,
            ..self.clone()
        }
    }
}

#[derive(Debug)]
struct Entry {
    name: String,
    is_directory: bool,
}

/// Compute the rename plan for `request`
pub fn plan(request: &PlanRequest) -> CollectResult {
    match try_plan(request) {
        Ok(result) => result,
        Err(e) => {
            debug!("Planning stopped: {}", e);
            CollectResult::with_status(e.to_string())
        }
    }
}

fn try_plan(request: &PlanRequest) -> Result<CollectResult, RenamerError> {
    let folder = request.folder.trim();
    if folder.is_empty() {
        return Err(RenamerError::FolderNotSpecified);
    }

    let folder_path = normalize(&PathBuf::from(folder));
    if !folder_path.is_dir() {
        return Err(RenamerError::FolderNotFound(folder_path));
    }

    let mode = RenameMode::select(
        &request.pattern,
        &request.replacement,
        request.use_regex,
        request.ignore_case,
    )?;
    debug!("Planning in {} ({} mode)", folder_path.display(), mode.name());

    let entries = list_entries(&folder_path)?;

    let mut result = CollectResult::default();
    for entry in &entries {
        let Some(new_name) = mode.rename(&entry.name, entry.is_directory) else {
            continue;
        };

        result.total_count += 1;
        if request.preview_cap == UNLIMITED || result.operations.len() < request.preview_cap {
            result.operations.push(RenameOperation {
                old_path: folder_path.join(&entry.name),
                new_path: folder_path.join(&new_name),
                old_name: entry.name.clone(),
                new_name,
                is_directory: entry.is_directory,
            });
        }
    }

    result.status = mode.summary(result.total_count);
    debug!(
        "{} of {} entries accepted, {} returned",
        result.total_count,
        entries.len(),
        result.operations.len()
    );
    Ok(result)
}

/// Direct children that are regular files or directories, in ordinal name order
fn list_entries(folder: &Path) -> Result<Vec<Entry>, RenamerError> {
    let mut entries = Vec::new();

    for item in WalkDir::new(folder).min_depth(1).max_depth(1).follow_links(false) {
        let item = match item {
            Ok(item) => item,
            Err(e) if e.depth() == 0 => return Err(RenamerError::FolderUnreadable(e)),
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let file_type = item.file_type();
        if !file_type.is_file() && !file_type.is_dir() {
            continue;
        }

        match item.file_name().to_str() {
            Some(name) => entries.push(Entry {
                name: name.to_string(),
                is_directory: file_type.is_dir(),
            }),
            None => debug!("Skipping non UTF-8 name: {:?}", item.file_name()),
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
