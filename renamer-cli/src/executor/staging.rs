use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::core::paths::entry_exists;
use crate::core::{RenameOperation, RenamerError};

/// Marker placed between the original name and the token of a staging name
pub const TEMP_MARKER: &str = ".renamer_tmp_";

/// How many fresh tokens are tried when a staging name is already taken
const MAX_TOKEN_ATTEMPTS: usize = 8;

/// Source of unique tokens for staging names
pub trait TokenSource {
    fn next_token(&mut self) -> String;
}

/// Random UUIDv4 tokens in simple (hex) form
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokens;

impl TokenSource for UuidTokens {
    fn next_token(&mut self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

impl<F> TokenSource for F
where
    F: FnMut() -> String,
{
    fn next_token(&mut self) -> String {
        self()
    }
}

/// One entry moved out of the way during a rename batch
#[derive(Debug, Clone)]
pub struct StagedEntry {
    pub temp_path: PathBuf,
    pub old_path: PathBuf,
    pub target_path: PathBuf,
    pub name: String,
    /// Whether the entry already sits at `target_path`
    pub committed: bool,
}

/// Two-phase rename batch with all-or-nothing rollback
///
/// Every entry is first moved to a unique sibling name, then promoted to its
/// target. Going through the staging names breaks swaps, rotations and
/// case-only renames without ordering the operations.
#[derive(Debug, Default)]
pub struct RenameTransaction {
    entries: Vec<StagedEntry>,
}

impl RenameTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase 1: move `op.old_path` to a fresh staging name
    pub fn stage<T: TokenSource>(
        &mut self,
        op: &RenameOperation,
        tokens: &mut T,
    ) -> Result<(), RenamerError> {
        let stage_error = |source: io::Error| RenamerError::Stage {
            name: op.old_name.clone(),
            source,
        };

        let temp_path = self.free_temp_path(op, tokens).ok_or_else(|| {
            stage_error(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "no unused temporary name available",
            ))
        })?;

        fs::rename(&op.old_path, &temp_path).map_err(stage_error)?;
        debug!("Staged {} as {}", op.old_path.display(), temp_path.display());

        self.entries.push(StagedEntry {
            temp_path,
            old_path: op.old_path.clone(),
            target_path: op.new_path.clone(),
            name: op.new_name.clone(),
            committed: false,
        });
        Ok(())
    }

    /// Phase 2: promote every staged entry to its target, in staging order
    pub fn commit(&mut self) -> Result<usize, RenamerError> {
        for entry in &mut self.entries {
            let commit_error = |source: io::Error| RenamerError::Commit {
                name: entry.name.clone(),
                source,
            };

            // rename(2) silently replaces files, so never promote onto something
            // that appeared after validation
            if entry_exists(&entry.target_path) {
                return Err(commit_error(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "target already exists",
                )));
            }

            fs::rename(&entry.temp_path, &entry.target_path).map_err(commit_error)?;
            entry.committed = true;
            debug!("Committed {}", entry.target_path.display());
        }
        Ok(self.entries.len())
    }

    /// Put every entry back at its original path
    ///
    /// Committed entries return to their staging names first, so no entry is
    /// moved onto a path another entry still occupies. Failures are logged and
    /// reported as the number of entries left displaced.
    pub fn rollback(&mut self) -> usize {
        let mut stranded = 0;

        for entry in self.entries.iter_mut().rev().filter(|e| e.committed) {
            match fs::rename(&entry.target_path, &entry.temp_path) {
                Ok(()) => entry.committed = false,
                Err(e) => warn!(
                    "Rollback could not unstage {}: {}",
                    entry.target_path.display(),
                    e
                ),
            }
        }

        for entry in self.entries.iter().rev() {
            if entry.committed {
                stranded += 1;
                continue;
            }
            if !entry_exists(&entry.temp_path) {
                warn!("Rollback lost track of {}", entry.temp_path.display());
                stranded += 1;
                continue;
            }
            if entry_exists(&entry.old_path) {
                warn!(
                    "Rollback left {} in place: {} is occupied",
                    entry.temp_path.display(),
                    entry.old_path.display()
                );
                stranded += 1;
                continue;
            }
            if let Err(e) = fs::rename(&entry.temp_path, &entry.old_path) {
                warn!(
                    "Rollback could not restore {} from {}: {}",
                    entry.old_path.display(),
                    entry.temp_path.display(),
                    e
                );
                stranded += 1;
            }
        }

        stranded
    }

    pub fn entries(&self) -> &[StagedEntry] {
        &self.entries
    }

    fn free_temp_path<T: TokenSource>(&self, op: &RenameOperation, tokens: &mut T) -> Option<PathBuf> {
        let base = op.old_path.as_os_str();
        (0..MAX_TOKEN_ATTEMPTS)
            .map(|_| {
                let mut name = base.to_os_string();
                name.push(TEMP_MARKER);
                name.push(tokens.next_token());
                PathBuf::from(name)
            })
            .find(|candidate| {
                !entry_exists(candidate) && !self.entries.iter().any(|e| &e.temp_path == candidate)
            })
    }
}
