//! Pattern-driven batch renaming of the entries of a single folder.
//!
//! [`plan`] computes a preview of the renames without touching the disk;
//! [`execute`] applies a plan with two-phase staging and full rollback.

pub mod config;
pub mod core;
pub mod executor;
pub mod folder;
pub mod planner;
pub mod watcher;

pub use crate::core::{
    CollectResult, ErrorKind, ExecuteResult, ExecuteStatus, OutputFormat, OutputWriter,
    RenameOperation, RenamerError,
};
pub use executor::{execute, Executor, TokenSource, UuidTokens};
pub use folder::{FolderSource, FolderSourceChain};
pub use planner::{plan, PlanRequest, RenameMode, UNLIMITED};
