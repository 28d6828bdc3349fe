pub mod apply;
pub mod completions;
pub mod preview;
pub mod watch;

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use renamer::config::Settings;
use renamer::folder::{FolderSource, FolderSourceChain};
use renamer::PlanRequest;

/// Inputs shared by every command that plans renames
#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    /// Text or regex to look for in entry names (use "" for none)
    pub pattern: String,

    /// Replacement; with an empty pattern, "<text" prepends and ">text" appends
    pub replacement: String,

    /// Folder whose direct entries are renamed (defaults to $RENAMER_FOLDER, then the current directory)
    #[arg(short = 'd', long)]
    pub folder: Option<PathBuf>,

    /// Treat the pattern as a regular expression
    #[arg(short, long, conflicts_with = "literal")]
    pub regex: bool,

    /// Treat the pattern as plain text even if the config enables regex
    #[arg(long)]
    pub literal: bool,

    /// Match without regard to case
    #[arg(short, long, conflicts_with = "match_case")]
    pub ignore_case: bool,

    /// Match case exactly even if the config ignores case
    #[arg(long)]
    pub match_case: bool,
}

impl RenameArgs {
    /// Build the planning request, filling gaps from settings and the folder sources
    pub fn to_request(&self, settings: &Settings, preview_cap: usize) -> Result<PlanRequest> {
        let folder = match &self.folder {
            Some(folder) => folder.clone(),
            None => FolderSourceChain::standard()
                .candidate_folder(false)
                .ok_or_else(|| anyhow::anyhow!("No folder given and no usable default folder"))?,
        };

        let use_regex = self.regex || (settings.use_regex && !self.literal);
        let ignore_case = self.ignore_case || (settings.ignore_case && !self.match_case);

        Ok(PlanRequest::new(folder.to_string_lossy(), &self.pattern, &self.replacement)
            .regex(use_regex)
            .ignore_case(ignore_case)
            .preview_cap(preview_cap))
    }
}
