use std::path::PathBuf;
use tracing::debug;

/// Environment variable a launcher can set to point at the folder the user is looking at
pub const FOLDER_ENV: &str = "RENAMER_FOLDER";

/// Supplies the folder to prefill when none was given explicitly
pub trait FolderSource {
    /// `prefer_active_only` asks for a folder the user is actively viewing,
    /// skipping ambient fallbacks such as the working directory
    fn candidate_folder(&self, prefer_active_only: bool) -> Option<PathBuf>;
}

/// Folder named by an environment variable
#[derive(Debug, Clone)]
pub struct EnvFolderSource {
    var: String,
}

impl EnvFolderSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvFolderSource {
    fn default() -> Self {
        Self::new(FOLDER_ENV)
    }
}

impl FolderSource for EnvFolderSource {
    fn candidate_folder(&self, _prefer_active_only: bool) -> Option<PathBuf> {
        std::env::var_os(&self.var)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }
}

/// The process working directory; never considered "active"
#[derive(Debug, Default, Clone, Copy)]
pub struct CurrentDirSource;

impl FolderSource for CurrentDirSource {
    fn candidate_folder(&self, prefer_active_only: bool) -> Option<PathBuf> {
        if prefer_active_only {
            return None;
        }
        std::env::current_dir().ok()
    }
}

/// A folder chosen up front, e.g. from a command-line flag
#[derive(Debug, Clone)]
pub struct FixedFolderSource(pub PathBuf);

impl FolderSource for FixedFolderSource {
    fn candidate_folder(&self, _prefer_active_only: bool) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Tries each source in order and keeps the first existing directory
#[derive(Default)]
pub struct FolderSourceChain {
    sources: Vec<Box<dyn FolderSource>>,
}

impl FolderSourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl FolderSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Environment hint first, then the working directory
    pub fn standard() -> Self {
        Self::new().with(EnvFolderSource::default()).with(CurrentDirSource)
    }
}

impl FolderSource for FolderSourceChain {
    fn candidate_folder(&self, prefer_active_only: bool) -> Option<PathBuf> {
        self.sources
            .iter()
            .filter_map(|source| source.candidate_folder(prefer_active_only))
            .find(|path| {
                let usable = path.is_dir();
                if !usable {
                    debug!("Ignoring folder candidate {}", path.display());
                }
                usable
            })
    }
}
