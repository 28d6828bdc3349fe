use anyhow::{Context, Result};
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment variables overriding settings, e.g. `RENAMER_PREVIEW_LIMIT`
pub const ENV_PREFIX: &str = "RENAMER";

/// Defaults for the command-line front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rows shown by `preview` and `watch`
    pub preview_limit: usize,
    pub use_regex: bool,
    pub ignore_case: bool,
    /// Quiet period before `watch` refreshes the preview
    pub debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preview_limit: 400,
            use_regex: false,
            ignore_case: false,
            debounce_ms: 300,
        }
    }
}

impl Settings {
    /// Defaults, then the user config file, then `explicit`, then the environment
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_layers(default_config_file().as_deref(), explicit, ENV_PREFIX)
    }

    fn load_layers(user_file: Option<&Path>, explicit: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Settings::default()).context("Failed to encode default settings")?,
        );

        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration values")?;

        tracing::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }
}

/// `<config dir>/renamer/config.toml` for the current user
pub fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "renamer").map(|dirs| dirs.config_dir().join("config.toml"))
}
