mod filters;

pub use filters::{is_relevant_change, is_staging_path};

use anyhow::{Context, Result};
use notify_debouncer_full::{
    new_debouncer,
    notify::{RecommendedWatcher, RecursiveMode, Watcher},
    DebounceEventResult, Debouncer, FileIdMap,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Debounced notifications about changes to a folder's direct children
pub struct FolderWatcher {
    folder: PathBuf,
    debouncer: Option<Debouncer<RecommendedWatcher, FileIdMap>>,
}

impl FolderWatcher {
    pub fn new(folder: PathBuf) -> Self {
        Self {
            folder,
            debouncer: None,
        }
    }

    /// Start watching; one message is sent per debounced burst of relevant events
    pub fn start(&mut self, debounce: Duration) -> Result<mpsc::UnboundedReceiver<()>> {
        if self.debouncer.is_some() {
            anyhow::bail!("Folder watcher already running");
        }

        info!(
            "Watching {} with {:?} debounce",
            self.folder.display(),
            debounce
        );

        let (change_tx, change_rx) = mpsc::unbounded_channel();
        let folder = self.folder.clone();

        let mut debouncer = new_debouncer(debounce, None, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let relevant = events
                        .iter()
                        .flat_map(|event| event.paths.iter())
                        .any(|path| is_relevant_change(&folder, path));
                    if relevant {
                        debug!("Folder contents changed");
                        if let Err(e) = change_tx.send(()) {
                            error!("Failed to send change notification: {}", e);
                        }
                    }
                }
                Err(errors) => {
                    for e in errors {
                        error!("Watch error: {}", e);
                    }
                }
            }
        })
        .context("Failed to create folder watcher")?;

        debouncer
            .watcher()
            .watch(&self.folder, RecursiveMode::NonRecursive)
            .context("Failed to start watching folder")?;

        self.debouncer = Some(debouncer);
        Ok(change_rx)
    }

    pub fn stop(&mut self) {
        if self.debouncer.take().is_none() {
            warn!("Folder watcher not running");
            return;
        }
        info!("Stopped watching {}", self.folder.display());
    }

    pub fn is_running(&self) -> bool {
        self.debouncer.is_some()
    }
}

impl Drop for FolderWatcher {
    fn drop(&mut self) {
        if self.is_running() {
            self.stop();
        }
    }
}
