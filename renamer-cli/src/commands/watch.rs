use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use renamer::config::Settings;
use renamer::watcher::FolderWatcher;
use renamer::{plan, OutputFormat, OutputWriter};

use super::RenameArgs;

pub async fn run(
    args: &RenameArgs,
    limit: Option<usize>,
    settings: &Settings,
    format: OutputFormat,
) -> Result<()> {
    let limit = limit.unwrap_or(settings.preview_limit);
    let request = args.to_request(settings, limit)?;
    let folder = PathBuf::from(request.folder.trim())
        .canonicalize()
        .with_context(|| format!("Folder not found: {}", request.folder.trim()))?;
    let writer = OutputWriter::new(format);

    println!("🔭 Watching: {}", folder.display());
    println!("   Press Ctrl+C to stop\n");
    writer.write_preview(&plan(&request), limit)?;

    let mut watcher = FolderWatcher::new(folder);
    let mut changes = watcher.start(Duration::from_millis(settings.debounce_ms))?;

    loop {
        tokio::select! {
            change = changes.recv() => {
                if change.is_none() {
                    break;
                }
                info!("Refreshing preview");
                println!("\n----------------------------------------\n");
                writer.write_preview(&plan(&request), limit)?;
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\nStopping watcher...");
                break;
            }
        }
    }

    watcher.stop();
    Ok(())
}
