use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::info;

use renamer::config::Settings;
use renamer::{execute, plan, ExecuteResult, ExecuteStatus, OutputFormat, OutputWriter};

use super::RenameArgs;

/// Exit status of `apply` when nothing failed
pub const EXIT_OK: i32 = 0;
/// Exit status when the plan was empty or the user declined
pub const EXIT_NOT_APPLIED: i32 = 1;

/// Returns the process exit status: [`EXIT_OK`] when the renames were applied
/// (or there was nothing to do), otherwise a code per failure kind
pub fn run(args: &RenameArgs, yes: bool, settings: &Settings, format: OutputFormat) -> Result<i32> {
    let writer = OutputWriter::new(format);

    if !yes {
        let preview = plan(&args.to_request(settings, settings.preview_limit)?);
        if preview.operations.is_empty() {
            writer.write_error(&preview.status)?;
            return Ok(EXIT_NOT_APPLIED);
        }

        writer.write_preview(&preview, settings.preview_limit)?;
        if !confirm(preview.total_count)? {
            println!("Aborted.");
            return Ok(EXIT_NOT_APPLIED);
        }
    }

    // Act on everything that matches right now, not just the rows shown above
    let result = plan(&args.to_request(settings, renamer::UNLIMITED)?);
    if result.operations.is_empty() {
        writer.write_error(&result.status)?;
        return Ok(EXIT_NOT_APPLIED);
    }

    info!("Applying {} planned renames", result.total_count);
    let outcome = execute(&result.operations);
    writer.write_execution(&outcome)?;
    Ok(exit_code(&outcome))
}

fn exit_code(outcome: &ExecuteResult) -> i32 {
    match (outcome.status, outcome.error_kind) {
        (ExecuteStatus::Error, Some(kind)) => kind.exit_code(),
        (ExecuteStatus::Error, None) => EXIT_NOT_APPLIED,
        (ExecuteStatus::Success | ExecuteStatus::NoChanges, _) => EXIT_OK,
    }
}

fn confirm(count: usize) -> Result<bool> {
    print!("\nRename {} entries? [y/N] ", count);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
