use crate::core::types::*;
use anyhow::Result;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn write_preview(&self, result: &CollectResult, limit: usize) -> Result<()> {
        println!("{}", self.render_preview(result, limit)?);
        Ok(())
    }

    pub fn write_execution(&self, result: &ExecuteResult) -> Result<()> {
        println!("{}", self.render_execution(result)?);
        Ok(())
    }

    /// Render a plan as old/new name columns with the status line
    pub fn render_preview(&self, result: &CollectResult, limit: usize) -> Result<String> {
        let status = preview_status(result, limit);

        match self.format {
            OutputFormat::Json => {
                #[derive(Serialize)]
                struct PreviewResponse<'a> {
                    status: &'a str,
                    total_count: usize,
                    hidden_count: usize,
                    operations: &'a [RenameOperation],
                }
                Ok(serde_json::to_string_pretty(&PreviewResponse {
                    status: &status,
                    total_count: result.total_count,
                    hidden_count: result.hidden_count(),
                    operations: &result.operations,
                })?)
            }
            OutputFormat::Text => {
                let mut output = String::new();
                output.push_str(&status);
                output.push('\n');

                let rows: Vec<(String, String)> = result
                    .operations
                    .iter()
                    .map(|op| {
                        (
                            display_name(&op.old_name, op.is_directory),
                            display_name(&op.new_name, op.is_directory),
                        )
                    })
                    .collect();
                let width = rows.iter().map(|(old, _)| old.chars().count()).max().unwrap_or(0);

                for (old, new) in &rows {
                    let marker = if old == new { " " } else { "→" };
                    output.push_str(&format!("\n  {:<width$}  {}  {}", old, marker, new, width = width));
                }

                if result.is_truncated() {
                    output.push_str(&format!("\n  ... and {} more entries", result.hidden_count()));
                }
                Ok(output)
            }
            OutputFormat::Markdown => {
                let mut output = String::from("# Rename Preview\n\n");
                output.push_str(&format!("{}\n", status));
                if !result.operations.is_empty() {
                    output.push_str("\n| Current | New |\n|---------|-----|\n");
                    for op in &result.operations {
                        output.push_str(&format!(
                            "| `{}` | `{}` |\n",
                            display_name(&op.old_name, op.is_directory),
                            display_name(&op.new_name, op.is_directory)
                        ));
                    }
                }
                if result.is_truncated() {
                    output.push_str(&format!("\n_... and {} more entries_\n", result.hidden_count()));
                }
                Ok(output)
            }
        }
    }

    pub fn render_execution(&self, result: &ExecuteResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Text => Ok(match result.status {
                ExecuteStatus::Success => format!("✓ Renamed {} entries", result.renamed_count),
                ExecuteStatus::NoChanges => result.message.clone(),
                ExecuteStatus::Error => format!("❌ {}", result.message),
            }),
            OutputFormat::Markdown => Ok(match result.status {
                ExecuteStatus::Success => format!("**Done:** renamed {} entries", result.renamed_count),
                ExecuteStatus::NoChanges => format!("**Done:** {}", result.message),
                ExecuteStatus::Error => format!("**Error:**\n\n```\n{}\n```", result.message),
            }),
        }
    }

    pub fn write_error(&self, error: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                #[derive(Serialize)]
                struct ErrorResponse {
                    error: String,
                }
                println!(
                    "{}",
                    serde_json::to_string_pretty(&ErrorResponse {
                        error: error.to_string()
                    })?
                );
            }
            OutputFormat::Text | OutputFormat::Markdown => {
                eprintln!("Error: {}", error);
            }
        }
        Ok(())
    }
}

fn display_name(name: &str, is_directory: bool) -> String {
    if is_directory {
        format!("{}/", name)
    } else {
        name.to_string()
    }
}

fn preview_status(result: &CollectResult, limit: usize) -> String {
    if result.is_truncated() {
        format!(
            "{}. Shown: {} (limit {}).",
            result.status,
            result.operations.len(),
            limit
        )
    } else {
        result.status.clone()
    }
}
