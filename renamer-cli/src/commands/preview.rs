use anyhow::Result;

use renamer::config::Settings;
use renamer::{plan, OutputFormat, OutputWriter};

use super::RenameArgs;

pub fn run(args: &RenameArgs, limit: Option<usize>, settings: &Settings, format: OutputFormat) -> Result<()> {
    let limit = limit.unwrap_or(settings.preview_limit);
    let request = args.to_request(settings, limit)?;

    let result = plan(&request);
    OutputWriter::new(format).write_preview(&result, limit)
}
