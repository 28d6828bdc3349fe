use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use renamer::config::Settings;
use renamer::OutputFormat;

mod commands;

use commands::RenameArgs;

#[derive(Parser)]
#[command(name = "renamer")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Batch rename the entries of a folder by pattern",
    long_about = "Renames the files and directories directly inside one folder. Names are \
                  matched by plain text or regular expression, every change is previewed \
                  first, and a batch is applied all-or-nothing."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, markdown)
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Extra configuration file layered over the user config
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what would be renamed without touching anything
    Preview {
        #[command(flatten)]
        args: RenameArgs,

        /// Maximum rows to show (defaults to the configured preview limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Rename every matching entry
    Apply {
        #[command(flatten)]
        args: RenameArgs,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Keep the preview up to date while the folder changes
    Watch {
        #[command(flatten)]
        args: RenameArgs,

        /// Maximum rows to show (defaults to the configured preview limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    let default_filter = if cli.verbose { "renamer=debug" } else { "renamer=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Preview { args, limit } => {
            commands::preview::run(&args, limit, &settings, cli.format)?
        }
        Commands::Apply { args, yes } => {
            let code = commands::apply::run(&args, yes, &settings, cli.format)?;
            if code != commands::apply::EXIT_OK {
                std::process::exit(code);
            }
        }
        Commands::Watch { args, limit } => {
            commands::watch::run(&args, limit, &settings, cli.format).await?
        }
        Commands::Completions { shell } => commands::completions::run(shell),
    }

    Ok(())
}
