//! CLI for the smartdl downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use smartdl_core::agent::DownloadAgent;
use smartdl_core::config;
use std::path::PathBuf;

use commands::{run_batch, run_call, run_get, run_list, run_tools};

/// Top-level CLI for smartdl.
#[derive(Debug, Parser)]
#[command(name = "smartdl")]
#[command(
    about = "smartdl: download URLs with landing-page resolution and context-aware filenames",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a single URL.
    Get {
        /// URL to download (landing pages are followed to their download link).
        url: String,
        /// Title or description used to name the file.
        #[arg(long)]
        context: Option<String>,
        /// Target directory (default: configured download directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Exact filename to save as.
        #[arg(long)]
        filename: Option<String>,
        /// Print the tool result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Download several URLs one after another.
    Batch {
        /// URLs to download.
        #[arg(required = true)]
        urls: Vec<String>,
        /// Context per URL, in order; give it once per URL or not at all.
        #[arg(long = "context", value_name = "TEXT")]
        contexts: Vec<String>,
        /// Target directory (default: configured download directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Print the tool result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List files in the download directory.
    List {
        /// Directory to list (default: configured download directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Glob pattern; `**` descends into subdirectories.
        #[arg(long, default_value = "*")]
        pattern: String,
        /// Print the tool result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the agent tool definitions as JSON.
    Tools,

    /// Run an agent tool and print its JSON result.
    Call {
        /// Tool name (see `smartdl tools`).
        tool: String,
        /// Tool arguments as a JSON object.
        #[arg(default_value = "{}")]
        args: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let agent = DownloadAgent::from_config(&cfg);

        match cli.command {
            CliCommand::Get {
                url,
                context,
                dir,
                filename,
                json,
            } => run_get(&agent, url, context, dir, filename, json)?,
            CliCommand::Batch {
                urls,
                contexts,
                dir,
                json,
            } => run_batch(&agent, urls, contexts, dir, json)?,
            CliCommand::List { dir, pattern, json } => run_list(&agent, dir, pattern, json)?,
            CliCommand::Tools => run_tools(&agent)?,
            CliCommand::Call { tool, args } => run_call(&agent, &tool, &args)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
