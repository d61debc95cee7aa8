//! CLI for the fcap capture hook.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fcap_core::config::{self, CaptureConfig};
use std::path::PathBuf;

use commands::{run_extract, run_init, run_replay};

/// Top-level CLI for fcap.
#[derive(Debug, Parser)]
#[command(name = "fcap")]
#[command(
    about = "fcap: save GraphQL JSON, PNG images and oversized-response headers from captured traffic",
    long_about = None
)]
pub struct Cli {
    /// Config file to use instead of ~/.config/fcap/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Create the JSON, PNG and header output directories.
    Init {
        /// Base directory for the output dirs (default: current directory).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Feed every entry of a HAR file through the capture hook.
    Replay {
        /// Path to the HAR file.
        path: PathBuf,

        /// Base directory for the output dirs (default: current directory).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Only capture bodies from hosts containing this substring.
        #[arg(long)]
        domain: Option<String>,

        /// Use the strict multipart reader instead of the heuristic.
        #[arg(long)]
        strict: bool,
    },

    /// Print the JSON payload embedded in a response body.
    Extract {
        /// File holding the raw body, or `-` for stdin.
        path: String,

        /// Use the strict multipart reader instead of the heuristic.
        #[arg(long)]
        strict: bool,

        /// Re-serialize the payload with two-space indentation.
        #[arg(long)]
        pretty: bool,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Init { output_dir } => run_init(&cfg, output_dir.as_deref())?,
            CliCommand::Replay {
                path,
                output_dir,
                domain,
                strict,
            } => run_replay(cfg, &path, output_dir.as_deref(), domain, strict)?,
            CliCommand::Extract {
                path,
                strict,
                pretty,
            } => run_extract(&cfg, &path, strict, pretty)?,
        }

        Ok(())
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<CaptureConfig> {
    match path {
        Some(path) => config::load_from(path),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
