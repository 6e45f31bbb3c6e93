//! CLI for the aipdl chart downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use aipdl_core::config;
use std::path::PathBuf;

use commands::{run_checksum, run_config, run_merge, run_pipeline, run_plan, RunOverrides};

/// Top-level CLI for aipdl.
#[derive(Debug, Parser)]
#[command(name = "aipdl")]
#[command(about = "aipdl: download AIP airport charts and merge them per airport", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every airport of a manifest and write its merged PDFs.
    Run {
        /// TOML manifest describing the document and its airports.
        #[arg(long, short = 'm')]
        manifest: PathBuf,
        /// Re-download every unit even if the local copy is current.
        #[arg(long)]
        force: bool,
        /// Fetch workers shared by all airports (overrides config).
        #[arg(long, value_name = "N")]
        workers: Option<usize>,
        /// Root of the download tree (overrides config).
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        /// Only these airports (repeatable).
        #[arg(long = "airport", short = 'a', value_name = "CODE")]
        airports: Vec<String>,
    },

    /// Show what a run would fetch and what it would keep, without downloading.
    Plan {
        #[arg(long, short = 'm')]
        manifest: PathBuf,
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Merge one airport from its local files only.
    Merge {
        #[arg(long, short = 'm')]
        manifest: PathBuf,
        /// Airport code, e.g. RJAA.
        #[arg(long)]
        airport: String,
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Print the SHA-256 and size of a file, as recorded in summary.json.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print the config and log file paths and the effective configuration.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                manifest,
                force,
                workers,
                root,
                airports,
            } => {
                let overrides = RunOverrides {
                    force,
                    workers,
                    root,
                    airports,
                };
                run_pipeline(&mut cfg, &manifest, overrides).await?;
            }
            CliCommand::Plan { manifest, root } => {
                if let Some(root) = root {
                    cfg.root_dir = root;
                }
                run_plan(&cfg, &manifest).await?;
            }
            CliCommand::Merge {
                manifest,
                airport,
                root,
            } => {
                if let Some(root) = root {
                    cfg.root_dir = root;
                }
                run_merge(&cfg, &manifest, &airport)?;
            }
            CliCommand::Checksum { path } => run_checksum(&path)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
