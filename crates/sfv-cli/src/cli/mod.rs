//! CLI for the sfv manifest verifier.

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sfv_core::config;
use sfv_core::logging::Verbosity;
use std::path::PathBuf;

use commands::{run_checksum, run_create, run_list, run_verify, VerifyArgs};

/// Top-level CLI for sfv.
#[derive(Debug, Parser)]
#[command(name = "sfv")]
#[command(about = "sfv: verify files against CRC32 .sfv manifests", long_about = None)]
pub struct Cli {
    /// Log every verified file (to the log file, or stderr as fallback).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Verify the files listed in a manifest.
    Verify {
        /// Path to the .sfv manifest.
        manifest: PathBuf,
        /// Accept manifests without a .sfv extension.
        #[arg(long)]
        no_extension_check: bool,
        /// Print the verified records as JSON instead of per-file lines.
        #[arg(long)]
        json: bool,
        /// Only print failures and the summary.
        #[arg(long, short)]
        quiet: bool,
    },

    /// Checksum files and write a new manifest.
    ///
    /// Files are recorded by name only, so they must sit in the manifest's
    /// directory; the command fails otherwise.
    Create {
        /// Manifest to write.
        output: PathBuf,
        /// Files to add, in order; all in the same directory as OUTPUT.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Replace the output file if it exists.
        #[arg(long)]
        force: bool,
    },

    /// Show the records of a manifest without verifying them.
    List {
        /// Path to the .sfv manifest.
        manifest: PathBuf,
        /// Accept manifests without a .sfv extension.
        #[arg(long)]
        no_extension_check: bool,
    },

    /// Compute the CRC32 of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl Cli {
    /// Logging verbosity: `--verbose` wins, `verify --quiet` drops to warnings.
    pub fn verbosity(&self) -> Verbosity {
        match &self.command {
            _ if self.verbose => Verbosity::Verbose,
            CliCommand::Verify { quiet: true, .. } => Verbosity::Quiet,
            _ => Verbosity::Normal,
        }
    }

    /// Run the parsed command. `Ok(false)` means the command ran but found
    /// failures (exit status 1).
    pub async fn run(self) -> Result<bool> {
        let mut cfg = config::load_or_init().unwrap_or_else(|err| {
            tracing::warn!("using default config: {:#}", err);
            config::SfvConfig::default()
        });
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Verify {
                manifest,
                no_extension_check,
                json,
                quiet,
            } => {
                if no_extension_check {
                    cfg.require_sfv_extension = false;
                }
                run_verify(cfg, &manifest, VerifyArgs { json, quiet }).await
            }
            CliCommand::Create {
                output,
                files,
                force,
            } => run_create(cfg, &output, files, force).await,
            CliCommand::List {
                manifest,
                no_extension_check,
            } => {
                if no_extension_check {
                    cfg.require_sfv_extension = false;
                }
                run_list(&cfg, &manifest)
            }
            CliCommand::Checksum { path } => run_checksum(&cfg, &path),
        }
    }
}

#[cfg(test)]
mod tests;
