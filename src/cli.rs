use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hygeia epidemic-forecast dashboard preprocessor.
#[derive(Parser)]
#[command(
    name = "hygeia",
    version,
    about = "Preprocessing pipeline for the epidemic-forecast dashboard"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the full preprocessing pipeline and write both dashboard documents.
    Process(ProcessArgs),
    /// Print the season and dynamic-period partitioning without writing output.
    Seasons(SeasonsArgs),
}

/// Arguments for the `process` subcommand.
#[derive(clap::Args)]
pub struct ProcessArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "hygeia.toml")]
    pub config: PathBuf,

    /// Override data repository root from config.
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Override core document output path from config.
    #[arg(long)]
    pub core_output: Option<PathBuf>,

    /// Override evaluations document output path from config.
    #[arg(long)]
    pub evaluations_output: Option<PathBuf>,
}

/// Arguments for the `seasons` subcommand.
#[derive(clap::Args)]
pub struct SeasonsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "hygeia.toml")]
    pub config: PathBuf,

    /// Override data repository root from config.
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}
