//! Block Profiler CLI
//!
//! Runs the block collector over dumped request traces and reads the
//! stored profiles back for inspection.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use block_profiler::commands::{execute_collect, execute_show, CollectArgs};
use block_profiler::utils::config::SNAPSHOT_VERSION;

/// Block Profiler - block rendering traces for the web profiler
#[derive(Parser, Debug)]
#[command(name = "block-profiler")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a request's block trace and store the profile
    Collect {
        /// JSON dump of the block trace
        #[arg(short, long)]
        trace: PathBuf,

        /// Collector configuration file
        #[arg(short, long, env = "BLOCK_PROFILER_CONFIG")]
        config: Option<PathBuf>,

        /// Container block type (repeatable, overrides the config file)
        #[arg(long = "container")]
        containers: Vec<String>,

        /// Request token to store the profile under
        #[arg(long)]
        token: Option<String>,

        /// Directory profiles are stored in
        #[arg(short, long, default_value = "profiles")]
        output_dir: PathBuf,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Display a stored profile
    Show {
        /// Path to profile JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Collect {
            trace,
            config,
            containers,
            token,
            output_dir,
            summary,
        } => {
            let args = CollectArgs {
                trace,
                config,
                containers,
                token,
                output_dir,
                print_summary: summary,
            };

            execute_collect(args)?;
        }

        Commands::Show { file } => {
            println!("{}", execute_show(&file)?);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

fn display_version() {
    println!("Block Profiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Profile Schema: v{}", SNAPSHOT_VERSION);
}
