//! Collect command implementation.
//!
//! The collect command:
//! 1. Loads the collector configuration
//! 2. Loads a dumped block trace
//! 3. Runs one collection cycle
//! 4. Writes the profile under its request token

use crate::collector::{BlockCollector, CollectStatus, RequestContext, ResponseContext};
use crate::output::{generate_token, profile_path, write_profile, Profile};
use crate::parser::FileTraceProvider;
use crate::report::generate_text_summary;
use crate::utils::config::{CollectorConfig, ContainerTypes};
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

/// Arguments for the collect command
#[derive(Debug, Clone)]
pub struct CollectArgs {
    /// JSON dump of the request's block trace
    pub trace: PathBuf,

    /// Collector configuration file
    pub config: Option<PathBuf>,

    /// Container types overriding the configuration
    pub containers: Vec<String>,

    /// Request token (generated when absent)
    pub token: Option<String>,

    /// Directory profiles are stored in
    pub output_dir: PathBuf,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for CollectArgs {
    fn default() -> Self {
        Self {
            trace: PathBuf::from("trace.json"),
            config: None,
            containers: Vec::new(),
            token: None,
            output_dir: PathBuf::from("profiles"),
            print_summary: false,
        }
    }
}

/// Execute the collect command
///
/// Returns the path the profile was written to.
pub fn execute_collect(args: CollectArgs) -> Result<PathBuf> {
    let container_types = resolve_container_types(&args)?;
    info!("Using {} container types", container_types.len());

    let provider = FileTraceProvider::load(&args.trace)
        .with_context(|| format!("Failed to load trace {}", args.trace.display()))?;

    let mut collector = BlockCollector::new(provider, container_types);
    collector.collect(
        &RequestContext::new("GET", args.trace.display().to_string()),
        &ResponseContext::default(),
        None,
    );

    if let CollectStatus::Partial { malformed_id } = collector.status() {
        warn!(
            "Trace entry '{}' is malformed; profile holds partial data",
            malformed_id
        );
    }

    let token = args.token.clone().unwrap_or_else(generate_token);
    let path = profile_path(&args.output_dir, &token).context("Invalid profile token")?;

    let profile =
        Profile::new(&token, collector.snapshot()).context("Failed to encode snapshot")?;
    write_profile(&profile, &path).context("Failed to write profile")?;

    info!("✓ Profile {} written to: {}", token, path.display());

    if args.print_summary {
        println!("{}", generate_text_summary(collector.snapshot()));
    }

    Ok(path)
}

/// Command-line container types win over the configuration file
fn resolve_container_types(args: &CollectArgs) -> Result<ContainerTypes> {
    if !args.containers.is_empty() {
        return Ok(ContainerTypes::new(args.containers.iter().cloned()));
    }

    let config = CollectorConfig::load(args.config.as_deref())
        .context("Failed to load collector config")?;
    Ok(config.container_types())
}
