//! Show command implementation.
//!
//! Loads a stored profile back into a block collector, the way the
//! profiler panel does, and prints its report.

use crate::collector::{BlockCollector, DataCollector};
use crate::output::read_profile;
use crate::parser::StaticTraceProvider;
use crate::report::generate_text_summary;
use crate::utils::config::{ContainerTypes, COLLECTOR_NAME};
use anyhow::{Context, Result};
use std::path::Path;

/// Execute the show command
pub fn execute_show(file: &Path) -> Result<String> {
    let profile = read_profile(file)
        .with_context(|| format!("Failed to read profile {}", file.display()))?;

    if profile.collector != COLLECTOR_NAME {
        anyhow::bail!(
            "Profile belongs to collector '{}', expected '{}'",
            profile.collector,
            COLLECTOR_NAME
        );
    }

    let mut collector =
        BlockCollector::new(StaticTraceProvider::default(), ContainerTypes::default());
    collector
        .deserialize(&profile.snapshot_bytes()?)
        .context("Failed to restore snapshot")?;

    let mut report = Vec::new();
    report.push(format!("Profile: {}", profile.token));
    report.push(format!("Version: {}", profile.version));
    report.push(format!("Generated: {}", profile.generated_at));
    report.push(format!("Collector: {}", collector.name()));
    report.push(String::new());
    report.push(generate_text_summary(collector.snapshot()));

    Ok(report.join("\n"))
}
