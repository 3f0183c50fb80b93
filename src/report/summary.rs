//! Panel summary of a collected block snapshot.

use crate::collector::Snapshot;
use crate::parser::trace::TraceMap;
use crate::utils::config::{TYPE_FIELD, UNKNOWN_TYPE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts shown at the top of the block panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    /// Containers plus real blocks
    pub total_blocks: usize,

    pub containers: usize,

    pub real_blocks: usize,

    pub events: usize,

    /// Blocks per type, containers included
    pub by_type: BTreeMap<String, usize>,
}

/// Summarize a snapshot
pub fn summarize(snapshot: &Snapshot) -> BlockSummary {
    let mut by_type = BTreeMap::new();
    count_types(&snapshot.containers, &mut by_type);
    count_types(&snapshot.real_blocks, &mut by_type);

    BlockSummary {
        total_blocks: snapshot.total_blocks(),
        containers: snapshot.containers.len(),
        real_blocks: snapshot.real_blocks.len(),
        events: snapshot.events.len(),
        by_type,
    }
}

fn count_types(records: &TraceMap, by_type: &mut BTreeMap<String, usize>) {
    for record in records.values() {
        let block_type = record
            .get(TYPE_FIELD)
            .and_then(|t| t.as_str())
            .unwrap_or(UNKNOWN_TYPE);
        *by_type.entry(block_type.to_string()).or_insert(0) += 1;
    }
}

/// Render a plain-text report of a snapshot
///
/// Lists containers and real blocks in trace order, then the per-type counts.
pub fn generate_text_summary(snapshot: &Snapshot) -> String {
    let summary = summarize(snapshot);
    let mut lines = Vec::new();

    lines.push(format!(
        "Blocks: {} ({} containers, {} real) | Events: {}",
        summary.total_blocks, summary.containers, summary.real_blocks, summary.events
    ));

    push_section(&mut lines, "Containers", &snapshot.containers);
    push_section(&mut lines, "Real blocks", &snapshot.real_blocks);

    if !summary.by_type.is_empty() {
        lines.push(String::new());
        lines.push("By type:".to_string());
        for (block_type, count) in &summary.by_type {
            lines.push(format!("  {:<48} {:>6}", block_type, count));
        }
    }

    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, title: &str, records: &TraceMap) {
    if records.is_empty() {
        return;
    }

    lines.push(String::new());
    lines.push(format!("{}:", title));
    for (id, record) in records {
        let block_type = record
            .get(TYPE_FIELD)
            .and_then(|t| t.as_str())
            .unwrap_or(UNKNOWN_TYPE);
        lines.push(format!("  {:<24} {}", id, block_type));
    }
}
