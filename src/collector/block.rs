//! Block collector: splits a request's block trace into containers,
//! real blocks and events.

use super::context::{RequestContext, ResponseContext};
use super::snapshot::Snapshot;
use super::DataCollector;
use crate::parser::trace::{decode_trace, TraceEntry, TraceMap, TraceProvider};
use crate::utils::config::{ContainerTypes, COLLECTOR_NAME};
use crate::utils::error::{DecodeError, OutputError};
use log::{debug, warn};

/// Outcome of the latest collection cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CollectStatus {
    /// Nothing collected since construction or the last reset
    #[default]
    Empty,
    /// Every trace entry was classified
    Complete,
    /// Collection stopped at a malformed entry; only earlier entries were classified
    Partial { malformed_id: String },
}

/// Collector for the block profiler panel
///
/// Holds the snapshot of the latest `collect` call. The trace provider and
/// container types are fixed at construction and survive `reset`.
#[derive(Debug)]
pub struct BlockCollector<P> {
    provider: P,
    container_types: ContainerTypes,
    snapshot: Snapshot,
    status: CollectStatus,
}

impl<P: TraceProvider> BlockCollector<P> {
    pub fn new(provider: P, container_types: ContainerTypes) -> Self {
        Self {
            provider,
            container_types,
            snapshot: Snapshot::default(),
            status: CollectStatus::Empty,
        }
    }

    /// Pull the current trace and classify it
    ///
    /// Replaces the previous snapshot. A trace entry that is not a structured
    /// record stops classification right there: entries before it stay
    /// classified, entries after it are dropped, and no error reaches the
    /// caller. A debug panel with partial data beats a failed request, so
    /// the abort is only visible through [`BlockCollector::status`].
    pub fn collect(
        &mut self,
        request: &RequestContext,
        response: &ResponseContext,
        error: Option<&dyn std::error::Error>,
    ) {
        debug!(
            "Collecting block trace for {} {} ({})",
            request.method, request.path, response.status
        );
        if let Some(err) = error {
            warn!("Request finished with error: {}", err);
        }

        let blocks = self.provider.traces();
        self.snapshot = Snapshot::default();
        self.status = CollectStatus::Complete;

        for entry in decode_trace(&blocks) {
            match entry {
                TraceEntry::Malformed { id } => {
                    warn!("Trace entry '{}' is not a block record, aborting collection", id);
                    self.status = CollectStatus::Partial {
                        malformed_id: id.to_string(),
                    };
                    break;
                }
                TraceEntry::Events(events) => {
                    for (uniqid, event) in events {
                        self.snapshot.events.insert(uniqid.clone(), event.clone());
                    }
                }
                TraceEntry::Block {
                    id,
                    block_type,
                    record,
                } => {
                    let target = if self.container_types.contains(block_type) {
                        &mut self.snapshot.containers
                    } else {
                        &mut self.snapshot.real_blocks
                    };
                    target.insert(id.to_string(), record.clone().into());
                }
            }
        }

        self.snapshot.blocks = blocks;

        debug!(
            "Collected {} containers, {} real blocks, {} events",
            self.snapshot.containers.len(),
            self.snapshot.real_blocks.len(),
            self.snapshot.events.len()
        );
    }

    /// Number of blocks rendered, events excluded
    pub fn total_blocks(&self) -> usize {
        self.snapshot.total_blocks()
    }

    pub fn events(&self) -> &TraceMap {
        &self.snapshot.events
    }

    /// Raw trace of the latest collection, unmodified
    pub fn blocks(&self) -> &TraceMap {
        &self.snapshot.blocks
    }

    pub fn containers(&self) -> &TraceMap {
        &self.snapshot.containers
    }

    /// Blocks that are not containers
    pub fn real_blocks(&self) -> &TraceMap {
        &self.snapshot.real_blocks
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn status(&self) -> &CollectStatus {
        &self.status
    }

    pub fn container_types(&self) -> &ContainerTypes {
        &self.container_types
    }

    /// Encode blocks, containers, realBlocks and events
    pub fn serialize(&self) -> Result<Vec<u8>, OutputError> {
        self.snapshot.to_bytes()
    }

    /// Restore state produced by [`BlockCollector::serialize`]
    ///
    /// On error the current state is left untouched.
    pub fn deserialize(&mut self, data: &[u8]) -> Result<(), DecodeError> {
        self.restore(Snapshot::from_bytes(data)?);
        Ok(())
    }

    /// Replace the current state with an already decoded snapshot
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.status = CollectStatus::Complete;
    }

    pub fn reset(&mut self) {
        self.snapshot = Snapshot::default();
        self.status = CollectStatus::Empty;
    }
}

impl<P: TraceProvider> DataCollector for BlockCollector<P> {
    fn name(&self) -> &'static str {
        COLLECTOR_NAME
    }

    fn collect(
        &mut self,
        request: &RequestContext,
        response: &ResponseContext,
        error: Option<&dyn std::error::Error>,
    ) {
        BlockCollector::collect(self, request, response, error);
    }

    fn reset(&mut self) {
        BlockCollector::reset(self);
    }
}
