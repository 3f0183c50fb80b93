//! Block trace parsing.
//!
//! This module handles:
//! - Loading raw traces handed over by the renderer
//! - Decoding entries into blocks, events and malformed values

pub mod trace;

// Re-export main types
pub use trace::{
    decode_trace, FileTraceProvider, StaticTraceProvider, TraceEntry, TraceMap, TraceProvider,
    TraceRecord,
};
