//! Raw block trace decoding.
//!
//! The rendering side hands over one flat JSON object per request: block id
//! to block record, plus the reserved `_events` key holding an object of
//! event records. Entries are decoded into [`TraceEntry`] at this boundary so
//! the collector never has to look at the reserved key itself.

use crate::utils::config::{EVENTS_KEY, TYPE_FIELD};
use crate::utils::error::ParseError;
use log::debug;
use serde_json::{Map, Value};
use std::path::Path;

/// Ordered string-keyed mapping used for traces, subsets and events
pub type TraceMap = Map<String, Value>;

/// One block record: open-ended fields, at least `type` in practice
pub type TraceRecord = Map<String, Value>;

/// Anything that can hand over the current request's block trace
pub trait TraceProvider {
    /// Snapshot of every block rendered so far in this request
    fn traces(&self) -> TraceMap;
}

/// A single decoded entry of a raw trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceEntry<'a> {
    /// A rendered block and its declared type (if any)
    Block {
        id: &'a str,
        block_type: Option<&'a str>,
        record: &'a TraceRecord,
    },
    /// The reserved events entry
    Events(&'a TraceMap),
    /// A value that is not a structured record
    Malformed { id: &'a str },
}

impl<'a> TraceEntry<'a> {
    /// Decode one raw `(id, value)` pair
    ///
    /// The structure check comes before the reserved-key check, so a
    /// non-object `_events` value is malformed too.
    pub fn decode(id: &'a str, value: &'a Value) -> Self {
        let Some(record) = value.as_object() else {
            return Self::Malformed { id };
        };

        if id == EVENTS_KEY {
            return Self::Events(record);
        }

        Self::Block {
            id,
            block_type: record.get(TYPE_FIELD).and_then(Value::as_str),
            record,
        }
    }
}

/// Decode every entry of a raw trace, in trace order
pub fn decode_trace(raw: &TraceMap) -> impl Iterator<Item = TraceEntry<'_>> {
    raw.iter().map(|(id, value)| TraceEntry::decode(id, value))
}

/// Trace provider over an already materialized trace
#[derive(Debug, Clone, Default)]
pub struct StaticTraceProvider {
    trace: TraceMap,
}

impl StaticTraceProvider {
    pub fn new(trace: TraceMap) -> Self {
        Self { trace }
    }

    /// Build from a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        match value {
            Value::Object(trace) => Ok(Self::new(trace)),
            other => Err(ParseError::InvalidFormat(format!(
                "Trace must be a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Replace the trace handed out on the next `traces` call
    pub fn set_trace(&mut self, trace: TraceMap) {
        self.trace = trace;
    }
}

impl TraceProvider for StaticTraceProvider {
    fn traces(&self) -> TraceMap {
        self.trace.clone()
    }
}

/// Trace provider backed by a JSON dump of a request's trace
#[derive(Debug, Clone)]
pub struct FileTraceProvider {
    inner: StaticTraceProvider,
}

impl FileTraceProvider {
    /// Load a trace dump from disk
    ///
    /// # Errors
    /// * `ParseError::Io` - file cannot be read
    /// * `ParseError::JsonError` - file is not valid JSON
    /// * `ParseError::InvalidFormat` - top level is not an object
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        debug!("Loading block trace from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        let inner = StaticTraceProvider::from_value(value)?;

        debug!("Loaded trace with {} entries", inner.trace.len());
        Ok(Self { inner })
    }
}

impl TraceProvider for FileTraceProvider {
    fn traces(&self) -> TraceMap {
        self.inner.traces()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> TraceMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_decode_block_with_type() {
        let value = json!({"type": "text", "name": "intro"});
        match TraceEntry::decode("a", &value) {
            TraceEntry::Block { id, block_type, record } => {
                assert_eq!(id, "a");
                assert_eq!(block_type, Some("text"));
                assert_eq!(record.len(), 2);
            }
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_decode_block_without_string_type() {
        let missing = json!({"name": "intro"});
        let numeric = json!({"type": 3});

        assert!(matches!(
            TraceEntry::decode("a", &missing),
            TraceEntry::Block { block_type: None, .. }
        ));
        assert!(matches!(
            TraceEntry::decode("b", &numeric),
            TraceEntry::Block { block_type: None, .. }
        ));
    }

    #[test]
    fn test_decode_events_entry() {
        let value = json!({"e1": {"name": "render"}});
        assert!(matches!(
            TraceEntry::decode(EVENTS_KEY, &value),
            TraceEntry::Events(events) if events.len() == 1
        ));
    }

    #[test]
    fn test_decode_malformed() {
        let scalar = json!("oops");
        let events_scalar = json!(42);

        assert_eq!(
            TraceEntry::decode("a", &scalar),
            TraceEntry::Malformed { id: "a" }
        );
        assert_eq!(
            TraceEntry::decode(EVENTS_KEY, &events_scalar),
            TraceEntry::Malformed { id: EVENTS_KEY }
        );
    }

    #[test]
    fn test_decode_trace_keeps_order() {
        let raw = as_map(json!({
            "z": {"type": "text"},
            "_events": {},
            "a": {"type": "container"},
        }));

        let ids: Vec<&str> = decode_trace(&raw)
            .map(|entry| match entry {
                TraceEntry::Block { id, .. } | TraceEntry::Malformed { id } => id,
                TraceEntry::Events(_) => EVENTS_KEY,
            })
            .collect();

        assert_eq!(ids, vec!["z", "_events", "a"]);
    }

    #[test]
    fn test_static_provider_rejects_non_object() {
        assert!(matches!(
            StaticTraceProvider::from_value(json!([1, 2])),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
