//! Captured collector state and its transportable encoding.

use crate::parser::trace::TraceMap;
use crate::utils::error::{DecodeError, OutputError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields every encoded snapshot must carry
const SNAPSHOT_FIELDS: [&str; 4] = ["blocks", "containers", "realBlocks", "events"];

/// Full captured state of one collection cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Raw trace, `_events` entry included
    pub blocks: TraceMap,

    /// Records whose type is a configured container type
    pub containers: TraceMap,

    /// Every other block record
    pub real_blocks: TraceMap,

    /// Contents of the `_events` entry
    pub events: TraceMap,
}

impl Snapshot {
    pub fn total_blocks(&self) -> usize {
        self.containers.len() + self.real_blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
            && self.containers.is_empty()
            && self.real_blocks.is_empty()
            && self.events.is_empty()
    }

    /// Encode the four snapshot fields as compact JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, OutputError> {
        serde_json::to_vec(self).map_err(OutputError::SerializationFailed)
    }

    /// Decode bytes produced by [`Snapshot::to_bytes`]
    ///
    /// # Errors
    /// * `DecodeError::Json` - not valid JSON, or a field has the wrong shape
    /// * `DecodeError::NotAnObject` - top level is not an object
    /// * `DecodeError::MissingField` - one of the four fields is absent
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(data)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

        if let Some(missing) = SNAPSHOT_FIELDS
            .into_iter()
            .find(|field| !object.contains_key(*field))
        {
            return Err(DecodeError::MissingField(missing));
        }

        Ok(serde_json::from_value(value)?)
    }
}
