//! Persisted profile schema.
//!
//! A profile wraps one collector snapshot with the request token it was
//! captured for, so a viewer in another process can load it later.

use crate::collector::Snapshot;
use crate::report::{summarize, BlockSummary};
use crate::utils::config::{COLLECTOR_NAME, SNAPSHOT_VERSION};
use serde::{Deserialize, Serialize};

/// Top-level profile structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Schema version for compatibility checking
    pub version: String,

    /// Request token the profile is stored under
    pub token: String,

    /// Collector the data belongs to
    pub collector: String,

    /// Timestamp when profile was generated
    pub generated_at: String,

    pub summary: BlockSummary,

    /// Collector snapshot (blocks, containers, realBlocks, events)
    pub data: serde_json::Value,
}

impl Profile {
    /// Wrap a snapshot for persistence
    pub fn new(token: impl Into<String>, snapshot: &Snapshot) -> Result<Self, serde_json::Error> {
        use chrono::Utc;

        Ok(Self {
            version: SNAPSHOT_VERSION.to_string(),
            token: token.into(),
            collector: COLLECTOR_NAME.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            summary: summarize(snapshot),
            data: serde_json::to_value(snapshot)?,
        })
    }

    /// Encoded snapshot bytes, ready for `BlockCollector::deserialize`
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.data)
    }
}

/// Generate a request token from the current time
pub fn generate_token() -> String {
    use chrono::Utc;

    let now = Utc::now();
    format!("{:x}{:05x}", now.timestamp(), now.timestamp_subsec_micros() & 0xfffff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_wraps_snapshot() {
        let mut snapshot = Snapshot::default();
        snapshot
            .real_blocks
            .insert("b".to_string(), json!({"type": "text"}));

        let profile = Profile::new("abc123", &snapshot).unwrap();

        assert_eq!(profile.version, SNAPSHOT_VERSION);
        assert_eq!(profile.collector, "block");
        assert_eq!(profile.summary.total_blocks, 1);
        assert_eq!(profile.data["realBlocks"]["b"]["type"], "text");

        let restored = Snapshot::from_bytes(&profile.snapshot_bytes().unwrap()).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_generate_token_is_hex() {
        let token = generate_token();
        assert!(!token.is_empty());
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
