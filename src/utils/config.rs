//! Configuration and constants for the block collector.

use super::error::ConfigError;
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Name the profiler framework routes this collector's output under
pub const COLLECTOR_NAME: &str = "block";

/// Reserved trace key holding auxiliary events instead of a block record
pub const EVENTS_KEY: &str = "_events";

/// Field of a block record naming its block type
pub const TYPE_FIELD: &str = "type";

/// Current persisted profile version
pub const SNAPSHOT_VERSION: &str = "1.0.0";

/// Label used in summaries for records without a string type
pub const UNKNOWN_TYPE: &str = "unknown";

// Stock container block services shipped with the block/page/dashboard bundles
pub const DEFAULT_CONTAINER_TYPES: &[&str] = &[
    "sonata.block.service.container",
    "sonata.page.block.container",
    "sonata.dashboard.block.container",
    "cmf.block.container",
    "cmf.block.slideshow",
];

/// Set of block type identifiers that mark a record as a container
///
/// Fixed for the lifetime of a collector. May be empty, in which case
/// every block classifies as a real block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerTypes {
    types: HashSet<String>,
}

impl ContainerTypes {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// A missing type never matches, even against an empty-string entry.
    pub fn contains(&self, block_type: Option<&str>) -> bool {
        block_type.is_some_and(|t| self.types.contains(t))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Collector configuration file
///
/// ```json
/// { "container_types": ["sonata.block.service.container"] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_container_types")]
    pub container_types: Vec<String>,
}

fn default_container_types() -> Vec<String> {
    DEFAULT_CONTAINER_TYPES.iter().map(|s| s.to_string()).collect()
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            container_types: default_container_types(),
        }
    }
}

impl CollectorConfig {
    /// Load configuration from a JSON file
    ///
    /// # Errors
    /// * `ConfigError::Io` - file cannot be read
    /// * `ConfigError::Json` - file is not a valid config document
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading collector config from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let config: CollectorConfig = serde_json::from_str(&content)?;

        debug!("Configured {} container types", config.container_types.len());
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn container_types(&self) -> ContainerTypes {
        ContainerTypes::new(self.container_types.iter().cloned())
    }
}
