//! Request/response details handed to collectors by the profiler.

use serde::{Deserialize, Serialize};

/// The request being profiled
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

/// The response sent for the profiled request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseContext {
    pub status: u16,
}

impl Default for ResponseContext {
    fn default() -> Self {
        Self { status: 200 }
    }
}
