//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod collect;
pub mod show;

// Re-export main command functions
pub use collect::{execute_collect, CollectArgs};
pub use show::execute_show;
