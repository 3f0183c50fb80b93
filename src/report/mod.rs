//! Reporting over collected block data.

pub mod summary;

pub use summary::{generate_text_summary, summarize, BlockSummary};
