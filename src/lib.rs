//! Block Profiler
//!
//! Collects the block rendering trace of a web request and splits it into
//! container blocks, real blocks and auxiliary events for the profiler panel.
//!
//! ## Getting Started
//!
//! ```ignore
//! use block_profiler::collector::{BlockCollector, RequestContext, ResponseContext};
//! use block_profiler::parser::StaticTraceProvider;
//! use block_profiler::utils::config::ContainerTypes;
//!
//! let mut collector = BlockCollector::new(provider, ContainerTypes::new(["container"]));
//! collector.collect(&RequestContext::new("GET", "/"), &ResponseContext::default(), None);
//! println!("{} blocks", collector.total_blocks());
//! ```

pub mod collector;
pub mod commands;
pub mod output;
pub mod parser;
pub mod report;
pub mod utils;
