//! Output writers for collected profile data.
//!
//! This module handles persisting profiles to disk and loading them back
//! for out-of-process viewing.

pub mod json;
pub mod schema;

// Re-export main functions
pub use json::{profile_path, read_profile, write_profile};
pub use schema::{generate_token, Profile};
