//! CLI command implementations

pub mod export;
pub mod recommendations;
pub mod summary;
