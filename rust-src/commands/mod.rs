//! CLI command implementations.

pub mod dashboard;
pub mod export;
pub mod report;
mod session;
pub mod summary;
