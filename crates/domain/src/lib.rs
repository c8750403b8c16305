//! # JobApi Domain
//!
//! Scheduling backend domain types for JobApi.
//!
//! This crate contains:
//! - The closed set of scheduling backends and their capability flags
//! - Manifest component identifiers the backends depend on
//! - Job request models handed to proxies
//! - Selector configuration structures
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - Depends only on `jobapi-common` (error classification vocabulary)
//! - Pure data and validation, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::SchedulerConfig;
pub use errors::*;
pub use types::*;
