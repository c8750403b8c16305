//! # JobApi Infrastructure
//!
//! Infrastructure implementations of core scheduling ports.
//!
//! This crate contains:
//! - The per-backend proxies and the factory that builds them
//! - Runtime-mutable selector configuration
//! - Configuration loading from environment variables and files
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `jobapi-core`
//! - Contains all "impure" code (environment, files, global subscriber)

pub mod config;
pub mod observability;
pub mod platform;

// Re-export commonly used items
pub use config::{RuntimeSelectorConfig, load, load_from_env, load_from_file, probe_config_paths};
pub use observability::init_tracing;
pub use platform::{AlarmProxy, JobSchedulerProxy, PlatformProxyFactory};
