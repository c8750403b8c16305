//! Configuration loading and management
//!
//! This module provides utilities for loading selector configuration from
//! environment variables and files, and a thread-safe holder operators can
//! mutate while the selector reads it.

pub mod loader;
pub mod runtime;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
pub use runtime::RuntimeSelectorConfig;
