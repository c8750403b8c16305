//! # JobApi Core
//!
//! Backend selection and proxy caching, free of platform code.
//!
//! This crate contains:
//! - Port interfaces (traits) for the OS component registry, the platform
//!   schedulers, selector configuration and proxy construction
//! - The availability checker, backend selector and proxy cache
//! - The `JobApi` facade tying them together
//!
//! ## Architecture Principles
//! - Depends only on `jobapi-domain` and `jobapi-common`
//! - No platform code; every external collaborator is a trait
//! - Synchronous: nothing here blocks beyond registry queries

pub mod scheduling;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export specific items to avoid ambiguity
pub use scheduling::availability::{is_component_available, is_supported};
pub use scheduling::ports::{
    AlarmMode, AlarmRequest, JobProxy, OsContext, PlatformAlarmManager, PlatformJob,
    PlatformJobScheduler, PlatformJobTiming, ProxyFactory, SelectorConfiguration,
};
pub use scheduling::proxy_cache::ProxyCache;
pub use scheduling::selector::BackendSelector;
pub use scheduling::service::JobApi;
