//! Domain types and models

pub mod backend;
pub mod component;
pub mod job;

// Re-export for convenience
pub use backend::{BackendKind, Capabilities};
pub use component::{ComponentInfo, ComponentKind, ComponentName, ComponentRequirement};
pub use job::{JobRequest, JobTiming};
