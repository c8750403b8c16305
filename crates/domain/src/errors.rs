//! Error types used throughout JobApi

use std::time::Duration;

use jobapi_common::{ErrorClassification, ErrorSeverity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::BackendKind;

/// Main error type for JobApi
///
/// Only `NoUsableBackend` and `ProxyConstruction` come out of backend
/// selection and proxy caching; the remaining variants belong to proxies and
/// configuration loading.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum JobApiError {
    /// Every backend, including the legacy fallback, is unsupported or
    /// disabled. Job scheduling cannot work in this process.
    #[error("No usable scheduling backend: all supported backends are disabled")]
    NoUsableBackend,

    /// Building the proxy for a backend failed. Nothing was cached.
    #[error("Failed to construct {kind} proxy: {reason}")]
    ProxyConstruction { kind: BackendKind, reason: String },

    #[error("Invalid job request: {0}")]
    InvalidRequest(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl JobApiError {
    pub fn proxy_construction(kind: BackendKind, reason: impl Into<String>) -> Self {
        Self::ProxyConstruction { kind, reason: reason.into() }
    }
}

impl ErrorClassification for JobApiError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::ProxyConstruction { .. } | Self::Platform(_))
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoUsableBackend => ErrorSeverity::Critical,
            Self::ProxyConstruction { .. } | Self::Platform(_) => ErrorSeverity::Warning,
            Self::InvalidRequest(_) | Self::Config(_) => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Failure to query the OS component registry
///
/// Never crosses the availability check: a failed query means "component
/// absent".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Component registry unavailable: {0}")]
    Unavailable(String),

    #[error("Registry query for {component} failed: {reason}")]
    QueryFailed { component: String, reason: String },
}

/// Result type alias for JobApi operations
pub type Result<T> = std::result::Result<T, JobApiError>;
