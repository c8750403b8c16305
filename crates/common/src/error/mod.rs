//! Error classification shared by every JobApi crate
//!
//! Crate-specific error enums stay in their own crates (`JobApiError` lives in
//! `jobapi-domain`); this module only provides the vocabulary callers use to
//! decide what to do with an error:
//!
//! - **`ErrorClassification`**: retryability, severity, criticality and an
//!   optional retry delay.
//! - **`ErrorSeverity`**: a unified severity ladder for logging and alerting.
//!
//! ## ErrorSeverity Levels
//!
//! | Level | Use Case | Examples |
//! |-------|----------|----------|
//! | **Info** | Expected conditions | A backend is unavailable on this device |
//! | **Warning** | Degraded but operational | Registry query failed, proxy construction failed once |
//! | **Error** | Failure requiring attention | Invalid job request, configuration errors |
//! | **Critical** | Functionality lost for the process | No usable scheduling backend |
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use jobapi_common::{ErrorClassification, ErrorSeverity};
//!
//! #[derive(Debug)]
//! enum ProbeError {
//!     Busy,
//!     Broken,
//! }
//!
//! impl ErrorClassification for ProbeError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//!
//!     fn severity(&self) -> ErrorSeverity {
//!         match self {
//!             Self::Busy => ErrorSeverity::Warning,
//!             Self::Broken => ErrorSeverity::Critical,
//!         }
//!     }
//!
//!     fn is_critical(&self) -> bool {
//!         self.severity() == ErrorSeverity::Critical
//!     }
//!
//!     fn retry_after(&self) -> Option<Duration> {
//!         None
//!     }
//! }
//!
//! assert!(ProbeError::Busy.is_retryable());
//! assert!(ProbeError::Broken.is_critical());
//! ```

use std::fmt;
use std::time::Duration;

/// Standard interface for classifying errors by their characteristics
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient: a later attempt with the same inputs
    /// may succeed (for example, a proxy whose construction failed because a
    /// platform service was not yet bound).
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    ///
    /// Used for monitoring, alerting, and logging decisions.
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if applicable
    fn retry_after(&self) -> Option<Duration>;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Emit a tracing event for a classified error at the level its severity maps
/// to.
///
/// `event` is a dotted event name (`"backend_selector.no_usable_backend"`).
#[cfg(feature = "observability")]
pub fn log_classified<E>(event: &str, err: &E)
where
    E: ErrorClassification + fmt::Display,
{
    let severity = err.severity();
    let retryable = err.is_retryable();
    match severity {
        ErrorSeverity::Info => {
            tracing::info!(error = %err, %severity, retryable, "{event}");
        }
        ErrorSeverity::Warning => {
            tracing::warn!(error = %err, %severity, retryable, "{event}");
        }
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            tracing::error!(error = %err, %severity, retryable, "{event}");
        }
    }
}
