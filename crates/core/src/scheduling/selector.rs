//! Backend selection
//!
//! Walks the backends in preference order and returns the first one that is
//! both supported on the device and enabled by operators. Selection is never
//! cached; callers re-run it whenever they need the current answer.

use std::sync::Arc;

use jobapi_common::error::log_classified;
use jobapi_domain::{BackendKind, JobApiError, Result};
use tracing::debug;

use super::availability::is_supported;
use super::ports::{OsContext, SelectorConfiguration};

/// Picks the scheduling backend for this process
#[derive(Clone)]
pub struct BackendSelector {
    config: Arc<dyn SelectorConfiguration>,
}

impl BackendSelector {
    pub fn new(config: Arc<dyn SelectorConfiguration>) -> Self {
        Self { config }
    }

    /// Whether `kind` is supported and enabled right now
    pub fn is_usable(&self, kind: BackendKind, os: &dyn OsContext) -> bool {
        is_supported(kind, os, self.config.as_ref()) && self.config.is_enabled(kind)
    }

    /// First usable backend in preference order.
    ///
    /// # Errors
    /// Returns `JobApiError::NoUsableBackend` when no backend, including the
    /// legacy fallback, is usable. This is a misconfiguration, not a
    /// transient condition.
    pub fn get_default(&self, os: &dyn OsContext) -> Result<BackendKind> {
        match BackendKind::ALL.into_iter().find(|kind| self.is_usable(*kind, os)) {
            Some(kind) => {
                debug!(kind = %kind, sdk = os.sdk_version(), "backend_selector.selected");
                Ok(kind)
            }
            None => {
                let err = JobApiError::NoUsableBackend;
                log_classified("backend_selector.no_usable_backend", &err);
                Err(err)
            }
        }
    }

    /// Every usable backend, most preferred first
    pub fn usable_backends(&self, os: &dyn OsContext) -> Vec<BackendKind> {
        BackendKind::ALL.into_iter().filter(|kind| self.is_usable(*kind, os)).collect()
    }
}
