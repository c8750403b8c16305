//! Selector configuration
//!
//! Operator-owned switches consulted during backend selection. Loading these
//! from the environment or a file is the infrastructure layer's job; this
//! module only defines the shape and validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{JobApiError, Result};
use crate::types::BackendKind;

/// Backend enable/disable overrides plus the legacy force-allow switch
///
/// Backends missing from `backends` are enabled. Keys are stable backend
/// names (`v_26` ... `v_14`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Treat the legacy AlarmManager fallback as available without checking
    /// its manifest components
    #[serde(default)]
    pub force_allow_legacy: bool,

    /// Per-backend override, keyed by stable name
    #[serde(default)]
    pub backends: BTreeMap<String, bool>,
}

impl SchedulerConfig {
    pub fn is_backend_enabled(&self, kind: BackendKind) -> bool {
        self.backends.get(&kind.to_string()).copied().unwrap_or(true)
    }

    pub fn set_backend_enabled(&mut self, kind: BackendKind, enabled: bool) {
        self.backends.insert(kind.to_string(), enabled);
    }

    #[must_use]
    pub fn with_backend(mut self, kind: BackendKind, enabled: bool) -> Self {
        self.set_backend_enabled(kind, enabled);
        self
    }

    #[must_use]
    pub fn with_force_allow_legacy(mut self, force: bool) -> Self {
        self.force_allow_legacy = force;
        self
    }

    /// Config with every backend explicitly disabled
    pub fn all_disabled() -> Self {
        BackendKind::ALL.iter().fold(Self::default(), |cfg, kind| cfg.with_backend(*kind, false))
    }

    /// Reject override keys that do not name a backend and normalise the rest
    /// to their canonical spelling.
    ///
    /// # Errors
    /// Returns `JobApiError::Config` on the first unknown backend name, or
    /// when two keys name the same backend in different spellings.
    pub fn validate(self) -> Result<Self> {
        let mut backends = BTreeMap::new();
        for (name, enabled) in self.backends {
            let kind: BackendKind = name
                .parse()
                .map_err(|e: String| JobApiError::Config(format!("Unknown backend: {e}")))?;
            if backends.insert(kind.to_string(), enabled).is_some() {
                return Err(JobApiError::Config(format!("Duplicate backend: {kind} (as {name})")));
            }
        }
        Ok(Self { force_allow_legacy: self.force_allow_legacy, backends })
    }
}
