//! Runtime-mutable selector configuration
//!
//! Operators flip backend overrides while the process runs; the selector reads
//! the current values on every selection. Writes take a short write lock,
//! reads a shared lock. Cached proxies are not affected by a change.

use jobapi_core::SelectorConfiguration;
use jobapi_domain::{BackendKind, SchedulerConfig};
use parking_lot::RwLock;
use tracing::info;

/// Thread-safe holder of a [`SchedulerConfig`]
#[derive(Debug, Default)]
pub struct RuntimeSelectorConfig {
    inner: RwLock<SchedulerConfig>,
}

impl RuntimeSelectorConfig {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { inner: RwLock::new(config) }
    }

    /// Enable or disable one backend
    pub fn set_enabled(&self, kind: BackendKind, enabled: bool) {
        self.inner.write().set_backend_enabled(kind, enabled);
        info!(kind = %kind, enabled, "selector_config.backend_toggled");
    }

    pub fn set_force_allow_legacy(&self, force: bool) {
        self.inner.write().force_allow_legacy = force;
        info!(force, "selector_config.force_allow_legacy_set");
    }

    /// Copy of the current configuration
    pub fn snapshot(&self) -> SchedulerConfig {
        self.inner.read().clone()
    }

    /// Swap in a whole configuration, e.g. after reloading the file
    pub fn replace(&self, config: SchedulerConfig) {
        *self.inner.write() = config;
        info!("selector_config.replaced");
    }
}

impl From<SchedulerConfig> for RuntimeSelectorConfig {
    fn from(config: SchedulerConfig) -> Self {
        Self::new(config)
    }
}

impl SelectorConfiguration for RuntimeSelectorConfig {
    fn is_enabled(&self, kind: BackendKind) -> bool {
        self.inner.read().is_backend_enabled(kind)
    }

    fn is_force_allow_legacy(&self) -> bool {
        self.inner.read().force_allow_legacy
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jobapi_core::testing::FakeOsContext;
    use jobapi_core::BackendSelector;

    use super::*;

    #[test]
    fn test_toggles_are_visible_to_reads() {
        let config = RuntimeSelectorConfig::default();
        assert!(config.is_enabled(BackendKind::JobSchedulerLegacy));

        config.set_enabled(BackendKind::JobSchedulerLegacy, false);
        assert!(!config.is_enabled(BackendKind::JobSchedulerLegacy));

        config.set_force_allow_legacy(true);
        assert!(config.is_force_allow_legacy());
        assert!(config.snapshot().force_allow_legacy);
    }

    #[test]
    fn test_replace_swaps_everything() {
        let config = RuntimeSelectorConfig::new(SchedulerConfig::all_disabled());
        config.replace(SchedulerConfig::default());
        assert_eq!(config.snapshot(), SchedulerConfig::default());
    }

    #[test]
    fn test_selection_follows_runtime_changes() {
        let config = Arc::new(RuntimeSelectorConfig::default());
        let selector = BackendSelector::new(Arc::clone(&config) as Arc<dyn SelectorConfiguration>);
        let os = FakeOsContext::new(30).with_all_components();

        assert_eq!(selector.get_default(&os).unwrap(), BackendKind::JobSchedulerTransient);

        config.set_enabled(BackendKind::JobSchedulerTransient, false);
        assert_eq!(selector.get_default(&os).unwrap(), BackendKind::JobSchedulerNoTransient);
    }
}
