//! JobApi facade - selection plus cached proxies

use std::sync::Arc;

use jobapi_domain::{BackendKind, JobRequest, Result};
use tracing::debug;

use super::ports::{JobProxy, OsContext, ProxyFactory, SelectorConfiguration};
use super::proxy_cache::ProxyCache;
use super::selector::BackendSelector;

/// Entry point for scheduling code
///
/// Owns the OS handle, the selector and the proxy cache. Construct one per
/// process and pass it to whoever enqueues jobs.
pub struct JobApi {
    os: Arc<dyn OsContext>,
    selector: BackendSelector,
    cache: ProxyCache,
}

impl JobApi {
    /// Create a new facade
    pub fn new(
        os: Arc<dyn OsContext>,
        config: Arc<dyn SelectorConfiguration>,
        factory: Arc<dyn ProxyFactory>,
    ) -> Self {
        Self { os, selector: BackendSelector::new(config), cache: ProxyCache::new(factory) }
    }

    pub fn cache(&self) -> &ProxyCache {
        &self.cache
    }

    /// Backend that would be used right now
    pub fn default_backend(&self) -> Result<BackendKind> {
        self.selector.get_default(self.os.as_ref())
    }

    /// Every usable backend, most preferred first
    pub fn usable_backends(&self) -> Vec<BackendKind> {
        self.selector.usable_backends(self.os.as_ref())
    }

    /// Proxy for the currently selected backend
    pub fn proxy(&self) -> Result<Arc<dyn JobProxy>> {
        let kind = self.default_backend()?;
        self.proxy_for(kind)
    }

    /// Proxy for a specific backend, e.g. the one a stored job was planned with
    pub fn proxy_for(&self, kind: BackendKind) -> Result<Arc<dyn JobProxy>> {
        self.cache.get_proxy(kind, self.os.as_ref())
    }

    /// Validate `request` and plan it with the selected backend
    pub fn plan(&self, request: &JobRequest) -> Result<BackendKind> {
        request.validate()?;
        let proxy = self.proxy()?;
        proxy.plan(request)?;
        debug!(job_id = request.job_id, tag = %request.tag, kind = %proxy.kind(), "job_api.planned");
        Ok(proxy.kind())
    }

    /// Forget cached proxies, e.g. after the OS context was reset
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jobapi_domain::{JobApiError, SchedulerConfig};

    use super::*;
    use crate::testing::{CountingProxyFactory, FakeOsContext};

    fn job_api(sdk: u32, config: SchedulerConfig) -> (JobApi, Arc<CountingProxyFactory>) {
        let factory = Arc::new(CountingProxyFactory::new());
        let api = JobApi::new(
            Arc::new(FakeOsContext::new(sdk).with_all_components()),
            Arc::new(config),
            Arc::clone(&factory) as Arc<dyn ProxyFactory>,
        );
        (api, factory)
    }

    #[test]
    fn test_proxy_follows_selection() {
        let (api, _) = job_api(24, SchedulerConfig::default());
        let proxy = api.proxy().unwrap();
        assert_eq!(proxy.kind(), BackendKind::JobSchedulerNoTransient);
    }

    #[test]
    fn test_proxy_is_reused_until_invalidated() {
        let (api, factory) = job_api(30, SchedulerConfig::default());

        let first = api.proxy().unwrap();
        let second = api.proxy().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        api.invalidate();
        let third = api.proxy().unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(factory.constructions(), 2);
    }

    #[test]
    fn test_no_backend_means_no_proxy() {
        let (api, factory) = job_api(30, SchedulerConfig::all_disabled());
        assert_eq!(api.proxy().err(), Some(JobApiError::NoUsableBackend));
        assert_eq!(factory.attempts(), 0);
    }

    #[test]
    fn test_plan_rejects_invalid_request_before_selection() {
        let (api, factory) = job_api(30, SchedulerConfig::default());
        let request = JobRequest::periodic(1, "sync", Duration::from_secs(60), Duration::from_secs(60));

        assert!(matches!(api.plan(&request), Err(JobApiError::InvalidRequest(_))));
        assert_eq!(factory.attempts(), 0);
    }

    #[test]
    fn test_plan_uses_selected_backend() {
        let (api, _) = job_api(21, SchedulerConfig::default());
        let request =
            JobRequest::one_off(7, "upload", Duration::from_secs(10), Duration::from_secs(60));

        assert_eq!(api.plan(&request).unwrap(), BackendKind::JobSchedulerLegacy);
        assert!(api.proxy().unwrap().is_planned(7).unwrap());
    }
}
