//! Proxy construction for every backend kind

use std::sync::Arc;

use jobapi_core::{JobProxy, OsContext, ProxyFactory};
use jobapi_domain::{BackendKind, JobApiError, RegistryError, Result};
use tracing::debug;

use super::proxies::{AlarmProxy, JobSchedulerProxy};

/// Builds the real platform proxy for a backend
///
/// Binds the system service the backend's family needs. A service that
/// cannot be bound becomes `JobApiError::ProxyConstruction`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformProxyFactory;

impl PlatformProxyFactory {
    pub const fn new() -> Self {
        Self
    }
}

fn bind_failed(kind: BackendKind, err: &RegistryError) -> JobApiError {
    JobApiError::proxy_construction(kind, err.to_string())
}

impl ProxyFactory for PlatformProxyFactory {
    fn create_proxy(&self, kind: BackendKind, os: &dyn OsContext) -> Result<Arc<dyn JobProxy>> {
        let proxy: Arc<dyn JobProxy> = match kind {
            BackendKind::JobSchedulerTransient
            | BackendKind::JobSchedulerNoTransient
            | BackendKind::JobSchedulerLegacy => {
                let scheduler = os.job_scheduler().map_err(|e| bind_failed(kind, &e))?;
                Arc::new(JobSchedulerProxy::new(kind, scheduler)?)
            }
            BackendKind::AlarmManagerPermissioned | BackendKind::AlarmManagerLegacy => {
                let alarms = os.alarm_manager().map_err(|e| bind_failed(kind, &e))?;
                Arc::new(AlarmProxy::new(kind, alarms)?)
            }
        };

        debug!(kind = %kind, "proxy_factory.created");
        Ok(proxy)
    }
}
