//! Lazily constructed proxy per backend
//!
//! Each backend has one slot. The slot lock covers check, construct and
//! store, so concurrent first calls construct exactly once and share the
//! result. A failed construction leaves the slot empty.

use std::sync::Arc;

use jobapi_domain::{BackendKind, Result};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::ports::{JobProxy, OsContext, ProxyFactory};

type ProxySlot = Mutex<Option<Arc<dyn JobProxy>>>;

/// Cache holding at most one live proxy per backend
pub struct ProxyCache {
    factory: Arc<dyn ProxyFactory>,
    slots: [ProxySlot; BackendKind::COUNT],
}

impl ProxyCache {
    pub fn new(factory: Arc<dyn ProxyFactory>) -> Self {
        Self { factory, slots: std::array::from_fn(|_| Mutex::new(None)) }
    }

    /// Cached proxy for `kind`, constructing it on first use.
    ///
    /// # Errors
    /// Propagates the factory's error. The slot stays empty so the next call
    /// retries construction.
    pub fn get_proxy(&self, kind: BackendKind, os: &dyn OsContext) -> Result<Arc<dyn JobProxy>> {
        let mut slot = self.slots[kind.index()].lock();
        if let Some(proxy) = slot.as_ref() {
            debug!(kind = %kind, "proxy_cache.hit");
            return Ok(Arc::clone(proxy));
        }

        match self.factory.create_proxy(kind, os) {
            Ok(proxy) => {
                info!(kind = %kind, "proxy_cache.constructed");
                *slot = Some(Arc::clone(&proxy));
                Ok(proxy)
            }
            Err(err) => {
                warn!(kind = %kind, error = %err, "proxy_cache.construction_failed");
                Err(err)
            }
        }
    }

    /// Proxy for `kind` if one is cached, without constructing
    pub fn cached(&self, kind: BackendKind) -> Option<Arc<dyn JobProxy>> {
        self.slots[kind.index()].lock().clone()
    }

    /// Drop the cached proxy for `kind`
    pub fn invalidate_kind(&self, kind: BackendKind) {
        if self.slots[kind.index()].lock().take().is_some() {
            debug!(kind = %kind, "proxy_cache.invalidated");
        }
    }

    /// Drop every cached proxy; the next `get_proxy` rebuilds
    pub fn invalidate(&self) {
        for kind in BackendKind::ALL {
            self.invalidate_kind(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;

    use super::*;
    use crate::testing::{CountingProxyFactory, FakeOsContext};

    fn cache_with(factory: &Arc<CountingProxyFactory>) -> ProxyCache {
        ProxyCache::new(Arc::clone(factory) as Arc<dyn ProxyFactory>)
    }

    #[test]
    fn test_second_call_returns_same_instance() {
        let factory = Arc::new(CountingProxyFactory::new());
        let cache = cache_with(&factory);
        let os = FakeOsContext::new(30);

        let first = cache.get_proxy(BackendKind::JobSchedulerTransient, &os).unwrap();
        let second = cache.get_proxy(BackendKind::JobSchedulerTransient, &os).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.constructions(), 1);
    }

    #[test]
    fn test_invalidate_forces_new_instance() {
        let factory = Arc::new(CountingProxyFactory::new());
        let cache = cache_with(&factory);
        let os = FakeOsContext::new(30);

        let first = cache.get_proxy(BackendKind::AlarmManagerLegacy, &os).unwrap();
        cache.invalidate();
        assert!(cache.cached(BackendKind::AlarmManagerLegacy).is_none());
        let second = cache.get_proxy(BackendKind::AlarmManagerLegacy, &os).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(factory.constructions(), 2);
        assert_eq!(factory.serials(), vec![1, 2]);
    }

    #[test]
    fn test_slots_are_independent_per_kind() {
        let factory = Arc::new(CountingProxyFactory::new());
        let cache = cache_with(&factory);
        let os = FakeOsContext::new(30);

        let job = cache.get_proxy(BackendKind::JobSchedulerLegacy, &os).unwrap();
        let alarm = cache.get_proxy(BackendKind::AlarmManagerPermissioned, &os).unwrap();
        assert_eq!(job.kind(), BackendKind::JobSchedulerLegacy);
        assert_eq!(alarm.kind(), BackendKind::AlarmManagerPermissioned);

        cache.invalidate_kind(BackendKind::JobSchedulerLegacy);
        assert!(cache.cached(BackendKind::JobSchedulerLegacy).is_none());
        let still = cache.cached(BackendKind::AlarmManagerPermissioned).unwrap();
        assert!(Arc::ptr_eq(&alarm, &still));
    }

    #[test]
    fn test_failed_construction_is_not_cached() {
        let factory = Arc::new(CountingProxyFactory::new());
        factory.fail_next(1);
        let cache = cache_with(&factory);
        let os = FakeOsContext::new(30);

        let err = cache.get_proxy(BackendKind::JobSchedulerTransient, &os).err();
        assert!(err.is_some());
        assert!(cache.cached(BackendKind::JobSchedulerTransient).is_none());

        let proxy = cache.get_proxy(BackendKind::JobSchedulerTransient, &os).unwrap();
        assert_eq!(proxy.kind(), BackendKind::JobSchedulerTransient);
        assert_eq!(factory.attempts(), 2);
        assert_eq!(factory.constructions(), 1);
    }

    #[test]
    fn test_concurrent_first_calls_construct_once() {
        const THREADS: usize = 8;

        let factory = Arc::new(CountingProxyFactory::new().with_construction_delay_ms(20));
        let cache = cache_with(&factory);
        let os = FakeOsContext::new(30);
        let barrier = Barrier::new(THREADS);

        let proxies: Vec<Arc<dyn JobProxy>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        cache.get_proxy(BackendKind::JobSchedulerNoTransient, &os).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(factory.constructions(), 1);
        assert!(proxies.iter().all(|p| Arc::ptr_eq(p, &proxies[0])));
    }
}
