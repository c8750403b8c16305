//! In-memory test doubles for the scheduling ports
//!
//! Available to this crate's tests and, behind the `test-utils` feature, to
//! downstream crates.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use jobapi_domain::constants::BIND_JOB_SERVICE_PERMISSION;
use jobapi_domain::types::component::{
    ALARM_RECEIVER, ALARM_SERVICE, ALARM_SERVICE_EXACT, JOB_SERVICE,
};
use jobapi_domain::{
    BackendKind, ComponentInfo, ComponentName, JobApiError, JobRequest, RegistryError, Result,
};
use parking_lot::Mutex;

use crate::scheduling::ports::{
    AlarmRequest, JobProxy, OsContext, PlatformAlarmManager, PlatformJob, PlatformJobScheduler,
    ProxyFactory,
};

// ============================================================================
// FakeOsContext
// ============================================================================

/// Scriptable OS: SDK level, component registry and recording system services
pub struct FakeOsContext {
    sdk: AtomicU32,
    components: Mutex<HashMap<ComponentName, ComponentInfo>>,
    failing: Mutex<HashSet<ComponentName>>,
    registry_down: AtomicBool,
    services_unavailable: AtomicBool,
    job_scheduler: Arc<RecordingJobScheduler>,
    alarm_manager: Arc<RecordingAlarmManager>,
}

impl FakeOsContext {
    /// Device at `sdk` with no components declared
    pub fn new(sdk: u32) -> Self {
        Self {
            sdk: AtomicU32::new(sdk),
            components: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            registry_down: AtomicBool::new(false),
            services_unavailable: AtomicBool::new(false),
            job_scheduler: Arc::new(RecordingJobScheduler::default()),
            alarm_manager: Arc::new(RecordingAlarmManager::default()),
        }
    }

    /// Declare every component a correctly packaged application ships
    #[must_use]
    pub fn with_all_components(self) -> Self {
        self.with_component(
            JOB_SERVICE,
            ComponentInfo::enabled().with_permission(BIND_JOB_SERVICE_PERMISSION),
        )
        .with_component(ALARM_SERVICE, ComponentInfo::enabled())
        .with_component(ALARM_SERVICE_EXACT, ComponentInfo::enabled())
        .with_component(ALARM_RECEIVER, ComponentInfo::enabled())
    }

    #[must_use]
    pub fn with_component(self, component: ComponentName, info: ComponentInfo) -> Self {
        self.components.lock().insert(component, info);
        self
    }

    #[must_use]
    pub fn without_component(self, component: ComponentName) -> Self {
        self.components.lock().remove(&component);
        self
    }

    /// Make lookups of `component` fail instead of answering
    #[must_use]
    pub fn with_query_failure(self, component: ComponentName) -> Self {
        self.failing.lock().insert(component);
        self
    }

    pub fn set_sdk_version(&self, sdk: u32) {
        self.sdk.store(sdk, Ordering::SeqCst);
    }

    /// Make every registry lookup fail
    pub fn set_registry_down(&self, down: bool) {
        self.registry_down.store(down, Ordering::SeqCst);
    }

    /// Make binding either system service fail
    pub fn set_services_unavailable(&self, unavailable: bool) {
        self.services_unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn job_scheduler_service(&self) -> &Arc<RecordingJobScheduler> {
        &self.job_scheduler
    }

    pub fn alarm_manager_service(&self) -> &Arc<RecordingAlarmManager> {
        &self.alarm_manager
    }

    fn check_services(&self, service: &str) -> std::result::Result<(), RegistryError> {
        if self.services_unavailable.load(Ordering::SeqCst) {
            return Err(RegistryError::Unavailable(format!("{service} service not bound")));
        }
        Ok(())
    }
}

impl OsContext for FakeOsContext {
    fn sdk_version(&self) -> u32 {
        self.sdk.load(Ordering::SeqCst)
    }

    fn component_info(
        &self,
        component: &ComponentName,
    ) -> std::result::Result<Option<ComponentInfo>, RegistryError> {
        if self.registry_down.load(Ordering::SeqCst) {
            return Err(RegistryError::Unavailable("package manager died".into()));
        }
        if self.failing.lock().contains(component) {
            return Err(RegistryError::QueryFailed {
                component: component.to_string(),
                reason: "lookup threw".into(),
            });
        }
        Ok(self.components.lock().get(component).cloned())
    }

    fn job_scheduler(&self) -> std::result::Result<Arc<dyn PlatformJobScheduler>, RegistryError> {
        self.check_services("jobscheduler")?;
        Ok(Arc::clone(&self.job_scheduler) as Arc<dyn PlatformJobScheduler>)
    }

    fn alarm_manager(&self) -> std::result::Result<Arc<dyn PlatformAlarmManager>, RegistryError> {
        self.check_services("alarm")?;
        Ok(Arc::clone(&self.alarm_manager) as Arc<dyn PlatformAlarmManager>)
    }
}

/// JobScheduler service that keeps scheduled jobs in memory
#[derive(Default)]
pub struct RecordingJobScheduler {
    jobs: Mutex<BTreeMap<i32, PlatformJob>>,
    fail: AtomicBool,
}

impl RecordingJobScheduler {
    pub fn jobs(&self) -> Vec<PlatformJob> {
        self.jobs.lock().values().cloned().collect()
    }

    /// Make `schedule` reject every job
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl PlatformJobScheduler for RecordingJobScheduler {
    fn schedule(&self, job: &PlatformJob) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(JobApiError::Platform(format!("schedule rejected job {}", job.job_id)));
        }
        self.jobs.lock().insert(job.job_id, job.clone());
        Ok(())
    }

    fn cancel(&self, job_id: i32) -> Result<()> {
        self.jobs.lock().remove(&job_id);
        Ok(())
    }

    fn pending_job(&self, job_id: i32) -> Result<Option<PlatformJob>> {
        Ok(self.jobs.lock().get(&job_id).cloned())
    }
}

/// AlarmManager service that keeps alarms in memory
#[derive(Default)]
pub struct RecordingAlarmManager {
    alarms: Mutex<BTreeMap<i32, AlarmRequest>>,
}

impl RecordingAlarmManager {
    pub fn alarms(&self) -> Vec<AlarmRequest> {
        self.alarms.lock().values().cloned().collect()
    }
}

impl PlatformAlarmManager for RecordingAlarmManager {
    fn set(&self, alarm: &AlarmRequest) -> Result<()> {
        self.alarms.lock().insert(alarm.job_id, alarm.clone());
        Ok(())
    }

    fn cancel(&self, job_id: i32) -> Result<()> {
        self.alarms.lock().remove(&job_id);
        Ok(())
    }

    fn pending_alarm(&self, job_id: i32) -> Result<Option<AlarmRequest>> {
        Ok(self.alarms.lock().get(&job_id).cloned())
    }
}

// ============================================================================
// CountingProxyFactory
// ============================================================================

/// Factory producing [`StubProxy`] instances and counting constructions
#[derive(Default)]
pub struct CountingProxyFactory {
    attempts: AtomicUsize,
    next_serial: AtomicU64,
    serials: Mutex<Vec<u64>>,
    pending_failures: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingProxyFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep inside every construction, widening race windows
    #[must_use]
    pub fn with_construction_delay_ms(mut self, millis: u64) -> Self {
        self.delay = Some(Duration::from_millis(millis));
        self
    }

    /// Fail the next `count` constructions
    pub fn fail_next(&self, count: usize) {
        self.pending_failures.store(count, Ordering::SeqCst);
    }

    /// Calls to `create_proxy`, failed ones included
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Successful constructions
    pub fn constructions(&self) -> usize {
        self.serials.lock().len()
    }

    /// Serial numbers of constructed proxies, in construction order
    pub fn serials(&self) -> Vec<u64> {
        self.serials.lock().clone()
    }
}

impl ProxyFactory for CountingProxyFactory {
    fn create_proxy(&self, kind: BackendKind, _os: &dyn OsContext) -> Result<Arc<dyn JobProxy>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        let should_fail = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(JobApiError::proxy_construction(kind, "scripted failure"));
        }

        let serial = self.next_serial.fetch_add(1, Ordering::SeqCst) + 1;
        self.serials.lock().push(serial);
        Ok(Arc::new(StubProxy::new(kind)))
    }
}

/// Proxy that records planned job ids without touching any OS service
pub struct StubProxy {
    kind: BackendKind,
    planned: Mutex<HashSet<i32>>,
}

impl StubProxy {
    pub fn new(kind: BackendKind) -> Self {
        Self { kind, planned: Mutex::new(HashSet::new()) }
    }
}

impl JobProxy for StubProxy {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn plan(&self, request: &JobRequest) -> Result<()> {
        self.planned.lock().insert(request.job_id);
        Ok(())
    }

    fn cancel(&self, job_id: i32) -> Result<()> {
        self.planned.lock().remove(&job_id);
        Ok(())
    }

    fn is_planned(&self, job_id: i32) -> Result<bool> {
        Ok(self.planned.lock().contains(&job_id))
    }
}
