//! Port interfaces for backend selection and job planning
//!
//! These traits define the boundaries between the selection logic and the
//! host platform. Everything here is synchronous: registry lookups and
//! scheduler calls are local OS calls.

use std::sync::Arc;
use std::time::Duration;

use jobapi_domain::{
    BackendKind, ComponentInfo, ComponentName, JobRequest, RegistryError, Result, SchedulerConfig,
};

/// Handle to the host OS: version, component registry, and scheduler services
pub trait OsContext: Send + Sync {
    /// Running OS API level
    fn sdk_version(&self) -> u32;

    /// Look up a manifest component.
    ///
    /// `Ok(None)` means the component is not declared. `Err` means the
    /// registry itself could not be queried.
    fn component_info(
        &self,
        component: &ComponentName,
    ) -> std::result::Result<Option<ComponentInfo>, RegistryError>;

    /// Bind the JobScheduler system service
    fn job_scheduler(&self) -> std::result::Result<Arc<dyn PlatformJobScheduler>, RegistryError>;

    /// Bind the AlarmManager system service
    fn alarm_manager(&self) -> std::result::Result<Arc<dyn PlatformAlarmManager>, RegistryError>;
}

/// Operator configuration read during selection
///
/// Owned and mutated outside this crate; selection only reads it.
pub trait SelectorConfiguration: Send + Sync {
    /// Whether operators allow `kind` to be selected
    fn is_enabled(&self, kind: BackendKind) -> bool;

    /// Whether the legacy fallback is usable without component checks
    fn is_force_allow_legacy(&self) -> bool;
}

impl SelectorConfiguration for SchedulerConfig {
    fn is_enabled(&self, kind: BackendKind) -> bool {
        self.is_backend_enabled(kind)
    }

    fn is_force_allow_legacy(&self) -> bool {
        self.force_allow_legacy
    }
}

/// Adapter translating job requests into calls on one backend
pub trait JobProxy: Send + Sync {
    /// Backend this proxy is bound to
    fn kind(&self) -> BackendKind;

    /// Hand a job to the OS scheduler, replacing any job with the same id
    fn plan(&self, request: &JobRequest) -> Result<()>;

    /// Remove a job from the OS scheduler
    fn cancel(&self, job_id: i32) -> Result<()>;

    /// Whether the OS scheduler still holds the job
    fn is_planned(&self, job_id: i32) -> Result<bool>;
}

/// Builds the proxy for a backend
pub trait ProxyFactory: Send + Sync {
    /// Construct a new proxy. May bind OS services.
    ///
    /// # Errors
    /// Returns `JobApiError::ProxyConstruction` when the backend's services
    /// cannot be bound.
    fn create_proxy(&self, kind: BackendKind, os: &dyn OsContext) -> Result<Arc<dyn JobProxy>>;
}

// ============================================================================
// Platform scheduler services
// ============================================================================

/// Timing of a JobScheduler job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformJobTiming {
    /// Run after `min_latency`, no later than `deadline`
    OneOff { min_latency: Duration, deadline: Duration },
    /// Run every `interval`; `flex` only on backends that accept it
    Periodic { interval: Duration, flex: Option<Duration> },
}

/// Job description submitted to the JobScheduler service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformJob {
    pub job_id: i32,
    pub tag: String,
    pub timing: PlatformJobTiming,
    /// Survives reboots
    pub persisted: bool,
}

/// The OS JobScheduler system service
pub trait PlatformJobScheduler: Send + Sync {
    fn schedule(&self, job: &PlatformJob) -> Result<()>;

    fn cancel(&self, job_id: i32) -> Result<()>;

    fn pending_job(&self, job_id: i32) -> Result<Option<PlatformJob>>;
}

/// How an alarm fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmMode {
    /// Fire at exactly `trigger_after` from now
    Exact { trigger_after: Duration },
    /// Fire somewhere inside `[start, start + length]`
    Window { start: Duration, length: Duration },
    /// Fire roughly every `interval`
    InexactRepeating { interval: Duration },
}

/// Alarm registered with the AlarmManager service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmRequest {
    pub job_id: i32,
    pub tag: String,
    pub mode: AlarmMode,
}

/// The OS AlarmManager system service
pub trait PlatformAlarmManager: Send + Sync {
    fn set(&self, alarm: &AlarmRequest) -> Result<()>;

    fn cancel(&self, job_id: i32) -> Result<()>;

    fn pending_alarm(&self, job_id: i32) -> Result<Option<AlarmRequest>>;
}
