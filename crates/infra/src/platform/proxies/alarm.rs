//! AlarmManager-backed proxy (`v_19`, `v_14`)

use std::sync::Arc;

use jobapi_core::{AlarmMode, AlarmRequest, JobProxy, PlatformAlarmManager};
use jobapi_domain::{BackendKind, JobApiError, JobRequest, JobTiming, Result};
use tracing::debug;

/// Schedules jobs as alarms
///
/// One-off jobs become windowed alarms when the backend supports execution
/// windows and exact alarms at the window start otherwise. Periodic jobs
/// become inexact repeating alarms. Alarms never survive a reboot, so the
/// transient flag needs no translation.
pub struct AlarmProxy {
    kind: BackendKind,
    alarms: Arc<dyn PlatformAlarmManager>,
}

impl AlarmProxy {
    /// # Errors
    /// Returns `JobApiError::ProxyConstruction` if `kind` is not an
    /// AlarmManager backend.
    pub fn new(kind: BackendKind, alarms: Arc<dyn PlatformAlarmManager>) -> Result<Self> {
        if !kind.is_alarm_manager() {
            return Err(JobApiError::proxy_construction(kind, "not an AlarmManager backend"));
        }
        Ok(Self { kind, alarms })
    }

    pub fn alarm_mode(&self, timing: &JobTiming) -> AlarmMode {
        match *timing {
            JobTiming::OneOff { start, end } if self.kind.supports_execution_window() => {
                AlarmMode::Window { start, length: end.saturating_sub(start) }
            }
            JobTiming::OneOff { start, .. } => AlarmMode::Exact { trigger_after: start },
            JobTiming::Periodic { interval, .. } => AlarmMode::InexactRepeating { interval },
        }
    }
}

impl JobProxy for AlarmProxy {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn plan(&self, request: &JobRequest) -> Result<()> {
        request.validate()?;
        let alarm = AlarmRequest {
            job_id: request.job_id,
            tag: request.tag.clone(),
            mode: self.alarm_mode(&request.timing),
        };
        self.alarms.set(&alarm)?;
        debug!(kind = %self.kind, job_id = alarm.job_id, mode = ?alarm.mode, "alarm_proxy.set");
        Ok(())
    }

    fn cancel(&self, job_id: i32) -> Result<()> {
        self.alarms.cancel(job_id)?;
        debug!(kind = %self.kind, job_id, "alarm_proxy.cancelled");
        Ok(())
    }

    fn is_planned(&self, job_id: i32) -> Result<bool> {
        Ok(self.alarms.pending_alarm(job_id)?.is_some())
    }
}
