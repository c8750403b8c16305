//! JobScheduler-backed proxy (`v_26`, `v_24`, `v_21`)
//!
//! Requests are degraded to what the bound backend supports: flex is dropped
//! on kinds without flex intervals and transient jobs are persisted on kinds
//! without transient support.

use std::sync::Arc;

use jobapi_core::{JobProxy, PlatformJob, PlatformJobScheduler, PlatformJobTiming};
use jobapi_domain::{BackendKind, JobApiError, JobRequest, JobTiming, Result};
use tracing::debug;

pub struct JobSchedulerProxy {
    kind: BackendKind,
    scheduler: Arc<dyn PlatformJobScheduler>,
}

impl JobSchedulerProxy {
    /// # Errors
    /// Returns `JobApiError::ProxyConstruction` if `kind` is not a
    /// JobScheduler backend.
    pub fn new(kind: BackendKind, scheduler: Arc<dyn PlatformJobScheduler>) -> Result<Self> {
        if !kind.is_job_scheduler() {
            return Err(JobApiError::proxy_construction(kind, "not a JobScheduler backend"));
        }
        Ok(Self { kind, scheduler })
    }

    /// Platform job for `request`, limited to this backend's capabilities
    pub fn build_job(&self, request: &JobRequest) -> PlatformJob {
        let timing = match request.timing {
            JobTiming::OneOff { start, end } => {
                PlatformJobTiming::OneOff { min_latency: start, deadline: end }
            }
            JobTiming::Periodic { interval, flex } => {
                let flex = if self.kind.supports_flex_interval() {
                    Some(flex)
                } else {
                    debug!(kind = %self.kind, job_id = request.job_id, "job_scheduler_proxy.flex_dropped");
                    None
                };
                PlatformJobTiming::Periodic { interval, flex }
            }
        };

        let persisted = if request.transient && !self.kind.supports_transient_jobs() {
            debug!(
                kind = %self.kind,
                job_id = request.job_id,
                "job_scheduler_proxy.transient_unsupported"
            );
            true
        } else {
            !request.transient
        };

        PlatformJob { job_id: request.job_id, tag: request.tag.clone(), timing, persisted }
    }
}

impl JobProxy for JobSchedulerProxy {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn plan(&self, request: &JobRequest) -> Result<()> {
        request.validate()?;
        let job = self.build_job(request);
        self.scheduler.schedule(&job)?;
        debug!(kind = %self.kind, job_id = job.job_id, persisted = job.persisted, "job_scheduler_proxy.scheduled");
        Ok(())
    }

    fn cancel(&self, job_id: i32) -> Result<()> {
        self.scheduler.cancel(job_id)?;
        debug!(kind = %self.kind, job_id, "job_scheduler_proxy.cancelled");
        Ok(())
    }

    fn is_planned(&self, job_id: i32) -> Result<bool> {
        Ok(self.scheduler.pending_job(job_id)?.is_some())
    }
}
