//! Job requests handed to a scheduling proxy

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{MIN_FLEX, MIN_PERIODIC_INTERVAL};
use crate::errors::{JobApiError, Result};

/// When a job should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobTiming {
    /// Run once, anywhere between `start` and `end` from now
    OneOff { start: Duration, end: Duration },
    /// Run every `interval`, allowing `flex` of slack before each deadline
    Periodic { interval: Duration, flex: Duration },
}

/// A unit of background work to plan with the OS scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub job_id: i32,
    pub tag: String,
    pub timing: JobTiming,
    /// Transient jobs do not survive a reboot
    #[serde(default)]
    pub transient: bool,
}

impl JobRequest {
    pub fn one_off(job_id: i32, tag: impl Into<String>, start: Duration, end: Duration) -> Self {
        Self { job_id, tag: tag.into(), timing: JobTiming::OneOff { start, end }, transient: false }
    }

    pub fn periodic(
        job_id: i32,
        tag: impl Into<String>,
        interval: Duration,
        flex: Duration,
    ) -> Self {
        Self {
            job_id,
            tag: tag.into(),
            timing: JobTiming::Periodic { interval, flex },
            transient: false,
        }
    }

    #[must_use]
    pub fn transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }

    pub const fn is_periodic(&self) -> bool {
        matches!(self.timing, JobTiming::Periodic { .. })
    }

    /// Check the request against platform scheduling limits.
    ///
    /// # Errors
    /// Returns `JobApiError::InvalidRequest` when the tag is empty, a one-off
    /// window ends before it starts, or a periodic job is below the platform
    /// minimum interval/flex or has more flex than interval.
    pub fn validate(&self) -> Result<()> {
        if self.tag.trim().is_empty() {
            return Err(JobApiError::InvalidRequest(format!("job {} has an empty tag", self.job_id)));
        }

        match self.timing {
            JobTiming::OneOff { start, end } if start > end => {
                Err(JobApiError::InvalidRequest(format!(
                    "job {} window ends ({end:?}) before it starts ({start:?})",
                    self.job_id
                )))
            }
            JobTiming::OneOff { .. } => Ok(()),
            JobTiming::Periodic { interval, .. } if interval < MIN_PERIODIC_INTERVAL => {
                Err(JobApiError::InvalidRequest(format!(
                    "job {} interval {interval:?} is below the minimum {MIN_PERIODIC_INTERVAL:?}",
                    self.job_id
                )))
            }
            JobTiming::Periodic { flex, .. } if flex < MIN_FLEX => {
                Err(JobApiError::InvalidRequest(format!(
                    "job {} flex {flex:?} is below the minimum {MIN_FLEX:?}",
                    self.job_id
                )))
            }
            JobTiming::Periodic { interval, flex } if flex > interval => {
                Err(JobApiError::InvalidRequest(format!(
                    "job {} flex {flex:?} exceeds its interval {interval:?}",
                    self.job_id
                )))
            }
            JobTiming::Periodic { .. } => Ok(()),
        }
    }
}
