//! Scheduling backend descriptors
//!
//! Five mutually exclusive scheduling strategies exist on the host OS. They
//! are listed here newest first; that order is the selection preference
//! order. Each kind carries fixed capability flags and a minimum API level.
//!
//! | Kind | Name | Min API | Window | Flex | Transient |
//! |------|------|---------|--------|------|-----------|
//! | `JobSchedulerTransient` | `v_26` | 26 | yes | no | yes |
//! | `JobSchedulerNoTransient` | `v_24` | 24 | yes | no | no |
//! | `JobSchedulerLegacy` | `v_21` | 21 | yes | yes | no |
//! | `AlarmManagerPermissioned` | `v_19` | 19 | yes | yes | yes |
//! | `AlarmManagerLegacy` | `v_14` | 14 | no | yes | yes |

use serde::{Deserialize, Serialize};

use super::component::{
    ComponentRequirement, ALARM_REQUIREMENTS, JOB_SCHEDULER_REQUIREMENTS,
    LEGACY_ALARM_REQUIREMENTS,
};
use crate::impl_enum_name_conversions;

/// Capability flags of a scheduling backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// Jobs can run anywhere inside an earliest/latest window
    pub execution_window: bool,
    /// Periodic jobs accept slack around their nominal period
    pub flex_interval: bool,
    /// Jobs can be marked as not surviving a reboot
    pub transient_jobs: bool,
}

impl Capabilities {
    const fn new(execution_window: bool, flex_interval: bool, transient_jobs: bool) -> Self {
        Self { execution_window, flex_interval, transient_jobs }
    }
}

/// One of the five scheduling backends, in preference order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BackendKind {
    #[serde(rename = "v_26")]
    JobSchedulerTransient,
    #[serde(rename = "v_24")]
    JobSchedulerNoTransient,
    #[serde(rename = "v_21")]
    JobSchedulerLegacy,
    #[serde(rename = "v_19")]
    AlarmManagerPermissioned,
    #[serde(rename = "v_14")]
    AlarmManagerLegacy,
}

impl_enum_name_conversions!(BackendKind {
    JobSchedulerTransient => "v_26",
    JobSchedulerNoTransient => "v_24",
    JobSchedulerLegacy => "v_21",
    AlarmManagerPermissioned => "v_19",
    AlarmManagerLegacy => "v_14",
});

impl BackendKind {
    /// Every backend, most preferred first
    pub const ALL: [Self; 5] = [
        Self::JobSchedulerTransient,
        Self::JobSchedulerNoTransient,
        Self::JobSchedulerLegacy,
        Self::AlarmManagerPermissioned,
        Self::AlarmManagerLegacy,
    ];

    /// Number of backends
    pub const COUNT: usize = Self::ALL.len();

    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::JobSchedulerTransient => Capabilities::new(true, false, true),
            Self::JobSchedulerNoTransient => Capabilities::new(true, false, false),
            Self::JobSchedulerLegacy => Capabilities::new(true, true, false),
            Self::AlarmManagerPermissioned => Capabilities::new(true, true, true),
            Self::AlarmManagerLegacy => Capabilities::new(false, true, true),
        }
    }

    /// Lowest OS API level on which the backend exists
    pub const fn min_api_level(self) -> u32 {
        match self {
            Self::JobSchedulerTransient => 26,
            Self::JobSchedulerNoTransient => 24,
            Self::JobSchedulerLegacy => 21,
            Self::AlarmManagerPermissioned => 19,
            Self::AlarmManagerLegacy => 14,
        }
    }

    /// Position in the preference order, also used as a slot index
    pub const fn index(self) -> usize {
        match self {
            Self::JobSchedulerTransient => 0,
            Self::JobSchedulerNoTransient => 1,
            Self::JobSchedulerLegacy => 2,
            Self::AlarmManagerPermissioned => 3,
            Self::AlarmManagerLegacy => 4,
        }
    }

    pub const fn is_job_scheduler(self) -> bool {
        matches!(
            self,
            Self::JobSchedulerTransient | Self::JobSchedulerNoTransient | Self::JobSchedulerLegacy
        )
    }

    pub const fn is_alarm_manager(self) -> bool {
        !self.is_job_scheduler()
    }

    /// The last-resort backend whose availability can be forced by config
    pub const fn is_legacy_fallback(self) -> bool {
        matches!(self, Self::AlarmManagerLegacy)
    }

    pub const fn supports_execution_window(self) -> bool {
        self.capabilities().execution_window
    }

    pub const fn supports_flex_interval(self) -> bool {
        self.capabilities().flex_interval
    }

    pub const fn supports_transient_jobs(self) -> bool {
        self.capabilities().transient_jobs
    }

    /// Manifest components that must be declared and enabled
    pub const fn required_components(self) -> &'static [ComponentRequirement] {
        match self {
            Self::JobSchedulerTransient | Self::JobSchedulerNoTransient | Self::JobSchedulerLegacy => {
                JOB_SCHEDULER_REQUIREMENTS
            }
            Self::AlarmManagerPermissioned => ALARM_REQUIREMENTS,
            Self::AlarmManagerLegacy => LEGACY_ALARM_REQUIREMENTS,
        }
    }
}
