//! Domain constants
//!
//! Manifest component names, permissions, and platform scheduling limits used
//! by the backend descriptors and job validation.

use std::time::Duration;

/// Permission a JobScheduler service must declare before the platform binds it.
pub const BIND_JOB_SERVICE_PERMISSION: &str = "android.permission.BIND_JOB_SERVICE";

// Designated manifest components
pub const PLATFORM_JOB_SERVICE: &str = "PlatformJobService";
pub const PLATFORM_ALARM_SERVICE: &str = "PlatformAlarmService";
pub const PLATFORM_ALARM_SERVICE_EXACT: &str = "PlatformAlarmServiceExact";
pub const PLATFORM_ALARM_RECEIVER: &str = "PlatformAlarmReceiver";

// Periodic job limits enforced by the platform schedulers
pub const MIN_PERIODIC_INTERVAL: Duration = Duration::from_secs(15 * 60);
pub const MIN_FLEX: Duration = Duration::from_secs(5 * 60);

// Environment variables read by the configuration loader
pub const ENV_FORCE_ALLOW_LEGACY: &str = "JOBAPI_FORCE_ALLOW_LEGACY";
pub const ENV_DISABLED_BACKENDS: &str = "JOBAPI_DISABLED_BACKENDS";
pub const ENV_LOG_FILTER: &str = "JOBAPI_LOG";
pub const ENV_LOG_JSON: &str = "JOBAPI_LOG_JSON";
