//! Platform scheduler adapters
//!
//! One proxy type per scheduler family plus the factory the proxy cache uses
//! to build them.
//!
//! # Backend families
//!
//! - **JobScheduler** (`v_26`, `v_24`, `v_21`): [`JobSchedulerProxy`]
//! - **AlarmManager** (`v_19`, `v_14`): [`AlarmProxy`]

pub mod factory;
pub mod proxies;

pub use factory::PlatformProxyFactory;
pub use proxies::{AlarmProxy, JobSchedulerProxy};
