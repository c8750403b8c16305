//! Proxies translating job requests into platform scheduler calls

mod alarm;
mod job_scheduler;

pub use alarm::AlarmProxy;
pub use job_scheduler::JobSchedulerProxy;
