//! Manifest components a scheduling backend depends on
//!
//! The OS only routes scheduled work to components the application declares
//! in its manifest. A backend is usable when every component it requires is
//! declared, enabled, and (for JobScheduler services) guarded by the
//! bind-job-service permission.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BIND_JOB_SERVICE_PERMISSION, PLATFORM_ALARM_RECEIVER, PLATFORM_ALARM_SERVICE,
    PLATFORM_ALARM_SERVICE_EXACT, PLATFORM_JOB_SERVICE,
};
use crate::impl_enum_name_conversions;

/// Kind of manifest component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Service,
    Receiver,
}

impl_enum_name_conversions!(ComponentKind {
    Service => "service",
    Receiver => "receiver",
});

/// Identifier of a manifest-declared component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentName {
    pub kind: ComponentKind,
    pub class_name: &'static str,
}

impl ComponentName {
    pub const fn service(class_name: &'static str) -> Self {
        Self { kind: ComponentKind::Service, class_name }
    }

    pub const fn receiver(class_name: &'static str) -> Self {
        Self { kind: ComponentKind::Receiver, class_name }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.class_name)
    }
}

/// What the component registry reports for a declared component
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Whether the component is currently enabled
    pub enabled: bool,
    /// Permission the component declares, if any
    pub permission: Option<String>,
}

impl ComponentInfo {
    pub fn enabled() -> Self {
        Self { enabled: true, permission: None }
    }

    pub fn disabled() -> Self {
        Self { enabled: false, permission: None }
    }

    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Whether this component satisfies `requirement`
    pub fn satisfies(&self, requirement: &ComponentRequirement) -> bool {
        if !self.enabled {
            return false;
        }
        match requirement.permission {
            Some(required) => self.permission.as_deref() == Some(required),
            None => true,
        }
    }
}

/// A component a backend needs, with the permission it must declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentRequirement {
    pub component: ComponentName,
    pub permission: Option<&'static str>,
}

impl ComponentRequirement {
    pub const fn present(component: ComponentName) -> Self {
        Self { component, permission: None }
    }

    pub const fn with_permission(component: ComponentName, permission: &'static str) -> Self {
        Self { component, permission: Some(permission) }
    }
}

pub const JOB_SERVICE: ComponentName = ComponentName::service(PLATFORM_JOB_SERVICE);
pub const ALARM_SERVICE: ComponentName = ComponentName::service(PLATFORM_ALARM_SERVICE);
pub const ALARM_SERVICE_EXACT: ComponentName =
    ComponentName::service(PLATFORM_ALARM_SERVICE_EXACT);
pub const ALARM_RECEIVER: ComponentName = ComponentName::receiver(PLATFORM_ALARM_RECEIVER);

pub(crate) const JOB_SCHEDULER_REQUIREMENTS: &[ComponentRequirement] =
    &[ComponentRequirement::with_permission(JOB_SERVICE, BIND_JOB_SERVICE_PERMISSION)];

pub(crate) const ALARM_REQUIREMENTS: &[ComponentRequirement] = &[
    ComponentRequirement::present(ALARM_SERVICE),
    ComponentRequirement::present(ALARM_RECEIVER),
];

pub(crate) const LEGACY_ALARM_REQUIREMENTS: &[ComponentRequirement] = &[
    ComponentRequirement::present(ALARM_SERVICE),
    ComponentRequirement::present(ALARM_SERVICE_EXACT),
    ComponentRequirement::present(ALARM_RECEIVER),
];
