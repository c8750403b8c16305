//! Availability checks for scheduling backends
//!
//! A backend is usable when the OS is new enough and every manifest component
//! it needs is declared, enabled, and carries the required permission. The
//! legacy fallback can additionally be forced on by configuration.
//!
//! Registry failures are absorbed here. Some modified devices throw from the
//! package manager; a failed lookup is reported as "component absent".

use jobapi_domain::{BackendKind, ComponentRequirement};
use tracing::{debug, warn};

use super::ports::{OsContext, SelectorConfiguration};

/// Whether `kind` can be used on this device right now.
///
/// Never fails: registry query errors count as a missing component.
pub fn is_supported(
    kind: BackendKind,
    os: &dyn OsContext,
    config: &dyn SelectorConfiguration,
) -> bool {
    let sdk = os.sdk_version();
    if sdk < kind.min_api_level() {
        debug!(kind = %kind, sdk, min_api = kind.min_api_level(), "availability.sdk_too_old");
        return false;
    }

    let supported = if kind.is_legacy_fallback() && config.is_force_allow_legacy() {
        debug!(kind = %kind, "availability.legacy_forced");
        true
    } else {
        kind.required_components().iter().all(|requirement| is_component_available(os, requirement))
    };

    debug!(kind = %kind, supported, "availability.checked");
    supported
}

/// Whether one required component is declared, enabled and permissioned.
pub fn is_component_available(os: &dyn OsContext, requirement: &ComponentRequirement) -> bool {
    match os.component_info(&requirement.component) {
        Ok(Some(info)) => info.satisfies(requirement),
        Ok(None) => false,
        Err(err) => {
            warn!(
                component = %requirement.component,
                error = %err,
                "availability.registry_query_failed"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use jobapi_domain::types::component::{
        ALARM_RECEIVER, ALARM_SERVICE, ALARM_SERVICE_EXACT, JOB_SERVICE,
    };
    use jobapi_domain::{ComponentInfo, SchedulerConfig};

    use super::*;
    use crate::testing::FakeOsContext;

    #[test]
    fn test_sdk_gate_applies_to_every_kind() {
        let config = SchedulerConfig::default().with_force_allow_legacy(true);
        for kind in BackendKind::ALL {
            let os = FakeOsContext::new(kind.min_api_level() - 1).with_all_components();
            assert!(!is_supported(kind, &os, &config), "{kind} passed below its min sdk");

            let os = FakeOsContext::new(kind.min_api_level()).with_all_components();
            assert!(is_supported(kind, &os, &config), "{kind} failed at its min sdk");
        }
    }

    #[test]
    fn test_job_scheduler_requires_bind_permission() {
        let config = SchedulerConfig::default();
        let os = FakeOsContext::new(30)
            .with_all_components()
            .with_component(JOB_SERVICE, ComponentInfo::enabled());

        assert!(!is_supported(BackendKind::JobSchedulerTransient, &os, &config));
        assert!(!is_supported(BackendKind::JobSchedulerLegacy, &os, &config));
        assert!(is_supported(BackendKind::AlarmManagerPermissioned, &os, &config));
    }

    #[test]
    fn test_disabled_component_blocks_backend() {
        let config = SchedulerConfig::default();
        let os = FakeOsContext::new(30)
            .with_all_components()
            .with_component(ALARM_RECEIVER, ComponentInfo::disabled());

        assert!(!is_supported(BackendKind::AlarmManagerPermissioned, &os, &config));
        assert!(!is_supported(BackendKind::AlarmManagerLegacy, &os, &config));
        assert!(is_supported(BackendKind::JobSchedulerTransient, &os, &config));
    }

    #[test]
    fn test_legacy_needs_exact_service_unless_forced() {
        let os = FakeOsContext::new(30).with_all_components().without_component(ALARM_SERVICE_EXACT);

        let strict = SchedulerConfig::default();
        assert!(!is_supported(BackendKind::AlarmManagerLegacy, &os, &strict));
        assert!(is_supported(BackendKind::AlarmManagerPermissioned, &os, &strict));

        let forced = SchedulerConfig::default().with_force_allow_legacy(true);
        assert!(is_supported(BackendKind::AlarmManagerLegacy, &os, &forced));
    }

    #[test]
    fn test_force_allow_only_affects_legacy() {
        let os = FakeOsContext::new(30);
        let forced = SchedulerConfig::default().with_force_allow_legacy(true);

        for kind in BackendKind::ALL {
            assert_eq!(is_supported(kind, &os, &forced), kind.is_legacy_fallback(), "{kind}");
        }
    }

    #[test]
    fn test_registry_failure_reads_as_absent() {
        let config = SchedulerConfig::default();
        let os = FakeOsContext::new(30).with_all_components().with_query_failure(ALARM_SERVICE);

        assert!(!is_supported(BackendKind::AlarmManagerPermissioned, &os, &config));
        assert!(!is_supported(BackendKind::AlarmManagerLegacy, &os, &config));
        assert!(is_supported(BackendKind::JobSchedulerTransient, &os, &config));
    }

    #[test]
    fn test_registry_down_fails_every_structural_check() {
        let config = SchedulerConfig::default();
        let os = FakeOsContext::new(30).with_all_components();
        os.set_registry_down(true);

        assert!(BackendKind::ALL.iter().all(|k| !is_supported(*k, &os, &config)));
    }
}
