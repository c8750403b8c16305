//! Integration tests for backend descriptors and selector configuration
//!
//! Exercises the public surface the core crate builds on: preference order,
//! capability flags, component requirements, and config parsing.

use jobapi_domain::types::component::{ALARM_RECEIVER, ALARM_SERVICE, JOB_SERVICE};
use jobapi_domain::{BackendKind, ComponentInfo, JobApiError, SchedulerConfig};

/// Scenario: a settings screen lists every backend with what it can do
#[test]
fn test_every_backend_round_trips_through_its_stable_name() {
    for kind in BackendKind::ALL {
        let name = kind.to_string();
        let parsed: BackendKind = name.parse().expect("stable name parses");
        assert_eq!(parsed, kind);

        let json = serde_json::to_string(&kind).expect("serializes");
        assert_eq!(json, format!("\"{name}\""));
    }
}

/// Only the legacy fallback lacks execution windows; only the two
/// JobScheduler variants without flex reject flex intervals.
#[test]
fn test_capability_partition() {
    let without_window: Vec<_> =
        BackendKind::ALL.into_iter().filter(|k| !k.supports_execution_window()).collect();
    assert_eq!(without_window, vec![BackendKind::AlarmManagerLegacy]);

    let without_flex: Vec<_> =
        BackendKind::ALL.into_iter().filter(|k| !k.supports_flex_interval()).collect();
    assert_eq!(
        without_flex,
        vec![BackendKind::JobSchedulerTransient, BackendKind::JobSchedulerNoTransient]
    );
}

#[test]
fn test_alarm_components_need_no_permission() {
    let requirements = BackendKind::AlarmManagerPermissioned.required_components();
    let info = ComponentInfo::enabled();
    assert!(requirements.iter().all(|r| info.satisfies(r)));
    assert!(requirements.iter().any(|r| r.component == ALARM_SERVICE));
    assert!(requirements.iter().any(|r| r.component == ALARM_RECEIVER));
}

#[test]
fn test_job_scheduler_component_needs_permission() {
    let requirement = BackendKind::JobSchedulerNoTransient.required_components()[0];
    assert_eq!(requirement.component, JOB_SERVICE);
    assert!(!ComponentInfo::enabled().satisfies(&requirement));
}

#[test]
fn test_config_from_json() {
    let cfg: SchedulerConfig = serde_json::from_str(
        r#"{ "force_allow_legacy": true, "backends": { "v_26": false, "v_19": false } }"#,
    )
    .expect("valid json");
    let cfg = cfg.validate().expect("known backends");

    assert!(cfg.force_allow_legacy);
    assert!(!cfg.is_backend_enabled(BackendKind::JobSchedulerTransient));
    assert!(!cfg.is_backend_enabled(BackendKind::AlarmManagerPermissioned));
    assert!(cfg.is_backend_enabled(BackendKind::AlarmManagerLegacy));
}

#[test]
fn test_config_defaults_when_fields_missing() {
    let cfg: SchedulerConfig = serde_json::from_str("{}").expect("empty object");
    assert_eq!(cfg, SchedulerConfig::default());
}

#[test]
fn test_config_unknown_backend_is_config_error() {
    let cfg: SchedulerConfig =
        serde_json::from_str(r#"{ "backends": { "gcm": true } }"#).expect("valid json");
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err, JobApiError::Config(ref msg) if msg.contains("gcm")));
}
