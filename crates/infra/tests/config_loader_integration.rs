//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! feeding it to backend selection.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use jobapi_core::testing::FakeOsContext;
use jobapi_core::{BackendSelector, SelectorConfiguration};
use jobapi_domain::{BackendKind, JobApiError};
use jobapi_infra::config::{self, RuntimeSelectorConfig};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "force_allow_legacy": false,
            "backends": {
                "v_26": false,
                "v_24": false
            }
        }"#,
        "json",
    );

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();
    let config = result.expect("Failed to load config from JSON file");

    assert!(!config.force_allow_legacy);
    assert!(!config.is_backend_enabled(BackendKind::JobSchedulerTransient));
    assert!(!config.is_backend_enabled(BackendKind::JobSchedulerNoTransient));
    assert!(config.is_backend_enabled(BackendKind::JobSchedulerLegacy));
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
force_allow_legacy = true

[backends]
v_26 = false
v_24 = false
v_21 = false
v_19 = false
"#,
        "toml",
    );

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();
    let config = result.expect("Failed to load config from TOML file");

    assert!(config.force_allow_legacy);
    assert!(config.is_backend_enabled(BackendKind::AlarmManagerLegacy));
}

#[test]
fn test_backend_names_are_normalised() {
    let path = write_config(r#"{ "backends": { " V_21 ": false } }"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();
    let config = result.expect("Failed to load config");

    assert_eq!(config.backends.keys().collect::<Vec<_>>(), vec!["v_21"]);
    assert!(!config.is_backend_enabled(BackendKind::JobSchedulerLegacy));
}

#[test]
fn test_unknown_backend_is_rejected() {
    let path = write_config("[backends]\nv_30 = true\n", "toml");

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    match result {
        Err(JobApiError::Config(message)) => assert!(message.contains("v_30"), "{message}"),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn test_loaded_config_drives_selection() {
    // Forced legacy with everything else disabled: an OS without any
    // components still gets the fallback.
    let path = write_config(
        r#"
force_allow_legacy = true

[backends]
v_26 = false
v_24 = false
v_21 = false
v_19 = false
"#,
        "toml",
    );

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();
    let runtime = Arc::new(RuntimeSelectorConfig::from(result.expect("config")));

    let selector = BackendSelector::new(Arc::clone(&runtime) as Arc<dyn SelectorConfiguration>);
    let os = FakeOsContext::new(30);
    assert_eq!(selector.get_default(&os).expect("fallback"), BackendKind::AlarmManagerLegacy);

    runtime.set_enabled(BackendKind::AlarmManagerLegacy, false);
    assert_eq!(selector.get_default(&os), Err(JobApiError::NoUsableBackend));
}
