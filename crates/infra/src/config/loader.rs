//! Configuration loader
//!
//! Loads selector configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If any environment variable is set, loads from the environment (an
//!    invalid value is an error)
//! 2. If none are set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `JOBAPI_FORCE_ALLOW_LEGACY`: Treat the legacy fallback as always
//!   available (true/false)
//! - `JOBAPI_DISABLED_BACKENDS`: Comma-separated backend names to disable,
//!   e.g. `v_26,v_24`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./jobapi.json` or `./jobapi.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use jobapi_domain::constants::{ENV_DISABLED_BACKENDS, ENV_FORCE_ALLOW_LEGACY};
use jobapi_domain::{BackendKind, JobApiError, Result, SchedulerConfig};

const CONFIG_FILE_NAMES: [&str; 4] = ["jobapi.json", "jobapi.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// Environment variables win when any of them is set; a bad value is an
/// error, never a reason to fall back. Only when none is set does loading
/// fall back to a config file.
///
/// # Errors
/// Returns `JobApiError::Config` if:
/// - An environment variable is set but invalid
/// - No environment variable is set and no config file can be loaded
/// - File format is invalid
/// - A backend name is unknown
pub fn load() -> Result<SchedulerConfig> {
    load_with_file(None)
}

/// [`load`] with an explicit fallback file instead of probing
fn load_with_file(path: Option<PathBuf>) -> Result<SchedulerConfig> {
    if !env_configured() {
        tracing::debug!("No JobApi environment variables set, trying file");
        return load_from_file(path);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Whether any configuration environment variable is set
fn env_configured() -> bool {
    std::env::var_os(ENV_FORCE_ALLOW_LEGACY).is_some()
        || std::env::var_os(ENV_DISABLED_BACKENDS).is_some()
}

/// Load configuration from environment variables
///
/// At least one of the variables must be set; the other defaults to "not
/// forced" / "nothing disabled".
///
/// # Errors
/// Returns `JobApiError::Config` if no variable is set or a disabled backend
/// name is unknown.
pub fn load_from_env() -> Result<SchedulerConfig> {
    if !env_configured() {
        return Err(JobApiError::Config(format!(
            "Missing environment variables: set {ENV_FORCE_ALLOW_LEGACY} or {ENV_DISABLED_BACKENDS}"
        )));
    }

    let disabled = std::env::var(ENV_DISABLED_BACKENDS).unwrap_or_default();
    let mut config = SchedulerConfig::default()
        .with_force_allow_legacy(env_bool(ENV_FORCE_ALLOW_LEGACY, false));
    for kind in parse_backend_list(&disabled)? {
        config.set_backend_enabled(kind, false);
    }
    Ok(config)
}

/// Parse a comma-separated list of backend names
///
/// Blank entries are skipped.
///
/// # Errors
/// Returns `JobApiError::Config` on the first unknown name.
fn parse_backend_list(list: &str) -> Result<Vec<BackendKind>> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<BackendKind>()
                .map_err(|e| JobApiError::Config(format!("Invalid {ENV_DISABLED_BACKENDS}: {e}")))
        })
        .collect()
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `JobApiError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A backend name is unknown
pub fn load_from_file(path: Option<PathBuf>) -> Result<SchedulerConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(JobApiError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            JobApiError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| JobApiError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse and validate configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `JobApiError::Config` if format is invalid, parsing fails, or a
/// backend name is unknown.
fn parse_config(contents: &str, path: &Path) -> Result<SchedulerConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: SchedulerConfig = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| JobApiError::Config(format!("Invalid TOML format: {e}")))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| JobApiError::Config(format!("Invalid JSON format: {e}")))?,
        _ => return Err(JobApiError::Config(format!("Unsupported config format: {extension}"))),
    };

    config.validate()
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, its parent and grandparent, then the
/// same three levels relative to the executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| [root.clone(), root.join(".."), root.join("../..")])
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find(|path| path.exists())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
pub(crate) fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
