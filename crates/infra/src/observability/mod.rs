//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events. Binaries embedding JobApi call
//! [`init_tracing`] once at startup, or install their own subscriber.
//!
//! - `JOBAPI_LOG`: filter directives, e.g. `jobapi_core=debug` (default `info`)
//! - `JOBAPI_LOG_JSON`: emit JSON lines instead of human-readable output

use jobapi_domain::constants::{ENV_LOG_FILTER, ENV_LOG_JSON};
use tracing_subscriber::EnvFilter;

use crate::config::loader::env_bool;

/// Install the global fmt subscriber
///
/// Returns `false` if a global subscriber was already set; the existing one
/// is left in place.
pub fn init_tracing() -> bool {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter()).with_target(true);

    let installed = if env_bool(ENV_LOG_JSON, false) {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::debug!(json = env_bool(ENV_LOG_JSON, false), "observability.tracing_initialized");
    }
    installed
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        let _ = init_tracing();
        assert!(!init_tracing());
    }
}
