//! Scheduling backend selection
//!
//! - **[`availability`]**: can a backend be used on this device right now
//! - **[`selector`]**: first usable backend in preference order
//! - **[`proxy_cache`]**: one lazily built proxy per backend
//! - **[`service`]**: the `JobApi` facade over all three

pub mod availability;
pub mod ports;
pub mod proxy_cache;
pub mod selector;
pub mod service;
