//! Configuration management for ptrsweep.
//!
//! Covers the immutable per-run [`ScanConfig`], optional settings-file
//! defaults, and discovery of the resolver endpoint.

mod scan_config;
mod settings;
mod system;

pub use scan_config::{ScanConfig, DEFAULT_TIMEOUT, DEFAULT_WORKERS, DNS_PORT};
pub use settings::{default_settings_file, AppSettings};
pub use system::{
    discover_resolver, nameserver_from_resolv_conf, parse_endpoint_literal, resolve_endpoint,
    system_nameserver, RESOLV_CONF,
};
