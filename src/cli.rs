//! Command-line interface definitions for ptrsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use crate::config::{AppSettings, ScanConfig};
use crate::error::ScanResult;
use crate::types::TargetSet;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Sweep IPv4 ranges with reverse DNS (PTR) lookups.
#[derive(Parser, Debug)]
#[command(name = "ptrsweep")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent reverse DNS sweeper", long_about = None)]
pub struct Args {
    /// CIDR range to sweep (e.g. 192.168.0.0/16), "k8s" for cluster service
    /// ranges, or empty for all private ranges
    #[arg(long, default_value = "", value_name = "CIDR")]
    pub cidr: String,

    /// Number of concurrent workers [default: 64]
    #[arg(short, long, env = "PTRSWEEP_WORKERS", value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Timeout for each DNS lookup (e.g. "2s", "500ms") [default: 2s]
    #[arg(short, long, env = "PTRSWEEP_TIMEOUT", value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// DNS server (IP[:port] or hostname[:port]); defaults to the first
    /// nameserver in /etc/resolv.conf
    #[arg(short, long, env = "PTRSWEEP_DNS", value_name = "HOST[:PORT]")]
    pub dns: Option<String>,

    /// Show failed and negative lookups too
    #[arg(short, long)]
    pub verbose: bool,

    /// Ask the server to perform recursion
    #[arg(short, long)]
    pub recursion: bool,

    /// Ignore keyboard input (do not stop on Enter)
    #[arg(long)]
    pub noinput: bool,

    /// Path to a settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,
}

impl Args {
    /// Ranges selected by `--cidr`.
    pub fn targets(&self) -> TargetSet {
        TargetSet::parse(&self.cidr)
    }

    /// Settings from `--config`, or from the default location if present.
    pub fn load_settings(&self) -> ScanResult<AppSettings> {
        let settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load()?,
        };
        Ok(settings)
    }

    /// The resolver endpoint asked for, if any.
    pub fn dns_spec(&self, settings: &AppSettings) -> Option<String> {
        self.dns
            .clone()
            .or_else(|| settings.dns.clone())
            .filter(|s| !s.trim().is_empty())
    }

    /// Combine flags and settings into the sweep configuration. Flags win.
    pub fn scan_config(&self, settings: &AppSettings, resolver: SocketAddr) -> ScanConfig {
        ScanConfig::new(resolver)
            .with_workers(self.workers.unwrap_or(settings.workers))
            .with_timeout(
                self.timeout
                    .unwrap_or_else(|| Duration::from_millis(settings.timeout_ms)),
            )
            .with_verbose(self.verbose || settings.verbose)
            .with_recursion(self.recursion || settings.recursion)
    }
}

/// Parse a worker count, which must be at least one.
pub fn parse_workers(s: &str) -> Result<usize, String> {
    let workers: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid worker count: {}", s))?;
    if workers == 0 {
        return Err("worker count must be at least 1".to_string());
    }
    Ok(workers)
}
