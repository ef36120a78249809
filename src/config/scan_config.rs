//! The immutable configuration shared by every worker of a sweep.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Default number of concurrent lookup workers.
pub const DEFAULT_WORKERS: usize = 64;

/// Default per-lookup timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default DNS port when an endpoint omits one.
pub const DNS_PORT: u16 = 53;

/// Configuration for a sweep.
///
/// Built once at startup and never mutated afterwards; the engine wraps it in
/// an `Arc` and hands a clone to each worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Number of concurrent lookup workers.
    pub workers: usize,
    /// Deadline for a single PTR lookup.
    pub timeout: Duration,
    /// Resolver endpoint queried for every address.
    pub resolver: SocketAddr,
    /// Set the recursion-desired bit on queries.
    pub recursion: bool,
    /// Report negative and failed lookups too.
    pub verbose: bool,
}

impl ScanConfig {
    /// Create a new configuration against the given resolver.
    pub fn new(resolver: SocketAddr) -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout: DEFAULT_TIMEOUT,
            resolver,
            recursion: false,
            verbose: false,
        }
    }

    /// Set the worker count. Zero is raised to one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_recursion(mut self, recursion: bool) -> Self {
        self.recursion = recursion;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from((Ipv4Addr::LOCALHOST, DNS_PORT)))
    }
}

impl fmt::Display for ScanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Workers: {}, Timeout: {}, DNS: {}",
            self.workers,
            humantime::format_duration(self.timeout),
            self.resolver
        )?;
        if self.verbose {
            write!(f, ", Verbose")?;
        }
        if self.recursion {
            write!(f, ", Recursive")?;
        }
        Ok(())
    }
}
