//! Resolver endpoint discovery.
//!
//! Turns the operator's `--dns` value, or the first nameserver of the system
//! resolver configuration, into the socket address every lookup is sent to.

use super::scan_config::DNS_PORT;
use crate::error::{ScanError, ScanResult};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tracing::debug;

/// System resolver configuration file.
pub const RESOLV_CONF: &str = "/etc/resolv.conf";

/// First nameserver listed in resolv.conf-formatted `contents`.
pub fn nameserver_from_resolv_conf(contents: &[u8]) -> ScanResult<IpAddr> {
    let cfg = resolv_conf::Config::parse(contents)
        .map_err(|e| ScanError::MissingResolver(format!("unreadable resolver config: {}", e)))?;

    cfg.nameservers
        .first()
        .map(|ns| -> IpAddr { ns.clone().into() })
        .ok_or_else(|| ScanError::MissingResolver("no nameserver entry found".to_string()))
}

/// First nameserver of the resolver config at `path`.
pub fn system_nameserver(path: &Path) -> ScanResult<IpAddr> {
    let contents = fs::read(path).map_err(|e| {
        ScanError::MissingResolver(format!("cannot read {}: {}", path.display(), e))
    })?;
    nameserver_from_resolv_conf(&contents)
}

/// Parse an endpoint that is already a literal address, with or without port.
pub fn parse_endpoint_literal(spec: &str) -> Option<SocketAddr> {
    if let Ok(addr) = spec.parse::<SocketAddr>() {
        return Some(addr);
    }
    spec.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
}

/// Resolve a `host[:port]` endpoint to a socket address.
///
/// Literal addresses are used as-is; hostnames are looked up once through the
/// system resolver. The port defaults to 53.
pub async fn resolve_endpoint(spec: &str) -> ScanResult<SocketAddr> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ScanError::MissingResolver("empty DNS server".to_string()));
    }

    if let Some(addr) = parse_endpoint_literal(spec) {
        return Ok(addr);
    }

    let target = if spec.contains(':') {
        spec.to_string()
    } else {
        format!("{}:{}", spec, DNS_PORT)
    };

    let mut addrs = tokio::net::lookup_host(target)
        .await
        .map_err(|e| ScanError::MissingResolver(format!("cannot resolve '{}': {}", spec, e)))?;

    let addr = addrs
        .next()
        .ok_or_else(|| ScanError::MissingResolver(format!("no address for '{}'", spec)))?;
    debug!(%spec, %addr, "resolved DNS server");
    Ok(addr)
}

/// Pick the resolver endpoint: an explicit value if given, else the first
/// nameserver in `resolv_conf`.
pub async fn discover_resolver(explicit: Option<&str>, resolv_conf: &Path) -> ScanResult<SocketAddr> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(spec) => resolve_endpoint(spec).await,
        None => {
            let ip = system_nameserver(resolv_conf)?;
            debug!(%ip, path = %resolv_conf.display(), "using system nameserver");
            Ok(SocketAddr::new(ip, DNS_PORT))
        }
    }
}
