//! IPv4 CIDR blocks and the addresses they cover.

use crate::error::{ScanError, ScanResult};
use ipnetwork::Ipv4Network;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// A parsed IPv4 CIDR block.
///
/// Keeps the text the operator typed so headers and errors echo it back
/// unchanged, while enumeration always starts at the masked network address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidrBlock {
    original: String,
    network: Ipv4Network,
}

impl CidrBlock {
    /// Parse a `a.b.c.d/len` string.
    ///
    /// A bare address without a prefix length is rejected, as is anything
    /// that is not IPv4.
    pub fn parse(s: &str) -> ScanResult<Self> {
        let trimmed = s.trim();
        if !trimmed.contains('/') {
            return Err(ScanError::invalid_range(s, "missing prefix length"));
        }

        let network: Ipv4Network = trimmed
            .parse()
            .map_err(|e| ScanError::invalid_range(s, e))?;

        Ok(Self {
            original: trimmed.to_string(),
            network,
        })
    }

    /// The block as the operator wrote it.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// First address of the block (the network address).
    pub fn first(&self) -> Ipv4Addr {
        self.network.network()
    }

    /// Last address of the block (the broadcast address).
    pub fn last(&self) -> Ipv4Addr {
        self.network.broadcast()
    }

    /// Number of addresses covered, network and broadcast included.
    pub fn len(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix()))
    }

    /// Always false: even a /32 covers one address.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every address in the block in ascending numeric order.
    ///
    /// The sequence is produced lazily; ordering and count are the same as
    /// a fully materialized list.
    pub fn addresses(&self) -> impl Iterator<Item = Ipv4Addr> + Send + 'static {
        let start = u32::from(self.first());
        let end = u32::from(self.last());
        (start..=end).map(Ipv4Addr::from)
    }
}

impl FromStr for CidrBlock {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
