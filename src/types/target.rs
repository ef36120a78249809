//! Target selection from the `--cidr` argument.
//!
//! Supports:
//! - An empty value: the three RFC 1918 private ranges
//! - `k8s`: the usual Kubernetes service ranges
//! - Anything else: one CIDR block

use std::fmt;

/// RFC 1918 private ranges, swept when no range is given.
pub const PRIVATE_RANGES: [&str; 3] = ["192.168.0.0/16", "172.16.0.0/12", "10.0.0.0/8"];

/// Common cluster service ranges.
pub const K8S_RANGES: [&str; 4] = [
    "10.96.0.0/12",
    "10.100.0.0/16",
    "10.0.0.0/16",
    "172.20.0.0/16",
];

/// The list of CIDR blocks a run will sweep, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSet {
    /// The private ranges in [`PRIVATE_RANGES`].
    Private,
    /// The cluster ranges in [`K8S_RANGES`].
    Kubernetes,
    /// A single operator-supplied block, validated when its sweep starts.
    Single(String),
}

impl TargetSet {
    /// Interpret a `--cidr` value.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" => Self::Private,
            "k8s" => Self::Kubernetes,
            other => Self::Single(other.to_string()),
        }
    }

    /// The CIDR strings to sweep, in sweep order.
    pub fn ranges(&self) -> Vec<String> {
        match self {
            Self::Private => PRIVATE_RANGES.iter().map(|r| r.to_string()).collect(),
            Self::Kubernetes => K8S_RANGES.iter().map(|r| r.to_string()).collect(),
            Self::Single(cidr) => vec![cidr.clone()],
        }
    }
}

impl Default for TargetSet {
    fn default() -> Self {
        Self::Private
    }
}

impl fmt::Display for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private => write!(f, "private ranges"),
            Self::Kubernetes => write!(f, "k8s service ranges"),
            Self::Single(cidr) => write!(f, "{}", cidr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CidrBlock;

    #[test]
    fn test_empty_selects_private_ranges() {
        let set = TargetSet::parse("");
        assert_eq!(set, TargetSet::Private);
        assert_eq!(
            set.ranges(),
            vec!["192.168.0.0/16", "172.16.0.0/12", "10.0.0.0/8"]
        );
    }

    #[test]
    fn test_k8s_keyword() {
        let set = TargetSet::parse("k8s");
        assert_eq!(set, TargetSet::Kubernetes);
        assert_eq!(set.ranges().len(), 4);
        assert_eq!(set.ranges()[0], "10.96.0.0/12");
    }

    #[test]
    fn test_single_block_is_passed_through() {
        let set = TargetSet::parse(" 192.168.1.0/24 ");
        assert_eq!(set.ranges(), vec!["192.168.1.0/24"]);
    }

    #[test]
    fn test_builtin_ranges_are_valid() {
        for cidr in PRIVATE_RANGES.iter().chain(K8S_RANGES.iter()) {
            assert!(CidrBlock::parse(cidr).is_ok(), "{} should parse", cidr);
        }
    }
}
