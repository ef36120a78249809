//! Reverse lookup client.
//!
//! Defines the [`PtrResolver`] seam the scan engine talks to and the
//! [`LookupOutcome`] each lookup is classified into. The production
//! implementation lives in [`dns`]; tests substitute in-memory resolvers.

pub mod dns;

pub use dns::DnsPtrResolver;

use crate::error::ScanError;
use crate::scanner::CancelSignal;
use async_trait::async_trait;
use std::fmt;
use std::net::Ipv4Addr;

/// Classified result of one PTR lookup.
#[derive(Debug)]
pub enum LookupOutcome {
    /// The resolver answered; records are kept in the order received.
    /// May be empty when the name exists but carries no PTR data.
    Answers(Vec<String>),
    /// Name error (NXDOMAIN): the resolver has no record for the address.
    NoRecord,
    /// Timeout, transport or protocol failure.
    Failed(ScanError),
    /// The sweep was cancelled before a query was sent.
    Cancelled,
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Answers(records) => write!(f, "{} record(s)", records.len()),
            Self::NoRecord => write!(f, "{}", ScanError::NoRecord),
            Self::Failed(err) => write!(f, "{}", err),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A client able to issue a single PTR query per address.
///
/// Implementations perform exactly one attempt with no retries, and must
/// return within the configured deadline.
#[async_trait]
pub trait PtrResolver: Send + Sync {
    /// Send one PTR query for `addr` and classify the reply.
    async fn query_ptr(&self, addr: Ipv4Addr) -> LookupOutcome;

    /// Look up `addr` unless the sweep has already been cancelled.
    ///
    /// No query is sent once `cancel` has fired.
    async fn lookup(&self, addr: Ipv4Addr, cancel: &CancelSignal) -> LookupOutcome {
        if cancel.is_cancelled() {
            return LookupOutcome::Cancelled;
        }
        self.query_ptr(addr).await
    }
}

/// The `in-addr.arpa` name queried for `addr`.
pub fn reverse_name(addr: Ipv4Addr) -> String {
    let [a, b, c, d] = addr.octets();
    format!("{}.{}.{}.{}.in-addr.arpa.", d, c, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingResolver {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PtrResolver for CountingResolver {
        async fn query_ptr(&self, _addr: Ipv4Addr) -> LookupOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            LookupOutcome::NoRecord
        }
    }

    #[test]
    fn test_reverse_name() {
        assert_eq!(
            reverse_name(Ipv4Addr::new(192, 168, 1, 20)),
            "20.1.168.192.in-addr.arpa."
        );
    }

    #[tokio::test]
    async fn test_lookup_queries_while_active() {
        let resolver = CountingResolver {
            calls: AtomicUsize::new(0),
        };
        let cancel = CancelSignal::new();

        let outcome = resolver.lookup(Ipv4Addr::new(10, 0, 0, 1), &cancel).await;
        assert!(matches!(outcome, LookupOutcome::NoRecord));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lookup_short_circuits_when_cancelled() {
        let resolver = CountingResolver {
            calls: AtomicUsize::new(0),
        };
        let cancel = CancelSignal::new();
        cancel.fire();

        let outcome = resolver.lookup(Ipv4Addr::new(10, 0, 0, 1), &cancel).await;
        assert!(matches!(outcome, LookupOutcome::Cancelled));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(LookupOutcome::NoRecord.to_string(), "NXDOMAIN - no local record");
        assert_eq!(
            LookupOutcome::Answers(vec!["a".into(), "b".into()]).to_string(),
            "2 record(s)"
        );
    }
}
