//! PTR lookups over the wire.
//!
//! Sends each query to the single configured resolver endpoint using the
//! trust-dns async resolver, with retries and the hosts file disabled.

use super::{reverse_name, LookupOutcome, PtrResolver};
use crate::config::ScanConfig;
use crate::error::ScanError;
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::time::timeout;
use tracing::trace;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::TokioAsyncResolver;

/// PTR resolver bound to one upstream endpoint.
///
/// Cheap to share: workers hold it behind an `Arc` and call
/// [`PtrResolver::lookup`] concurrently.
pub struct DnsPtrResolver {
    resolver: TokioAsyncResolver,
    endpoint: SocketAddr,
    timeout: Duration,
}

impl DnsPtrResolver {
    /// Create a resolver from the sweep configuration.
    pub fn new(config: &ScanConfig) -> Self {
        let servers = NameServerConfigGroup::from_ips_clear(
            &[config.resolver.ip()],
            config.resolver.port(),
            true,
        );
        let resolver_config = ResolverConfig::from_parts(None, vec![], servers);

        Self {
            resolver: TokioAsyncResolver::tokio(resolver_config, Self::options(config)),
            endpoint: config.resolver,
            timeout: config.timeout,
        }
    }

    /// Resolver options for a single-attempt query.
    fn options(config: &ScanConfig) -> ResolverOpts {
        let mut opts = ResolverOpts::default();
        opts.timeout = config.timeout;
        // Retries after the first failure; a single attempt is final.
        opts.attempts = 0;
        opts.recursion_desired = config.recursion;
        opts.use_hosts_file = false;
        opts
    }

    fn classify_error(&self, err: ResolveError) -> LookupOutcome {
        match err.kind() {
            ResolveErrorKind::NoRecordsFound { response_code, .. }
                if *response_code == ResponseCode::NXDomain =>
            {
                LookupOutcome::NoRecord
            }
            ResolveErrorKind::NoRecordsFound { response_code, .. }
                if *response_code == ResponseCode::NoError =>
            {
                LookupOutcome::Answers(Vec::new())
            }
            ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                LookupOutcome::Failed(ScanError::LookupFailure(response_code.to_string()))
            }
            ResolveErrorKind::Timeout => LookupOutcome::Failed(ScanError::Timeout(self.timeout)),
            _ => LookupOutcome::Failed(ScanError::LookupFailure(err.to_string())),
        }
    }
}

#[async_trait]
impl PtrResolver for DnsPtrResolver {
    async fn query_ptr(&self, addr: Ipv4Addr) -> LookupOutcome {
        trace!(%addr, name = %reverse_name(addr), server = %self.endpoint, "PTR query");

        match timeout(self.timeout, self.resolver.reverse_lookup(IpAddr::V4(addr))).await {
            Ok(Ok(lookup)) => LookupOutcome::Answers(
                lookup
                    .as_lookup()
                    .records()
                    .iter()
                    .map(|record| record.to_string())
                    .collect(),
            ),
            Ok(Err(e)) => self.classify_error(e),
            Err(_) => LookupOutcome::Failed(ScanError::Timeout(self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::CancelSignal;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::net::UdpSocket;
    use trust_dns_resolver::proto::op::{Message, MessageType};
    use trust_dns_resolver::proto::rr::rdata::PTR;
    use trust_dns_resolver::proto::rr::{Name, RData, Record};
    use trust_dns_resolver::proto::serialize::binary::BinEncodable;

    /// Answers `1.1.168.192.in-addr.arpa.` with one PTR, `.2` with an empty
    /// NOERROR reply, `.9` with REFUSED and everything else with NXDOMAIN.
    /// Records whether any query arrived with RD set.
    async fn spawn_stub_server(saw_rd: Arc<AtomicBool>) -> SocketAddr {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            loop {
                let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                    return;
                };
                let Ok(request) = Message::from_vec(&buf[..len]) else {
                    continue;
                };
                if request.recursion_desired() {
                    saw_rd.store(true, Ordering::SeqCst);
                }

                let mut reply = Message::new();
                reply
                    .set_id(request.id())
                    .set_message_type(MessageType::Response)
                    .set_op_code(request.op_code())
                    .set_recursion_desired(request.recursion_desired())
                    .add_queries(request.queries().to_vec());

                let query_name = request.queries()[0].name().clone();
                match query_name.to_string().as_str() {
                    "1.1.168.192.in-addr.arpa." => {
                        let target = Name::from_ascii("router.lan.").unwrap();
                        reply.add_answer(Record::from_rdata(
                            query_name,
                            300,
                            RData::PTR(PTR(target)),
                        ));
                    }
                    "2.1.168.192.in-addr.arpa." => {}
                    "9.1.168.192.in-addr.arpa." => {
                        reply.set_response_code(ResponseCode::Refused);
                    }
                    _ => {
                        reply.set_response_code(ResponseCode::NXDomain);
                    }
                }

                let bytes = reply.to_bytes().unwrap();
                let _ = socket.send_to(&bytes, peer).await;
            }
        });

        addr
    }

    #[tokio::test]
    async fn test_answer_and_name_error_from_server() {
        let saw_rd = Arc::new(AtomicBool::new(false));
        let server = spawn_stub_server(Arc::clone(&saw_rd)).await;
        let config = ScanConfig::new(server).with_timeout(Duration::from_secs(2));
        let resolver = DnsPtrResolver::new(&config);
        let cancel = CancelSignal::new();

        match resolver.lookup(Ipv4Addr::new(192, 168, 1, 1), &cancel).await {
            LookupOutcome::Answers(records) => {
                assert_eq!(records.len(), 1);
                assert!(records[0].contains("PTR"));
                assert!(records[0].contains("router.lan."));
            }
            other => panic!("expected answers, got {:?}", other),
        }

        let outcome = resolver.lookup(Ipv4Addr::new(192, 168, 1, 4), &cancel).await;
        assert!(matches!(outcome, LookupOutcome::NoRecord), "{:?}", outcome);
        assert!(!saw_rd.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_empty_noerror_is_empty_answer() {
        let server = spawn_stub_server(Arc::new(AtomicBool::new(false))).await;
        let resolver = DnsPtrResolver::new(&ScanConfig::new(server));

        let outcome = resolver
            .lookup(Ipv4Addr::new(192, 168, 1, 2), &CancelSignal::new())
            .await;
        match outcome {
            LookupOutcome::Answers(records) => assert!(records.is_empty()),
            other => panic!("expected empty answers, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refused_is_failure() {
        let server = spawn_stub_server(Arc::new(AtomicBool::new(false))).await;
        let resolver = DnsPtrResolver::new(&ScanConfig::new(server));

        let outcome = resolver
            .lookup(Ipv4Addr::new(192, 168, 1, 9), &CancelSignal::new())
            .await;
        match outcome {
            LookupOutcome::Failed(ScanError::LookupFailure(reason)) => {
                assert!(reason.to_lowercase().contains("refused"), "{}", reason);
            }
            other => panic!("expected lookup failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recursion_bit_is_sent() {
        let saw_rd = Arc::new(AtomicBool::new(false));
        let server = spawn_stub_server(Arc::clone(&saw_rd)).await;
        let config = ScanConfig::new(server).with_recursion(true);
        let resolver = DnsPtrResolver::new(&config);

        let _ = resolver
            .lookup(Ipv4Addr::new(192, 168, 1, 3), &CancelSignal::new())
            .await;
        assert!(saw_rd.load(Ordering::SeqCst));
    }

    #[test]
    fn test_options_follow_config() {
        let config = ScanConfig::new("127.0.0.1:53".parse().unwrap())
            .with_timeout(Duration::from_millis(750))
            .with_recursion(true);
        let opts = DnsPtrResolver::options(&config);
        assert_eq!(opts.timeout, Duration::from_millis(750));
        assert_eq!(opts.attempts, 0);
        assert!(opts.recursion_desired);
        assert!(!opts.use_hosts_file);
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // Bound but never answers.
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let config = ScanConfig::new(socket.local_addr().unwrap())
            .with_timeout(Duration::from_millis(200));
        let resolver = DnsPtrResolver::new(&config);

        let outcome = resolver
            .lookup(Ipv4Addr::new(192, 0, 2, 1), &CancelSignal::new())
            .await;
        assert!(matches!(outcome, LookupOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_cancelled_lookup_sends_nothing() {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let config = ScanConfig::new(socket.local_addr().unwrap())
            .with_timeout(Duration::from_millis(200));
        let resolver = DnsPtrResolver::new(&config);
        let cancel = CancelSignal::new();
        cancel.fire();

        let outcome = resolver.lookup(Ipv4Addr::new(192, 0, 2, 1), &cancel).await;
        assert!(matches!(outcome, LookupOutcome::Cancelled));

        let mut buf = [0u8; 512];
        let received =
            tokio::time::timeout(Duration::from_millis(100), socket.recv_from(&mut buf)).await;
        assert!(received.is_err(), "no datagram should reach the server");
    }
}
