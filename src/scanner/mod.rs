//! Scanner module - the concurrent sweep engine.
//!
//! A sweep expands one CIDR block, feeds its addresses into a bounded job
//! queue from a single dispatcher task, and drains the queue with a fixed
//! number of worker tasks. Each worker runs one lookup at a time, so the
//! number of lookups in flight never exceeds the worker count.

pub mod cancel;
pub mod controller;
mod stats;

pub use cancel::CancelSignal;
pub use controller::{ScanController, SweepSummary};
pub use stats::{StatsSnapshot, SweepStats};

use crate::config::ScanConfig;
use crate::error::{ScanError, ScanResult};
use crate::output::Reporter;
use crate::resolver::{LookupOutcome, PtrResolver};
use crate::types::CidrBlock;
use futures::future::join_all;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, trace, warn};

/// Upper bound on queued-but-unclaimed addresses for one sweep.
pub const MAX_QUEUE_DEPTH: usize = 65_536;

type JobQueue = Arc<Mutex<mpsc::Receiver<Ipv4Addr>>>;

/// Result of sweeping one block.
#[derive(Debug, Clone)]
pub struct RangeReport {
    pub block: CidrBlock,
    pub stats: StatsSnapshot,
    /// Whether cancellation was observed before the block was drained.
    pub cancelled: bool,
    pub elapsed: Duration,
}

/// Runs sweeps with a shared resolver, configuration and cancellation signal.
pub struct ScanEngine {
    config: Arc<ScanConfig>,
    resolver: Arc<dyn PtrResolver>,
    reporter: Reporter,
    cancel: CancelSignal,
}

impl ScanEngine {
    pub fn new(
        config: ScanConfig,
        resolver: Arc<dyn PtrResolver>,
        reporter: Reporter,
        cancel: CancelSignal,
    ) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
            reporter,
            cancel,
        }
    }

    /// Sweep one CIDR block to completion or cancellation.
    ///
    /// Fails only when `cidr` does not parse, in which case nothing is
    /// dispatched. Individual lookup failures are reported, not returned.
    /// Returns after every worker has exited.
    pub async fn scan_range(&self, cidr: &str) -> ScanResult<RangeReport> {
        let block = CidrBlock::parse(cidr)?;
        let start = Instant::now();
        self.reporter.range_header(&block);

        let depth = usize::try_from(block.len())
            .unwrap_or(MAX_QUEUE_DEPTH)
            .clamp(1, MAX_QUEUE_DEPTH);
        let (tx, rx) = mpsc::channel(depth);
        let jobs: JobQueue = Arc::new(Mutex::new(rx));
        let stats = Arc::new(SweepStats::default());

        let worker_count = self.config.workers.max(1);
        debug!(%block, addresses = block.len(), workers = worker_count, depth, "starting sweep");

        let workers: Vec<_> = (0..worker_count)
            .map(|id| {
                tokio::spawn(worker(
                    id,
                    Arc::clone(&jobs),
                    Arc::clone(&self.resolver),
                    Arc::clone(&self.config),
                    self.reporter.clone(),
                    self.cancel.clone(),
                    Arc::clone(&stats),
                ))
            })
            .collect();
        // Workers hold the only receivers from here on.
        drop(jobs);

        let dispatcher = tokio::spawn(dispatch(block.addresses(), tx, self.cancel.clone()));

        for result in join_all(workers).await {
            if let Err(e) = result {
                warn!(%block, "worker task failed: {}", e);
            }
        }

        match dispatcher.await {
            Ok(sent) => stats.record_dispatched(sent),
            Err(e) => warn!(%block, "dispatcher task failed: {}", e),
        }

        let report = RangeReport {
            stats: stats.snapshot(),
            cancelled: self.cancel.is_cancelled(),
            elapsed: start.elapsed(),
            block,
        };
        debug!(
            block = %report.block,
            dispatched = report.stats.dispatched,
            answered = report.stats.answered,
            cancelled = report.cancelled,
            "sweep drained"
        );
        Ok(report)
    }
}

/// Feed addresses into the queue in order until exhausted or cancelled.
///
/// Dropping `tx` on return closes the queue, exactly once on either path.
async fn dispatch(
    addresses: impl Iterator<Item = Ipv4Addr>,
    tx: mpsc::Sender<Ipv4Addr>,
    cancel: CancelSignal,
) -> u64 {
    let mut sent = 0;
    for addr in addresses {
        if cancel.is_cancelled() {
            break;
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            res = tx.send(addr) => {
                if res.is_err() {
                    // Every worker is gone.
                    break;
                }
                sent += 1;
            }
        }
    }
    trace!(sent, "dispatcher done");
    sent
}

async fn next_job(jobs: &JobQueue) -> Option<Ipv4Addr> {
    jobs.lock().await.recv().await
}

async fn worker(
    id: usize,
    jobs: JobQueue,
    resolver: Arc<dyn PtrResolver>,
    config: Arc<ScanConfig>,
    reporter: Reporter,
    cancel: CancelSignal,
    stats: Arc<SweepStats>,
) {
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            job = next_job(&jobs) => job,
        };
        let Some(addr) = next else {
            break;
        };

        let outcome = resolver.lookup(addr, &cancel).await;
        stats.record(&outcome);
        trace!(worker = id, %addr, %outcome, "lookup finished");

        match outcome {
            LookupOutcome::Answers(records) => reporter.answers(addr, &records),
            LookupOutcome::NoRecord if config.verbose => {
                reporter.negative(addr, &ScanError::NoRecord)
            }
            LookupOutcome::Failed(err) if config.verbose => reporter.negative(addr, &err),
            _ => {}
        }
    }
    trace!(worker = id, "worker exiting");
}
