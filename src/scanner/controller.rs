//! Runs a list of sweeps one after another.
//!
//! The controller owns the single [`CancelSignal`] of the process. Every
//! sweep, worker and dispatcher observes the same signal, and it is only
//! ever fired through [`ScanController::stop`] or the abort key, which share
//! one stop path.

use super::{CancelSignal, RangeReport, ScanEngine, StatsSnapshot};
use crate::config::ScanConfig;
use crate::error::ScanResult;
use crate::output::Reporter;
use crate::resolver::PtrResolver;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Totals across every sweep of one run.
#[derive(Debug, Clone, Default)]
pub struct SweepSummary {
    /// Blocks that were swept (fully or until cancelled).
    pub ranges_scanned: usize,
    pub stats: StatsSnapshot,
    pub elapsed: Duration,
    pub cancelled: bool,
}

impl SweepSummary {
    fn absorb(&mut self, report: &RangeReport) {
        self.ranges_scanned += 1;
        self.stats += report.stats;
    }
}

/// Sequential multi-range sweeper.
pub struct ScanController {
    engine: ScanEngine,
    reporter: Reporter,
    cancel: CancelSignal,
}

impl ScanController {
    pub fn new(config: ScanConfig, resolver: Arc<dyn PtrResolver>, reporter: Reporter) -> Self {
        let cancel = CancelSignal::new();
        Self {
            engine: ScanEngine::new(config, resolver, reporter.clone(), cancel.clone()),
            reporter,
            cancel,
        }
    }

    /// A handle on the shared signal, for observers.
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Stop the run. Returns `false` if it was already stopped.
    pub fn stop(&self) -> bool {
        stop_sweep(&self.cancel)
    }

    /// Sweep each range in order, each fully before the next.
    ///
    /// An invalid range aborts the run with its error; the ranges after it
    /// are not touched. After cancellation the remaining ranges are skipped.
    /// Total elapsed time is reported once, at the end.
    pub async fn run<S: AsRef<str>>(&self, ranges: &[S]) -> ScanResult<SweepSummary> {
        let start = Instant::now();
        let mut summary = SweepSummary::default();

        for (idx, cidr) in ranges.iter().enumerate() {
            if self.cancel.is_cancelled() {
                debug!(skipped = ranges.len() - idx, "skipping remaining ranges");
                break;
            }
            let report = self.engine.scan_range(cidr.as_ref()).await?;
            summary.absorb(&report);
        }

        summary.elapsed = start.elapsed();
        summary.cancelled = self.cancel.is_cancelled();
        self.reporter.finished(summary.elapsed);

        info!(
            ranges = summary.ranges_scanned,
            dispatched = summary.stats.dispatched,
            answered = summary.stats.answered,
            records = summary.stats.records,
            no_record = summary.stats.no_record,
            failed = summary.stats.failed,
            cancelled = summary.cancelled,
            "sweep finished in {:.2?}",
            summary.elapsed
        );
        Ok(summary)
    }

    /// Stop the run when one line arrives on `input`.
    ///
    /// Performs a single read in the background. End of input leaves the run
    /// going.
    pub fn abort_on_input<R>(&self, input: R) -> JoinHandle<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let cancel = self.cancel.clone();
        let reporter = self.reporter.clone();

        tokio::spawn(async move {
            let mut line = String::new();
            match BufReader::new(input).read_line(&mut line).await {
                Ok(0) => debug!("input closed, abort key disabled"),
                Ok(_) => {
                    reporter.line("Enter pressed, stopping scan...");
                    stop_sweep(&cancel);
                }
                Err(e) => warn!("failed to read abort key: {}", e),
            }
        })
    }
}

fn stop_sweep(cancel: &CancelSignal) -> bool {
    let fired = cancel.fire();
    if fired {
        warn!("scan cancelled");
    }
    fired
}
