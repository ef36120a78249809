//! Outcome counters for a sweep.

use crate::resolver::LookupOutcome;
use std::ops::AddAssign;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated concurrently by the workers of one sweep.
#[derive(Debug, Default)]
pub struct SweepStats {
    dispatched: AtomicU64,
    answered: AtomicU64,
    records: AtomicU64,
    no_record: AtomicU64,
    failed: AtomicU64,
    cancelled: AtomicU64,
}

impl SweepStats {
    pub fn record_dispatched(&self, count: u64) {
        self.dispatched.fetch_add(count, Ordering::Relaxed);
    }

    /// Count one classified lookup.
    pub fn record(&self, outcome: &LookupOutcome) {
        match outcome {
            LookupOutcome::Answers(records) => {
                self.answered.fetch_add(1, Ordering::Relaxed);
                self.records.fetch_add(records.len() as u64, Ordering::Relaxed);
            }
            LookupOutcome::NoRecord => {
                self.no_record.fetch_add(1, Ordering::Relaxed);
            }
            LookupOutcome::Failed(_) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
            LookupOutcome::Cancelled => {
                self.cancelled.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            answered: self.answered.load(Ordering::Relaxed),
            records: self.records.load(Ordering::Relaxed),
            no_record: self.no_record.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`SweepStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Addresses fed into the job queue.
    pub dispatched: u64,
    /// Lookups that got a reply (possibly with zero records).
    pub answered: u64,
    /// Answer records printed.
    pub records: u64,
    pub no_record: u64,
    pub failed: u64,
    /// Lookups skipped because cancellation was observed first.
    pub cancelled: u64,
}

impl StatsSnapshot {
    /// Lookups that actually went out to the resolver.
    pub fn queried(&self) -> u64 {
        self.answered + self.no_record + self.failed
    }
}

impl AddAssign for StatsSnapshot {
    fn add_assign(&mut self, other: Self) {
        self.dispatched += other.dispatched;
        self.answered += other.answered;
        self.records += other.records;
        self.no_record += other.no_record;
        self.failed += other.failed;
        self.cancelled += other.cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;

    #[test]
    fn test_counts_each_outcome() {
        let stats = SweepStats::default();
        stats.record_dispatched(5);
        stats.record(&LookupOutcome::Answers(vec!["a".into(), "b".into()]));
        stats.record(&LookupOutcome::NoRecord);
        stats.record(&LookupOutcome::NoRecord);
        stats.record(&LookupOutcome::Failed(ScanError::LookupFailure("refused".into())));
        stats.record(&LookupOutcome::Cancelled);

        let snap = stats.snapshot();
        assert_eq!(snap.dispatched, 5);
        assert_eq!(snap.answered, 1);
        assert_eq!(snap.records, 2);
        assert_eq!(snap.no_record, 2);
        assert_eq!(snap.failed, 1);
        assert_eq!(snap.cancelled, 1);
        assert_eq!(snap.queried(), 4);
    }

    #[test]
    fn test_snapshots_add_up() {
        let mut total = StatsSnapshot::default();
        total += StatsSnapshot {
            dispatched: 4,
            answered: 1,
            records: 1,
            no_record: 3,
            ..Default::default()
        };
        total += StatsSnapshot {
            dispatched: 2,
            failed: 2,
            ..Default::default()
        };
        assert_eq!(total.dispatched, 6);
        assert_eq!(total.queried(), 6);
    }
}
