//! Tally - severity counts of a job collection.
//!
//! Counting is commutative, so the resolved status cannot depend on the
//! order in which jobs are fed in.

use crate::domain::{DescribeJob, JobDescriptor, Severity, Status};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub blocking_manual: usize,
    pub hard_fail: usize,
    pub active: usize,
    pub canceled: usize,
    pub soft_canceled: usize,
    pub soft_fail: usize,
    pub soft_manual: usize,
    pub succeeded: usize,
    pub created: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, job: JobDescriptor) {
        self.total += 1;
        match job.severity() {
            Severity::BlockingManual => self.blocking_manual += 1,
            Severity::HardFail => self.hard_fail += 1,
            Severity::Active => self.active += 1,
            Severity::Canceled => self.canceled += 1,
            Severity::SoftCanceled => self.soft_canceled += 1,
            Severity::SoftFail => self.soft_fail += 1,
            Severity::SoftManual => self.soft_manual += 1,
            Severity::Ok => match job.status {
                Status::Success => self.succeeded += 1,
                Status::Created => self.created += 1,
                _ => {}
            },
        }
    }

    /// Combine two partial tallies (e.g. one per stage).
    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            total: self.total + other.total,
            blocking_manual: self.blocking_manual + other.blocking_manual,
            hard_fail: self.hard_fail + other.hard_fail,
            active: self.active + other.active,
            canceled: self.canceled + other.canceled,
            soft_canceled: self.soft_canceled + other.soft_canceled,
            soft_fail: self.soft_fail + other.soft_fail,
            soft_manual: self.soft_manual + other.soft_manual,
            succeeded: self.succeeded + other.succeeded,
            created: self.created + other.created,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Aggregate status, or `None` for an empty collection.
    ///
    /// First match wins:
    /// 1. blocking manual -> manual
    /// 2. hard failure -> failed
    /// 3. running/pending -> running
    /// 4. cancellation -> canceled
    /// 5. success (a tolerated cancellation counts as one) -> success
    /// 6. nothing started yet -> created
    /// 7. otherwise (skipped, tolerated failures, non-blocking manual) -> skipped
    pub fn resolve(&self) -> Option<Status> {
        if self.is_empty() {
            return None;
        }

        let status = if self.blocking_manual > 0 {
            Status::Manual
        } else if self.hard_fail > 0 {
            Status::Failed
        } else if self.active > 0 {
            Status::Running
        } else if self.canceled > 0 {
            Status::Canceled
        } else if self.succeeded + self.soft_canceled > 0 {
            Status::Success
        } else if self.created == self.total {
            Status::Created
        } else {
            Status::Skipped
        };
        Some(status)
    }
}

impl<D: DescribeJob> Extend<D> for Tally {
    fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
        for job in iter {
            self.add(job.descriptor());
        }
    }
}

impl<D: DescribeJob> FromIterator<D> for Tally {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        let mut tally = Tally::new();
        tally.extend(iter);
        tally
    }
}
