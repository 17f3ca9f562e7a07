use serde::{Deserialize, Serialize};

use crate::domain::{DescribeJob, Status};

/// Number of jobs per status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub created: usize,
    pub pending: usize,
    pub running: usize,
    pub success: usize,
    pub failed: usize,
    pub canceled: usize,
    pub skipped: usize,
    pub manual: usize,
    /// Failed, canceled or manual jobs whose `allow_failure` is set.
    pub tolerated: usize,
}

impl StatusCounts {
    pub fn collect<I>(jobs: I) -> Self
    where
        I: IntoIterator,
        I::Item: DescribeJob,
    {
        let mut counts = StatusCounts::default();
        for job in jobs {
            let job = job.descriptor();
            *counts.slot(job.status) += 1;
            if job.severity().is_tolerated() {
                counts.tolerated += 1;
            }
        }
        counts
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Created => self.created,
            Status::Pending => self.pending,
            Status::Running => self.running,
            Status::Success => self.success,
            Status::Failed => self.failed,
            Status::Canceled => self.canceled,
            Status::Skipped => self.skipped,
            Status::Manual => self.manual,
        }
    }

    pub fn total(&self) -> usize {
        Status::ALL.into_iter().map(|status| self.get(status)).sum()
    }

    fn slot(&mut self, status: Status) -> &mut usize {
        match status {
            Status::Created => &mut self.created,
            Status::Pending => &mut self.pending,
            Status::Running => &mut self.running,
            Status::Success => &mut self.success,
            Status::Failed => &mut self.failed,
            Status::Canceled => &mut self.canceled,
            Status::Skipped => &mut self.skipped,
            Status::Manual => &mut self.manual,
        }
    }
}
