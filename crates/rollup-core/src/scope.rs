//! Scope - ジョブの分類述語
//!
//! Named predicates over a single job. Storage layers that filter rows
//! server-side translate the same membership rules into their own query
//! language; this module only covers in-memory descriptors.

use std::fmt;
use std::str::FromStr;

use crate::domain::{DescribeJob, JobDescriptor, Status};
use crate::error::RollupError;

/// Running or pending.
pub fn is_active_or_pending(job: &JobDescriptor) -> bool {
    matches!(job.status, Status::Running | Status::Pending)
}

/// Success, failed or canceled.
pub fn is_finished(job: &JobDescriptor) -> bool {
    matches!(
        job.status,
        Status::Success | Status::Failed | Status::Canceled
    )
}

/// Jobs that a cancel request can still stop.
pub fn is_cancelable(job: &JobDescriptor) -> bool {
    matches!(
        job.status,
        Status::Running | Status::Pending | Status::Created
    )
}

/// Manual, blocking or not.
pub fn is_manual(job: &JobDescriptor) -> bool {
    job.status == Status::Manual
}

/// Everything except jobs that have not been started.
pub fn is_relevant(job: &JobDescriptor) -> bool {
    job.status != Status::Created
}

pub fn is_failed_but_allowed(job: &JobDescriptor) -> bool {
    job.status == Status::Failed && job.allow_failure
}

/// A named job predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    RunningOrPending,
    Finished,
    Cancelable,
    Manual,
    Relevant,
    FailedButAllowed,
    /// Exactly one status.
    WithStatus(Status),
}

impl Scope {
    /// Scopes that are not tied to a single status.
    pub const NAMED: [Scope; 6] = [
        Scope::RunningOrPending,
        Scope::Finished,
        Scope::Cancelable,
        Scope::Manual,
        Scope::Relevant,
        Scope::FailedButAllowed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scope::RunningOrPending => "running_or_pending",
            Scope::Finished => "finished",
            Scope::Cancelable => "cancelable",
            Scope::Manual => "manual",
            Scope::Relevant => "relevant",
            Scope::FailedButAllowed => "failed_but_allowed",
            Scope::WithStatus(status) => status.as_str(),
        }
    }

    pub fn matches(self, job: &impl DescribeJob) -> bool {
        let job = job.descriptor();
        match self {
            Scope::RunningOrPending => is_active_or_pending(&job),
            Scope::Finished => is_finished(&job),
            Scope::Cancelable => is_cancelable(&job),
            Scope::Manual => is_manual(&job),
            Scope::Relevant => is_relevant(&job),
            Scope::FailedButAllowed => is_failed_but_allowed(&job),
            Scope::WithStatus(status) => job.status == status,
        }
    }

    /// Keep only the jobs in this scope.
    pub fn filter<I>(self, jobs: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
        I::Item: DescribeJob,
    {
        jobs.into_iter().filter(move |job| self.matches(job))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Scope {
    type Err = RollupError;

    /// `manual` resolves to [`Scope::Manual`], which has the same members as
    /// `WithStatus(Status::Manual)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(scope) = Scope::NAMED.into_iter().find(|scope| scope.name() == s) {
            return Ok(scope);
        }
        s.parse::<Status>()
            .map(Scope::WithStatus)
            .map_err(|_| RollupError::UnknownScope(s.to_string()))
    }
}
