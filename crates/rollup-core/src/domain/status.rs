//! Status - ジョブの状態
//!
//! The closed set of statuses a job (and an aggregate of jobs) can be in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RollupError;

/// Job status.
///
/// Lifecycle of a single job:
/// - Created -> Pending -> Running -> Success | Failed | Canceled
/// - Created -> Skipped (an earlier stage failed)
/// - Created -> Manual (waiting for someone to trigger it)
///
/// The same set is used for the aggregate status of a group of jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Created,
    Pending,
    Running,
    Success,
    Failed,
    Canceled,
    Skipped,
    Manual,
}

/// Status assigned to a freshly created job.
pub const DEFAULT_STATUS: Status = Status::Created;

/// Status of a job that requires an action before the pipeline can proceed.
pub const BLOCKED_STATUS: Status = Status::Manual;

impl Status {
    /// Every status, in declaration order.
    pub const ALL: [Status; 8] = [
        Status::Created,
        Status::Pending,
        Status::Running,
        Status::Success,
        Status::Failed,
        Status::Canceled,
        Status::Skipped,
        Status::Manual,
    ];

    /// Statuses of a job that has been picked up (or deliberately passed over).
    pub const STARTED: [Status; 5] = [
        Status::Running,
        Status::Success,
        Status::Failed,
        Status::Skipped,
        Status::Manual,
    ];

    /// In-flight statuses.
    pub const ACTIVE: [Status; 2] = [Status::Pending, Status::Running];

    /// Statuses that will not change without outside intervention (retry, play).
    pub const COMPLETED: [Status; 4] = [
        Status::Success,
        Status::Failed,
        Status::Canceled,
        Status::Skipped,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Created => "created",
            Status::Pending => "pending",
            Status::Running => "running",
            Status::Success => "success",
            Status::Failed => "failed",
            Status::Canceled => "canceled",
            Status::Skipped => "skipped",
            Status::Manual => "manual",
        }
    }

    pub fn is_started(self) -> bool {
        Self::STARTED.contains(&self)
    }

    pub fn is_active(self) -> bool {
        Self::ACTIVE.contains(&self)
    }

    pub fn is_completed(self) -> bool {
        Self::COMPLETED.contains(&self)
    }

    /// Is this the gating status?
    pub fn is_blocked(self) -> bool {
        self == BLOCKED_STATUS
    }
}

impl Default for Status {
    fn default() -> Self {
        DEFAULT_STATUS
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Status {
    type Err = RollupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| RollupError::UnknownStatus(s.to_string()))
    }
}
