//! Severity - 集約時の重み付け
//!
//! `allow_failure` moves failed, canceled and manual jobs down to a
//! tolerated class, so severity depends on the pair, not on the status alone.

use super::Status;

/// Effective severity class of one job.
///
/// Declared from most to least severe. In-flight work outranks a plain
/// cancellation but not a hard failure. The resolver does not simply take
/// the maximum: tolerated classes only matter when nothing harder is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Manual gate that must be acted on.
    BlockingManual,
    HardFail,
    /// Running or pending.
    Active,
    Canceled,
    SoftCanceled,
    SoftFail,
    /// Manual action that does not gate anything.
    SoftManual,
    /// Success, created or skipped.
    Ok,
}

impl Severity {
    pub fn of(status: Status, allow_failure: bool) -> Self {
        match (status, allow_failure) {
            (Status::Manual, false) => Severity::BlockingManual,
            (Status::Manual, true) => Severity::SoftManual,
            (Status::Failed, false) => Severity::HardFail,
            (Status::Failed, true) => Severity::SoftFail,
            (Status::Canceled, false) => Severity::Canceled,
            (Status::Canceled, true) => Severity::SoftCanceled,
            (Status::Running | Status::Pending, _) => Severity::Active,
            (Status::Success | Status::Created | Status::Skipped, _) => Severity::Ok,
        }
    }

    /// Tolerated classes never decide an aggregate on their own.
    pub fn is_tolerated(self) -> bool {
        matches!(
            self,
            Severity::SoftCanceled | Severity::SoftFail | Severity::SoftManual
        )
    }
}
