//! Job descriptor: the minimal view of a job the resolver works with.

use serde::{Deserialize, Serialize};

use super::severity::Severity;
use super::status::Status;

/// A job's status plus its failure tolerance.
///
/// Callers map their own records (build jobs, external status checks, ...)
/// into descriptors through [`DescribeJob`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub status: Status,

    #[serde(default)]
    pub allow_failure: bool,
}

impl JobDescriptor {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            allow_failure: false,
        }
    }

    /// Descriptor of a job whose failure does not fail its group.
    pub fn allowed_to_fail(status: Status) -> Self {
        Self {
            status,
            allow_failure: true,
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::of(self.status, self.allow_failure)
    }
}

impl From<Status> for JobDescriptor {
    fn from(status: Status) -> Self {
        Self::new(status)
    }
}

/// Anything that can be summarized as a [`JobDescriptor`].
///
/// Implement this for each record type whose status feeds an aggregate.
pub trait DescribeJob {
    fn descriptor(&self) -> JobDescriptor;
}

impl DescribeJob for JobDescriptor {
    fn descriptor(&self) -> JobDescriptor {
        *self
    }
}

impl DescribeJob for Status {
    fn descriptor(&self) -> JobDescriptor {
        JobDescriptor::new(*self)
    }
}

impl<T: DescribeJob + ?Sized> DescribeJob for &T {
    fn descriptor(&self) -> JobDescriptor {
        (**self).descriptor()
    }
}
