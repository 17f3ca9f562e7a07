//! Domain model (statuses, job descriptors, severity classes).

pub mod job;
pub mod severity;
pub mod status;

pub use job::{DescribeJob, JobDescriptor};
pub use severity::Severity;
pub use status::{BLOCKED_STATUS, DEFAULT_STATUS, Status};
