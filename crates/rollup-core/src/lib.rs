//! rollup-core
//!
//! Composite status of a group of jobs (a pipeline stage, a whole pipeline).
//!
//! # モジュール構成
//! - **domain**: Status, JobDescriptor, DescribeJob, Severity
//! - **resolver**: aggregate, StatusResolver, ResolverBuilder
//! - **scope**: named job predicates (cancelable, finished, relevant, ...)
//! - **observability**: per-status counts
//! - **error**: RollupError
//!
//! The crate never fetches or stores jobs. Callers map their records into
//! [`JobDescriptor`]s (via [`DescribeJob`]) and hand over a snapshot.

pub mod domain;
pub mod error;
pub mod observability;
pub mod resolver;
pub mod scope;

pub use domain::{BLOCKED_STATUS, DEFAULT_STATUS, DescribeJob, JobDescriptor, Severity, Status};
pub use error::RollupError;
pub use observability::StatusCounts;
pub use resolver::{
    DEFAULT_EMPTY_STATUS, ResolverBuilder, ResolverConfig, StatusResolver, Tally, aggregate,
};
pub use scope::Scope;
