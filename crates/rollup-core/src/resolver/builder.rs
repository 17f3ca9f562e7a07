//! ResolverBuilder - StatusResolver の構築
//!
//! Fail-fast: an invalid configuration is rejected by `build()`, never at
//! resolve time.

use serde::{Deserialize, Serialize};

use crate::domain::Status;
use crate::error::RollupError;

use super::StatusResolver;

/// Status reported for a collection with no jobs.
pub const DEFAULT_EMPTY_STATUS: Status = Status::Skipped;

/// Serializable resolver settings.
///
/// Callers embed this in their own config files, e.g.:
/// ```toml
/// [resolver]
/// empty_status = "skipped"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_empty_status")]
    pub empty_status: Status,
}

fn default_empty_status() -> Status {
    DEFAULT_EMPTY_STATUS
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            empty_status: DEFAULT_EMPTY_STATUS,
        }
    }
}

/// ResolverBuilder は StatusResolver を構築
///
/// # 使用例
/// ```
/// use rollup_core::{ResolverBuilder, Status};
///
/// let resolver = ResolverBuilder::new()
///     .empty_status(Status::Created)
///     .build()?;
/// assert_eq!(resolver.resolve(Vec::<Status>::new()), Status::Created);
/// # Ok::<(), rollup_core::RollupError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResolverBuilder {
    config: ResolverConfig,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded config.
    pub fn from_config(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn empty_status(mut self, status: Status) -> Self {
        self.config.empty_status = status;
        self
    }

    /// An empty group has nothing in flight, so an active status is rejected.
    pub fn build(self) -> Result<StatusResolver, RollupError> {
        if self.config.empty_status.is_active() {
            return Err(RollupError::InvalidConfig(self.config.empty_status));
        }
        Ok(StatusResolver {
            config: self.config,
        })
    }
}
