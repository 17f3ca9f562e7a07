use thiserror::Error;

use crate::domain::Status;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollupError {
    #[error("unknown status={0:?}")]
    UnknownStatus(String),

    #[error("unknown scope={0:?}")]
    UnknownScope(String),

    #[error("invalid resolver config: empty_status={0} is an in-flight status")]
    InvalidConfig(Status),
}
