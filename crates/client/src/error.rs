use thiserror::Error;

use crate::storage::StorageError;
use wishwall_core::error::CoreError;
use wishwall_infra::api::ApiError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid input: {0}")]
    Validation(#[from] CoreError),
    #[error("network error: {0}")]
    Network(#[from] ApiError),
    #[error("local storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("a like for {0} is already in flight")]
    LikeInFlight(String),
}
