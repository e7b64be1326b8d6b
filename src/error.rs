//! Startup errors

use crate::api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to build HTTP client: {0}")]
    Api(#[from] ApiError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
