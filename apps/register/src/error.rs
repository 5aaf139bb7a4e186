//! Errors that stop the register.

use shopfront_ui::{ConfigError, UiError};
use thiserror::Error;

pub type RegisterResult<T> = Result<T, RegisterError>;

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A screen rejected a scripted step.
    #[error("{0}")]
    Ui(#[from] UiError),

    #[error("session step failed: {0}")]
    Session(String),

    #[error("failed to encode order: {0}")]
    Json(#[from] serde_json::Error),
}
