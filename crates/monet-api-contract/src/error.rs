//! Errors raised while building request payloads

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("task input must serialize to a JSON object")]
    InputNotObject,

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ContractResult<T> = Result<T, ContractError>;
