//! Client API trait for Monet task operations
//!
//! The CLI talks to this trait so it can run against the REST client or
//! the in-memory mock.

use async_trait::async_trait;
use monet_api_contract::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientApiError {
    #[error("{code}: {message}")]
    Remote { code: String, message: String },
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl ClientApiError {
    /// Machine-readable code reported by the service, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientApiError::Remote { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub type ClientApiResult<T> = Result<T, ClientApiError>;

#[async_trait]
pub trait MonetApi: Send + Sync {
    async fn create_task(&self, request: &CreateTaskRequest) -> ClientApiResult<Task>;

    async fn get_task(&self, task_id: &str) -> ClientApiResult<Task>;

    async fn list_tasks(&self, query: &ListTasksQuery) -> ClientApiResult<TaskList>;
}
