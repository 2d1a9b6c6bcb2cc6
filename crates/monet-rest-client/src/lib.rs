//! REST API client for the Monet generation service
//!
//! Builds authenticated requests for task creation, lookup and listing,
//! bounds every call with the configured timeout and normalizes error
//! responses into [`MonetClientError`]. Streaming task creation hands the
//! raw response body back as a [`TaskStream`], optionally decoded as
//! server-sent events.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod sse;
pub mod stream;

pub use auth::*;
pub use client::*;
pub use config::*;
pub use error::*;
pub use sse::{SseEvent, TaskEventStream};
pub use stream::*;

use async_trait::async_trait;
use monet_api_contract::*;
use monet_client_api::{ClientApiError, ClientApiResult, MonetApi};

impl From<MonetClientError> for ClientApiError {
    fn from(error: MonetClientError) -> Self {
        match error {
            MonetClientError::RequestFailed { error, .. } => ClientApiError::Remote {
                code: error.code,
                message: error.message,
            },
            MonetClientError::Timeout(_) => ClientApiError::Timeout(error.to_string()),
            MonetClientError::Network(_) => ClientApiError::Transport(error.to_string()),
            other => ClientApiError::Unexpected(other.to_string()),
        }
    }
}

#[async_trait]
impl MonetApi for client::RestClient {
    async fn create_task(&self, request: &CreateTaskRequest) -> ClientApiResult<Task> {
        Ok(self.create_task(request).await?)
    }

    async fn get_task(&self, task_id: &str) -> ClientApiResult<Task> {
        Ok(self.get_task(task_id).await?)
    }

    async fn list_tasks(&self, query: &ListTasksQuery) -> ClientApiResult<TaskList> {
        Ok(self.list_tasks(query).await?)
    }
}
