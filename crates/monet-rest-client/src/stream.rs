//! Streaming task creation responses

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::{BoxStream, Stream, StreamExt};
use monet_api_contract::Task;
use reqwest::StatusCode;

use crate::error::{MonetClientError, RestClientResult};
use crate::sse::TaskEventStream;

/// Live body of a streaming task creation.
///
/// Chunks are passed through untouched. Reading them is not bounded by the
/// client timeout.
pub struct TaskStream {
    status: StatusCode,
    inner: BoxStream<'static, RestClientResult<Bytes>>,
}

impl TaskStream {
    pub(crate) fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let inner = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(MonetClientError::from))
            .boxed();
        Self { status, inner }
    }

    /// Wrap an arbitrary chunk stream
    pub fn from_stream<S>(status: StatusCode, stream: S) -> Self
    where
        S: Stream<Item = RestClientResult<Bytes>> + Send + 'static,
    {
        Self {
            status,
            inner: stream.boxed(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Decode the body as server-sent events
    pub fn events(self) -> TaskEventStream {
        TaskEventStream::new(self)
    }
}

impl std::fmt::Debug for TaskStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStream").field("status", &self.status).finish_non_exhaustive()
    }
}

impl Stream for TaskStream {
    type Item = RestClientResult<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

/// How a task should be submitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitMode {
    /// Return as soon as the service has accepted the task
    #[default]
    Async,
    /// Keep the connection open and stream progress until completion
    Stream,
}

/// Result of a submission: a parsed task or a live stream
#[derive(Debug)]
pub enum Submission {
    Accepted(Task),
    Streaming(TaskStream),
}

impl Submission {
    pub fn into_task(self) -> Option<Task> {
        match self {
            Submission::Accepted(task) => Some(task),
            Submission::Streaming(_) => None,
        }
    }

    pub fn into_stream(self) -> Option<TaskStream> {
        match self {
            Submission::Accepted(_) => None,
            Submission::Streaming(stream) => Some(stream),
        }
    }
}
