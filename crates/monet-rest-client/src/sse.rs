//! Server-Sent Events (SSE) decoding for streaming task creation

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{Stream, StreamExt};
use serde::de::DeserializeOwned;

use crate::error::{MonetClientError, RestClientResult};
use crate::stream::TaskStream;

/// One dispatched server-sent event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    pub data: String,
    pub id: Option<String>,
}

impl SseEvent {
    /// Parse the data field as JSON
    pub fn json<T: DeserializeOwned>(&self) -> RestClientResult<T> {
        serde_json::from_str(&self.data).map_err(MonetClientError::Decode)
    }
}

/// Incremental line decoder; chunk boundaries may fall anywhere
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
    id: Option<String>,
    ready: VecDeque<SseEvent>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]).into_owned();
            self.process_line(line.strip_suffix('\r').unwrap_or(&line));
        }
    }

    /// Flush a trailing line and any event the stream ended in the middle of
    pub fn finish(&mut self) {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&rest).into_owned();
            self.process_line(line.strip_suffix('\r').unwrap_or(&line));
        }
        self.dispatch();
    }

    pub fn next_event(&mut self) -> Option<SseEvent> {
        self.ready.pop_front()
    }

    fn process_line(&mut self, line: &str) {
        if line.is_empty() {
            self.dispatch();
            return;
        }
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            "id" => self.id = Some(value.to_string()),
            _ => {}
        }
    }

    fn dispatch(&mut self) {
        if self.data.is_empty() {
            self.event = None;
            return;
        }
        self.ready.push_back(SseEvent {
            event: self.event.take(),
            data: std::mem::take(&mut self.data).join("\n"),
            id: self.id.clone(),
        });
    }
}

/// [`TaskStream`] decoded into server-sent events
pub struct TaskEventStream {
    inner: TaskStream,
    decoder: SseDecoder,
    finished: bool,
}

impl TaskEventStream {
    pub(crate) fn new(inner: TaskStream) -> Self {
        Self {
            inner,
            decoder: SseDecoder::new(),
            finished: false,
        }
    }
}

impl Stream for TaskEventStream {
    type Item = RestClientResult<SseEvent>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            if let Some(event) = this.decoder.next_event() {
                return Poll::Ready(Some(Ok(event)));
            }
            if this.finished {
                return Poll::Ready(None);
            }
            match this.inner.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(chunk))) => this.decoder.feed(&chunk),
                Poll::Ready(Some(Err(e))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    this.decoder.finish();
                    this.finished = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
