//! API contract types for the Monet task service

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ContractError, ContractResult};

/// Open key/value payload accepted by the service as task input.
pub type InputMap = Map<String, Value>;

/// Kind of generation job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Video,
    Image,
    Music,
    #[serde(rename = "lipsync")]
    LipSync,
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [
        TaskType::Video,
        TaskType::Image,
        TaskType::Music,
        TaskType::LipSync,
    ];

    /// Wire name of the task type
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Video => "video",
            TaskType::Image => "image",
            TaskType::Music => "music",
            TaskType::LipSync => "lipsync",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown task type '{}'", s))
    }
}

/// Task lifecycle states reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    /// Whether the service will report no further progress for the task
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// One model-produced result attached to a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub model: String,
    pub status: String,
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Generation job as tracked by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    #[serde(default)]
    pub input: InputMap,
    #[serde(default)]
    pub outputs: Vec<Output>,
    /// Timestamp exactly as the service sent it
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    /// Result URLs of the outputs that have one, in service order
    pub fn result_urls(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().filter_map(|o| o.url.as_deref())
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }
}

/// Read an RFC 3339 timestamp, or a naive `YYYY-MM-DD[T ]HH:MM:SS[.f]` one as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Page of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    pub items: Vec<Task>,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub total: u64,
}

/// Error object embedded in non-success responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub const UNKNOWN_CODE: &'static str = "unknown";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Error synthesized when the service sends no usable error body
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Self::UNKNOWN_CODE, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// `{ "error": { ... } }` envelope of non-success responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// Task creation request, shared by the async and streaming endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub input: InputMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl CreateTaskRequest {
    pub fn new(task_type: TaskType, input: InputMap) -> Self {
        Self {
            task_type,
            input,
            idempotency_key: None,
        }
    }

    /// Build a request from one of the typed inputs
    pub fn from_input<I: TaskInput>(input: &I) -> ContractResult<Self> {
        match serde_json::to_value(input)? {
            Value::Object(map) => Ok(Self::new(I::TASK_TYPE, map)),
            _ => Err(ContractError::InputNotObject),
        }
    }

    /// Let the service deduplicate retried submissions of this request
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Model named in the input, if any
    pub fn model(&self) -> Option<&str> {
        self.input.get("model").and_then(Value::as_str)
    }
}

/// Pagination for task listing; unset fields are left to the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTasksQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl ListTasksQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Query pairs to send. Zero counts as unset.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size.filter(|p| *p > 0) {
            pairs.push(("pageSize", page_size.to_string()));
        }
        pairs
    }
}

/// Typed task input bound to the task type it belongs to
pub trait TaskInput: Serialize {
    const TASK_TYPE: TaskType;
}

/// Video generation input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInput {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub videos: Vec<String>,
}

impl TaskInput for VideoInput {
    const TASK_TYPE: TaskType = TaskType::Video;
}

/// Image generation input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub images: Vec<String>,
}

impl TaskInput for ImageInput {
    const TASK_TYPE: TaskType = TaskType::Image;
}

/// Music generation input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicInput {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl TaskInput for MusicInput {
    const TASK_TYPE: TaskType = TaskType::Music;
}

/// Lip-sync input: a source video (or image) driven by an audio track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LipSyncInput {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl TaskInput for LipSyncInput {
    const TASK_TYPE: TaskType = TaskType::LipSync;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_parsing() {
        let task_json = r#"{
            "id": "task_01",
            "type": "video",
            "status": "processing",
            "idempotency_key": "k1",
            "input": { "model": "sora-2", "prompt": "a lighthouse at dusk" },
            "outputs": [
                { "model": "sora-2", "status": "running", "progress": 40 },
                { "model": "sora-2", "status": "done", "progress": 100, "url": "https://cdn.example/v.mp4" }
            ],
            "created_at": "2025-01-01T12:00:00Z",
            "updated_at": "2025-01-01T12:00:05Z"
        }"#;

        let task: Task = serde_json::from_str(task_json).unwrap();
        assert_eq!(task.task_type, TaskType::Video);
        assert_eq!(task.status, TaskStatus::Processing);
        assert_eq!(task.idempotency_key.as_deref(), Some("k1"));
        assert_eq!(task.input["model"], "sora-2");
        assert_eq!(task.outputs.len(), 2);
        assert_eq!(task.outputs[0].progress, 40.0);
        assert_eq!(task.result_urls().collect::<Vec<_>>(), vec!["https://cdn.example/v.mp4"]);
        assert_eq!(
            task.updated_at_utc().map(|t| t.timestamp()),
            task.created_at_utc().map(|t| t.timestamp() + 5)
        );
    }

    #[test]
    fn test_task_keeps_non_rfc3339_timestamps() {
        let task: Task = serde_json::from_value(json!({
            "id": "t",
            "type": "image",
            "status": "completed",
            "input": {},
            "created_at": "2025-03-01 10:00:00",
            "updated_at": "yesterday"
        }))
        .unwrap();

        assert_eq!(task.created_at, "2025-03-01 10:00:00");
        assert_eq!(task.updated_at, "yesterday");
        assert_eq!(
            task.created_at_utc(),
            parse_timestamp("2025-03-01T10:00:00Z")
        );
        assert!(task.created_at_utc().is_some());
        assert!(task.updated_at_utc().is_none());

        let round_trip = serde_json::to_value(&task).unwrap();
        assert_eq!(round_trip["created_at"], "2025-03-01 10:00:00");
    }

    #[test]
    fn test_task_without_outputs_or_key() {
        let task: Task = serde_json::from_value(json!({
            "id": "t",
            "type": "music",
            "status": "pending",
            "input": {},
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();

        assert!(task.outputs.is_empty());
        assert!(task.idempotency_key.is_none());
        assert!(!task.status.is_terminal());
    }

    #[test]
    fn test_task_list_parsing() {
        let list: TaskList = serde_json::from_value(json!({
            "items": [],
            "page": 2,
            "pageSize": 10,
            "total": 31
        }))
        .unwrap();

        assert_eq!(list.page, 2);
        assert_eq!(list.page_size, 10);
        assert_eq!(list.total, 31);
    }

    #[test]
    fn test_create_request_has_exactly_three_fields() {
        let mut input = InputMap::new();
        input.insert("model".into(), json!("veo-3"));
        let request = CreateTaskRequest::new(TaskType::Video, input).with_idempotency_key("k1");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({ "type": "video", "input": { "model": "veo-3" }, "idempotency_key": "k1" })
        );
    }

    #[test]
    fn test_create_request_omits_missing_idempotency_key() {
        let request = CreateTaskRequest::new(TaskType::Image, InputMap::new());
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("idempotency_key").is_none());
    }

    #[test]
    fn test_typed_inputs_use_camel_case() {
        let input = VideoInput {
            model: "kling-2-6".into(),
            prompt: Some("waves".into()),
            aspect_ratio: Some("16:9".into()),
            ..Default::default()
        };
        let request = CreateTaskRequest::from_input(&input).unwrap();

        assert_eq!(request.task_type, TaskType::Video);
        assert_eq!(request.model(), Some("kling-2-6"));
        assert_eq!(request.input["aspectRatio"], "16:9");
        assert!(!request.input.contains_key("images"));
        assert!(!request.input.contains_key("duration"));
    }

    #[test]
    fn test_lipsync_wire_name() {
        let request = CreateTaskRequest::from_input(&LipSyncInput {
            model: "any-lipsync-model".into(),
            audio: Some("https://cdn.example/a.mp3".into()),
            ..Default::default()
        })
        .unwrap();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "lipsync");
        assert_eq!("lipsync".parse::<TaskType>().unwrap(), TaskType::LipSync);
        assert!("speech".parse::<TaskType>().is_err());
    }

    #[test]
    fn test_list_query_pairs() {
        assert!(ListTasksQuery::default().pairs().is_empty());
        assert_eq!(
            ListTasksQuery::default().page(2).page_size(10).pairs(),
            vec![("page", "2".to_string()), ("pageSize", "10".to_string())]
        );
        assert!(ListTasksQuery::default().page(0).pairs().is_empty());
    }

    #[test]
    fn test_error_envelope_parsing() {
        let envelope: ErrorEnvelope =
            serde_json::from_str(r#"{"error":{"code":"quota_exceeded","message":"No credits"}}"#)
                .unwrap();
        assert_eq!(envelope.error, Some(ApiError::new("quota_exceeded", "No credits")));

        let empty: ErrorEnvelope = serde_json::from_str("{}").unwrap();
        assert!(empty.error.is_none());
    }
}
