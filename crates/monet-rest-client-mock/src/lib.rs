//! In-memory stand-in for the Monet service

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use monet_api_contract::*;
use monet_client_api::{ClientApiError, ClientApiResult, MonetApi};

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Mock client that records created tasks and serves them back
///
/// Tasks stay `pending` unless a test moves them along with
/// [`MockClient::set_status`].
#[derive(Default)]
pub struct MockClient {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicU64,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a fixed set of tasks, in listing order
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            next_id: AtomicU64::new(0),
        }
    }

    /// Move a task to a new status, attaching an output for completed tasks
    pub fn set_status(&self, task_id: &str, status: TaskStatus) -> ClientApiResult<Task> {
        let mut tasks = self.lock()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| not_found(task_id))?;

        task.status = status;
        task.updated_at = Utc::now().to_rfc3339();
        if status == TaskStatus::Completed && task.outputs.is_empty() {
            let model = task
                .input
                .get("model")
                .and_then(|m| m.as_str())
                .unwrap_or_default()
                .to_string();
            task.outputs.push(Output {
                url: Some(format!("https://mock.monet.invalid/{}/0", task.id)),
                model,
                status: "completed".into(),
                progress: 100.0,
            });
        }
        Ok(task.clone())
    }

    /// Next `task_N` id not already held by a stored task
    fn fresh_id(&self, tasks: &[Task]) -> String {
        loop {
            let id = format!("task_{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
            if !tasks.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }

    fn lock(&self) -> ClientApiResult<std::sync::MutexGuard<'_, Vec<Task>>> {
        self.tasks
            .lock()
            .map_err(|_| ClientApiError::Unexpected("mock task store poisoned".into()))
    }
}

fn not_found(task_id: &str) -> ClientApiError {
    ClientApiError::Remote {
        code: "not_found".into(),
        message: format!("Task {} not found", task_id),
    }
}

#[async_trait]
impl MonetApi for MockClient {
    async fn create_task(&self, request: &CreateTaskRequest) -> ClientApiResult<Task> {
        let mut tasks = self.lock()?;

        if let Some(key) = &request.idempotency_key {
            if let Some(existing) = tasks.iter().find(|t| t.idempotency_key.as_ref() == Some(key)) {
                return Ok(existing.clone());
            }
        }

        let now = Utc::now().to_rfc3339();
        let task = Task {
            id: self.fresh_id(&tasks),
            task_type: request.task_type,
            status: TaskStatus::Pending,
            idempotency_key: request.idempotency_key.clone(),
            input: request.input.clone(),
            outputs: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        };
        tasks.push(task.clone());
        Ok(task)
    }

    async fn get_task(&self, task_id: &str) -> ClientApiResult<Task> {
        self.lock()?
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| not_found(task_id))
    }

    async fn list_tasks(&self, query: &ListTasksQuery) -> ClientApiResult<TaskList> {
        let tasks = self.lock()?;
        let page = query.page.filter(|p| *p > 0).unwrap_or(1);
        let page_size = query.page_size.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE_SIZE);

        let offset = (page as usize - 1).saturating_mul(page_size as usize);
        let items = tasks
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(TaskList {
            items,
            page,
            page_size,
            total: tasks.len() as u64,
        })
    }
}
