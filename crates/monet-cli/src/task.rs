use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use futures::StreamExt;
use monet_api_contract::{models, CreateTaskRequest, InputMap, ListTasksQuery, TaskType};
use monet_client_api::MonetApi;
use monet_rest_client::RestClient;
use serde_json::Value;
use tracing::{info, warn};

use crate::ConnectionArgs;

/// Task-related commands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Submit a new generation task
    Create(TaskCreateArgs),
    /// Show the current state of a task
    Get(TaskGetArgs),
    /// List tasks, one page at a time
    List(TaskListArgs),
}

impl TaskCommands {
    pub async fn run(self, connection: &ConnectionArgs, out: &mut impl Write) -> Result<()> {
        let client = connection.client()?;
        match self {
            TaskCommands::Create(args) if args.stream => args.run_stream(&client, out).await,
            TaskCommands::Create(args) => args.run(&client, out).await,
            TaskCommands::Get(args) => args.run(&client, out).await,
            TaskCommands::List(args) => args.run(&client, out).await,
        }
    }
}

/// Arguments for creating a task
#[derive(Args)]
pub struct TaskCreateArgs {
    /// Task type: video, image, music or lipsync
    #[arg(long = "type", value_name = "TYPE")]
    pub task_type: TaskType,

    /// Model identifier (see `monet models`)
    #[arg(long, value_name = "MODEL")]
    pub model: String,

    /// Text prompt
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Extra input fields as a JSON object, e.g. '{"aspectRatio":"16:9"}'
    #[arg(long = "input", value_name = "JSON")]
    pub input: Option<String>,

    /// Token the service uses to deduplicate retried submissions
    #[arg(long, value_name = "KEY")]
    pub idempotency_key: Option<String>,

    /// Wait for completion, printing progress events as they arrive
    #[arg(long)]
    pub stream: bool,
}

impl TaskCreateArgs {
    /// Merge the flags into one request; `--model` and `--prompt` win over `--input`
    pub fn build_request(&self) -> Result<CreateTaskRequest> {
        let mut input = match &self.input {
            Some(raw) => match serde_json::from_str::<Value>(raw).context("--input is not valid JSON")? {
                Value::Object(map) => map,
                _ => bail!("--input must be a JSON object"),
            },
            None => InputMap::new(),
        };

        input.insert("model".into(), Value::String(self.model.clone()));
        if let Some(prompt) = &self.prompt {
            input.insert("prompt".into(), Value::String(prompt.clone()));
        }

        if !models::is_known(self.task_type, &self.model) {
            warn!(model = %self.model, task_type = %self.task_type, "model is not in the catalog");
        }

        let mut request = CreateTaskRequest::new(self.task_type, input);
        if let Some(key) = &self.idempotency_key {
            request = request.with_idempotency_key(key.clone());
        }
        Ok(request)
    }

    pub async fn run(&self, client: &dyn MonetApi, out: &mut impl Write) -> Result<()> {
        let request = self.build_request()?;
        let task = client.create_task(&request).await?;
        info!(task_id = %task.id, "task created");
        print_json(out, &task)
    }

    pub async fn run_stream(&self, client: &RestClient, out: &mut impl Write) -> Result<()> {
        let request = self.build_request()?;
        let mut events = client.create_task_stream(&request).await?.events();

        while let Some(event) = events.next().await {
            let event = event?;
            match &event.event {
                Some(name) => writeln!(out, "{}: {}", name, event.data)?,
                None => writeln!(out, "{}", event.data)?,
            }
            out.flush()?;
        }
        Ok(())
    }
}

/// Arguments for fetching one task
#[derive(Args)]
pub struct TaskGetArgs {
    #[arg(value_name = "TASK_ID")]
    pub task_id: String,
}

impl TaskGetArgs {
    pub async fn run(&self, client: &dyn MonetApi, out: &mut impl Write) -> Result<()> {
        let task = client.get_task(&self.task_id).await?;
        print_json(out, &task)
    }
}

/// Arguments for listing tasks
#[derive(Args)]
pub struct TaskListArgs {
    /// Page number (the service defaults to the first page)
    #[arg(long)]
    pub page: Option<u32>,

    /// Tasks per page (the service picks a default when omitted)
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl TaskListArgs {
    pub fn query(&self) -> ListTasksQuery {
        ListTasksQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub async fn run(&self, client: &dyn MonetApi, out: &mut impl Write) -> Result<()> {
        let list = client.list_tasks(&self.query()).await?;
        print_json(out, &list)
    }
}

fn print_json<T: serde::Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cli, Commands, Parser};
    use monet_api_contract::{Task, TaskList, TaskStatus};
    use monet_rest_client_mock::MockClient;

    fn create_args(argv: &[&str]) -> TaskCreateArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Task {
                subcommand: TaskCommands::Create(args),
            } => args,
            _ => panic!("expected task create"),
        }
    }

    #[test]
    fn test_build_request_merges_input() {
        let args = create_args(&[
            "monet",
            "task",
            "create",
            "--type",
            "image",
            "--model",
            "flux-2-dev",
            "--prompt",
            "a red fox",
            "--input",
            r#"{"aspectRatio":"1:1","model":"ignored"}"#,
            "--idempotency-key",
            "fox-1",
        ]);

        let request = args.build_request().unwrap();
        assert_eq!(request.task_type, TaskType::Image);
        assert_eq!(request.model(), Some("flux-2-dev"));
        assert_eq!(request.input["prompt"], "a red fox");
        assert_eq!(request.input["aspectRatio"], "1:1");
        assert_eq!(request.idempotency_key.as_deref(), Some("fox-1"));
    }

    #[test]
    fn test_build_request_rejects_non_object_input() {
        let args = create_args(&[
            "monet", "task", "create", "--type", "music", "--model", "suno-3.5", "--input", "[1,2]",
        ]);
        assert!(args.build_request().is_err());
    }

    #[test]
    fn test_unknown_task_type_is_rejected() {
        let result = Cli::try_parse_from(["monet", "task", "create", "--type", "speech", "--model", "x"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_get_and_list_against_mock() {
        let client = MockClient::new();
        let args = create_args(&[
            "monet", "task", "create", "--type", "video", "--model", "veo-3", "--prompt", "tides",
        ]);

        let mut out = Vec::new();
        args.run(&client, &mut out).await.unwrap();
        let created: Task = serde_json::from_slice(&out).unwrap();
        assert_eq!(created.status, TaskStatus::Pending);

        let mut out = Vec::new();
        TaskGetArgs {
            task_id: created.id.clone(),
        }
        .run(&client, &mut out)
        .await
        .unwrap();
        let fetched: Task = serde_json::from_slice(&out).unwrap();
        assert_eq!(fetched.id, created.id);

        let mut out = Vec::new();
        TaskListArgs {
            page: None,
            page_size: Some(5),
        }
        .run(&client, &mut out)
        .await
        .unwrap();
        let list: TaskList = serde_json::from_slice(&out).unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.page_size, 5);
    }

    #[tokio::test]
    async fn test_get_unknown_task_surfaces_remote_error() {
        let client = MockClient::new();
        let mut out = Vec::new();
        let err = TaskGetArgs {
            task_id: "missing".into(),
        }
        .run(&client, &mut out)
        .await
        .unwrap_err();

        assert!(err.to_string().contains("not_found"));
        assert!(out.is_empty());
    }
}
