use std::io::Write;

use anyhow::Result;
use clap::Args;
use monet_api_contract::{models, TaskType};

/// Arguments for printing the model catalog
#[derive(Args)]
pub struct ModelsArgs {
    /// Only list models for this task type
    #[arg(long = "type", value_name = "TYPE")]
    pub task_type: Option<TaskType>,
}

impl ModelsArgs {
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        let listed = match self.task_type {
            Some(task_type) => models::for_task_type(task_type).to_vec(),
            None => models::all_models(),
        };
        for model in listed {
            writeln!(out, "{}", model)?;
        }
        Ok(())
    }
}
