//! Monet command-line client library

pub mod models;
pub mod task;

// Re-export CLI types for testing
pub use clap::{Parser, Subcommand};

use clap::Args;
use monet_rest_client::{MonetConfig, RestClient, API_KEY_ENV, BASE_URL_ENV, TIMEOUT_ENV};

#[derive(Parser)]
#[command(name = "monet")]
#[command(about = "Command-line client for the Monet generation API")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage generation tasks
    Task {
        #[command(subcommand)]
        subcommand: task::TaskCommands,
    },
    /// Print the model identifiers the service recognises
    Models(models::ModelsArgs),
}

/// How to reach the service
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// API key (starts with `monet_`)
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, env = TIMEOUT_ENV, value_name = "MS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Override the service origin
    #[arg(long, env = BASE_URL_ENV, value_name = "URL", global = true)]
    pub base_url: Option<String>,
}

impl ConnectionArgs {
    pub fn config(&self) -> MonetConfig {
        MonetConfig {
            api_key: self.api_key.clone().unwrap_or_default(),
            timeout_ms: self.timeout_ms,
            base_url: self.base_url.clone(),
        }
    }

    pub fn client(&self) -> anyhow::Result<RestClient> {
        Ok(RestClient::new(self.config())?)
    }
}
