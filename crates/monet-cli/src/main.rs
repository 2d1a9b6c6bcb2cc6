use anyhow::Result;
use monet_cli::{Cli, Commands, Parser};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Task { subcommand } => subcommand.run(&cli.connection, &mut stdout).await,
        Commands::Models(args) => args.run(&mut stdout),
    }
}
