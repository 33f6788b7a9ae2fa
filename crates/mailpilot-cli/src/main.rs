mod cli;
mod commands;
mod state;

use clap::Parser;
use cli::{Cli, Commands};
use state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let state = AppState::initialize(cli.api_url).await?;

    match cli.command {
        Commands::Threads(command) => commands::threads(&state, command).await,
        Commands::Summarize { id } => commands::summarize(&state, id).await,
        Commands::Classify { category, input } => {
            commands::classify(&state, category, input.as_deref()).await
        }
        Commands::Extract { priority, input } => {
            commands::extract(&state, priority, input.as_deref()).await
        }
        Commands::Draft {
            thread_id,
            tone,
            feedback,
        } => commands::draft(&state, thread_id, tone, feedback).await,
        Commands::Config(command) => commands::config(&state, command),
    }
}
