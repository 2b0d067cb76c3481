use clap::Parser;
use salesai_server::cli::{self, Cli, Commands};
use salesai_server::serve;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Serve(config) => serve::run(config).await,
        Commands::Briefing(args) => cli::briefing::run(args).await,
    }
}
