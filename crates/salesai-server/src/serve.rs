use crate::config::ServeConfig;
use crate::http::{create_router, AppState};
use tracing::info;

pub async fn run(config: ServeConfig) -> anyhow::Result<()> {
    info!("Starting SalesAI orchestration server v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP: {}", config.http_addr);
    info!("Completion API: {}", config.completion.api_url);
    info!("Model: {}", config.completion.model);

    let engine = config.completion.build_engine()?;
    info!("Retriever: {:?}", engine.retriever_status());

    let app = create_router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!("SalesAI server ready on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, terminating...");
}
