use anyhow::Context;

use studentapp_api::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    studentapp_observability::init();

    let config = ServerConfig::from_env().context("invalid startup configuration")?;
    let bind_addr = config.bind_addr;

    let app = studentapp_api::app::build_app(config.auth);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
