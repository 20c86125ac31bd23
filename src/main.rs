use sensor_dashboard::{router, AppState, Config, FeedClient, Poller};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let client = FeedClient::new(&config)?;
    let addr = config.listen_addr();
    let poll_interval = config.poll_interval;
    info!("reading sensor feed from {}", client.endpoint());

    let state = AppState::new(config);
    let poller = Poller::spawn(client, Arc::clone(&state.feed), poll_interval);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    poller.shutdown().await;
    served?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
