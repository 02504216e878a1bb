use std::net::SocketAddr;
use std::sync::Arc;

use axum::{serve, Extension};
use bank_branches::{
    api,
    infrastructure::{config::Config, state::AppState},
    services::dataset::BranchDataset,
    telemetry,
};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    telemetry::init();
    let config = Arc::new(Config::from_env()?);

    let dataset = Arc::new(BranchDataset::load_or_degrade(&config.dataset.path));
    if dataset.is_degraded() {
        warn!(
            path = %config.dataset.path.display(),
            "serving an empty branch directory"
        );
    }

    let state = Arc::new(AppState::new(Arc::clone(&config), dataset));
    let router = api::build_router(Arc::clone(&config)).layer(Extension(Arc::clone(&state)));

    let addr: SocketAddr = config.bind_address().parse()?;
    info!(%addr, endpoint = %config.graphql.endpoint, "starting bank branch api");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
