mod config;
mod error;
mod paths;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::kv::{FileStore, KeyValueStore, MemoryStore};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ConsoleConfig::from_env();
    let port = config.port;

    let cache: Arc<dyn KeyValueStore> = match &config.store_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "session cache on disk");
            Arc::new(FileStore::new(path))
        }
        None => Arc::new(MemoryStore::new()),
    };

    let state = state::AppState::new(config, cache, services::catalog::Catalog::mock())
        .expect("fixture catalog init failed");
    state.session.restore().await;

    // Live feeds run until the handles are dropped at shutdown.
    let feeds = services::feeds::spawn_live_feeds(&state);
    let names: Vec<&str> = feeds.iter().map(services::ticker::PeriodicTask::name).collect();
    tracing::info!(?names, "live feeds running");

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::warn!("route guard checks session cookie presence only; demo use");
    tracing::info!(%port, "jacon listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");

    drop(feeds);
    tracing::info!("jacon stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
