use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over an already opened state. Tests drive this directly.
pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Public entry: open every collection, build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    service::runtime::ensure_env(&cfg.storage, Some(&cfg.seed.movies_path)).await?;

    let state = AppState::open(&cfg).await?;
    info!(resources = ?state.resources.names().collect::<Vec<_>>(), backend = ?cfg.storage.backend, "collections ready");
    let app = build_app(state);

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "starting server crate");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
