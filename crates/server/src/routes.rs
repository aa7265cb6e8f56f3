use axum::{
    http::{Method, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::errors::ApiError;
use crate::state::AppState;

pub mod resources;
pub mod users;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn fallback(uri: Uri) -> ApiError {
    ApiError::not_found(format!("Can't find {} on this server", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, format!("{method} is not supported on {}", uri.path()))
}

/// Build the full application router: health, account routes, one CRUD
/// route set per registered resource, and the 404/405 fallbacks.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let mut app = Router::new().route("/health", get(health)).merge(users::router(state.clone()));
    for store in state.resources.iter() {
        app = app.merge(resources::router(store.clone()));
    }

    // applies to the routes registered so far, so it has to follow the merges
    app.method_not_allowed_fallback(method_not_allowed).fallback(fallback).layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
