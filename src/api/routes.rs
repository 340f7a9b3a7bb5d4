use crate::api::api_error::APIError;
use crate::api::server::AppState;
use crate::api::stage::Stage;
use crate::error::Error;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

const UPDATED_BODY: &str = "Hello world";

pub(crate) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check).fallback(update))
        .fallback(update)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

async fn update(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    tracing::info!("http method {method}");

    let timeout = state.config.api_timeout;
    match tokio::time::timeout(timeout, run_update(&state, client_addr, &headers)).await {
        Ok(response) => response,
        Err(_) => APIError::from(Error::Timeout(timeout)).into_response(),
    }
}

async fn run_update(state: &AppState, client_addr: SocketAddr, headers: &HeaderMap) -> Response {
    if let Stage::Respond(response) = Stage::from(state.authorizer.authorize(headers).await) {
        tracing::debug!("rejected update from {client_addr}");
        return response;
    }

    // Dual-stack listeners report IPv4 clients as IPv4-mapped IPv6 addresses.
    let source_ip = client_addr.ip().to_canonical().to_string();
    let config = &state.config;
    let upserted = state
        .dns
        .upsert(
            &config.dns_hosted_zone,
            &config.dns_dyn_record_name,
            &source_ip,
        )
        .await;
    if let Stage::Respond(response) = Stage::from(upserted) {
        return response;
    }

    (StatusCode::OK, UPDATED_BODY).into_response()
}
