use std::{future::Future, net::SocketAddr};

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{application::state::SharedState, domain::error::DomainError};

pub const ERROR_QUERY_APPS: &str = "Failed to query apps";
pub const ERROR_QUERY_APP: &str = "Failed to query app";
pub const ERROR_APP_NOT_FOUND: &str = "App not found";
pub const ERROR_STORE_UNAVAILABLE: &str = "Store unavailable";

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/apps", get(list_apps_handler))
        .route("/apps/{id}", get(get_app_handler))
        .route("/healthz", get(healthz_handler))
        .with_state(state)
}

pub async fn serve(
    listener: TcpListener,
    state: SharedState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DomainError> {
    let local_addr = listener.local_addr().map_err(|error| {
        DomainError::Unavailable(format!("failed to read listener address: {error}"))
    })?;

    info!(
        "catalog-service listening on http://{}:{}",
        local_addr.ip(),
        local_addr.port(),
    );

    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|error| DomainError::Unavailable(format!("server runtime error: {error}")))
}

async fn list_apps_handler(State(state): State<SharedState>) -> Response {
    match state.store().list_apps().await {
        Ok(apps) => (StatusCode::OK, Json(apps)).into_response(),
        Err(error) => {
            error!("list apps failed: {error}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, ERROR_QUERY_APPS)
        }
    }
}

async fn get_app_handler(
    State(state): State<SharedState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    // An undecodable or non-numeric id cannot match an integer key.
    let Some(id) = id.ok().and_then(|Path(id)| id.parse::<i64>().ok()) else {
        return error_response(StatusCode::NOT_FOUND, ERROR_APP_NOT_FOUND);
    };

    match state.store().get_app(id).await {
        Ok(Some(app)) => (StatusCode::OK, Json(app)).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, ERROR_APP_NOT_FOUND),
        Err(error) => {
            error!("get app {id} failed: {error}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, ERROR_QUERY_APP)
        }
    }
}

async fn healthz_handler(State(state): State<SharedState>) -> Response {
    match state.health_payload().await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(error) => {
            error!("health check failed: {error}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "ok": false,
                    "error": ERROR_STORE_UNAVAILABLE,
                })),
            )
                .into_response()
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
