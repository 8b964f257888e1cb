use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::logging::SharedLogger;
use crate::shipping::types::{Envelope, PricingParams};
use crate::upstream;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: ProxyConfig,
    pub client: reqwest::Client,
    pub logger: SharedLogger,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/address", get(handle_address))
        .route("/api/pricing", post(handle_pricing))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_address(
    State(state): State<Arc<AppState>>,
    query: Option<Query<HashMap<String, String>>>,
) -> Response {
    // Pick q out of the raw pairs so a query string the extractor cannot
    // parse behaves like an absent query instead of a framework rejection.
    let params = query.map(|Query(p)| p).unwrap_or_default();

    match upstream::search_address(
        params.get("q").map(String::as_str),
        &state.config,
        &state.client,
        &state.logger,
    )
    .await
    {
        Ok(envelope) => Json(envelope).into_response(),
        Err(e) => {
            state
                .logger
                .error("server", format!("Error searching address: {}", e));
            error_envelope(&e)
        }
    }
}

async fn handle_pricing(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    // Parse the body by hand so malformed JSON gets the same error envelope
    // as every other failure instead of a framework rejection.
    let params: PricingParams = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            state
                .logger
                .error("server", format!("Failed to parse request: {}", e));
            return error_envelope(&ProxyError::invalid_argument(format!(
                "Invalid request body: {}",
                e
            )));
        }
    };

    match upstream::get_pricing(&params, &state.config, &state.client, &state.logger).await {
        Ok(envelope) => Json(envelope).into_response(),
        Err(e) => {
            state
                .logger
                .error("server", format!("Error getting pricing: {}", e));
            error_envelope(&e)
        }
    }
}

/// Every failure, validation and upstream outage alike, collapses to 500
/// with an ERROR envelope carrying the error message.
fn error_envelope(err: &ProxyError) -> Response {
    let body = Envelope::<serde_json::Value>::error(err.to_string());
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
