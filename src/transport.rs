//! HTTP/JSON transport layer: the boundary the quiz frontend talks to.
//!
//! Thin plumbing over the core: three routes, permissive CORS for the
//! cross-origin frontend, request tracing. The cache is populated once
//! before the router is built and shared read-only behind an `Arc`; there
//! is no locking because nothing mutates it.
//!
//! Status mapping: 503 while the cache is unavailable or empty, 400 for a
//! guess that is empty after trimming. Input rejection happens here, at
//! the boundary — the matcher itself never errors.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::guess::{normalize, GuessResult, Matcher};
use crate::snapshot::{CacheState, Snapshot};

/// Shared application state: the immutable cache and the matcher.
#[derive(Clone)]
pub struct AppState {
    cache: Arc<CacheState>,
    matcher: Arc<Matcher>,
}

impl AppState {
    /// Wraps the startup cache and matcher for sharing across handlers.
    #[must_use]
    pub fn new(cache: CacheState, matcher: Matcher) -> Self {
        Self {
            cache: Arc::new(cache),
            matcher: Arc::new(matcher),
        }
    }
}

/// Request body for `POST /check`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckRequest {
    /// The raw free-text guess.
    pub guess: String,
}

/// Response body for `GET /countries`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CountriesResponse {
    /// Cached names in rank order.
    pub countries: Vec<String>,
    /// Cached population figures in rank order.
    pub populations: Vec<String>,
    /// Number of cached entries.
    pub count: usize,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Builds the application router with CORS and tracing layers.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/countries", get(countries))
        .route("/check", post(check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn countries(
    State(state): State<AppState>,
) -> Result<Json<CountriesResponse>, HandlerError> {
    let snapshot = available_snapshot(&state)?;

    Ok(Json(CountriesResponse {
        countries: snapshot.names().to_vec(),
        populations: snapshot.populations().to_vec(),
        count: snapshot.len(),
    }))
}

async fn check(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<GuessResult>, HandlerError> {
    if normalize(&request.guess).is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Guess must be a non-empty string".to_string(),
            }),
        ));
    }

    let snapshot = available_snapshot(&state)?;
    Ok(Json(state.matcher.check(&request.guess, snapshot)))
}

/// Returns the cached snapshot, or the 503 the boundary owes its clients
/// while data is unavailable.
fn available_snapshot(state: &AppState) -> Result<&Snapshot, HandlerError> {
    match state.cache.snapshot() {
        Some(snapshot) if !snapshot.is_empty() => Ok(snapshot),
        Some(_) => Err(service_unavailable(
            "Country data unavailable: cache is empty".to_string(),
        )),
        None => {
            let reason = state
                .cache
                .reason()
                .unwrap_or("unknown");
            Err(service_unavailable(format!(
                "Country data unavailable: {reason}"
            )))
        }
    }
}

fn service_unavailable(error: String) -> HandlerError {
    (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorResponse { error }))
}
