//! REST API endpoints.
//!
//! Axum-based HTTP API exposing the ladder to a rendering layer:
//! players, rankings, recent matches and rating history.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::ladder::LadderError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<LadderError> for ApiError {
    fn from(err: LadderError) -> Self {
        match err {
            LadderError::PlayerNotFound(_) => ApiError::NotFound(err.to_string()),
            LadderError::Persistence(_) => ApiError::Internal(err.to_string()),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin == "*" {
        AllowOrigin::from(Any)
    } else {
        match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                warn!("Invalid CORS origin {:?} ({}), allowing any", origin, e);
                AllowOrigin::from(Any)
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/api/players",
            get(routes::players::list_players).post(routes::players::add_player),
        )
        .route("/api/rankings", get(routes::players::get_rankings))
        .route(
            "/api/matches",
            get(routes::matches::list_matches).post(routes::matches::record_match),
        )
        .route("/api/history", get(routes::history::get_history))
        .route("/api/reset", post(routes::matches::reset))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::state::{AppState, DynStore};
    use super::build_router;
    use crate::ladder::RatingStore;
    use crate::storage::MemoryStore;

    pub fn app_with(backend: MemoryStore) -> axum::Router {
        let backend: DynStore = Box::new(backend);
        let store = RatingStore::open(backend);
        build_router(AppState::new(store, 10, "*".to_string()))
    }

    pub fn app() -> axum::Router {
        app_with(MemoryStore::new())
    }

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}
