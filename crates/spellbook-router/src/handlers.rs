//! HTTP request handlers for the spell lookup service.
//!
//! Implements the query endpoints and a health check using axum.

use crate::query::{QueryError, QueryRequest, QueryService};
use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Query façade over the shared store
    pub queries: QueryService,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Number of spells in the store
    pub spell_count: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Query-related error
    QueryError(QueryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::QueryError(e @ QueryError::BadRequest(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::QueryError(e @ QueryError::Store(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::QueryError(e)
    }
}

fn run_query(state: &AppState, request: &QueryRequest) -> Result<Json<Vec<String>>, AppError> {
    let names = state.queries.execute(request).inspect_err(|e| {
        if let QueryError::BadRequest(reason) = e {
            warn!("Rejected query: {}", reason);
        }
    })?;
    Ok(Json(names))
}

/// POST /query - Form-encoded lookup
async fn query_form(
    State(state): State<AppState>,
    Form(request): Form<QueryRequest>,
) -> Result<Json<Vec<String>>, AppError> {
    run_query(&state, &request)
}

/// GET /spells - Lookup from query string parameters
async fn query_params(
    State(state): State<AppState>,
    Query(request): Query<QueryRequest>,
) -> Result<Json<Vec<String>>, AppError> {
    run_query(&state, &request)
}

/// GET /health - Store health check
async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthCheckResponse>, AppError> {
    let spell_count = state.queries.spell_count()?;

    Ok(Json(HealthCheckResponse {
        status: "healthy".to_string(),
        spell_count,
    }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/query", post(query_form))
        .route("/spells", get(query_params))
        .route("/health", get(health_check))
        .with_state(state)
}
