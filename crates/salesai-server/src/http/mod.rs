mod routes;

pub use routes::create_router;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use salesai_core::BriefingEngine;
use serde::Serialize;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<BriefingEngine>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(engine: BriefingEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Error body: `{"detail": "..."}`
#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Handler failure rendered as `{"detail": ...}`. Conversions via `?` are
/// 500s; extractor rejections keep their own 4xx status.
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn new(status: StatusCode, error: impl Into<anyhow::Error>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.error.to_string(),
            }),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

pub type AppResult<T> = Result<T, AppError>;
