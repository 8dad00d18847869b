// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for the submission guard service

use crate::theme::ThemeStoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Theme store error: {0}")]
    ThemeStore(#[from] ThemeStoreError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::ThemeStore(_) => "THEME_STORE_ERROR",
            AppError::Metrics(_) => "METRICS_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.to_string(),
                code: self.code(),
            }),
        )
            .into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
