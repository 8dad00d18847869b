// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the submission guard service.
//!
//! The browser script posts its forms here instead of validating and
//! limiting them locally. Every guard outcome is a normal JSON response;
//! only the HTTP status differs.

use crate::config::Config;
use crate::error::Result;
use crate::form::{ContactForm, CONTACT_SCHEMA};
use crate::guard::{ContactOutcome, NewsletterOutcome, SubmissionGuard};
use crate::metrics::Metrics;
use crate::status::Status;
use crate::theme::{Theme, ThemeStore};
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Shared application state.
pub struct AppState {
    pub guard: SubmissionGuard,
    pub theme: ThemeStore,
    pub metrics: Metrics,
    pub config: Config,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Newsletter signup request.
#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    #[serde(default)]
    pub email: String,
}

/// Per-field failure in a submission response.
#[derive(Debug, Serialize)]
pub struct FieldErrorResponse {
    pub field: String,
    pub error: String,
}

/// Submission response body.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub accepted: bool,
    pub code: &'static str,
    pub message: &'static str,
    pub reset_form: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldErrorResponse>,
}

/// Theme response body.
#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub icon: &'static str,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        Self {
            theme,
            icon: theme.icon(),
        }
    }
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/contact", post(contact))
        .route("/newsletter", post(newsletter))
        .route("/status", get(status))
        .route("/theme", get(theme))
        .route("/theme/toggle", post(toggle_theme));

    if state.config.metrics.enabled {
        app = app.route(&state.config.metrics.path, get(metrics));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "submission-guard",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Run the contact form flow on a JSON object of field values.
pub async fn contact(
    State(state): State<Arc<AppState>>,
    Json(values): Json<BTreeMap<String, String>>,
) -> Response {
    debug!(fields = values.len(), "Processing contact submission");
    let form = ContactForm::from_values(CONTACT_SCHEMA, values);
    let outcome = state.guard.submit_contact(&form).await;
    state.metrics.record("contact", outcome.code());

    let (status_code, retry_after) = match &outcome {
        ContactOutcome::Delivered => (StatusCode::OK, None),
        ContactOutcome::Invalid { .. } | ContactOutcome::InvalidEmail => {
            (StatusCode::UNPROCESSABLE_ENTITY, None)
        }
        ContactOutcome::RateLimited { retry_after } => {
            (StatusCode::TOO_MANY_REQUESTS, Some(*retry_after))
        }
        ContactOutcome::DeliveryFailed { .. } => (StatusCode::BAD_GATEWAY, None),
    };

    let field_errors = match &outcome {
        ContactOutcome::Invalid { errors } => errors
            .iter()
            .map(|e| FieldErrorResponse {
                field: e.field().to_string(),
                error: e.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };

    submission_response(
        status_code,
        SubmissionResponse {
            accepted: matches!(outcome, ContactOutcome::Delivered),
            code: outcome.code(),
            message: outcome.message(),
            reset_form: outcome.should_reset_form(),
            retry_after_secs: retry_after.map(retry_secs),
            field_errors,
        },
    )
}

/// Run the newsletter signup flow.
pub async fn newsletter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewsletterRequest>,
) -> Response {
    let outcome = state.guard.submit_newsletter(&req.email).await;
    state.metrics.record("newsletter", outcome.code());

    let (status_code, retry_after) = match &outcome {
        NewsletterOutcome::Subscribed => (StatusCode::OK, None),
        NewsletterOutcome::InvalidEmail => (StatusCode::UNPROCESSABLE_ENTITY, None),
        NewsletterOutcome::RateLimited { retry_after } => {
            (StatusCode::TOO_MANY_REQUESTS, Some(*retry_after))
        }
    };

    submission_response(
        status_code,
        SubmissionResponse {
            accepted: matches!(outcome, NewsletterOutcome::Subscribed),
            code: outcome.code(),
            message: outcome.message(),
            reset_form: outcome.should_reset_form(),
            retry_after_secs: retry_after.map(retry_secs),
            field_errors: Vec::new(),
        },
    )
}

/// Current contact status line.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<Status> {
    Json(state.guard.status().await)
}

pub async fn theme(State(state): State<Arc<AppState>>) -> Result<Json<ThemeResponse>> {
    Ok(Json(state.theme.load().await?.into()))
}

pub async fn toggle_theme(State(state): State<Arc<AppState>>) -> Result<Json<ThemeResponse>> {
    Ok(Json(state.theme.toggle().await?.into()))
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<Response> {
    let body = state.metrics.render()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}

fn submission_response(status_code: StatusCode, body: SubmissionResponse) -> Response {
    let retry_after = body.retry_after_secs;
    let mut response = (status_code, Json(body)).into_response();
    if let Some(secs) = retry_after {
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(secs));
    }
    response
}

/// Whole seconds, rounded up so clients never retry early.
fn retry_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs();
    if retry_after.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}
