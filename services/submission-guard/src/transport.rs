// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Delivery of accepted contact messages.
//!
//! The guard only hands a payload over once local checks pass. Without a
//! configured endpoint the [`SimulatedTransport`] stands in for the network.

use crate::config::TransportConfig;
use crate::form::SubmissionPayload;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Header carrying the anti-forgery token.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Transport error types.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Upstream rejected the message with status {0}")]
    Rejected(StatusCode),

    #[error("Request to upstream failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Delivers a sanitized payload somewhere.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), TransportError>;
}

/// Waits a fixed delay and reports success.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), TransportError> {
        debug!(fields = payload.len(), delay_ms = self.delay.as_millis() as u64, "Simulating delivery");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// POSTs the payload as JSON to an upstream endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    csrf_token: Option<String>,
}

impl HttpTransport {
    /// Build a transport whose requests give up after `timeout`.
    pub fn new(
        endpoint: Url,
        csrf_token: Option<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            csrf_token,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, payload), fields(endpoint = %self.endpoint))]
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), TransportError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(payload);

        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Rejected(status));
        }

        debug!(%status, "Upstream accepted message");
        Ok(())
    }
}

/// Pick the transport described by `config`.
pub fn from_config(
    config: &TransportConfig,
    send_delay: Duration,
) -> Result<Arc<dyn Transport>, TransportError> {
    let transport: Arc<dyn Transport> = match &config.endpoint {
        Some(endpoint) => Arc::new(HttpTransport::new(
            endpoint.clone(),
            config.csrf_token.clone(),
            config.timeout(),
            config.connect_timeout(),
        )?),
        None => Arc::new(SimulatedTransport::new(send_delay)),
    };
    Ok(transport)
}
