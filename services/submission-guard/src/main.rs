// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Submission Guard Service
//!
//! Validates and rate-limits the portfolio site's contact form and
//! newsletter signup, and stores the visitor's theme preference.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `CONTACT_MAX_ATTEMPTS` / `CONTACT_WINDOW_MS`: contact limit (default: 3 / 300000)
//! - `NEWSLETTER_MAX_ATTEMPTS` / `NEWSLETTER_WINDOW_MS`: newsletter limit (default: 2 / 600000)
//! - `SEND_DELAY_MS`: simulated send delay (default: 1500)
//! - `STATUS_CLEAR_MS`: status auto-clear delay (default: 5000)
//! - `CONTACT_ENDPOINT`: upstream URL for contact messages (default: simulated)
//! - `CSRF_TOKEN`: value of the `X-CSRF-Token` header sent upstream
//! - `CONTACT_TIMEOUT_MS` / `CONTACT_CONNECT_TIMEOUT_MS`: upstream timeouts (default: 10000 / 5000)
//! - `THEME_STORE_PATH`: theme preference file (default: theme.json)
//! - `METRICS_ENABLED` / `METRICS_PATH`: Prometheus endpoint (default: true, /metrics).
//!   The path must start with `/`.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use submission_guard::{
    config::{Config, RateLimitConfig},
    guard::SubmissionGuard,
    handlers::{router, AppState},
    limiter::RateLimiter,
    metrics::Metrics,
    theme::ThemeStore,
    transport,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    std::panic::set_hook(Box::new(|info| {
        error!(panic = %info, "Unhandled panic");
    }));

    // Load configuration
    let config = load_config()?;
    info!(
        bind_addr = %config.bind_addr,
        contact_max_attempts = config.contact.max_attempts,
        contact_window_ms = config.contact.window_ms,
        newsletter_max_attempts = config.newsletter.max_attempts,
        newsletter_window_ms = config.newsletter.window_ms,
        transport = config.transport.endpoint.as_ref().map_or("simulated", |u| u.as_str()),
        "Starting submission guard"
    );

    // Create application state
    let transport = transport::from_config(&config.transport, config.status.send_delay())?;
    let guard = SubmissionGuard::new(RateLimiter::new(), &config, transport);

    let state = Arc::new(AppState {
        guard,
        theme: ThemeStore::new(config.theme.store_path.clone()),
        metrics: Metrics::new()?,
        config: config.clone(),
    });

    let app = router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> anyhow::Result<Config> {
    let defaults = Config::default();

    let endpoint = match std::env::var("CONTACT_ENDPOINT") {
        Ok(v) if !v.trim().is_empty() => Some(v.parse()?),
        _ => None,
    };

    Ok(Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
        contact: RateLimitConfig::new(
            env_or("CONTACT_MAX_ATTEMPTS", defaults.contact.max_attempts),
            env_or("CONTACT_WINDOW_MS", defaults.contact.window_ms),
        ),
        newsletter: RateLimitConfig::new(
            env_or("NEWSLETTER_MAX_ATTEMPTS", defaults.newsletter.max_attempts),
            env_or("NEWSLETTER_WINDOW_MS", defaults.newsletter.window_ms),
        ),
        status: submission_guard::config::StatusConfig {
            send_delay_ms: env_or("SEND_DELAY_MS", defaults.status.send_delay_ms),
            clear_after_ms: env_or("STATUS_CLEAR_MS", defaults.status.clear_after_ms),
        },
        transport: submission_guard::config::TransportConfig {
            endpoint,
            csrf_token: std::env::var("CSRF_TOKEN").ok(),
            timeout_ms: env_or("CONTACT_TIMEOUT_MS", defaults.transport.timeout_ms),
            connect_timeout_ms: env_or(
                "CONTACT_CONNECT_TIMEOUT_MS",
                defaults.transport.connect_timeout_ms,
            ),
        },
        theme: submission_guard::config::ThemeConfig {
            store_path: std::env::var("THEME_STORE_PATH")
                .map(Into::into)
                .unwrap_or(defaults.theme.store_path),
        },
        metrics: submission_guard::config::MetricsConfig {
            enabled: env_or("METRICS_ENABLED", defaults.metrics.enabled),
            path: metrics_path(std::env::var("METRICS_PATH").ok(), defaults.metrics.path)?,
        },
    })
}

/// Route path for the metrics endpoint; axum panics on paths without a leading `/`.
fn metrics_path(value: Option<String>, default: String) -> anyhow::Result<String> {
    match value {
        None => Ok(default),
        Some(path) if path.starts_with('/') => Ok(path),
        Some(path) => anyhow::bail!("METRICS_PATH must start with '/', got {path:?}"),
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
