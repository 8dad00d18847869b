// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the submission guard service.
//!
//! Defaults reproduce the limits and delays of the portfolio site's
//! browser script: 3 contact submissions per 5 minutes, 2 newsletter
//! signups per 10 minutes, 1.5s simulated send, 5s status auto-clear.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the submission guard service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Contact form rate limit (default: 3 per 300000 ms)
    #[serde(default = "default_contact_limit")]
    pub contact: RateLimitConfig,

    /// Newsletter signup rate limit (default: 2 per 600000 ms)
    #[serde(default = "default_newsletter_limit")]
    pub newsletter: RateLimitConfig,

    /// Status display timing
    #[serde(default)]
    pub status: StatusConfig,

    /// Contact delivery transport
    #[serde(default)]
    pub transport: TransportConfig,

    /// Theme preference storage
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Sliding-window limit for one rate-limit key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Attempts allowed inside the window (default: 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Window length in milliseconds (default: 60000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

/// Timing of status messages shown after a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Delay of the simulated send in milliseconds (default: 1500)
    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,

    /// Time a status stays visible in milliseconds (default: 5000)
    #[serde(default = "default_clear_after_ms")]
    pub clear_after_ms: u64,
}

/// Where accepted contact messages are delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Upstream endpoint receiving the JSON payload. `None` keeps the
    /// simulated transport.
    #[serde(default)]
    pub endpoint: Option<url::Url>,

    /// Value sent in the `X-CSRF-Token` header
    #[serde(default)]
    pub csrf_token: Option<String>,

    /// Total request timeout in milliseconds (default: 10000)
    #[serde(default = "default_request_timeout_ms")]
    pub timeout_ms: u64,

    /// Connect timeout in milliseconds (default: 5000)
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

/// Theme preference storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Key-value file holding the `"theme"` entry (default: theme.json)
    #[serde(default = "default_theme_store_path")]
    pub store_path: PathBuf,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_attempts() -> u32 {
    5
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_contact_limit() -> RateLimitConfig {
    RateLimitConfig::new(3, 300_000)
}

fn default_newsletter_limit() -> RateLimitConfig {
    RateLimitConfig::new(2, 600_000)
}

fn default_send_delay_ms() -> u64 {
    1500
}

fn default_clear_after_ms() -> u64 {
    5000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    5000
}

fn default_theme_store_path() -> PathBuf {
    PathBuf::from("theme.json")
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            contact: default_contact_limit(),
            newsletter: default_newsletter_limit(),
            status: StatusConfig::default(),
            transport: TransportConfig::default(),
            theme: ThemeConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            window_ms: default_window_ms(),
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            send_delay_ms: default_send_delay_ms(),
            clear_after_ms: default_clear_after_ms(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            csrf_token: None,
            timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            store_path: default_theme_store_path(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    pub const fn new(max_attempts: u32, window_ms: u64) -> Self {
        Self {
            max_attempts,
            window_ms,
        }
    }

    /// Get the window duration
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl StatusConfig {
    /// Get the simulated send delay
    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }

    /// Get the status auto-clear delay
    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.clear_after_ms)
    }
}

impl TransportConfig {
    /// Get the total request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get the connect timeout
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site_limits() {
        let config = Config::default();
        assert_eq!(config.contact, RateLimitConfig::new(3, 300_000));
        assert_eq!(config.newsletter, RateLimitConfig::new(2, 600_000));
        assert_eq!(config.status.send_delay(), Duration::from_millis(1500));
        assert_eq!(config.status.clear_after(), Duration::from_secs(5));
        assert!(config.transport.endpoint.is_none());
        assert_eq!(config.transport.timeout(), Duration::from_secs(10));
        assert_eq!(config.transport.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_rate_limit_default() {
        let limit = RateLimitConfig::default();
        assert_eq!(limit.max_attempts, 5);
        assert_eq!(limit.window(), Duration::from_secs(60));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"contact": {"max_attempts": 10}, "transport": {"endpoint": "https://example.com/api/contact"}}"#,
        )
        .unwrap();

        assert_eq!(config.contact.max_attempts, 10);
        assert_eq!(config.contact.window_ms, 60_000);
        assert_eq!(config.newsletter.max_attempts, 2);
        assert_eq!(
            config.transport.endpoint.as_ref().map(|u| u.path()),
            Some("/api/contact")
        );
        assert_eq!(config.transport.timeout_ms, 10_000);
    }

    #[test]
    fn test_transport_timeouts_from_json() {
        let config: TransportConfig =
            serde_json::from_str(r#"{"timeout_ms": 250, "connect_timeout_ms": 100}"#).unwrap();

        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(config.connect_timeout(), Duration::from_millis(100));
        assert!(config.endpoint.is_none());
    }
}
