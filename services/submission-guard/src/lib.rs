// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Submission Guard
//!
//! Gates the portfolio site's contact form and newsletter signup:
//!
//! - Markup escaping of every submitted value
//! - Permissive email and phone format checks
//! - Per-form sliding-window rate limiting (3 contact messages per 5 minutes,
//!   2 newsletter signups per 10 minutes by default)
//! - Status line with a cancellable auto-clear
//! - Pluggable delivery of accepted messages
//! - Persisted light/dark theme preference

pub mod clock;
pub mod config;
pub mod error;
pub mod form;
pub mod guard;
pub mod handlers;
pub mod limiter;
pub mod metrics;
pub mod sanitize;
pub mod status;
pub mod theme;
pub mod transport;
pub mod validator;

pub use config::Config;
pub use form::{ContactForm, FieldKind, FormField};
pub use guard::{ContactOutcome, NewsletterOutcome, SubmissionGuard};
pub use limiter::{RateLimitResult, RateLimiter};
pub use sanitize::sanitize;
pub use validator::{is_email_valid, is_phone_valid, ValidationError};
