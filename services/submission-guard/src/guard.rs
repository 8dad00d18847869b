// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! The submission guard.
//!
//! Contact flow: rate limit, sanitize, validate every field (trimmed), re-check
//! the untrimmed `email` field, then deliver through the transport. Newsletter flow:
//! sanitize and check the email, then rate limit. Every failure is reported
//! as an outcome with a user-facing message; nothing is retried.

use crate::config::{Config, RateLimitConfig};
use crate::form::ContactForm;
use crate::limiter::{RateLimitResult, RateLimiter, CONTACT_FORM_KEY, NEWSLETTER_KEY};
use crate::sanitize::sanitize;
use crate::status::{Status, StatusBoard, StatusKind};
use crate::transport::Transport;
use crate::validator::{is_email_valid, validate_fields, ValidationError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// User-facing messages of the portfolio site.
pub mod messages {
    pub const CONTACT_COOLDOWN: &str =
        "Has excedido el límite de envíos. Por favor, intenta más tarde.";
    pub const CONTACT_INVALID: &str = "Por favor, completa todos los campos correctamente.";
    pub const INVALID_EMAIL: &str = "Por favor, ingresa un email válido.";
    pub const CONTACT_SENDING: &str = "Enviando mensaje...";
    pub const CONTACT_SENT: &str = "¡Mensaje enviado con éxito! Te responderé pronto.";
    pub const CONTACT_SEND_FAILED: &str = "Error al enviar el mensaje. Intenta nuevamente.";
    pub const NEWSLETTER_COOLDOWN: &str = "Has excedido el límite de suscripciones.";
    pub const NEWSLETTER_SUBSCRIBED: &str =
        "¡Gracias por suscribirte! Recibirás actualizaciones pronto.";
}

/// Outcome of a contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Too many recent submissions; fields were not looked at
    RateLimited { retry_after: Duration },
    /// One or more fields failed validation
    Invalid { errors: Vec<ValidationError> },
    /// The `email` field is missing or malformed
    InvalidEmail,
    /// The transport accepted the message
    Delivered,
    /// The transport failed
    DeliveryFailed { reason: String },
}

impl ContactOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => messages::CONTACT_COOLDOWN,
            Self::Invalid { .. } => messages::CONTACT_INVALID,
            Self::InvalidEmail => messages::INVALID_EMAIL,
            Self::Delivered => messages::CONTACT_SENT,
            Self::DeliveryFailed { .. } => messages::CONTACT_SEND_FAILED,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "rate_limited",
            Self::Invalid { .. } => "invalid_fields",
            Self::InvalidEmail => "invalid_email",
            Self::Delivered => "delivered",
            Self::DeliveryFailed { .. } => "delivery_failed",
        }
    }

    /// Whether the client should clear the form.
    pub fn should_reset_form(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    fn status_kind(&self) -> StatusKind {
        match self {
            Self::Delivered => StatusKind::Success,
            _ => StatusKind::Error,
        }
    }
}

/// Outcome of a newsletter signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsletterOutcome {
    InvalidEmail,
    RateLimited { retry_after: Duration },
    Subscribed,
}

impl NewsletterOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidEmail => messages::INVALID_EMAIL,
            Self::RateLimited { .. } => messages::NEWSLETTER_COOLDOWN,
            Self::Subscribed => messages::NEWSLETTER_SUBSCRIBED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::RateLimited { .. } => "rate_limited",
            Self::Subscribed => "subscribed",
        }
    }

    /// Whether the client should clear the email input.
    pub fn should_reset_form(&self) -> bool {
        matches!(self, Self::Subscribed)
    }
}

/// Gates contact and newsletter submissions.
pub struct SubmissionGuard {
    limiter: RateLimiter,
    contact_limit: RateLimitConfig,
    newsletter_limit: RateLimitConfig,
    status: StatusBoard,
    transport: Arc<dyn Transport>,
}

impl SubmissionGuard {
    pub fn new(
        limiter: RateLimiter,
        config: &Config,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            limiter,
            contact_limit: config.contact,
            newsletter_limit: config.newsletter,
            status: StatusBoard::new(config.status.clear_after()),
            transport,
        }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Current contact status line.
    pub async fn status(&self) -> Status {
        self.status.current().await
    }

    /// Run the contact form flow.
    pub async fn submit_contact(&self, form: &ContactForm) -> ContactOutcome {
        if let RateLimitResult::Limited { retry_after } =
            self.limiter.check(CONTACT_FORM_KEY, &self.contact_limit).await
        {
            info!(?retry_after, "Contact submission rate limited");
            return self.report(ContactOutcome::RateLimited { retry_after }).await;
        }

        let sanitized = form.sanitized();

        let errors = validate_fields(form.trimmed().fields());
        if !errors.is_empty() {
            debug!(failed = errors.len(), "Contact submission invalid");
            return self.report(ContactOutcome::Invalid { errors }).await;
        }

        if !sanitized.get("email").is_some_and(is_email_valid) {
            debug!("Contact submission has no valid email field");
            return self.report(ContactOutcome::InvalidEmail).await;
        }

        self.status
            .show(messages::CONTACT_SENDING, StatusKind::Success)
            .await;

        let outcome = match self.transport.deliver(&sanitized.payload()).await {
            Ok(()) => {
                info!("Contact message delivered");
                ContactOutcome::Delivered
            }
            Err(e) => {
                warn!(error = %e, "Contact message delivery failed");
                ContactOutcome::DeliveryFailed {
                    reason: e.to_string(),
                }
            }
        };
        self.report(outcome).await
    }

    /// Run the newsletter signup flow.
    pub async fn submit_newsletter(&self, email: &str) -> NewsletterOutcome {
        let email = sanitize(email.trim());
        if !is_email_valid(&email) {
            debug!("Newsletter email invalid");
            return NewsletterOutcome::InvalidEmail;
        }

        match self
            .limiter
            .check(NEWSLETTER_KEY, &self.newsletter_limit)
            .await
        {
            RateLimitResult::Limited { retry_after } => {
                info!(?retry_after, "Newsletter signup rate limited");
                NewsletterOutcome::RateLimited { retry_after }
            }
            RateLimitResult::Allowed { .. } => {
                info!("Newsletter signup accepted");
                NewsletterOutcome::Subscribed
            }
        }
    }

    async fn report(&self, outcome: ContactOutcome) -> ContactOutcome {
        self.status
            .show(outcome.message(), outcome.status_kind())
            .await;
        outcome
    }
}
