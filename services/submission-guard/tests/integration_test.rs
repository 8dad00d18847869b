// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the submission guard.

mod harness;

use harness::{generators, guard_with, recording::RecordingTransport};
use std::sync::Arc;
use std::time::Duration;
use submission_guard::{
    clock::MockClock,
    config::RateLimitConfig,
    form::CONTACT_SCHEMA,
    guard::messages,
    limiter::{RateLimiter, CONTACT_FORM_KEY, NEWSLETTER_KEY},
    ContactForm, ContactOutcome, NewsletterOutcome, ValidationError,
};

#[tokio::test]
async fn test_full_contact_flow() {
    let transport = Arc::new(RecordingTransport::default());
    let (guard, _clock) = guard_with(transport.clone());

    let outcome = guard.submit_contact(&generators::valid_contact_form()).await;
    assert_eq!(outcome, ContactOutcome::Delivered);

    let delivered = transport.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0]["email"], "ada@example.com");
    // Optional phone left empty is still part of the payload
    assert_eq!(delivered[0]["phone"], "");
}

#[tokio::test]
async fn test_fourth_contact_submission_gets_cooldown() {
    let transport = Arc::new(RecordingTransport::default());
    let (guard, clock) = guard_with(transport.clone());

    for i in 0..3 {
        let outcome = guard.submit_contact(&generators::valid_contact_form()).await;
        assert_eq!(outcome, ContactOutcome::Delivered, "Submission {} should be delivered", i + 1);
        clock.advance(Duration::from_secs(30));
    }

    let outcome = guard.submit_contact(&generators::valid_contact_form()).await;
    match outcome {
        ContactOutcome::RateLimited { retry_after } => {
            assert_eq!(retry_after, Duration::from_secs(300 - 90));
        }
        other => panic!("Expected cooldown, got {other:?}"),
    }
    assert_eq!(guard.status().await.message, messages::CONTACT_COOLDOWN);
    assert_eq!(transport.count(), 3);
}

#[tokio::test]
async fn test_cooldown_skips_validation() {
    let (guard, _clock) = guard_with(Arc::new(RecordingTransport::default()));

    for _ in 0..3 {
        guard.submit_contact(&generators::valid_contact_form()).await;
    }

    // Empty form would be invalid, but the limiter answers first
    let outcome = guard.submit_contact(&ContactForm::from_values(CONTACT_SCHEMA, Default::default())).await;
    assert!(matches!(outcome, ContactOutcome::RateLimited { .. }));
}

#[tokio::test]
async fn test_padded_email_reported_as_invalid_email() {
    let transport = Arc::new(RecordingTransport::default());
    let (guard, _clock) = guard_with(transport.clone());

    let mut values = generators::valid_contact_values();
    values.insert("email".to_string(), " ada@example.com ".to_string());
    values.insert("message".to_string(), "  hola  ".to_string());
    let form = ContactForm::from_values(CONTACT_SCHEMA, values);

    assert_eq!(guard.submit_contact(&form).await, ContactOutcome::InvalidEmail);
    assert_eq!(guard.status().await.message, messages::INVALID_EMAIL);
    assert_eq!(transport.count(), 0);
}

#[tokio::test]
async fn test_invalid_submission_consumes_attempt() {
    let transport = Arc::new(RecordingTransport::default());
    let (guard, _clock) = guard_with(transport.clone());

    let mut values = generators::valid_contact_values();
    values.insert("subject".to_string(), String::new());
    let form = ContactForm::from_values(CONTACT_SCHEMA, values);

    match guard.submit_contact(&form).await {
        ContactOutcome::Invalid { errors } => {
            assert_eq!(errors, vec![ValidationError::MissingField("subject".into())]);
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
    assert_eq!(guard.status().await.message, messages::CONTACT_INVALID);
    assert_eq!(guard.limiter().attempt_count(CONTACT_FORM_KEY).await, 1);
    assert_eq!(transport.count(), 0);

    // Two attempts left
    guard.submit_contact(&form).await;
    guard.submit_contact(&form).await;
    let outcome = guard.submit_contact(&generators::valid_contact_form()).await;
    assert!(matches!(outcome, ContactOutcome::RateLimited { .. }));
}

#[tokio::test]
async fn test_invalid_phone_rejected() {
    let (guard, _clock) = guard_with(Arc::new(RecordingTransport::default()));

    let mut values = generators::valid_contact_values();
    values.insert("phone".to_string(), "12345".to_string());
    let form = ContactForm::from_values(CONTACT_SCHEMA, values);

    match guard.submit_contact(&form).await {
        ContactOutcome::Invalid { errors } => {
            assert_eq!(errors, vec![ValidationError::InvalidPhone("phone".into())]);
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_newsletter_flow() {
    let (guard, clock) = guard_with(Arc::new(RecordingTransport::default()));

    assert_eq!(guard.submit_newsletter("a@b.com").await, NewsletterOutcome::Subscribed);
    assert_eq!(guard.submit_newsletter("a@b.com").await, NewsletterOutcome::Subscribed);
    assert!(matches!(
        guard.submit_newsletter("a@b.com").await,
        NewsletterOutcome::RateLimited { .. }
    ));

    // Invalid input is rejected before the limiter is consulted
    assert_eq!(guard.submit_newsletter("a@b").await, NewsletterOutcome::InvalidEmail);
    assert_eq!(guard.limiter().attempt_count(NEWSLETTER_KEY).await, 2);

    clock.advance(Duration::from_millis(600_000));
    assert_eq!(guard.submit_newsletter("a@b.com").await, NewsletterOutcome::Subscribed);
}

#[tokio::test]
async fn test_exhausted_newsletter_leaves_contact_open() {
    let (guard, _clock) = guard_with(Arc::new(RecordingTransport::default()));

    for _ in 0..3 {
        guard.submit_newsletter("a@b.com").await;
    }

    let outcome = guard.submit_contact(&generators::valid_contact_form()).await;
    assert_eq!(outcome, ContactOutcome::Delivered);
}

#[tokio::test]
async fn test_limiter_sequence_with_short_window() {
    let clock = MockClock::default();
    let limiter = RateLimiter::with_clock(Arc::new(clock.clone()));
    let window = Duration::from_millis(1000);

    let results = [
        limiter.is_allowed("k", 3, window).await,
        limiter.is_allowed("k", 3, window).await,
        limiter.is_allowed("k", 3, window).await,
        limiter.is_allowed("k", 3, window).await,
    ];
    assert_eq!(results, [true, true, true, false]);
    assert_eq!(limiter.attempt_count("k").await, 3);

    clock.advance(Duration::from_millis(1001));
    assert!(limiter.is_allowed("k", 3, window).await);
}

#[tokio::test]
async fn test_limiter_default_policy() {
    let limiter = RateLimiter::with_clock(Arc::new(MockClock::default()));
    let limit = RateLimitConfig::default();

    for _ in 0..5 {
        assert!(limiter.check("default", &limit).await.is_allowed());
    }
    assert!(!limiter.check("default", &limit).await.is_allowed());
}
