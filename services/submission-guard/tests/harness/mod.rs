// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for submission guard abuse simulation.
//!
//! Provides payload generators, a transport that records what it was
//! handed, and an outcome tally for flood runs.

#![allow(dead_code)]

pub mod generators;
pub mod recording;
pub mod tally;

use std::sync::Arc;
use submission_guard::{clock::MockClock, Config, RateLimiter, SubmissionGuard};

/// Guard on the default site limits with a controllable clock.
pub fn guard_with(transport: Arc<recording::RecordingTransport>) -> (SubmissionGuard, MockClock) {
    let clock = MockClock::default();
    let limiter = RateLimiter::with_clock(Arc::new(clock.clone()));
    let guard = SubmissionGuard::new(limiter, &Config::default(), transport);
    (guard, clock)
}
