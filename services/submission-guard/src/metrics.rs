// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus counters for submission outcomes.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Submission counters on a private registry.
#[derive(Debug, Clone)]
pub struct Metrics {
    registry: Registry,
    submissions: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let submissions = IntCounterVec::new(
            Opts::new(
                "submission_guard_submissions_total",
                "Form submissions by form and outcome",
            ),
            &["form", "outcome"],
        )?;
        registry.register(Box::new(submissions.clone()))?;

        Ok(Self {
            registry,
            submissions,
        })
    }

    pub fn record(&self, form: &str, outcome: &str) {
        self.submissions.with_label_values(&[form, outcome]).inc();
    }

    pub fn count(&self, form: &str, outcome: &str) -> u64 {
        self.submissions.with_label_values(&[form, outcome]).get()
    }

    /// Render all metrics in the Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_render() {
        let metrics = Metrics::new().unwrap();
        metrics.record("contact", "delivered");
        metrics.record("contact", "delivered");
        metrics.record("newsletter", "rate_limited");

        assert_eq!(metrics.count("contact", "delivered"), 2);

        let text = metrics.render().unwrap();
        assert!(text.contains("submission_guard_submissions_total"));
        assert!(text.contains(r#"outcome="rate_limited""#));
    }
}
