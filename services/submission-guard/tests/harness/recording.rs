// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Transport double that records delivered payloads.

use async_trait::async_trait;
use std::sync::Mutex;
use submission_guard::form::SubmissionPayload;
use submission_guard::transport::{Transport, TransportError};

#[derive(Debug, Default)]
pub struct RecordingTransport {
    delivered: Mutex<Vec<SubmissionPayload>>,
}

impl RecordingTransport {
    pub fn delivered(&self) -> Vec<SubmissionPayload> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), TransportError> {
        self.delivered.lock().unwrap().push(payload.clone());
        Ok(())
    }
}
