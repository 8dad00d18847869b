// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact form status display.
//!
//! A shown status stays visible for a fixed delay and is then hidden by a
//! background task. Showing a new status aborts the pending hide task first,
//! so an older timer can never hide a newer message.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Visual state of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Hidden,
    Success,
    Error,
}

/// Snapshot of the status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
    pub updated_at: DateTime<Utc>,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            message: String::new(),
            kind: StatusKind::Hidden,
            updated_at: Utc::now(),
        }
    }
}

/// Status line with a cancellable auto-hide.
#[derive(Debug)]
pub struct StatusBoard {
    current: Arc<Mutex<Status>>,
    pending_clear: Mutex<Option<JoinHandle<()>>>,
    clear_after: Duration,
}

impl StatusBoard {
    pub fn new(clear_after: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(Status::default())),
            pending_clear: Mutex::new(None),
            clear_after,
        }
    }

    /// Show `message` and schedule it to be hidden.
    pub async fn show(&self, message: impl Into<String>, kind: StatusKind) {
        let message = message.into();
        let mut pending = self.pending_clear.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        {
            let mut current = self.current.lock().await;
            *current = Status {
                message,
                kind,
                updated_at: Utc::now(),
            };
            debug!(message = %current.message, ?kind, "Status shown");
        }

        let current = Arc::clone(&self.current);
        let clear_after = self.clear_after;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(clear_after).await;
            let mut status = current.lock().await;
            status.kind = StatusKind::Hidden;
            status.updated_at = Utc::now();
        }));
    }

    pub async fn current(&self) -> Status {
        self.current.lock().await.clone()
    }
}

impl Drop for StatusBoard {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_clear.get_mut().take() {
            handle.abort();
        }
    }
}
