// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Persisted light/dark theme preference.
//!
//! The preference lives under the `"theme"` key of a small JSON object on
//! disk. Other keys in the file are preserved on write.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const THEME_KEY: &str = "theme";

/// Theme store error types.
#[derive(Debug, Error)]
pub enum ThemeStoreError {
    #[error("Theme store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Theme store encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Colour scheme of the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon class of the toggle button, which shows the theme to switch to.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "fas fa-sun",
            Theme::Light => "fas fa-moon",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// JSON key-value file holding the theme preference.
#[derive(Debug)]
pub struct ThemeStore {
    path: PathBuf,
    // Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme, or [`Theme::Light`] when nothing usable is stored.
    pub async fn load(&self) -> Result<Theme, ThemeStoreError> {
        let _guard = self.lock.lock().await;
        let entries = self.read_entries().await?;
        Ok(theme_from_entries(&entries))
    }

    pub async fn save(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        let _guard = self.lock.lock().await;
        self.write_theme(theme).await
    }

    /// Flip the stored theme and return the new one.
    pub async fn toggle(&self) -> Result<Theme, ThemeStoreError> {
        let _guard = self.lock.lock().await;
        let current = theme_from_entries(&self.read_entries().await?);
        let next = current.toggled();
        self.write_theme(next).await?;
        Ok(next)
    }

    async fn write_theme(&self, theme: Theme) -> Result<(), ThemeStoreError> {
        let mut entries = self.read_entries().await?;
        entries.insert(THEME_KEY.to_string(), Value::from(theme.as_str()));

        let encoded = serde_json::to_vec_pretty(&Value::Object(entries))?;
        tokio::fs::write(&self.path, encoded)
            .await
            .map_err(|source| ThemeStoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(theme = theme.as_str(), path = %self.path.display(), "Theme saved");
        Ok(())
    }

    async fn read_entries(&self) -> Result<Map<String, Value>, ThemeStoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(ThemeStoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(entries)) => Ok(entries),
            _ => {
                warn!(path = %self.path.display(), "Theme store unreadable, starting empty");
                Ok(Map::new())
            }
        }
    }
}

fn theme_from_entries(entries: &Map<String, Value>) -> Theme {
    entries
        .get(THEME_KEY)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}
