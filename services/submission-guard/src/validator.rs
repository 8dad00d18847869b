// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Field validation for form submissions.
//!
//! The email and phone patterns are intentionally permissive; they catch
//! typos, they are not RFC parsers.

use crate::form::{FieldKind, FormField};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX is a valid regex pattern")
});

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?([0-9]{1,3}[-\s.]?)?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
        .expect("PHONE_REGEX is a valid regex pattern")
});

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid email address in field {0}")]
    InvalidEmail(String),

    #[error("Invalid phone number in field {0}")]
    InvalidPhone(String),
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField(f) | Self::InvalidEmail(f) | Self::InvalidPhone(f) => f,
        }
    }
}

/// Result of validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Field is valid
    Valid,
    /// Field is invalid
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_email_valid(s: &str) -> bool {
    EMAIL_REGEX.is_match(s)
}

/// Optional `+` and country code, optional parenthesized area code, then
/// 3, 3 and 4-6 digits with optional `-`, `.` or whitespace separators.
pub fn is_phone_valid(s: &str) -> bool {
    PHONE_REGEX.is_match(s)
}

/// Validate one already-sanitized field.
///
/// Empty optional fields pass, except email fields, which always have to
/// match the email pattern.
pub fn validate_field(field: &FormField) -> ValidationResult {
    if field.value.is_empty() {
        if field.required {
            debug!(field = %field.name, "Required field empty");
            return ValidationResult::Invalid(ValidationError::MissingField(field.name.clone()));
        }
        if field.kind != FieldKind::Email {
            return ValidationResult::Valid;
        }
    }

    match field.kind {
        FieldKind::Email if !is_email_valid(&field.value) => {
            debug!(field = %field.name, "Email format invalid");
            ValidationResult::Invalid(ValidationError::InvalidEmail(field.name.clone()))
        }
        FieldKind::Phone if !is_phone_valid(&field.value) => {
            debug!(field = %field.name, "Phone format invalid");
            ValidationResult::Invalid(ValidationError::InvalidPhone(field.name.clone()))
        }
        _ => ValidationResult::Valid,
    }
}

/// Validate every field, collecting all failures.
pub fn validate_fields(fields: &[FormField]) -> Vec<ValidationError> {
    fields
        .iter()
        .filter_map(|f| match validate_field(f) {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        })
        .collect()
}
