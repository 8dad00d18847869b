// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Form fields and the contact form schema.

use crate::sanitize::sanitize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sanitized field values keyed by field name, as handed to a transport.
pub type SubmissionPayload = BTreeMap<String, String>;

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    TextArea,
}

/// Declared shape of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Fields of the portfolio contact form, in display order.
pub const CONTACT_SCHEMA: &[FieldSpec] = &[
    FieldSpec { name: "name", kind: FieldKind::Text, required: true },
    FieldSpec { name: "email", kind: FieldKind::Email, required: true },
    FieldSpec { name: "phone", kind: FieldKind::Phone, required: false },
    FieldSpec { name: "subject", kind: FieldKind::Text, required: true },
    FieldSpec { name: "message", kind: FieldKind::TextArea, required: true },
];

/// A single submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl FormField {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        kind: FieldKind,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
            required,
        }
    }
}

/// An ordered set of submitted fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    fields: Vec<FormField>,
}

impl ContactForm {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    /// Build a form from raw name/value pairs against `schema`.
    ///
    /// Schema fields come first in schema order, missing values become empty
    /// strings. Names outside the schema are kept as optional text fields.
    pub fn from_values(schema: &[FieldSpec], mut values: BTreeMap<String, String>) -> Self {
        let mut fields: Vec<FormField> = schema
            .iter()
            .map(|spec| {
                let value = values.remove(spec.name).unwrap_or_default();
                FormField::new(spec.name, value, spec.kind, spec.required)
            })
            .collect();

        fields.extend(
            values
                .into_iter()
                .map(|(name, value)| FormField::new(name, value, FieldKind::Text, false)),
        );

        Self { fields }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Value of the field named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Copy of the form with every value escaped, whitespace kept.
    pub fn sanitized(&self) -> Self {
        self.map_values(sanitize)
    }

    /// Copy of the form with every value trimmed, then escaped. This is the
    /// view per-field validation runs on.
    pub fn trimmed(&self) -> Self {
        self.map_values(|v| sanitize(v.trim()))
    }

    fn map_values(&self, f: impl Fn(&str) -> String) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|field| FormField {
                value: f(&field.value),
                ..field.clone()
            })
            .collect();
        Self { fields }
    }

    pub fn payload(&self) -> SubmissionPayload {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}
