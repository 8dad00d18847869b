// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for abuse simulation.

use std::collections::BTreeMap;
use submission_guard::form::CONTACT_SCHEMA;
use submission_guard::ContactForm;

/// Markup injection payloads.
pub fn markup_payloads() -> Vec<&'static str> {
    vec![
        "<script>alert(1)</script>",
        "<img src=x onerror=alert(1)>",
        "\"><svg/onload=alert(1)>",
        "<iframe src=\"javascript:alert(1)\"></iframe>",
        "&lt;already-escaped&gt;",
        "</textarea><script>document.cookie</script>",
        "<<script>>nested<</script>>",
        "<a href='//evil.example'>click</a>",
    ]
}

/// Addresses the email pattern accepts.
pub fn valid_emails() -> Vec<&'static str> {
    vec![
        "a@b.com",
        "ada.lovelace@example.org",
        "first+tag@sub.example.co.uk",
        "x@y.z",
    ]
}

/// Addresses the email pattern rejects.
pub fn invalid_emails() -> Vec<&'static str> {
    vec![
        "",
        "a@b",
        "a@@b.com",
        "plainaddress",
        "@example.com",
        "spaces in@example.com",
        "trailing@dot.",
    ]
}

/// Raw values of a contact form that passes validation.
pub fn valid_contact_values() -> BTreeMap<String, String> {
    [
        ("name", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("subject", "Proyecto"),
        ("message", "Hola, me gustaría hablar de un proyecto."),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// A contact form that passes validation.
pub fn valid_contact_form() -> ContactForm {
    ContactForm::from_values(CONTACT_SCHEMA, valid_contact_values())
}

/// A valid contact form whose message is `message`.
pub fn contact_form_with_message(message: &str) -> ContactForm {
    let mut values = valid_contact_values();
    values.insert("message".to_string(), message.to_string());
    ContactForm::from_values(CONTACT_SCHEMA, values)
}
