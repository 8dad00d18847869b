// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Markup escaping for submitted text.

/// Escape `input` so it can be reinserted as page content.
///
/// Produces the same markup a browser serializes for a text node holding
/// `input`: `&`, `<`, `>` and U+00A0 are replaced by entities, quotes are
/// left alone.
///
/// ```
/// use submission_guard::sanitize::sanitize;
///
/// assert_eq!(sanitize("<b>hi</b> & bye"), "&lt;b&gt;hi&lt;/b&gt; &amp; bye");
/// ```
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}
