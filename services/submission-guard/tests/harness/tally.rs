// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Outcome counting for flood runs.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Default)]
pub struct Tally {
    counts: BTreeMap<&'static str, usize>,
}

impl Tally {
    pub fn record(&mut self, code: &'static str) {
        *self.counts.entry(code).or_default() += 1;
    }

    pub fn get(&self, code: &str) -> usize {
        self.counts.get(code).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Flood Report ===")?;
        for (code, count) in &self.counts {
            writeln!(f, "{code:>16}: {count}")?;
        }
        write!(f, "{:>16}: {}", "total", self.total())
    }
}
