//! Bidirectional code tables.
//!
//! State APIs enumerate counties, parties, genders, and address unit types
//! as short internal codes paired with human-readable labels. A [`CodeTable`]
//! holds one such enumeration with case-insensitive lookup in both
//! directions. Tables are populated once (from a setup call or a built-in
//! default) and shared read-only afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A label ↔ code mapping for one remote enumeration.
///
/// Labels are stored lowercased so lookups are case-insensitive; codes keep
/// their original casing (the remote is strict about what it receives).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeTable {
    /// Lowercased label -> code.
    by_label: BTreeMap<String, String>,
    /// Lowercased code -> label.
    by_code: BTreeMap<String, String>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one label/code pair, keeping both directions in sync.
    pub fn insert(&mut self, label: &str, code: &str) {
        self.by_label
            .insert(label.to_lowercase(), code.to_string());
        self.by_code.insert(code.to_lowercase(), label.to_string());
    }

    /// Resolve a label (case-insensitive) to its code.
    pub fn code(&self, label: &str) -> Option<&str> {
        self.by_label.get(&label.to_lowercase()).map(String::as_str)
    }

    /// Resolve a code (case-insensitive) back to its label.
    pub fn label(&self, code: &str) -> Option<&str> {
        self.by_code.get(&code.to_lowercase()).map(String::as_str)
    }

    /// True when `code` is one of the table's codes (case-insensitive).
    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code.contains_key(&code.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    /// Iterate `(lowercased label, code)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_label
            .iter()
            .map(|(label, code)| (label.as_str(), code.as_str()))
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (label, code) in iter {
            table.insert(label, code);
        }
        table
    }
}
