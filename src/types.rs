//! Typed results shaped from daemon replies

use std::collections::HashMap;

use serde::Serialize;

/// One filter as reported by `list`
///
/// Parsed from a line of five whitespace-separated fields:
/// `name probability size capacity items`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterDescriptor {
    pub name: String,
    /// Configured false-positive probability
    pub probability: f64,
    /// Storage size in bytes
    pub size: u64,
    pub capacity: u64,
    /// Number of items added so far
    pub items: u64,
}

impl FilterDescriptor {
    /// Parse one `list` line, or `None` if it is malformed
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let descriptor = Self {
            name: fields.next()?.to_string(),
            probability: fields.next()?.parse().ok()?,
            size: fields.next()?.parse().ok()?,
            capacity: fields.next()?.parse().ok()?,
            items: fields.next()?.parse().ok()?,
        };
        if fields.next().is_some() {
            return None;
        }
        Some(descriptor)
    }
}

/// Presence of each checked key, in the order the keys were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChecks {
    entries: Vec<(String, bool)>,
}

impl KeyChecks {
    pub fn new(entries: Vec<(String, bool)>) -> Self {
        Self { entries }
    }

    /// Result for `key`; the first occurrence wins for repeated keys
    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, present)| *present)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(k, present)| (k.as_str(), *present))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_hash_map(self) -> HashMap<String, bool> {
        self.entries.into_iter().collect()
    }
}

impl IntoIterator for KeyChecks {
    type Item = (String, bool);
    type IntoIter = std::vec::IntoIter<(String, bool)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
