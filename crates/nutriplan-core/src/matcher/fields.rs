//! Parsing for the free-text `key:value` list cells of a plan row.
//!
//! Macros are comma-separated (`Protein:20g,Carbs:50g`), alternatives are
//! pipe-separated (`Breakfast:Oats|Dinner:Dal`). Fragments without a colon
//! are skipped. A fragment with more than one colon cannot be split into a
//! single key and value and fails the whole cell.

use serde::ser::{Serialize, Serializer};
use thiserror::Error;

pub const MACRO_SEPARATOR: char = ',';
pub const ALTERNATIVE_SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("pair {0:?} has more than one ':'")]
    AmbiguousPair(String),
}

/// Ordered `key -> value` pairs. Keys are unique; a repeated key replaces
/// the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for `key`, or `fallback` when absent.
    pub fn get_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.get(key).unwrap_or(fallback)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Parse a comma-separated macro cell.
pub fn parse_macros(cell: &str) -> Result<FieldMap, FieldError> {
    parse_pairs(cell, MACRO_SEPARATOR)
}

/// Parse a pipe-separated alternatives cell.
pub fn parse_alternatives(cell: &str) -> Result<FieldMap, FieldError> {
    parse_pairs(cell, ALTERNATIVE_SEPARATOR)
}

/// Split `cell` on `separator` and collect each `key:value` fragment.
pub fn parse_pairs(cell: &str, separator: char) -> Result<FieldMap, FieldError> {
    let mut map = FieldMap::new();
    for part in cell.split(separator) {
        let part = part.trim();
        let mut pieces = part.split(':');
        let (Some(key), Some(value)) = (pieces.next(), pieces.next()) else {
            continue;
        };
        if pieces.next().is_some() {
            return Err(FieldError::AmbiguousPair(part.to_string()));
        }
        map.insert(key.trim(), value.trim());
    }
    Ok(map)
}
