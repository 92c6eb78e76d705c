//! Shared primitive types used across the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A census tract identifier, e.g. `25025000100`.
///
/// Stored in its string form so integer and string identifiers compare
/// the same way they print. Equality is exact: no numeric normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawTractId", into = "String")]
pub struct TractId(String);

impl TractId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TractId {
    fn from(id: &str) -> Self { Self(id.to_string()) }
}

impl From<String> for TractId {
    fn from(id: String) -> Self { Self(id) }
}

impl From<u64> for TractId {
    fn from(id: u64) -> Self { Self(id.to_string()) }
}

impl From<TractId> for String {
    fn from(id: TractId) -> Self { id.0 }
}

/// Tract ids arrive from the UI either as JSON numbers or strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTractId {
    Number(u64),
    Text(String),
}

impl From<RawTractId> for TractId {
    fn from(raw: RawTractId) -> Self {
        match raw {
            RawTractId::Number(n) => TractId::from(n),
            RawTractId::Text(s)   => TractId::from(s),
        }
    }
}

/// A column name in a tract table.
pub type MetricName = String;
