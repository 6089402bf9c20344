//! Plot-configuration identity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One trace request: plot-control name mapped to its selected value.
///
/// Equality is order-independent over the key set, with values compared as
/// opaque tokens: two configurations describe the same request iff they carry
/// exactly the same parameter names and every value matches exactly. The
/// derived `PartialEq` on the backing map gives precisely these semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlotConfig(BTreeMap<String, String>);

impl PlotConfig {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build from (name, value) pairs. A repeated name overwrites the earlier
    /// value, like assigning to the same control twice.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
