//! Case-insensitive multi-valued search request.

use serde::{Deserialize, Serialize};

/// Reserved criterion key selecting channel-name matches.
pub const NAME_KEY: &str = "~name";

/// Reserved criterion key selecting tag matches.
pub const TAG_KEY: &str = "~tag";

/// A search request: criterion keys mapped to ordered lists of patterns.
///
/// Keys compare case-insensitively. Keys that differ only in case share one
/// entry, which keeps the spelling it was first inserted with. Entries
/// iterate in first-insertion order and values keep their insertion order,
/// duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    entries: Vec<(String, Vec<String>)>,
}

impl MatchRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one value under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        self.slot(key).push(value);
        self
    }

    /// Appends every value under `key`. An empty `values` still registers the key.
    pub fn extend_key<I, V>(&mut self, key: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.slot(key.into()).extend(values.into_iter().map(Into::into));
        self
    }

    /// Returns the values stored under `key`, compared case-insensitively.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        let folded = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| k.to_lowercase() == folded)
            .map(|(_, v)| v.as_slice())
    }

    /// Iterates `(key, values)` entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn slot(&mut self, key: String) -> &mut Vec<String> {
        let folded = key.to_lowercase();
        let pos = match self.entries.iter().position(|(k, _)| k.to_lowercase() == folded) {
            Some(pos) => pos,
            None => {
                self.entries.push((key, Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }
}

impl<K, V> FromIterator<(K, V)> for MatchRequest
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut request = Self::new();
        for (key, value) in iter {
            request.add(key, value);
        }
        request
    }
}
