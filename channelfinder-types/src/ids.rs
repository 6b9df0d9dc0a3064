//! Identifier types used throughout the channel directory.
//!
//! Channel identities are opaque numeric keys assigned by the catalog store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier for a channel in the catalog.
/// Wraps the store's integer primary key; ordering follows the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(i64);

impl ChannelId {
    /// Creates a channel ID from a raw store key.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the underlying store key.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Parses a channel ID from a decimal string.
    pub fn parse(s: &str) -> Result<Self, ParseIntError> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for ChannelId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<ChannelId> for i64 {
    fn from(id: ChannelId) -> Self {
        id.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChannelId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
