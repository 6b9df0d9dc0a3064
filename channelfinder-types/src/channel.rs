use serde::{Deserialize, Serialize};

/// One row of a channel search: a channel joined to one of its properties.
///
/// Channels without any property appear once with all property fields `None`.
/// Tags are property rows with a `None` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRow {
    pub channel_name: String,
    pub channel_owner: String,
    pub property_name: Option<String>,
    pub property_value: Option<String>,
    pub property_owner: Option<String>,
}

impl ChannelRow {
    /// True when the row carries a tag (named property without a value).
    pub fn is_tag(&self) -> bool {
        self.property_name.is_some() && self.property_value.is_none()
    }
}

/// A named key/value attribute attached to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// A valueless label attached to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// A channel with its properties and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Channel {
    /// Creates a channel with no properties or tags.
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            properties: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Looks up a property value by name, case-insensitively.
    pub fn property(&self, name: &str) -> Option<&str> {
        let folded = name.to_lowercase();
        self.properties
            .iter()
            .find(|p| p.name.to_lowercase() == folded)
            .map(|p| p.value.as_str())
    }

    /// Whether the channel carries a tag with this name, case-insensitively.
    pub fn has_tag(&self, name: &str) -> bool {
        let folded = name.to_lowercase();
        self.tags.iter().any(|t| t.name.to_lowercase() == folded)
    }

    /// Folds rows sorted by channel name into channels, in one pass.
    ///
    /// Consecutive rows with the same channel name belong to one channel, so
    /// the input must be grouped by channel (search results are ordered by
    /// channel name, then property name). Property order is kept.
    pub fn group_rows<I>(rows: I) -> Vec<Channel>
    where
        I: IntoIterator<Item = ChannelRow>,
    {
        let mut channels: Vec<Channel> = Vec::new();
        for row in rows {
            let same = channels
                .last()
                .is_some_and(|current| current.name == row.channel_name);
            if !same {
                channels.push(Channel::new(row.channel_name, row.channel_owner));
            }
            let Some(channel) = channels.last_mut() else {
                continue;
            };
            match (row.property_name, row.property_value) {
                (Some(name), Some(value)) => channel.properties.push(Property {
                    name,
                    value,
                    owner: row.property_owner,
                }),
                (Some(name), None) => channel.tags.push(Tag {
                    name,
                    owner: row.property_owner,
                }),
                (None, _) => {}
            }
        }
        channels
    }
}
