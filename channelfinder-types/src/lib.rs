//! Core type definitions for the channel directory.
//!
//! This crate defines the plain data types shared by the query compiler,
//! the catalog connection layer and the command-line front end:
//! - Channel identifiers ([`ChannelId`])
//! - The case-insensitive, multi-valued search request ([`MatchRequest`])
//! - Search result rows and their grouped form ([`ChannelRow`], [`Channel`])
//!
//! Tags are modelled by the catalog as properties without a value; the
//! grouped form splits them back out into [`Tag`] values.

mod channel;
mod ids;
mod request;

pub use channel::{Channel, ChannelRow, Property, Tag};
pub use ids::ChannelId;
pub use request::{MatchRequest, NAME_KEY, TAG_KEY};
