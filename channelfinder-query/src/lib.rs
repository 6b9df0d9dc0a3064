//! Search query compiler for the channel directory.
//!
//! Turns a [`MatchRequest`](channelfinder_types::MatchRequest) into read-only
//! SQL over the catalog's `channel` and `property` tables and runs it on a
//! caller-supplied connection.
//!
//! # Architecture
//!
//! - [`glob`] translates user glob patterns (`*`, `?`, `\`) into `LIKE` patterns
//! - [`Criteria`] sorts a request into name, exact-tag, tag-pattern and
//!   property buckets
//! - [`resolve_ids`] runs one grouped sub-query for properties and exact tags
//!   and one sub-query per tag pattern, intersecting the ID sets
//! - [`channel_rows_query`] builds the final projection, one row per
//!   channel/property pair, ordered by channel then property name
//! - [`Fragment`] keeps SQL text and typed parameters apart until rendered
//!   for a [`Dialect`]
//!
//! A search either succeeds, possibly with [`SearchOutcome::Empty`], or fails
//! with a [`QueryError`] carrying the store's error.

mod assemble;
mod criteria;
mod error;
mod executor;
pub mod glob;
mod resolve;
mod search;
mod sqlite;
mod statement;

pub use assemble::channel_rows_query;
pub use criteria::{Criteria, PropertyMatch};
pub use error::{BoxedSource, QueryError, QueryResult, QueryStage};
pub use executor::Executor;
pub use resolve::{property_match_query, resolve_ids, tag_pattern_query, IdRestriction};
pub use search::{ChannelQuery, SearchOutcome};
pub use statement::{Dialect, Fragment, RenderedQuery, SqlParam};
