//! The seam between compiled statements and a live store connection.

use crate::statement::{Dialect, RenderedQuery};
use channelfinder_types::{ChannelId, ChannelRow};

/// A live connection able to run compiled search statements.
///
/// The search never opens, commits or closes the connection; the caller owns
/// its lifecycle. Implementations run each statement once and report store
/// failures unchanged so they can be attached as the error source.
pub trait Executor {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The SQL flavour statements are rendered in.
    fn dialect(&self) -> Dialect;

    /// Runs a statement whose first column is a channel ID.
    fn fetch_ids(&self, query: &RenderedQuery) -> Result<Vec<ChannelId>, Self::Error>;

    /// Runs the channel projection, returning rows in store order.
    fn fetch_rows(&self, query: &RenderedQuery) -> Result<Vec<ChannelRow>, Self::Error>;
}

impl<E: Executor + ?Sized> Executor for &E {
    type Error = E::Error;

    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn fetch_ids(&self, query: &RenderedQuery) -> Result<Vec<ChannelId>, Self::Error> {
        (**self).fetch_ids(query)
    }

    fn fetch_rows(&self, query: &RenderedQuery) -> Result<Vec<ChannelRow>, Self::Error> {
        (**self).fetch_rows(query)
    }
}
