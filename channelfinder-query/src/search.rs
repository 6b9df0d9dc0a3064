//! Compiled channel searches and their outcome.

use crate::assemble::channel_rows_query;
use crate::criteria::Criteria;
use crate::error::{QueryError, QueryResult, QueryStage};
use crate::executor::Executor;
use crate::resolve::{resolve_ids, IdRestriction};
use channelfinder_types::{Channel, ChannelRow, MatchRequest};
use tracing::{debug, trace};

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A property or tag criterion matched no channel; the outer query was
    /// not run.
    Empty,
    /// Rows from the outer query, ordered by channel name then property name.
    /// May itself be empty when only name patterns failed to match.
    Rows(Vec<ChannelRow>),
}

impl SearchOutcome {
    /// True when no row was produced, whichever stage decided it.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Rows(rows) => rows.is_empty(),
        }
    }

    pub fn rows(&self) -> &[ChannelRow] {
        match self {
            Self::Empty => &[],
            Self::Rows(rows) => rows,
        }
    }

    pub fn into_rows(self) -> Vec<ChannelRow> {
        match self {
            Self::Empty => Vec::new(),
            Self::Rows(rows) => rows,
        }
    }

    /// Groups the rows into channels with their properties and tags.
    pub fn into_channels(self) -> Vec<Channel> {
        Channel::group_rows(self.into_rows())
    }
}

/// A compiled channel search.
///
/// Construction classifies the request; [`execute`](Self::execute) issues
/// the property sub-query (if any), one sub-query per tag pattern, and the
/// outer projection, in that order, on the caller's connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelQuery {
    criteria: Criteria,
}

impl ChannelQuery {
    /// Mixed search over names, tags and properties.
    pub fn multi_match(request: &MatchRequest) -> Self {
        Self::from_criteria(Criteria::classify(request))
    }

    /// Search by channel-name globs.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_criteria(Criteria::from_names(names))
    }

    /// Search by tag names or globs.
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_criteria(Criteria::from_tags(tags))
    }

    pub fn from_criteria(criteria: Criteria) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Runs the search on `conn`.
    pub fn execute<E>(&self, conn: &E) -> QueryResult<SearchOutcome>
    where
        E: Executor + ?Sized,
    {
        let c = &self.criteria;
        debug!(
            "Channel search: {} name(s), {} exact tag(s), {} tag pattern(s), {} property key(s)",
            c.names.len(),
            c.exact_tags.len(),
            c.tag_patterns.len(),
            c.properties.len()
        );

        let restriction = resolve_ids(c, conn)?;
        let ids = match &restriction {
            IdRestriction::NoMatch => {
                debug!("No channel satisfies the property/tag criteria");
                return Ok(SearchOutcome::Empty);
            }
            IdRestriction::Unrestricted => None,
            IdRestriction::Only(ids) => Some(ids),
        };

        let query = channel_rows_query(&c.names, ids).render(conn.dialect());
        trace!("channels query: {}", query.sql);
        let rows = conn
            .fetch_rows(&query)
            .map_err(|e| QueryError::execution(QueryStage::ChannelQuery, e))?;
        debug!("Channel search returned {} row(s)", rows.len());
        Ok(SearchOutcome::Rows(rows))
    }
}
