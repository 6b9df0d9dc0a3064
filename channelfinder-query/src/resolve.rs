//! Property and tag sub-queries resolving the set of matching channel IDs.
//!
//! Property keys and exact tags share one grouped sub-query: every clause
//! matches single property rows, and the HAVING count turns the OR over rows
//! into an AND over keys. Tag patterns cannot be counted that way (one
//! pattern may hit several tags of a channel), so each runs separately and is
//! intersected with the running result.
//!
//! Names are folded with the store's own `LOWER` on both sides of every
//! comparison, so a name matches exactly when the store considers the two
//! spellings equal. The Rust side only folds ASCII, which every store agrees on.

use crate::criteria::{Criteria, PropertyMatch};
use crate::error::{QueryError, QueryResult, QueryStage};
use crate::executor::Executor;
use crate::glob::translate;
use crate::statement::Fragment;
use channelfinder_types::ChannelId;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// How the resolved IDs restrict the outer query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdRestriction {
    /// No property or tag criteria: every channel qualifies.
    Unrestricted,
    /// Only these channels qualify. Never empty.
    Only(BTreeSet<ChannelId>),
    /// Some criterion matched no channel; the search result is empty.
    NoMatch,
}

fn property_clause(prop: &PropertyMatch) -> Fragment {
    let key = Fragment::sql("LOWER(p0.property) = LOWER(")
        .push_param(prop.key.as_str())
        .push_sql(")");
    let values = if prop.values.is_empty() {
        Fragment::sql("p0.value IS NOT NULL")
    } else {
        Fragment::join(
            prop.values
                .iter()
                .map(|v| Fragment::new().push_like("p0.value", translate(v))),
            " OR ",
        )
        .parenthesized()
    };
    Fragment::join([key, values], " AND ").parenthesized()
}

fn exact_tag_clause(tag: &str) -> Fragment {
    Fragment::sql("(LOWER(p0.property) = LOWER(")
        .push_param(tag)
        .push_sql(") AND p0.value IS NULL)")
}

/// Builds the grouped property/exact-tag sub-query, or `None` when the
/// criteria hold neither.
pub fn property_match_query(criteria: &Criteria) -> Option<Fragment> {
    if !criteria.requires_property_match() {
        return None;
    }
    let clauses = criteria
        .properties
        .iter()
        .map(property_clause)
        .chain(criteria.exact_tags.iter().map(|t| exact_tag_clause(t)));
    let required = i64::try_from(criteria.required_matches()).unwrap_or(i64::MAX);
    Some(
        Fragment::sql("SELECT p0.channel_id FROM property p0 WHERE ")
            .push(Fragment::join(clauses, " OR "))
            .push_sql(" GROUP BY p0.channel_id HAVING COUNT(DISTINCT LOWER(p0.property)) = ")
            .push_param(required),
    )
}

/// Builds the sub-query for one tag pattern.
pub fn tag_pattern_query(pattern: &str) -> Fragment {
    Fragment::sql("SELECT p0.channel_id FROM property p0 WHERE ")
        .push_like_folded("p0.property", translate(pattern).to_ascii_lowercase())
        .push_sql(" AND p0.value IS NULL GROUP BY p0.channel_id")
}

/// Runs the property and tag sub-queries and intersects their results.
///
/// Stops at the first sub-query or intersection that comes back empty; the
/// remaining tag patterns are not evaluated.
pub fn resolve_ids<E>(criteria: &Criteria, conn: &E) -> QueryResult<IdRestriction>
where
    E: Executor + ?Sized,
{
    let dialect = conn.dialect();
    let mut running: Option<BTreeSet<ChannelId>> = None;

    if let Some(fragment) = property_match_query(criteria) {
        let query = fragment.render(dialect);
        trace!("property match query: {}", query.sql);
        let ids: BTreeSet<ChannelId> = conn
            .fetch_ids(&query)
            .map_err(|e| QueryError::execution(QueryStage::PropertyMatch, e))?
            .into_iter()
            .collect();
        debug!(
            "Property match over {} key(s) found {} channel(s)",
            criteria.required_matches(),
            ids.len()
        );
        if ids.is_empty() {
            return Ok(IdRestriction::NoMatch);
        }
        running = Some(ids);
    }

    for pattern in &criteria.tag_patterns {
        let query = tag_pattern_query(pattern).render(dialect);
        trace!("tag match query: {}", query.sql);
        let ids: BTreeSet<ChannelId> = conn
            .fetch_ids(&query)
            .map_err(|e| QueryError::execution(QueryStage::TagMatch, e))?
            .into_iter()
            .collect();
        let narrowed = match running.take() {
            None => ids,
            Some(current) => current.intersection(&ids).copied().collect(),
        };
        debug!("Tag pattern {:?} leaves {} channel(s)", pattern, narrowed.len());
        if narrowed.is_empty() {
            return Ok(IdRestriction::NoMatch);
        }
        running = Some(narrowed);
    }

    Ok(match running {
        Some(ids) => IdRestriction::Only(ids),
        None => IdRestriction::Unrestricted,
    })
}
