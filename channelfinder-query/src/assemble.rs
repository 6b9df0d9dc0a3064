//! Outer channel/property projection.

use crate::glob::translate;
use crate::statement::Fragment;
use channelfinder_types::ChannelId;
use std::collections::BTreeSet;

const PROJECTION: &str = "SELECT c.name, c.owner, p.property, p.value, p.owner \
     FROM channel c LEFT JOIN property p ON c.id = p.channel_id";

const ORDERING: &str = " ORDER BY c.name, p.property";

/// Builds the outer channel/property projection.
///
/// `ids` restricts the result to those channels when given and must not be
/// empty (an empty resolution ends the search before this query is built).
/// `names` restricts to channels whose name matches any of the globs. Rows
/// are ordered by channel name, then property name.
pub fn channel_rows_query(names: &[String], ids: Option<&BTreeSet<ChannelId>>) -> Fragment {
    debug_assert!(ids.is_none_or(|ids| !ids.is_empty()));

    let mut conditions = Vec::new();
    if let Some(ids) = ids {
        conditions.push(Fragment::new().push_in_list("c.id", ids.iter().map(|id| id.as_i64())));
    }
    if !names.is_empty() {
        let alternatives = Fragment::join(
            names.iter().map(|n| Fragment::new().push_like("c.name", translate(n))),
            " OR ",
        );
        conditions.push(alternatives.parenthesized());
    }

    let mut query = Fragment::sql(PROJECTION);
    if !conditions.is_empty() {
        query = query
            .push_sql(" WHERE ")
            .push(Fragment::join(conditions, " AND "));
    }
    query.push_sql(ORDERING)
}
