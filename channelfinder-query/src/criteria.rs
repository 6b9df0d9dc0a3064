//! Classification of a search request into match buckets.

use crate::glob::is_pattern;
use channelfinder_types::{MatchRequest, NAME_KEY, TAG_KEY};

/// All value patterns requested for one property key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMatch {
    /// Property name with ASCII letters lower-cased.
    pub key: String,
    /// Glob patterns in request order; any one of them may match.
    pub values: Vec<String>,
}

/// A search request sorted by how each criterion is evaluated.
///
/// Property matches and exact tags go to one grouped sub-query, every tag
/// pattern gets its own sub-query, and name matches restrict the outer query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Channel-name globs, OR-ed together.
    pub names: Vec<String>,
    /// Tag names without wildcards, ASCII lower-cased and de-duplicated
    /// case-insensitively.
    pub exact_tags: Vec<String>,
    /// Tag globs, each required independently.
    pub tag_patterns: Vec<String>,
    /// Property keys in first-seen order, each required. Keys that differ
    /// only in letter case share one entry.
    pub properties: Vec<PropertyMatch>,
}

impl Criteria {
    /// Classifies a general multi-criterion request.
    pub fn classify(request: &MatchRequest) -> Self {
        let mut criteria = Self::default();
        for (key, values) in request.iter() {
            let key = key.to_ascii_lowercase();
            if key == NAME_KEY {
                criteria.names.extend(values.iter().cloned());
            } else if key == TAG_KEY {
                criteria.add_tags(values.iter().map(String::as_str));
            } else {
                criteria.add_property(key, values);
            }
        }
        criteria
    }

    /// Criteria matching channels by name only.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Criteria matching channels by tag only.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut criteria = Self::default();
        for tag in tags {
            criteria.add_tags(std::iter::once(tag.as_ref()));
        }
        criteria
    }

    /// Whether any criterion restricts the set of channel IDs.
    pub fn has_id_criteria(&self) -> bool {
        self.requires_property_match() || !self.tag_patterns.is_empty()
    }

    /// Whether the grouped property/exact-tag sub-query has to run.
    pub fn requires_property_match(&self) -> bool {
        !self.properties.is_empty() || !self.exact_tags.is_empty()
    }

    /// Number of distinct property names a channel must match in the grouped
    /// sub-query: one per property key plus one per exact tag.
    pub fn required_matches(&self) -> usize {
        self.properties.len() + self.exact_tags.len()
    }

    /// True when nothing restricts the search.
    pub fn is_unrestricted(&self) -> bool {
        self.names.is_empty() && !self.has_id_criteria()
    }

    fn add_tags<'a>(&mut self, values: impl Iterator<Item = &'a str>) {
        for value in values {
            if is_pattern(value) {
                self.tag_patterns.push(value.to_owned());
            } else {
                let tag = value.to_ascii_lowercase();
                let folded = tag.to_lowercase();
                if !self.exact_tags.iter().any(|t| t.to_lowercase() == folded) {
                    self.exact_tags.push(tag);
                }
            }
        }
    }

    fn add_property(&mut self, key: String, values: &[String]) {
        let folded = key.to_lowercase();
        match self.properties.iter_mut().find(|p| p.key.to_lowercase() == folded) {
            Some(existing) => existing.values.extend(values.iter().cloned()),
            None => self.properties.push(PropertyMatch {
                key,
                values: values.to_vec(),
            }),
        }
    }
}

impl From<&MatchRequest> for Criteria {
    fn from(request: &MatchRequest) -> Self {
        Self::classify(request)
    }
}
