//! Error types for the query compiler.

use std::fmt;
use thiserror::Error;

/// Result type for search operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Boxed low-level failure reported by an executor.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The statement whose execution failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStage {
    /// Combined property and exact-tag sub-query.
    PropertyMatch,
    /// Per-pattern tag sub-query.
    TagMatch,
    /// Final channel/property projection.
    ChannelQuery,
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::PropertyMatch => "getting ids in property match query",
            Self::TagMatch => "getting ids in tag match query",
            Self::ChannelQuery => "running channels query",
        };
        f.write_str(stage)
    }
}

/// Errors that can occur while running a channel search.
///
/// A search that matches nothing is not an error; see `SearchOutcome::Empty`.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Statement preparation or execution failed in the underlying store.
    #[error("query execution failed while {stage}: {source}")]
    Execution {
        stage: QueryStage,
        #[source]
        source: BoxedSource,
    },
}

impl QueryError {
    /// Wraps a store failure raised during `stage`.
    pub fn execution<E>(stage: QueryStage, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Execution {
            stage,
            source: Box::new(source),
        }
    }

    /// The stage that failed.
    pub fn stage(&self) -> QueryStage {
        match self {
            Self::Execution { stage, .. } => *stage,
        }
    }
}
