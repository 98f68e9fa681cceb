//! Error types for query execution.

use cardsearch_db::DbError;
use cardsearch_query::{Field, QueryError};
use thiserror::Error;

/// Errors that can occur while running a search.
///
/// Soft problems (unresolvable dates, spelling near-misses) are not errors;
/// they are reported in [`crate::SearchResults::warnings`].
#[derive(Error, Debug)]
pub enum SearchError {
    /// The query text does not parse.
    #[error("Query parse error: {0}")]
    ParseError(#[from] QueryError),

    /// A corpus lookup failed.
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// A field was given a value it cannot interpret.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// The field being tested.
        field: Field,
        /// The offending value.
        value: String,
    },

    /// Result set exceeds configured limit.
    #[error("Result set too large: {count} exceeds limit {limit}")]
    ResultTooLarge {
        /// Number of matching printings.
        count: usize,
        /// Configured limit.
        limit: usize,
    },
}

impl SearchError {
    pub(crate) fn invalid(field: Field, value: &str) -> Self {
        SearchError::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}

/// Result type for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
