//! Error types for query parsing.

use thiserror::Error;

/// Errors that can occur during query parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Parse error at a specific position in the input.
    #[error("parse error at position {position}: {message}")]
    ParseError {
        /// Byte position in the input where the error occurred.
        position: usize,
        /// Description of the error.
        message: String,
    },

    /// A `field:value` term names a field the language does not know.
    #[error("unknown field '{field}' at position {position}")]
    UnknownField {
        /// Byte position of the field name.
        position: usize,
        /// The unrecognized field name.
        field: String,
    },

    /// Parentheses do not balance.
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis {
        /// Byte position of the offending parenthesis.
        position: usize,
    },

    /// Empty input provided.
    #[error("empty query")]
    EmptyQuery,
}

/// Result type for query parsing.
pub type QueryResult<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse_error() {
        let err = QueryError::ParseError {
            position: 4,
            message: "unexpected input at: ')'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "parse error at position 4: unexpected input at: ')'"
        );
    }

    #[test]
    fn test_error_display_unknown_field() {
        let err = QueryError::UnknownField {
            position: 0,
            field: "colour".to_string(),
        };
        assert_eq!(err.to_string(), "unknown field 'colour' at position 0");
    }

    #[test]
    fn test_error_display_empty() {
        assert_eq!(QueryError::EmptyQuery.to_string(), "empty query");
    }
}
