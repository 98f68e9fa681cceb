//! Error types for format lookup and deck assembly.

use thiserror::Error;

/// Errors that can occur before a deck is checked.
///
/// A deck breaking a format rule is not an error: see
/// [`crate::Format::deck_legality`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No format has this name.
    #[error("unknown format '{0}'")]
    UnknownFormat(String),

    /// A deck entry names no card in the corpus.
    #[error("unknown card '{0}'")]
    UnknownCard(String),

    /// A deck entry names a card with no printing in the requested set.
    #[error("{card} has no printing in set '{set}'")]
    NoPrintingInSet {
        /// Card name from the deck entry.
        card: String,
        /// Requested set code.
        set: String,
    },
}

/// Result type for format operations.
pub type FormatResult<T> = std::result::Result<T, FormatError>;
