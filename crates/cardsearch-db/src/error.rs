//! Error types for corpus construction and lookup.

use thiserror::Error;

/// Errors that can occur while building or querying the card corpus.
///
/// Every variant except [`DbError::AmbiguousEdition`] and [`DbError::Json`]
/// is a fatal data error: the corpus is never returned partially derived.
#[derive(Error, Debug)]
pub enum DbError {
    /// A mana symbol in a cost or rules text is not recognized.
    #[error("unknown mana symbol '{{{symbol}}}' on {card}")]
    UnknownManaSymbol {
        /// Card being derived.
        card: String,
        /// Symbol text without braces.
        symbol: String,
    },

    /// A mana cost had text outside of `{...}` symbols.
    #[error("malformed mana cost '{cost}' on {card}")]
    MalformedManaCost {
        /// Card being derived.
        card: String,
        /// The raw cost.
        cost: String,
    },

    /// A power, toughness or loyalty value is outside the known vocabulary.
    #[error("unrecognized stat value '{value}' on {card}")]
    UnknownStatValue {
        /// Card being derived.
        card: String,
        /// The raw value.
        value: String,
    },

    /// A card has a combination of basic land types with no reminder text.
    #[error("no reminder text for basic land types '{land_types}' on {card}")]
    UnknownLandTypes {
        /// Card being derived.
        card: String,
        /// Sorted, space separated basic land types.
        land_types: String,
    },

    /// A printing references a set that does not exist.
    #[error("card {card} is printed in unknown set '{set_code}'")]
    UnknownSet {
        /// Card name.
        card: String,
        /// The missing set code.
        set_code: String,
    },

    /// A printing has a rarity outside the known vocabulary.
    #[error("unknown rarity '{rarity}' on {card}")]
    UnknownRarity {
        /// Card name.
        card: String,
        /// The raw rarity.
        rarity: String,
    },

    /// A card has a legality status outside the known vocabulary.
    #[error("unknown legality '{status}' for format {format} on {card}")]
    UnknownLegality {
        /// Card name.
        card: String,
        /// Format name.
        format: String,
        /// The raw status.
        status: String,
    },

    /// Two records normalize to the same card name but disagree.
    #[error("conflicting records for card {0}")]
    ConflictingDuplicate(String),

    /// A multi-part card names a sibling that does not exist.
    #[error("card {card} names missing sibling {sibling}")]
    UnresolvedSibling {
        /// Card name.
        card: String,
        /// Missing sibling name.
        sibling: String,
    },

    /// Sibling cards disagree about which faces belong together.
    #[error("inconsistent sibling lists between {card} and {sibling}")]
    InconsistentSiblings {
        /// Card name.
        card: String,
        /// Sibling whose list differs.
        sibling: String,
    },

    /// A multi-part printing could not be linked to its sibling printing.
    #[error("can't link other side of {card} in set {set_code}")]
    UnlinkedSibling {
        /// Card name.
        card: String,
        /// Set being linked.
        set_code: String,
    },

    /// A partner collector number has no printing in the same set.
    #[error("bad partner reference '{number}' on {card} in set {set_code}")]
    BadPartner {
        /// Card name.
        card: String,
        /// Set code.
        set_code: String,
        /// The partner collector number.
        number: String,
    },

    /// A preconstructed deck lists a card that can't be resolved.
    #[error("deck {deck} lists unresolvable card {card}")]
    UnresolvedDeckCard {
        /// Deck name.
        deck: String,
        /// Card entry that failed.
        card: String,
    },

    /// Free text matched more than one set where exactly one was required.
    #[error("ambiguous set name {query}, matches {count} sets")]
    AmbiguousEdition {
        /// The query text.
        query: String,
        /// Number of matching sets.
        count: usize,
    },

    /// Raw records could not be deserialized.
    #[error("invalid raw data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for corpus operations.
pub type DbResult<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_mana_symbol() {
        let err = DbError::UnknownManaSymbol {
            card: "Mox Lotus".to_string(),
            symbol: "q/z".to_string(),
        };
        assert_eq!(err.to_string(), "unknown mana symbol '{q/z}' on Mox Lotus");
    }

    #[test]
    fn test_error_display_ambiguous() {
        let err = DbError::AmbiguousEdition {
            query: "urza".to_string(),
            count: 3,
        };
        assert_eq!(err.to_string(), "ambiguous set name urza, matches 3 sets");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: DbError = json_err.into();
        assert!(matches!(err, DbError::Json(_)));
    }
}
