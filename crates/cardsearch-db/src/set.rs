//! Sets and release dates.

use chrono::NaiveDate;

use crate::deck::PreconDeck;
use crate::ids::{PrintingId, SetId};
use crate::normalize::{normalize_set_name, normalize_set_name_alt};

/// Parses a feed release date; `YYYY-MM` means the first of the month.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .ok()
}

/// A set of printings released together.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSet {
    /// This set.
    pub id: SetId,
    /// Set code, lowercase.
    pub code: String,
    /// Full name.
    pub name: String,
    /// Block code, lowercase.
    pub block_code: Option<String>,
    /// Block name.
    pub block_name: Option<String>,
    /// Alternate block code, lowercase.
    pub alternative_block_code: Option<String>,
    /// Alternate set code.
    pub alternative_code: Option<String>,
    /// Gatherer set code.
    pub gatherer_code: Option<String>,
    /// Default border color for printings.
    pub border: Option<String>,
    /// Release date.
    pub release_date: Option<NaiveDate>,
    /// Sorted category tags.
    pub types: Vec<String>,
    /// Fan-made set.
    pub custom: bool,
    /// Not for tournament play.
    pub funny: bool,
    /// Sold in boosters.
    pub has_boosters: bool,
    /// Digital only.
    pub online_only: bool,
    /// Every card oversized.
    pub oversized: bool,
    /// Printings in default order.
    pub printings: Vec<PrintingId>,
    /// Preconstructed decks.
    pub decks: Vec<PreconDeck>,
    pub(crate) normalized_name: String,
    pub(crate) normalized_name_alt: String,
}

impl CardSet {
    pub(crate) fn new(id: SetId, code: &str, name: &str) -> Self {
        Self {
            id,
            code: code.to_lowercase(),
            name: name.to_string(),
            block_code: None,
            block_name: None,
            alternative_block_code: None,
            alternative_code: None,
            gatherer_code: None,
            border: None,
            release_date: None,
            types: Vec::new(),
            custom: false,
            funny: false,
            has_boosters: false,
            online_only: false,
            oversized: false,
            printings: Vec::new(),
            decks: Vec::new(),
            normalized_name: normalize_set_name(name),
            normalized_name_alt: normalize_set_name_alt(name),
        }
    }

    /// Whether the set carries category `tag`.
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }

    /// Core sets and expansions; everything else sorts after them.
    pub fn is_regular(&self) -> bool {
        self.has_type("core") || self.has_type("expansion")
    }
}
