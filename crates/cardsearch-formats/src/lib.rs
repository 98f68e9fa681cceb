//! # cardsearch-formats
//!
//! Deck legality validation over a built [`cardsearch-db`] corpus.
//!
//! A format is a set of rule capabilities (deck size, sideboard or
//! commander slot, copy limit, color identity). Every format runs the same
//! ordered checklist parameterized by those capabilities, and a deck gets
//! the message of the first check it fails.
//!
//! ## Formats
//!
//! | Format | Deck | Sideboard | Copies | Colors |
//! |--------|------|-----------|--------|--------|
//! | Standard, Pioneer, Modern, Legacy, Vintage, Pauper | 60+ | up to 15 | 4, restricted 1 | any |
//! | Commander (`edh`) | exactly 100 | 1 commander or 2 partners | 1 | commander identity |
//! | Brawl | exactly 60 | 1 brawler or 2 partners | 1 | commander identity, colorless basics |
//!
//! ## Quick Start
//!
//! ```ignore
//! use cardsearch_formats::{format_by_name, Deck};
//!
//! let deck = Deck::from_names(
//!     &db,
//!     &[(1, "Sol Ring"), (98, "Forest")],
//!     &[(1, "Atraxa, Praetors' Voice")],
//! )?;
//!
//! let commander = format_by_name("commander")?;
//! assert_eq!(commander.deck_legality(&db, &deck), None);
//! ```
//!
//! ## Check Order
//!
//! ```text
//! every card legal → none banned
//!   constructed: sideboard size → mainboard size → copies → restricted
//!   commander:   commander present → at most two → partners
//!                → eligible → not restricted → mainboard size → copies
//! → color identity
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod checklist;
mod deck;
mod error;
mod format;
mod rules;

// Public re-exports
pub use deck::{physical_card, Deck};
pub use error::{FormatError, FormatResult};
pub use format::{format_by_name, Brawl, Commander, Constructed, Format, FORMAT_NAMES};
pub use rules::{CommanderKind, CopyLimit, DeckSize, FormatRules, IdentityRule, SideboardRule};

// Re-export commonly used types from dependencies for convenience
pub use cardsearch_db::{CardDatabase, PhysicalCard};
