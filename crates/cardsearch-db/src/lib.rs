//! # cardsearch-db
//!
//! In-memory trading card corpus.
//!
//! This crate turns already-parsed set and card records into a fully
//! cross-referenced, deterministically ordered database:
//!
//! - **Attribute derivation**: mana multisets, color identity, color
//!   indicators, reminder text, type lines and power/toughness values
//! - **Set classification**: category tags from an ordered code rule table
//! - **Linking**: multi-part color identity, sibling and partner printings,
//!   artist grouping and the global default sort order
//! - **Resolution**: tiered lookup of sets, blocks, decks and dates
//!
//! ## Quick Start
//!
//! ```rust
//! use cardsearch_db::{CardDatabase, RawDatabase};
//!
//! let raw = RawDatabase::from_json_str(r#"{
//!     "sets": {"lea": {"name": "Limited Edition Alpha", "type": "core", "release_date": "1993-08-05"}},
//!     "cards": {"Lightning Bolt": {
//!         "name": "Lightning Bolt", "manaCost": "{R}", "colors": "r", "types": ["Instant"],
//!         "printings": [["lea", {"number": "161", "rarity": "common", "artist": "Christopher Rush"}]]
//!     }}
//! }"#)?;
//! let db = CardDatabase::build(&raw)?;
//!
//! let bolt = db.find_card("lightning bolt").expect("card exists");
//! assert_eq!(bolt.color_identity.letters(), "r");
//! assert_eq!(db.resolve_editions("alpha").len(), 1);
//! # Ok::<(), cardsearch_db::DbError>(())
//! ```
//!
//! Fatal data errors abort the build; soft problems (missing artists,
//! artist slug collisions) are logged with `tracing` and kept in
//! [`CardDatabase::warnings`].

#![warn(missing_docs)]

mod artist;
mod builder;
mod card;
mod color;
mod config;
mod database;
mod deck;
mod derive;
mod error;
mod ids;
mod linker;
mod mana;
pub mod normalize;
mod printing;
mod raw;
mod resolver;
mod set;
mod set_types;
mod spelling;
mod stat;

pub use artist::Artist;
pub use card::{normalize_format_name, Card, Legality};
pub use color::{Color, ColorSet};
pub use config::{DatabaseConfig, DatabaseConfigBuilder};
pub use database::CardDatabase;
pub use deck::{PhysicalCard, PreconDeck};
pub use derive::{
    clean_text, color_indicator, partial_color_identity, reminder_text, type_line, type_tags,
};
pub use error::{DbError, DbResult};
pub use ids::{ArtistId, CardId, PrintingId, SetId};
pub use mana::{normalize_mana_symbol, ManaHash, GENERIC};
pub use printing::{CardPrinting, Frame, Rarity};
pub use raw::{RawCard, RawDatabase, RawDeck, RawDeckEntry, RawPrinting, RawRuling, RawSet};
pub use resolver::{parse_date, DateWindow};
pub use set::{parse_release_date, CardSet};
pub use set_types::{classify_set, CodeMatcher, CodeRule, SetClassification, SetMetadata, FUNNY_SETS};
pub use spelling::SpellingSuggestions;
pub use stat::{StatValue, SYMBOLIC_VALUES};
