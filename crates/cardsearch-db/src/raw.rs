//! Raw, already-parsed input records.
//!
//! These mirror the upstream feed closely; all derivation happens in the
//! builder. Field names follow the feed (`manaCost`, `releaseDate`, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DbResult;

/// The complete raw corpus: sets keyed by code, cards keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDatabase {
    /// Sets by code.
    #[serde(default)]
    pub sets: BTreeMap<String, RawSet>,
    /// Cards by name.
    #[serde(default)]
    pub cards: BTreeMap<String, RawCard>,
}

impl RawDatabase {
    /// Deserializes a corpus from JSON text.
    pub fn from_json_str(json: &str) -> DbResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One set record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RawSet {
    /// Full set name.
    pub name: String,
    /// Primary set type (`core`, `expansion`, `duel_deck`, ...).
    #[serde(rename = "type", default)]
    pub set_type: Option<String>,
    /// Block code.
    #[serde(default)]
    pub block_code: Option<String>,
    /// Block name.
    #[serde(default)]
    pub block_name: Option<String>,
    /// Alternate block code.
    #[serde(default)]
    pub alternative_block_code: Option<String>,
    /// Alternate set code.
    #[serde(default)]
    pub alternative_code: Option<String>,
    /// Gatherer set code.
    #[serde(default)]
    pub gatherer_code: Option<String>,
    /// Default border color.
    #[serde(default)]
    pub border: Option<String>,
    /// Release date, `YYYY-MM-DD` or `YYYY-MM`.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Fan-made set.
    #[serde(default)]
    pub custom: bool,
    /// Sold in booster packs.
    #[serde(default)]
    pub has_boosters: bool,
    /// Cards appear in other sets' boosters.
    #[serde(default)]
    pub in_other_boosters: bool,
    /// Only released online.
    #[serde(default)]
    pub online_only: bool,
    /// Every card in the set is oversized.
    #[serde(default)]
    pub oversized: bool,
    /// Preconstructed decks released with the set.
    #[serde(default)]
    pub decks: Vec<RawDeck>,
}

/// A ruling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRuling {
    /// Ruling date.
    #[serde(default)]
    pub date: Option<String>,
    /// Ruling text.
    pub text: String,
}

/// One card record (oracle data plus its printings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCard {
    /// Card name.
    pub name: String,
    /// All face names of a multi-part card, in printed order.
    #[serde(default)]
    pub names: Option<Vec<String>>,
    /// Layout (`normal`, `split`, `flip`, `transform`, `meld`, `token`, ...).
    #[serde(default = "default_layout")]
    pub layout: String,
    /// Color letters, e.g. `"wu"`.
    #[serde(default)]
    pub colors: String,
    /// Silver-bordered or otherwise not for tournament play.
    #[serde(default)]
    pub funny: bool,
    /// Rules text.
    #[serde(default)]
    pub text: Option<String>,
    /// Mana cost, e.g. `"{2}{R}{R}"`.
    #[serde(rename = "manaCost", default)]
    pub mana_cost: Option<String>,
    /// On the reserved list.
    #[serde(default)]
    pub reserved: bool,
    /// Card types.
    #[serde(default)]
    pub types: Vec<String>,
    /// Subtypes.
    #[serde(default)]
    pub subtypes: Vec<String>,
    /// Supertypes.
    #[serde(default)]
    pub supertypes: Vec<String>,
    /// Converted mana cost.
    #[serde(default)]
    pub cmc: f64,
    /// Printed power.
    #[serde(default)]
    pub power: Option<String>,
    /// Printed toughness.
    #[serde(default)]
    pub toughness: Option<String>,
    /// Printed loyalty.
    #[serde(default)]
    pub loyalty: Option<String>,
    /// Power as displayed, when it differs from the searchable value.
    #[serde(default)]
    pub display_power: Option<String>,
    /// Toughness as displayed.
    #[serde(default)]
    pub display_toughness: Option<String>,
    /// Hide the mana cost when displaying.
    #[serde(default)]
    pub hide_mana_cost: bool,
    /// Vanguard hand modifier.
    #[serde(default)]
    pub hand: Option<i32>,
    /// Vanguard life modifier.
    #[serde(default)]
    pub life: Option<i32>,
    /// Rulings.
    #[serde(default)]
    pub rulings: Vec<RawRuling>,
    /// Not the main face of a multi-part card.
    #[serde(default)]
    pub secondary: bool,
    /// Has partner.
    #[serde(default)]
    pub is_partner: bool,
    /// Foreign names by language code.
    #[serde(default)]
    pub foreign_names: BTreeMap<String, Vec<String>>,
    /// Names of related cards.
    #[serde(default)]
    pub related: Vec<String>,
    /// Keyword abilities.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Format legality (`legal`, `banned`, `restricted`) by format name.
    #[serde(default)]
    pub legalities: BTreeMap<String, String>,
    /// Printings keyed by set code, as ordered `(set code, printing)` pairs.
    ///
    /// A list rather than a map: one set can hold several printings of the
    /// same card (different collector numbers or art), and input order is
    /// kept for deterministic builds.
    #[serde(default)]
    pub printings: Vec<(String, RawPrinting)>,
}

fn default_layout() -> String {
    "normal".to_string()
}

/// One printing of a card in a set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RawPrinting {
    /// Collector number.
    #[serde(default)]
    pub number: String,
    /// Rarity (`common`, `uncommon`, `rare`, `mythic rare`, `special`, `basic`).
    pub rarity: String,
    /// Artist name.
    #[serde(default)]
    pub artist: Option<String>,
    /// Release date, when it differs from the set's.
    #[serde(rename = "releaseDate", default)]
    pub release_date: Option<String>,
    /// Border color, when it differs from the set's.
    #[serde(default)]
    pub border: Option<String>,
    /// Frame version (`1993`, `1997`, `2003`, `2015`, `future`).
    #[serde(default)]
    pub frame: Option<String>,
    /// Flavor text.
    #[serde(default)]
    pub flavor: Option<String>,
    /// Watermark.
    #[serde(default)]
    pub watermark: Option<String>,
    /// Printed names in other languages.
    #[serde(default)]
    pub printed_names: BTreeMap<String, String>,
    /// Available in foil.
    #[serde(default)]
    pub foil: bool,
    /// Available in nonfoil.
    #[serde(default = "default_true")]
    pub nonfoil: bool,
    /// Oversized card.
    #[serde(default)]
    pub oversized: bool,
    /// Digital only, even when the set is not.
    #[serde(default)]
    pub online_only: bool,
    /// Promotional printing.
    #[serde(default)]
    pub promo: bool,
    /// Buy-a-box promotion.
    #[serde(default)]
    pub buyabox: bool,
    /// Opened in boosters; defaults from the set when absent.
    #[serde(default)]
    pub in_boosters: Option<bool>,
    /// Timeshifted.
    #[serde(default)]
    pub timeshifted: bool,
    /// Collector number of the partner printing in the same set.
    #[serde(default)]
    pub partner: Option<String>,
    /// Games the printing is available in.
    #[serde(default)]
    pub games: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

/// A preconstructed deck released with a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDeck {
    /// Deck name.
    pub name: String,
    /// Deck type (`Theme Deck`, `Commander Deck`, ...).
    #[serde(rename = "type", default)]
    pub deck_type: Option<String>,
    /// Release date.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Mainboard entries.
    #[serde(default)]
    pub cards: Vec<RawDeckEntry>,
    /// Sideboard entries (commanders live here).
    #[serde(default)]
    pub sideboard: Vec<RawDeckEntry>,
}

/// One line of a preconstructed deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDeckEntry {
    /// Number of copies.
    pub count: u32,
    /// Card name.
    pub name: String,
    /// Set code; defaults to the deck's set.
    #[serde(default)]
    pub set: Option<String>,
    /// Collector number.
    #[serde(default)]
    pub number: Option<String>,
    /// Foil copy.
    #[serde(default)]
    pub foil: bool,
}
