//! Leaf predicates.
//!
//! A leaf reads either card-level data, shared by every printing of the
//! card, or printing-level data. Card tests are evaluated once per card
//! and fan out to all of its printings.

use cardsearch_db::normalize::{hard_normalize, normalize_text};
use cardsearch_db::{Card, CardDatabase, CardPrinting, Frame, Legality, Rarity, StatValue};
use cardsearch_query::ComparisonOperator;

use super::mana::ManaQuery;
use super::value::{compare_color_sets, compare_numbers, ColorQuery, DateQuery};

// ============================================================================
// Card tests
// ============================================================================

/// Which stat a [`CardTest::Stat`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stat {
    Power,
    Toughness,
    Loyalty,
}

/// Which release date a [`CardTest::Released`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Release {
    First,
    Last,
}

/// A predicate over card-level data.
#[derive(Debug, Clone)]
pub(crate) enum CardTest {
    /// Stemmed substring of the name.
    Name(String),
    /// Normalized name equality.
    ExactName(String),
    /// Substring of the rules text; `~` stands for the card's own name.
    Oracle(String),
    /// Every tag must be present.
    Types(Vec<String>),
    /// Legality in a format is one of the accepted states.
    Legality {
        format: String,
        accepted: &'static [Legality],
    },
    Colors(ComparisonOperator, ColorQuery),
    ColorIdentity(ComparisonOperator, ColorQuery),
    /// `None` accepts any indicator.
    ColorIndicator(ComparisonOperator, Option<ColorQuery>),
    Mana(ManaQuery),
    Cmc(ComparisonOperator, f64),
    Stat(Stat, ComparisonOperator, StatValue),
    Released(Release, ComparisonOperator, DateQuery),
    /// Substring of any foreign name.
    Foreign(String),
    Keyword(String),
    Layout(String),
    Flag(CardFlag),
}

impl CardTest {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            CardTest::Name(stem) => card.stemmed_name.contains(stem.as_str()),
            CardTest::ExactName(name) => card.normalized_name == *name,
            CardTest::Oracle(text) => {
                let haystack = card.text_normalized.to_lowercase();
                if text.contains('~') {
                    let own_name = normalize_text(&card.name);
                    haystack.contains(&text.replace('~', &own_name))
                } else {
                    haystack.contains(text.as_str())
                }
            }
            CardTest::Types(tags) => tags.iter().all(|tag| card.has_type(tag)),
            CardTest::Legality { format, accepted } => card
                .legality(format)
                .is_some_and(|legality| accepted.contains(&legality)),
            CardTest::Colors(operator, query) => {
                if operator.is_equality() {
                    query.matches_any(card.colors)
                } else {
                    compare_color_sets(*operator, card.colors, query.colors)
                }
            }
            CardTest::ColorIdentity(operator, query) => {
                if operator.is_equality() {
                    card.color_identity.is_subset(query.colors)
                } else {
                    compare_color_sets(*operator, card.color_identity, query.colors)
                }
            }
            CardTest::ColorIndicator(operator, query) => match (card.color_indicator, query) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(indicator), Some(query)) if operator.is_equality() => {
                    query.matches_any(indicator)
                }
                (Some(indicator), Some(query)) => {
                    compare_color_sets(*operator, indicator, query.colors)
                }
            },
            CardTest::Mana(query) => card.mana_hash.as_ref().is_some_and(|mana| query.matches(mana)),
            CardTest::Cmc(operator, wanted) => compare_numbers(*operator, card.cmc, *wanted),
            CardTest::Stat(stat, operator, wanted) => {
                let actual = match stat {
                    Stat::Power => card.power.as_ref(),
                    Stat::Toughness => card.toughness.as_ref(),
                    Stat::Loyalty => card.loyalty.as_ref(),
                };
                actual
                    .and_then(|actual| actual.compare(wanted))
                    .is_some_and(|ordering| operator.accepts(ordering))
            }
            CardTest::Released(release, operator, wanted) => {
                let date = match release {
                    Release::First => card.first_release_date,
                    Release::Last => card.last_release_date,
                };
                date.is_some_and(|date| wanted.accepts(*operator, date))
            }
            CardTest::Foreign(text) => card
                .foreign_names_normalized
                .values()
                .flatten()
                .any(|name| name.contains(text.as_str())),
            CardTest::Keyword(keyword) => card
                .keywords
                .iter()
                .any(|k| k.eq_ignore_ascii_case(keyword)),
            CardTest::Layout(layout) => card.layout.eq_ignore_ascii_case(layout),
            CardTest::Flag(flag) => flag.matches(card),
        }
    }
}

/// `is:` properties of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CardFlag {
    Unique,
    Permanent,
    Historic,
    Custom,
    Extra,
    Reserved,
    Vanilla,
    Layout(&'static str),
    Front,
    Back,
    Primary,
    Secondary,
    MainFront,
    Multipart,
    Commander,
    Brawler,
}

const NONPERMANENT_TYPES: [&str; 7] = [
    "instant",
    "sorcery",
    "plane",
    "scheme",
    "phenomenon",
    "conspiracy",
    "vanguard",
];

impl CardFlag {
    fn matches(self, card: &Card) -> bool {
        match self {
            CardFlag::Unique => card.printings.len() == 1,
            CardFlag::Permanent => !NONPERMANENT_TYPES.iter().any(|t| card.has_type(t)),
            CardFlag::Historic => {
                card.has_type("artifact") || card.has_type("legendary") || card.has_type("saga")
            }
            CardFlag::Custom => card.custom,
            CardFlag::Extra => card.extra,
            CardFlag::Reserved => card.reserved,
            CardFlag::Vanilla => card.has_type("creature") && card.is_vanilla(),
            CardFlag::Layout(layout) => card.layout == layout,
            CardFlag::Front => card.is_front(),
            CardFlag::Back => card.is_back(),
            CardFlag::Primary => card.is_primary(),
            CardFlag::Secondary => card.secondary,
            CardFlag::MainFront => card
                .names
                .as_ref()
                .map_or(true, |names| names.first() == Some(&card.name)),
            CardFlag::Multipart => card.has_multiple_parts(),
            CardFlag::Commander => card.is_commander(),
            CardFlag::Brawler => card.is_brawler(),
        }
    }
}

// ============================================================================
// Printing tests
// ============================================================================

/// A predicate over printing-level data.
#[derive(Debug, Clone)]
pub(crate) enum PrintingTest {
    /// Substring of the flavor text.
    Flavor(String),
    /// Substring of the artist credit.
    Artist(String),
    Rarity(ComparisonOperator, Rarity),
    Year(ComparisonOperator, i32),
    Print(ComparisonOperator, DateQuery),
    Frame(Vec<Frame>),
    Border(String),
    Game(String),
    /// Case-insensitive collector number equality.
    NumberIs(String),
    NumberCompare(ComparisonOperator, u32),
    Flag(PrintingFlag),
}

impl PrintingTest {
    pub fn matches(&self, db: &CardDatabase, printing: &CardPrinting) -> bool {
        match self {
            PrintingTest::Flavor(text) => printing
                .flavor
                .as_deref()
                .is_some_and(|flavor| normalize_text(flavor).contains(text.as_str())),
            PrintingTest::Artist(text) => printing
                .artist_name
                .as_deref()
                .is_some_and(|artist| hard_normalize(artist).contains(text.as_str())),
            PrintingTest::Rarity(operator, rarity) => operator.accepts(printing.rarity.cmp(rarity)),
            PrintingTest::Year(operator, year) => printing
                .year()
                .is_some_and(|actual| operator.accepts(actual.cmp(year))),
            PrintingTest::Print(operator, wanted) => printing
                .release_date
                .is_some_and(|date| wanted.accepts(*operator, date)),
            PrintingTest::Frame(frames) => frames.contains(&printing.frame),
            PrintingTest::Border(border) => printing
                .border
                .as_deref()
                .is_some_and(|actual| actual.eq_ignore_ascii_case(border)),
            PrintingTest::Game(game) => printing.in_game(game),
            PrintingTest::NumberIs(number) => printing.number.eq_ignore_ascii_case(number),
            PrintingTest::NumberCompare(operator, number) => {
                operator.accepts(printing.number_value().cmp(number))
            }
            PrintingTest::Flag(flag) => flag.matches(db, printing),
        }
    }
}

/// `is:` properties of a printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrintingFlag {
    Funny,
    Oversized,
    Promo,
    Buyabox,
    Foil,
    Nonfoil,
    Timeshifted,
    Digital,
    Booster,
    Game(&'static str),
    Reprint,
    Partner,
}

impl PrintingFlag {
    fn matches(self, db: &CardDatabase, printing: &CardPrinting) -> bool {
        match self {
            PrintingFlag::Funny => printing.funny,
            PrintingFlag::Oversized => printing.oversized,
            PrintingFlag::Promo => printing.promo,
            PrintingFlag::Buyabox => printing.buyabox,
            PrintingFlag::Foil => printing.foil,
            PrintingFlag::Nonfoil => printing.nonfoil,
            PrintingFlag::Timeshifted => printing.timeshifted,
            PrintingFlag::Digital => printing.online_only,
            PrintingFlag::Booster => printing.in_boosters,
            PrintingFlag::Game(game) => printing.in_game(game),
            PrintingFlag::Reprint => {
                let first = db.card_of(printing).first_release_date;
                matches!((printing.release_date, first), (Some(date), Some(first)) if date > first)
            }
            PrintingFlag::Partner => db.card_of(printing).partner || printing.partner.is_some(),
        }
    }
}

/// A leaf resolved from an `is:` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flag {
    Card(CardFlag),
    Printing(PrintingFlag),
}

impl Flag {
    /// Looks up an `is:` keyword.
    pub fn from_name(name: &str) -> Option<Flag> {
        use CardFlag as C;
        use PrintingFlag as P;
        let flag = match name.trim().to_lowercase().as_str() {
            "funny" => Flag::Printing(P::Funny),
            "oversized" => Flag::Printing(P::Oversized),
            "promo" => Flag::Printing(P::Promo),
            "buyabox" => Flag::Printing(P::Buyabox),
            "foil" => Flag::Printing(P::Foil),
            "nonfoil" => Flag::Printing(P::Nonfoil),
            "timeshifted" => Flag::Printing(P::Timeshifted),
            "digital" => Flag::Printing(P::Digital),
            "booster" => Flag::Printing(P::Booster),
            "paper" => Flag::Printing(P::Game("paper")),
            "arena" => Flag::Printing(P::Game("arena")),
            "mtgo" => Flag::Printing(P::Game("mtgo")),
            "shandalar" => Flag::Printing(P::Game("shandalar")),
            "reprint" => Flag::Printing(P::Reprint),
            "partner" => Flag::Printing(P::Partner),
            "unique" => Flag::Card(C::Unique),
            "permanent" => Flag::Card(C::Permanent),
            "historic" => Flag::Card(C::Historic),
            "custom" => Flag::Card(C::Custom),
            "extra" => Flag::Card(C::Extra),
            "reserved" => Flag::Card(C::Reserved),
            "vanilla" => Flag::Card(C::Vanilla),
            "meld" => Flag::Card(C::Layout("meld")),
            "split" => Flag::Card(C::Layout("split")),
            "flip" => Flag::Card(C::Layout("flip")),
            "transform" | "dfc" => Flag::Card(C::Layout("transform")),
            "adventure" => Flag::Card(C::Layout("adventure")),
            "front" => Flag::Card(C::Front),
            "back" => Flag::Card(C::Back),
            "primary" => Flag::Card(C::Primary),
            "secondary" => Flag::Card(C::Secondary),
            "mainfront" => Flag::Card(C::MainFront),
            "multipart" => Flag::Card(C::Multipart),
            "commander" => Flag::Card(C::Commander),
            "brawler" => Flag::Card(C::Brawler),
            _ => return None,
        };
        Some(flag)
    }
}
