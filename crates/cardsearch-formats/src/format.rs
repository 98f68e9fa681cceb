//! Formats and deck legality.

use std::fmt;

use cardsearch_db::{normalize_format_name, Card, CardDatabase, Legality};
use tracing::debug;

use crate::checklist::Checklist;
use crate::deck::{Deck, DeckView};
use crate::error::{FormatError, FormatResult};
use crate::rules::{
    CommanderKind, CopyLimit, DeckSize, FormatRules, IdentityRule, SideboardRule,
};

// =============================================================================
// Format trait
// =============================================================================

/// A format's deck construction rules.
///
/// Implementors describe their capabilities; the shared checklist turns
/// them into an ordered sequence of checks.
///
/// # Example
///
/// ```ignore
/// use cardsearch_formats::{format_by_name, Deck};
///
/// let commander = format_by_name("edh")?;
/// match commander.deck_legality(&db, &deck) {
///     None => println!("legal"),
///     Some(message) => println!("{message}"),
/// }
/// ```
pub trait Format: fmt::Debug + Send + Sync {
    /// Legality key on cards, e.g. `modern`.
    fn name(&self) -> &'static str;

    /// Display name, e.g. `Modern`.
    fn pretty_name(&self) -> &'static str;

    /// Deck size rule.
    fn deck_size(&self) -> DeckSize;

    /// Sideboard or commander slot rule.
    fn sideboard(&self) -> SideboardRule;

    /// Copies allowed of each nonbasic card.
    fn copy_limit(&self) -> CopyLimit;

    /// Color identity rule.
    fn identity(&self) -> IdentityRule {
        IdentityRule::Unrestricted
    }

    /// The card's status in this format; `None` if it is not legal.
    ///
    /// Every card and commander check in [`Format::deck_legality`] goes
    /// through this.
    fn legality(&self, card: &Card) -> Option<Legality> {
        card.legality(self.name())
    }

    /// All rules in one value.
    fn rules(&self) -> FormatRules {
        FormatRules {
            name: self.name(),
            pretty_name: self.pretty_name(),
            deck_size: self.deck_size(),
            sideboard: self.sideboard(),
            copy_limit: self.copy_limit(),
            identity: self.identity(),
        }
    }

    /// Checks a deck, returning the message of the first rule it breaks.
    ///
    /// Returns `None` for a legal deck. Violations are data, not errors.
    fn deck_legality(&self, db: &CardDatabase, deck: &Deck) -> Option<String> {
        let rules = self.rules();
        let view = DeckView::new(db, deck, |card| self.legality(card));
        let verdict = Checklist::for_rules(&rules).first_violation(&rules, &view);
        debug!(
            format = rules.name,
            legal = verdict.is_none(),
            mainboard = view.mainboard_count(),
            sideboard = view.sideboard_count(),
            "checked deck"
        );
        verdict
    }
}

// =============================================================================
// Constructed
// =============================================================================

/// A sixty-card format with a fifteen-card sideboard.
///
/// Restricted cards are limited to one copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constructed {
    name: &'static str,
    pretty_name: &'static str,
}

impl Constructed {
    /// Standard.
    pub const STANDARD: Constructed = Constructed::new("standard", "Standard");
    /// Pioneer.
    pub const PIONEER: Constructed = Constructed::new("pioneer", "Pioneer");
    /// Modern.
    pub const MODERN: Constructed = Constructed::new("modern", "Modern");
    /// Legacy.
    pub const LEGACY: Constructed = Constructed::new("legacy", "Legacy");
    /// Vintage.
    pub const VINTAGE: Constructed = Constructed::new("vintage", "Vintage");
    /// Pauper.
    pub const PAUPER: Constructed = Constructed::new("pauper", "Pauper");

    const fn new(name: &'static str, pretty_name: &'static str) -> Self {
        Self { name, pretty_name }
    }
}

impl Format for Constructed {
    fn name(&self) -> &'static str {
        self.name
    }

    fn pretty_name(&self) -> &'static str {
        self.pretty_name
    }

    fn deck_size(&self) -> DeckSize {
        DeckSize::AtLeast(60)
    }

    fn sideboard(&self) -> SideboardRule {
        SideboardRule::Limit(15)
    }

    fn copy_limit(&self) -> CopyLimit {
        CopyLimit::AtMost(4)
    }
}

// =============================================================================
// Commander and Brawl
// =============================================================================

/// Hundred-card singleton led by one commander or two partners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Commander;

impl Format for Commander {
    fn name(&self) -> &'static str {
        "commander"
    }

    fn pretty_name(&self) -> &'static str {
        "Commander"
    }

    fn deck_size(&self) -> DeckSize {
        DeckSize::Exactly(100)
    }

    fn sideboard(&self) -> SideboardRule {
        SideboardRule::Commander(CommanderKind::Commander)
    }

    fn copy_limit(&self) -> CopyLimit {
        CopyLimit::Singleton
    }

    fn identity(&self) -> IdentityRule {
        IdentityRule::WithinCommander
    }
}

/// Sixty-card singleton led by a legendary creature or planeswalker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Brawl;

impl Format for Brawl {
    fn name(&self) -> &'static str {
        "brawl"
    }

    fn pretty_name(&self) -> &'static str {
        "Brawl"
    }

    fn deck_size(&self) -> DeckSize {
        DeckSize::Exactly(60)
    }

    fn sideboard(&self) -> SideboardRule {
        SideboardRule::Commander(CommanderKind::Brawler)
    }

    fn copy_limit(&self) -> CopyLimit {
        CopyLimit::Singleton
    }

    fn identity(&self) -> IdentityRule {
        IdentityRule::WithinCommanderOrColorlessBasics
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// Names accepted by [`format_by_name`], besides the `edh` alias.
pub const FORMAT_NAMES: [&str; 8] = [
    "standard",
    "pioneer",
    "modern",
    "legacy",
    "vintage",
    "pauper",
    "commander",
    "brawl",
];

/// Looks up a format by name, case-insensitively; `edh` is Commander.
pub fn format_by_name(name: &str) -> FormatResult<Box<dyn Format>> {
    let format: Box<dyn Format> = match normalize_format_name(name).as_str() {
        "standard" => Box::new(Constructed::STANDARD),
        "pioneer" => Box::new(Constructed::PIONEER),
        "modern" => Box::new(Constructed::MODERN),
        "legacy" => Box::new(Constructed::LEGACY),
        "vintage" => Box::new(Constructed::VINTAGE),
        "pauper" => Box::new(Constructed::PAUPER),
        "commander" => Box::new(Commander),
        "brawl" => Box::new(Brawl),
        _ => return Err(FormatError::UnknownFormat(name.to_string())),
    };
    Ok(format)
}
