//! Rule capabilities a format is assembled from.

use cardsearch_db::Card;

/// How many cards the mainboard holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckSize {
    /// The whole deck, commanders included, has exactly this many cards.
    Exactly(u32),
    /// The mainboard has at least this many cards.
    AtLeast(u32),
}

/// What the sideboard is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideboardRule {
    /// A regular sideboard of at most this many cards.
    Limit(u32),
    /// One commander, or two partners.
    Commander(CommanderKind),
}

/// Which cards may lead a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommanderKind {
    /// Legendary creatures and cards that say they can be your commander.
    Commander,
    /// Legendary creatures and planeswalkers.
    Brawler,
}

impl CommanderKind {
    /// Whether `card` may occupy the commander slot.
    pub fn is_eligible(self, card: &Card) -> bool {
        match self {
            CommanderKind::Commander => card.is_commander(),
            CommanderKind::Brawler => card.is_brawler(),
        }
    }
}

/// Copies allowed of each nonbasic card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyLimit {
    /// One copy.
    Singleton,
    /// Up to this many copies.
    AtMost(u32),
}

impl CopyLimit {
    /// Largest allowed count.
    pub fn max_copies(self) -> u32 {
        match self {
            CopyLimit::Singleton => 1,
            CopyLimit::AtMost(n) => n,
        }
    }
}

/// How the deck's colors are restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityRule {
    /// Any colors.
    Unrestricted,
    /// Every mainboard card within the commanders' color identity.
    WithinCommander,
    /// As [`IdentityRule::WithinCommander`], but a colorless commander
    /// allows basic lands of one basic land type.
    WithinCommanderOrColorlessBasics,
}

/// The rules of a format, read off its [`crate::Format`] capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRules {
    /// Legality key on cards, e.g. `commander`.
    pub name: &'static str,
    /// Display name used in messages.
    pub pretty_name: &'static str,
    /// Deck size.
    pub deck_size: DeckSize,
    /// Sideboard rule.
    pub sideboard: SideboardRule,
    /// Copy limit.
    pub copy_limit: CopyLimit,
    /// Color identity rule.
    pub identity: IdentityRule,
}
