//! Ordered deck checks.
//!
//! A [`Checklist`] runs its checks in order and stops at the first one
//! that reports a violation. Formats share the same checks and differ only
//! in which ones they include and the thresholds in their [`FormatRules`].

use cardsearch_db::{ColorSet, Legality};
use tracing::debug;

use crate::deck::{DeckCard, DeckView};
use crate::rules::{CommanderKind, CopyLimit, DeckSize, FormatRules, IdentityRule, SideboardRule};

const BASIC_LAND_TYPES: [&str; 5] = ["plains", "island", "swamp", "mountain", "forest"];

/// One check: `Some(message)` when the deck breaks it.
pub(crate) type Check = fn(&FormatRules, &DeckView<'_>) -> Option<String>;

/// Checks evaluated in order, first failure wins.
#[derive(Clone, Default)]
pub(crate) struct Checklist {
    checks: Vec<(&'static str, Check)>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a check.
    pub fn then(mut self, name: &'static str, check: Check) -> Self {
        self.checks.push((name, check));
        self
    }

    /// The checks a format's rules call for, in order.
    pub fn for_rules(rules: &FormatRules) -> Self {
        let mut list = Checklist::new()
            .then("legal", card_legal)
            .then("banned", not_banned);

        match rules.sideboard {
            SideboardRule::Limit(_) => {
                list = list
                    .then("sideboard size", sideboard_size)
                    .then("mainboard size", mainboard_size)
                    .then("copy limit", copy_limit)
                    .then("restricted", restricted_copies);
            }
            SideboardRule::Commander(_) => {
                list = list
                    .then("commander present", commander_present)
                    .then("commander count", commander_count)
                    .then("partners", partners)
                    .then("commander eligible", commander_eligible)
                    .then("commander restricted", commander_not_restricted)
                    .then("mainboard size", mainboard_size)
                    .then("copy limit", copy_limit);
            }
        }

        match rules.identity {
            IdentityRule::Unrestricted => list,
            IdentityRule::WithinCommander => list.then("color identity", within_commander),
            IdentityRule::WithinCommanderOrColorlessBasics => {
                list.then("color identity", within_commander_or_colorless_basics)
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|(name, _)| *name)
    }

    /// Message of the first failing check, or `None` if the deck passes.
    pub fn first_violation(&self, rules: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
        self.checks.iter().find_map(|(name, check)| {
            let message = check(rules, deck)?;
            debug!(format = rules.name, check = *name, "deck failed check");
            Some(message)
        })
    }
}

impl std::fmt::Debug for Checklist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// =============================================================================
// Card status
// =============================================================================

fn card_legal(rules: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    let card = deck.cards().find(|c| c.legality().is_none())?;
    Some(format!("{} is not legal in {}.", card.name(), rules.pretty_name))
}

fn not_banned(rules: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    let card = deck
        .cards()
        .find(|c| c.legality() == Some(Legality::Banned))?;
    Some(format!("{} is banned in {}.", card.name(), rules.pretty_name))
}

fn restricted_copies(rules: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    deck.cards()
        .filter(|c| c.legality() == Some(Legality::Restricted))
        .find_map(|c| {
            let name = &c.card().name;
            let count = deck.copies_of(name);
            (count > 1).then(|| {
                format!(
                    "{name} is restricted in {}, so only one copy is allowed, but this deck has {count}.",
                    rules.pretty_name
                )
            })
        })
}

// =============================================================================
// Sizes
// =============================================================================

fn sideboard_size(rules: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    let SideboardRule::Limit(limit) = rules.sideboard else {
        return None;
    };
    let count = deck.sideboard_count();
    (count > limit).then(|| {
        format!("Sideboard must contain at most {limit} cards, but this deck has {count}.")
    })
}

fn mainboard_size(rules: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    let count = deck.mainboard_count();
    match rules.deck_size {
        DeckSize::Exactly(total) => {
            let expected = total.saturating_sub(deck.sideboard_count());
            (count != expected).then(|| {
                format!("Mainboard must be exactly {expected} cards, but this deck has {count}.")
            })
        }
        DeckSize::AtLeast(minimum) => (count < minimum).then(|| {
            format!("Mainboard must contain at least {minimum} cards, but this deck has {count}.")
        }),
    }
}

fn copy_limit(rules: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    let limit = rules.copy_limit.max_copies();
    deck.cards()
        .map(DeckCard::card)
        .filter(|card| !card.allowed_in_any_number())
        .find_map(|card| {
            let count = deck.copies_of(&card.name);
            (count > limit).then(|| {
                format!(
                    "A maximum of {} of the same nonbasic card is allowed, but this deck has {count} copies of {}.",
                    copies_phrase(rules.copy_limit),
                    card.name
                )
            })
        })
}

fn copies_phrase(limit: CopyLimit) -> String {
    match limit.max_copies() {
        1 => "one copy".to_string(),
        2 => "two copies".to_string(),
        3 => "three copies".to_string(),
        4 => "four copies".to_string(),
        n => format!("{n} copies"),
    }
}

// =============================================================================
// Commanders
// =============================================================================

fn commander_kind(rules: &FormatRules) -> Option<CommanderKind> {
    match rules.sideboard {
        SideboardRule::Commander(kind) => Some(kind),
        SideboardRule::Limit(_) => None,
    }
}

fn commander_present(_: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    (deck.sideboard_count() == 0).then(|| {
        "The deck commander must be in the sideboard, but this deck's sideboard is empty."
            .to_string()
    })
}

fn commander_count(_: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    let count = deck.sideboard_count();
    (count > 2).then(|| {
        format!(
            "A deck can only have one commander (or two partner commanders), but this deck has {count}."
        )
    })
}

fn partners(_: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    let commanders = deck.commanders();
    let &[first, second] = commanders.as_slice() else {
        return None;
    };
    let partners_with = |a: &DeckCard<'_>, b: &DeckCard<'_>| {
        a.card().partner
            && a.main_front
                .partner
                .map_or(true, |p| deck.db.printing(p).card == b.card().id)
    };
    if !partners_with(first, second) {
        return Some(format!(
            "{} does not partner with {}.",
            first.card().name,
            second.card().name
        ));
    }
    if !partners_with(second, first) {
        return Some(format!(
            "{} does not partner with {}.",
            second.card().name,
            first.card().name
        ));
    }
    None
}

fn commander_eligible(rules: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    let kind = commander_kind(rules)?;
    let card = deck.sideboard.iter().find(|c| !kind.is_eligible(c.card()))?;
    Some(format!("{} can't be a commander.", card.name()))
}

fn commander_not_restricted(rules: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    let card = deck
        .sideboard
        .iter()
        .find(|c| c.legality() == Some(Legality::Restricted))?;
    Some(format!(
        "{} is banned as commander in {}.",
        card.name(),
        rules.pretty_name
    ))
}

// =============================================================================
// Color identity
// =============================================================================

fn within_commander(_: &FormatRules, deck: &DeckView<'_>) -> Option<String> {
    let identity = deck.commander_identity();
    outside_identity(deck, identity)
}

fn within_commander_or_colorless_basics(
    rules: &FormatRules,
    deck: &DeckView<'_>,
) -> Option<String> {
    let identity = deck.commander_identity();
    if !identity.is_empty() {
        return outside_identity(deck, identity);
    }

    let mut basic_types = deck
        .mainboard
        .iter()
        .filter(|c| c.is_basic_land())
        .filter_map(|c| basic_land_type(c));
    if let Some(first) = basic_types.next() {
        if let Some(second) = basic_types.find(|t| *t != first) {
            return Some(format!(
                "{} decks with a colorless color identity may only include basic lands of a single basic land type, but this deck has both {first} and {second}.",
                rules.pretty_name
            ));
        }
    }

    // Basic lands only get color identity from their land type.
    let card = deck
        .mainboard
        .iter()
        .find(|c| !c.color_identity().is_empty() && !c.is_basic_land())?;
    Some(format!(
        "The deck has a colorless color identity, but {} has a color identity of {}.",
        card.name(),
        card.color_identity().describe()
    ))
}

fn basic_land_type<'a>(card: &DeckCard<'a>) -> Option<&'a str> {
    card.card()
        .types
        .iter()
        .map(String::as_str)
        .find(|t| BASIC_LAND_TYPES.contains(t))
}

fn outside_identity(deck: &DeckView<'_>, identity: ColorSet) -> Option<String> {
    let card = deck
        .mainboard
        .iter()
        .find(|c| !c.color_identity().is_subset(identity))?;
    Some(format!(
        "The deck has a color identity of {}, but {} has a color identity of {}.",
        identity.describe(),
        card.name(),
        card.color_identity().describe()
    ))
}
