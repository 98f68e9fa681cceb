//! Preconstructed decks.

use chrono::NaiveDate;

use crate::ids::{PrintingId, SetId};

/// One physical card: the printings of every face, main front first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhysicalCard {
    /// Face printings.
    pub parts: Vec<PrintingId>,
    /// Foil copy.
    pub foil: bool,
}

impl PhysicalCard {
    /// The main front face.
    pub fn main_front(&self) -> Option<PrintingId> {
        self.parts.first().copied()
    }
}

/// A preconstructed deck released with a set.
#[derive(Debug, Clone, PartialEq)]
pub struct PreconDeck {
    /// Set the deck belongs to.
    pub set: SetId,
    /// Deck name.
    pub name: String,
    /// URL-style slug.
    pub slug: String,
    /// Deck type, e.g. `Commander Deck`.
    pub deck_type: Option<String>,
    /// Release date, defaulting to the set's.
    pub release_date: Option<NaiveDate>,
    /// Mainboard as `(count, card)`.
    pub cards: Vec<(u32, PhysicalCard)>,
    /// Sideboard and command zone as `(count, card)`.
    pub sideboard: Vec<(u32, PhysicalCard)>,
}

impl PreconDeck {
    /// Mainboard then sideboard entries.
    pub fn cards_in_all_zones(&self) -> impl Iterator<Item = &(u32, PhysicalCard)> {
        self.cards.iter().chain(self.sideboard.iter())
    }
}
