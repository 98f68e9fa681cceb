//! Decks and their resolution against a corpus.

use std::iter;

use cardsearch_db::{
    Card, CardDatabase, CardPrinting, ColorSet, Legality, PhysicalCard, PreconDeck, PrintingId,
};
use tracing::warn;

use crate::error::{FormatError, FormatResult};

// =============================================================================
// Deck
// =============================================================================

/// A deck to check: mainboard and sideboard as `(count, card)` entries.
///
/// In commander formats the sideboard holds the commander(s).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    /// Mainboard entries in listing order.
    pub mainboard: Vec<(u32, PhysicalCard)>,
    /// Sideboard or command zone entries in listing order.
    pub sideboard: Vec<(u32, PhysicalCard)>,
}

impl Deck {
    /// Creates a deck from its entries.
    pub fn new(mainboard: Vec<(u32, PhysicalCard)>, sideboard: Vec<(u32, PhysicalCard)>) -> Self {
        Self {
            mainboard,
            sideboard,
        }
    }

    /// Builds a deck from card names, using each card's first printing in
    /// default order.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let deck = Deck::from_names(
    ///     &db,
    ///     &[(1, "Sol Ring"), (98, "Forest")],
    ///     &[(1, "Atraxa, Praetors' Voice")],
    /// )?;
    /// ```
    pub fn from_names(
        db: &CardDatabase,
        mainboard: &[(u32, &str)],
        sideboard: &[(u32, &str)],
    ) -> FormatResult<Deck> {
        let resolve = |entries: &[(u32, &str)]| -> FormatResult<Vec<(u32, PhysicalCard)>> {
            entries
                .iter()
                .map(|(count, name)| Ok((*count, physical_card(db, name, None)?)))
                .collect()
        };
        Ok(Deck::new(resolve(mainboard)?, resolve(sideboard)?))
    }

    /// Total number of mainboard cards.
    pub fn number_of_mainboard_cards(&self) -> u32 {
        self.mainboard.iter().map(|(count, _)| count).sum()
    }

    /// Total number of sideboard cards.
    pub fn number_of_sideboard_cards(&self) -> u32 {
        self.sideboard.iter().map(|(count, _)| count).sum()
    }

    /// Mainboard then sideboard entries.
    pub fn cards_with_sideboard(&self) -> impl Iterator<Item = &(u32, PhysicalCard)> {
        self.mainboard.iter().chain(self.sideboard.iter())
    }
}

impl From<&PreconDeck> for Deck {
    fn from(precon: &PreconDeck) -> Self {
        Deck::new(precon.cards.clone(), precon.sideboard.clone())
    }
}

/// Looks up the physical card for `name`, with the printings of every face
/// ordered main front first.
///
/// Without `set_code` the card's first printing in default order is used.
pub fn physical_card(
    db: &CardDatabase,
    name: &str,
    set_code: Option<&str>,
) -> FormatResult<PhysicalCard> {
    let card = db
        .find_card(name)
        .ok_or_else(|| FormatError::UnknownCard(name.to_string()))?;
    let mut printings = card.printings.iter().map(|id| db.printing(*id));

    let printing = match set_code {
        Some(code) => {
            let code = code.to_lowercase();
            printings
                .find(|p| db.set_of(p).code == code)
                .ok_or_else(|| FormatError::NoPrintingInSet {
                    card: card.name.clone(),
                    set: code,
                })?
        }
        None => printings
            .min_by_key(|p| p.default_sort_index)
            .ok_or_else(|| FormatError::UnknownCard(name.to_string()))?,
    };

    let mut parts: Vec<PrintingId> = iter::once(printing.id)
        .chain(printing.others.iter().copied())
        .collect();
    if let Some(names) = &card.names {
        parts.sort_by_key(|id| {
            let face = &db.card(db.printing(*id).card).name;
            names.iter().position(|n| n == face).unwrap_or(usize::MAX)
        });
    }
    Ok(PhysicalCard { parts, foil: false })
}

// =============================================================================
// Resolved view
// =============================================================================

/// A deck entry resolved against the corpus.
#[derive(Debug)]
pub(crate) struct DeckCard<'a> {
    pub count: u32,
    pub main_front: &'a CardPrinting,
    pub faces: Vec<&'a Card>,
    status: Option<Legality>,
}

impl<'a> DeckCard<'a> {
    fn resolve(
        db: &'a CardDatabase,
        count: u32,
        physical: &PhysicalCard,
        legality: &dyn Fn(&Card) -> Option<Legality>,
    ) -> Option<Self> {
        let main_front = db.printing(physical.main_front()?);
        let faces: Vec<&Card> = physical
            .parts
            .iter()
            .map(|id| db.card_of(db.printing(*id)))
            .collect();
        let status = strictest(&faces, legality);
        Some(Self {
            count,
            main_front,
            faces,
            status,
        })
    }

    /// The main front face.
    pub fn card(&self) -> &'a Card {
        self.faces[0]
    }

    /// Face names joined with ` // `.
    pub fn name(&self) -> String {
        let mut names: Vec<&str> = Vec::with_capacity(self.faces.len());
        for face in &self.faces {
            if !names.contains(&face.name.as_str()) {
                names.push(&face.name);
            }
        }
        names.join(" // ")
    }

    /// The strictest status among the faces; `None` if any face is not legal.
    pub fn legality(&self) -> Option<Legality> {
        self.status
    }

    /// Union of the faces' color identities.
    pub fn color_identity(&self) -> ColorSet {
        self.faces
            .iter()
            .fold(ColorSet::EMPTY, |acc, face| acc | face.color_identity)
    }

    pub fn is_basic_land(&self) -> bool {
        let card = self.card();
        card.has_type("basic") && card.has_type("land")
    }
}

fn strictest(faces: &[&Card], legality: &dyn Fn(&Card) -> Option<Legality>) -> Option<Legality> {
    let mut status = Legality::Legal;
    for face in faces {
        match legality(face)? {
            Legality::Banned => return Some(Legality::Banned),
            Legality::Restricted => status = Legality::Restricted,
            Legality::Legal => {}
        }
    }
    Some(status)
}

/// A deck with every entry resolved.
#[derive(Debug)]
pub(crate) struct DeckView<'a> {
    pub db: &'a CardDatabase,
    pub mainboard: Vec<DeckCard<'a>>,
    pub sideboard: Vec<DeckCard<'a>>,
}

impl<'a> DeckView<'a> {
    /// Resolves every entry, rating each card with `legality`.
    pub fn new(
        db: &'a CardDatabase,
        deck: &Deck,
        legality: impl Fn(&Card) -> Option<Legality>,
    ) -> Self {
        let resolve = |entries: &[(u32, PhysicalCard)]| -> Vec<DeckCard<'a>> {
            entries
                .iter()
                .filter_map(|(count, physical)| {
                    let resolved = DeckCard::resolve(db, *count, physical, &legality);
                    if resolved.is_none() {
                        warn!("ignoring deck entry without printings");
                    }
                    resolved
                })
                .collect()
        };
        Self {
            db,
            mainboard: resolve(&deck.mainboard),
            sideboard: resolve(&deck.sideboard),
        }
    }

    /// Mainboard then sideboard entries.
    pub fn cards(&self) -> impl Iterator<Item = &DeckCard<'a>> {
        self.mainboard.iter().chain(self.sideboard.iter())
    }

    pub fn mainboard_count(&self) -> u32 {
        self.mainboard.iter().map(|c| c.count).sum()
    }

    pub fn sideboard_count(&self) -> u32 {
        self.sideboard.iter().map(|c| c.count).sum()
    }

    /// Copies across both boards of cards whose main front is named `name`.
    pub fn copies_of(&self, name: &str) -> u32 {
        self.cards()
            .filter(|c| c.card().name == name)
            .map(|c| c.count)
            .sum()
    }

    /// Sideboard cards, one element per copy.
    pub fn commanders(&self) -> Vec<&DeckCard<'a>> {
        self.sideboard
            .iter()
            .flat_map(|c| iter::repeat(c).take(c.count as usize))
            .collect()
    }

    /// Union of the commanders' color identities.
    pub fn commander_identity(&self) -> ColorSet {
        self.sideboard
            .iter()
            .fold(ColorSet::EMPTY, |acc, c| acc | c.color_identity())
    }
}
