//! The built, read-only card corpus.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::artist::Artist;
use crate::card::Card;
use crate::config::DatabaseConfig;
use crate::deck::{PhysicalCard, PreconDeck};
use crate::ids::{ArtistId, CardId, PrintingId, SetId};
use crate::normalize::{normalize_name, stemmed_name};
use crate::printing::CardPrinting;
use crate::set::CardSet;
use crate::spelling::SpellingSuggestions;

/// A fully linked card corpus.
///
/// Built once by [`CardDatabase::build`] and never mutated afterwards;
/// every query and legality check only reads it, so a shared reference
/// can be used from any number of threads.
#[derive(Debug, Clone)]
pub struct CardDatabase {
    pub(crate) config: DatabaseConfig,
    pub(crate) sets: Vec<CardSet>,
    pub(crate) set_codes: BTreeMap<String, SetId>,
    pub(crate) cards: Vec<Card>,
    pub(crate) card_names: HashMap<String, CardId>,
    pub(crate) card_stems: HashMap<String, Vec<CardId>>,
    pub(crate) printings: Vec<CardPrinting>,
    pub(crate) sorted_printings: Vec<PrintingId>,
    pub(crate) artists: Vec<Artist>,
    pub(crate) artist_slugs: BTreeMap<String, ArtistId>,
    pub(crate) blocks: BTreeSet<String>,
    pub(crate) cards_in_precons: BTreeMap<String, BTreeSet<String>>,
    pub(crate) spelling: Option<SpellingSuggestions>,
    pub(crate) warnings: Vec<String>,
}

impl CardDatabase {
    pub(crate) fn empty(config: DatabaseConfig) -> Self {
        Self {
            config,
            sets: Vec::new(),
            set_codes: BTreeMap::new(),
            cards: Vec::new(),
            card_names: HashMap::new(),
            card_stems: HashMap::new(),
            printings: Vec::new(),
            sorted_printings: Vec::new(),
            artists: Vec::new(),
            artist_slugs: BTreeMap::new(),
            blocks: BTreeSet::new(),
            cards_in_precons: BTreeMap::new(),
            spelling: None,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn index_card_name(&mut self, card: &Card) {
        self.card_names.insert(card.normalized_name.clone(), card.id);
        self.card_stems
            .entry(card.stemmed_name.clone())
            .or_default()
            .push(card.id);
    }

    pub(crate) fn build_spelling_cache(&mut self) {
        if self.config.spelling_suggestions {
            let suggestions = SpellingSuggestions::new(
                self.cards.iter().map(|c| c.name.as_str()),
                self.config.min_similarity,
            );
            debug!(words = suggestions.len(), "built spelling suggestions");
            self.spelling = Some(suggestions);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The configuration the corpus was built with.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// All sets, ordered by code.
    pub fn sets(&self) -> &[CardSet] {
        &self.sets
    }

    /// A set by id.
    pub fn set(&self, id: SetId) -> &CardSet {
        &self.sets[id.index()]
    }

    /// A set by code, case-insensitively.
    pub fn set_by_code(&self, code: &str) -> Option<&CardSet> {
        self.set_codes
            .get(&code.to_lowercase())
            .map(|id| self.set(*id))
    }

    /// All cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// A card by id.
    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id.index()]
    }

    /// All printings, indexed by [`PrintingId`].
    pub fn printings(&self) -> &[CardPrinting] {
        &self.printings
    }

    /// A printing by id.
    pub fn printing(&self, id: PrintingId) -> &CardPrinting {
        &self.printings[id.index()]
    }

    /// Printing ids in default sort order.
    pub fn sorted_printings(&self) -> &[PrintingId] {
        &self.sorted_printings
    }

    /// The card a printing belongs to.
    pub fn card_of(&self, printing: &CardPrinting) -> &Card {
        self.card(printing.card)
    }

    /// The set a printing belongs to.
    pub fn set_of(&self, printing: &CardPrinting) -> &CardSet {
        self.set(printing.set)
    }

    /// All artists.
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// An artist by id.
    pub fn artist(&self, id: ArtistId) -> &Artist {
        &self.artists[id.index()]
    }

    /// An artist by slug.
    pub fn artist_by_slug(&self, slug: &str) -> Option<&Artist> {
        self.artist_slugs.get(slug).map(|id| self.artist(*id))
    }

    /// Every block code, alternate block code and normalized block name.
    pub fn blocks(&self) -> &BTreeSet<String> {
        &self.blocks
    }

    /// Every preconstructed deck, in set order.
    pub fn decks(&self) -> impl Iterator<Item = &PreconDeck> {
        self.sets.iter().flat_map(|set| set.decks.iter())
    }

    /// Whether a card named `name` from set `set_code` is in any precon.
    pub fn is_in_precon(&self, set_code: &str, name: &str) -> bool {
        self.cards_in_precons
            .get(set_code)
            .is_some_and(|names| names.contains(name))
    }

    /// Soft warnings collected while building.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Number of cards.
    pub fn number_of_cards(&self) -> usize {
        self.cards.len()
    }

    /// Number of printings.
    pub fn number_of_printings(&self) -> usize {
        self.printings.len()
    }

    /// Looks a card up by name.
    ///
    /// Case, accents and spacing are ignored. When no card has that exact
    /// key the plural-insensitive stem is tried, as long as exactly one
    /// card has it.
    pub fn find_card(&self, name: &str) -> Option<&Card> {
        if let Some(id) = self.card_names.get(&normalize_name(name)) {
            return Some(self.card(*id));
        }
        match self.card_stems.get(&stemmed_name(name)).map(Vec::as_slice) {
            Some([id]) => Some(self.card(*id)),
            _ => None,
        }
    }

    /// Whether a card has exactly this name.
    pub fn has_card_named(&self, name: &str) -> bool {
        self.card_names
            .get(&normalize_name(name))
            .is_some_and(|id| self.card(*id).name == name)
    }

    /// Closest known spelling of a card name word.
    pub fn suggest_spelling(&self, word: &str) -> Option<String> {
        self.spelling.as_ref().and_then(|s| s.suggest(word))
    }

    // ========================================================================
    // Subset
    // ========================================================================

    /// A new corpus restricted to the given set codes.
    ///
    /// Cards keep the color identity computed over the full corpus and
    /// printings keep their relative default order. `self` is untouched.
    pub fn subset<S: AsRef<str>>(&self, set_codes: &[S]) -> CardDatabase {
        let wanted: BTreeSet<String> = set_codes
            .iter()
            .map(|code| code.as_ref().to_lowercase())
            .collect();
        let mut db = CardDatabase::empty(self.config.clone());
        db.blocks = self.blocks.clone();

        let mut set_map = HashMap::new();
        for set in self.sets.iter().filter(|s| wanted.contains(&s.code)) {
            let id = SetId::new(db.sets.len() as u32);
            let mut copy = set.clone();
            copy.id = id;
            copy.printings.clear();
            copy.decks.clear();
            set_map.insert(set.id, id);
            db.set_codes.insert(copy.code.clone(), id);
            db.sets.push(copy);
        }

        let kept: Vec<&CardPrinting> = self
            .sorted_printings
            .iter()
            .map(|id| self.printing(*id))
            .filter(|p| set_map.contains_key(&p.set))
            .collect();
        let printing_map: HashMap<PrintingId, PrintingId> = kept
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, PrintingId::new(i as u32)))
            .collect();

        let mut card_map = HashMap::new();
        for card in &self.cards {
            if !card.printings.iter().any(|p| printing_map.contains_key(p)) {
                continue;
            }
            let id = CardId::new(db.cards.len() as u32);
            let mut copy = card.clone();
            copy.id = id;
            copy.printings.clear();
            card_map.insert(card.id, id);
            db.index_card_name(&copy);
            db.cards.push(copy);
        }

        let mut artist_map = HashMap::new();
        for (index, printing) in kept.into_iter().enumerate() {
            let id = PrintingId::new(index as u32);
            let mut copy = printing.clone();
            copy.id = id;
            copy.card = card_map[&printing.card];
            copy.set = set_map[&printing.set];
            copy.default_sort_index = index as u32;
            copy.others = printing
                .others
                .iter()
                .filter_map(|other| printing_map.get(other).copied())
                .collect();
            copy.partner = printing.partner.and_then(|p| printing_map.get(&p).copied());
            copy.artist = printing.artist.map(|old| {
                *artist_map.entry(old).or_insert_with(|| {
                    let new_id = ArtistId::new(db.artists.len() as u32);
                    let source = self.artist(old);
                    db.artist_slugs.insert(source.slug.clone(), new_id);
                    db.artists.push(Artist {
                        id: new_id,
                        name: source.name.clone(),
                        slug: source.slug.clone(),
                        printings: Vec::new(),
                    });
                    new_id
                })
            });
            if let Some(artist) = copy.artist {
                db.artists[artist.index()].printings.push(id);
            }
            db.cards[copy.card.index()].printings.push(id);
            db.sets[copy.set.index()].printings.push(id);
            db.sorted_printings.push(id);
            db.printings.push(copy);
        }

        let remap = |card: &PhysicalCard| -> Option<PhysicalCard> {
            let parts: Vec<PrintingId> = card
                .parts
                .iter()
                .filter_map(|p| printing_map.get(p).copied())
                .collect();
            (!parts.is_empty()).then_some(PhysicalCard {
                parts,
                foil: card.foil,
            })
        };
        for (old, new) in &set_map {
            let decks = self.set(*old).decks.iter().map(|deck| PreconDeck {
                set: *new,
                cards: deck
                    .cards
                    .iter()
                    .filter_map(|(n, c)| remap(c).map(|c| (*n, c)))
                    .collect(),
                sideboard: deck
                    .sideboard
                    .iter()
                    .filter_map(|(n, c)| remap(c).map(|c| (*n, c)))
                    .collect(),
                ..deck.clone()
            });
            db.sets[new.index()].decks = decks.collect();
        }

        db.cards_in_precons = self
            .cards_in_precons
            .iter()
            .filter(|(code, _)| wanted.contains(*code))
            .map(|(code, names)| (code.clone(), names.clone()))
            .collect();
        db.build_spelling_cache();
        debug!(
            sets = db.sets.len(),
            cards = db.cards.len(),
            printings = db.printings.len(),
            "built corpus subset"
        );
        db
    }
}
