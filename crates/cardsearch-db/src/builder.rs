//! Corpus construction: sets, then cards and printings, then linking.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::card::Card;
use crate::config::DatabaseConfig;
use crate::database::CardDatabase;
use crate::deck::{PhysicalCard, PreconDeck};
use crate::error::{DbError, DbResult};
use crate::ids::{CardId, PrintingId, SetId};
use crate::linker;
use crate::normalize::{deck_slug, normalize_name};
use crate::printing::{CardPrinting, Frame, Rarity};
use crate::raw::{RawCard, RawDatabase, RawDeck, RawDeckEntry, RawPrinting, RawSet};
use crate::set::{parse_release_date, CardSet};
use crate::set_types::{classify_set, SetMetadata};

/// Prerelease promos don't count as a card's first regular release.
const PRERELEASE_SET: &str = "ppre";

impl CardDatabase {
    /// Builds a corpus with the default configuration.
    pub fn build(raw: &RawDatabase) -> DbResult<CardDatabase> {
        Self::build_with_config(raw, DatabaseConfig::default())
    }

    /// Builds a corpus.
    ///
    /// Runs the set pass, the card pass and the link passes strictly in
    /// that order. Any fatal data error aborts the whole build.
    pub fn build_with_config(raw: &RawDatabase, config: DatabaseConfig) -> DbResult<CardDatabase> {
        let mut db = CardDatabase::empty(config);

        for (code, raw_set) in &raw.sets {
            db.add_set(code, raw_set);
        }
        info!(sets = db.sets.len(), blocks = db.blocks.len(), "loaded sets");

        for raw_card in raw.cards.values() {
            if db.config.skip_layouts.contains(&raw_card.layout) {
                debug!(card = %raw_card.name, layout = %raw_card.layout, "skipping layout");
                continue;
            }
            db.add_card(raw_card)?;
        }
        info!(
            cards = db.cards.len(),
            printings = db.printings.len(),
            "loaded cards"
        );

        linker::link(&mut db)?;

        for (code, raw_set) in &raw.sets {
            if let Some(set_id) = db.set_codes.get(&code.to_lowercase()).copied() {
                for raw_deck in &raw_set.decks {
                    let deck = db.resolve_raw_deck(set_id, raw_deck)?;
                    db.sets[set_id.index()].decks.push(deck);
                }
            }
        }
        db.index_cards_in_precons();
        db.build_spelling_cache();

        info!(
            cards = db.cards.len(),
            printings = db.printings.len(),
            artists = db.artists.len(),
            decks = db.decks().count(),
            warnings = db.warnings.len(),
            "built card database"
        );
        Ok(db)
    }

    fn add_set(&mut self, code: &str, raw: &RawSet) {
        let id = SetId::new(self.sets.len() as u32);
        let mut set = CardSet::new(id, code, &raw.name);
        let classification = classify_set(&SetMetadata {
            code: &set.code,
            name: &raw.name,
            set_type: raw.set_type.as_deref(),
            custom: raw.custom,
            has_boosters: raw.has_boosters,
            in_other_boosters: raw.in_other_boosters,
        });

        if let Some(block_code) = &raw.block_code {
            self.blocks.insert(block_code.to_lowercase());
            if let Some(alternative) = &raw.alternative_block_code {
                self.blocks.insert(alternative.to_lowercase());
            }
            if let Some(block_name) = &raw.block_name {
                self.blocks.insert(normalize_name(block_name));
            }
        }

        set.block_code = raw.block_code.as_ref().map(|c| c.to_lowercase());
        set.block_name = raw.block_name.clone();
        set.alternative_block_code = raw.alternative_block_code.as_ref().map(|c| c.to_lowercase());
        set.alternative_code = raw.alternative_code.clone();
        set.gatherer_code = raw.gatherer_code.clone();
        set.border = raw.border.clone();
        set.release_date = raw.release_date.as_deref().and_then(parse_release_date);
        set.types = classification.types;
        set.funny = classification.funny;
        set.custom = raw.custom;
        set.has_boosters = raw.has_boosters;
        set.online_only = raw.online_only;
        set.oversized = raw.oversized;

        self.set_codes.insert(set.code.clone(), id);
        self.sets.push(set);
    }

    fn add_card(&mut self, raw: &RawCard) -> DbResult<()> {
        let key = normalize_name(&raw.name);
        let card_id = match self.card_names.get(&key).copied() {
            Some(existing) => {
                self.check_duplicate(existing, raw)?;
                existing
            }
            None => {
                let id = CardId::new(self.cards.len() as u32);
                let card = Card::from_raw(id, raw)?;
                self.index_card_name(&card);
                self.cards.push(card);
                id
            }
        };

        for (set_code, raw_printing) in &raw.printings {
            self.add_printing(card_id, set_code, raw_printing)?;
        }
        self.update_card_dates(card_id);
        Ok(())
    }

    /// Records that normalize to the same name merge only when their
    /// oracle data agrees.
    fn check_duplicate(&self, existing: CardId, raw: &RawCard) -> DbResult<()> {
        let candidate = Card::from_raw(existing, raw)?;
        let current = self.card(existing);
        let same = candidate.name == current.name
            && candidate.mana_cost == current.mana_cost
            && candidate.text == current.text
            && candidate.types == current.types
            && candidate.colors == current.colors
            && candidate.names == current.names;
        if same {
            debug!(card = %raw.name, "merging duplicate card record");
            Ok(())
        } else {
            Err(DbError::ConflictingDuplicate(raw.name.clone()))
        }
    }

    fn add_printing(&mut self, card_id: CardId, set_code: &str, raw: &RawPrinting) -> DbResult<()> {
        let card = &self.cards[card_id.index()];
        let set_id = self
            .set_codes
            .get(&set_code.to_lowercase())
            .copied()
            .ok_or_else(|| DbError::UnknownSet {
                card: card.name.clone(),
                set_code: set_code.to_string(),
            })?;
        let set = &self.sets[set_id.index()];

        let release_date = raw
            .release_date
            .as_deref()
            .and_then(parse_release_date)
            .or(set.release_date);
        let games = match &raw.games {
            Some(games) => games.iter().map(|g| g.to_lowercase()).collect(),
            None if set.online_only => vec!["mtgo".to_string()],
            None => vec!["paper".to_string()],
        };
        let id = PrintingId::new(self.printings.len() as u32);

        let printing = CardPrinting {
            id,
            card: card_id,
            set: set_id,
            number: raw.number.clone(),
            rarity: Rarity::parse(&card.name, &raw.rarity)?,
            artist_name: raw.artist.clone(),
            artist: None,
            release_date,
            border: raw.border.clone().or_else(|| set.border.clone()),
            frame: Frame::classify(raw.frame.as_deref(), release_date),
            flavor: raw.flavor.clone(),
            watermark: raw.watermark.as_ref().map(|w| w.to_lowercase()),
            printed_names: raw
                .printed_names
                .iter()
                .map(|(lang, name)| (lang.clone(), name.clone()))
                .collect(),
            games,
            foil: raw.foil,
            nonfoil: raw.nonfoil,
            oversized: raw.oversized || set.oversized,
            online_only: raw.online_only || set.online_only,
            funny: card.funny || set.funny,
            promo: raw.promo || set.has_type("promo"),
            buyabox: raw.buyabox,
            in_boosters: raw
                .in_boosters
                .unwrap_or(set.has_type("booster") && !raw.buyabox),
            timeshifted: raw.timeshifted,
            partner_number: raw.partner.clone(),
            partner: None,
            others: Vec::new(),
            default_sort_index: 0,
        };

        self.printings.push(printing);
        self.cards[card_id.index()].printings.push(id);
        self.sets[set_id.index()].printings.push(id);
        Ok(())
    }

    fn update_card_dates(&mut self, card_id: CardId) {
        let card = &self.cards[card_id.index()];
        let printings: Vec<&CardPrinting> = card
            .printings
            .iter()
            .map(|id| &self.printings[id.index()])
            .collect();
        let dates = printings.iter().filter_map(|p| p.release_date);
        let first = dates.clone().min();
        let last = dates.max();
        let first_regular = printings
            .iter()
            .filter(|p| self.sets[p.set.index()].code != PRERELEASE_SET)
            .filter_map(|p| p.release_date)
            .min();
        let sets = printings.iter().map(|p| &self.sets[p.set.index()]);
        let custom = sets.clone().any(|s| s.custom) && sets.clone().all(|s| s.custom || s.funny);

        let card = &mut self.cards[card_id.index()];
        card.first_release_date = first;
        card.last_release_date = last;
        card.first_regular_release_date = first_regular;
        card.custom = custom;
    }

    // ========================================================================
    // Precon decks
    // ========================================================================

    fn resolve_raw_deck(&self, set_id: SetId, raw: &RawDeck) -> DbResult<PreconDeck> {
        let set = self.set(set_id);
        let resolve = |entries: &[RawDeckEntry]| -> DbResult<Vec<(u32, PhysicalCard)>> {
            entries
                .iter()
                .map(|entry| {
                    self.resolve_deck_entry(&set.code, &raw.name, entry)
                        .map(|card| (entry.count, card))
                })
                .collect()
        };
        Ok(PreconDeck {
            set: set_id,
            name: raw.name.clone(),
            slug: deck_slug(&raw.name),
            deck_type: raw.deck_type.clone(),
            release_date: raw
                .release_date
                .as_deref()
                .and_then(parse_release_date)
                .or(set.release_date),
            cards: resolve(&raw.cards)?,
            sideboard: resolve(&raw.sideboard)?,
        })
    }

    fn resolve_deck_entry(
        &self,
        deck_set: &str,
        deck_name: &str,
        entry: &RawDeckEntry,
    ) -> DbResult<PhysicalCard> {
        let unresolved = || DbError::UnresolvedDeckCard {
            deck: deck_name.to_string(),
            card: entry.name.clone(),
        };
        let card_id = self
            .card_names
            .get(&normalize_name(&entry.name))
            .copied()
            .ok_or_else(unresolved)?;
        let set_code = entry
            .set
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| deck_set.to_string());

        let printing = self
            .card(card_id)
            .printings
            .iter()
            .map(|id| self.printing(*id))
            .find(|p| {
                self.set(p.set).code == set_code
                    && entry.number.as_ref().map_or(true, |n| *n == p.number)
            })
            .ok_or_else(unresolved)?;

        let mut parts: Vec<PrintingId> = std::iter::once(printing.id)
            .chain(printing.others.iter().copied())
            .collect();
        if let Some(names) = &self.card(card_id).names {
            parts.sort_by_key(|id| {
                let name = &self.card(self.printing(*id).card).name;
                names.iter().position(|n| n == name).unwrap_or(usize::MAX)
            });
        }
        Ok(PhysicalCard {
            parts,
            foil: entry.foil,
        })
    }

    fn index_cards_in_precons(&mut self) {
        let mut index: std::collections::BTreeMap<String, BTreeSet<String>> = Default::default();
        for deck in self.decks() {
            for (_, physical) in deck.cards_in_all_zones() {
                for part in &physical.parts {
                    let printing = self.printing(*part);
                    index
                        .entry(self.set(printing.set).code.clone())
                        .or_default()
                        .insert(self.card(printing.card).name.clone());
                }
            }
        }
        self.cards_in_precons = index;
    }
}
