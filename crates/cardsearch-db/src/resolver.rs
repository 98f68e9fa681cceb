//! Free-text lookup of sets, blocks, decks and dates.
//!
//! Sets resolve through strictly ordered tiers and the first non-empty
//! tier wins on its own:
//!
//! 1. exact set code (`in` is Invasion, never a substring of Innistrad)
//! 2. exact alternate code
//! 3. exact gatherer code
//! 4. exact normalized name (`Mirrodin` is not Scars of Mirrodin)
//! 5. normalized name substring

use chrono::NaiveDate;

use crate::database::CardDatabase;
use crate::deck::PreconDeck;
use crate::error::{DbError, DbResult};
use crate::ids::SetId;
use crate::normalize::{
    deck_slug, normalize_deck_name, normalize_name, normalize_set_name, normalize_set_name_alt,
};
use crate::set::CardSet;

/// Inclusive release-date window used to scope resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    /// Earliest allowed release date.
    pub start: Option<NaiveDate>,
    /// Latest allowed release date.
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// Whether `date` falls inside the window; undated sets always do.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            return true;
        };
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Parses an explicit date: `2012-07-12`, `2012.07.12`, `12 july 2012`, `2012-07`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    ["%Y-%m-%d", "%Y.%m.%d", "%d %B %Y", "%d %b %Y", "%B %d %Y", "%B %d, %Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{text}.01"), "%Y.%m.%d").ok())
}

impl CardDatabase {
    /// Every set matching `edition`, from the first non-empty tier.
    pub fn resolve_editions(&self, edition: &str) -> Vec<SetId> {
        self.resolve_editions_scoped(edition, None)
    }

    /// Like [`CardDatabase::resolve_editions`], ignoring sets outside `window`.
    pub fn resolve_editions_scoped(&self, edition: &str, window: Option<DateWindow>) -> Vec<SetId> {
        let edition = edition.trim().to_lowercase();
        let normalized = normalize_set_name(&edition);
        let normalized_alt = normalize_set_name_alt(&edition);
        let mut tiers: [Vec<SetId>; 5] = Default::default();

        let candidates = self
            .sets
            .iter()
            .filter(|set| window.map_or(true, |w| w.contains(set.release_date)));
        for set in candidates {
            let code_matches = |code: &Option<String>| {
                code.as_deref()
                    .is_some_and(|c| c.to_lowercase() == edition)
            };
            if set.code == edition {
                tiers[0].push(set.id);
            }
            if code_matches(&set.alternative_code) {
                tiers[1].push(set.id);
            }
            if code_matches(&set.gatherer_code) {
                tiers[2].push(set.id);
            }
            if normalized.is_empty() && normalized_alt.is_empty() {
                continue;
            }
            if set.normalized_name == normalized || set.normalized_name_alt == normalized_alt {
                tiers[3].push(set.id);
            }
            if set.normalized_name.contains(&normalized)
                || set.normalized_name_alt.contains(&normalized_alt)
            {
                tiers[4].push(set.id);
            }
        }

        tiers
            .into_iter()
            .find(|tier| !tier.is_empty())
            .unwrap_or_default()
    }

    /// The single set matching `edition`.
    ///
    /// `Ok(None)` when nothing matches; an error when the winning tier has
    /// more than one set.
    pub fn resolve_edition(&self, edition: &str) -> DbResult<Option<&CardSet>> {
        match self.resolve_editions(edition).as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(self.set(*only))),
            many => Err(DbError::AmbiguousEdition {
                query: edition.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Sets in the block named by `block`.
    ///
    /// Block codes and block names are tried first (exact, then name
    /// substring). Otherwise the text is resolved as an edition and every
    /// set sharing that edition's block is returned; a set with no block
    /// is its own block.
    pub fn resolve_blocks(&self, block: &str) -> Vec<SetId> {
        let query = block.trim().to_lowercase();
        let normalized = normalize_name(&query);

        let by_code: Vec<SetId> = self
            .sets
            .iter()
            .filter(|set| {
                set.block_code.as_deref() == Some(query.as_str())
                    || set.alternative_block_code.as_deref() == Some(query.as_str())
            })
            .map(|set| set.id)
            .collect();
        if !by_code.is_empty() {
            return by_code;
        }

        let block_name = |set: &CardSet| set.block_name.as_deref().map(normalize_name);
        let by_name: Vec<SetId> = self
            .sets
            .iter()
            .filter(|set| block_name(set).is_some_and(|name| name == normalized))
            .map(|set| set.id)
            .collect();
        if !by_name.is_empty() {
            return by_name;
        }
        if !normalized.is_empty() {
            let by_substring: Vec<SetId> = self
                .sets
                .iter()
                .filter(|set| block_name(set).is_some_and(|name| name.contains(&normalized)))
                .map(|set| set.id)
                .collect();
            if !by_substring.is_empty() {
                return by_substring;
            }
        }

        let mut result: Vec<SetId> = Vec::new();
        for id in self.resolve_editions(&query) {
            let set = self.set(id);
            match &set.block_code {
                Some(code) => result.extend(
                    self.sets
                        .iter()
                        .filter(|s| s.block_code.as_ref() == Some(code))
                        .map(|s| s.id),
                ),
                None => result.push(id),
            }
        }
        result.sort();
        result.dedup();
        result
    }

    /// Decks matching `deck_name`.
    ///
    /// `*` lists every deck. `set/deck` resolves the set first and only
    /// searches its decks. Within the candidates, slug equality wins, then
    /// normalized name equality, then decks containing every query word.
    pub fn resolve_deck_name(&self, deck_name: &str) -> Vec<&PreconDeck> {
        let deck_name = deck_name.trim();
        if deck_name == "*" {
            return self.decks().collect();
        }

        let (possible, deck_query): (Vec<&PreconDeck>, &str) = match deck_name.split_once('/') {
            Some((set_query, deck_query)) => (
                self.resolve_editions(set_query.trim())
                    .into_iter()
                    .flat_map(|id| self.set(id).decks.iter())
                    .collect(),
                deck_query,
            ),
            None => (self.decks().collect(), deck_name),
        };
        let deck_query = normalize_deck_name(deck_query);
        if deck_query == "*" {
            return possible;
        }

        let by_slug: Vec<&PreconDeck> = possible
            .iter()
            .copied()
            .filter(|deck| deck.slug == deck_query || deck.slug == deck_slug(&deck_query))
            .collect();
        if !by_slug.is_empty() {
            return by_slug;
        }

        let by_name: Vec<&PreconDeck> = possible
            .iter()
            .copied()
            .filter(|deck| normalize_deck_name(&deck.name) == deck_query)
            .collect();
        if !by_name.is_empty() {
            return by_name;
        }

        let query_words: Vec<&str> = deck_query.split_whitespace().collect();
        possible
            .into_iter()
            .filter(|deck| {
                let name = normalize_deck_name(&deck.name);
                let words: Vec<&str> = name.split_whitespace().collect();
                query_words.iter().all(|qw| words.contains(qw))
            })
            .collect()
    }

    /// Resolves free text to a date.
    ///
    /// Explicit dates parse directly. Otherwise the text names an edition:
    /// no match is `Ok(None)`, one match is that set's release date, and
    /// several matches are an ambiguity error.
    pub fn resolve_time(&self, text: &str) -> DbResult<Option<NaiveDate>> {
        if let Some(date) = parse_date(text) {
            return Ok(Some(date));
        }
        match self.resolve_editions(text).as_slice() {
            [] => Ok(None),
            [only] => Ok(self.set(*only).release_date),
            many => Err(DbError::AmbiguousEdition {
                query: text.to_string(),
                count: many.len(),
            }),
        }
    }
}
