//! Cross-reference passes that run once every card and printing exists.
//!
//! Order matters: color identity needs every face's partial identity,
//! multi-part linking needs every printing, and the sort index needs the
//! final frame and set data of every printing.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::artist::Artist;
use crate::color::ColorSet;
use crate::database::CardDatabase;
use crate::error::{DbError, DbResult};
use crate::ids::{ArtistId, CardId, PrintingId};
use crate::normalize::{artist_slug, normalize_name};
use crate::printing::Frame;

static FACE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ab]\z").expect("face suffix pattern is valid"));

/// Runs every link pass in order.
pub(crate) fn link(db: &mut CardDatabase) -> DbResult<()> {
    fix_multipart_color_identity(db)?;
    link_multipart_printings(db)?;
    link_partners(db)?;
    setup_artists(db);
    assign_sort_indices(db);
    info!(
        artists = db.artists.len(),
        printings = db.sorted_printings.len(),
        "linked card database"
    );
    Ok(())
}

fn sibling_id(db: &CardDatabase, card: &str, sibling: &str) -> DbResult<CardId> {
    db.card_names
        .get(&normalize_name(sibling))
        .copied()
        .ok_or_else(|| DbError::UnresolvedSibling {
            card: card.to_string(),
            sibling: sibling.to_string(),
        })
}

/// Multi-part cards get the union of every face's partial identity.
///
/// Phase one snapshots the partial identities; phase two checks that all
/// faces agree on the face list before merging, so malformed sibling
/// references fail instead of chasing each other.
pub(crate) fn fix_multipart_color_identity(db: &mut CardDatabase) -> DbResult<()> {
    let partials: HashMap<CardId, ColorSet> = db
        .cards
        .iter()
        .map(|card| (card.id, card.partial_color_identity))
        .collect();

    let mut updates = Vec::new();
    for card in db.cards.iter().filter(|c| c.has_multiple_parts()) {
        let names = card.names.as_deref().unwrap_or_default();
        let mut identity = ColorSet::EMPTY;
        for name in names {
            let sibling = sibling_id(db, &card.name, name)?;
            if db.card(sibling).names.as_deref() != Some(names) {
                return Err(DbError::InconsistentSiblings {
                    card: card.name.clone(),
                    sibling: name.clone(),
                });
            }
            identity = identity | partials[&sibling];
        }
        updates.push((card.id, identity));
    }

    for (id, identity) in updates {
        db.cards[id.index()].color_identity = identity;
    }
    Ok(())
}

/// Points every multi-part printing at its sibling printings in the same set.
pub(crate) fn link_multipart_printings(db: &mut CardDatabase) -> DbResult<()> {
    let mut updates: Vec<(PrintingId, Vec<PrintingId>)> = Vec::new();

    for card in db.cards.iter().filter(|c| c.has_multiple_parts()) {
        let others: Vec<CardId> = card
            .names
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|name| **name != card.name)
            .map(|name| sibling_id(db, &card.name, name))
            .collect::<DbResult<_>>()?;

        for printing_id in &card.printings {
            let printing = db.printing(*printing_id);
            let number = FACE_SUFFIX.replace(&printing.number, "");
            let mut linked = Vec::with_capacity(others.len());

            for other in &others {
                let same_set: Vec<PrintingId> = db
                    .card(*other)
                    .printings
                    .iter()
                    .copied()
                    .filter(|p| db.printing(*p).set == printing.set)
                    .collect();
                let chosen = match same_set.as_slice() {
                    [only] => Some(*only),
                    candidates => {
                        let matching: Vec<PrintingId> = candidates
                            .iter()
                            .copied()
                            .filter(|p| FACE_SUFFIX.replace(&db.printing(*p).number, "") == number)
                            .collect();
                        match matching.as_slice() {
                            [only] => Some(*only),
                            _ => None,
                        }
                    }
                };
                let chosen = chosen.ok_or_else(|| DbError::UnlinkedSibling {
                    card: card.name.clone(),
                    set_code: db.set(printing.set).code.clone(),
                })?;
                linked.push(chosen);
            }
            updates.push((*printing_id, linked));
        }
    }

    for (id, others) in updates {
        db.printings[id.index()].others = others;
    }
    Ok(())
}

/// Resolves partner collector numbers to printings in the same set.
pub(crate) fn link_partners(db: &mut CardDatabase) -> DbResult<()> {
    let mut updates = Vec::new();
    for printing in &db.printings {
        let Some(number) = &printing.partner_number else {
            continue;
        };
        let set = db.set(printing.set);
        let partner = set
            .printings
            .iter()
            .copied()
            .find(|p| db.printing(*p).number == *number)
            .ok_or_else(|| DbError::BadPartner {
                card: db.card(printing.card).name.clone(),
                set_code: set.code.clone(),
                number: number.clone(),
            })?;
        updates.push((printing.id, partner));
    }
    for (id, partner) in updates {
        db.printings[id.index()].partner = Some(partner);
    }
    Ok(())
}

/// Groups printings by artist slug.
///
/// A missing artist becomes "unknown"; distinct names sharing a slug are
/// merged under the first name seen. Both are reported once as warnings.
pub(crate) fn setup_artists(db: &mut CardDatabase) {
    let mut reported: BTreeSet<String> = BTreeSet::new();
    let order: Vec<PrintingId> = db
        .cards
        .iter()
        .flat_map(|card| card.printings.iter().copied())
        .collect();

    for id in order {
        let printing = &db.printings[id.index()];
        let name = match &printing.artist_name {
            Some(name) => name.clone(),
            None => {
                let message = format!(
                    "No artist for {} ({} #{})",
                    db.card(printing.card).name,
                    db.set(printing.set).code,
                    printing.number
                );
                warn!("{}", message);
                db.warnings.push(message);
                "unknown".to_string()
            }
        };
        let slug = artist_slug(&name);
        let artist_id = match db.artist_slugs.get(&slug).copied() {
            Some(existing) => existing,
            None => {
                let artist_id = ArtistId::new(db.artists.len() as u32);
                db.artists.push(Artist {
                    id: artist_id,
                    name: name.clone(),
                    slug: slug.clone(),
                    printings: Vec::new(),
                });
                db.artist_slugs.insert(slug, artist_id);
                artist_id
            }
        };

        let artist = &mut db.artists[artist_id.index()];
        if artist.name != name && reported.insert(name.clone()) {
            let message = format!(
                "Different artists have same slug - `{}' `{}'",
                name, artist.name
            );
            warn!("{}", message);
            db.warnings.push(message);
        }
        artist.printings.push(id);
        db.printings[id.index()].artist = Some(artist_id);
    }
}

/// Assigns the global default order and reorders every printing list by it.
///
/// Key: name, regular size before oversized, paper before digital, new
/// frames before old, regular sets first, newest first, then set name and
/// collector number.
pub(crate) fn assign_sort_indices(db: &mut CardDatabase) {
    let mut order: Vec<PrintingId> = db.printings.iter().map(|p| p.id).collect();
    order.sort_by_cached_key(|id| {
        let printing = db.printing(*id);
        let set = db.set(printing.set);
        (
            db.card(printing.card).name.clone(),
            printing.oversized,
            printing.online_only,
            printing.frame == Frame::Old,
            !set.is_regular(),
            Reverse(printing.release_date),
            set.name.clone(),
            printing.number_value(),
            printing.number.clone(),
        )
    });

    for (index, id) in order.iter().enumerate() {
        db.printings[id.index()].default_sort_index = index as u32;
    }

    let sort_index: Vec<u32> = db.printings.iter().map(|p| p.default_sort_index).collect();
    let by_index = |list: &mut Vec<PrintingId>| list.sort_by_key(|id| sort_index[id.index()]);
    db.cards.iter_mut().for_each(|c| by_index(&mut c.printings));
    db.sets.iter_mut().for_each(|s| by_index(&mut s.printings));
    db.artists.iter_mut().for_each(|a| by_index(&mut a.printings));
    db.sorted_printings = order;
}
