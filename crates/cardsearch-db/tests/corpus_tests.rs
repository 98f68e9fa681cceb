//! Integration tests for corpus construction, linking and resolution.

mod common;

use cardsearch_db::{
    CardDatabase, ColorSet, DatabaseConfig, DateWindow, DbError, Frame, RawPrinting, Rarity,
};
use chrono::NaiveDate;
use common::{corpus, printing_names, raw_corpus};

/// Routes build logs to the test output; set `RUST_LOG=debug` to see them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn codes(db: &CardDatabase, ids: &[cardsearch_db::SetId]) -> Vec<String> {
    ids.iter().map(|id| db.set(*id).code.clone()).collect()
}

fn printing_sets(db: &CardDatabase, name: &str) -> Vec<String> {
    db.find_card(name)
        .unwrap()
        .printings
        .iter()
        .map(|id| db.set_of(db.printing(*id)).code.clone())
        .collect()
}

// ============================================================================
// Build
// ============================================================================

#[test]
fn test_build_counts() {
    init_tracing();
    let db = corpus();
    assert_eq!(db.number_of_cards(), 26);
    assert_eq!(db.number_of_printings(), 31);
    assert_eq!(db.sets().len(), 16);
}

#[test]
fn test_tokens_are_skipped_by_default() {
    let db = corpus();
    assert!(db.find_card("Squirrel").is_none());

    let mut config = DatabaseConfig::default();
    config.skip_layouts.clear();
    let db = CardDatabase::build_with_config(&raw_corpus(), config).unwrap();
    assert!(db.find_card("Squirrel").is_some());
    assert_eq!(db.number_of_cards(), 27);
}

#[test]
fn test_derived_card_attributes() {
    let db = corpus();

    let savannah = db.find_card("Savannah").unwrap();
    assert_eq!(savannah.color_identity, ColorSet::from_letters("gw"));
    assert_eq!(savannah.reminder_text.as_deref(), Some("({T}: Add {G} or {W}.)"));
    assert!(savannah.reserved);

    let arbor = db.find_card("Dryad Arbor").unwrap();
    assert_eq!(arbor.color_indicator, Some(ColorSet::from_letters("g")));
    assert!(arbor.text.is_empty());

    let thalia = db.find_card("Thalia, Guardian of Thraben").unwrap();
    assert_eq!(thalia.type_line, "Legendary Creature - Human Soldier");
    assert!(thalia.is_commander());

    let finks = db.find_card("Kitchen Finks").unwrap();
    assert!(finks.text.ends_with("Persist"));
    let mana = finks.mana_hash.as_ref().unwrap();
    assert_eq!(mana.get("?"), 1.0);
    assert_eq!(mana.get("gw"), 2.0);

    let earl = db.find_card("Earl of Squirrel").unwrap();
    assert!(earl.text.starts_with("Squirrellink (Damage"));
}

#[test]
fn test_printing_attributes() {
    let db = corpus();
    let forest = db.find_card("Forest").unwrap();
    let alpha = forest
        .printings
        .iter()
        .map(|id| db.printing(*id))
        .find(|p| db.set_of(p).code == "lea")
        .unwrap();
    assert_eq!(alpha.border.as_deref(), Some("black"));
    assert_eq!(alpha.frame, Frame::Old);
    assert_eq!(alpha.rarity, Rarity::Basic);
    assert!(alpha.in_boosters);
    assert_eq!(alpha.games, vec!["paper".to_string()]);

    let lotus = db.find_card("Black Lotus").unwrap();
    let vma = db.printing(lotus.printings[1]);
    assert!(vma.online_only);
    assert_eq!(vma.games, vec!["mtgo".to_string()]);

    let sol_ring = db.printing(db.find_card("Sol Ring").unwrap().printings[0]);
    assert_eq!(sol_ring.frame, Frame::M15);
    assert!(!sol_ring.in_boosters);
}

#[test]
fn test_release_dates() {
    let db = corpus();
    let forest = db.find_card("Forest").unwrap();
    assert_eq!(forest.first_release_date, Some(date(1993, 8, 5)));
    assert_eq!(forest.first_regular_release_date, Some(date(1993, 8, 5)));
    assert_eq!(forest.last_release_date, Some(date(2011, 9, 30)));
}

#[test]
fn test_custom_and_funny_classification() {
    let db = corpus();
    let hho = db.set_by_code("hho").unwrap();
    assert!(hho.funny);
    assert!(hho.has_type("custom"));
    assert!(hho.has_type("funny"));

    let ust = db.set_by_code("ust").unwrap();
    assert!(ust.funny);
    assert!(ust.has_type("un"));
    assert!(!ust.has_type("custom"));

    assert!(db.find_card("Fruitcake Elemental").unwrap().custom);
    assert!(!db.find_card("Earl of Squirrel").unwrap().custom);
    let fruitcake = db.find_card("Fruitcake Elemental").unwrap();
    assert!(db.printing(fruitcake.printings[0]).funny);
}

#[test]
fn test_set_tags() {
    let db = corpus();
    let bbd = db.set_by_code("bbd").unwrap();
    assert!(bbd.has_type("two-headed giant"));
    assert!(bbd.has_type("multiplayer"));
    let oc16 = db.set_by_code("oc16").unwrap();
    assert!(oc16.has_type("commander"));
    assert!(db.set_by_code("c16").unwrap().has_type("deck"));
    assert!(db.set_by_code("m10").unwrap().has_type("standard"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_set_is_fatal() {
    let mut raw = raw_corpus();
    let bolt = raw.cards.get_mut("Lightning Bolt").unwrap();
    bolt.printings.push((
        "zzz".to_string(),
        RawPrinting {
            number: "1".to_string(),
            rarity: "common".to_string(),
            ..Default::default()
        },
    ));
    let err = CardDatabase::build(&raw).unwrap_err();
    assert!(matches!(err, DbError::UnknownSet { ref set_code, .. } if set_code == "zzz"));
}

#[test]
fn test_bad_partner_is_fatal() {
    let mut raw = raw_corpus();
    let pir = raw.cards.get_mut("Pir, Imaginative Rascal").unwrap();
    pir.printings[0].1.partner = Some("99".to_string());
    let err = CardDatabase::build(&raw).unwrap_err();
    assert!(matches!(err, DbError::BadPartner { ref number, .. } if number == "99"));
}

#[test]
fn test_unresolved_sibling_is_fatal() {
    let mut raw = raw_corpus();
    raw.cards.remove("Ice");
    let err = CardDatabase::build(&raw).unwrap_err();
    assert!(matches!(err, DbError::UnresolvedSibling { ref sibling, .. } if sibling == "Ice"));
}

#[test]
fn test_inconsistent_siblings_are_fatal() {
    let mut raw = raw_corpus();
    let ice = raw.cards.get_mut("Ice").unwrap();
    ice.names = Some(vec!["Ice".to_string(), "Fire".to_string()]);
    let err = CardDatabase::build(&raw).unwrap_err();
    assert!(matches!(err, DbError::InconsistentSiblings { .. }));
}

#[test]
fn test_unknown_mana_symbol_is_fatal() {
    let mut raw = raw_corpus();
    raw.cards.get_mut("Lightning Bolt").unwrap().mana_cost = Some("{Q/R}".to_string());
    assert!(CardDatabase::build(&raw).is_err());
}

#[test]
fn test_identical_duplicates_merge() {
    let mut raw = raw_corpus();
    let mut copy = raw.cards["Forest"].clone();
    copy.printings = vec![(
        "m13".to_string(),
        RawPrinting {
            number: "230".to_string(),
            rarity: "basic".to_string(),
            artist: Some("John Avon".to_string()),
            ..Default::default()
        },
    )];
    raw.cards.insert("Forest (M13)".to_string(), copy);
    let db = CardDatabase::build(&raw).unwrap();
    assert_eq!(db.number_of_cards(), 26);
    assert_eq!(db.find_card("Forest").unwrap().printings.len(), 4);
}

#[test]
fn test_conflicting_duplicates_are_fatal() {
    let mut raw = raw_corpus();
    let mut copy = raw.cards["Counterspell"].clone();
    copy.text = Some("Counter target creature spell.".to_string());
    raw.cards.insert("counterspell".to_string(), copy);
    let err = CardDatabase::build(&raw).unwrap_err();
    assert!(matches!(err, DbError::ConflictingDuplicate(ref name) if name == "Counterspell"));
}

// ============================================================================
// Linking
// ============================================================================

#[test]
fn test_multipart_color_identity_union() {
    let db = corpus();
    for name in ["Fire", "Ice"] {
        let card = db.find_card(name).unwrap();
        assert_eq!(card.color_identity.letters(), "ur", "{name}");
    }
    assert_eq!(db.find_card("Fire").unwrap().partial_color_identity.letters(), "r");

    for card in db.cards().iter().filter(|c| c.has_multiple_parts()) {
        let union = card
            .names
            .as_ref()
            .unwrap()
            .iter()
            .map(|n| db.find_card(n).unwrap().partial_color_identity)
            .fold(ColorSet::EMPTY, |acc, c| acc | c);
        assert_eq!(card.color_identity, union, "{}", card.name);
    }
}

#[test]
fn test_multipart_printings_link_to_siblings() {
    let db = corpus();
    let delver = db.find_card("Delver of Secrets").unwrap();
    let printing = db.printing(delver.printings[0]);
    assert_eq!(printing.others.len(), 1);
    assert_eq!(db.card_of(db.printing(printing.others[0])).name, "Insectile Aberration");
}

#[test]
fn test_partners_link() {
    let db = corpus();
    let pir = db.printing(db.find_card("Pir, Imaginative Rascal").unwrap().printings[0]);
    let partner = db.printing(pir.partner.unwrap());
    assert_eq!(db.card_of(partner).name, "Toothy, Imaginative Friend");
    let toothy = db.printing(db.find_card("Toothy, Imaginative Friend").unwrap().printings[0]);
    assert_eq!(toothy.partner, Some(pir.id));

    let ravos = db.printing(db.find_card("Ravos, Soultender").unwrap().printings[0]);
    assert_eq!(ravos.partner, None);
}

#[test]
fn test_artist_warnings() {
    init_tracing();
    let db = corpus();
    assert!(db
        .warnings()
        .contains(&"No artist for Savannah (lea #283)".to_string()));
    assert!(db
        .warnings()
        .contains(&"Different artists have same slug - `Zoltán Boros' `Zoltan Boros'".to_string()));
    assert_eq!(db.warnings().len(), 2);

    let unknown = db.artist_by_slug("unknown").unwrap();
    assert_eq!(unknown.printings.len(), 1);
    let zoltan = db.artist_by_slug("zoltan_boros").unwrap();
    assert_eq!(zoltan.name, "Zoltan Boros");
    assert_eq!(zoltan.printings.len(), 2);
}

#[test]
fn test_sort_indices_are_unique_and_ordered() {
    let db = corpus();
    let mut indices: Vec<u32> = db.printings().iter().map(|p| p.default_sort_index).collect();
    indices.sort();
    indices.dedup();
    assert_eq!(indices.len(), db.number_of_printings());

    let names = printing_names(&db);
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    for (position, id) in db.sorted_printings().iter().enumerate() {
        assert_eq!(db.printing(*id).default_sort_index as usize, position);
    }
}

#[test]
fn test_sort_order_tie_breaks() {
    let db = corpus();
    // newest first, old frames last
    assert_eq!(printing_sets(&db, "Forest"), vec!["isd", "m10", "lea"]);
    // paper before digital
    assert_eq!(printing_sets(&db, "Black Lotus"), vec!["lea", "vma"]);
    // regular size before oversized
    assert_eq!(printing_sets(&db, "Atraxa, Praetors' Voice"), vec!["c16", "oc16"]);
}

#[test]
fn test_build_is_idempotent() {
    let first = corpus();
    let second = corpus();
    let key = |db: &CardDatabase| -> Vec<(String, String, String, u32)> {
        db.sorted_printings()
            .iter()
            .map(|id| {
                let p = db.printing(*id);
                (
                    db.card_of(p).name.clone(),
                    db.set_of(p).code.clone(),
                    p.number.clone(),
                    p.default_sort_index,
                )
            })
            .collect()
    };
    assert_eq!(key(&first), key(&second));
    let identities = |db: &CardDatabase| -> Vec<(String, ColorSet)> {
        db.cards().iter().map(|c| (c.name.clone(), c.color_identity)).collect()
    };
    assert_eq!(identities(&first), identities(&second));
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_find_card_variants() {
    let db = corpus();
    let bolt = db.find_card("Lightning Bolt").unwrap().id;
    assert_eq!(db.find_card("LIGHTNING   bolt").unwrap().id, bolt);
    assert_eq!(db.find_card("lightning bolts").unwrap().id, bolt);
    assert_eq!(db.find_card("Jâce Beleren").unwrap().name, "Jace Beleren");
    assert!(db.find_card("Lightning Helix").is_none());
    assert!(db.has_card_named("Lightning Bolt"));
    assert!(!db.has_card_named("lightning bolt"));
}

#[test]
fn test_spelling_suggestions() {
    let db = corpus();
    assert_eq!(db.suggest_spelling("tarmogyof").as_deref(), Some("tarmogoyf"));
    assert_eq!(db.suggest_spelling("forest"), None);
    assert_eq!(db.suggest_spelling("qqqqqq"), None);
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_exact_code_beats_name_substring() {
    let db = corpus();
    // "mir" is a substring of Mirage and both Mirrodin sets
    assert_eq!(codes(&db, &db.resolve_editions("mir")), vec!["mir"]);
    // exact name beats Scars of Mirrodin
    assert_eq!(codes(&db, &db.resolve_editions("Mirrodin")), vec!["mrd"]);
    assert_eq!(codes(&db, &db.resolve_editions("innistrad")), vec!["isd"]);
}

#[test]
fn test_resolution_tiers() {
    let db = corpus();
    assert_eq!(codes(&db, &db.resolve_editions("m2010")), vec!["m10"]);
    assert_eq!(codes(&db, &db.resolve_editions("1E")), vec!["lea"]);
    assert_eq!(codes(&db, &db.resolve_editions("ascension")), vec!["dka"]);
    assert_eq!(codes(&db, &db.resolve_editions("mirr")), vec!["mrd", "som"]);
    assert!(db.resolve_editions("nothing like this").is_empty());
}

#[test]
fn test_resolve_edition_ambiguity() {
    let db = corpus();
    assert_eq!(db.resolve_edition("lea").unwrap().unwrap().name, "Limited Edition Alpha");
    assert!(db.resolve_edition("zzzz").unwrap().is_none());
    let err = db.resolve_edition("mirr").unwrap_err();
    assert!(matches!(err, DbError::AmbiguousEdition { count: 2, .. }));
}

#[test]
fn test_scoped_resolution() {
    let db = corpus();
    assert_eq!(codes(&db, &db.resolve_editions("magic")), vec!["m10", "m13"]);
    let window = DateWindow {
        start: None,
        end: Some(date(2010, 1, 1)),
    };
    assert_eq!(
        codes(&db, &db.resolve_editions_scoped("magic", Some(window))),
        vec!["m10"]
    );
}

#[test]
fn test_resolve_blocks() {
    let db = corpus();
    assert_eq!(codes(&db, &db.resolve_blocks("innistrad")), vec!["dka", "isd"]);
    assert_eq!(codes(&db, &db.resolve_blocks("isd")), vec!["dka", "isd"]);
    assert_eq!(codes(&db, &db.resolve_blocks("dark ascension")), vec!["dka", "isd"]);
    assert_eq!(codes(&db, &db.resolve_blocks("mirrodin")), vec!["mrd"]);
    assert_eq!(codes(&db, &db.resolve_blocks("lea")), vec!["lea"]);
    assert!(db.blocks().contains("innistrad"));
}

#[test]
fn test_resolve_time() {
    let db = corpus();
    assert_eq!(db.resolve_time("2012-07-12").unwrap(), Some(date(2012, 7, 12)));
    assert_eq!(db.resolve_time("innistrad").unwrap(), Some(date(2011, 9, 30)));
    assert_eq!(db.resolve_time("nowhere at all").unwrap(), None);
    assert!(db.resolve_time("mirr").is_err());
}

// ============================================================================
// Decks
// ============================================================================

#[test]
fn test_precon_decks_resolve() {
    let db = corpus();
    let deck = db.decks().next().unwrap();
    assert_eq!(deck.slug, "breed-lethality");
    assert_eq!(deck.release_date, Some(date(2016, 11, 11)));
    assert_eq!(deck.cards.len(), 2);

    let (count, forest) = &deck.cards[1];
    assert_eq!(*count, 2);
    let forest = db.printing(forest.main_front().unwrap());
    assert_eq!(db.set_of(forest).code, "m10");

    let commander = db.printing(deck.sideboard[0].1.main_front().unwrap());
    assert_eq!(db.card_of(commander).name, "Atraxa, Praetors' Voice");
    assert_eq!(db.set_of(commander).code, "c16");

    assert!(db.is_in_precon("m10", "Forest"));
    assert!(!db.is_in_precon("lea", "Forest"));
    assert!(db.is_in_precon("c16", "Sol Ring"));
}

#[test]
fn test_resolve_deck_name() {
    let db = corpus();
    assert_eq!(db.resolve_deck_name("Breed Lethality").len(), 1);
    assert_eq!(db.resolve_deck_name("breed-lethality").len(), 1);
    assert_eq!(db.resolve_deck_name("lethality").len(), 1);
    assert_eq!(db.resolve_deck_name("c16/breed lethality").len(), 1);
    assert_eq!(db.resolve_deck_name("c16/*").len(), 1);
    assert_eq!(db.resolve_deck_name("*").len(), 1);
    assert!(db.resolve_deck_name("m10/breed lethality").is_empty());
    assert!(db.resolve_deck_name("entropic uprising").is_empty());
}

#[test]
fn test_unresolved_deck_card_is_fatal() {
    let mut raw = raw_corpus();
    let c16 = raw.sets.get_mut("c16").unwrap();
    c16.decks[0].cards[1].set = Some("lea".to_string());
    c16.decks[0].cards[1].number = Some("999".to_string());
    let err = CardDatabase::build(&raw).unwrap_err();
    assert!(matches!(err, DbError::UnresolvedDeckCard { ref card, .. } if card == "Forest"));
}

// ============================================================================
// Subset
// ============================================================================

#[test]
fn test_subset_restricts_sets() {
    let db = corpus();
    let subset = db.subset(&["isd", "dka"]);
    assert_eq!(subset.sets().len(), 2);
    assert_eq!(subset.number_of_printings(), 7);
    assert_eq!(subset.number_of_cards(), 7);
    assert!(subset.find_card("Lightning Bolt").is_none());
    assert_eq!(subset.find_card("Forest").unwrap().printings.len(), 1);

    // parent untouched
    assert_eq!(db.number_of_printings(), 31);
    assert_eq!(db.find_card("Forest").unwrap().printings.len(), 3);
}

#[test]
fn test_subset_recompacts_sort_indices() {
    let db = corpus();
    let subset = db.subset(&["isd", "dka"]);
    for (position, id) in subset.sorted_printings().iter().enumerate() {
        assert_eq!(subset.printing(*id).default_sort_index as usize, position);
    }
    let names = printing_names(&subset);
    let parent_order: Vec<String> = printing_names(&db)
        .into_iter()
        .filter(|name| names.contains(name))
        .collect();
    let mut deduped = parent_order.clone();
    deduped.dedup();
    let mut subset_deduped = names.clone();
    subset_deduped.dedup();
    assert_eq!(subset_deduped, deduped);

    let delver = subset.find_card("Delver of Secrets").unwrap();
    let printing = subset.printing(delver.printings[0]);
    assert_eq!(
        subset.card_of(subset.printing(printing.others[0])).name,
        "Insectile Aberration"
    );
}

#[test]
fn test_subset_keeps_identity_and_decks() {
    let db = corpus();
    let subset = db.subset(&["c16"]);
    assert_eq!(
        subset.find_card("Atraxa, Praetors' Voice").unwrap().color_identity.letters(),
        "wubg"
    );
    let deck = subset.decks().next().unwrap();
    // the m10 Forests are outside the subset
    assert_eq!(deck.cards.len(), 1);
    assert_eq!(deck.sideboard.len(), 1);
    assert!(subset.is_in_precon("c16", "Sol Ring"));
    assert!(!subset.is_in_precon("m10", "Forest"));
}
