//! Shared fixture corpus for integration tests.
//!
//! A few dozen real cards spread over sets chosen to exercise every
//! resolution tier, multi-part linking, partners, precon decks, artist
//! warnings and the funny/custom classification.

#![allow(dead_code)]

use cardsearch_db::{CardDatabase, RawDatabase};
use serde_json::{json, Map, Value};

pub const LEGAL_EVERYWHERE: &[&str] = &[
    "commander",
    "vintage",
    "legacy",
    "modern",
    "pioneer",
    "standard",
    "pauper",
    "brawl",
];

fn legal_in(formats: &[&str]) -> Value {
    let map: Map<String, Value> = formats
        .iter()
        .map(|f| (f.to_string(), json!("legal")))
        .collect();
    Value::Object(map)
}

fn eternal() -> Value {
    legal_in(&["commander", "vintage", "legacy", "modern"])
}

pub fn sets() -> Value {
    json!({
        "lea": {"name": "Limited Edition Alpha", "type": "core", "release_date": "1993-08-05",
                "border": "black", "gatherer_code": "1E", "has_boosters": true},
        "mir": {"name": "Mirage", "type": "expansion", "release_date": "1996-10-08",
                "block_code": "mir", "block_name": "Mirage", "has_boosters": true},
        "apc": {"name": "Apocalypse", "type": "expansion", "release_date": "2001-06-04",
                "block_code": "inv", "block_name": "Invasion", "has_boosters": true},
        "mrd": {"name": "Mirrodin", "type": "expansion", "release_date": "2003-10-02",
                "block_code": "mrd", "block_name": "Mirrodin"},
        "m10": {"name": "Magic 2010", "type": "core", "release_date": "2009-07-17",
                "alternative_code": "m2010", "has_boosters": true},
        "som": {"name": "Scars of Mirrodin", "type": "expansion", "release_date": "2010-10-01",
                "block_code": "som", "block_name": "Scars of Mirrodin"},
        "isd": {"name": "Innistrad", "type": "expansion", "release_date": "2011-09-30",
                "block_code": "isd", "block_name": "Innistrad", "has_boosters": true},
        "pisd": {"name": "Innistrad Promos", "type": "promo", "release_date": "2011-09-30"},
        "dka": {"name": "Dark Ascension", "type": "expansion", "release_date": "2012-02-03",
                "block_code": "isd", "block_name": "Innistrad", "has_boosters": true},
        "m13": {"name": "Magic 2013", "type": "core", "release_date": "2012-07-13",
                "has_boosters": true},
        "vma": {"name": "Vintage Masters", "type": "masters", "release_date": "2014-06-16",
                "online_only": true, "has_boosters": true},
        "c16": {"name": "Commander 2016", "type": "commander", "release_date": "2016-11-11",
                "decks": [{
                    "name": "Breed Lethality",
                    "type": "Commander Deck",
                    "cards": [
                        {"count": 1, "name": "Sol Ring"},
                        {"count": 2, "name": "Forest", "set": "m10"}
                    ],
                    "sideboard": [{"count": 1, "name": "Atraxa, Praetors' Voice"}]
                }]},
        "oc16": {"name": "Commander 2016 Oversized", "type": "commander",
                 "release_date": "2016-11-11", "oversized": true},
        "bbd": {"name": "Battlebond", "type": "draft_innovation", "release_date": "2018-06-08",
                "has_boosters": true},
        "ust": {"name": "Unstable", "type": "funny", "release_date": "2017-12-08",
                "has_boosters": true},
        "hho": {"name": "Happy Holidays", "type": "funny", "release_date": "2006-12-31",
                "custom": true}
    })
}

pub fn cards() -> Vec<Value> {
    let everywhere = legal_in(LEGAL_EVERYWHERE);
    vec![
        json!({
            "name": "Forest", "types": ["Land"], "subtypes": ["Forest"], "supertypes": ["Basic"],
            "legalities": everywhere,
            "printings": [
                ["lea", {"number": "294", "rarity": "basic", "artist": "Christopher Rush"}],
                ["m10", {"number": "246", "rarity": "basic", "artist": "John Avon"}],
                ["isd", {"number": "262", "rarity": "basic", "artist": "James Paick"}]
            ]
        }),
        json!({
            "name": "Dryad Arbor", "colors": "g",
            "types": ["Land", "Creature"], "subtypes": ["Forest", "Dryad"],
            "power": "1", "toughness": "1",
            "text": "(Dryad Arbor isn't a spell, it's affected by summoning sickness, and it has \"{T}: Add {G}.\")",
            "legalities": eternal(),
            "printings": [["isd", {"number": "250", "rarity": "uncommon", "artist": "Eric Fortune"}]]
        }),
        json!({
            "name": "Savannah", "types": ["Land"], "subtypes": ["Forest", "Plains"],
            "reserved": true,
            "legalities": legal_in(&["commander", "vintage", "legacy"]),
            "printings": [["lea", {"number": "283", "rarity": "rare"}]]
        }),
        json!({
            "name": "Lightning Bolt", "manaCost": "{R}", "colors": "r", "cmc": 1,
            "types": ["Instant"],
            "text": "Lightning Bolt deals 3 damage to any target.",
            "foreign_names": {"de": ["Blitzschlag"], "fr": ["Foudre"]},
            "legalities": legal_in(&["commander", "vintage", "legacy", "modern", "pauper"]),
            "printings": [
                ["lea", {"number": "161", "rarity": "common", "artist": "Christopher Rush"}],
                ["m10", {"number": "146", "rarity": "common", "artist": "Christopher Moeller",
                         "flavor": "The sparkmage shrieked, calling on the rage of the storms of his youth."}]
            ]
        }),
        json!({
            "name": "Counterspell", "manaCost": "{U}{U}", "colors": "u", "cmc": 2,
            "types": ["Instant"], "text": "Counter target spell.",
            "legalities": legal_in(&["commander", "vintage", "legacy", "pauper"]),
            "printings": [["lea", {"number": "54", "rarity": "uncommon", "artist": "Mark Poole"}]]
        }),
        json!({
            "name": "Black Lotus", "manaCost": "{0}", "cmc": 0, "types": ["Artifact"],
            "text": "{T}, Sacrifice Black Lotus: Add three mana of any one color.",
            "reserved": true,
            "legalities": {"vintage": "restricted", "legacy": "banned", "commander": "banned"},
            "printings": [
                ["lea", {"number": "232", "rarity": "rare", "artist": "Christopher Rush"}],
                ["vma", {"number": "4", "rarity": "special", "artist": "Chris Rahn"}]
            ]
        }),
        json!({
            "name": "Delver of Secrets", "names": ["Delver of Secrets", "Insectile Aberration"],
            "layout": "transform", "manaCost": "{U}", "colors": "u", "cmc": 1,
            "types": ["Creature"], "subtypes": ["Human", "Wizard"],
            "power": "1", "toughness": "1",
            "text": "At the beginning of your upkeep, look at the top card of your library. You may reveal that card. If an instant or sorcery card is revealed this way, transform Delver of Secrets.",
            "legalities": legal_in(&["commander", "vintage", "legacy", "modern", "pauper"]),
            "printings": [["isd", {"number": "51a", "rarity": "common", "artist": "Matt Stewart"}]]
        }),
        json!({
            "name": "Insectile Aberration", "names": ["Delver of Secrets", "Insectile Aberration"],
            "layout": "transform", "colors": "u", "cmc": 1, "secondary": true,
            "types": ["Creature"], "subtypes": ["Human", "Insect"],
            "power": "3", "toughness": "2", "text": "Flying",
            "legalities": legal_in(&["commander", "vintage", "legacy", "modern", "pauper"]),
            "printings": [["isd", {"number": "51b", "rarity": "common", "artist": "Matt Stewart"}]]
        }),
        json!({
            "name": "Fire", "names": ["Fire", "Ice"], "layout": "split",
            "manaCost": "{1}{R}", "colors": "r", "cmc": 2, "types": ["Instant"],
            "text": "Fire deals 2 damage divided as you choose among one or two targets.",
            "legalities": eternal(),
            "printings": [["apc", {"number": "128a", "rarity": "uncommon", "artist": "Franz Vohwinkel"}]]
        }),
        json!({
            "name": "Ice", "names": ["Fire", "Ice"], "layout": "split",
            "manaCost": "{1}{U}", "colors": "u", "cmc": 2, "types": ["Instant"],
            "text": "Tap target permanent.\nDraw a card.",
            "legalities": eternal(),
            "printings": [["apc", {"number": "128b", "rarity": "uncommon", "artist": "Franz Vohwinkel"}]]
        }),
        json!({
            "name": "Tarmogoyf", "manaCost": "{1}{G}", "colors": "g", "cmc": 2,
            "types": ["Creature"], "subtypes": ["Lhurgoyf"],
            "power": "*", "toughness": "1+*",
            "text": "Tarmogoyf's power is equal to the number of card types among cards in all graveyards and its toughness is equal to that number plus 1.",
            "legalities": eternal(),
            "printings": [["dka", {"number": "102", "rarity": "rare", "artist": "Justin Murray"}]]
        }),
        json!({
            "name": "Aysen Crusader", "manaCost": "{2}{W}{W}", "colors": "w", "cmc": 4,
            "types": ["Creature"], "subtypes": ["Human", "Knight"],
            "power": "2+*", "toughness": "2+*",
            "text": "Aysen Crusader's power and toughness are each equal to 2 plus the number of Soldiers and Warriors you control.",
            "legalities": legal_in(&["commander", "vintage", "legacy"]),
            "printings": [["mir", {"number": "4", "rarity": "uncommon", "artist": "Jeffrey R. Busch"}]]
        }),
        json!({
            "name": "Thalia, Guardian of Thraben", "manaCost": "{1}{W}", "colors": "w", "cmc": 2,
            "types": ["Creature"], "subtypes": ["Human", "Soldier"], "supertypes": ["Legendary"],
            "power": "2", "toughness": "1",
            "text": "First strike\nNoncreature spells cost {1} more to cast.",
            "legalities": eternal(),
            "printings": [["dka", {"number": "24", "rarity": "rare", "artist": "Jana Schirmer & Johannes Voss"}]]
        }),
        json!({
            "name": "Gaddock Teeg", "manaCost": "{G}{W}", "colors": "gw", "cmc": 2,
            "types": ["Creature"], "subtypes": ["Kithkin", "Advisor"], "supertypes": ["Legendary"],
            "power": "2", "toughness": "2",
            "text": "Noncreature spells with mana value 4 or greater can't be cast.\nNoncreature spells with {X} in their mana costs can't be cast.",
            "legalities": eternal(),
            "printings": [["dka", {"number": "129", "rarity": "rare", "artist": "Greg Staples"}]]
        }),
        json!({
            "name": "Watchwolf", "manaCost": "{G}{W}", "colors": "gw", "cmc": 2,
            "types": ["Creature"], "subtypes": ["Wolf"], "power": "3", "toughness": "3",
            "legalities": eternal(),
            "printings": [["m13", {"number": "220", "rarity": "uncommon", "artist": "Zoltán Boros"}]]
        }),
        json!({
            "name": "Kitchen Finks", "manaCost": "{1}{G/W}{G/W}", "colors": "gw", "cmc": 3,
            "types": ["Creature"], "subtypes": ["Ouphe"], "power": "3", "toughness": "2",
            "text": "When Kitchen Finks enters the battlefield, you gain 2 life.\nPersist (When this creature dies, if it had no -1/-1 counters on it, return it to the battlefield under its owner's control with a -1/-1 counter on it.)",
            "legalities": eternal(),
            "printings": [["m13", {"number": "221", "rarity": "uncommon", "artist": "Zoltan Boros"}]]
        }),
        json!({
            "name": "Relentless Rats", "manaCost": "{1}{B}{B}", "colors": "b", "cmc": 3,
            "types": ["Creature"], "subtypes": ["Rat"], "power": "2", "toughness": "2",
            "text": "Relentless Rats gets +1/+1 for each other creature on the battlefield named Relentless Rats.\nA deck can have any number of cards named Relentless Rats.",
            "legalities": eternal(),
            "printings": [["m10", {"number": "106", "rarity": "uncommon", "artist": "Thomas M. Baxa"}]]
        }),
        json!({
            "name": "Jace Beleren", "manaCost": "{1}{U}{U}", "colors": "u", "cmc": 3,
            "types": ["Planeswalker"], "subtypes": ["Jace"], "supertypes": ["Legendary"],
            "loyalty": "3",
            "text": "+2: Each player draws a card.\n−1: Target player draws a card.\n−10: Target player mills twenty cards.",
            "legalities": legal_in(&["commander", "vintage", "legacy", "modern", "brawl"]),
            "printings": [["m10", {"number": "58", "rarity": "mythic", "artist": "Aleksi Briclot"}]]
        }),
        json!({
            "name": "Atraxa, Praetors' Voice", "manaCost": "{G}{W}{U}{B}", "colors": "wubg", "cmc": 4,
            "types": ["Creature"], "subtypes": ["Phyrexian", "Angel", "Horror"],
            "supertypes": ["Legendary"], "power": "4", "toughness": "4",
            "text": "Flying, vigilance, deathtouch, lifelink\nAt the beginning of your end step, proliferate.",
            "legalities": legal_in(&["commander", "vintage", "legacy"]),
            "printings": [
                ["c16", {"number": "28", "rarity": "mythic", "artist": "Victor Adame Minguez"}],
                ["oc16", {"number": "28", "rarity": "mythic", "artist": "Victor Adame Minguez"}]
            ]
        }),
        json!({
            "name": "Sol Ring", "manaCost": "{1}", "cmc": 1, "types": ["Artifact"],
            "text": "{T}: Add {C}{C}.",
            "legalities": {"commander": "legal", "vintage": "restricted", "legacy": "banned"},
            "printings": [["c16", {"number": "272", "rarity": "uncommon", "artist": "Mike Bierek"}]]
        }),
        json!({
            "name": "Ravos, Soultender", "manaCost": "{3}{W}{B}", "colors": "wb", "cmc": 5,
            "types": ["Creature"], "subtypes": ["Human", "Cleric"], "supertypes": ["Legendary"],
            "power": "2", "toughness": "2", "is_partner": true,
            "text": "Flying\nOther creatures you control get +1/+1.\nPartner (You can have two commanders if both have partner.)",
            "legalities": legal_in(&["commander", "vintage", "legacy"]),
            "printings": [["c16", {"number": "45", "rarity": "mythic", "artist": "Winona Nelson"}]]
        }),
        json!({
            "name": "Ishai, Ojutai Dragonspeaker", "manaCost": "{2}{W}{U}", "colors": "wu", "cmc": 4,
            "types": ["Creature"], "subtypes": ["Bird", "Monk"], "supertypes": ["Legendary"],
            "power": "2", "toughness": "3", "is_partner": true,
            "text": "Flying\nWhenever an opponent casts a spell, put a +1/+1 counter on Ishai, Ojutai Dragonspeaker.\nPartner (You can have two commanders if both have partner.)",
            "legalities": legal_in(&["commander", "vintage", "legacy"]),
            "printings": [["c16", {"number": "27", "rarity": "mythic", "artist": "Chris Rahn"}]]
        }),
        json!({
            "name": "Pir, Imaginative Rascal", "manaCost": "{2}{G}", "colors": "g", "cmc": 3,
            "types": ["Creature"], "subtypes": ["Human"], "supertypes": ["Legendary"],
            "power": "1", "toughness": "1", "is_partner": true,
            "text": "Partner with Toothy, Imaginative Friend (When this creature enters the battlefield, target player may put Toothy into their hand from their library, then shuffle.)\nIf one or more counters would be put on a permanent your team controls, that many plus one of each of those kinds of counters are put on that permanent instead.",
            "legalities": legal_in(&["commander", "vintage", "legacy"]),
            "printings": [["bbd", {"number": "1", "rarity": "rare", "artist": "Kev Walker", "partner": "2"}]]
        }),
        json!({
            "name": "Toothy, Imaginative Friend", "manaCost": "{3}{U}", "colors": "u", "cmc": 4,
            "types": ["Creature"], "subtypes": ["Illusion"], "supertypes": ["Legendary"],
            "power": "1", "toughness": "1", "is_partner": true,
            "text": "Partner with Pir, Imaginative Rascal (When this creature enters the battlefield, target player may put Pir into their hand from their library, then shuffle.)\nWhenever you draw a card, put a +1/+1 counter on Toothy, Imaginative Friend.",
            "legalities": legal_in(&["commander", "vintage", "legacy"]),
            "printings": [["bbd", {"number": "2", "rarity": "rare", "artist": "Kev Walker", "partner": "1"}]]
        }),
        json!({
            "name": "Earl of Squirrel", "manaCost": "{4}{G}{G}", "colors": "g", "cmc": 6,
            "funny": true, "types": ["Creature"], "subtypes": ["Squirrel", "Advisor"],
            "power": "4", "toughness": "4",
            "text": "Squirrellink (Damage dealt by this creature also causes you to create that many 1/1 green Squirrel creature tokens.)\nCreature tokens you control are Squirrels in addition to their other creature types.",
            "printings": [["ust", {"number": "108", "rarity": "rare", "artist": "Dmitry Burmak"}]]
        }),
        json!({
            "name": "Squirrel", "layout": "token", "colors": "g",
            "types": ["Creature"], "subtypes": ["Squirrel"], "power": "1", "toughness": "1",
            "printings": [["ust", {"number": "T1", "rarity": "common", "artist": "Dmitry Burmak"}]]
        }),
        json!({
            "name": "Fruitcake Elemental", "manaCost": "{1}{G}{G}", "colors": "g", "cmc": 3,
            "types": ["Creature"], "subtypes": ["Elemental"], "power": "7", "toughness": "7",
            "text": "Fruitcake Elemental is indestructible.\nAt the end of your turn, Fruitcake Elemental deals 7 damage to you.\n{3}: Target player gains control of Fruitcake Elemental.",
            "printings": [["hho", {"number": "3", "rarity": "special", "artist": "Darrell Riche"}]]
        }),
    ]
}

/// Raw records: every fixture set plus every fixture card keyed by name.
pub fn raw_corpus() -> RawDatabase {
    let cards: Map<String, Value> = cards()
        .into_iter()
        .map(|card| {
            let name = card["name"].as_str().expect("fixture card has a name").to_string();
            (name, card)
        })
        .collect();
    serde_json::from_value(json!({"sets": sets(), "cards": cards}))
        .expect("fixture corpus deserializes")
}

/// The fixture corpus, built with the default configuration.
pub fn corpus() -> CardDatabase {
    CardDatabase::build(&raw_corpus()).expect("fixture corpus builds")
}

/// Names of every printing in default order.
pub fn printing_names(db: &CardDatabase) -> Vec<String> {
    db.sorted_printings()
        .iter()
        .map(|id| db.card_of(db.printing(*id)).name.clone())
        .collect()
}
