//! Property tests for name lookup and build determinism.

mod common;

use cardsearch_db::CardDatabase;
use once_cell::sync::Lazy;
use proptest::prelude::*;

static DB: Lazy<CardDatabase> = Lazy::new(common::corpus);

fn names() -> Vec<String> {
    DB.cards().iter().map(|c| c.name.clone()).collect()
}

fn recase(name: &str, mask: &[bool]) -> String {
    name.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_uppercase().collect::<String>()
            } else {
                c.to_lowercase().collect::<String>()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn lookup_ignores_case(index in 0usize..26, mask in prop::collection::vec(any::<bool>(), 1..8)) {
        let names = names();
        let name = &names[index % names.len()];
        let found = DB.find_card(&recase(name, &mask));
        prop_assert_eq!(found.map(|c| c.name.as_str()), Some(name.as_str()));
    }

    #[test]
    fn lookup_ignores_extra_spacing(index in 0usize..26, pad in 1usize..4) {
        let names = names();
        let name = &names[index % names.len()];
        let spaced = format!("{}{}{}", " ".repeat(pad), name.replace(' ', &" ".repeat(pad)), " ".repeat(pad));
        prop_assert_eq!(DB.find_card(&spaced).map(|c| c.name.as_str()), Some(name.as_str()));
    }

    #[test]
    fn lookup_ignores_trailing_plural(index in 0usize..26) {
        let names = names();
        let name = &names[index % names.len()];
        prop_assume!(!name.ends_with('s'));
        let plural = format!("{name}s");
        prop_assert_eq!(DB.find_card(&plural).map(|c| c.name.as_str()), Some(name.as_str()));
    }
}

#[test]
fn accented_spellings_find_the_same_card() {
    for (typed, expected) in [
        ("Jâce Beleren", "Jace Beleren"),
        ("TÁRMOGOYF", "Tarmogoyf"),
        ("Savannâh", "Savannah"),
    ] {
        assert_eq!(DB.find_card(typed).map(|c| c.name.as_str()), Some(expected));
    }
}

#[test]
fn repeated_builds_agree() {
    let raw = common::raw_corpus();
    let builds: Vec<CardDatabase> = (0..3).map(|_| CardDatabase::build(&raw).unwrap()).collect();
    for db in &builds[1..] {
        let indices = |db: &CardDatabase| -> Vec<u32> {
            db.printings().iter().map(|p| p.default_sort_index).collect()
        };
        assert_eq!(indices(db), indices(&builds[0]));
        assert_eq!(db.warnings(), builds[0].warnings());
    }
}
