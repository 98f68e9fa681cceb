//! Property tests for query equivalences.

#[path = "../../cardsearch-db/tests/common/mod.rs"]
mod common;

use cardsearch_db::CardDatabase;
use cardsearch_engine::SearchExecutor;
use once_cell::sync::Lazy;
use proptest::prelude::*;
use roaring::RoaringBitmap;

static DB: Lazy<CardDatabase> = Lazy::new(common::corpus);

const TERMS: &[&str] = &[
    "t:forest",
    "t:creature",
    "c:g",
    "c:m",
    "e:lea",
    "e:isd,dka",
    "r:rare",
    "cmc>=3",
    "pow>=2",
    "is:commander",
    "is:reserved",
    "mana>=1u",
    "f:legacy",
    "bolt",
    "alt:e:m10",
    "part:c:u",
];

const MANA_PATTERNS: &[&str] = &["ab", "1aa", "aab", "abc", "{w}a", "ah", "2ab"];
const MANA_OPERATORS: &[&str] = &["=", ">=", "<="];
const STATS: &[&str] = &["pow", "tou"];

fn matched(query: &str) -> RoaringBitmap {
    SearchExecutor::new(&DB)
        .execute(query)
        .unwrap_or_else(|err| panic!("{query}: {err}"))
        .matched()
        .clone()
}

fn term() -> impl Strategy<Value = &'static str> {
    prop::sample::select(TERMS)
}

proptest! {
    #[test]
    fn extra_whitespace_changes_nothing(a in term(), b in term(), pad in 1usize..5) {
        let spaced = format!("{}{a}{}{b}{}", " ".repeat(pad), " ".repeat(pad), "\t".repeat(pad));
        prop_assert_eq!(matched(&spaced), matched(&format!("{a} {b}")));
    }

    #[test]
    fn conjunction_is_intersection(a in term(), b in term()) {
        prop_assert_eq!(matched(&format!("{a} {b}")), matched(a) & matched(b));
        prop_assert_eq!(matched(&format!("{a} {b}")), matched(&format!("{b} {a}")));
    }

    #[test]
    fn disjunction_is_union(a in term(), b in term()) {
        prop_assert_eq!(matched(&format!("{a} OR {b}")), matched(a) | matched(b));
    }

    #[test]
    fn de_morgan(a in term(), b in term()) {
        prop_assert_eq!(
            matched(&format!("-({a} OR {b})")),
            matched(&format!("-{a} -{b}"))
        );
    }

    #[test]
    fn negation_is_complement(a in term()) {
        let all: RoaringBitmap = (0..DB.number_of_printings() as u32).collect();
        prop_assert_eq!(matched(&format!("-{a}")), all - matched(a));
    }

    #[test]
    fn mana_variables_are_interchangeable(
        pattern in prop::sample::select(MANA_PATTERNS),
        order in Just(vec!['m', 'n', 'o']).prop_shuffle(),
        operator in prop::sample::select(MANA_OPERATORS),
    ) {
        let rename = |letters: [char; 3]| -> String {
            pattern
                .chars()
                .map(|c| match c {
                    'a' => letters[0],
                    'b' => letters[1],
                    'c' => letters[2],
                    other => other,
                })
                .collect()
        };
        let canonical = format!("mana{operator}{}", rename(['m', 'n', 'o']));
        let renamed = format!("mana{operator}{}", rename([order[0], order[1], order[2]]));
        prop_assert_eq!(matched(&renamed), matched(&canonical));
    }

    #[test]
    fn star_plus_spellings_agree(n in 0u32..5, stat in prop::sample::select(STATS)) {
        for operator in ["=", ">", ">=", "<", "<="] {
            prop_assert_eq!(
                matched(&format!("{stat}{operator}*+{n}")),
                matched(&format!("{stat}{operator}{n}+*"))
            );
        }
    }
}
