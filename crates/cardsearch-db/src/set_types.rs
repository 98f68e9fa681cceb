//! Set classification.
//!
//! Every set gets a sorted, deduplicated list of category tags. The tags
//! come from the declared primary type plus an ordered table of code rules;
//! the table is data and the accumulation below is the only logic.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a set code either exactly or against an anchored pattern.
#[derive(Debug, Clone)]
pub enum CodeMatcher {
    /// Exact code.
    Exact(&'static str),
    /// Anchored regular expression.
    Pattern(Regex),
}

impl CodeMatcher {
    /// Whether `code` matches.
    pub fn matches(&self, code: &str) -> bool {
        match self {
            CodeMatcher::Exact(exact) => *exact == code,
            CodeMatcher::Pattern(pattern) => pattern.is_match(code),
        }
    }
}

/// One row of the code table: any matcher hit appends `tags`.
#[derive(Debug, Clone)]
pub struct CodeRule {
    /// Alternatives; the rule fires when any of them matches.
    pub matchers: Vec<CodeMatcher>,
    /// Tags appended when the rule fires.
    pub tags: &'static [&'static str],
}

fn rule(exact: &[&'static str], patterns: &[&str], tags: &'static [&'static str]) -> CodeRule {
    let mut matchers: Vec<CodeMatcher> = exact.iter().copied().map(CodeMatcher::Exact).collect();
    matchers.extend(patterns.iter().map(|pattern| {
        CodeMatcher::Pattern(Regex::new(pattern).expect("set code pattern is valid"))
    }));
    CodeRule { matchers, tags }
}

/// Code rules in priority order; only the first matching rule applies.
static CODE_RULES: Lazy<Vec<CodeRule>> = Lazy::new(|| {
    vec![
        rule(&["bbd"], &[], &["two-headed giant", "multiplayer"]),
        rule(&["mh1", "mh2"], &[], &["modern"]),
        rule(&["cns", "cn2"], &[], &["conspiracy", "multiplayer"]),
        rule(&["cp1", "cp2", "cp3"], &[], &["deck"]),
        rule(&["por", "p02", "ptk"], &[], &["portal", "booster"]),
        rule(&["s99"], &[], &["booster"]),
        rule(&["s00", "w16", "itp", "cm1"], &[], &["fixed"]),
        rule(&["ugl", "unh", "ust"], &[], &["un"]),
        rule(&["tpr"], &[], &["masters"]),
        rule(&["ocmd", "cmr"], &[r"\Aoc\d\d\z"], &["commander", "multiplayer"]),
        rule(&["pwpn"], &[r"\Apwp\d+\z"], &["wpn"]),
        rule(&["parl"], &[r"\Apal\d+\z"], &["arena league"]),
        rule(&["jgp"], &[r"\A[gj]\d\d\z"], &["judge gift"]),
        rule(&["pdtp"], &[r"\Apdp\d\d\z"], &["duels"]),
        rule(&[], &[r"\Apmps\d\d\z"], &["premiere shop"]),
        rule(&["mpr"], &[r"\Ap0[3-9]\z", r"\Ap[1-9]\d\z"], &["player rewards"]),
        rule(&["pgtw"], &[r"\Apg\d\d\z"], &["gateway"]),
        rule(
            &["fnm", "pdom", "pgrn", "pm19", "prna", "pwar"],
            &[r"\Af\d\d\z"],
            &["fnm"],
        ),
    ]
});

/// Sets that are not for tournament play.
pub const FUNNY_SETS: &[&str] = &[
    "unh", "ugl", "pcel", "hho", "parl", "prel", "ust", "pust", "ppc1", "htr", "htr16", "htr17",
    "htr18", "htr19", "pal04", "h17", "j17", "tbth", "tdag", "tfth", "thp1", "thp2", "thp3", "ptg",
    "cmb1", "und", "punh",
];

const STANDARD_TYPES: &[&str] = &["core", "expansion"];

const MULTIPLAYER_TYPES: &[&str] = &[
    "archenemy",
    "commander",
    "conspiracy",
    "planechase",
    "vanguard",
    "multiplayer",
    "two-headed giant",
];

const FIXED_TYPES: &[&str] = &["from the vault", "vanguard"];

/// Primary types that are sold as decks, with codes excluded from the inference.
const DECK_TYPES: &[(&[&str], &[&str])] = &[
    (
        &["archenemy", "duel deck", "premium deck", "planechase", "box", "deck"],
        &["ha1", "ha2", "ha3"],
    ),
    (&["commander"], &["cm1"]),
];

/// The metadata the classifier looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetMetadata<'a> {
    /// Set code.
    pub code: &'a str,
    /// Set name.
    pub name: &'a str,
    /// Declared primary type, underscores allowed (`duel_deck`).
    pub set_type: Option<&'a str>,
    /// Fan-made set.
    pub custom: bool,
    /// Sold in boosters.
    pub has_boosters: bool,
    /// Cards appear in other sets' boosters.
    pub in_other_boosters: bool,
}

/// Output of [`classify_set`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetClassification {
    /// Sorted, deduplicated tags.
    pub types: Vec<String>,
    /// Whether the set is on the funny list.
    pub funny: bool,
}

/// Assigns category tags to a set.
pub fn classify_set(set: &SetMetadata<'_>) -> SetClassification {
    let main_type = set.set_type.map(|t| t.replace('_', " "));
    let main_type = main_type.as_deref();
    let mut tags: BTreeSet<String> = BTreeSet::new();
    let mut add = |tag: &str| {
        tags.insert(tag.to_string());
    };

    if let Some(main_type) = main_type {
        add(main_type);
    }
    if set.custom {
        add("custom");
    }

    if let Some(code_rule) = CODE_RULES
        .iter()
        .find(|r| r.matchers.iter().any(|m| m.matches(set.code)))
    {
        code_rule.tags.iter().for_each(|tag| add(tag));
    }

    let funny = FUNNY_SETS.contains(&set.code);
    if funny {
        add("funny");
    }

    if set.name.contains("Welcome Deck") || set.name == "M19 Gift Pack" {
        add("standard");
    }

    let has_type = |list: &[&str]| main_type.is_some_and(|t| list.contains(&t));
    if has_type(STANDARD_TYPES) {
        add("standard");
    }
    if has_type(MULTIPLAYER_TYPES) {
        add("multiplayer");
    }
    if has_type(FIXED_TYPES) {
        add("fixed");
    }
    if set.has_boosters || set.in_other_boosters {
        add("booster");
    }
    if DECK_TYPES
        .iter()
        .any(|(types, excluded)| has_type(*types) && !excluded.contains(&set.code))
    {
        add("deck");
    }

    SetClassification {
        types: tags.into_iter().collect(),
        funny,
    }
}
