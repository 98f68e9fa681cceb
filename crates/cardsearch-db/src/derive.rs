//! Per-card derived attributes.
//!
//! Pure functions over raw card fields. The builder calls them once per
//! card; every failure here aborts the build.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::color::{Color, ColorSet};
use crate::error::{DbError, DbResult};
use crate::mana::{ManaHash, MANA_SYMBOL};

// ============================================================================
// Color identity
// ============================================================================

/// Symbols that never contribute a color: generic and variable costs, tap,
/// untap, snow, generic Phyrexian, colorless, energy, acorn and so on.
static COLORLESS_SYMBOL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A(?:\d+|[½∞txyzsqpceav])\z").expect("colorless symbol pattern is valid")
});

/// Symbols whose color letters all count toward identity.
static COLORED_SYMBOL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\A(?:[wubrg]|h[wubrg]|[wubrg]/p|2/[wubrg]|c/[wubrg]|[wubrg]/[wubrg]|[wubrg]/[wubrg]/p)\z",
    )
    .expect("colored symbol pattern is valid")
});

/// Single-face color identity.
///
/// Union of the declared colors, every colored symbol in the mana cost and
/// rules text, and the colors of basic land subtypes. `types` are the
/// normalized type tags.
pub fn partial_color_identity(
    card: &str,
    colors: ColorSet,
    mana_cost: Option<&str>,
    text: &str,
    types: &[String],
) -> DbResult<ColorSet> {
    let mut identity = colors;
    let scanned = format!("{} {}", mana_cost.unwrap_or(""), text);

    for caps in MANA_SYMBOL.captures_iter(&scanned) {
        let symbol = caps[1].to_lowercase();
        if COLORLESS_SYMBOL.is_match(&symbol) || symbol == "chaos" || symbol == "+1" {
            continue;
        }
        if !COLORED_SYMBOL.is_match(&symbol) {
            return Err(DbError::UnknownManaSymbol {
                card: card.to_string(),
                symbol,
            });
        }
        identity = identity | ColorSet::from_letters(&symbol);
    }

    for tag in types {
        if let Some(color) = Color::from_basic_land_type(tag) {
            identity.insert(color);
        }
    }
    Ok(identity)
}

/// Colors implied by the mana cost alone, compared against declared colors.
///
/// Returns the declared colors when they differ from what the cost implies
/// (the card carries a color indicator), `None` otherwise. Keys with generic,
/// variable, colorless or snow symbols imply nothing.
pub fn color_indicator(
    card: &str,
    mana: Option<&ManaHash>,
    colors: ColorSet,
) -> DbResult<Option<ColorSet>> {
    let mut inferred = ColorSet::EMPTY;
    if let Some(mana) = mana {
        for key in mana.keys() {
            if key.chars().any(|c| "?xyzcs".contains(c)) {
                continue;
            }
            let stripped: String = key.chars().filter(|c| *c != 'p' && *c != '2').collect();
            if stripped.is_empty() || !stripped.chars().all(|c| Color::from_letter(c).is_some()) {
                return Err(DbError::UnknownManaSymbol {
                    card: card.to_string(),
                    symbol: key.to_string(),
                });
            }
            inferred = inferred | ColorSet::from_letters(&stripped);
        }
    }
    Ok((inferred != colors).then_some(colors))
}

// ============================================================================
// Reminder text
// ============================================================================

/// Mana produced by each basic land type combination, keyed by the sorted,
/// space separated type names. Listed explicitly to keep color wheel order.
const BASIC_LAND_MANA: [(&str, &str); 20] = [
    ("plains", "{W}"),
    ("island", "{U}"),
    ("swamp", "{B}"),
    ("mountain", "{R}"),
    ("forest", "{G}"),
    ("island plains", "{W} or {U}"),
    ("plains swamp", "{W} or {B}"),
    ("island swamp", "{U} or {B}"),
    ("island mountain", "{U} or {R}"),
    ("mountain swamp", "{B} or {R}"),
    ("forest swamp", "{B} or {G}"),
    ("forest mountain", "{R} or {G}"),
    ("mountain plains", "{R} or {W}"),
    ("forest plains", "{G} or {W}"),
    ("forest island", "{G} or {U}"),
    ("forest plains swamp", "{W}, {B}, or {G}"),
    ("forest island mountain", "{G}, {U}, or {R}"),
    ("island mountain plains", "{U}, {R}, or {W}"),
    ("mountain plains swamp", "{R}, {W}, or {B}"),
    ("forest island swamp", "{B}, {G}, or {U}"),
];

const BASIC_LAND_TYPES: [&str; 5] = ["forest", "island", "mountain", "plains", "swamp"];

/// Synthesized reminder text.
///
/// Cards with basic land types get their mana ability; the secondary face
/// of a flip card notes that it keeps the other face's color and cost.
pub fn reminder_text(
    card: &str,
    types: &[String],
    layout: &str,
    secondary: bool,
    names: Option<&[String]>,
) -> DbResult<Option<String>> {
    let land_types: Vec<&str> = BASIC_LAND_TYPES
        .iter()
        .copied()
        .filter(|land| types.iter().any(|t| t == land))
        .collect();

    if !land_types.is_empty() {
        let key = land_types.join(" ");
        let mana = BASIC_LAND_MANA
            .iter()
            .find(|(combination, _)| *combination == key)
            .map(|(_, mana)| *mana)
            .ok_or_else(|| DbError::UnknownLandTypes {
                card: card.to_string(),
                land_types: key.clone(),
            })?;
        return Ok(Some(format!("({{T}}: Add {mana}.)")));
    }

    if layout == "flip" && secondary {
        let other = names
            .unwrap_or_default()
            .iter()
            .find(|name| name.as_str() != card);
        if let Some(other) = other {
            return Ok(Some(format!(
                "({card} keeps color and mana cost of {other} when flipped)"
            )));
        }
    }
    Ok(None)
}

// ============================================================================
// Types and text
// ============================================================================

/// Normalized type tags: types, then subtypes, then supertypes.
///
/// Lowercase, typographic apostrophe and minus folded, possessive `'s`
/// dropped and spaces joined with `-` (`Urza's` → `urza`, `Time Lord` →
/// `time-lord`).
pub fn type_tags(types: &[String], subtypes: &[String], supertypes: &[String]) -> Vec<String> {
    types
        .iter()
        .chain(subtypes)
        .chain(supertypes)
        .map(|t| {
            t.to_lowercase()
                .replace('’', "'")
                .replace('\u{2212}', "-")
                .replace("'s", "")
                .replace(' ', "-")
        })
        .collect()
}

/// Printed type line, e.g. `Legendary Creature - Elf Druid`.
pub fn type_line(supertypes: &[String], types: &[String], subtypes: &[String]) -> String {
    let mut line = supertypes
        .iter()
        .chain(types)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    if !subtypes.is_empty() {
        line.push_str(" - ");
        line.push_str(&subtypes.join(" "));
    }
    line
}

static REMINDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^()]*\)").expect("reminder pattern is valid"));

static SPACES_BEFORE_NEWLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" *\n").expect("newline pattern is valid"));

/// Rules text as searched and displayed.
///
/// Parenthesized reminder text is removed unless the card is funny, where
/// it is often part of the joke.
pub fn clean_text(text: &str, funny: bool) -> String {
    let stripped = if funny {
        text.to_string()
    } else {
        REMINDER.replace_all(text, "").into_owned()
    };
    SPACES_BEFORE_NEWLINE
        .replace_all(stripped.trim_end(), "\n")
        .trim_start()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(types: &[&str]) -> Vec<String> {
        types.iter().map(|t| t.to_string()).collect()
    }

    mod identity {
        use super::*;

        #[test]
        fn test_cost_and_text_symbols() {
            let ci = partial_color_identity(
                "Test",
                ColorSet::from_letters("r"),
                Some("{1}{R}"),
                "{T}: Add {G}. {2/W}: Scry 1. {U/P}: Draw.",
                &tags(&["creature"]),
            )
            .unwrap();
            assert_eq!(ci.letters(), "wurg");
        }

        #[test]
        fn test_hybrid_and_colorless_hybrid() {
            let ci =
                partial_color_identity("Test", ColorSet::EMPTY, Some("{B/G}{C/W}"), "", &[])
                    .unwrap();
            assert_eq!(ci.letters(), "wbg");
        }

        #[test]
        fn test_land_types_add_colors() {
            let ci = partial_color_identity(
                "Tundra",
                ColorSet::EMPTY,
                None,
                "",
                &tags(&["land", "plains", "island"]),
            )
            .unwrap();
            assert_eq!(ci.letters(), "wu");
        }

        #[test]
        fn test_skipped_symbols() {
            let ci = partial_color_identity(
                "Test",
                ColorSet::EMPTY,
                Some("{X}{C}"),
                "{T}, {Q}, {E}{E}, {S}, {CHAOS}, {+1}, {½}, {∞}, {A}, {10}",
                &[],
            )
            .unwrap();
            assert!(ci.is_empty());
        }

        #[test]
        fn test_unknown_symbol_is_fatal() {
            let err =
                partial_color_identity("Test", ColorSet::EMPTY, None, "Pay {Z/Q}.", &[])
                    .unwrap_err();
            assert!(matches!(err, DbError::UnknownManaSymbol { .. }));
        }
    }

    mod indicator {
        use super::*;

        #[test]
        fn test_matching_cost_has_no_indicator() {
            let mana = ManaHash::parse("Test", "{1}{G}{W/P}").unwrap();
            let indicator =
                color_indicator("Test", Some(&mana), ColorSet::from_letters("gw")).unwrap();
            assert_eq!(indicator, None);
        }

        #[test]
        fn test_costless_colored_card() {
            let indicator =
                color_indicator("Ancestral Vision", None, ColorSet::from_letters("u")).unwrap();
            assert_eq!(indicator, Some(ColorSet::from_letters("u")));
        }

        #[test]
        fn test_devoid_style_card() {
            let mana = ManaHash::parse("Test", "{2}{R}").unwrap();
            let indicator = color_indicator("Test", Some(&mana), ColorSet::EMPTY).unwrap();
            assert_eq!(indicator, Some(ColorSet::EMPTY));
        }
    }

    mod reminder {
        use super::*;

        #[test]
        fn test_single_and_dual_lands() {
            let forest = reminder_text("Forest", &tags(&["land", "forest", "basic"]), "normal", false, None)
                .unwrap();
            assert_eq!(forest.as_deref(), Some("({T}: Add {G}.)"));

            let savannah =
                reminder_text("Savannah", &tags(&["land", "forest", "plains"]), "normal", false, None)
                    .unwrap();
            assert_eq!(savannah.as_deref(), Some("({T}: Add {G} or {W}.)"));
        }

        #[test]
        fn test_tri_land() {
            let text = reminder_text(
                "Savai Triome",
                &tags(&["land", "mountain", "plains", "swamp"]),
                "normal",
                false,
                None,
            )
            .unwrap();
            assert_eq!(text.as_deref(), Some("({T}: Add {R}, {W}, or {B}.)"));
        }

        #[test]
        fn test_every_table_entry_is_reachable() {
            for (combination, _) in BASIC_LAND_MANA {
                let types: Vec<String> = combination.split(' ').map(String::from).collect();
                assert!(reminder_text("Test", &types, "normal", false, None).unwrap().is_some());
            }
        }

        #[test]
        fn test_unknown_combination_is_fatal() {
            let err = reminder_text(
                "Test",
                &tags(&["forest", "island", "plains"]),
                "normal",
                false,
                None,
            )
            .unwrap_err();
            assert!(matches!(err, DbError::UnknownLandTypes { ref land_types, .. } if land_types == "forest island plains"));
        }

        #[test]
        fn test_flip_secondary() {
            let names = tags(&["Erayo, Soratami Ascendant", "Erayo's Essence"]);
            let text = reminder_text("Erayo's Essence", &tags(&["enchantment"]), "flip", true, Some(names.as_slice()))
                .unwrap();
            assert_eq!(
                text.as_deref(),
                Some("(Erayo's Essence keeps color and mana cost of Erayo, Soratami Ascendant when flipped)")
            );
        }

        #[test]
        fn test_plain_card_has_none() {
            let text = reminder_text("Shock", &tags(&["instant"]), "normal", false, None).unwrap();
            assert_eq!(text, None);
        }
    }

    mod types_and_text {
        use super::*;

        #[test]
        fn test_type_tags() {
            let result = type_tags(
                &tags(&["Creature"]),
                &tags(&["Urza’s", "Time Lord"]),
                &tags(&["Legendary"]),
            );
            assert_eq!(result, vec!["creature", "urza", "time-lord", "legendary"]);
        }

        #[test]
        fn test_type_line() {
            assert_eq!(
                type_line(&tags(&["Legendary"]), &tags(&["Creature"]), &tags(&["Elf", "Druid"])),
                "Legendary Creature - Elf Druid"
            );
            assert_eq!(type_line(&[], &tags(&["Instant"]), &[]), "Instant");
        }

        #[test]
        fn test_clean_text_strips_reminders() {
            let text = "Flying (This creature can't be blocked except by creatures with flying or reach.)  \nLifelink ";
            assert_eq!(clean_text(text, false), "Flying\nLifelink");
        }

        #[test]
        fn test_clean_text_keeps_reminders_when_funny() {
            let text = "  Gotcha (It's a joke.)";
            assert_eq!(clean_text(text, true), "Gotcha (It's a joke.)");
        }
    }
}
