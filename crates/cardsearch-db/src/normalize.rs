//! Text normalization shared by the builder, resolver and query engine.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

static TRAILING_S: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"s\b").expect("trailing s pattern is valid"));

static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("non-alphanumeric pattern is valid"));

static ARTIST_SLUG_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9\p{Han}\p{Katakana}\p{Hiragana}\p{Hangul}]+")
        .expect("artist slug pattern is valid")
});

/// Folds accented letters to their base form.
///
/// `Æ`/`æ` become `Ae`/`ae`, typographic apostrophes become `'` and the
/// minus sign becomes `-`; every other combining mark is dropped after
/// canonical decomposition.
pub fn normalize_accents(s: &str) -> String {
    let folded = s
        .replace('Æ', "Ae")
        .replace('æ', "ae")
        .replace('’', "'")
        .replace('\u{2212}', "-");
    if folded.is_ascii() {
        return folded;
    }
    folded.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Lowercase, accent fold and trim.
pub fn normalize_text(s: &str) -> String {
    normalize_accents(&s.to_lowercase()).trim().to_string()
}

/// Lookup key for card names: [`normalize_text`] with whitespace runs collapsed.
pub fn normalize_name(s: &str) -> String {
    normalize_text(s).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stemmed form of a name: trailing `s` of every word removed, hyphens as spaces.
///
/// Used so that `vision` and `visions` find the same cards.
pub fn stemmed_name(s: &str) -> String {
    let lowered = normalize_accents(&s.to_lowercase());
    TRAILING_S.replace_all(&lowered, "").replace('-', " ")
}

/// Accent and case insensitive form for foreign names and artist text.
pub fn hard_normalize(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn split_alnum(s: &str) -> String {
    NON_ALNUM
        .split(s)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Set name normalization that keeps the `s` of a possessive (`Urza's` → `urzas`).
pub fn normalize_set_name(name: &str) -> String {
    split_alnum(&normalize_text(name).replace("'s", "s"))
}

/// Set name normalization that drops a possessive entirely (`Urza's` → `urza`).
pub fn normalize_set_name_alt(name: &str) -> String {
    split_alnum(&normalize_text(name).replace("'s", ""))
}

/// Grouping key for artist names.
pub fn artist_slug(name: &str) -> String {
    let lowered = normalize_accents(name).to_lowercase();
    ARTIST_SLUG_SEPARATOR.replace_all(&lowered, "_").into_owned()
}

/// Normalization applied to deck names before comparison.
pub fn normalize_deck_name(name: &str) -> String {
    normalize_text(name).replace("'s", "").replace(',', "")
}

/// URL-style deck slug.
pub fn deck_slug(name: &str) -> String {
    let base = normalize_text(name).replace("'s", "");
    NON_ALNUM
        .split(&base)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
