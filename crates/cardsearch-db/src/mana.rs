//! Mana cost multisets.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DbError, DbResult};

/// Matches one `{...}` symbol, capturing its contents.
pub(crate) static MANA_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(.*?)\}").expect("mana symbol pattern is valid"));

static HYBRID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A(?:[wubrg]/[wubrg]/p|[wubrg]/[wubrg]|[wubrg]/p|2/[wubrg]|c/[wubrg])\z")
        .expect("hybrid pattern is valid")
});

/// Generic mana bucket.
pub const GENERIC: &str = "?";

/// Mana symbol multiset keyed by normalized symbol class.
///
/// Generic costs accumulate under `"?"`, single symbols under their letter
/// and hybrid or Phyrexian symbols under their sorted letters with slashes
/// removed (`{w/u}` → `"uw"`). Counts are kept in half units so the half
/// symbols of `{hw}` stay exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ManaHash(BTreeMap<String, u32>);

impl ManaHash {
    /// Creates an empty multiset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a mana cost such as `{2}{W}{W/U}`.
    ///
    /// The cost is lowercased first. Any symbol outside the known classes,
    /// or any text outside braces, is a fatal error.
    pub fn parse(card: &str, cost: &str) -> DbResult<ManaHash> {
        let cost = cost.to_lowercase();
        let mut hash = ManaHash::new();

        if !MANA_SYMBOL.replace_all(&cost, "").trim().is_empty() {
            return Err(DbError::MalformedManaCost {
                card: card.to_string(),
                cost,
            });
        }

        for caps in MANA_SYMBOL.captures_iter(&cost) {
            let symbol = &caps[1];
            if let Ok(generic) = symbol.parse::<u32>() {
                hash.add_half_units(GENERIC, generic * 2);
            } else if symbol.len() == 1 && "wubrgxyzcs".contains(symbol) {
                hash.add_half_units(symbol, 2);
            } else if let Some(color) = half_symbol(symbol) {
                hash.add_half_units(&color.to_string(), 1);
            } else if HYBRID.is_match(symbol) {
                hash.add_half_units(&normalize_mana_symbol(symbol), 2);
            } else {
                return Err(DbError::UnknownManaSymbol {
                    card: card.to_string(),
                    symbol: symbol.to_string(),
                });
            }
        }
        Ok(hash)
    }

    /// Adds `half_units / 2` symbols under `key`.
    pub fn add_half_units(&mut self, key: &str, half_units: u32) {
        if half_units == 0 {
            return;
        }
        *self.0.entry(key.to_string()).or_insert(0) += half_units;
    }

    /// Count under `key` in half units; missing keys count as zero.
    pub fn half_units(&self, key: &str) -> u32 {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Count under `key`.
    pub fn get(&self, key: &str) -> f64 {
        f64::from(self.half_units(key)) / 2.0
    }

    /// Keys present in the multiset.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries as `(key, half units)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Whether no symbols were counted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn half_symbol(symbol: &str) -> Option<char> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('h'), Some(c), None) if "wubrg".contains(c) => Some(c),
        _ => None,
    }
}

/// Normalizes a hybrid or Phyrexian symbol to its multiset key.
///
/// Braces and slashes are dropped and the remaining characters sorted, so
/// `{W/U}` and `{u/w}` both become `"uw"`.
pub fn normalize_mana_symbol(symbol: &str) -> String {
    let mut chars: Vec<char> = symbol
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '/' | '{' | '}'))
        .collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}
