//! Power, toughness and loyalty values.

use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DbError, DbResult};

static AUGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A\+\d+\z").expect("augment pattern is valid"));

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A-?[\d.]+\z").expect("numeric pattern is valid"));

static STAR_PLUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A\*\+(\d+)\z").expect("star plus pattern is valid"));

static STAR_OFFSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A(\d+)([+-])\*\z").expect("star offset pattern is valid"));

/// Symbolic values a card may print instead of a number.
pub const SYMBOLIC_VALUES: [&str; 9] = ["*", "*²", "1+*", "2+*", "7-*", "X", "∞", "?", "1d4+1"];

/// A power, toughness or loyalty value.
///
/// Numbers compare numerically. Star symbols order within their family:
/// `*` < `1+*` < `2+*`, and `2-*` < `7-*` < `8-*`. The two families never
/// compare with each other. `*²`, `X`, `?`, `∞` and `1d4+1` only compare
/// equal to themselves, and numbers never compare with symbols.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    /// An exact number.
    Number(f64),
    /// One of [`SYMBOLIC_VALUES`], or query text in the same shape.
    Symbol(String),
}

impl StatValue {
    /// Converts a card's printed value.
    ///
    /// Augment values like `+2` become plain numbers; anything that is
    /// neither numeric nor in [`SYMBOLIC_VALUES`] is a fatal error.
    pub fn parse_card_value(card: &str, raw: &str) -> DbResult<StatValue> {
        let unrecognized = || DbError::UnknownStatValue {
            card: card.to_string(),
            value: raw.to_string(),
        };

        if AUGMENT.is_match(raw) {
            return raw[1..]
                .parse::<f64>()
                .map(StatValue::Number)
                .map_err(|_| unrecognized());
        }
        if !NUMERIC.is_match(raw) {
            return if SYMBOLIC_VALUES.contains(&raw) {
                Ok(StatValue::Symbol(raw.to_string()))
            } else {
                Err(unrecognized())
            };
        }
        raw.parse::<f64>()
            .map(StatValue::Number)
            .map_err(|_| unrecognized())
    }

    /// Interprets query text, folding the spellings users type.
    ///
    /// `*+1` means `1+*`, `*2` means `*²` and `x` means `X`.
    pub fn from_query(text: &str) -> StatValue {
        let text = text.trim();
        if let Ok(number) = text.parse::<f64>() {
            return StatValue::Number(number);
        }
        if let Some(caps) = STAR_PLUS.captures(text) {
            return StatValue::Symbol(format!("{}+*", &caps[1]));
        }
        let symbol = match text {
            "*2" => "*²".to_string(),
            "x" => "X".to_string(),
            other => other.to_string(),
        };
        StatValue::Symbol(symbol)
    }

    /// Partial order between two values; `None` when incomparable.
    pub fn compare(&self, other: &StatValue) -> Option<Ordering> {
        match (self, other) {
            (StatValue::Number(a), StatValue::Number(b)) => a.partial_cmp(b),
            (StatValue::Symbol(a), StatValue::Symbol(b)) if a == b => Some(Ordering::Equal),
            (StatValue::Symbol(a), StatValue::Symbol(b)) => match (star_offset(a), star_offset(b)) {
                (Some(x), Some(y)) if x.0 == y.0 => Some(x.1.cmp(&y.1)),
                _ => None,
            },
            _ => None,
        }
    }

    /// The numeric value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StatValue::Number(n) => Some(*n),
            StatValue::Symbol(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StarFamily {
    Plus,
    Minus,
}

/// `*` is `0+*`; `N+*` and `N-*` carry their offset.
fn star_offset(symbol: &str) -> Option<(StarFamily, u32)> {
    if symbol == "*" {
        return Some((StarFamily::Plus, 0));
    }
    let caps = STAR_OFFSET.captures(symbol)?;
    let offset = caps[1].parse().ok()?;
    let family = if &caps[2] == "+" {
        StarFamily::Plus
    } else {
        StarFamily::Minus
    };
    Some((family, offset))
}

impl PartialOrd for StatValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            StatValue::Number(n) => write!(f, "{}", n),
            StatValue::Symbol(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(raw: &str) -> StatValue {
        StatValue::parse_card_value("Test", raw).unwrap()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(card("3"), StatValue::Number(3.0));
        assert_eq!(card("-1"), StatValue::Number(-1.0));
        assert_eq!(card("2.5"), StatValue::Number(2.5));
        assert_eq!(card("+2"), StatValue::Number(2.0));
    }

    #[test]
    fn test_symbols_pass_through() {
        for symbol in SYMBOLIC_VALUES {
            assert_eq!(card(symbol), StatValue::Symbol(symbol.to_string()));
        }
    }

    #[test]
    fn test_unknown_is_fatal() {
        assert!(StatValue::parse_card_value("Test", "3+*").is_err());
        assert!(StatValue::parse_card_value("Test", "1.2.3").is_err());
    }

    #[test]
    fn test_query_folding() {
        assert_eq!(StatValue::from_query("*+1"), StatValue::Symbol("1+*".to_string()));
        assert_eq!(StatValue::from_query("*2"), StatValue::Symbol("*²".to_string()));
        assert_eq!(StatValue::from_query("x"), StatValue::Symbol("X".to_string()));
        assert_eq!(StatValue::from_query("4"), StatValue::Number(4.0));
    }

    #[test]
    fn test_star_order() {
        let star = StatValue::from_query("*");
        let one = StatValue::from_query("1+*");
        let two = StatValue::from_query("2+*");
        let seven = StatValue::from_query("7-*");
        assert!(star < one);
        assert!(one < two);
        assert!(seven > StatValue::from_query("2-*"));
        assert!(seven < StatValue::from_query("8-*"));
    }

    #[test]
    fn test_star_families_stay_apart() {
        let star = StatValue::from_query("*");
        let squared = StatValue::from_query("*²");
        let two_minus = StatValue::from_query("2-*");
        assert_eq!(StatValue::from_query("1+*").compare(&two_minus), None);
        assert_eq!(StatValue::from_query("2+*").compare(&two_minus), None);
        assert_eq!(star.compare(&two_minus), None);
        assert_eq!(squared.compare(&star), None);
        assert_eq!(squared.compare(&StatValue::from_query("1+*")), None);
        assert_eq!(squared.compare(&squared), Some(Ordering::Equal));
        assert_eq!(card("1d4+1").compare(&star), None);
    }

    #[test]
    fn test_incomparable() {
        assert_eq!(StatValue::Number(1.0).compare(&card("*")), None);
        assert_eq!(card("X").compare(&card("?")), None);
        assert_eq!(card("X").compare(&card("X")), Some(Ordering::Equal));
    }

    #[test]
    fn test_display() {
        assert_eq!(card("3").to_string(), "3");
        assert_eq!(card("2.5").to_string(), "2.5");
        assert_eq!(card("*²").to_string(), "*²");
    }
}
