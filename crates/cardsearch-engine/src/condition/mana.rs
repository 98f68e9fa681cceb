//! Mana cost queries with color variables.
//!
//! Besides literal symbols a query may use `m`, `n` and `o`, which stand
//! for pairwise distinct colors not otherwise named as single symbols in
//! the query, and `h`, which stands for one two-color hybrid pair. A query
//! compiles to every concrete multiset its variables can produce and a
//! card matches when any of them compares true.

use std::collections::BTreeMap;

use cardsearch_db::{normalize_mana_symbol, Color, ManaHash, GENERIC};
use cardsearch_query::ComparisonOperator;

const SINGLE_SYMBOLS: &str = "wubrgxyzcs";
const VARIABLES: [char; 3] = ['m', 'n', 'o'];
const HYBRID_VARIABLE: char = 'h';

/// A compiled `mana` comparison.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ManaQuery {
    operator: ComparisonOperator,
    candidates: Vec<ManaHash>,
}

impl ManaQuery {
    /// Compiles query text such as `2rr`, `{m}{n}{o}` or `1{g/w}h`.
    ///
    /// `None` when the text contains something that is not a mana symbol.
    pub fn compile(operator: ComparisonOperator, value: &str) -> Option<ManaQuery> {
        let (fixed, variables) = parse_query(value)?;
        let mut candidates = vec![fixed.clone()];

        let excluded: Vec<char> = fixed
            .keys()
            .filter(|key| key.len() == 1)
            .filter_map(|key| key.chars().next())
            .collect();
        let free: Vec<char> = Color::ALL
            .iter()
            .map(|color| color.letter())
            .filter(|letter| !excluded.contains(letter))
            .collect();

        for variable in VARIABLES {
            let Some(&units) = variables.get(&variable) else {
                continue;
            };
            let mut expanded = Vec::new();
            for candidate in &candidates {
                for letter in &free {
                    let key = letter.to_string();
                    if candidate.half_units(&key) > 0 {
                        continue;
                    }
                    let mut next = candidate.clone();
                    next.add_half_units(&key, units);
                    expanded.push(next);
                }
            }
            candidates = expanded;
        }

        if let Some(&units) = variables.get(&HYBRID_VARIABLE) {
            let pairs = hybrid_pairs();
            candidates = candidates
                .iter()
                .flat_map(|candidate| {
                    pairs.iter().map(move |pair| {
                        let mut next = candidate.clone();
                        next.add_half_units(pair, units);
                        next
                    })
                })
                .collect();
        }

        let mut distinct: Vec<ManaHash> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !distinct.contains(&candidate) {
                distinct.push(candidate);
            }
        }
        Some(ManaQuery {
            operator,
            candidates: distinct,
        })
    }

    /// Whether a card's mana multiset satisfies the query.
    pub fn matches(&self, mana: &ManaHash) -> bool {
        self.candidates
            .iter()
            .any(|wanted| compare(self.operator, mana, wanted))
    }

    #[cfg(test)]
    fn candidate_count(&self) -> usize {
        self.candidates.len()
    }
}

/// Multiset comparison: `=` equality, `>=` superset, `<` strict subset.
fn compare(operator: ComparisonOperator, actual: &ManaHash, wanted: &ManaHash) -> bool {
    let covers = |big: &ManaHash, small: &ManaHash| {
        small
            .iter()
            .all(|(key, units)| big.half_units(key) >= units)
    };
    let equal = actual == wanted;
    match operator {
        ComparisonOperator::Match | ComparisonOperator::Equal => equal,
        ComparisonOperator::GreaterThanOrEqual => covers(actual, wanted),
        ComparisonOperator::GreaterThan => !equal && covers(actual, wanted),
        ComparisonOperator::LessThanOrEqual => covers(wanted, actual),
        ComparisonOperator::LessThan => !equal && covers(wanted, actual),
    }
}

fn hybrid_pairs() -> Vec<String> {
    let letters: Vec<char> = Color::ALL.iter().map(|color| color.letter()).collect();
    let mut pairs = Vec::new();
    for (i, a) in letters.iter().enumerate() {
        for b in &letters[i + 1..] {
            pairs.push(normalize_mana_symbol(&format!("{a}/{b}")));
        }
    }
    pairs
}

/// Splits query text into literal symbols and variable counts, both in half units.
fn parse_query(value: &str) -> Option<(ManaHash, BTreeMap<char, u32>)> {
    let text = value.trim().to_lowercase();
    let mut fixed = ManaHash::new();
    let mut variables: BTreeMap<char, u32> = BTreeMap::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' {
            let mut symbol = String::new();
            loop {
                match chars.next()? {
                    '}' => break,
                    inner => symbol.push(inner),
                }
            }
            add_symbol(&symbol, &mut fixed, &mut variables)?;
        } else if c.is_ascii_digit() {
            let mut digits = c.to_string();
            while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                digits.push(d);
                chars.next();
            }
            fixed.add_half_units(GENERIC, digits.parse::<u32>().ok()?.checked_mul(2)?);
        } else if !c.is_whitespace() {
            add_symbol(&c.to_string(), &mut fixed, &mut variables)?;
        }
    }
    Some((fixed, variables))
}

fn add_symbol(
    symbol: &str,
    fixed: &mut ManaHash,
    variables: &mut BTreeMap<char, u32>,
) -> Option<()> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(c), None, None) if VARIABLES.contains(&c) || c == HYBRID_VARIABLE => {
            *variables.entry(c).or_insert(0) += 2;
        }
        (Some(c), None, None) if SINGLE_SYMBOLS.contains(c) => {
            fixed.add_half_units(&c.to_string(), 2);
        }
        (Some('h'), Some(c), None) if "wubrg".contains(c) => {
            fixed.add_half_units(&c.to_string(), 1);
        }
        _ if symbol.chars().all(|c| c.is_ascii_digit()) => {
            fixed.add_half_units(GENERIC, symbol.parse::<u32>().ok()?.checked_mul(2)?);
        }
        _ if symbol.contains('/') => {
            let key = normalize_mana_symbol(symbol);
            if key.is_empty() || !key.chars().all(|c| "wubrgcp2".contains(c)) {
                return None;
            }
            fixed.add_half_units(&key, 2);
        }
        _ => return None,
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mana(cost: &str) -> ManaHash {
        ManaHash::parse("test", cost).unwrap()
    }

    fn matches(query: &str, operator: ComparisonOperator, cost: &str) -> bool {
        ManaQuery::compile(operator, query).unwrap().matches(&mana(cost))
    }

    use ComparisonOperator::*;

    #[test]
    fn test_literal_queries() {
        assert!(matches("2rr", Equal, "{2}{R}{R}"));
        assert!(matches("{2}{r}{r}", Equal, "{2}{R}{R}"));
        assert!(!matches("2r", Equal, "{2}{R}{R}"));
        assert!(matches("2r", GreaterThanOrEqual, "{2}{R}{R}"));
        assert!(matches("10", Equal, "{10}"));
        assert!(matches("{g/w}{g/w}1", Equal, "{1}{G/W}{G/W}"));
        assert!(matches("1{g/w}{g/w}{g/w}", LessThan, "{1}{G/W}{G/W}"));
        assert!(!matches("1{g/w}{g/w}", LessThan, "{1}{G/W}{G/W}"));
    }

    #[test]
    fn test_variables_are_distinct_colors() {
        assert!(matches("mn", Equal, "{G}{W}"));
        assert!(!matches("mn", Equal, "{U}{U}"));
        assert!(matches("mm", Equal, "{U}{U}"));
        assert!(matches("mmn", Equal, "{U}{U}{B}"));
        assert!(matches("mnn", Equal, "{U}{U}{B}"));
    }

    #[test]
    fn test_variables_avoid_named_colors() {
        assert!(matches("{w}{m}", Equal, "{G}{W}"));
        assert!(!matches("{w}{m}", Equal, "{W}{W}"));
    }

    #[test]
    fn test_hybrid_variable() {
        assert!(matches("1hh", Equal, "{1}{G/W}{G/W}"));
        assert!(matches("h", GreaterThanOrEqual, "{1}{G/W}{G/W}"));
        assert!(!matches("hh", Equal, "{1}{G/W}{G/W}"));
        assert!(matches("hh", GreaterThan, "{1}{G/W}{G/W}"));
    }

    #[test]
    fn test_half_and_phyrexian_symbols() {
        assert!(matches("{hw}", Equal, "{HW}"));
        assert!(matches("{w/p}", Equal, "{W/P}"));
        assert!(matches("{2/w}", Equal, "{2/W}"));
    }

    #[test]
    fn test_candidate_expansion() {
        let query = ManaQuery::compile(Equal, "mno").unwrap();
        assert_eq!(query.candidate_count(), 10);
        let query = ManaQuery::compile(Equal, "mmn").unwrap();
        assert_eq!(query.candidate_count(), 20);
        let query = ManaQuery::compile(Equal, "h").unwrap();
        assert_eq!(query.candidate_count(), 10);
        let query = ManaQuery::compile(Equal, "w m").unwrap();
        assert_eq!(query.candidate_count(), 4);
    }

    #[test]
    fn test_invalid_text() {
        assert!(ManaQuery::compile(Equal, "{q}").is_none());
        assert!(ManaQuery::compile(Equal, "2r!").is_none());
        assert!(ManaQuery::compile(Equal, "{2").is_none());
    }
}
