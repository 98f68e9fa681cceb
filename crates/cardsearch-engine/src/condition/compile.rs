//! Compilation of query expressions into conditions.

use std::collections::HashSet;

use cardsearch_db::normalize::{hard_normalize, normalize_name, normalize_text, stemmed_name};
use cardsearch_db::{type_tags, CardDatabase, Frame, Legality, Rarity, SetId, StatValue};
use cardsearch_query::{ComparisonOperator, Field, QueryExpr, Term};
use roaring::RoaringBitmap;
use tracing::debug;

use super::leaf::{CardTest, Flag, PrintingTest, Release, Stat};
use super::mana::ManaQuery;
use super::value::{ColorQuery, DateQuery};
use super::Condition;
use crate::error::{SearchError, SearchResult};

const LEGAL_OR_RESTRICTED: &[Legality] = &[Legality::Legal, Legality::Restricted];
const LEGAL: &[Legality] = &[Legality::Legal];
const BANNED: &[Legality] = &[Legality::Banned];
const RESTRICTED: &[Legality] = &[Legality::Restricted];

/// Compiles `expr` against `db`.
///
/// Date values that resolve to nothing drop their clause and push a
/// warning; values a field cannot interpret at all are errors.
pub(crate) fn compile(
    db: &CardDatabase,
    expr: &QueryExpr,
    warnings: &mut Vec<String>,
) -> SearchResult<Condition> {
    let condition = match expr {
        QueryExpr::Term(term) => compile_term(db, term, warnings)?,
        QueryExpr::And(children) => {
            let mut compiled = children
                .iter()
                .map(|child| compile(db, child, warnings))
                .collect::<SearchResult<Vec<_>>>()?;
            compiled.retain(|child| !matches!(child, Condition::Any));
            compiled.sort_by_key(Condition::cost);
            match compiled.len() {
                0 => Condition::Any,
                1 => compiled.remove(0),
                _ => Condition::And(compiled),
            }
        }
        QueryExpr::Or(children) => Condition::Or(
            children
                .iter()
                .map(|child| compile(db, child, warnings))
                .collect::<SearchResult<Vec<_>>>()?,
        ),
        QueryExpr::Not(inner) => Condition::Not(Box::new(compile(db, inner, warnings)?)),
        QueryExpr::Alt(inner) => Condition::Alt(Box::new(compile(db, inner, warnings)?)),
        QueryExpr::Part(inner) => Condition::Part(Box::new(compile(db, inner, warnings)?)),
    };
    Ok(condition)
}

fn compile_term(
    db: &CardDatabase,
    term: &Term,
    warnings: &mut Vec<String>,
) -> SearchResult<Condition> {
    let Term {
        field,
        operator,
        value,
    } = term;
    let field = *field;
    let operator = *operator;
    let invalid = || SearchError::invalid(field, value);

    let card = |test| Ok(Condition::Card(test));
    let printing = |test| Ok(Condition::Printing(test));

    match field {
        Field::Name => card(CardTest::Name(stemmed_name(value.trim()))),
        Field::ExactName => card(CardTest::ExactName(normalize_name(value))),
        Field::Oracle => card(CardTest::Oracle(normalize_text(value))),
        Field::Flavor => printing(PrintingTest::Flavor(normalize_text(value))),
        Field::Type => {
            let words: Vec<String> = value.split_whitespace().map(str::to_string).collect();
            card(CardTest::Types(type_tags(&words, &[], &[])))
        }
        Field::Edition => Ok(printings_of_sets(db, db.resolve_editions(value))),
        Field::Block => Ok(printings_of_sets(db, db.resolve_blocks(value))),
        Field::SetType => {
            let tag = value.trim().to_lowercase().replace('_', " ");
            let sets = db
                .sets()
                .iter()
                .filter(|set| set.has_type(&tag))
                .map(|set| set.id)
                .collect();
            Ok(printings_of_sets(db, sets))
        }
        Field::Format => card(legality(value, LEGAL_OR_RESTRICTED)),
        Field::Legal => card(legality(value, LEGAL)),
        Field::Banned => card(legality(value, BANNED)),
        Field::Restricted => card(legality(value, RESTRICTED)),
        Field::Artist => printing(PrintingTest::Artist(hard_normalize(value.trim()))),
        Field::Rarity => {
            let rarity = Rarity::from_name(value).ok_or_else(invalid)?;
            printing(PrintingTest::Rarity(operator, rarity))
        }
        Field::Color => {
            let query = ColorQuery::parse(value).ok_or_else(invalid)?;
            card(CardTest::Colors(operator, query))
        }
        Field::ColorIdentity => {
            let query = ColorQuery::parse(value).ok_or_else(invalid)?;
            card(CardTest::ColorIdentity(operator, query))
        }
        Field::ColorIndicator => {
            let query = if value.trim() == "*" {
                None
            } else {
                Some(ColorQuery::parse(value).ok_or_else(invalid)?)
            };
            card(CardTest::ColorIndicator(operator, query))
        }
        Field::Mana => {
            let query = ManaQuery::compile(operator, value).ok_or_else(invalid)?;
            card(CardTest::Mana(query))
        }
        Field::Cmc => {
            let cmc: f64 = value.trim().parse().map_err(|_| invalid())?;
            card(CardTest::Cmc(operator, cmc))
        }
        Field::Power => card(stat(Stat::Power, operator, value)),
        Field::Toughness => card(stat(Stat::Toughness, operator, value)),
        Field::Loyalty => card(stat(Stat::Loyalty, operator, value)),
        Field::Year => {
            let year: i32 = value.trim().parse().map_err(|_| invalid())?;
            printing(PrintingTest::Year(operator, year))
        }
        Field::Print | Field::FirstPrint | Field::LastPrint => {
            let Some(date) = DateQuery::resolve(db, value) else {
                debug!(field = %field, value = %value, "dropping clause with unresolvable date");
                warnings.push(format!("{value} doesn't look like a correct date, ignored"));
                return Ok(Condition::Any);
            };
            match field {
                Field::FirstPrint => card(CardTest::Released(Release::First, operator, date)),
                Field::LastPrint => card(CardTest::Released(Release::Last, operator, date)),
                _ => printing(PrintingTest::Print(operator, date)),
            }
        }
        Field::Frame => {
            let frames = match value.trim().to_lowercase().as_str() {
                "new" => vec![Frame::Modern, Frame::M15],
                other => vec![Frame::from_name(other).ok_or_else(invalid)?],
            };
            printing(PrintingTest::Frame(frames))
        }
        Field::Border => printing(PrintingTest::Border(value.trim().to_lowercase())),
        Field::Game => printing(PrintingTest::Game(value.trim().to_lowercase())),
        Field::Number => {
            if operator.is_equality() {
                printing(PrintingTest::NumberIs(value.trim().to_string()))
            } else {
                let number: u32 = value.trim().parse().map_err(|_| invalid())?;
                printing(PrintingTest::NumberCompare(operator, number))
            }
        }
        Field::Deck => Ok(deck_printings(db, value)),
        Field::Foreign => card(CardTest::Foreign(hard_normalize(value.trim()))),
        Field::Keyword => card(CardTest::Keyword(value.trim().to_string())),
        Field::Layout => card(CardTest::Layout(value.trim().to_string())),
        Field::Is => match Flag::from_name(value).ok_or_else(invalid)? {
            Flag::Card(flag) => card(CardTest::Flag(flag)),
            Flag::Printing(flag) => printing(PrintingTest::Flag(flag)),
        },
    }
}

fn legality(format: &str, accepted: &'static [Legality]) -> CardTest {
    CardTest::Legality {
        format: format.trim().to_lowercase(),
        accepted,
    }
}

fn stat(stat: Stat, operator: ComparisonOperator, value: &str) -> CardTest {
    CardTest::Stat(stat, operator, StatValue::from_query(value))
}

fn printings_of_sets(db: &CardDatabase, sets: Vec<SetId>) -> Condition {
    let printings = sets
        .into_iter()
        .flat_map(|set| db.set(set).printings.iter())
        .map(|printing| printing.raw())
        .collect();
    Condition::Printings(printings)
}

/// Printings sharing set and card with a face of any card in the named decks.
fn deck_printings(db: &CardDatabase, name: &str) -> Condition {
    let wanted: HashSet<_> = db
        .resolve_deck_name(name)
        .into_iter()
        .flat_map(|deck| deck.cards_in_all_zones())
        .flat_map(|(_, physical)| physical.parts.iter())
        .map(|&part| {
            let printing = db.printing(part);
            (printing.set, printing.card)
        })
        .collect();
    let printings: RoaringBitmap = db
        .printings()
        .iter()
        .filter(|printing| wanted.contains(&(printing.set, printing.card)))
        .map(|printing| printing.id.raw())
        .collect();
    Condition::Printings(printings)
}
