//! Compiled query conditions and their evaluation.
//!
//! A [`QueryExpr`](cardsearch_query::QueryExpr) compiles to a [`Condition`]
//! tree bound to one database. Evaluation produces a [`RoaringBitmap`] of
//! printing indices; every node receives the candidate set still alive
//! and returns the subset it accepts, so conjunctions narrow the work for
//! later children.

mod compile;
mod leaf;
mod mana;
mod value;

use std::collections::HashMap;

use cardsearch_db::{CardDatabase, CardId};
use roaring::RoaringBitmap;

pub(crate) use compile::compile;
use leaf::{CardTest, PrintingTest};

/// Cost for nodes that rescan the whole corpus.
const RELATIONAL_COST: u32 = 10;

/// A compiled condition.
#[derive(Debug, Clone)]
pub(crate) enum Condition {
    /// Accepts everything; produced for clauses dropped with a warning.
    Any,
    /// Precomputed set of printings (editions, blocks, decks).
    Printings(RoaringBitmap),
    Card(CardTest),
    Printing(PrintingTest),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
    /// Some other printing of the same card matches.
    Alt(Box<Condition>),
    /// The printing or a sibling-face printing matches.
    Part(Box<Condition>),
}

impl Condition {
    /// Relative evaluation cost, used to order conjunctions.
    pub fn cost(&self) -> u32 {
        match self {
            Condition::Any | Condition::Printings(_) => 0,
            Condition::Card(_) => 1,
            Condition::Printing(_) => 2,
            Condition::And(children) | Condition::Or(children) => {
                children.iter().map(Condition::cost).max().unwrap_or(0) + 1
            }
            Condition::Not(inner) => inner.cost() + 1,
            Condition::Alt(_) | Condition::Part(_) => RELATIONAL_COST,
        }
    }
}

/// Evaluates conditions against one database, counting the printings examined.
pub(crate) struct Evaluator<'a> {
    db: &'a CardDatabase,
    universe: RoaringBitmap,
    examined: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(db: &'a CardDatabase) -> Self {
        let universe = (0..db.number_of_printings() as u32).collect();
        Self {
            db,
            universe,
            examined: 0,
        }
    }

    /// Number of printing checks performed by leaf predicates so far.
    pub fn examined(&self) -> usize {
        self.examined
    }

    /// Matching printings over the whole corpus.
    pub fn evaluate(&mut self, condition: &Condition) -> RoaringBitmap {
        let universe = self.universe.clone();
        self.eval(condition, &universe)
    }

    /// Matching printings among `candidates`.
    ///
    /// `alt:` and `part:` still look at the whole corpus for related printings.
    pub fn evaluate_within(
        &mut self,
        condition: &Condition,
        candidates: &RoaringBitmap,
    ) -> RoaringBitmap {
        self.eval(condition, candidates)
    }

    fn eval(&mut self, condition: &Condition, candidates: &RoaringBitmap) -> RoaringBitmap {
        match condition {
            Condition::Any => candidates.clone(),
            Condition::Printings(set) => candidates & set,
            Condition::Card(test) => self.eval_card(test, candidates),
            Condition::Printing(test) => {
                self.examined += candidates.len() as usize;
                let printings = self.db.printings();
                candidates
                    .iter()
                    .filter(|&index| test.matches(self.db, &printings[index as usize]))
                    .collect()
            }
            Condition::And(children) => {
                let mut alive = candidates.clone();
                for child in children {
                    if alive.is_empty() {
                        break;
                    }
                    alive = self.eval(child, &alive);
                }
                alive
            }
            Condition::Or(children) => {
                let mut matched = RoaringBitmap::new();
                let mut remaining = candidates.clone();
                for child in children {
                    if remaining.is_empty() {
                        break;
                    }
                    let hits = self.eval(child, &remaining);
                    remaining -= &hits;
                    matched |= hits;
                }
                matched
            }
            Condition::Not(inner) => candidates - self.eval(inner, candidates),
            Condition::Alt(inner) => {
                let universe = self.universe.clone();
                let inner = self.eval(inner, &universe);
                self.eval_alt(&inner, candidates)
            }
            Condition::Part(inner) => {
                let universe = self.universe.clone();
                let inner = self.eval(inner, &universe);
                let printings = self.db.printings();
                candidates
                    .iter()
                    .filter(|&index| {
                        inner.contains(index)
                            || printings[index as usize]
                                .others
                                .iter()
                                .any(|other| inner.contains(other.raw()))
                    })
                    .collect()
            }
        }
    }

    fn eval_card(&mut self, test: &CardTest, candidates: &RoaringBitmap) -> RoaringBitmap {
        self.examined += candidates.len() as usize;
        let printings = self.db.printings();
        let mut verdicts: HashMap<CardId, bool> = HashMap::new();
        candidates
            .iter()
            .filter(|&index| {
                let card = printings[index as usize].card;
                *verdicts
                    .entry(card)
                    .or_insert_with(|| test.matches(self.db.card(card)))
            })
            .collect()
    }

    fn eval_alt(&self, inner: &RoaringBitmap, candidates: &RoaringBitmap) -> RoaringBitmap {
        let printings = self.db.printings();
        candidates
            .iter()
            .filter(|&index| {
                let card = self.db.card(printings[index as usize].card);
                card.printings
                    .iter()
                    .any(|other| other.raw() != index && inner.contains(other.raw()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaf::{CardFlag, PrintingFlag};

    #[test]
    fn test_cost_ordering() {
        let precomputed = Condition::Printings(RoaringBitmap::new());
        let card = Condition::Card(CardTest::Flag(CardFlag::Reserved));
        let printing = Condition::Printing(PrintingTest::Flag(PrintingFlag::Promo));
        assert!(precomputed.cost() < card.cost());
        assert!(card.cost() < printing.cost());

        let compound = Condition::And(vec![card.clone(), printing.clone()]);
        assert_eq!(compound.cost(), 3);
        assert_eq!(Condition::Not(Box::new(card.clone())).cost(), 2);
        assert_eq!(Condition::Alt(Box::new(card)).cost(), RELATIONAL_COST);
        assert_eq!(Condition::Or(vec![]).cost(), 1);
    }
}
