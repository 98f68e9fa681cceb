//! # cardsearch-query
//!
//! Parser for the card search query language.
//!
//! A query is a list of terms combined by implicit AND, explicit `OR`,
//! prefix negation (`-` or `not`) and parenthesized grouping. Each term is
//! either free text matched against card names or a `field:value` /
//! `field<op>value` predicate.
//!
//! ## Usage
//!
//! ```rust
//! use cardsearch_query::{parse, ComparisonOperator, Field, QueryExpr, Term};
//!
//! let query = parse("t:dragon cmc>=5").unwrap();
//! assert_eq!(
//!     query.expr,
//!     QueryExpr::And(vec![
//!         QueryExpr::Term(Term::matching(Field::Type, "dragon")),
//!         QueryExpr::Term(Term::new(Field::Cmc, ComparisonOperator::GreaterThanOrEqual, "5")),
//!     ])
//! );
//! ```
//!
//! ## Syntax Quick Reference
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | word | Name contains word | `goblin` |
//! | `"..."` | Name contains phrase | `"serra angel"` |
//! | `!name` | Exact card name | `!Lightning Bolt` |
//! | `field:value` | Field matches | `t:dragon` |
//! | `field<op>value` | Comparison (`=`, `<`, `<=`, `>`, `>=`) | `pow>=5` |
//! | `a,b` | Any of the values | `e:lea,leb` |
//! | `-x`, `not x` | Negation | `-is:funny` |
//! | `x OR y` | Disjunction | `c:r OR c:g` |
//! | `alt:x` | Another printing matches | `alt:(e:lea)` |
//! | `part:x` | A face of the card matches | `part:(c:r)` |
//! | `++` | List every printing | `++ t:forest` |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod ast;
mod error;
mod parser;

pub use ast::{ComparisonOperator, Field, Query, QueryExpr, QueryOptions, Term};
pub use error::{QueryError, QueryResult};
pub use parser::parse;
