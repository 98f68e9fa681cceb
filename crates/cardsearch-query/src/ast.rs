//! Abstract Syntax Tree types for card queries.

use std::fmt;

/// Comparison operators for field terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComparisonOperator {
    /// Field match: `:`
    Match,
    /// Equal: `=`
    Equal,
    /// Less than: `<`
    LessThan,
    /// Less than or equal: `<=`
    LessThanOrEqual,
    /// Greater than: `>`
    GreaterThan,
    /// Greater than or equal: `>=`
    GreaterThanOrEqual,
}

impl ComparisonOperator {
    /// Returns true for `:` and `=`.
    pub fn is_equality(&self) -> bool {
        matches!(self, ComparisonOperator::Match | ComparisonOperator::Equal)
    }

    /// Evaluates the operator against an ordering of `lhs` relative to `rhs`.
    pub fn accepts(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            ComparisonOperator::Match | ComparisonOperator::Equal => ordering == Equal,
            ComparisonOperator::LessThan => ordering == Less,
            ComparisonOperator::LessThanOrEqual => ordering != Greater,
            ComparisonOperator::GreaterThan => ordering == Greater,
            ComparisonOperator::GreaterThanOrEqual => ordering != Less,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOperator::Match => write!(f, ":"),
            ComparisonOperator::Equal => write!(f, "="),
            ComparisonOperator::LessThan => write!(f, "<"),
            ComparisonOperator::LessThanOrEqual => write!(f, "<="),
            ComparisonOperator::GreaterThan => write!(f, ">"),
            ComparisonOperator::GreaterThanOrEqual => write!(f, ">="),
        }
    }
}

/// Searchable fields.
///
/// Free text words parse to [`Field::Name`]; `!name` parses to
/// [`Field::ExactName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Field {
    /// Card name substring, stemmed.
    Name,
    /// Exact card name.
    ExactName,
    /// Rules text.
    Oracle,
    /// Flavor text.
    Flavor,
    /// Type line tags.
    Type,
    /// Set (edition).
    Edition,
    /// Block.
    Block,
    /// Set type tag.
    SetType,
    /// Legal or restricted in a format.
    Format,
    /// Legal in a format.
    Legal,
    /// Banned in a format.
    Banned,
    /// Restricted in a format.
    Restricted,
    /// Artist name.
    Artist,
    /// Printing rarity.
    Rarity,
    /// Card colors.
    Color,
    /// Color identity.
    ColorIdentity,
    /// Color indicator.
    ColorIndicator,
    /// Mana cost multiset.
    Mana,
    /// Converted mana cost.
    Cmc,
    /// Power.
    Power,
    /// Toughness.
    Toughness,
    /// Loyalty.
    Loyalty,
    /// Release year of the printing.
    Year,
    /// Release date of the printing.
    Print,
    /// First release date of the card.
    FirstPrint,
    /// Last release date of the card.
    LastPrint,
    /// Frame style.
    Frame,
    /// Border color.
    Border,
    /// Game availability (paper, mtgo, arena, shandalar).
    Game,
    /// Collector number.
    Number,
    /// Preconstructed deck.
    Deck,
    /// Foreign-language name.
    Foreign,
    /// Keyword ability.
    Keyword,
    /// Card layout.
    Layout,
    /// Boolean property (`is:`).
    Is,
}

impl Field {
    /// Looks up a field by name or alias, case-insensitively.
    pub fn from_name(name: &str) -> Option<Field> {
        let field = match name.to_ascii_lowercase().as_str() {
            "n" | "name" => Field::Name,
            "o" | "oracle" => Field::Oracle,
            "ft" | "flavor" => Field::Flavor,
            "t" | "type" => Field::Type,
            "e" | "set" | "edition" => Field::Edition,
            "b" | "block" => Field::Block,
            "st" | "settype" => Field::SetType,
            "f" | "format" => Field::Format,
            "legal" => Field::Legal,
            "banned" => Field::Banned,
            "restricted" => Field::Restricted,
            "a" | "artist" => Field::Artist,
            "r" | "rarity" => Field::Rarity,
            "c" | "color" => Field::Color,
            "ci" | "id" | "identity" => Field::ColorIdentity,
            "ind" | "indicator" => Field::ColorIndicator,
            "mana" => Field::Mana,
            "cmc" => Field::Cmc,
            "pow" | "power" => Field::Power,
            "tou" | "toughness" => Field::Toughness,
            "loy" | "loyalty" => Field::Loyalty,
            "year" => Field::Year,
            "print" => Field::Print,
            "firstprint" => Field::FirstPrint,
            "lastprint" => Field::LastPrint,
            "frame" => Field::Frame,
            "border" => Field::Border,
            "game" => Field::Game,
            "number" => Field::Number,
            "deck" => Field::Deck,
            "fn" | "foreign" => Field::Foreign,
            "keyword" => Field::Keyword,
            "layout" => Field::Layout,
            "is" => Field::Is,
            _ => return None,
        };
        Some(field)
    }

    /// Canonical name used when displaying a term.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Name => "n",
            Field::ExactName => "!",
            Field::Oracle => "o",
            Field::Flavor => "ft",
            Field::Type => "t",
            Field::Edition => "e",
            Field::Block => "b",
            Field::SetType => "st",
            Field::Format => "f",
            Field::Legal => "legal",
            Field::Banned => "banned",
            Field::Restricted => "restricted",
            Field::Artist => "a",
            Field::Rarity => "r",
            Field::Color => "c",
            Field::ColorIdentity => "ci",
            Field::ColorIndicator => "ind",
            Field::Mana => "mana",
            Field::Cmc => "cmc",
            Field::Power => "pow",
            Field::Toughness => "tou",
            Field::Loyalty => "loy",
            Field::Year => "year",
            Field::Print => "print",
            Field::FirstPrint => "firstprint",
            Field::LastPrint => "lastprint",
            Field::Frame => "frame",
            Field::Border => "border",
            Field::Game => "game",
            Field::Number => "number",
            Field::Deck => "deck",
            Field::Foreign => "fn",
            Field::Keyword => "keyword",
            Field::Layout => "layout",
            Field::Is => "is",
        }
    }

    /// Whether an unquoted comma-separated value expands into an OR.
    pub fn accepts_value_list(&self) -> bool {
        matches!(
            self,
            Field::Type
                | Field::Edition
                | Field::Block
                | Field::SetType
                | Field::Format
                | Field::Legal
                | Field::Banned
                | Field::Restricted
                | Field::Rarity
                | Field::Frame
                | Field::Border
                | Field::Game
                | Field::Layout
                | Field::Is
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single `field op value` predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    /// The field being tested.
    pub field: Field,
    /// The comparison operator.
    pub operator: ComparisonOperator,
    /// The raw value text, unquoted.
    pub value: String,
}

impl Term {
    /// Creates a term.
    pub fn new(field: Field, operator: ComparisonOperator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    /// A `field:value` term.
    pub fn matching(field: Field, value: impl Into<String>) -> Self {
        Self::new(field, ComparisonOperator::Match, value)
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | ',' | ':'))
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if needs_quotes(value) {
        write!(f, "\"{}\"", value)
    } else {
        f.write_str(value)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Field::ExactName => write!(f, "!\"{}\"", self.value),
            Field::Name if self.operator == ComparisonOperator::Match => {
                if self.value.eq_ignore_ascii_case("or") || self.value.eq_ignore_ascii_case("not")
                {
                    write!(f, "\"{}\"", self.value)
                } else {
                    write_value(f, &self.value)
                }
            }
            _ => {
                write!(f, "{}{}", self.field, self.operator)?;
                write_value(f, &self.value)
            }
        }
    }
}

/// A query expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryExpr {
    /// A single field predicate.
    Term(Term),
    /// All children must match.
    And(Vec<QueryExpr>),
    /// At least one child must match.
    Or(Vec<QueryExpr>),
    /// The child must not match.
    Not(Box<QueryExpr>),
    /// Some other printing of the same card matches.
    Alt(Box<QueryExpr>),
    /// The printing or one of its sibling-face printings matches.
    Part(Box<QueryExpr>),
}

impl QueryExpr {
    /// Builds a conjunction, flattening nested `And`s and collapsing a single child.
    pub fn and(children: Vec<QueryExpr>) -> QueryExpr {
        Self::flatten(children, true)
    }

    /// Builds a disjunction, flattening nested `Or`s and collapsing a single child.
    pub fn or(children: Vec<QueryExpr>) -> QueryExpr {
        Self::flatten(children, false)
    }

    fn flatten(children: Vec<QueryExpr>, conjunction: bool) -> QueryExpr {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child {
                QueryExpr::And(inner) if conjunction => flat.extend(inner),
                QueryExpr::Or(inner) if !conjunction => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            return flat.remove(0);
        }
        if conjunction {
            QueryExpr::And(flat)
        } else {
            QueryExpr::Or(flat)
        }
    }

    /// Visits every term in the tree, depth first.
    pub fn for_each_term<'a>(&'a self, visit: &mut impl FnMut(&'a Term)) {
        match self {
            QueryExpr::Term(term) => visit(term),
            QueryExpr::And(children) | QueryExpr::Or(children) => {
                for child in children {
                    child.for_each_term(visit);
                }
            }
            QueryExpr::Not(inner) | QueryExpr::Alt(inner) | QueryExpr::Part(inner) => {
                inner.for_each_term(visit)
            }
        }
    }

    /// Collects the values of free-text name terms, used for spelling suggestions.
    pub fn name_words(&self) -> Vec<&str> {
        let mut words = Vec::new();
        self.for_each_term(&mut |term| {
            if term.field == Field::Name {
                words.push(term.value.as_str());
            }
        });
        words
    }

    fn is_compound(&self) -> bool {
        matches!(self, QueryExpr::And(_) | QueryExpr::Or(_))
    }

    fn fmt_grouped(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_compound() {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryExpr::Term(term) => write!(f, "{}", term),
            QueryExpr::And(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    if matches!(child, QueryExpr::Or(_)) {
                        write!(f, "({})", child)?;
                    } else {
                        write!(f, "{}", child)?;
                    }
                }
                Ok(())
            }
            QueryExpr::Or(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " OR ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            QueryExpr::Not(inner) => {
                write!(f, "-")?;
                inner.fmt_grouped(f)
            }
            QueryExpr::Alt(inner) => {
                write!(f, "alt:")?;
                inner.fmt_grouped(f)
            }
            QueryExpr::Part(inner) => {
                write!(f, "part:")?;
                inner.fmt_grouped(f)
            }
        }
    }
}

/// Query-wide options set by directives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryOptions {
    /// `++`: list every matching printing instead of one row per card.
    pub all_printings: bool,
}

/// A parsed query: an expression plus directives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    /// The boolean expression.
    pub expr: QueryExpr,
    /// Directive options.
    pub options: QueryOptions,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.options.all_printings {
            write!(f, "++ ")?;
        }
        write!(f, "{}", self.expr)
    }
}
