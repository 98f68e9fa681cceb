//! Interpretation of query values: colors, numbers and dates.

use std::cmp::Ordering;

use cardsearch_db::{CardDatabase, Color, ColorSet};
use cardsearch_query::ComparisonOperator;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\d{4}\z").expect("year pattern is valid"));

// ============================================================================
// Colors
// ============================================================================

/// A color value such as `wu`, `m` (multicolored) or `c` (colorless).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColorQuery {
    pub colors: ColorSet,
    pub multicolored: bool,
    pub colorless: bool,
}

impl ColorQuery {
    /// Parses color letters; `None` when a character is not a color code.
    pub fn parse(value: &str) -> Option<ColorQuery> {
        let mut query = ColorQuery {
            colors: ColorSet::EMPTY,
            multicolored: false,
            colorless: false,
        };
        for c in value.trim().to_lowercase().chars() {
            match c {
                'm' => query.multicolored = true,
                'c' => query.colorless = true,
                other => query.colors.insert(Color::from_letter(other)?),
            }
        }
        Some(query)
    }

    /// `c:` semantics: any listed color, or the multicolored/colorless classes.
    pub fn matches_any(&self, colors: ColorSet) -> bool {
        colors.intersects(self.colors)
            || (self.multicolored && colors.len() >= 2)
            || (self.colorless && colors.is_empty())
    }
}

/// Compares two color sets as sets: `=` equality, `>=` superset, `<` strict subset.
pub(crate) fn compare_color_sets(
    operator: ComparisonOperator,
    actual: ColorSet,
    wanted: ColorSet,
) -> bool {
    let superset = wanted.is_subset(actual);
    let subset = actual.is_subset(wanted);
    let equal = actual == wanted;
    match operator {
        ComparisonOperator::Match | ComparisonOperator::Equal => equal,
        ComparisonOperator::GreaterThanOrEqual => superset,
        ComparisonOperator::GreaterThan => superset && !equal,
        ComparisonOperator::LessThanOrEqual => subset,
        ComparisonOperator::LessThan => subset && !equal,
    }
}

// ============================================================================
// Numbers
// ============================================================================

/// Applies `operator` to two floats; NaN never matches.
pub(crate) fn compare_numbers(operator: ComparisonOperator, actual: f64, wanted: f64) -> bool {
    actual
        .partial_cmp(&wanted)
        .is_some_and(|ordering| operator.accepts(ordering))
}

// ============================================================================
// Dates
// ============================================================================

/// A resolved date value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateQuery {
    /// A bare year, compared at year granularity.
    Year(i32),
    /// An exact day.
    Day(NaiveDate),
}

impl DateQuery {
    /// Resolves a year, an explicit date or an edition name.
    ///
    /// `None` when the text resolves to nothing or to several editions.
    pub fn resolve(db: &CardDatabase, value: &str) -> Option<DateQuery> {
        let value = value.trim();
        if YEAR.is_match(value) {
            return value.parse().ok().map(DateQuery::Year);
        }
        db.resolve_time(value).ok().flatten().map(DateQuery::Day)
    }

    /// Whether `date` satisfies `operator` against this value.
    pub fn accepts(&self, operator: ComparisonOperator, date: NaiveDate) -> bool {
        let ordering: Ordering = match self {
            DateQuery::Year(year) => date.year().cmp(year),
            DateQuery::Day(day) => date.cmp(day),
        };
        operator.accepts(ordering)
    }
}
