//! Search result types.

use std::collections::HashSet;
use std::time::Duration;

use cardsearch_db::{Card, CardDatabase, CardId, CardPrinting, CardSet, PrintingId};
use roaring::RoaringBitmap;

/// Result of a search.
///
/// Rows follow the corpus default order. Without `++` there is one row per
/// card, represented by its first matching printing; with `++` every
/// matching printing is a row.
///
/// # Example
///
/// ```ignore
/// let results = executor.execute("t:forest")?;
///
/// println!("Found {} cards", results.count());
///
/// for row in results.rows() {
///     println!("{} ({})", row.name(), row.set_code());
/// }
/// ```
#[derive(Clone)]
pub struct SearchResults<'a> {
    db: &'a CardDatabase,
    rows: Vec<PrintingId>,
    matched: RoaringBitmap,
    warnings: Vec<String>,
    all_printings: bool,
    /// Execution statistics.
    pub stats: ExecutionStats,
}

impl<'a> SearchResults<'a> {
    /// Orders `matched` and groups it into rows.
    pub(crate) fn new(
        db: &'a CardDatabase,
        matched: RoaringBitmap,
        warnings: Vec<String>,
        all_printings: bool,
        stats: ExecutionStats,
    ) -> Self {
        let ordered = db
            .sorted_printings()
            .iter()
            .copied()
            .filter(|id| matched.contains(id.raw()));
        let rows = if all_printings {
            ordered.collect()
        } else {
            let mut seen: HashSet<CardId> = HashSet::new();
            ordered
                .filter(|id| seen.insert(db.printing(*id).card))
                .collect()
        };
        Self {
            db,
            rows,
            matched,
            warnings,
            all_printings,
            stats,
        }
    }

    /// Number of rows: cards, or printings with `++`.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Number of matching printings regardless of grouping.
    pub fn printing_count(&self) -> usize {
        self.matched.len() as usize
    }

    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the printing matched, even if another printing represents its card.
    pub fn contains(&self, printing: PrintingId) -> bool {
        self.matched.contains(printing.raw())
    }

    /// Whether the all-printings view was requested.
    pub fn all_printings(&self) -> bool {
        self.all_printings
    }

    /// Soft warnings raised while compiling or evaluating the query.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The row printings in order.
    pub fn printing_ids(&self) -> &[PrintingId] {
        &self.rows
    }

    /// The raw set of matching printing indices.
    pub fn matched(&self) -> &RoaringBitmap {
        &self.matched
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = ResultRow<'a>> + '_ {
        self.rows.iter().map(move |&id| ResultRow::new(self.db, id))
    }

    /// Same as [`SearchResults::rows`].
    pub fn iter(&self) -> impl Iterator<Item = ResultRow<'a>> + '_ {
        self.rows()
    }

    /// Card names of the rows in order.
    pub fn card_names(&self) -> Vec<&'a str> {
        self.rows().map(|row| row.card.name.as_str()).collect()
    }

    /// `(card name, set code)` of the rows in order.
    pub fn card_names_and_set_codes(&self) -> Vec<(&'a str, &'a str)> {
        self.rows()
            .map(|row| (row.card.name.as_str(), row.set.code.as_str()))
            .collect()
    }

    /// Every matching printing of the row's card, in order.
    ///
    /// With `++` this is the row printing alone.
    pub fn matching_printings(&self, row: &ResultRow<'_>) -> Vec<PrintingId> {
        if self.all_printings {
            return vec![row.printing.id];
        }
        self.db
            .sorted_printings()
            .iter()
            .copied()
            .filter(|id| {
                self.matched.contains(id.raw()) && self.db.printing(*id).card == row.card.id
            })
            .collect()
    }
}

impl std::fmt::Debug for SearchResults<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchResults")
            .field("rows", &self.rows)
            .field("matched", &self.matched.len())
            .field("warnings", &self.warnings)
            .field("all_printings", &self.all_printings)
            .field("stats", &self.stats)
            .finish()
    }
}

/// One result row: a printing with its card and set.
#[derive(Debug, Clone, Copy)]
pub struct ResultRow<'a> {
    /// The printing.
    pub printing: &'a CardPrinting,
    /// Its card.
    pub card: &'a Card,
    /// Its set.
    pub set: &'a CardSet,
}

impl<'a> ResultRow<'a> {
    fn new(db: &'a CardDatabase, id: PrintingId) -> Self {
        let printing = db.printing(id);
        Self {
            printing,
            card: db.card_of(printing),
            set: db.set_of(printing),
        }
    }

    /// Card name.
    pub fn name(&self) -> &'a str {
        &self.card.name
    }

    /// Set code of the printing.
    pub fn set_code(&self) -> &'a str {
        &self.set.code
    }

    /// Printed type line.
    pub fn type_line(&self) -> &'a str {
        &self.card.type_line
    }

    /// Rules text.
    pub fn text(&self) -> &'a str {
        &self.card.text
    }

    /// Printed mana cost, if any.
    pub fn mana_cost(&self) -> Option<&'a str> {
        self.card.display_mana_cost.as_deref()
    }

    /// Printed power.
    pub fn power(&self) -> Option<&'a str> {
        self.card.display_power.as_deref()
    }

    /// Printed toughness.
    pub fn toughness(&self) -> Option<&'a str> {
        self.card.display_toughness.as_deref()
    }
}

/// Statistics from query execution.
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    /// Total execution duration.
    pub duration: Duration,
    /// Number of printing checks made by leaf predicates.
    pub printings_examined: usize,
    /// Whether the result was served from cache.
    pub cache_hit: bool,
}

impl ExecutionStats {
    /// Creates new execution stats.
    pub fn new(duration: Duration, printings_examined: usize, cache_hit: bool) -> Self {
        Self {
            duration,
            printings_examined,
            cache_hit,
        }
    }
}
