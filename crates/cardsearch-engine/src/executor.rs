//! Search executor implementation.

use std::sync::Arc;
use std::time::Instant;

use cardsearch_db::{CardDatabase, PrintingId};
use cardsearch_query::{Query, QueryExpr};
use roaring::RoaringBitmap;
use tracing::{debug, warn};

use crate::cache::{normalize_cache_key, CachedSearch, QueryCache};
use crate::condition::{compile, Evaluator};
use crate::config::SearchConfig;
use crate::error::{SearchError, SearchResult};
use crate::result::{ExecutionStats, SearchResults};

/// Main search engine.
///
/// The executor bridges the query parser (`cardsearch-query`) and a built
/// [`CardDatabase`]. The database is only read, so one executor can serve
/// any number of threads.
///
/// # Example
///
/// ```ignore
/// use cardsearch_engine::SearchExecutor;
///
/// let executor = SearchExecutor::new(&db);
///
/// let results = executor.execute("t:forest e:lea")?;
/// println!("Found {} cards", results.count());
///
/// // Check if one printing matches
/// let is_red = executor.matches(printing_id, "c:r")?;
/// ```
pub struct SearchExecutor<'a> {
    /// The corpus being searched.
    db: &'a CardDatabase,
    /// Executor configuration.
    config: SearchConfig,
    /// Query result cache (optional).
    cache: Option<Arc<QueryCache>>,
}

impl<'a> SearchExecutor<'a> {
    /// Creates a new executor with default configuration.
    pub fn new(db: &'a CardDatabase) -> Self {
        Self {
            db,
            config: SearchConfig::default(),
            cache: None,
        }
    }

    /// Creates an executor with custom configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = SearchConfig::builder()
    ///     .with_cache(CacheConfig::default())
    ///     .with_parallel(true)
    ///     .build();
    ///
    /// let executor = SearchExecutor::with_config(&db, config);
    /// ```
    pub fn with_config(db: &'a CardDatabase, config: SearchConfig) -> Self {
        let cache = config
            .cache
            .as_ref()
            .map(|c| Arc::new(QueryCache::new(c.clone())));
        Self { db, config, cache }
    }

    /// Returns a reference to the cache if enabled.
    pub fn cache(&self) -> Option<&QueryCache> {
        self.cache.as_ref().map(|c| c.as_ref())
    }

    /// Returns a reference to the executor configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the corpus being searched.
    pub fn database(&self) -> &'a CardDatabase {
        self.db
    }

    /// Parses and runs a query.
    ///
    /// If caching is enabled, results are cached under the query text with
    /// whitespace outside quotes normalized.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResults)` - The ordered rows, warnings and execution stats
    /// * `Err(SearchError)` - If parsing fails, a value is invalid or the
    ///   result exceeds `max_results`
    pub fn execute(&self, query: &str) -> SearchResult<SearchResults<'a>> {
        let start = Instant::now();
        let cache_key = normalize_cache_key(query);

        if let Some(cached) = self.cached(&cache_key) {
            return self.finish(cached, start, 0, true);
        }

        let parsed = cardsearch_query::parse(query)?;
        self.run(&parsed, cache_key, start)
    }

    /// Runs a pre-parsed query.
    ///
    /// The cache key is the query's display form, so it shares entries with
    /// [`SearchExecutor::execute`] only when the text was already canonical.
    pub fn execute_query(&self, query: &Query) -> SearchResult<SearchResults<'a>> {
        let start = Instant::now();
        let cache_key = normalize_cache_key(&query.to_string());

        if let Some(cached) = self.cached(&cache_key) {
            return self.finish(cached, start, 0, true);
        }

        self.run(query, cache_key, start)
    }

    /// Runs many queries, one result each.
    ///
    /// A query that fails to parse or evaluate does not affect the others.
    /// With the `parallel` feature and [`SearchConfig::parallel`] set, the
    /// queries run on the rayon thread pool.
    pub fn execute_batch(&self, queries: &[&str]) -> Vec<SearchResult<SearchResults<'a>>> {
        debug!(queries = queries.len(), "executing batch");
        self.run_batch(queries)
    }

    #[cfg(feature = "parallel")]
    fn run_batch(&self, queries: &[&str]) -> Vec<SearchResult<SearchResults<'a>>> {
        use rayon::prelude::*;

        if self.config.parallel {
            queries.par_iter().map(|query| self.execute(query)).collect()
        } else {
            queries.iter().map(|query| self.execute(query)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_batch(&self, queries: &[&str]) -> Vec<SearchResult<SearchResults<'a>>> {
        queries.iter().map(|query| self.execute(query)).collect()
    }

    /// Checks whether one printing matches a query.
    ///
    /// Leaf predicates only examine this printing; the cache is bypassed.
    pub fn matches(&self, printing: PrintingId, query: &str) -> SearchResult<bool> {
        let parsed = cardsearch_query::parse(query)?;
        let mut warnings = Vec::new();
        let condition = compile(self.db, &parsed.expr, &mut warnings)?;
        let mut candidates = RoaringBitmap::new();
        candidates.insert(printing.raw());
        let matched = Evaluator::new(self.db).evaluate_within(&condition, &candidates);
        Ok(matched.contains(printing.raw()))
    }

    fn cached(&self, cache_key: &str) -> Option<CachedSearch> {
        let cached = self.cache.as_ref()?.get(cache_key)?;
        debug!(query = cache_key, "cache hit");
        Some(cached)
    }

    fn run(
        &self,
        query: &Query,
        cache_key: String,
        start: Instant,
    ) -> SearchResult<SearchResults<'a>> {
        let (search, examined) = self.evaluate(query)?;

        if let Some(ref cache) = self.cache {
            cache.set(cache_key, search.clone());
        }

        self.finish(search, start, examined, false)
    }

    /// Compiles and evaluates a query, adding spelling hints when nothing matched.
    fn evaluate(&self, query: &Query) -> SearchResult<(CachedSearch, usize)> {
        let mut warnings = Vec::new();
        let condition = compile(self.db, &query.expr, &mut warnings)?;

        let mut evaluator = Evaluator::new(self.db);
        let matched = evaluator.evaluate(&condition);
        debug!(
            query = %query,
            matched = matched.len(),
            examined = evaluator.examined(),
            "evaluated query"
        );

        if matched.is_empty() {
            warnings.extend(self.spelling_hints(&query.expr));
        }
        for warning in &warnings {
            warn!(query = %query, "{}", warning);
        }

        let search = CachedSearch {
            matched,
            warnings,
            all_printings: query.options.all_printings,
        };
        Ok((search, evaluator.examined()))
    }

    fn spelling_hints(&self, expr: &QueryExpr) -> Vec<String> {
        let mut hints: Vec<String> = Vec::new();
        for word in expr.name_words().iter().flat_map(|value| value.split_whitespace()) {
            if let Some(suggestion) = self.db.suggest_spelling(word) {
                let hint = format!("Did you mean {suggestion}?");
                if !hints.contains(&hint) {
                    hints.push(hint);
                }
            }
        }
        hints
    }

    fn finish(
        &self,
        search: CachedSearch,
        start: Instant,
        examined: usize,
        cache_hit: bool,
    ) -> SearchResult<SearchResults<'a>> {
        if let Some(limit) = self.config.max_results {
            let count = search.matched.len() as usize;
            if count > limit {
                return Err(SearchError::ResultTooLarge { count, limit });
            }
        }
        let stats = ExecutionStats::new(start.elapsed(), examined, cache_hit);
        Ok(SearchResults::new(
            self.db,
            search.matched,
            search.warnings,
            search.all_printings,
            stats,
        ))
    }
}

impl std::fmt::Debug for SearchExecutor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchExecutor")
            .field("printings", &self.db.number_of_printings())
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish()
    }
}
