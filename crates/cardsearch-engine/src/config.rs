//! Configuration types for the search executor.

use std::time::Duration;

/// Configuration for the search executor.
///
/// # Example
///
/// ```rust
/// use cardsearch_engine::{CacheConfig, SearchConfig};
///
/// let config = SearchConfig::builder()
///     .with_cache(CacheConfig::default())
///     .with_parallel(true)
///     .with_max_results(5_000)
///     .build();
/// assert!(config.cache.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Cache configuration (None = caching disabled).
    pub cache: Option<CacheConfig>,
    /// Evaluate batches in parallel (requires the `parallel` feature).
    pub parallel: bool,
    /// Maximum number of matching printings (None = unlimited).
    pub max_results: Option<usize>,
}

impl SearchConfig {
    /// Creates a new builder for SearchConfig.
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

/// Builder for SearchConfig.
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    cache: Option<CacheConfig>,
    parallel: bool,
    max_results: Option<usize>,
}

impl SearchConfigBuilder {
    /// Enables caching with the given configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Enables or disables parallel batch evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the maximum number of matching printings.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Builds the SearchConfig.
    pub fn build(self) -> SearchConfig {
        SearchConfig {
            cache: self.cache,
            parallel: self.parallel,
            max_results: self.max_results,
        }
    }
}

/// Configuration for the query result cache.
///
/// # Example
///
/// ```rust
/// use cardsearch_engine::CacheConfig;
/// use std::time::Duration;
///
/// let cache = CacheConfig {
///     max_entries: 1_000,
///     ttl: Duration::from_secs(60),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached query results.
    pub max_entries: usize,
    /// Time-to-live for cached entries.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(300),
        }
    }
}
