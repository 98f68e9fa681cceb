//! Configuration for corpus construction.

/// Configuration for building a [`crate::CardDatabase`].
///
/// # Example
///
/// ```rust
/// use cardsearch_db::DatabaseConfig;
///
/// let config = DatabaseConfig::builder()
///     .with_skip_layout("scheme")
///     .with_spelling_suggestions(false)
///     .build();
/// assert!(config.skip_layouts.contains(&"token".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Layouts that are not playable cards and are left out of the corpus.
    pub skip_layouts: Vec<String>,
    /// Build the spelling suggestion cache after construction.
    pub spelling_suggestions: bool,
    /// Minimum Jaro-Winkler similarity for a spelling suggestion.
    pub min_similarity: f64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            skip_layouts: vec!["token".to_string()],
            spelling_suggestions: true,
            min_similarity: 0.85,
        }
    }
}

impl DatabaseConfig {
    /// Creates a new builder starting from the defaults.
    pub fn builder() -> DatabaseConfigBuilder {
        DatabaseConfigBuilder {
            config: DatabaseConfig::default(),
        }
    }
}

/// Builder for DatabaseConfig.
#[derive(Debug, Clone)]
pub struct DatabaseConfigBuilder {
    config: DatabaseConfig,
}

impl DatabaseConfigBuilder {
    /// Adds a layout to skip.
    pub fn with_skip_layout(mut self, layout: &str) -> Self {
        self.config.skip_layouts.push(layout.to_string());
        self
    }

    /// Enables or disables the spelling suggestion cache.
    pub fn with_spelling_suggestions(mut self, enabled: bool) -> Self {
        self.config.spelling_suggestions = enabled;
        self
    }

    /// Sets the minimum similarity for spelling suggestions.
    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.config.min_similarity = min_similarity;
        self
    }

    /// Builds the DatabaseConfig.
    pub fn build(self) -> DatabaseConfig {
        self.config
    }
}
