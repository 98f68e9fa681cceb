//! # cardsearch-engine
//!
//! Query evaluation engine for the card search language.
//!
//! This crate bridges the [`cardsearch-query`] parser and a built
//! [`cardsearch-db`] corpus: a query compiles into a condition tree bound
//! to the corpus and evaluates to the set of matching printings, ordered by
//! the corpus default sort.
//!
//! ## Key Features
//!
//! - **Bitmap evaluation** - Every node yields a roaring bitmap of printings
//! - **Cost-ordered conjunctions** - Cheap precomputed sets narrow the work first
//! - **Configurable caching** - LRU + TTL cache for frequently-used queries
//! - **Optional parallelism** - Enable `parallel` feature for batch evaluation
//!
//! ## Quick Start
//!
//! ```ignore
//! use cardsearch_db::{CardDatabase, RawDatabase};
//! use cardsearch_engine::SearchExecutor;
//!
//! let db = CardDatabase::build(&RawDatabase::from_json_str(&json)?)?;
//! let executor = SearchExecutor::new(&db);
//!
//! let results = executor.execute("t:forest")?;
//! for row in results.rows() {
//!     println!("{} [{}] {}", row.name(), row.set_code(), row.type_line());
//! }
//! for warning in results.warnings() {
//!     eprintln!("warning: {warning}");
//! }
//! ```
//!
//! ## With Configuration
//!
//! ```ignore
//! use cardsearch_engine::{CacheConfig, SearchConfig, SearchExecutor};
//! use std::time::Duration;
//!
//! let config = SearchConfig::builder()
//!     .with_cache(CacheConfig {
//!         max_entries: 10_000,
//!         ttl: Duration::from_secs(300),
//!     })
//!     .with_parallel(true)
//!     .with_max_results(100_000)
//!     .build();
//!
//! let executor = SearchExecutor::with_config(&db, config);
//! ```
//!
//! ## Field Semantics
//!
//! | Field | Example | Meaning |
//! |-------|---------|---------|
//! | name | `bolt` | Stemmed name contains the word |
//! | type | `t:forest` | Card has every type tag |
//! | edition | `e:lea` | Printing is in a resolved set |
//! | color | `c:rg`, `c>=rg` | Any color / set comparison |
//! | identity | `ci:wu` | Identity within the colors |
//! | mana | `mana>=2rr`, `mana=mn` | Multiset comparison, `m`/`n`/`o`/`h` variables |
//! | power | `pow>=2+*` | Number or symbolic value |
//! | print | `print<1995`, `print=m10` | Year, date or edition release |
//! | is | `is:commander` | Boolean property |
//! | alt | `alt:e:lea` | Another printing of the card matches |
//! | part | `part:c:r` | The printing or a sibling face matches |
//!
//! ## Feature Flags
//!
//! - `parallel` - Enables parallel batch execution using rayon
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    cardsearch-engine                         │
//! │                                                              │
//! │  SearchExecutor                                              │
//! │  ├── parse query string → Query (cardsearch-query)           │
//! │  ├── compile AST → Condition (resolves sets, decks, dates)   │
//! │  ├── evaluate Condition → RoaringBitmap of printings         │
//! │  └── order and group rows → SearchResults with stats         │
//! │                                                              │
//! │  Dependencies:                                               │
//! │  ├── cardsearch-query - query parser (AST)                   │
//! │  └── cardsearch-db    - CardDatabase, resolvers, normalizers │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod condition;
mod config;
mod error;
mod executor;
mod result;

// Public re-exports
pub use cache::{normalize_cache_key, CacheStats, CachedSearch, QueryCache};
pub use config::{CacheConfig, SearchConfig, SearchConfigBuilder};
pub use error::{SearchError, SearchResult};
pub use executor::SearchExecutor;
pub use result::{ExecutionStats, ResultRow, SearchResults};

// Re-export commonly used types from dependencies for convenience
pub use cardsearch_db::{CardDatabase, PrintingId};
pub use cardsearch_query::{parse, Query};
