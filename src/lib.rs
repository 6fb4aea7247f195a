//! Catalog Search Server
//!
//! An electrical-supply catalog search service: domain-specific synonym
//! expansion plus an in-memory relevance-scoring pass over a bounded
//! candidate pool, exposed as an HTTP listing API.
//!
//! # Features
//!
//! - **Synonym Expansion**: trade abbreviations, truncated terms, gauge
//!   notation, and decimal/unit spellings all reach the same products
//! - **Reloadable Dictionary**: admin-managed entries merge over the
//!   built-in table and swap in atomically, never disturbing in-flight
//!   queries
//! - **Relevance Ranking**: additive exact/prefix/word scoring over a
//!   bounded pool, deterministic ordering for stable pagination
//! - **Browse Mode**: queryless listings paginate directly in the store
//!
//! # Modules
//!
//! - `types`: Core data structures (Product, ScoredProduct, Page)
//! - `search`: Synonym index, variation expander, query planner, scorer
//! - `store`: Storage capability (predicate AST) and the in-memory store
//! - `catalog`: Listing service, failed-search log, dictionary admin
//! - `validation`: Synonym dictionary validation
//! - `api`: Axum REST endpoints
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use catalog_search::catalog::{CatalogService, ListParams};
//! use catalog_search::search::SynonymIndex;
//! use catalog_search::store::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let catalog = CatalogService::new(store, Arc::new(SynonymIndex::new()));
//!
//! let params = ListParams {
//!     q: Some("cabo 2.5mm".to_string()),
//!     ..ListParams::default()
//! };
//! let page = catalog.list_products(&params).unwrap();
//! println!("{} results", page.meta.total);
//! ```

pub mod api;
pub mod catalog;
pub mod search;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used items at crate root
pub use catalog::{CatalogService, FailedSearch, ListParams};
pub use search::{QueryPlan, RawSynonyms, SynonymIndex};
pub use store::{FetchOptions, OrderBy, Predicate, ProductStore};
pub use types::{AppResult, Page, PageMeta, Product, ProductType, ScoredProduct};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
