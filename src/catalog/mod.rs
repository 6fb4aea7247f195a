//! Catalog service: the listing engine over the store and synonym index
//!
//! Owns the shared synonym index (explicitly injected, never global state)
//! and the failed-search log, and exposes the listing, dictionary, and
//! admin operations the API layer calls.

mod failed;
mod listing;

pub use failed::{FailedSearch, FailedSearchLog};
pub use listing::POOL_LIMIT;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::search::{builtin_table, RawSynonyms, SynonymIndex};
use crate::store::{FetchOptions, OrderBy, Predicate, ProductStore};
use crate::types::{AppResult, Page, Product, ProductType, ScoredProduct};

/// Listing request, already parsed and typed
#[derive(Debug, Clone)]
pub struct ListParams {
    pub q: Option<String>,
    pub page: usize,
    pub limit: usize,
    pub category: Option<String>,
    pub order_by: OrderBy,
    pub product_type: Option<ProductType>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            q: None,
            page: 1,
            limit: 20,
            category: None,
            order_by: OrderBy::default(),
            product_type: None,
        }
    }
}

/// Catalog service over an injected store and synonym index
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
    synonyms: Arc<SynonymIndex>,
    failed_searches: FailedSearchLog,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>, synonyms: Arc<SynonymIndex>) -> Self {
        Self {
            store,
            synonyms,
            failed_searches: FailedSearchLog::new(),
        }
    }

    /// List products: search mode when the query has terms, browse mode
    /// otherwise
    pub fn list_products(&self, params: &ListParams) -> AppResult<Page<ScoredProduct>> {
        listing::list_products(self, params)
    }

    /// Look up a single product by its numeric code
    pub fn get_product(&self, code: i64) -> AppResult<Option<Product>> {
        let mut found = self
            .store
            .fetch(&Predicate::CodeEquals(code), &FetchOptions::pool(1))?;
        Ok(found.pop())
    }

    /// The current dictionary, sorted by term for a stable listing
    pub fn synonym_table(&self) -> BTreeMap<String, Vec<String>> {
        self.synonyms
            .snapshot()
            .raw_table()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Merge admin-managed entries over the built-in dictionary and reload
    /// the index atomically. Returns the merged term count. A table that
    /// fails validation leaves the current index untouched.
    pub fn update_synonyms(&self, overrides: &RawSynonyms) -> AppResult<usize> {
        let mut merged = builtin_table();
        for (term, synonyms) in overrides {
            merged.insert(term.clone(), synonyms.clone());
        }

        self.synonyms.reload(&merged)?;
        Ok(merged.len())
    }

    /// One page of recorded failed searches, newest first
    pub fn failed_searches(&self, page: usize, limit: usize) -> (Vec<FailedSearch>, usize) {
        self.failed_searches.page(page, limit)
    }

    pub(crate) fn store(&self) -> &dyn ProductStore {
        self.store.as_ref()
    }

    pub(crate) fn synonyms(&self) -> &SynonymIndex {
        &self.synonyms
    }

    pub(crate) fn failed_log(&self) -> &FailedSearchLog {
        &self.failed_searches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn material(name: &str, code: i64, price: f64) -> Product {
        let mut p = Product::new(format!("id-{code}"), code, name.to_string());
        p.price = price;
        p
    }

    fn service(name: &str, code: i64) -> Product {
        let mut p = material(name, code, 0.0);
        p.product_type = ProductType::Service;
        p
    }

    fn catalog(products: Vec<Product>) -> CatalogService {
        CatalogService::new(
            Arc::new(MemoryStore::from_products(products)),
            Arc::new(SynonymIndex::new()),
        )
    }

    #[test]
    fn test_browse_hides_zero_price_materials_keeps_services() {
        let svc = catalog(vec![
            material("CABO COM PRECO", 1, 9.9),
            material("CABO SEM PRECO", 2, 0.0),
            service("INSTALACAO DE TOMADA", 3),
        ]);

        let page = svc.list_products(&ListParams::default()).unwrap();
        let names: Vec<&str> = page.data.iter().map(|s| s.product.name.as_str()).collect();
        assert_eq!(page.meta.total, 2);
        assert!(names.contains(&"CABO COM PRECO"));
        assert!(names.contains(&"INSTALACAO DE TOMADA"));
        assert!(!names.contains(&"CABO SEM PRECO"));
    }

    #[test]
    fn test_type_filter_narrows() {
        let svc = catalog(vec![
            material("CABO", 1, 9.9),
            service("INSTALACAO", 2),
        ]);

        let params = ListParams {
            product_type: Some(ProductType::Service),
            ..ListParams::default()
        };
        let page = svc.list_products(&params).unwrap();
        assert_eq!(page.meta.total, 1);
        assert_eq!(page.data[0].product.name, "INSTALACAO");
    }

    #[test]
    fn test_unavailable_products_hidden() {
        let mut hidden = material("CABO OCULTO", 1, 5.0);
        hidden.is_available = false;
        let svc = catalog(vec![hidden, material("CABO VISIVEL", 2, 5.0)]);

        let page = svc.list_products(&ListParams::default()).unwrap();
        assert_eq!(page.meta.total, 1);
        assert_eq!(page.data[0].product.name, "CABO VISIVEL");
    }

    #[test]
    fn test_category_filter_multi_value() {
        let mut a = material("CABO", 1, 5.0);
        a.category = Some("FIOS".to_string());
        let mut b = material("DISJUNTOR", 2, 5.0);
        b.category = Some("DISJUNTORES".to_string());
        let mut c = material("TOMADA", 3, 5.0);
        c.category = Some("TOMADAS".to_string());
        let svc = catalog(vec![a, b, c]);

        let params = ListParams {
            category: Some("fios, disjuntores".to_string()),
            ..ListParams::default()
        };
        let page = svc.list_products(&params).unwrap();
        assert_eq!(page.meta.total, 2);
    }

    #[test]
    fn test_search_mode_ranks_and_scores() {
        let svc = catalog(vec![
            material("CABO FLEXIVEL 2,5", 1, 5.0),
            material("CABO", 2, 5.0),
            material("ADAPTADOR CABO", 3, 5.0),
        ]);

        let params = ListParams {
            q: Some("cabo".to_string()),
            ..ListParams::default()
        };
        let page = svc.list_products(&params).unwrap();

        assert_eq!(page.meta.total, 3);
        assert_eq!(page.data[0].product.name, "CABO");
        assert_eq!(page.data[0].score, 350);
        assert!(page.data.iter().all(|s| s.score > 0));
    }

    #[test]
    fn test_search_via_synonym_dictionary() {
        // Built-in dictionary: FIO <-> CABO
        let svc = catalog(vec![material("CABO PP 3X1,5", 1, 5.0)]);

        let params = ListParams {
            q: Some("fio".to_string()),
            ..ListParams::default()
        };
        let page = svc.list_products(&params).unwrap();
        assert_eq!(page.meta.total, 1);
    }

    #[test]
    fn test_search_out_of_range_page_is_empty() {
        let svc = catalog(vec![material("CABO", 1, 5.0)]);

        let params = ListParams {
            q: Some("cabo".to_string()),
            page: 9,
            ..ListParams::default()
        };
        let page = svc.list_products(&params).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total, 1);
        assert_eq!(page.meta.page, 9);
    }

    #[test]
    fn test_failed_search_recorded_only_for_long_zero_result_queries() {
        let svc = catalog(vec![material("CABO", 1, 5.0)]);

        let miss = ListParams {
            q: Some("inexistente".to_string()),
            ..ListParams::default()
        };
        svc.list_products(&miss).unwrap();

        let short_miss = ListParams {
            q: Some("zz".to_string()),
            ..ListParams::default()
        };
        svc.list_products(&short_miss).unwrap();

        let hit = ListParams {
            q: Some("cabo".to_string()),
            ..ListParams::default()
        };
        svc.list_products(&hit).unwrap();

        let (entries, total) = svc.failed_searches(1, 10);
        assert_eq!(total, 1);
        assert_eq!(entries[0].query, "inexistente");
    }

    #[test]
    fn test_update_synonyms_changes_search_behavior() {
        let svc = catalog(vec![material("GERADOR PORTATIL", 1, 5.0)]);

        let miss = ListParams {
            q: Some("motor".to_string()),
            ..ListParams::default()
        };
        assert_eq!(svc.list_products(&miss).unwrap().meta.total, 0);

        let mut overrides = RawSynonyms::new();
        overrides.insert("GERADOR".to_string(), vec!["MOTOR".to_string()]);
        svc.update_synonyms(&overrides).unwrap();

        assert_eq!(svc.list_products(&miss).unwrap().meta.total, 1);
    }

    #[test]
    fn test_update_synonyms_rejects_bad_table() {
        let svc = catalog(vec![material("CABO", 1, 5.0)]);

        let mut bad = RawSynonyms::new();
        bad.insert("GERADOR".to_string(), vec![]);
        assert!(svc.update_synonyms(&bad).is_err());

        // Built-in dictionary still in effect
        let params = ListParams {
            q: Some("fio".to_string()),
            ..ListParams::default()
        };
        assert_eq!(svc.list_products(&params).unwrap().meta.total, 1);
    }

    #[test]
    fn test_get_product_by_code() {
        let svc = catalog(vec![material("CABO", 4518, 5.0)]);
        assert!(svc.get_product(4518).unwrap().is_some());
        assert!(svc.get_product(9999).unwrap().is_none());
    }

    #[test]
    fn test_explicit_price_sort_overrides_relevance() {
        let mut cheap = material("CABO BARATO", 1, 1.0);
        cheap.popularity = 0.0;
        let mut exact = material("CABO", 2, 9.0);
        exact.popularity = 10.0;
        let svc = catalog(vec![cheap, exact]);

        let params = ListParams {
            q: Some("cabo".to_string()),
            order_by: OrderBy::PriceAsc,
            ..ListParams::default()
        };
        let page = svc.list_products(&params).unwrap();
        assert_eq!(page.data[0].product.name, "CABO BARATO");
        // Explicit sorts skip scoring entirely
        assert!(page.data.iter().all(|s| s.score == 0));
    }
}
