//! In-memory product store backed by a JSONL catalog file

use std::cmp::Ordering;
use std::env;
use std::fs;
use std::path::Path;

use parking_lot::RwLock;

use super::{FetchOptions, OrderBy, Predicate, ProductStore};
use crate::types::{AppResult, Product};

/// In-memory store. Products load once from the catalog file; reads take a
/// shared lock and evaluate predicates linearly.
pub struct MemoryStore {
    catalog_file_path: String,
    products: RwLock<Vec<Product>>,
}

impl MemoryStore {
    /// Create a store, loading the catalog from `CATALOG_FILE_PATH` (or
    /// `catalog.jsonl` in the working directory)
    pub fn new() -> Self {
        let current_dir = env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
        let default_catalog_path = current_dir.join("catalog.jsonl");

        let catalog_file_path = match env::var("CATALOG_FILE_PATH") {
            Ok(path) => {
                if Path::new(&path).is_absolute() {
                    path
                } else {
                    current_dir.join(path).to_string_lossy().to_string()
                }
            }
            Err(_) => default_catalog_path.to_string_lossy().to_string(),
        };

        let products = Self::load_catalog_from_file(&catalog_file_path).unwrap_or_default();

        Self {
            catalog_file_path,
            products: RwLock::new(products),
        }
    }

    /// Create a store loading from an explicit catalog file
    pub fn with_file_path(file_path: String) -> Self {
        let products = Self::load_catalog_from_file(&file_path).unwrap_or_default();
        Self {
            catalog_file_path: file_path,
            products: RwLock::new(products),
        }
    }

    /// Create a store over an in-memory product list
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            catalog_file_path: String::new(),
            products: RwLock::new(products),
        }
    }

    /// Load catalog from file (one JSON product per line; malformed lines
    /// and nameless products are skipped)
    fn load_catalog_from_file(file_path: &str) -> AppResult<Vec<Product>> {
        if !Path::new(file_path).exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(file_path)?;
        let mut products = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Ok(product) = serde_json::from_str::<Product>(line) {
                if !product.name.is_empty() {
                    products.push(product);
                }
            }
        }

        Ok(products)
    }

    /// Get the catalog file path
    pub fn file_path(&self) -> &str {
        &self.catalog_file_path
    }

    /// Number of loaded products
    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Store-level ordering. Relevance has no meaning here; it falls back to the
/// popularity ordering, and the search path re-ranks in memory.
fn compare(order_by: OrderBy, a: &Product, b: &Product) -> Ordering {
    let by_name = |a: &Product, b: &Product| a.name.to_uppercase().cmp(&b.name.to_uppercase());
    match order_by {
        OrderBy::Popularity | OrderBy::Relevance => b
            .popularity
            .total_cmp(&a.popularity)
            .then_with(|| by_name(a, b)),
        OrderBy::PriceAsc => a.price.total_cmp(&b.price).then_with(|| by_name(a, b)),
        OrderBy::PriceDesc => b.price.total_cmp(&a.price).then_with(|| by_name(a, b)),
        OrderBy::NameAsc => by_name(a, b),
        OrderBy::NameDesc => by_name(b, a),
    }
}

impl ProductStore for MemoryStore {
    fn fetch(&self, filter: &Predicate, options: &FetchOptions) -> AppResult<Vec<Product>> {
        let products = self.products.read();

        let mut matched: Vec<Product> = products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        matched.sort_by(|a, b| compare(options.order_by, a, b));

        Ok(matched
            .into_iter()
            .skip(options.skip)
            .take(options.take)
            .collect())
    }

    fn count(&self, filter: &Predicate) -> AppResult<usize> {
        let products = self.products.read();
        Ok(products.iter().filter(|p| filter.matches(p)).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Field;
    use std::io::Write;

    fn product(name: &str, code: i64, price: f64, popularity: f64) -> Product {
        let mut p = Product::new(format!("id-{code}"), code, name.to_string());
        p.price = price;
        p.popularity = popularity;
        p
    }

    #[test]
    fn test_fetch_orders_by_popularity_then_name() {
        let store = MemoryStore::from_products(vec![
            product("B", 1, 1.0, 5.0),
            product("A", 2, 1.0, 5.0),
            product("C", 3, 1.0, 9.0),
        ]);

        let fetched = store
            .fetch(&Predicate::And(vec![]), &FetchOptions::pool(10))
            .unwrap();
        let names: Vec<&str> = fetched.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_fetch_skip_take() {
        let store = MemoryStore::from_products(vec![
            product("A", 1, 1.0, 0.0),
            product("B", 2, 1.0, 0.0),
            product("C", 3, 1.0, 0.0),
        ]);

        let options = FetchOptions {
            skip: 1,
            take: 1,
            order_by: OrderBy::NameAsc,
        };
        let fetched = store.fetch(&Predicate::And(vec![]), &options).unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].name, "B");
    }

    #[test]
    fn test_count_is_uncapped() {
        let store = MemoryStore::from_products(
            (0..30).map(|i| product(&format!("P{i}"), i, 1.0, 0.0)).collect(),
        );
        let filter = Predicate::Contains(Field::Name, "P".to_string());
        assert_eq!(store.count(&filter).unwrap(), 30);

        let fetched = store.fetch(&filter, &FetchOptions::pool(10)).unwrap();
        assert_eq!(fetched.len(), 10);
    }

    #[test]
    fn test_price_ordering() {
        let store = MemoryStore::from_products(vec![
            product("A", 1, 9.0, 0.0),
            product("B", 2, 3.0, 0.0),
        ]);

        let asc = store
            .fetch(
                &Predicate::And(vec![]),
                &FetchOptions { skip: 0, take: 10, order_by: OrderBy::PriceAsc },
            )
            .unwrap();
        assert_eq!(asc[0].name, "B");

        let desc = store
            .fetch(
                &Predicate::And(vec![]),
                &FetchOptions { skip: 0, take: 10, order_by: OrderBy::PriceDesc },
            )
            .unwrap();
        assert_eq!(desc[0].name, "A");
    }

    #[test]
    fn test_load_catalog_skips_malformed_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.jsonl");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"id":"1","code":10,"name":"CABO FLEXIVEL 2,5"}}"#).unwrap();
        writeln!(file, "not json at all").unwrap();
        writeln!(file, r#"{{"id":"2","code":11,"name":""}}"#).unwrap();
        writeln!(file, r#"{{"id":"3","code":12,"name":"TOMADA 20A","price":7.9}}"#).unwrap();

        let store = MemoryStore::with_file_path(path.to_string_lossy().to_string());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_missing_catalog_file_yields_empty_store() {
        let store = MemoryStore::with_file_path("definitely/not/here.jsonl".to_string());
        assert!(store.is_empty());
    }
}
