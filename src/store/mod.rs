//! Product store capability
//!
//! The search core consumes storage through a narrow filter+fetch interface:
//! a structured predicate (nested AND/OR of contains/starts-with/equals
//! clauses over named fields) plus pagination and ordering options. It never
//! depends on a particular storage engine's query language.

mod memory;

pub use memory::MemoryStore;

use crate::types::{AppResult, Product, ProductType};

/// Text fields a predicate can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Brand,
    Category,
}

impl Field {
    /// The field's value on a product; absent optional fields read as empty
    fn value<'a>(&self, product: &'a Product) -> &'a str {
        match self {
            Field::Name => &product.name,
            Field::Brand => product.brand.as_deref().unwrap_or(""),
            Field::Category => product.category.as_deref().unwrap_or(""),
        }
    }
}

/// Structured filter over products. Text clauses are case-insensitive.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Every clause must match; empty means match-all
    And(Vec<Predicate>),
    /// At least one clause must match; empty means match-none
    Or(Vec<Predicate>),
    Contains(Field, String),
    StartsWith(Field, String),
    Equals(Field, String),
    CodeEquals(i64),
    Available,
    PriceAbove(f64),
    TypeIs(ProductType),
}

impl Predicate {
    /// Conjunction, collapsing the single-clause case
    pub fn all(mut clauses: Vec<Predicate>) -> Predicate {
        if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            Predicate::And(clauses)
        }
    }

    /// Disjunction, collapsing the single-clause case
    pub fn any(mut clauses: Vec<Predicate>) -> Predicate {
        if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            Predicate::Or(clauses)
        }
    }

    /// Evaluate against one product
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Predicate::And(clauses) => clauses.iter().all(|c| c.matches(product)),
            Predicate::Or(clauses) => clauses.iter().any(|c| c.matches(product)),
            Predicate::Contains(field, term) => {
                field.value(product).to_uppercase().contains(&term.to_uppercase())
            }
            Predicate::StartsWith(field, term) => field
                .value(product)
                .to_uppercase()
                .starts_with(&term.to_uppercase()),
            Predicate::Equals(field, term) => {
                field.value(product).eq_ignore_ascii_case(term)
            }
            Predicate::CodeEquals(code) => product.code == *code,
            Predicate::Available => product.is_available,
            Predicate::PriceAbove(floor) => product.price > *floor,
            Predicate::TypeIs(kind) => product.product_type == *kind,
        }
    }
}

/// Ordering applied by the store (browse mode) or, for explicit sorts, to
/// the in-memory pool (search mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    /// Popularity descending, then name ascending
    #[default]
    Popularity,
    /// Scored ranking; meaningful only with a search query
    Relevance,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl OrderBy {
    /// Parse a query-string value; unknown values fall back to the default
    pub fn parse(value: &str) -> OrderBy {
        match value {
            "relevance" => OrderBy::Relevance,
            "price_asc" => OrderBy::PriceAsc,
            "price_desc" => OrderBy::PriceDesc,
            "name_asc" => OrderBy::NameAsc,
            "name_desc" => OrderBy::NameDesc,
            _ => OrderBy::Popularity,
        }
    }

    /// Whether this ordering asks for relevance ranking in search mode
    pub fn wants_relevance(&self) -> bool {
        matches!(self, OrderBy::Popularity | OrderBy::Relevance)
    }
}

/// Pagination and ordering options for a fetch
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub skip: usize,
    pub take: usize,
    pub order_by: OrderBy,
}

impl FetchOptions {
    /// Fetch a bounded candidate pool from the start of the ordered set
    pub fn pool(take: usize) -> Self {
        Self {
            skip: 0,
            take,
            order_by: OrderBy::Popularity,
        }
    }
}

/// Query capability the search core consumes. Errors from an implementation
/// propagate to the caller unmodified.
pub trait ProductStore: Send + Sync {
    /// Fetch products matching the predicate, ordered and paginated
    fn fetch(&self, filter: &Predicate, options: &FetchOptions) -> AppResult<Vec<Product>>;

    /// Count all products matching the predicate, uncapped
    fn count(&self, filter: &Predicate) -> AppResult<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, brand: Option<&str>, category: Option<&str>, code: i64) -> Product {
        let mut p = Product::new(format!("id-{code}"), code, name.to_string());
        p.brand = brand.map(|s| s.to_string());
        p.category = category.map(|s| s.to_string());
        p
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let p = product("CABO FLEXIVEL 2,5", None, None, 1);
        assert!(Predicate::Contains(Field::Name, "flexivel".to_string()).matches(&p));
        assert!(!Predicate::Contains(Field::Name, "RIGIDO".to_string()).matches(&p));
    }

    #[test]
    fn test_missing_optional_field_reads_empty() {
        let p = product("CABO", None, None, 1);
        assert!(!Predicate::Contains(Field::Brand, "SIL".to_string()).matches(&p));
        assert!(!Predicate::StartsWith(Field::Category, "FIO".to_string()).matches(&p));
    }

    #[test]
    fn test_and_or_nesting() {
        let p = product("DISJUNTOR 20A", Some("WEG"), Some("DISJUNTORES"), 42);
        let filter = Predicate::And(vec![
            Predicate::Or(vec![
                Predicate::Contains(Field::Name, "DISJ".to_string()),
                Predicate::CodeEquals(99),
            ]),
            Predicate::StartsWith(Field::Category, "DISJUNT".to_string()),
        ]);
        assert!(filter.matches(&p));
    }

    #[test]
    fn test_empty_and_matches_all_empty_or_matches_none() {
        let p = product("CABO", None, None, 1);
        assert!(Predicate::And(vec![]).matches(&p));
        assert!(!Predicate::Or(vec![]).matches(&p));
    }

    #[test]
    fn test_order_by_parse() {
        assert_eq!(OrderBy::parse("price_asc"), OrderBy::PriceAsc);
        assert_eq!(OrderBy::parse("relevance"), OrderBy::Relevance);
        assert_eq!(OrderBy::parse("anything"), OrderBy::Popularity);
        assert!(OrderBy::parse("popularity").wants_relevance());
        assert!(!OrderBy::PriceAsc.wants_relevance());
    }
}
