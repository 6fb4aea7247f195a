//! Product listing: search mode vs browse mode
//!
//! Search mode fetches a bounded candidate pool matching the query plan,
//! scores and sorts the whole pool in memory, then slices the requested
//! page. Browse mode delegates ordering and pagination to the store.

use crate::search::{plan, rank};
use crate::store::{FetchOptions, Field, Predicate, ProductStore};
use crate::types::{AppResult, Page, PageMeta, Product, ProductType, ScoredProduct};

use super::{CatalogService, ListParams};

/// Candidate pool cap for in-memory scoring. `meta.total` still reports the
/// uncapped store count, so total can exceed the scored pool; bounded-cost
/// ranking is preferred over an exact count.
pub const POOL_LIMIT: usize = 5000;

/// Queries must be longer than this to be worth recording when they fail
const FAILED_QUERY_MIN_LEN: usize = 2;

pub fn list_products(svc: &CatalogService, params: &ListParams) -> AppResult<Page<ScoredProduct>> {
    let page = params.page.max(1);
    let limit = params.limit.max(1);

    let mut base = base_clauses(params);

    let query = params.q.as_deref().unwrap_or("");
    let snapshot = svc.synonyms().snapshot();
    let query_plan = plan(&snapshot, query);

    // A query that normalizes to nothing carries no search terms
    if query_plan.normalized_query.is_empty() {
        return browse(svc, Predicate::all(base), page, limit, params);
    }

    base.push(query_plan.filter.clone());
    let filter = Predicate::all(base);

    let pool = svc.store().fetch(&filter, &FetchOptions::pool(POOL_LIMIT))?;
    let total = svc.store().count(&filter)?;

    if pool.is_empty() && query.trim().len() > FAILED_QUERY_MIN_LEN {
        svc.failed_log().record(query.trim());
    }

    let ranked: Vec<ScoredProduct> = if params.order_by.wants_relevance() {
        rank(
            pool,
            &query_plan.full_query_variations,
            &query_plan.normalized_query,
        )
    } else {
        // An explicit sort overrides relevance over the same fetched pool
        explicit_sort(pool, params)
    };

    let start = (page - 1) * limit;
    let data: Vec<ScoredProduct> = ranked.into_iter().skip(start).take(limit).collect();

    Ok(Page::new(data, PageMeta::new(total, page, limit)))
}

/// Availability, type, and category constraints shared by both modes
fn base_clauses(params: &ListParams) -> Vec<Predicate> {
    let mut clauses = vec![Predicate::Available];

    // Materials only show with a real price; services always show
    clauses.push(match params.product_type {
        Some(ProductType::Service) => Predicate::TypeIs(ProductType::Service),
        Some(ProductType::Material) => Predicate::And(vec![
            Predicate::TypeIs(ProductType::Material),
            Predicate::PriceAbove(0.0),
        ]),
        None => Predicate::Or(vec![
            Predicate::And(vec![
                Predicate::TypeIs(ProductType::Material),
                Predicate::PriceAbove(0.0),
            ]),
            Predicate::TypeIs(ProductType::Service),
        ]),
    });

    if let Some(raw) = params.category.as_deref() {
        if let Some(clause) = category_clause(raw) {
            clauses.push(clause);
        }
    }

    clauses
}

/// Comma-separated category filter -> OR of case-insensitive equals
fn category_clause(raw: &str) -> Option<Predicate> {
    let categories: Vec<&str> = raw.split(',').map(str::trim).filter(|c| !c.is_empty()).collect();
    if categories.is_empty() {
        return None;
    }
    Some(Predicate::any(
        categories
            .into_iter()
            .map(|c| Predicate::Equals(Field::Category, c.to_string()))
            .collect(),
    ))
}

/// Browse mode: no scoring, store-side ordering and pagination
fn browse(
    svc: &CatalogService,
    filter: Predicate,
    page: usize,
    limit: usize,
    params: &ListParams,
) -> AppResult<Page<ScoredProduct>> {
    let total = svc.store().count(&filter)?;

    let options = FetchOptions {
        skip: (page - 1) * limit,
        take: limit,
        order_by: params.order_by,
    };
    let data = svc
        .store()
        .fetch(&filter, &options)?
        .into_iter()
        .map(ScoredProduct::unscored)
        .collect();

    Ok(Page::new(data, PageMeta::new(total, page, limit)))
}

/// Price/name sorts applied to the fetched pool in search mode
fn explicit_sort(mut pool: Vec<Product>, params: &ListParams) -> Vec<ScoredProduct> {
    use crate::store::OrderBy;

    let by_name = |a: &Product, b: &Product| a.name.to_uppercase().cmp(&b.name.to_uppercase());
    match params.order_by {
        OrderBy::PriceAsc => pool.sort_by(|a, b| a.price.total_cmp(&b.price).then_with(|| by_name(a, b))),
        OrderBy::PriceDesc => pool.sort_by(|a, b| b.price.total_cmp(&a.price).then_with(|| by_name(a, b))),
        OrderBy::NameAsc => pool.sort_by(by_name),
        OrderBy::NameDesc => pool.sort_by(|a, b| by_name(b, a)),
        // wants_relevance() covers the remaining variants before we get here
        OrderBy::Popularity | OrderBy::Relevance => {}
    }

    pool.into_iter().map(ScoredProduct::unscored).collect()
}
