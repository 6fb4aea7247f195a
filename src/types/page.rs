//! Pagination types for listing responses

use serde::{Deserialize, Serialize};

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Storage-level count matching the filter. In search mode this may
    /// exceed the scored pool size (the pool is capped); see catalog docs.
    pub total: usize,
    pub page: usize,
    pub last_page: usize,
}

impl PageMeta {
    pub fn new(total: usize, page: usize, limit: usize) -> Self {
        let last_page = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            total,
            page,
            last_page,
        }
    }
}

/// One page of listing results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, meta: PageMeta) -> Self {
        Self { data, meta }
    }

    /// An empty page beyond the available range
    pub fn empty(total: usize, page: usize, limit: usize) -> Self {
        Self {
            data: Vec::new(),
            meta: PageMeta::new(total, page, limit),
        }
    }
}
