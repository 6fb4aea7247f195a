//! Failed-search capture
//!
//! A search that returns nothing is a signal the dictionary is missing a
//! term. Zero-result queries are kept in a bounded in-memory log that admins
//! page through newest-first.

use std::collections::VecDeque;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Default number of failed searches retained
const FAILED_LOG_CAPACITY: usize = 1000;

/// One recorded zero-result search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedSearch {
    pub query: String,
    /// Unix timestamp (seconds)
    #[serde(rename = "recordedAt")]
    pub recorded_at: i64,
}

/// Bounded in-memory log of failed searches
pub struct FailedSearchLog {
    entries: RwLock<VecDeque<FailedSearch>>,
    capacity: usize,
}

impl FailedSearchLog {
    pub fn new() -> Self {
        Self::with_capacity(FAILED_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            capacity,
        }
    }

    /// Record a query; the oldest entry falls off once the log is full
    pub fn record(&self, query: &str) {
        let entry = FailedSearch {
            query: query.to_string(),
            recorded_at: chrono::Utc::now().timestamp(),
        };

        let mut entries = self.entries.write();
        entries.push_back(entry);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// One page of entries, newest first, plus the total count
    pub fn page(&self, page: usize, limit: usize) -> (Vec<FailedSearch>, usize) {
        let entries = self.entries.read();
        let total = entries.len();

        let page = page.max(1);
        let limit = limit.max(1);
        let data = entries
            .iter()
            .rev()
            .skip((page - 1) * limit)
            .take(limit)
            .cloned()
            .collect();

        (data, total)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for FailedSearchLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_page_newest_first() {
        let log = FailedSearchLog::new();
        log.record("primeiro");
        log.record("segundo");
        log.record("terceiro");

        let (data, total) = log.page(1, 2);
        assert_eq!(total, 3);
        assert_eq!(data[0].query, "terceiro");
        assert_eq!(data[1].query, "segundo");

        let (data, _) = log.page(2, 2);
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].query, "primeiro");
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let log = FailedSearchLog::with_capacity(2);
        log.record("a");
        log.record("b");
        log.record("c");

        let (data, total) = log.page(1, 10);
        assert_eq!(total, 2);
        assert_eq!(data[0].query, "c");
        assert_eq!(data[1].query, "b");
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let log = FailedSearchLog::new();
        log.record("a");
        let (data, total) = log.page(5, 20);
        assert!(data.is_empty());
        assert_eq!(total, 1);
    }
}
