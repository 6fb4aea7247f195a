//! Data types for the Catalog Search Server
//!
//! This module contains all the core data structures used throughout the application.

mod page;
mod product;

pub use page::{Page, PageMeta};
pub use product::{Product, ProductType, ScoredProduct};

/// Result type for catalog operations
pub type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Default availability for serde deserialization
pub fn default_available() -> bool {
    true
}

/// Check if value is zero (for skip_serializing_if)
pub fn is_zero_u32(val: &u32) -> bool {
    *val == 0
}

/// Check if value is zero (for skip_serializing_if)
pub fn is_zero_f64(val: &f64) -> bool {
    *val == 0.0
}
