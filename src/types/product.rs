//! Product types for the catalog

use serde::{Deserialize, Serialize};

use super::{default_available, is_zero_f64, is_zero_u32};

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductType {
    #[default]
    #[serde(rename = "MATERIAL")]
    Material,
    #[serde(rename = "SERVICE")]
    Service,
}

impl ProductType {
    /// Parse from a query-string value, case-insensitive
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("MATERIAL") {
            Some(ProductType::Material)
        } else if value.eq_ignore_ascii_case("SERVICE") {
            Some(ProductType::Service)
        } else {
            None
        }
    }
}

/// Product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// Numeric catalog code
    pub code: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "type", default)]
    pub product_type: ProductType,
    #[serde(rename = "isAvailable", default = "default_available")]
    pub is_available: bool,
    #[serde(rename = "popularityIndex", default, skip_serializing_if = "is_zero_f64")]
    pub popularity: f64,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Create a new product with default values
    pub fn new(id: String, code: i64, name: String) -> Self {
        Self {
            id,
            code,
            name,
            brand: None,
            category: None,
            price: 0.0,
            unit: None,
            product_type: ProductType::default(),
            is_available: true,
            popularity: 0.0,
            image_url: None,
        }
    }
}

/// Product plus its derived relevance score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub product: Product,
    /// Relevance score; zero outside search mode
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub score: u32,
}

impl ScoredProduct {
    /// Wrap a product without a relevance score (browse mode)
    pub fn unscored(product: Product) -> Self {
        Self { product, score: 0 }
    }
}
