use std::fmt;

use serde::{Deserialize, Serialize};

use crate::status::{classify, DisplayCategory, StatusTag};

/// Shown when a product has no category.
pub const NO_CATEGORY: &str = "\u{2014}";

/// Product identifier. Rows from our own store use integers; records from
/// elsewhere may carry string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Int(i64),
    Text(String),
}

impl ProductId {
    /// Parse a CLI argument: numeric strings become `Int`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(n) => ProductId::Int(n),
            Err(_) => ProductId::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Int(n) => write!(f, "{n}"),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub price: f64,
    pub stock_quantity: u32,
    #[serde(default)]
    pub status: StatusTag,
}

impl Product {
    /// Staff-facing code: the slug, or the id when there is none.
    pub fn sku(&self) -> String {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => self.id.to_string(),
        }
    }

    pub fn category_display(&self) -> &str {
        match self.category_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => NO_CATEGORY,
        }
    }

    pub fn display_category(&self) -> DisplayCategory {
        classify(&self.status, self.stock_quantity)
    }
}

/// A product that hasn't been stored yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewProduct {
    pub name: String,
    pub slug: Option<String>,
    pub image_url: Option<String>,
    pub category_name: Option<String>,
    pub price: f64,
    pub stock_quantity: u32,
    pub status: StatusTag,
}

/// Fields to change on an existing product. `None` leaves the field alone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category_name: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<u32>,
    pub status: Option<StatusTag>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ProductUpdate::default()
    }
}
