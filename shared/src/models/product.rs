//! Product Model

use serde::{Deserialize, Serialize};

/// Category label used when a product has no category join
pub const DEFAULT_CATEGORY: &str = "Others";

/// Stock tracking mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StockType {
    /// Physical stock, must be > 0 to sell
    #[serde(rename = "STOK_FISIK")]
    Physical,
    /// Untracked
    #[default]
    #[serde(rename = "NON_STOK")]
    Untracked,
    /// Service, never tracked
    #[serde(rename = "JASA")]
    Service,
}

impl StockType {
    pub fn is_tracked(&self) -> bool {
        matches!(self, StockType::Physical)
    }
}

/// Embedded `categories(name)` join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
}

/// Row of the `products` table, selected with `*, categories(name)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    /// Base price in the smallest currency unit
    pub base_price: i64,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub categories: Option<CategoryRef>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub stock_type: StockType,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductRow {
    /// Category name from the join, falling back to [`DEFAULT_CATEGORY`]
    pub fn category_name(&self) -> &str {
        self.categories
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_row_with_category_join() {
        let json = r#"{
            "id": "prod-1",
            "name": "Fried Rice",
            "base_price": 25000,
            "category_id": "cat-1",
            "categories": {"name": "Food"},
            "stock": 10,
            "stock_type": "STOK_FISIK",
            "available": true,
            "is_active": true,
            "created_at": "2025-01-01T00:00:00Z"
        }"#;
        let row: ProductRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.base_price, 25000);
        assert_eq!(row.category_name(), "Food");
        assert_eq!(row.stock_type, StockType::Physical);
        assert!(row.stock_type.is_tracked());
    }

    #[test]
    fn test_product_row_defaults() {
        let json = r#"{"id": "p", "name": "Tea", "base_price": 5000, "categories": null}"#;
        let row: ProductRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.category_name(), DEFAULT_CATEGORY);
        assert_eq!(row.stock_type, StockType::Untracked);
        assert!(row.available);
        assert!(row.is_active);
    }

    #[test]
    fn test_stock_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&StockType::Service).unwrap(),
            "\"JASA\""
        );
        assert_eq!(
            serde_json::from_str::<StockType>("\"NON_STOK\"").unwrap(),
            StockType::Untracked
        );
    }
}
