//! Validated catalog entities

use shared::models::{ModifierGroupRow, ModifierItemRow, ProductRow, SelectionMode, StockType};

/// Sellable product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Base price in the smallest currency unit
    pub base_price: i64,
    pub category: String,
    pub stock: i64,
    pub stock_type: StockType,
    pub available: bool,
}

impl Product {
    pub(crate) fn from_row(row: ProductRow) -> Result<Self, String> {
        if row.id.trim().is_empty() {
            return Err("empty product id".to_string());
        }
        if row.base_price < 0 {
            return Err(format!("negative base price {}", row.base_price));
        }
        let category = row.category_name().to_string();
        Ok(Self {
            id: row.id,
            name: row.name,
            base_price: row.base_price,
            category,
            stock: row.stock,
            stock_type: row.stock_type,
            available: row.available,
        })
    }
}

/// Modifier item (one choice inside a group)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierItem {
    pub id: String,
    pub group_id: String,
    pub name: String,
    /// Signed, added to the base price
    pub price_adjust: i64,
    pub available: bool,
}

impl From<ModifierItemRow> for ModifierItem {
    fn from(row: ModifierItemRow) -> Self {
        Self {
            id: row.id,
            group_id: row.group_id,
            name: row.name,
            price_adjust: row.price_adjust,
            available: row.available,
        }
    }
}

/// Modifier group with its items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierGroup {
    pub id: String,
    pub name: String,
    pub mode: SelectionMode,
    pub required: bool,
    pub min_select: u32,
    pub max_select: u32,
    pub items: Vec<ModifierItem>,
}

impl ModifierGroup {
    /// Validate cardinality columns; items are attached later
    pub(crate) fn from_row(row: ModifierGroupRow) -> Result<Self, String> {
        let min_select = u32::try_from(row.min_select)
            .map_err(|_| format!("negative min_select {}", row.min_select))?;
        let max_select = u32::try_from(row.max_select)
            .map_err(|_| format!("negative max_select {}", row.max_select))?;
        let capacity = match row.mode {
            SelectionMode::Single => 1,
            SelectionMode::Multiple => max_select,
        };
        if capacity == 0 {
            return Err("max_select must be at least 1".to_string());
        }
        if min_select > capacity {
            return Err(format!(
                "min_select {} exceeds capacity {}",
                min_select, capacity
            ));
        }
        Ok(Self {
            id: row.id,
            name: row.name,
            mode: row.mode,
            required: row.required,
            min_select,
            max_select,
            items: Vec::new(),
        })
    }

    pub fn item(&self, item_id: &str) -> Option<&ModifierItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Upper bound of simultaneous selections
    pub fn capacity(&self) -> u32 {
        match self.mode {
            SelectionMode::Single => 1,
            SelectionMode::Multiple => self.max_select,
        }
    }
}
