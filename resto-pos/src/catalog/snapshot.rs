use std::collections::{HashMap, HashSet};

use shared::models::{ModifierGroupRow, ModifierItemRow, ProductModifierRow, ProductRow};

use super::{CatalogSource, ModifierGroup, ModifierItem, Product};
use crate::error::CatalogError;

/// Raw rows as returned by the data store
#[derive(Debug, Clone, Default)]
pub struct CatalogRows {
    pub products: Vec<ProductRow>,
    pub groups: Vec<ModifierGroupRow>,
    pub items: Vec<ModifierItemRow>,
    pub links: Vec<ProductModifierRow>,
}

/// Immutable catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    groups: Vec<ModifierGroup>,
    /// product id -> group ids
    links: HashMap<String, HashSet<String>>,
}

impl Catalog {
    /// Fetch rows from `source` and build a snapshot
    pub async fn load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let rows = source
            .fetch_catalog()
            .await
            .map_err(|e| CatalogError::Source(e.to_string()))?;
        Ok(Self::from_rows(rows))
    }

    /// Build a snapshot, skipping rows that fail validation
    ///
    /// Inactive products and unavailable items are dropped, items whose group
    /// is unknown are dropped, links to unknown products or groups are ignored.
    pub fn from_rows(rows: CatalogRows) -> Self {
        let mut products = Vec::with_capacity(rows.products.len());
        for row in rows.products {
            if !row.is_active {
                continue;
            }
            let id = row.id.clone();
            match Product::from_row(row) {
                Ok(product) => products.push(product),
                Err(reason) => tracing::warn!(product_id = %id, %reason, "Skipping invalid product row"),
            }
        }

        let mut groups = Vec::with_capacity(rows.groups.len());
        for row in rows.groups {
            let id = row.id.clone();
            match ModifierGroup::from_row(row) {
                Ok(group) => groups.push(group),
                Err(reason) => tracing::warn!(group_id = %id, %reason, "Skipping invalid modifier group row"),
            }
        }

        let mut dropped_items = 0usize;
        for row in rows.items {
            if !row.available {
                continue;
            }
            match groups.iter_mut().find(|g| g.id == row.group_id) {
                Some(group) => group.items.push(ModifierItem::from(row)),
                None => dropped_items += 1,
            }
        }
        if dropped_items > 0 {
            tracing::warn!(count = dropped_items, "Dropped modifier items of unknown groups");
        }

        let product_ids: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
        let group_ids: HashSet<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        let mut links: HashMap<String, HashSet<String>> = HashMap::new();
        for link in rows.links {
            if product_ids.contains(link.product_id.as_str())
                && group_ids.contains(link.group_id.as_str())
            {
                links.entry(link.product_id).or_default().insert(link.group_id);
            }
        }

        tracing::info!(
            products = products.len(),
            groups = groups.len(),
            links = links.values().map(HashSet::len).sum::<usize>(),
            "Catalog loaded"
        );

        Self {
            products,
            groups,
            links,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn groups(&self) -> &[ModifierGroup] {
        &self.groups
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&ModifierGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Modifier groups attached to a product, in catalog group order
    pub fn groups_for(&self, product_id: &str) -> Vec<&ModifierGroup> {
        match self.links.get(product_id) {
            Some(ids) => self.groups.iter().filter(|g| ids.contains(&g.id)).collect(),
            None => Vec::new(),
        }
    }

    /// Products without modifier groups go straight into the cart
    pub fn needs_modifier_prompt(&self, product_id: &str) -> bool {
        self.links.get(product_id).is_some_and(|ids| !ids.is_empty())
    }

    /// Distinct category names in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn products_in_category(&self, category: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.category == category).collect()
    }

    /// Case-insensitive name search; an empty query matches everything
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> CatalogRows {
        CatalogRows {
            products: serde_json::from_value(json!([
                {"id": "p-rice", "name": "Fried Rice", "base_price": 25000, "categories": {"name": "Food"}},
                {"id": "p-tea", "name": "Iced Tea", "base_price": 5000, "categories": {"name": "Drinks"}},
                {"id": "p-noodle", "name": "Fried Noodle", "base_price": 23000, "categories": {"name": "Food"}},
                {"id": "p-old", "name": "Old Menu", "base_price": 1000, "is_active": false},
                {"id": "p-bad", "name": "Broken", "base_price": -5},
                {"id": "p-misc", "name": "Crackers", "base_price": 2000}
            ]))
            .unwrap(),
            groups: serde_json::from_value(json!([
                {"id": "g-spice", "name": "Spice", "type": "SINGLE", "required": true, "min_select": 1, "max_select": 1},
                {"id": "g-top", "name": "Topping", "type": "MULTIPLE", "required": false, "min_select": 0, "max_select": 2},
                {"id": "g-bad", "name": "Bad", "type": "MULTIPLE", "min_select": 3, "max_select": 1}
            ]))
            .unwrap(),
            items: serde_json::from_value(json!([
                {"id": "m-mild", "group_id": "g-spice", "name": "Mild", "price_adjust": 0},
                {"id": "m-hot", "group_id": "g-spice", "name": "Hot", "price_adjust": 0},
                {"id": "m-egg", "group_id": "g-top", "name": "Egg", "price_adjust": 3000},
                {"id": "m-sold", "group_id": "g-top", "name": "Sold Out", "price_adjust": 1000, "available": false},
                {"id": "m-orphan", "group_id": "g-gone", "name": "Orphan", "price_adjust": 1}
            ]))
            .unwrap(),
            links: serde_json::from_value(json!([
                {"product_id": "p-rice", "group_id": "g-top"},
                {"product_id": "p-rice", "group_id": "g-spice"},
                {"product_id": "p-rice", "group_id": "g-bad"},
                {"product_id": "p-ghost", "group_id": "g-spice"}
            ]))
            .unwrap(),
        }
    }

    #[test]
    fn test_from_rows_filters_invalid_and_inactive() {
        let catalog = Catalog::from_rows(rows());
        let ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p-rice", "p-tea", "p-noodle", "p-misc"]);
        assert_eq!(catalog.groups().len(), 2);
        assert!(catalog.group("g-top").unwrap().item("m-sold").is_none());
        assert_eq!(catalog.product("p-misc").unwrap().category, "Others");
    }

    #[test]
    fn test_groups_for_uses_catalog_order() {
        let catalog = Catalog::from_rows(rows());
        let names: Vec<&str> = catalog
            .groups_for("p-rice")
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, vec!["Spice", "Topping"]);
        assert!(catalog.needs_modifier_prompt("p-rice"));
        assert!(!catalog.needs_modifier_prompt("p-tea"));
        assert!(catalog.groups_for("p-tea").is_empty());
    }

    #[test]
    fn test_categories_and_search() {
        let catalog = Catalog::from_rows(rows());
        assert_eq!(catalog.categories(), vec!["Food", "Drinks", "Others"]);
        assert_eq!(catalog.products_in_category("Food").len(), 2);
        let found: Vec<&str> = catalog.search("FRIED").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(found, vec!["p-rice", "p-noodle"]);
        assert_eq!(catalog.search("  ").len(), 4);
    }
}
