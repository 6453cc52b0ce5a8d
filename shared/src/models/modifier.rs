//! Modifier Models

use serde::{Deserialize, Serialize};

/// How many items of a group can be selected at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionMode {
    /// At most one item; selecting another replaces it
    Single,
    /// Up to `max_select` items
    Multiple,
}

/// Row of the `modifier_groups` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierGroupRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub mode: SelectionMode,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_select: i32,
    #[serde(default = "default_max_select")]
    pub max_select: i32,
}

/// Row of the `modifier_items` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierItemRow {
    pub id: String,
    pub group_id: String,
    pub name: String,
    /// Signed adjustment added to the product base price
    #[serde(default)]
    pub price_adjust: i64,
    #[serde(default = "default_true")]
    pub available: bool,
}

/// Row of the `product_modifiers` association table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductModifierRow {
    pub product_id: String,
    pub group_id: String,
}

fn default_max_select() -> i32 {
    1
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_row_decodes_type_column() {
        let json = r#"{
            "id": "grp-topping",
            "name": "Topping",
            "type": "MULTIPLE",
            "required": false,
            "min_select": 0,
            "max_select": 2
        }"#;
        let row: ModifierGroupRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.mode, SelectionMode::Multiple);
        assert_eq!(row.max_select, 2);
    }

    #[test]
    fn test_item_row_negative_adjustment() {
        let json = r#"{"id": "i", "group_id": "g", "name": "Less Rice", "price_adjust": -2000}"#;
        let row: ModifierItemRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.price_adjust, -2000);
        assert!(row.available);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let json = r#"{"id": "g", "name": "x", "type": "ANY"}"#;
        assert!(serde_json::from_str::<ModifierGroupRow>(json).is_err());
    }
}
