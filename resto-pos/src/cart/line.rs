//! Cart line and its identity

use serde::{Deserialize, Deserializer, Serialize};
use shared::order::SelectedModifier;
use std::fmt;

/// Stable identity of a cart line: `{product id}-{sorted modifier ids joined by ","}-{note}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey(String);

impl LineKey {
    pub fn compose(product_id: &str, modifiers: &[SelectedModifier], note: &str) -> Self {
        Self(format!(
            "{}-{}-{}",
            product_id,
            sorted_modifier_ids(modifiers).join(","),
            note
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for LineKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

pub(crate) fn sorted_modifier_ids(modifiers: &[SelectedModifier]) -> Vec<&str> {
    let mut ids: Vec<&str> = modifiers.iter().map(|m| m.id.as_str()).collect();
    ids.sort_unstable();
    ids
}

/// One row of the cart
///
/// Serialized in the local storage layout (`id`, `price`, `qty`,
/// `selectedModifiers`, `modifierTotal`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: String,
    pub name: String,
    #[serde(rename = "price")]
    pub base_price: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(rename = "qty")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selected_modifiers: Vec<SelectedModifier>,
    #[serde(default)]
    pub modifier_total: i64,
}

impl CartLine {
    pub fn key(&self) -> LineKey {
        LineKey::compose(&self.product_id, &self.selected_modifiers, &self.note)
    }

    /// Same product, same modifier set, same note
    pub(crate) fn matches(&self, product_id: &str, modifier_ids: &[&str], note: &str) -> bool {
        self.product_id == product_id
            && self.note == note
            && sorted_modifier_ids(&self.selected_modifiers) == modifier_ids
    }

    /// Base price plus modifier adjustments
    pub fn unit_price(&self) -> i64 {
        self.base_price + self.modifier_total
    }

    pub fn line_total(&self) -> i64 {
        self.unit_price() * i64::from(self.quantity)
    }

    /// Recompute the derived modifier total from the selections
    pub(crate) fn refresh_modifier_total(&mut self) {
        self.modifier_total = self.selected_modifiers.iter().map(|m| m.price).sum();
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Synthetic takeaway packaging line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingFee {
    pub product_id: String,
    pub name: String,
    pub price: i64,
    pub category: String,
}

impl PackagingFee {
    pub const PRODUCT_ID: &'static str = "V-BUNGKUS";

    pub fn with_price(price: i64) -> Self {
        Self {
            price,
            ..Self::default()
        }
    }

    /// Recognises the fee line by its product id
    ///
    /// Stored lines without a product id fall back to the name: the
    /// configured fee name or the "bungkus" marker. Catalog products never
    /// match by name.
    pub fn matches(&self, line: &CartLine) -> bool {
        if line.product_id == self.product_id {
            return true;
        }
        if !line.product_id.trim().is_empty() {
            return false;
        }
        let name = line.name.to_lowercase();
        name == self.name.to_lowercase() || name.contains("bungkus")
    }

    pub fn line(&self) -> CartLine {
        CartLine {
            product_id: self.product_id.clone(),
            name: self.name.clone(),
            base_price: self.price,
            category: self.category.clone(),
            quantity: 1,
            note: String::new(),
            selected_modifiers: Vec::new(),
            modifier_total: 0,
        }
    }
}

impl Default for PackagingFee {
    fn default() -> Self {
        Self {
            product_id: Self::PRODUCT_ID.to_string(),
            name: "Packaging Fee (TA)".to_string(),
            price: 2000,
            category: "Service".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifier(id: &str, price: i64) -> SelectedModifier {
        SelectedModifier {
            id: id.into(),
            name: id.into(),
            price,
            group_id: "g".into(),
            group_name: "G".into(),
        }
    }

    #[test]
    fn test_key_is_order_independent() {
        let a = LineKey::compose("p1", &[modifier("m2", 0), modifier("m1", 0)], "no ice");
        let b = LineKey::compose("p1", &[modifier("m1", 0), modifier("m2", 0)], "no ice");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "p1-m1,m2-no ice");
        assert_eq!(LineKey::compose("p1", &[], "").as_str(), "p1--");
    }

    #[test]
    fn test_line_totals() {
        let mut line = PackagingFee::default().line();
        line.selected_modifiers = vec![modifier("a", 3000), modifier("b", -500)];
        line.refresh_modifier_total();
        line.quantity = 3;
        assert_eq!(line.modifier_total, 2500);
        assert_eq!(line.unit_price(), 4500);
        assert_eq!(line.line_total(), 13500);
    }

    #[test]
    fn test_decodes_stored_layout() {
        let json = r#"{
            "id": "p1", "name": "Fried Rice", "price": 25000, "image": "",
            "category": "Food", "stock": 5, "stockType": "STOK_FISIK", "available": true,
            "qty": 2, "note": null,
            "selectedModifiers": [{"id": "m-hot", "name": "Hot", "price": 0}],
            "modifierTotal": 0
        }"#;
        let line: CartLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.note, "");
        assert_eq!(line.key().as_str(), "p1-m-hot-");
    }

    #[test]
    fn test_packaging_marker_detection() {
        let fee = PackagingFee::default();
        let mut line = fee.line();
        assert!(fee.matches(&line));

        line.product_id = String::new();
        line.name = "Biaya Bungkus".into();
        assert!(fee.matches(&line));

        line.name = "Fried Rice".into();
        assert!(!fee.matches(&line));

        // A catalog dish named like the marker is a normal line
        line.product_id = "p-nasi".into();
        line.name = "Nasi Bungkus".into();
        assert!(!fee.matches(&line));
        line.name = "Packaging Fee (TA)".into();
        assert!(!fee.matches(&line));
    }
}
