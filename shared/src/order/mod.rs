//! Order domain types

mod types;

pub use types::{
    OrderType, PaymentMethod, SelectedModifier, UnknownOrderType, UnknownPaymentMethod,
};

/// Serde adapter writing [`OrderType`] as its upper snake code
/// (`DINE_IN` / `TAKE_AWAY`), as stored in the `transactions` table.
pub mod order_type_code {
    use super::OrderType;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &OrderType, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OrderType, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
