//! Order enums and selection snapshots

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order type
///
/// Serialized with the display label (`"Dine In"` / `"Take Away"`), which is
/// what the local cart storage holds. The transaction table uses the upper
/// snake code, see [`order_type_code`](super::order_type_code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderType {
    #[default]
    #[serde(rename = "Dine In")]
    DineIn,
    #[serde(rename = "Take Away")]
    TakeAway,
}

impl OrderType {
    pub fn label(&self) -> &'static str {
        match self {
            OrderType::DineIn => "Dine In",
            OrderType::TakeAway => "Take Away",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            OrderType::DineIn => "DINE_IN",
            OrderType::TakeAway => "TAKE_AWAY",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unrecognised order type text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order type: {0}")]
pub struct UnknownOrderType(pub String);

impl FromStr for OrderType {
    type Err = UnknownOrderType;

    /// Accepts both the label and the code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Dine In" | "DINE_IN" => Ok(OrderType::DineIn),
            "Take Away" | "TAKE_AWAY" => Ok(OrderType::TakeAway),
            other => Err(UnknownOrderType(other.to_string())),
        }
    }
}

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    /// Default for mobile orders
    #[default]
    Qris,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Qris => "QRIS",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Transfer => "TRANSFER",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised payment method text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    /// Case-insensitive wire code (`cash`, `QRIS`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => Ok(PaymentMethod::Cash),
            "QRIS" => Ok(PaymentMethod::Qris),
            "CARD" => Ok(PaymentMethod::Card),
            "TRANSFER" => Ok(PaymentMethod::Transfer),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// Snapshot of one chosen modifier item, decoupled from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedModifier {
    /// Modifier item id
    pub id: String,
    pub name: String,
    /// Signed price adjustment
    pub price: i64,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub group_name: String,
}
