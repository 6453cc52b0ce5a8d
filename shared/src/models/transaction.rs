//! Transaction Models
//!
//! Write-side records of a committed order: the `transactions` header, its
//! `transaction_details` line items and the `email_logs` audit rows.

use serde::{Deserialize, Serialize};

use crate::order::{OrderType, PaymentMethod, SelectedModifier};

/// Insert payload for the `transactions` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Customer reference, `None` for anonymous / legacy customers
    pub customer_id: Option<String>,
    pub branch_id: Option<String>,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
    pub payment_method: PaymentMethod,
    #[serde(with = "crate::order::order_type_code")]
    pub order_type: OrderType,
}

/// Row returned by the `transactions` insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Insert payload for the `transaction_details` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransactionDetail {
    pub transaction_id: String,
    /// `None` for synthetic lines such as the packaging fee
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(rename = "qty")]
    pub quantity: u32,
    /// Unit price including modifier adjustments
    #[serde(rename = "price")]
    pub unit_price: i64,
    #[serde(default)]
    pub modifiers: Vec<SelectedModifier>,
}

/// Outcome recorded in `email_logs`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailStatus {
    Success,
    Failed,
}

/// Insert payload for the `email_logs` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailLogEntry {
    pub recipient: String,
    pub subject: String,
    pub status: EmailStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl EmailLogEntry {
    pub fn success(recipient: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            status: EmailStatus::Success,
            error_message: None,
        }
    }

    pub fn failed(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            subject: subject.into(),
            status: EmailStatus::Failed,
            error_message: Some(error.into()),
        }
    }
}
