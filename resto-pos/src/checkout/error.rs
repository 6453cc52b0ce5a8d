//! Checkout error types

use shared::error::{AppError, ErrorCode};
use std::fmt;
use thiserror::Error;

/// Order persistence collaborator failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub code: ErrorCode,
    pub message: String,
}

impl StoreError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Notification collaborator failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Notification failed: {0}")]
pub struct NotifyError(pub String);

/// Which write failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    Transaction,
    LineItems,
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutStage::Transaction => f.write_str("transaction"),
            CheckoutStage::LineItems => f.write_str("line items"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart is left intact. `transaction_id` is set when the header was
    /// stored but its line items were not.
    #[error("Checkout failed while saving {stage}: {message}")]
    Persistence {
        stage: CheckoutStage,
        transaction_id: Option<String>,
        message: String,
    },
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        let message = err.to_string();
        match err {
            CheckoutError::EmptyCart => AppError::new(ErrorCode::CartEmpty),
            CheckoutError::Persistence {
                stage,
                transaction_id,
                ..
            } => {
                let app = AppError::with_message(ErrorCode::OrderSubmitFailed, message)
                    .with_detail("stage", stage.to_string());
                match transaction_id {
                    Some(id) => app.with_detail("transaction_id", id),
                    None => app,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_error_message_names_stage() {
        let err = CheckoutError::Persistence {
            stage: CheckoutStage::LineItems,
            transaction_id: Some("tx-1".into()),
            message: "foreign key violation".into(),
        };
        assert_eq!(
            err.to_string(),
            "Checkout failed while saving line items: foreign key violation"
        );

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::OrderSubmitFailed);
        let details = app.details.unwrap();
        assert_eq!(details["transaction_id"], "tx-1");
        assert_eq!(details["stage"], "line items");
    }

    #[test]
    fn test_empty_cart_code() {
        let app: AppError = CheckoutError::EmptyCart.into();
        assert_eq!(app.code, ErrorCode::CartEmpty);
    }
}
