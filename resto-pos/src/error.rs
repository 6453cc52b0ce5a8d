//! Engine error types
//!
//! Each error converts into [`AppError`] so the presentation layer gets an
//! [`ErrorCode`] plus a human-readable reason.

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Modifier selection rejected at commit time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please choose {group_name} (at least {required}, selected {selected})")]
    MissingRequiredSelection {
        group_id: String,
        group_name: String,
        required: u32,
        selected: u32,
    },
}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        let message = err.to_string();
        match err {
            SelectionError::MissingRequiredSelection {
                group_id,
                group_name,
                required,
                selected,
            } => AppError::with_message(ErrorCode::ModifierSelectionRequired, message)
                .with_detail("group_id", group_id)
                .with_detail("group_name", group_name)
                .with_detail("required", required)
                .with_detail("selected", selected),
        }
    }
}

/// Product cannot be added to the cart
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("{name} is out of stock")]
    OutOfStock { product_id: String, name: String },

    #[error("{name} is not available")]
    ProductUnavailable { product_id: String, name: String },
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        let message = err.to_string();
        let (code, product_id) = match err {
            StockError::OutOfStock { product_id, .. } => (ErrorCode::ProductOutOfStock, product_id),
            StockError::ProductUnavailable { product_id, .. } => {
                (ErrorCode::ProductUnavailable, product_id)
            }
        };
        AppError::with_message(code, message).with_detail("product_id", product_id)
    }
}

/// Guarded add to cart failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error(transparent)]
    Stock(#[from] StockError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Stock(e) => e.into(),
            CartError::Selection(e) => e.into(),
        }
    }
}

/// Local storage failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::with_message(ErrorCode::StorageCorrupted, err.to_string())
    }
}

/// Catalog could not be loaded
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog source failed: {0}")]
    Source(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::with_message(ErrorCode::NetworkError, err.to_string())
    }
}
