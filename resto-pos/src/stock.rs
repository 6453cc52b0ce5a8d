//! Stock gate
//!
//! Caller-side precondition before adding a product to the cart. Stock is
//! never decremented here.

use crate::catalog::Product;
use crate::error::StockError;

/// Unavailable products are blocked; physical-stock products need stock > 0
pub fn ensure_sellable(product: &Product) -> Result<(), StockError> {
    if !product.available {
        return Err(StockError::ProductUnavailable {
            product_id: product.id.clone(),
            name: product.name.clone(),
        });
    }
    if product.stock_type.is_tracked() && product.stock <= 0 {
        return Err(StockError::OutOfStock {
            product_id: product.id.clone(),
            name: product.name.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::StockType;

    fn product(stock_type: StockType, stock: i64, available: bool) -> Product {
        Product {
            id: "p".into(),
            name: "Es Teh".into(),
            base_price: 5000,
            category: "Drinks".into(),
            stock,
            stock_type,
            available,
        }
    }

    #[test]
    fn test_physical_stock_requires_positive() {
        assert!(ensure_sellable(&product(StockType::Physical, 1, true)).is_ok());
        assert!(matches!(
            ensure_sellable(&product(StockType::Physical, 0, true)),
            Err(StockError::OutOfStock { .. })
        ));
        assert!(matches!(
            ensure_sellable(&product(StockType::Physical, -3, true)),
            Err(StockError::OutOfStock { .. })
        ));
    }

    #[test]
    fn test_untracked_and_service_ignore_stock() {
        assert!(ensure_sellable(&product(StockType::Untracked, 0, true)).is_ok());
        assert!(ensure_sellable(&product(StockType::Service, -1, true)).is_ok());
    }

    #[test]
    fn test_unavailable_blocked() {
        assert!(matches!(
            ensure_sellable(&product(StockType::Untracked, 10, false)),
            Err(StockError::ProductUnavailable { .. })
        ));
    }
}
