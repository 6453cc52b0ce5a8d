//! Cart session
//!
//! Owns the [`Cart`] of one device and its local store. Every mutation is
//! written through to storage before returning.

use shared::order::{OrderType, SelectedModifier};

use super::engine::Cart;
use super::line::{LineKey, PackagingFee};
use super::storage::{LocalStore, load_cart, save_cart};
use crate::catalog::{ModifierGroup, Product};
use crate::error::CartError;
use crate::modifiers::{ModifierSelection, validate};
use crate::stock::ensure_sellable;

pub struct CartSession {
    cart: Cart,
    store: Box<dyn LocalStore>,
}

impl CartSession {
    /// Rehydrate from `store`; unreadable state starts an empty cart
    pub fn restore(store: Box<dyn LocalStore>, packaging: PackagingFee) -> Self {
        let cart = load_cart(store.as_ref(), packaging);
        tracing::info!(
            lines = cart.lines().len(),
            order_type = %cart.order_type(),
            "Cart session restored"
        );
        Self { cart, store }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add without checks (products with no modifier prompt)
    pub fn add_line(
        &mut self,
        product: &Product,
        modifiers: Vec<SelectedModifier>,
        note: &str,
    ) -> LineKey {
        let key = self.cart.add_line(product, modifiers, note);
        self.persist();
        key
    }

    /// Stock gate, required-group validation, then add
    ///
    /// On error the cart is untouched and the selection can be corrected.
    pub fn commit(
        &mut self,
        product: &Product,
        groups: &[&ModifierGroup],
        selection: ModifierSelection,
        note: &str,
    ) -> Result<LineKey, CartError> {
        ensure_sellable(product)?;
        validate(product, groups, selection.selected())?;
        Ok(self.add_line(product, selection.into_modifiers(), note))
    }

    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        let changed = self.cart.update_quantity(key, quantity);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn adjust_quantity(&mut self, key: &LineKey, delta: i64) -> bool {
        let changed = self.cart.adjust_quantity(key, delta);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn remove_line(&mut self, key: &LineKey) -> bool {
        let changed = self.cart.remove_line(key);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn set_order_type(&mut self, order_type: OrderType) {
        self.cart.set_order_type(order_type);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Storage failures never fail the mutation; the in-memory cart stays authoritative
    fn persist(&mut self) {
        if let Err(e) = save_cart(self.store.as_mut(), &self.cart) {
            tracing::error!(error = %e, "Failed to persist cart");
        }
    }
}

impl std::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}
