//! Cart aggregation engine
//!
//! Pure, synchronous cart state. Persistence lives in
//! [`CartSession`](super::CartSession).

use shared::order::{OrderType, SelectedModifier};

use super::line::{CartLine, LineKey, PackagingFee, sorted_modifier_ids};
use crate::catalog::Product;

/// Ordered cart lines plus the order type
///
/// Setting the order type, clearing and restoring leave exactly one
/// packaging-fee line for `Take Away` and none for `Dine In`. Line edits
/// apply to the fee line like any other line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    order_type: OrderType,
    packaging: PackagingFee,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(PackagingFee::default())
    }
}

impl Cart {
    /// Empty dine-in cart
    pub fn new(packaging: PackagingFee) -> Self {
        Self {
            lines: Vec::new(),
            order_type: OrderType::DineIn,
            packaging,
        }
    }

    /// Rebuild from stored state
    ///
    /// Zero-quantity lines are dropped, modifier totals recomputed and the
    /// packaging-fee invariant re-applied for `order_type`.
    pub fn restore(lines: Vec<CartLine>, order_type: OrderType, packaging: PackagingFee) -> Self {
        let before = lines.len();
        let mut lines: Vec<CartLine> = lines.into_iter().filter(|l| l.quantity > 0).collect();
        for line in &mut lines {
            line.refresh_modifier_total();
        }
        if lines.len() != before {
            tracing::warn!(
                dropped = before - lines.len(),
                "Dropped zero-quantity lines from stored cart"
            );
        }

        let mut cart = Self {
            lines,
            order_type,
            packaging,
        };
        cart.apply_packaging_rule();
        cart
    }

    // ==================== Mutations ====================

    /// Add one unit of `product` with `modifiers` and `note`
    ///
    /// An identical line (same product, modifier set and note) gets its
    /// quantity bumped; otherwise a new line is appended. Never fails.
    pub fn add_line(
        &mut self,
        product: &Product,
        modifiers: Vec<SelectedModifier>,
        note: &str,
    ) -> LineKey {
        let ids = sorted_modifier_ids(&modifiers);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(&product.id, &ids, note))
        {
            line.quantity = line.quantity.saturating_add(1);
            tracing::debug!(product_id = %product.id, quantity = line.quantity, "Cart line merged");
            return line.key();
        }

        let mut line = CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            base_price: product.base_price,
            category: product.category.clone(),
            quantity: 1,
            note: note.to_string(),
            selected_modifiers: modifiers,
            modifier_total: 0,
        };
        line.refresh_modifier_total();
        let key = line.key();
        tracing::debug!(product_id = %product.id, line_key = %key, "Cart line added");
        self.lines.push(line);
        key
    }

    /// Set the quantity of a line; `<= 0` removes it
    ///
    /// Returns whether a line was affected.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_line(key);
        }
        let Some(index) = self.position(key) else {
            return false;
        };
        self.lines[index].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        true
    }

    /// Change the quantity of a line by `delta`; a result `<= 0` removes it
    pub fn adjust_quantity(&mut self, key: &LineKey, delta: i64) -> bool {
        match self.line(key) {
            Some(line) => {
                let next = i64::from(line.quantity) + delta;
                self.update_quantity(key, next)
            }
            None => false,
        }
    }

    /// Remove a line; no-op when absent
    pub fn remove_line(&mut self, key: &LineKey) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        let removed = self.lines.remove(index);
        tracing::debug!(product_id = %removed.product_id, line_key = %key, "Cart line removed");
        true
    }

    /// Switch order type and apply the packaging-fee rule. Idempotent.
    pub fn set_order_type(&mut self, order_type: OrderType) {
        self.order_type = order_type;
        self.apply_packaging_rule();
    }

    /// Drop every line; the packaging-fee rule still holds afterwards
    pub fn clear(&mut self) {
        self.lines.clear();
        self.apply_packaging_rule();
    }

    fn apply_packaging_rule(&mut self) {
        match self.order_type {
            OrderType::TakeAway => {
                let mut seen = false;
                let packaging = &self.packaging;
                self.lines.retain(|l| {
                    if !packaging.matches(l) {
                        return true;
                    }
                    // Keep only the first fee line
                    let keep = !seen;
                    seen = true;
                    keep
                });
                if !seen {
                    self.lines.push(self.packaging.line());
                    tracing::debug!("Packaging fee added");
                }
            }
            OrderType::DineIn => {
                let packaging = &self.packaging;
                let before = self.lines.len();
                self.lines.retain(|l| !packaging.matches(l));
                if self.lines.len() != before {
                    tracing::debug!("Packaging fee removed");
                }
            }
        }
    }

    // ==================== Reads ====================

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.lines.iter().position(|l| &l.key() == key)
    }

    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.key() == key)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn packaging(&self) -> &PackagingFee {
        &self.packaging
    }

    pub fn is_packaging_line(&self, line: &CartLine) -> bool {
        self.packaging.matches(line)
    }

    /// Σ quantity
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Σ quantity × (base price + modifier total)
    pub fn total_price(&self) -> i64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// No lines other than the packaging fee
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| self.packaging.matches(l))
    }
}
