//! Order totals
//!
//! Amounts are integers in the smallest currency unit; tax is computed with
//! `rust_decimal` and rounded half away from zero.

use rust_decimal::prelude::*;

/// Subtotal, tax and total of one order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

/// Tax rate as a whole percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(u32);

impl TaxRate {
    pub const fn percent(value: u32) -> Self {
        Self(value)
    }

    pub fn as_percent(&self) -> u32 {
        self.0
    }

    /// `round(amount * rate)`
    pub fn tax_on(&self, amount: i64) -> i64 {
        let tax = Decimal::from(amount) * Decimal::from(self.0) / Decimal::ONE_HUNDRED;
        tax.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or_default()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::percent(10)
    }
}

impl OrderTotals {
    pub fn compute(subtotal: i64, rate: TaxRate) -> Self {
        let tax = rate.tax_on(subtotal);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_percent() {
        let totals = OrderTotals::compute(50000, TaxRate::default());
        assert_eq!(totals.tax, 5000);
        assert_eq!(totals.total, 55000);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 12345 * 10% = 1234.5
        assert_eq!(TaxRate::percent(10).tax_on(12345), 1235);
        // 12344 * 10% = 1234.4
        assert_eq!(TaxRate::percent(10).tax_on(12344), 1234);
        assert_eq!(TaxRate::percent(11).tax_on(33000), 3630);
        assert_eq!(TaxRate::percent(0).tax_on(99999), 0);
    }

    #[test]
    fn test_zero_subtotal() {
        let totals = OrderTotals::compute(0, TaxRate::default());
        assert_eq!(totals, OrderTotals { subtotal: 0, tax: 0, total: 0 });
    }
}
