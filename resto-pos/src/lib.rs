//! Resto POS - cart and modifier pricing engine
//!
//! - [`catalog`]: read-only product / modifier snapshot
//! - [`modifiers`]: per-product modifier selection and required-group validation
//! - [`stock`]: sellability gate
//! - [`cart`]: cart aggregation, packaging fee, session and local storage
//! - [`pricing`]: tax and totals
//! - [`checkout`]: order submission to the hosted backend
//!
//! All cart mutations are synchronous; only checkout and catalog loading await
//! the network.

pub mod backend;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod error;
pub mod modifiers;
pub mod pricing;
pub mod stock;
pub mod utils;

pub use backend::LoggedNotifier;
pub use cart::{Cart, CartLine, CartSession, LineKey, PackagingFee};
pub use catalog::{Catalog, CatalogSource};
pub use checkout::{CheckoutError, CheckoutReceipt, CheckoutRequest, CheckoutSubmitter, Customer};
pub use crate::core::Config;
pub use modifiers::{ModifierSelection, ToggleOutcome};
pub use pricing::{OrderTotals, TaxRate};
