//! Modifier selection for one product instance
//!
//! [`ModifierSelection`] tracks the in-progress choices while the modifier
//! prompt is open; [`validate`] gates the commit into the cart.

mod selection;
mod validation;

pub use selection::{ModifierSelection, RejectReason, ToggleOutcome};
pub use validation::validate;
