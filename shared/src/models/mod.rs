//! Data models
//!
//! Row contracts of the hosted data store tables the POS reads and writes.
//! Field names follow the table columns.

pub mod modifier;
pub mod product;
pub mod transaction;

pub use modifier::*;
pub use product::*;
pub use transaction::*;
