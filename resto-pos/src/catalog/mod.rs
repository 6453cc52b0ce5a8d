//! Catalog snapshot
//!
//! In-memory products, modifier groups and items, loaded once per screen
//! and replaced wholesale on refresh. Read-only to the cart engine.

mod model;
mod snapshot;

pub use model::{ModifierGroup, ModifierItem, Product};
pub use snapshot::{Catalog, CatalogRows};

use async_trait::async_trait;

use crate::checkout::StoreError;

/// Where catalog rows come from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<CatalogRows, StoreError>;
}
