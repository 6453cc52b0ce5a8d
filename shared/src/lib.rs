//! Shared types for the restaurant POS workspace
//!
//! Wire contracts used by both the backend client and the cart engine:
//! catalog rows, transaction records, order enums, error codes and
//! small utilities.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
