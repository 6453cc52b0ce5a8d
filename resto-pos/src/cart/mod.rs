//! Cart aggregation, session ownership and local persistence

mod engine;
mod line;
mod session;
pub mod storage;

pub use engine::Cart;
pub use line::{CartLine, LineKey, PackagingFee};
pub use session::CartSession;
pub use storage::{FileStore, LocalStore, MemoryStore};
