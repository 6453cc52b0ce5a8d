//! Durable client-local storage for the cart
//!
//! Two well-known keys: [`CART_KEY`] holds the JSON array of lines,
//! [`ORDER_TYPE_KEY`] holds the raw order-type label.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use shared::order::OrderType;

use super::engine::Cart;
use super::line::{CartLine, PackagingFee};
use crate::error::StorageError;

pub const CART_KEY: &str = "resto_cart";
pub const ORDER_TYPE_KEY: &str = "resto_order_type";

/// String key-value store surviving restarts
pub trait LocalStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// One file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves a half-written value
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Write lines and order type
pub fn save_cart(store: &mut dyn LocalStore, cart: &Cart) -> Result<(), StorageError> {
    let lines = serde_json::to_string(cart.lines())?;
    store.set(CART_KEY, &lines)?;
    store.set(ORDER_TYPE_KEY, cart.order_type().label())?;
    Ok(())
}

/// Read the stored cart; anything unreadable yields an empty cart
pub fn load_cart(store: &dyn LocalStore, packaging: PackagingFee) -> Cart {
    let lines = match read_lines(store) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(error = %e, "Stored cart unreadable, starting empty");
            Vec::new()
        }
    };
    let order_type = match read_order_type(store) {
        Ok(order_type) => order_type,
        Err(e) => {
            tracing::warn!(error = %e, "Stored order type unreadable, using Dine In");
            OrderType::default()
        }
    };
    Cart::restore(lines, order_type, packaging)
}

fn read_lines(store: &dyn LocalStore) -> Result<Vec<CartLine>, StorageError> {
    match store.get(CART_KEY)? {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
        _ => Ok(Vec::new()),
    }
}

/// Accepts the raw label (`Take Away`) as well as a JSON string (`"Take Away"`)
fn read_order_type(store: &dyn LocalStore) -> Result<OrderType, StorageError> {
    let Some(raw) = store.get(ORDER_TYPE_KEY)? else {
        return Ok(OrderType::default());
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(OrderType::default());
    }
    if let Ok(order_type) = raw.parse::<OrderType>() {
        return Ok(order_type);
    }
    Ok(serde_json::from_str::<OrderType>(raw)?)
}
