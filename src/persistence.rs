//! Persistence: the static order source and a file-backed local key-value store.
//!
//! The store is one JSON object on disk (`key -> value`), the server-side stand-in for
//! browser local storage. Values are unversioned.

use crate::types::Order;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Parses an order list. Duplicate order ids are rejected.
pub fn parse_orders(json: &str) -> Result<Vec<Order>, String> {
    let orders: Vec<Order> = serde_json::from_str(json).map_err(|e| e.to_string())?;
    let mut seen = HashSet::new();
    for order in &orders {
        if !seen.insert(&order.id) {
            return Err(format!("duplicate order id {}", order.id));
        }
    }
    Ok(orders)
}

/// Loads the order list from a JSON file.
pub fn load_orders(path: impl AsRef<Path>) -> Result<Vec<Order>, String> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let orders = parse_orders(&data)?;
    info!("loaded {} orders from {}", orders.len(), path.display());
    Ok(orders)
}

/// File-backed key-value store. Every `set` rewrites the whole file.
#[derive(Clone, Debug)]
pub struct LocalStore {
    path: std::path::PathBuf,
}

impl LocalStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, serde_json::Value>, String> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.to_string()),
        };
        serde_json::from_str(&data).map_err(|e| e.to_string())
    }

    /// Returns the value stored under `key`, or `None` if the key or the file is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, String> {
        let mut entries = self.read_all()?;
        match entries.remove(key) {
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| e.to_string()),
            None => Ok(None),
        }
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), String> {
        let mut entries = self.read_all()?;
        let value = serde_json::to_value(value).map_err(|e| e.to_string())?;
        entries.insert(key.to_string(), value);
        let json = serde_json::to_string_pretty(&entries).map_err(|e| e.to_string())?;
        std::fs::write(&self.path, json).map_err(|e| e.to_string())
    }

    pub fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            let json = serde_json::to_string_pretty(&entries).map_err(|e| e.to_string())?;
            std::fs::write(&self.path, json).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}
