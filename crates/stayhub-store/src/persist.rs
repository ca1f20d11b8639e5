//! # JSON Persistence Helpers
//!
//! Encodes values as JSON under a storage key, and reads them back.
//!
//! ```text
//!   open()                              every mutation
//!     │                                       │
//!     ▼                                       ▼
//!  load_collection(key)                save_collection(key, items)
//!     │                                       │
//!     ├── missing key      → []               └── serde_json::to_string
//!     ├── storage error    → [] + warn             └── set_item(key, json)
//!     ├── unparsable JSON  → [] + warn                  └── error → caller
//!     ├── not an array     → [] + warn
//!     └── array            → each element decoded on its own;
//!                            unreadable elements skipped + warn
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::storage::KeyValueStorage;

/// Reads the array stored under `key`.
///
/// Never fails: a missing key, a storage read failure, or corrupted JSON all
/// produce an empty collection so the application stays usable. Elements are
/// decoded one at a time; one that does not match `T` is dropped and the rest
/// are kept, in order.
pub fn load_collection<T, S>(storage: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    let elements: Vec<Value> = match load_value(storage, key) {
        Some(elements) => elements,
        None => return Vec::new(),
    };

    let total = elements.len();
    let items: Vec<T> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(key = %key, index, error = %e, "Skipping unreadable persisted entry");
                None
            }
        })
        .collect();

    if items.len() < total {
        warn!(
            key = %key,
            kept = items.len(),
            skipped = total - items.len(),
            "Loaded collection with unreadable entries"
        );
    }
    items
}

/// Reads the single value stored under `key`; `None` on any failure.
pub fn load_value<T, S>(storage: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key = %key, "No persisted value");
            return None;
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read persisted value; starting empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Persisted value is corrupted; starting empty");
            None
        }
    }
}

/// Writes `items` as a JSON array under `key`.
pub fn save_collection<T, S>(storage: &S, key: &str, items: &[T]) -> StoreResult<()>
where
    T: Serialize,
    S: KeyValueStorage + ?Sized,
{
    save_value(storage, key, items)
}

/// Writes `value` as JSON under `key`.
pub fn save_value<T, S>(storage: &S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)?;
    debug!(key = %key, bytes = json.len(), "Persisted value");
    Ok(())
}
