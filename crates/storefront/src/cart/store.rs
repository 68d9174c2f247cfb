//! Cart storage adapter.

use std::sync::Arc;

use amana_core::CartLines;
use tracing::{debug, warn};

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Reads and writes the cart as a JSON array under [`CART_STORAGE_KEY`].
///
/// Cloning is cheap; clones share the backend.
#[derive(Clone)]
pub struct CartStorage {
    backend: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for CartStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStorage")
            .field("key", &CART_STORAGE_KEY)
            .finish_non_exhaustive()
    }
}

impl CartStorage {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStorage>) -> Self {
        Self { backend }
    }

    /// Load the persisted cart.
    ///
    /// Never fails: an absent key, an unreadable backend or a value that is
    /// not a valid cart all yield an empty cart. The stored value is left
    /// untouched; the next save overwrites it.
    #[must_use]
    pub fn load(&self) -> CartLines {
        let raw = match self.backend.get_item(CART_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CartLines::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read cart from storage");
                return CartLines::new();
            }
        };

        match serde_json::from_str::<CartLines>(&raw) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(error = %e, "Failed to parse cart from storage");
                CartLines::new()
            }
        }
    }

    /// Overwrite the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the write is rejected.
    pub fn save(&self, lines: &CartLines) -> Result<(), StorageError> {
        let raw = serde_json::to_string(lines)?;
        self.backend.set_item(CART_STORAGE_KEY, &raw)?;
        debug!(lines = lines.len(), "Cart saved");
        Ok(())
    }

    /// Remove the persisted cart entirely.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the removal is rejected.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove_item(CART_STORAGE_KEY)?;
        debug!("Cart cleared");
        Ok(())
    }

    /// Whether a cart value is currently stored (valid or not).
    #[must_use]
    pub fn is_stored(&self) -> bool {
        matches!(self.backend.get_item(CART_STORAGE_KEY), Ok(Some(_)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use amana_core::BookId;
    use chrono::Utc;

    use super::*;
    use crate::storage::MemoryStorage;

    fn storage() -> (Arc<MemoryStorage>, CartStorage) {
        let backend = Arc::new(MemoryStorage::new());
        (backend.clone(), CartStorage::new(backend))
    }

    #[test]
    fn test_absent_key_loads_empty() {
        let (_, cart) = storage();
        assert!(cart.load().is_empty());
        assert!(!cart.is_stored());
    }

    #[test]
    fn test_not_json_loads_empty_and_keeps_value() {
        let (backend, cart) = storage();
        backend.set_item(CART_STORAGE_KEY, "not json").unwrap();

        assert!(cart.load().is_empty());
        assert_eq!(
            backend.get_item(CART_STORAGE_KEY).unwrap().as_deref(),
            Some("not json")
        );
    }

    #[test]
    fn test_wrong_shape_loads_empty() {
        let (backend, cart) = storage();
        backend
            .set_item(CART_STORAGE_KEY, r#"{"bookId":"1"}"#)
            .unwrap();
        assert!(cart.load().is_empty());

        backend
            .set_item(
                CART_STORAGE_KEY,
                r#"[{"id":"1-1","bookId":"1","quantity":-2,"addedAt":"2024-01-01T00:00:00Z"}]"#,
            )
            .unwrap();
        assert!(cart.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let (_, cart) = storage();
        let mut lines = CartLines::new();
        lines.increment(&BookId::new("1"), Utc::now());
        lines.increment(&BookId::new("2"), Utc::now());

        cart.save(&lines).unwrap();
        assert_eq!(cart.load(), lines);
    }

    #[test]
    fn test_saved_value_is_json_array() {
        let (backend, cart) = storage();
        let mut lines = CartLines::new();
        lines.increment(&BookId::new("1"), Utc::now());
        cart.save(&lines).unwrap();

        let raw = backend.get_item(CART_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["bookId"], "1");
    }

    #[test]
    fn test_clear_removes_key() {
        let (_, cart) = storage();
        cart.save(&CartLines::new()).unwrap();
        assert!(cart.is_stored());

        cart.clear().unwrap();
        assert!(!cart.is_stored());
    }

    #[test]
    fn test_write_failure_propagates() {
        let cart = CartStorage::new(Arc::new(MemoryStorage::new().with_fail_writes(true)));
        assert!(cart.save(&CartLines::new()).is_err());
        assert!(cart.clear().is_err());
    }
}
