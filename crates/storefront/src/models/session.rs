//! Per-visitor local storage kept in the session.
//!
//! Each visitor gets a string key-value map stored in their session, standing
//! in for the browser's local storage. A request hydrates the map into a
//! [`MemoryStorage`], the cart components run against it, and the map is
//! written back if anything changed.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tower_sessions::Session;

use crate::cart::{CartNotifier, CartStorage, Subscription};
use crate::storage::MemoryStorage;

/// Session keys.
pub mod keys {
    /// Key holding the visitor's local storage map.
    pub const LOCAL_STORAGE: &str = "local_storage";
}

/// One request's view of a visitor's local storage.
///
/// Owns the request's [`CartNotifier`]. The first `cartUpdated` emitted
/// during the request marks the storage dirty; [`VisitorStorage::persist`]
/// then writes it back and reports that the signal fired.
pub struct VisitorStorage {
    backend: Arc<MemoryStorage>,
    notifier: CartNotifier,
    updated: Arc<AtomicBool>,
    _watch: Subscription,
}

impl VisitorStorage {
    /// Load the visitor's storage from the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn hydrate(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        let entries = session
            .get::<HashMap<String, String>>(keys::LOCAL_STORAGE)
            .await?
            .unwrap_or_default();

        Ok(Self::from_entries(entries))
    }

    /// Build from an explicit entry map.
    #[must_use]
    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        let notifier = CartNotifier::new();
        let updated = Arc::new(AtomicBool::new(false));
        let watch = {
            let updated = Arc::clone(&updated);
            notifier.subscribe(move || updated.store(true, Ordering::SeqCst))
        };

        Self {
            backend: Arc::new(MemoryStorage::from_entries(entries)),
            notifier,
            updated,
            _watch: watch,
        }
    }

    /// Cart adapter over this visitor's storage.
    #[must_use]
    pub fn cart_storage(&self) -> CartStorage {
        CartStorage::new(self.backend.clone())
    }

    /// The request's cart notifier.
    #[must_use]
    pub const fn notifier(&self) -> &CartNotifier {
        &self.notifier
    }

    /// Whether `cartUpdated` fired during this request.
    #[must_use]
    pub fn was_updated(&self) -> bool {
        self.updated.load(Ordering::SeqCst)
    }

    /// Current storage contents.
    #[must_use]
    pub fn entries(&self) -> HashMap<String, String> {
        self.backend.snapshot()
    }

    /// Write the storage back to the session if the cart changed.
    ///
    /// Returns whether `cartUpdated` fired during the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn persist(self, session: &Session) -> Result<bool, tower_sessions::session::Error> {
        if !self.was_updated() {
            return Ok(false);
        }

        let entries = self.entries();
        session.insert(keys::LOCAL_STORAGE, entries).await?;
        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use amana_core::BookId;

    use super::*;
    use crate::cart::{CART_STORAGE_KEY, HomeCart};
    use crate::catalog::Catalog;

    #[test]
    fn test_add_marks_updated() {
        let visitor = VisitorStorage::from_entries(HashMap::new());
        assert!(!visitor.was_updated());

        HomeCart::new(
            Arc::new(Catalog::builtin()),
            visitor.cart_storage(),
            visitor.notifier().clone(),
        )
        .add_to_cart(&BookId::new("1"))
        .unwrap();

        assert!(visitor.was_updated());
        assert!(visitor.entries().contains_key(CART_STORAGE_KEY));
    }

    #[test]
    fn test_ignored_add_stays_clean() {
        let visitor = VisitorStorage::from_entries(HashMap::new());
        HomeCart::new(
            Arc::new(Catalog::builtin()),
            visitor.cart_storage(),
            visitor.notifier().clone(),
        )
        .add_to_cart(&BookId::new("missing"))
        .unwrap();

        assert!(!visitor.was_updated());
    }

    #[test]
    fn test_unrelated_entries_survive() {
        let entries = HashMap::from([("theme".to_string(), "dark".to_string())]);
        let visitor = VisitorStorage::from_entries(entries);
        visitor.cart_storage().clear().unwrap();

        assert_eq!(visitor.entries().get("theme").map(String::as_str), Some("dark"));
    }
}
