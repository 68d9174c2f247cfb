//! Add-to-cart for the catalog page.

use std::sync::Arc;

use amana_core::BookId;
use chrono::Utc;
use tracing::{debug, instrument};

use super::{CartNotifier, CartOutcome, CartStorage, IgnoreReason};
use crate::catalog::Catalog;
use crate::storage::StorageError;

/// Cart operations available from the book grid.
///
/// Holds no cart state of its own: every call reads storage, modifies the
/// lines and writes them back.
#[derive(Debug, Clone)]
pub struct HomeCart {
    catalog: Arc<Catalog>,
    storage: CartStorage,
    notifier: CartNotifier,
}

impl HomeCart {
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>, storage: CartStorage, notifier: CartNotifier) -> Self {
        Self {
            catalog,
            storage,
            notifier,
        }
    }

    /// Add one copy of a book to the cart.
    ///
    /// An existing line is incremented in place; otherwise a new line with
    /// quantity 1 is appended. Unknown books are ignored without touching
    /// storage.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the cart cannot be written.
    #[instrument(skip(self, book_id), fields(book_id = %book_id))]
    pub fn add_to_cart(&self, book_id: &BookId) -> Result<CartOutcome, StorageError> {
        if !self.catalog.contains(book_id) {
            debug!("Ignoring add for unknown book");
            return Ok(CartOutcome::Ignored(IgnoreReason::UnknownBook));
        }

        let mut lines = self.storage.load();
        let quantity = lines.increment(book_id, Utc::now());
        self.storage.save(&lines)?;
        self.notifier.emit();

        debug!(quantity, "Added to cart");
        Ok(CartOutcome::Applied)
    }
}
