//! Cart page view model.

use std::sync::Arc;

use amana_core::{Book, BookId, CartLines, Price};
use tracing::{debug, instrument};

use super::{CartNotifier, CartOutcome, CartStorage, IgnoreReason};
use crate::catalog::Catalog;
use crate::storage::StorageError;

/// A cart line joined with its catalog record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartViewRow<'a> {
    pub book: &'a Book,
    pub quantity: u32,
}

impl CartViewRow<'_> {
    /// `price * quantity` for this row.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.book.price.times(self.quantity)
    }
}

/// State behind the cart page.
///
/// Lines are read once in [`CartPage::mount`]; lines whose book is missing
/// from the catalog are dropped from the page (and from storage on the next
/// write). Every mutation rewrites the full cart and emits `cartUpdated`.
/// Lines keep their original id and `addedAt` across rewrites.
#[derive(Debug)]
pub struct CartPage {
    catalog: Arc<Catalog>,
    storage: CartStorage,
    notifier: CartNotifier,
    lines: CartLines,
    loading: bool,
}

impl CartPage {
    /// Create an unmounted page. [`CartPage::is_loading`] is true until
    /// [`CartPage::mount`] runs.
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>, storage: CartStorage, notifier: CartNotifier) -> Self {
        Self {
            catalog,
            storage,
            notifier,
            lines: CartLines::new(),
            loading: true,
        }
    }

    /// Create and mount a page in one step.
    #[must_use]
    pub fn mounted(catalog: Arc<Catalog>, storage: CartStorage, notifier: CartNotifier) -> Self {
        let mut page = Self::new(catalog, storage, notifier);
        page.mount();
        page
    }

    /// Read the persisted cart and join it against the catalog.
    pub fn mount(&mut self) {
        let mut lines = self.storage.load();
        let stored = lines.len();
        lines.retain(|line| self.catalog.contains(&line.book_id));

        if lines.len() < stored {
            debug!(
                dropped = stored - lines.len(),
                "Dropped cart lines with no catalog entry"
            );
        }

        self.lines = lines;
        self.loading = false;
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Rows in cart order.
    pub fn rows(&self) -> impl Iterator<Item = CartViewRow<'_>> {
        self.lines.iter().filter_map(|line| {
            self.catalog.find(&line.book_id).map(|book| CartViewRow {
                book,
                quantity: line.quantity,
            })
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct books in the cart.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of `price * quantity` over all rows.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.rows().map(|row| row.line_total()).sum()
    }

    /// The lines this page would persist.
    #[must_use]
    pub const fn lines(&self) -> &CartLines {
        &self.lines
    }

    /// Set a row's quantity.
    ///
    /// Quantities below 1 and books without a row are ignored: nothing is
    /// changed, written or emitted.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the cart cannot be written. The page
    /// keeps the new quantity in that case.
    #[instrument(skip(self, book_id), fields(book_id = %book_id))]
    pub fn update_quantity(
        &mut self,
        book_id: &BookId,
        new_quantity: i64,
    ) -> Result<CartOutcome, StorageError> {
        if new_quantity < 1 {
            return Ok(CartOutcome::Ignored(IgnoreReason::QuantityBelowMinimum));
        }
        let Ok(quantity) = u32::try_from(new_quantity) else {
            return Ok(CartOutcome::Ignored(IgnoreReason::QuantityOutOfRange));
        };
        if !self.lines.set_quantity(book_id, quantity) {
            return Ok(CartOutcome::Ignored(IgnoreReason::NotInCart));
        }

        self.persist()?;
        Ok(CartOutcome::Applied)
    }

    /// Remove a row.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the cart cannot be written.
    #[instrument(skip(self, book_id), fields(book_id = %book_id))]
    pub fn remove_item(&mut self, book_id: &BookId) -> Result<CartOutcome, StorageError> {
        if self.lines.remove(book_id).is_none() {
            return Ok(CartOutcome::Ignored(IgnoreReason::NotInCart));
        }

        self.persist()?;
        Ok(CartOutcome::Applied)
    }

    /// Empty the page and remove the stored cart.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the key cannot be removed.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<CartOutcome, StorageError> {
        self.lines = CartLines::new();
        self.storage.clear()?;
        self.notifier.emit();
        Ok(CartOutcome::Applied)
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.storage.save(&self.lines)?;
        self.notifier.emit();
        Ok(())
    }
}
