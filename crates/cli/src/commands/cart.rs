//! `amana cart ...` subcommands.
//!
//! Each invocation mounts the same components the storefront pages use over
//! a [`FileStorage`], so the file can be shared between runs (and between
//! concurrent runs, with last-writer-wins semantics).

use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

use amana_core::BookId;
use amana_storefront::cart::{
    CartNotifier, CartOutcome, CartPage, CartStorage, HomeCart, IgnoreReason, Navbar,
    Subscription,
};
use amana_storefront::catalog::Catalog;
use amana_storefront::storage::{FileStorage, StorageError};

/// Components wired over one cart file.
pub struct CartSession {
    catalog: Arc<Catalog>,
    storage: CartStorage,
    notifier: CartNotifier,
    _log: Subscription,
}

impl CartSession {
    /// Wire the cart components over the store at `path`.
    #[must_use]
    pub fn open(path: &Path) -> Self {
        let storage = CartStorage::new(Arc::new(FileStorage::new(path)));
        let notifier = CartNotifier::new();
        let log = notifier.subscribe(|| tracing::info!("Cart updated"));

        Self {
            catalog: Arc::new(Catalog::builtin()),
            storage,
            notifier,
            _log: log,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn page(&self) -> CartPage {
        CartPage::mounted(
            Arc::clone(&self.catalog),
            self.storage.clone(),
            self.notifier.clone(),
        )
    }

    /// Render the cart.
    #[must_use]
    pub fn show(&self) -> String {
        render(&self.page())
    }

    /// Add one copy of `book_id`.
    pub fn add(&self, book_id: &str) -> Result<String, StorageError> {
        let navbar = Navbar::mount(&self.storage, &self.notifier);
        let book_id = BookId::new(book_id);
        let outcome = HomeCart::new(
            Arc::clone(&self.catalog),
            self.storage.clone(),
            self.notifier.clone(),
        )
        .add_to_cart(&book_id)?;

        Ok(match outcome {
            CartOutcome::Applied => {
                format!("Added book {book_id}. Cart now holds {} books.", navbar.count())
            }
            CartOutcome::Ignored(reason) => describe_ignored(&book_id, reason),
        })
    }

    /// Set the quantity of `book_id`.
    pub fn set(&self, book_id: &str, quantity: i64) -> Result<String, StorageError> {
        let mut page = self.page();
        let book_id = BookId::new(book_id);
        Ok(match page.update_quantity(&book_id, quantity)? {
            CartOutcome::Applied => render(&page),
            CartOutcome::Ignored(reason) => describe_ignored(&book_id, reason),
        })
    }

    /// Remove `book_id` from the cart.
    pub fn remove(&self, book_id: &str) -> Result<String, StorageError> {
        let mut page = self.page();
        let book_id = BookId::new(book_id);
        Ok(match page.remove_item(&book_id)? {
            CartOutcome::Applied => render(&page),
            CartOutcome::Ignored(reason) => describe_ignored(&book_id, reason),
        })
    }

    /// Empty the cart.
    pub fn clear(&self) -> Result<String, StorageError> {
        let mut page = self.page();
        let _ = page.clear_cart()?;
        Ok(render(&page))
    }
}

fn describe_ignored(book_id: &BookId, reason: IgnoreReason) -> String {
    let why = match reason {
        IgnoreReason::UnknownBook => "it is not in the catalog",
        IgnoreReason::NotInCart => "it is not in the cart",
        IgnoreReason::QuantityBelowMinimum => "quantity must be at least 1",
        IgnoreReason::QuantityOutOfRange => "quantity is too large",
    };
    format!("Nothing changed for book {book_id}: {why}.")
}

fn render(page: &CartPage) -> String {
    if page.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut out = format!("Shopping Cart ({} items)\n", page.item_count());
    for row in page.rows() {
        let _ = writeln!(
            out,
            "{:>3}  {:<45} {:>8} x {:<3} {:>9}",
            row.book.id.as_str(),
            row.book.title,
            row.book.price.display(),
            row.quantity,
            row.line_total().display(),
        );
    }
    let _ = write!(out, "Total: {}", page.total_price().display());
    out
}
