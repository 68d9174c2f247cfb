//! Cart model shared by every page.
//!
//! # Data flow
//!
//! ```text
//! user action -> view model (HomeCart / CartPage)
//!             -> CartStorage::save / clear      (persist under "cart")
//!             -> CartNotifier::emit             ("cartUpdated")
//!             -> listeners (Navbar) re-read CartStorage
//! ```
//!
//! Storage is the only source of truth. View models hold a disposable
//! projection built on mount, and components never share in-memory cart
//! state; they share the storage backend and the notifier, both injected.
//!
//! Two mounted view models that each save a full cart overwrite one another:
//! the last save wins and nothing is merged.

mod home;
mod navbar;
mod notifier;
mod page;
mod store;

pub use home::HomeCart;
pub use navbar::Navbar;
pub use notifier::{CART_UPDATED_EVENT, CartNotifier, Subscription};
pub use page::{CartPage, CartViewRow};
pub use store::{CART_STORAGE_KEY, CartStorage};

/// Result of a cart mutation.
///
/// Invalid mutations are silent no-ops; callers that care can inspect this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CartOutcome {
    /// Storage was rewritten and `cartUpdated` emitted.
    Applied,
    /// Nothing was persisted and nothing emitted.
    Ignored(IgnoreReason),
}

impl CartOutcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Why a mutation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The book ID is not in the catalog.
    UnknownBook,
    /// The book has no row on this page.
    NotInCart,
    /// Requested quantity is below 1.
    QuantityBelowMinimum,
    /// Requested quantity does not fit a cart line.
    QuantityOutOfRange,
}
