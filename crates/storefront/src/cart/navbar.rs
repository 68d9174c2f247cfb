//! Navigation bar cart badge.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::{CartNotifier, CartStorage, Subscription};

/// Item count shown in the navigation bar.
///
/// The navbar is never handed a count. It reads storage when mounted and
/// again on every `cartUpdated`; unmounting drops the subscription.
#[derive(Debug)]
pub struct Navbar {
    count: Arc<AtomicU32>,
    _subscription: Subscription,
}

impl Navbar {
    /// Mount the navbar: read the current count and start listening.
    #[must_use]
    pub fn mount(storage: &CartStorage, notifier: &CartNotifier) -> Self {
        let count = Arc::new(AtomicU32::new(storage.load().total_quantity()));

        let subscription = {
            let count = Arc::clone(&count);
            let storage = storage.clone();
            notifier.subscribe(move || {
                count.store(storage.load().total_quantity(), Ordering::SeqCst);
            })
        };

        Self {
            count,
            _subscription: subscription,
        }
    }

    /// Total number of copies in the cart, as last observed.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }

    /// Stop listening for cart changes.
    pub fn unmount(self) {
        drop(self);
    }
}
