//! Cart change notifier.
//!
//! A payload-free broadcast raised after every cart write. Listeners are
//! called synchronously, in subscription order, on the emitting thread.
//! There is no replay: a component subscribing later must read storage
//! itself.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Name of the signal, also used as the `HX-Trigger` event on responses.
pub const CART_UPDATED_EVENT: &str = "cartUpdated";

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Broadcasts `cartUpdated` to subscribed components.
///
/// Cloning is cheap; clones share the same listener set.
#[derive(Clone, Default)]
pub struct CartNotifier {
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for CartNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl CartNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned handle is dropped.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Call every current listener in subscription order.
    ///
    /// The listener set is fixed when emission starts, so listeners may
    /// subscribe, unsubscribe or emit again without deadlocking. Listeners
    /// added during an emission wait for the next one; listeners removed
    /// during an emission are skipped if they have not run yet.
    pub fn emit(&self) {
        let listeners: Vec<(u64, Listener)> = self
            .lock()
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        tracing::trace!(listeners = listeners.len(), "Emitting cartUpdated");
        for (id, listener) in listeners {
            if self.is_subscribed(id) {
                listener();
            }
        }
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.lock().listeners.iter().any(|(live, _)| *live == id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle for a registered listener.
///
/// Dropping it (or calling [`Subscription::unsubscribe`]) removes the
/// listener. Outliving the notifier is harmless.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Subscription {
    /// Remove the listener now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // The removed listener is dropped after the lock is released: it may
        // own other subscriptions.
        let removed: Vec<(u64, Listener)> = {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            let (removed, kept) = std::mem::take(&mut registry.listeners)
                .into_iter()
                .partition(|(id, _)| *id == self.id);
            registry.listeners = kept;
            removed
        };
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> Listener) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_for = {
            let log = Arc::clone(&log);
            move |name: &'static str| -> Listener {
                let log = Arc::clone(&log);
                Arc::new(move || log.lock().unwrap_or_else(PoisonError::into_inner).push(name))
            }
        };
        (log, log_for)
    }

    #[test]
    fn test_emit_in_subscription_order() {
        let notifier = CartNotifier::new();
        let (log, listener) = recorder();

        let a = listener("a");
        let b = listener("b");
        let _sa = notifier.subscribe(move || a());
        let _sb = notifier.subscribe(move || b());

        notifier.emit();
        notifier.emit();

        let log = log.lock().unwrap_or_else(PoisonError::into_inner);
        assert_eq!(*log, ["a", "b", "a", "b"]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let notifier = CartNotifier::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let sub = {
            let hits = Arc::clone(&hits);
            notifier.subscribe(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        notifier.emit();
        assert_eq!(notifier.listener_count(), 1);

        sub.unsubscribe();
        notifier.emit();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_no_replay_for_late_subscriber() {
        let notifier = CartNotifier::new();
        notifier.emit();

        let hits = Arc::new(AtomicUsize::new(0));
        let _sub = {
            let hits = Arc::clone(&hits);
            notifier.subscribe(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clones_share_listeners() {
        let notifier = CartNotifier::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let _sub = {
            let hits = Arc::clone(&hits);
            notifier.subscribe(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };

        notifier.clone().emit();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_may_subscribe_during_emit() {
        let notifier = CartNotifier::new();
        let late: Arc<Mutex<Vec<Subscription>>> = Arc::new(Mutex::new(Vec::new()));

        let _sub = {
            let notifier = notifier.clone();
            let late = Arc::clone(&late);
            notifier.clone().subscribe(move || {
                let sub = notifier.subscribe(|| {});
                late.lock().unwrap_or_else(PoisonError::into_inner).push(sub);
            })
        };

        notifier.emit();
        assert_eq!(notifier.listener_count(), 2);
    }

    #[test]
    fn test_listener_removed_mid_emit_is_skipped() {
        let notifier = CartNotifier::new();
        let b_hits = Arc::new(AtomicUsize::new(0));
        let b_slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let _a = {
            let b_slot = Arc::clone(&b_slot);
            notifier.subscribe(move || {
                let sub = b_slot.lock().unwrap_or_else(PoisonError::into_inner).take();
                drop(sub);
            })
        };
        let b = {
            let b_hits = Arc::clone(&b_hits);
            notifier.subscribe(move || {
                b_hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        *b_slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(b);

        notifier.emit();

        assert_eq!(b_hits.load(Ordering::SeqCst), 0);
        assert_eq!(notifier.listener_count(), 1);
    }

    #[test]
    fn test_subscription_outlives_notifier() {
        let notifier = CartNotifier::new();
        let sub = notifier.subscribe(|| {});
        drop(notifier);
        drop(sub);
    }
}
