//! Auth-change observer registry
//!
//! A plain observer list: callbacks are registered, receive a payload-free
//! notification after every session change, and are removed through the
//! [`Subscription`] returned at registration.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Observers {
    next_id: u64,
    callbacks: Vec<(u64, Callback)>,
}

/// Registry of auth-change observers.
#[derive(Default)]
pub struct ObserverRegistry {
    inner: Arc<Mutex<Observers>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut observers = self.inner.lock();
        let id = observers.next_id;
        observers.next_id += 1;
        observers.callbacks.push((id, Arc::new(callback)));

        Subscription {
            registry: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Invoke every registered callback, in registration order.
    ///
    /// Callbacks run on the calling thread after the registry lock is
    /// released, so a callback may read the session, subscribe, or
    /// unsubscribe itself. Observers added during a notification first hear
    /// the next one.
    pub fn notify(&self) {
        let snapshot: Vec<Callback> = self
            .inner
            .lock()
            .callbacks
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in snapshot {
            callback();
        }
    }

    /// Number of registered observers
    pub fn len(&self) -> usize {
        self.inner.lock().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.len())
            .finish()
    }
}

/// Handle to a registered observer.
///
/// Dropping the handle does not unregister the observer; call
/// [`unsubscribe`](Subscription::unsubscribe).
#[derive(Debug)]
#[must_use = "the observer stays registered until `unsubscribe` is called"]
pub struct Subscription {
    registry: Weak<Mutex<Observers>>,
    id: u64,
}

impl Subscription {
    /// Remove this observer. Other observers are unaffected.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .callbacks
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        (count, move || {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_every_observer_is_notified() {
        let registry = ObserverRegistry::new();
        let (a, on_a) = counter();
        let (b, on_b) = counter();
        let _sa = registry.subscribe(on_a);
        let _sb = registry.subscribe(on_b);

        registry.notify();
        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_only_removes_one() {
        let registry = ObserverRegistry::new();
        let (a, on_a) = counter();
        let (b, on_b) = counter();
        let sa = registry.subscribe(on_a);
        let _sb = registry.subscribe(on_b);

        sa.unsubscribe();
        registry.notify();
        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unsubscribe_after_registry_dropped() {
        let registry = ObserverRegistry::new();
        let subscription = registry.subscribe(|| {});
        drop(registry);
        subscription.unsubscribe();
    }

    #[test]
    fn test_callback_can_touch_registry() {
        let registry = Arc::new(ObserverRegistry::new());
        let inner = Arc::clone(&registry);
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in_cb = Arc::clone(&seen);
        let _s = registry.subscribe(move || {
            seen_in_cb.store(inner.len(), Ordering::SeqCst);
        });

        registry.notify();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
