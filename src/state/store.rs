//! Observable holder of the current [`AsyncState`] of one operation.
//!
//! Delivery is synchronous: `set` hands the new value to every observer that
//! was registered when the call started, in subscription order, before it
//! returns. A re-entrant delivery lock serializes `set` and `subscribe`
//! across threads, so observers see transitions in the order the writers
//! acquired the lock.
//!
//! An observer may write to the same store from inside its callback. The
//! nested `set` updates the current value at once but its delivery is queued
//! until the outer delivery finishes, so every observer receives values in
//! write order and the last value it sees is the one the store holds.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use tokio::sync::mpsc;

use crate::state::async_state::{AsyncState, Status};

type Callback<T> = Arc<dyn Fn(&AsyncState<T>) + Send + Sync>;

struct Observer<T> {
    id: u64,
    callback: Callback<T>,
}

struct Shared<T> {
    current: RwLock<AsyncState<T>>,
    observers: Mutex<Vec<Observer<T>>>,
    delivery: ReentrantMutex<()>,
    /// Set while the outermost `set` is notifying; guarded by `delivery`.
    delivering: AtomicBool,
    /// Values written by observers during a delivery, oldest first.
    pending: Mutex<VecDeque<AsyncState<T>>>,
    next_id: AtomicU64,
}

/// Clears the delivering flag even if a callback panics.
struct DeliveryFlag<'a>(&'a AtomicBool);

impl Drop for DeliveryFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Shared, observable cell for one logical remote operation.
///
/// Cloning yields another handle to the same cell.
pub struct StateStore<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for StateStore<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for StateStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StateStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a store holding `AsyncState::for_init()`.
    pub fn new() -> Self {
        Self::with_initial(AsyncState::for_init())
    }

    /// Create a store seeded with `initial`.
    pub fn with_initial(initial: AsyncState<T>) -> Self {
        Self {
            shared: Arc::new(Shared {
                current: RwLock::new(initial),
                observers: Mutex::new(Vec::new()),
                delivery: ReentrantMutex::new(()),
                delivering: AtomicBool::new(false),
                pending: Mutex::new(VecDeque::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn read(&self) -> AsyncState<T> {
        self.shared.current.read().clone()
    }

    /// Phase of the current state, without cloning the payload.
    pub fn status(&self) -> Status {
        self.shared.current.read().status()
    }

    /// Replace the current state and notify observers.
    pub fn set(&self, next: AsyncState<T>) {
        let _delivery = self.shared.delivery.lock();

        *self.shared.current.write() = next.clone();

        if self.shared.delivering.swap(true, Ordering::Relaxed) {
            // Called from a callback; the outer `set` delivers it.
            self.shared.pending.lock().push_back(next);
            return;
        }
        let _flag = DeliveryFlag(&self.shared.delivering);

        let mut queued = Some(next);
        while let Some(state) = queued {
            self.deliver(&state);
            queued = self.shared.pending.lock().pop_front();
        }
    }

    fn deliver(&self, state: &AsyncState<T>) {
        // Snapshot so observers added during delivery miss this value.
        let callbacks: Vec<Callback<T>> = self
            .shared
            .observers
            .lock()
            .iter()
            .map(|observer| Arc::clone(&observer.callback))
            .collect();

        tracing::trace!(
            status = %state.status(),
            observers = callbacks.len(),
            "state store updated"
        );

        for callback in callbacks {
            callback(state);
        }
    }

    /// Equivalent to `set(AsyncState::for_init())`.
    pub fn reset(&self) {
        self.set(AsyncState::for_init());
    }

    /// Register a callback.
    ///
    /// The callback is invoked immediately with the current state, then on
    /// every `set` until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<T>
    where
        F: Fn(&AsyncState<T>) + Send + Sync + 'static,
    {
        let _delivery = self.shared.delivery.lock();

        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let callback: Callback<T> = Arc::new(callback);
        self.shared.observers.lock().push(Observer {
            id,
            callback: Arc::clone(&callback),
        });

        let current = self.read();
        callback(&current);

        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Open an independent sequence of states starting at the current one.
    pub fn observe(&self) -> StateObserver<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe(move |state| {
            // The receiver lives as long as the subscription; a failed send
            // only happens while the observer is being dropped.
            let _ = tx.send(state.clone());
        });
        StateObserver {
            rx,
            _subscription: subscription,
        }
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.shared.observers.lock().len()
    }
}

/// Registration handle returned by [`StateStore::subscribe`].
///
/// Dropping it unregisters the callback.
pub struct Subscription<T> {
    id: u64,
    shared: Weak<Shared<T>>,
}

impl<T> Subscription<T> {
    /// Stop receiving notifications.
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.observers.lock().retain(|observer| observer.id != self.id);
        }
    }
}

/// Per-subscriber stream of states produced by [`StateStore::observe`].
///
/// The first item is the state current at subscription time; each later
/// item corresponds to one `set`. The sequence ends once every handle to the
/// store has been dropped.
pub struct StateObserver<T> {
    rx: mpsc::UnboundedReceiver<AsyncState<T>>,
    _subscription: Subscription<T>,
}

impl<T> StateObserver<T> {
    /// Wait for the next state.
    pub async fn next(&mut self) -> Option<AsyncState<T>> {
        self.rx.recv().await
    }

    /// Take the next already-delivered state, if any.
    pub fn try_next(&mut self) -> Option<AsyncState<T>> {
        self.rx.try_recv().ok()
    }
}
