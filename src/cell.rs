//! Observable string cells.
//!
//! A cell holds exactly one image value at a time. Reads are synchronous,
//! writes notify every current subscriber with the new value. Cells are
//! shared as `Arc<ObservableCell>` and keep their identity for the lifetime
//! of the registry that created them.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

type Listener = Arc<dyn Fn(&str) + Send + Sync>;

/// A single mutable image value with change subscribers.
///
/// The value is always a string; "no image yet" is the empty string, never
/// absence. Every write notifies all current subscribers, including writes
/// that store the value already held.
pub struct ObservableCell {
    value: Mutex<String>,
    listeners: Mutex<HashMap<u64, Listener>>,
    next_id: AtomicU64,
}

impl ObservableCell {
    /// Create a cell holding the empty string.
    pub fn new() -> Self {
        Self::with_value("")
    }

    /// Create a cell holding `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(value.into()),
            listeners: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// The current value.
    pub fn get(&self) -> String {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store `value` and notify all current subscribers.
    ///
    /// Listeners run on the writing thread, outside the cell's locks, so a
    /// listener may read the cell or manage subscriptions. A subscription
    /// cancelled during notification may still observe the in-flight write.
    pub fn set(&self, value: impl Into<String>) {
        let value = value.into();
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = value.clone();

        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for listener in listeners {
            listener(&value);
        }
    }

    /// Register `listener` to run after every write, with the new value.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or cancelled.
    pub fn subscribe(
        self: &Arc<Self>,
        listener: impl Fn(&str) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(listener));
        Subscription {
            cell: Arc::downgrade(self),
            id,
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn unsubscribe(&self, id: u64) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}

impl Default for ObservableCell {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObservableCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableCell")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Guard for one cell subscription; detaches the listener when dropped.
#[derive(Debug)]
pub struct Subscription {
    cell: Weak<ObservableCell>,
    id: u64,
}

impl Subscription {
    /// Detach the listener now.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cell) = self.cell.upgrade() {
            cell.unsubscribe(self.id);
        }
    }
}
