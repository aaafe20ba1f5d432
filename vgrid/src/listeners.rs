//! Listener lists with RAII subscriptions, and the host-wide [`Document`].
//!
//! A list stores only `Weak` references to its callbacks. The strong
//! reference lives in the [`Subscription`] returned by `subscribe`, so
//! dropping the guard makes the callback unreachable at once, including
//! for the rest of a dispatch that is already running.
//!
//! Dispatch snapshots the list and releases its lock before invoking any
//! callback. Callbacks may therefore subscribe, drop subscriptions, or
//! mutate other components while they run.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use crate::event::{PointerEvent, PointerKind};

type Callback<E> = dyn Fn(&E) + Send + Sync;

/// A list of callbacks for events of type `E`.
pub struct Listeners<E> {
    inner: Arc<RwLock<Vec<Weak<Callback<E>>>>>,
}

impl<E> Clone for Listeners<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: 'static> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("live", &self.len())
            .finish()
    }
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a callback. It stays registered until the returned guard is dropped.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, callback: impl Fn(&E) + Send + Sync + 'static) -> Subscription {
        let strong: Arc<Callback<E>> = Arc::new(callback);
        if let Ok(mut guard) = self.inner.write() {
            guard.retain(|weak| weak.strong_count() > 0);
            guard.push(Arc::downgrade(&strong));
        }
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Invoke every live callback with `event`. Returns how many ran.
    pub fn emit(&self, event: &E) -> usize {
        let snapshot: Vec<Weak<Callback<E>>> = match self.inner.write() {
            Ok(mut guard) => {
                guard.retain(|weak| weak.strong_count() > 0);
                guard.clone()
            }
            Err(_) => return 0,
        };

        let mut called = 0;
        for weak in snapshot {
            // Upgrade lazily: a callback earlier in this loop may have
            // dropped a later one's subscription.
            if let Some(callback) = weak.upgrade() {
                callback(event);
                called += 1;
            }
        }
        called
    }

    /// Number of callbacks whose subscription is still alive.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .map(|g| g.iter().filter(|weak| weak.strong_count() > 0).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// RAII guard for a registered callback. Dropping it unregisters the callback.
pub struct Subscription {
    _guard: Box<dyn Any + Send + Sync>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// Host-wide pointer listeners, independent of any element's bounds.
///
/// Components register here for gestures that must keep tracking once
/// the pointer leaves them: an active drag, or a click that may land
/// outside an open menu.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pointer_down: Listeners<PointerEvent>,
    pointer_move: Listeners<PointerEvent>,
    pointer_up: Listeners<PointerEvent>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn listeners(&self, kind: PointerKind) -> &Listeners<PointerEvent> {
        match kind {
            PointerKind::Down => &self.pointer_down,
            PointerKind::Move => &self.pointer_move,
            PointerKind::Up => &self.pointer_up,
        }
    }

    /// Register a callback for one pointer phase.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(
        &self,
        kind: PointerKind,
        callback: impl Fn(&PointerEvent) + Send + Sync + 'static,
    ) -> Subscription {
        log::trace!("[document] subscribe {:?}", kind);
        self.listeners(kind).subscribe(callback)
    }

    /// Deliver a pointer event to the listeners for its phase.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        self.listeners(event.kind).emit(event)
    }

    /// Live listeners for one phase.
    pub fn listener_count(&self, kind: PointerKind) -> usize {
        self.listeners(kind).len()
    }

    /// Live listeners across all phases.
    pub fn total_listeners(&self) -> usize {
        self.pointer_down.len() + self.pointer_move.len() + self.pointer_up.len()
    }
}
