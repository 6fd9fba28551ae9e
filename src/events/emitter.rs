//! # The event emitter: registration, removal, dispatch.
//!
//! [`EventEmitter`] owns the listener registry behind one mutex and drives
//! synchronous fan-out.
//!
//! ## Architecture
//! ```text
//!  on / once / remove_*               emit(event, payload)
//!         │                                  │
//!         │ mutate under lock                │ snapshot under lock
//!         ▼                                  ▼
//!  ┌──────────────── Mutex<Registry<T>> ───────────────┐
//!  │  event → [entry, entry, ..]    hooks → [hook, ..] │
//!  └────────────────────────┬──────────────────────────┘
//!                           │ lock released
//!                           ▼
//!             invoke snapshot in registration order
//! ```
//!
//! ## Rules
//! - No user code runs under the lock: hooks fire before insertion with
//!   the lock released, dispatch invokes listeners after release, and a
//!   one-shot wrapper unlocks before calling the listener it wraps.
//! - Dispatch order is snapshot order; registrations and removals during
//!   a dispatch affect later emits only.
//! - `"error"` ([`ERROR_EVENT`](super::ERROR_EVENT)) must not go unheard:
//!   emitting it with no listeners returns the payload back as
//!   [`EmitError::Uncaught`].

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::EmitError;

use super::listener::{Listener, ListenerKey, NewListenerHook};
use super::registry::{Entry, Registry};
use super::ERROR_EVENT;

/// Shared state behind every clone of an [`EventEmitter`].
struct Inner<T> {
    registry: Mutex<Registry<T>>,
}

/// In-process publish/subscribe emitter over payload type `T`.
///
/// Cheap to clone; clones are handles to one shared registry. `Send +
/// Sync` regardless of `T`: a payload lives inside the `emit` call that
/// owns it, and listeners receive it by reference.
///
/// ### Properties
/// - **Ordered**: dispatch follows registration order.
/// - **Identity-keyed**: a listener is its handle. Re-registering the same
///   handle overwrites in place; cloning the handle never creates a second
///   listener.
/// - **Re-entrant**: listeners and hooks may call back into the emitter,
///   because no user code runs under the registry lock.
pub struct EventEmitter<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for EventEmitter<T> {
    /// Cheap handle clone; both handles share one registry.
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.registry.try_lock() {
            Some(registry) => f
                .debug_struct("EventEmitter")
                .field("events", &registry.names())
                .finish_non_exhaustive(),
            None => f.write_str("EventEmitter { <locked> }"),
        }
    }
}

impl<T> EventEmitter<T> {
    /// Creates an empty emitter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: Mutex::new(Registry::new()),
            }),
        }
    }

    /// Registers `listener` for `event` and returns the handle unchanged.
    ///
    /// Registration hooks fire first, with the event name and the listener,
    /// before the listener becomes invokable. Re-registering a handle that
    /// already listens to `event` overwrites the existing entry in place:
    /// no duplicate, original position kept. One handle may listen to any
    /// number of distinct events.
    ///
    /// ### Notes
    /// A listener that captures a clone of its own emitter keeps the shared
    /// registry alive until the listener is removed.
    ///
    /// ## Example
    /// ```rust
    /// use evemit::{listener, EventEmitter};
    ///
    /// let emitter: EventEmitter<String> = EventEmitter::new();
    /// let greet = emitter.on("hello", listener(|who: &String| {
    ///     println!("hello, {who}");
    ///     Ok(())
    /// }));
    ///
    /// assert!(emitter.emit("hello", "world".into())?);
    /// assert!(emitter.remove_listener("hello", &greet));
    /// # Ok::<(), evemit::EmitError<String>>(())
    /// ```
    pub fn on(&self, event: impl Into<String>, listener: Listener<T>) -> Listener<T> {
        self.register(event.into(), listener.clone(), listener.clone());
        listener
    }

    /// Alias for [`EventEmitter::on`].
    pub fn add_listener(&self, event: impl Into<String>, listener: Listener<T>) -> Listener<T> {
        self.on(event, listener)
    }

    /// Returns a reusable registrar bound to `event`: every listener fed to
    /// it is registered via [`EventEmitter::on`].
    ///
    /// ## Example
    /// ```rust
    /// use evemit::{listener, EventEmitter};
    ///
    /// let emitter: EventEmitter<String> = EventEmitter::new();
    /// let on_line = emitter.listens_to("line");
    ///
    /// on_line(listener(|_line: &String| Ok(())));
    /// on_line(listener(|_line: &String| Ok(())));
    /// assert_eq!(emitter.listener_count("line"), 2);
    /// ```
    #[must_use]
    pub fn listens_to(&self, event: impl Into<String>) -> impl Fn(Listener<T>) -> Listener<T> {
        let emitter = self.clone();
        let event = event.into();
        move |listener| emitter.on(event.clone(), listener)
    }

    /// Registers a one-shot listener: invoked at most once, removed before
    /// its invocation runs.
    ///
    /// The wrapper fires on the first dispatch that reaches it. Under the
    /// lock it re-checks that the registration is still present and removes
    /// it, then releases the lock and calls `listener`. Concurrent emits
    /// racing the same wrapper resolve through that removal: exactly one
    /// invokes `listener`, the rest no-op. Removing the handle before it
    /// fires wins the same race.
    ///
    /// Registration hooks observe the original `listener`, not the wrapper,
    /// and the handle returned here is the original, usable for removal.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// use evemit::{listener, EventEmitter};
    ///
    /// let emitter: EventEmitter<u32> = EventEmitter::new();
    /// let hits = Arc::new(AtomicUsize::new(0));
    ///
    /// let h = Arc::clone(&hits);
    /// emitter.once("ready", listener(move |_n: &u32| {
    ///     h.fetch_add(1, Ordering::SeqCst);
    ///     Ok(())
    /// }));
    ///
    /// emitter.emit("ready", 1)?;
    /// emitter.emit("ready", 2)?;
    /// assert_eq!(hits.load(Ordering::SeqCst), 1);
    /// # Ok::<(), evemit::EmitError<u32>>(())
    /// ```
    pub fn once(&self, event: impl Into<String>, listener: Listener<T>) -> Listener<T>
    where
        T: 'static,
    {
        let event = event.into();
        let key = ListenerKey::of(&listener);
        let inner = Arc::downgrade(&self.inner);
        let original = listener.clone();
        let wrap_event = event.clone();

        let invoke: Listener<T> = Arc::new(move |payload: &T| {
            let Some(inner) = inner.upgrade() else {
                return Ok(());
            };
            // Atomic check-and-remove: losing a race here means another
            // dispatch (or an explicit removal) already claimed the shot.
            if !inner.registry.lock().remove(&wrap_event, key) {
                return Ok(());
            }
            original(payload)
        });

        self.register(event, listener.clone(), invoke);
        listener
    }

    /// Removes `listener` from `event`.
    ///
    /// Identity is the handle itself, not closure code. Removing the last
    /// listener of an event drops the event from
    /// [`event_names`](EventEmitter::event_names). Returns whether anything
    /// was removed.
    pub fn remove_listener(&self, event: &str, listener: &Listener<T>) -> bool {
        let removed = self
            .inner
            .registry
            .lock()
            .remove(event, ListenerKey::of(listener));
        if removed {
            debug!(%event, "listener removed");
        }
        removed
    }

    /// Removes every listener for `event`, or every listener of every event
    /// when `event` is `None`. Registration hooks are unaffected.
    pub fn remove_all_listeners(&self, event: Option<&str>) {
        let mut registry = self.inner.registry.lock();
        match event {
            Some(event) => registry.remove_event(event),
            None => registry.clear(),
        }
        drop(registry);
        debug!(event = event.unwrap_or("*"), "listeners cleared");
    }

    /// Registers `hook` to run on every subsequent registration, with the
    /// event name and the listener about to be added.
    ///
    /// Hooks run before the listener is inserted and with the registry
    /// unlocked, so a hook may itself register, remove, or emit. Hooks are
    /// ordered and identity-keyed like listeners; for
    /// [`once`](EventEmitter::once) registrations a hook sees the original
    /// listener. Returns the handle unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use evemit::{listener, new_listener_hook, EventEmitter};
    ///
    /// let emitter: EventEmitter<u32> = EventEmitter::new();
    /// emitter.on_new_listener(new_listener_hook(|event: &str, _listener| {
    ///     println!("registering on {event}");
    /// }));
    ///
    /// emitter.on("tick", listener(|_n: &u32| Ok(())));
    /// ```
    pub fn on_new_listener(&self, hook: NewListenerHook<T>) -> NewListenerHook<T> {
        self.inner
            .registry
            .lock()
            .add_hook(ListenerKey::of(&hook), hook.clone());
        debug!("registration hook added");
        hook
    }

    /// Removes a registration hook. Returns whether it was registered.
    pub fn remove_new_listener(&self, hook: &NewListenerHook<T>) -> bool {
        self.inner.registry.lock().remove_hook(ListenerKey::of(hook))
    }

    /// Emits `event`: every listener registered at this moment is invoked
    /// in registration order with a reference to `payload`.
    ///
    /// The snapshot is taken under the lock, dispatch runs after release:
    /// listeners may re-enter the emitter freely, and concurrent
    /// registrations or removals influence later emits, never this one.
    ///
    /// Returns `Ok(true)` if at least one listener was snapshotted and
    /// `Ok(false)` for an unheard event, with two failure paths:
    /// - a listener returning `Err` stops dispatch and surfaces as
    ///   [`EmitError::Listener`]; later snapshot entries are skipped;
    /// - an unheard [`ERROR_EVENT`](super::ERROR_EVENT) becomes
    ///   [`EmitError::Uncaught`], handing `payload` back instead of
    ///   dropping it.
    ///
    /// ## Example
    /// ```rust
    /// use evemit::{EventEmitter, ERROR_EVENT};
    ///
    /// let emitter: EventEmitter<i64> = EventEmitter::new();
    /// assert!(!emitter.emit("tick", 1)?, "no listeners, fire-and-forget");
    ///
    /// let err = emitter.emit(ERROR_EVENT, -1).unwrap_err();
    /// assert_eq!(err.into_payload(), Some(-1));
    /// # Ok::<(), evemit::EmitError<i64>>(())
    /// ```
    pub fn emit(&self, event: &str, payload: T) -> Result<bool, EmitError<T>>
    where
        T: fmt::Debug,
    {
        let snapshot = self.inner.registry.lock().invocables(event);
        let handled = !snapshot.is_empty();

        if !handled && event == ERROR_EVENT {
            return Err(EmitError::Uncaught { payload });
        }

        trace!(%event, listeners = snapshot.len(), "dispatch");
        for invoke in snapshot {
            if let Err(source) = invoke(&payload) {
                return Err(EmitError::Listener {
                    event: event.to_string(),
                    source,
                });
            }
        }
        Ok(handled)
    }

    /// The invocables a dispatch of `event` would run right now, in order.
    ///
    /// This is the seam deferred dispatch builds on: take the snapshot
    /// here, invoke it elsewhere. One-shot wrappers stay safe across that
    /// gap because they re-check their registration when they actually run.
    #[must_use]
    pub fn snapshot(&self, event: &str) -> Vec<Listener<T>> {
        self.inner.registry.lock().invocables(event)
    }

    /// The listeners registered for `event`, in registration order.
    ///
    /// Always the original handles; a one-shot registration reports the
    /// listener passed to [`once`](EventEmitter::once), never the wrapper.
    #[must_use]
    pub fn listeners(&self, event: &str) -> Vec<Listener<T>> {
        self.inner.registry.lock().originals(event)
    }

    /// Sorted names of events with at least one listener.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.inner.registry.lock().names()
    }

    /// Number of listeners registered for `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.inner.registry.lock().count(event)
    }

    /// Shared registration path: hooks fire with the lock released and see
    /// the listener before it is invokable, then the entry is inserted.
    fn register(&self, event: String, listener: Listener<T>, invoke: Listener<T>) {
        let hooks = self.inner.registry.lock().hooks();
        for hook in hooks {
            hook(&event, &listener);
        }

        let entry = Entry {
            key: ListenerKey::of(&listener),
            listener,
            invoke,
        };
        self.inner.registry.lock().insert(&event, entry);
        debug!(%event, "listener registered");
    }
}
