//! # Listener handles and identity.
//!
//! Listeners are shared closures ([`Listener`]). Registration returns the
//! same `Arc` the caller passed in, so the caller can keep it and hand it
//! back later for removal.
//!
//! Identity is the `Arc`'s data pointer ([`ListenerKey`]): clones of one
//! handle are the same listener, while two separately built closures are
//! never equal, even when their code is identical.

use std::sync::Arc;

use crate::error::ListenerError;

/// Shared listener handle, invoked with a reference to the emitted payload.
pub type Listener<T> = Arc<dyn Fn(&T) -> Result<(), ListenerError> + Send + Sync>;

/// Registration hook, invoked with the event name and the listener about
/// to be registered, before it is inserted.
pub type NewListenerHook<T> = Arc<dyn Fn(&str, &Listener<T>) + Send + Sync>;

/// Stable identity of a listener (or hook) handle.
///
/// Derived from the `Arc`'s data pointer: it survives cloning the handle
/// and never collides between live handles, because every entry holds the
/// `Arc` its key was taken from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct ListenerKey(usize);

impl ListenerKey {
    /// Identity of any `Arc`-backed handle, fat or thin.
    pub(crate) fn of<F: ?Sized>(handle: &Arc<F>) -> Self {
        ListenerKey(Arc::as_ptr(handle).cast::<()>() as usize)
    }
}

/// Wraps a closure into a [`Listener`] handle.
///
/// ## Example
/// ```rust
/// use evemit::{listener, EventEmitter};
///
/// let emitter: EventEmitter<u32> = EventEmitter::new();
/// let print = listener(|n: &u32| {
///     println!("got {n}");
///     Ok(())
/// });
///
/// emitter.on("tick", print.clone());
/// assert!(emitter.remove_listener("tick", &print));
/// ```
pub fn listener<T, F>(f: F) -> Listener<T>
where
    F: Fn(&T) -> Result<(), ListenerError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a closure into a [`NewListenerHook`] handle.
pub fn new_listener_hook<T, F>(f: F) -> NewListenerHook<T>
where
    F: Fn(&str, &Listener<T>) + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_identity() {
        let l: Listener<u32> = listener(|_n: &u32| Ok(()));
        let c = l.clone();
        assert_eq!(ListenerKey::of(&l), ListenerKey::of(&c));
    }

    #[test]
    fn test_distinct_closures_have_distinct_identity() {
        let a: Listener<u32> = listener(|_n: &u32| Ok(()));
        let b: Listener<u32> = listener(|_n: &u32| Ok(()));
        assert_ne!(
            ListenerKey::of(&a),
            ListenerKey::of(&b),
            "identical code is still two listeners"
        );
    }
}
