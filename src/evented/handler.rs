//! # Declarative event→method table.
//!
//! [`Handler`] describes one binding between an event name and a method of
//! the host type; [`EventHandlers`] attaches the table to the type. The
//! table is plain data: nothing is registered until an
//! [`Evented`](super::Evented) host is built around an instance.

use crate::error::ListenerError;

/// Method bound to an event: receives the host instance and the payload.
pub type HandlerFn<S, T> = fn(&S, &T) -> Result<(), ListenerError>;

/// One event→method binding of a host type.
pub struct Handler<S, T> {
    /// Event the method listens to.
    pub event: &'static str,
    /// Method invoked with the host instance and the emitted payload.
    pub method: HandlerFn<S, T>,
}

impl<S, T> Handler<S, T> {
    /// Creates a binding.
    #[must_use]
    pub const fn new(event: &'static str, method: HandlerFn<S, T>) -> Self {
        Self { event, method }
    }
}

/// Event-handling table of a type.
///
/// Implementors declare which events their methods react to. Building an
/// [`Evented`](super::Evented) host registers every declared binding
/// through the emitter's public registration API, in table order, so
/// registration hooks observe the bindings like any other listener.
pub trait EventHandlers<T>: Send + Sync + Sized + 'static {
    /// The bindings to register at construction.
    fn handlers() -> Vec<Handler<Self, T>>;
}
