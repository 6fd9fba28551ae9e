//! # Evented host: an instance with its bindings registered.
//!
//! [`Evented`] wires an instance of an [`EventHandlers`] type to an
//! [`EventEmitter`]: every binding the type declares becomes a listener
//! closed over the shared instance, registered through the emitter's
//! public [`on`](EventEmitter::on). The emitter may be private to the host
//! or shared with hand-registered listeners.

use std::sync::Arc;

use crate::events::EventEmitter;

use super::handler::EventHandlers;

/// An instance of an event-handling type, bound to an emitter.
pub struct Evented<S, T> {
    instance: Arc<S>,
    emitter: EventEmitter<T>,
}

impl<S, T> Evented<S, T>
where
    S: EventHandlers<T>,
    T: 'static,
{
    /// Builds a host around `instance` with a fresh emitter.
    #[must_use]
    pub fn new(instance: S) -> Self {
        Self::with_emitter(instance, EventEmitter::new())
    }

    /// Builds a host around `instance`, registering its declared bindings
    /// on an existing emitter.
    ///
    /// Bindings are registered in table order and coexist with listeners
    /// registered elsewhere on the same emitter.
    #[must_use]
    pub fn with_emitter(instance: S, emitter: EventEmitter<T>) -> Self {
        let instance = Arc::new(instance);
        for handler in S::handlers() {
            let inst = Arc::clone(&instance);
            let method = handler.method;
            emitter.on(
                handler.event,
                Arc::new(move |payload: &T| method(&inst, payload)),
            );
        }
        Self { instance, emitter }
    }

    /// The emitter carrying this host's bindings.
    #[must_use]
    pub fn emitter(&self) -> &EventEmitter<T> {
        &self.emitter
    }

    /// The hosted instance.
    #[must_use]
    pub fn instance(&self) -> &Arc<S> {
        &self.instance
    }
}
