//! Error types used by the emitter and its dispatch layers.
//!
//! This module defines:
//!
//! - [`ListenerError`] — the boxed error a listener may return.
//! - [`EmitError`] — failures surfaced by an emit call.
//!
//! [`EmitError`] provides helper methods (`as_label`, `as_message`) for logging/metrics
//! and [`EmitError::into_payload`] for recovering an unheard `"error"` payload.

use std::fmt;

use thiserror::Error;

/// Boxed error returned by listeners.
///
/// The first listener failure in a dispatch stops it and is wrapped into
/// [`EmitError::Listener`]; the box is preserved as the error source.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// # Errors produced by event emission.
///
/// These represent the two fatal outcomes of an emit: an `"error"` event
/// that nobody listened to, and a listener failure that propagated out of
/// dispatch.
///
/// # Example
/// ```
/// use evemit::{EmitError, EventEmitter};
///
/// let emitter: EventEmitter<String> = EventEmitter::new();
/// let err = emitter.emit("error", "disk full".to_string()).unwrap_err();
/// match err {
///     EmitError::Uncaught { payload } => assert_eq!(payload, "disk full"),
///     _ => unreachable!(),
/// }
/// ```
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EmitError<T: fmt::Debug> {
    /// An `"error"` event was emitted with no listeners registered for it.
    ///
    /// The payload is handed back to the caller instead of being dropped.
    #[error("uncaught, unspecified \"error\" event: {payload:?}")]
    Uncaught {
        /// The payload nobody handled.
        payload: T,
    },

    /// A listener returned an error; dispatch stopped at that listener.
    #[error("listener for \"{event}\" failed: {source}")]
    Listener {
        /// The event whose dispatch failed.
        event: String,
        /// The error the listener returned.
        #[source]
        source: ListenerError,
    },
}

impl<T: fmt::Debug> EmitError<T> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use evemit::EmitError;
    ///
    /// let err: EmitError<&str> = EmitError::Uncaught { payload: "boom" };
    /// assert_eq!(err.as_label(), "emit_uncaught_error");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitError::Uncaught { .. } => "emit_uncaught_error",
            EmitError::Listener { .. } => "emit_listener_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EmitError::Uncaught { payload } => format!("uncaught \"error\" payload={payload:?}"),
            EmitError::Listener { event, source } => {
                format!("listener failed on \"{event}\": {source}")
            }
        }
    }

    /// Recovers the payload of an unheard `"error"` emission.
    ///
    /// Returns `None` for [`EmitError::Listener`], which carries no payload.
    ///
    /// # Example
    /// ```
    /// use evemit::EventEmitter;
    ///
    /// let emitter: EventEmitter<u32> = EventEmitter::new();
    /// let err = emitter.emit("error", 4).unwrap_err();
    /// assert_eq!(err.into_payload(), Some(4));
    /// ```
    pub fn into_payload(self) -> Option<T> {
        match self {
            EmitError::Uncaught { payload } => Some(payload),
            EmitError::Listener { .. } => None,
        }
    }
}
