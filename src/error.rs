//! Error types used by the event bus and by handlers.
//!
//! This module defines two main error enums:
//!
//! - [`BusError`] — errors raised by the bus itself (bad names, failed dispatch).
//! - [`HandlerError`] — errors raised by individual handler invocations.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging.
//! A [`HandlerError`] is never rewritten by the bus: [`BusError::HandlerFailure`]
//! carries it as-is and [`BusError::into_handler_error`] hands it back.

use std::fmt;

use thiserror::Error;

/// Which of the identifying names was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    /// Namespace key (first construction argument).
    Namespace,
    /// Instance name (second construction argument).
    Instance,
    /// Event name passed to registration or dispatch.
    Event,
}

impl NameKind {
    /// Returns a short stable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            NameKind::Namespace => "namespace",
            NameKind::Instance => "instance name",
            NameKind::Event => "event name",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Errors produced by the event bus.
///
/// `InvalidArgument` is raised by the call that received the bad input.
/// `HandlerFailure` is raised by `global_dispatch` when a handler fails; the
/// handlers ordered after the failing one were not invoked.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BusError {
    /// An empty or malformed namespace key, instance name or event name.
    #[error("invalid {kind}: {reason}")]
    InvalidArgument {
        /// Which name was rejected.
        kind: NameKind,
        /// Why it was rejected.
        reason: String,
    },

    /// A registered handler failed during dispatch.
    #[error("handler '{handler}' failed on event '{event}': {source}")]
    HandlerFailure {
        /// Event being dispatched.
        event: String,
        /// Name of the failing handler.
        handler: String,
        /// The handler's own error, unchanged.
        #[source]
        source: HandlerError,
    },
}

impl BusError {
    pub(crate) fn invalid(kind: NameKind, reason: impl Into<String>) -> Self {
        BusError::InvalidArgument {
            kind,
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use globalbus::GlobalEventListener;
    ///
    /// let err = GlobalEventListener::new("", "x").unwrap_err();
    /// assert_eq!(err.as_label(), "bus_invalid_argument");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::InvalidArgument { .. } => "bus_invalid_argument",
            BusError::HandlerFailure { .. } => "bus_handler_failure",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::InvalidArgument { kind, reason } => format!("invalid {kind}: {reason}"),
            BusError::HandlerFailure {
                event,
                handler,
                source,
            } => format!("event={event} handler={handler} {}", source.as_message()),
        }
    }

    /// Returns the rejected name kind for `InvalidArgument`.
    pub fn name_kind(&self) -> Option<NameKind> {
        match self {
            BusError::InvalidArgument { kind, .. } => Some(*kind),
            BusError::HandlerFailure { .. } => None,
        }
    }

    /// Borrows the handler's error for `HandlerFailure`.
    pub fn handler_error(&self) -> Option<&HandlerError> {
        match self {
            BusError::HandlerFailure { source, .. } => Some(source),
            BusError::InvalidArgument { .. } => None,
        }
    }

    /// Unwraps the handler's error for `HandlerFailure`, giving back `self` otherwise.
    pub fn into_handler_error(self) -> Result<HandlerError, BusError> {
        match self {
            BusError::HandlerFailure { source, .. } => Ok(source),
            other => Err(other),
        }
    }
}

/// # Errors produced by handlers.
///
/// Returned from [`Handler::handle`](crate::Handler::handle). Any foreign error
/// converts into [`HandlerError::Other`] through `?`.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Handler failed with a plain message.
    #[error("handler failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Handler failed with an arbitrary error value.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Fail`].
    ///
    /// # Example
    /// ```
    /// use globalbus::HandlerError;
    ///
    /// let err = HandlerError::fail("boom");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// assert_eq!(err.as_message(), "error: boom");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        HandlerError::Fail {
            error: error.into(),
        }
    }

    /// Wraps any error value.
    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HandlerError::Other(Box::new(error))
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Fail { .. } => "handler_failed",
            HandlerError::Other(_) => "handler_error",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Fail { error } => format!("error: {error}"),
            HandlerError::Other(e) => format!("error: {e}"),
        }
    }
}
