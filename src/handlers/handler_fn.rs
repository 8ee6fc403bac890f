//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(&Event) -> Result<(), HandlerError>`.
//! The closure is shared by every dispatch that reaches it, so any state it
//! mutates must be behind `Arc<Mutex<..>>`, atomics or similar.
//!
//! ## Identity
//! The bus compares handlers by `Arc` pointer. Registering the same
//! [`HandlerRef`] twice creates two entries; building two `HandlerFn`s from the
//! same closure creates two distinct handlers.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use globalbus::{Event, GlobalEventListener, HandlerError, HandlerFn, HandlerRef};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! let h: HandlerRef = HandlerFn::arc("collector", move |e: &Event| {
//!     sink.lock().unwrap().push(e.data.to_string());
//!     Ok::<_, HandlerError>(())
//! });
//!
//! let g = GlobalEventListener::new("doc-handler-fn", "main").unwrap();
//! g.add_event_listener("pong", h).unwrap();
//! g.global_dispatch("pong", "hi").unwrap();
//! assert_eq!(*seen.lock().unwrap(), vec!["hi".to_string()]);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::HandlerError;
use crate::events::Event;
use crate::handlers::handler::Handler;

/// Shared handle to a handler (`Arc<dyn Handler>`).
pub type HandlerRef = Arc<dyn Handler>;

/// Function-backed handler implementation.
pub struct HandlerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a [`HandlerRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").field("name", &self.name).finish()
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&Event) -> Result<(), HandlerError> + Send + Sync + 'static, // Fn, not FnMut
{
    fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        (self.f)(event)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
