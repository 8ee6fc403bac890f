//! # Handler trait.
//!
//! Provides [`Handler`], the extension point for reacting to events dispatched
//! in a namespace.
//!
//! ## Rules
//! - Handlers run **synchronously** on the thread that called `global_dispatch`,
//!   one after another, in registration order.
//! - Returning `Err` stops the dispatch: handlers after this one are skipped and
//!   the caller receives `BusError::HandlerFailure`.
//! - A handler may register, remove or dispatch from inside `handle`; the
//!   namespace lock is not held while handlers run.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use globalbus::{Event, GlobalEventListener, Handler, HandlerError, HandlerRef};
//!
//! #[derive(Default)]
//! struct Counter(AtomicUsize);
//!
//! impl Handler for Counter {
//!     fn handle(&self, _event: &Event) -> Result<(), HandlerError> {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str { "counter" }
//! }
//!
//! let counter = Arc::new(Counter::default());
//! let g = GlobalEventListener::new("doc-handler", "main").unwrap();
//! g.add_event_listener("tick", counter.clone() as HandlerRef).unwrap();
//! g.global_dispatch("tick", ()).unwrap();
//! assert_eq!(counter.0.load(Ordering::SeqCst), 1);
//! ```

use crate::error::HandlerError;
use crate::events::Event;

/// Event handler registered under an event name.
///
/// ### Implementation requirements
/// - Keep `handle` short; every other handler of the same dispatch waits for it.
/// - Validate `event.data` yourself; the bus does not check payload shapes.
pub trait Handler: Send + Sync + 'static {
    /// Handles one dispatched event.
    fn handle(&self, event: &Event) -> Result<(), HandlerError>;

    /// Returns the handler name used in logs and in `BusError::HandlerFailure`.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
