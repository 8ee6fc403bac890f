//! # Events delivered to handlers.
//!
//! An [`Event`] is built once per `global_dispatch` call and passed by
//! reference to every handler in the snapshot. It is never stored by the bus.
//!
//! Besides the `name` and `data` supplied by the caller, the bus stamps:
//! - `namespace`: the namespace key the dispatch ran in,
//! - `origin`: the instance name of the dispatching listener (debugging only),
//! - `seq`: a process-wide, monotonically increasing dispatch number.
//!
//! ## Example
//! ```rust
//! use globalbus::Event;
//!
//! let ev = Event::new("pong", "hi").with_namespace("Test").with_origin("X");
//!
//! assert_eq!(&*ev.name, "pong");
//! assert_eq!(ev.data.as_str(), Some("hi"));
//! assert_eq!(&*ev.namespace, "Test");
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use super::payload::Payload;

/// Global sequence counter for dispatch ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// One dispatched event.
///
/// - `seq`: monotonic global sequence (one per dispatch, shared by all handlers of it)
/// - `name` / `data`: what the dispatcher sent
/// - `namespace` / `origin`: where it came from
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Event name the handlers were registered under.
    pub name: Arc<str>,
    /// Payload supplied by the dispatcher.
    pub data: Payload,
    /// Namespace key of the dispatching instance.
    pub namespace: Arc<str>,
    /// Instance name of the dispatching instance.
    pub origin: Arc<str>,
}

impl Event {
    /// Creates a new event with the next sequence number and empty routing metadata.
    pub fn new(name: impl Into<Arc<str>>, data: impl Into<Payload>) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            name: name.into(),
            data: data.into(),
            namespace: Arc::from(""),
            origin: Arc::from(""),
        }
    }

    /// Attaches the namespace key.
    #[inline]
    pub fn with_namespace(mut self, namespace: impl Into<Arc<str>>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Attaches the dispatching instance name.
    #[inline]
    pub fn with_origin(mut self, origin: impl Into<Arc<str>>) -> Self {
        self.origin = origin.into();
        self
    }

    /// True if this event carries the given name.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        &*self.name == name
    }
}
