//! # globalbus
//!
//! **globalbus** is a process-wide, namespaced event bus for Rust.
//!
//! Any number of [`GlobalEventListener`] instances can be constructed with a
//! `(namespace, instance name)` pair. Instances that share a namespace share one
//! delivery domain: a handler registered through one instance is invoked when
//! any other instance of the same namespace dispatches the event. Dispatch is
//! synchronous and ordered; it returns after the last handler returns.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  GlobalEventListener        GlobalEventListener        GlobalEventListener
//!   ("Test", "X")              ("Test", "Y")              ("Other", "X")
//!        │                          │                          │
//!        ▼                          ▼                          ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Registry::global() (lazy, lives for the whole process)           │
//! │  - DashMap<namespace key, Arc<Namespace>>                         │
//! └──────────────┬───────────────────────────────────┬────────────────┘
//!                ▼                                   ▼
//!     ┌─────────────────────┐             ┌─────────────────────┐
//!     │  Namespace "Test"   │             │  Namespace "Other"  │
//!     │  Mutex<event→[h..]> │             │  Mutex<event→[h..]> │
//!     └─────────────────────┘             └─────────────────────┘
//! ```
//!
//! ### Dispatch
//! ```text
//! global_dispatch(event, data)
//!   ├─► validate event name
//!   ├─► snapshot handlers for `event` (lock held only while copying)
//!   ├─► no handlers ─► Ok(())
//!   └─► for each handler, in registration order, on the caller's thread:
//!         ├─ Ok  ─► next
//!         └─ Err ─► return BusError::HandlerFailure (remaining handlers skipped)
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Listeners**     | Construct instances, register handlers, dispatch events.     | [`GlobalEventListener`]                     |
//! | **Registry**      | Process-wide namespace table, independent registries, reset. | [`Registry`]                                |
//! | **Handlers**      | Synchronous handlers as trait objects or closures.           | [`Handler`], [`HandlerFn`], [`HandlerRef`]  |
//! | **Events**        | Event name, variant payload and routing metadata.            | [`Event`], [`Payload`]                      |
//! | **Errors**        | Typed errors for bad names and failed handlers.              | [`BusError`], [`HandlerError`]              |
//! | **Configuration** | Naming rules per registry.                                   | [`BusConfig`]                               |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogHandler`] _(demo/reference only)_.
//!
//! ## Logging
//! The crate emits `tracing` events (`debug` for construction and handler
//! failures, `trace` for registration and dispatch). Install any subscriber to
//! see them.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use globalbus::{BusError, Event, GlobalEventListener, HandlerError};
//!
//! fn main() -> Result<(), BusError> {
//!     let received = Arc::new(Mutex::new(Vec::new()));
//!
//!     // Two instances, one namespace.
//!     let a = GlobalEventListener::new("crate-doc", "a")?;
//!     let b = GlobalEventListener::new("crate-doc", "b")?;
//!
//!     let sink = received.clone();
//!     a.on("greet", move |e: &Event| {
//!         sink.lock().unwrap().push(format!("{} from {}", e.data, e.origin));
//!         Ok::<_, HandlerError>(())
//!     })?;
//!
//!     b.global_dispatch("greet", "hello")?;
//!     assert_eq!(*received.lock().unwrap(), vec!["hello from b".to_string()]);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod handlers;

// ---- Public re-exports ----

pub use core::{BusConfig, GlobalEventListener, Registry};
pub use error::{BusError, HandlerError, NameKind};
pub use events::{Event, Payload};
pub use handlers::{Handler, HandlerFn, HandlerRef, ListenerId};

// Optional: expose a simple built-in logging handler (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use handlers::LogHandler;
