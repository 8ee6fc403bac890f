//! # Event handlers.
//!
//! This module provides the [`Handler`] trait and the types used to register
//! handlers with a [`GlobalEventListener`](crate::GlobalEventListener).
//!
//! ## Contents
//! - [`Handler`] - trait for synchronous event handlers
//! - [`HandlerFn`] - closure-backed handler
//! - [`HandlerRef`] - shared handle (`Arc<dyn Handler>`), compared by pointer
//! - [`ListenerId`] - token returned by each registration
//! - `LogHandler` - tracing-backed handler (feature `logging`)
//!
//! ## Architecture
//! ```text
//! global_dispatch("pong", data)
//!     │
//!     ▼
//! snapshot of namespace["pong"] = [ (id1, h1), (id2, h2), (id3, h1) ]
//!     │
//!     ├──► h1.handle(&event) ── Ok
//!     ├──► h2.handle(&event) ── Err ──► BusError::HandlerFailure (h1 @ id3 skipped)
//!     └──► ...
//! ```

mod handler;
mod handler_fn;
mod id;
#[cfg(feature = "logging")]
mod log;

pub use handler::Handler;
pub use handler_fn::{HandlerFn, HandlerRef};
pub use id::ListenerId;
#[cfg(feature = "logging")]
pub use log::LogHandler;
