//! Events: the value handed to handlers and its payload.
//!
//! ## Contents
//! - [`Event`] name + data + routing metadata, built once per dispatch
//! - [`Payload`] variant value carried in `Event::data`
//!
//! See `core/mod.rs` for how events flow from `global_dispatch` to handlers.

mod event;
mod payload;

pub use event::Event;
pub use payload::Payload;
