//! Bus core: registry, namespaces and listener handles.
//!
//! Internal modules:
//! - [`registry`]: maps namespace keys to namespaces; owns the process-wide instance;
//! - [`namespace`]: per-namespace handler table (append, snapshot, remove);
//! - [`listener`]: `GlobalEventListener`, the public handle used to register and dispatch;
//! - [`config`]: naming rules applied at construction, registration and dispatch.
//!
//! ## Wiring
//! ```text
//! GlobalEventListener::new(ns, name)
//!        │
//!        ▼
//! Registry ──(DashMap: key → Arc<Namespace>)──► Namespace
//!                                                  │  Mutex<HashMap<event, Vec<Entry>>>
//!        add_event_listener ──── append ──────────►│
//!        global_dispatch ─────── snapshot ────────►│
//!              │
//!              └─► handlers run on the caller's thread, lock released
//! ```

mod config;
mod listener;
mod namespace;
mod registry;

pub use config::BusConfig;
pub use listener::GlobalEventListener;
pub use registry::Registry;
