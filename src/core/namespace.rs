//! # Namespace - the handler table shared by every instance with the same key.
//!
//! ## Architecture
//! ```text
//! Namespace "Test"
//!   └─ Mutex<HashMap<event name, Vec<Entry>>>
//!        ├─ "pong" → [ (id1, h1), (id2, h2) ]
//!        └─ "ping" → [ (id3, h3) ]
//! ```
//!
//! ## Rules
//! - Entries keep insertion order; duplicates are allowed.
//! - The lock is held only to append, remove or copy a list; never while a
//!   handler runs.
//! - A dispatch works on the copy taken at its start.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::handlers::{HandlerRef, ListenerId};

/// One registration.
#[derive(Clone)]
pub(crate) struct Entry {
    pub(crate) id: ListenerId,
    pub(crate) handler: HandlerRef,
}

/// Per-namespace handler table.
pub(crate) struct Namespace {
    key: Arc<str>,
    table: Mutex<HashMap<Arc<str>, Vec<Entry>>>,
}

impl Namespace {
    pub(crate) fn new(key: Arc<str>) -> Self {
        Self {
            key,
            table: Mutex::new(HashMap::new()),
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &Arc<str> {
        &self.key
    }

    /// Appends a handler to the list for `event`.
    pub(crate) fn append(&self, event: &str, handler: HandlerRef) -> ListenerId {
        let id = ListenerId::next();
        let len = {
            let mut table = self.table.lock();
            let list = table.entry(Arc::from(event)).or_default();
            list.push(Entry { id, handler });
            list.len()
        };
        trace!(namespace = %self.key, event, %id, listeners = len, "listener added");
        id
    }

    /// Copies the current list for `event`.
    pub(crate) fn snapshot(&self, event: &str) -> Vec<Entry> {
        self.table.lock().get(event).cloned().unwrap_or_default()
    }

    /// Removes the earliest entry for `event` whose handler is `handler` (by pointer).
    pub(crate) fn remove_handler(&self, event: &str, handler: &HandlerRef) -> Option<ListenerId> {
        let mut table = self.table.lock();
        let list = table.get_mut(event)?;
        let pos = list
            .iter()
            .position(|e| std::ptr::addr_eq(Arc::as_ptr(&e.handler), Arc::as_ptr(handler)))?;
        let removed = list.remove(pos);
        if list.is_empty() {
            table.remove(event);
        }
        Some(removed.id)
    }

    /// Removes the entry created by registration `id`, under any event.
    ///
    /// Returns the event name it was registered under.
    pub(crate) fn remove_id(&self, id: ListenerId) -> Option<Arc<str>> {
        let mut table = self.table.lock();
        let (event, pos) = table.iter().find_map(|(event, list)| {
            list.iter()
                .position(|e| e.id == id)
                .map(|pos| (Arc::clone(event), pos))
        })?;
        if let Some(list) = table.get_mut(&event) {
            list.remove(pos);
            if list.is_empty() {
                table.remove(&event);
            }
        }
        Some(event)
    }

    pub(crate) fn count(&self, event: &str) -> usize {
        self.table.lock().get(event).map_or(0, Vec::len)
    }

    /// Total number of entries across all events.
    pub(crate) fn total(&self) -> usize {
        self.table.lock().values().map(Vec::len).sum()
    }

    /// Sorted list of event names with at least one entry.
    pub(crate) fn events(&self) -> Vec<String> {
        let mut names: Vec<String> = self.table.lock().keys().map(|k| k.to_string()).collect();
        names.sort_unstable();
        names
    }

    /// Drops every entry.
    pub(crate) fn clear(&self) {
        self.table.lock().clear();
    }
}
