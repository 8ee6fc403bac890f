//! # Namespace registry - maps namespace keys to their shared handler tables.
//!
//! ## Architecture
//! ```text
//! Registry::global()                 (lazy, lives for the whole process)
//!   └─ DashMap<key, Arc<Namespace>>
//!        ├─ "Test"  → Namespace ◄── GlobalEventListener("Test", "X")
//!        │                      ◄── GlobalEventListener("Test", "Y")
//!        └─ "Other" → Namespace ◄── GlobalEventListener("Other", "X")
//! ```
//!
//! ## Rules
//! - At most one [`Namespace`] per key; lookup-or-create is atomic per key.
//! - Records are never evicted; [`Registry::reset`] only empties their tables,
//!   so instances created before a reset stay connected to the shared record.
//! - The global registry is never reset implicitly (not per request, not on drop).

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::core::config::BusConfig;
use crate::core::listener::GlobalEventListener;
use crate::core::namespace::Namespace;
use crate::error::{BusError, NameKind};

/// Process-wide registry used by [`GlobalEventListener::new`].
static GLOBAL: Lazy<Registry> = Lazy::new(|| Registry::new(BusConfig::default()));

/// Registry of namespaces.
///
/// Most code uses the process-wide [`Registry::global`]. Independent registries
/// are handy for tests and for embedding several isolated buses in one process.
///
/// # Example
/// ```
/// use globalbus::{BusConfig, Registry};
///
/// let reg = Registry::new(BusConfig::default());
/// let a = reg.listener("Test", "a").unwrap();
/// let _b = reg.listener("Test", "b").unwrap();
///
/// assert_eq!(reg.len(), 1);
/// assert_eq!(a.namespace(), "Test");
/// ```
pub struct Registry {
    namespaces: DashMap<Arc<str>, Arc<Namespace>>,
    config: Arc<BusConfig>,
}

impl Registry {
    /// Creates an empty, independent registry.
    pub fn new(config: BusConfig) -> Self {
        Self {
            namespaces: DashMap::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the process-wide registry, creating it on first use.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Constructs an instance bound to namespace `namespace`.
    ///
    /// Creates an empty namespace record if none exists for the key.
    /// Fails with `InvalidArgument` if either name breaks the naming rules.
    pub fn listener(
        &self,
        namespace: &str,
        instance: &str,
    ) -> Result<GlobalEventListener, BusError> {
        self.config.validate_name(NameKind::Namespace, namespace)?;
        self.config.validate_name(NameKind::Instance, instance)?;

        let ns = self.namespace(namespace);
        debug!(namespace, instance, "listener constructed");
        Ok(GlobalEventListener::bind(
            ns,
            Arc::from(instance),
            Arc::clone(&self.config),
        ))
    }

    /// Looks up or atomically creates the record for `key`.
    pub(crate) fn namespace(&self, key: &str) -> Arc<Namespace> {
        if let Some(ns) = self.namespaces.get(key) {
            return Arc::clone(ns.value());
        }
        let entry = self.namespaces.entry(Arc::from(key)).or_insert_with(|| {
            debug!(namespace = key, "namespace created");
            Arc::new(Namespace::new(Arc::from(key)))
        });
        Arc::clone(entry.value())
    }

    /// Sorted list of known namespace keys.
    pub fn namespace_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .namespaces
            .iter()
            .map(|e| e.key().to_string())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// True if a record exists for `key`.
    pub fn contains_namespace(&self, key: &str) -> bool {
        self.namespaces.contains_key(key)
    }

    /// Number of handlers registered for `event` in namespace `key`.
    pub fn listener_count(&self, key: &str, event: &str) -> usize {
        self.namespaces
            .get(key)
            .map_or(0, |ns| ns.value().count(event))
    }

    /// Number of namespace records.
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// True if no namespace has been created yet.
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Empties every namespace's handler table.
    ///
    /// Intended for test isolation. Namespace records survive, so existing
    /// instances keep sharing them with instances created afterwards.
    pub fn reset(&self) {
        let namespaces: Vec<Arc<Namespace>> = self
            .namespaces
            .iter()
            .map(|e| Arc::clone(e.value()))
            .collect();
        for ns in &namespaces {
            ns.clear();
        }
        debug!(namespaces = namespaces.len(), "registry reset");
    }

    /// Naming rules applied by this registry.
    pub fn config(&self) -> &BusConfig {
        &self.config
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(BusConfig::default())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("namespaces", &self.namespaces.len())
            .field("config", &self.config)
            .finish()
    }
}
