//! # GlobalEventListener - a handle into one namespace.
//!
//! Every instance constructed with the same namespace key shares one handler
//! table. The instance name is only a label: it is stamped on dispatched events
//! as `origin` and shows up in logs, but it never filters delivery.
//!
//! ## Lifecycle
//! ```text
//! new("Test", "X") ──► Registry::global().listener(..) ──► bind to Namespace "Test"
//!       │
//!       ├─► add_event_listener("pong", h)   append to Namespace["pong"]
//!       │
//!       └─► global_dispatch("pong", data)
//!              ├─ snapshot Namespace["pong"] (lock held only while copying)
//!              ├─ h1.handle(&event) ─► Ok
//!              ├─ h2.handle(&event) ─► Err ─► return HandlerFailure (rest skipped)
//!              └─ all Ok ─► return Ok(())
//! ```
//!
//! ## Rules
//! - Dispatch runs every handler on the calling thread, in registration order,
//!   and returns after the last one.
//! - No handlers for the event → `Ok(())`.
//! - Dropping an instance leaves its registrations in place.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::config::BusConfig;
use crate::core::namespace::Namespace;
use crate::core::registry::Registry;
use crate::error::{BusError, HandlerError, NameKind};
use crate::events::{Event, Payload};
use crate::handlers::{HandlerFn, HandlerRef, ListenerId};

/// Handle into a namespace's handler table.
///
/// Cheap to clone; a clone is another handle onto the same namespace with the
/// same instance name.
///
/// # Example
/// ```
/// use std::sync::{Arc, Mutex};
/// use globalbus::{Event, GlobalEventListener, HandlerError};
///
/// let list = Arc::new(Mutex::new(Vec::<String>::new()));
/// let g = GlobalEventListener::new("doc-listener", "X").unwrap();
///
/// let sink = list.clone();
/// g.on("pong", move |e: &Event| {
///     sink.lock().unwrap().push(e.data.to_string());
///     Ok::<_, HandlerError>(())
/// }).unwrap();
///
/// g.global_dispatch("ping", "test").unwrap();
/// assert!(list.lock().unwrap().is_empty());
///
/// g.global_dispatch("pong", "hi").unwrap();
/// assert_eq!(*list.lock().unwrap(), vec!["hi".to_string()]);
/// ```
#[derive(Clone)]
pub struct GlobalEventListener {
    ns: Arc<Namespace>,
    name: Arc<str>,
    config: Arc<BusConfig>,
}

impl GlobalEventListener {
    /// Constructs an instance in the process-wide registry.
    ///
    /// Creates the namespace record for `namespace` if it does not exist yet.
    /// Fails with `InvalidArgument` if either name breaks the naming rules.
    pub fn new(namespace: &str, instance: &str) -> Result<Self, BusError> {
        Registry::global().listener(namespace, instance)
    }

    pub(crate) fn bind(ns: Arc<Namespace>, name: Arc<str>, config: Arc<BusConfig>) -> Self {
        Self { ns, name, config }
    }

    /// Namespace key this instance is bound to.
    #[inline]
    pub fn namespace(&self) -> &str {
        self.ns.key()
    }

    /// Instance name given at construction.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers `handler` for `event` in this instance's namespace.
    ///
    /// Not idempotent: registering the same handler twice makes it run twice
    /// per dispatch. The returned [`ListenerId`] identifies this registration.
    pub fn add_event_listener(
        &self,
        event: &str,
        handler: HandlerRef,
    ) -> Result<ListenerId, BusError> {
        self.config.validate_name(NameKind::Event, event)?;
        Ok(self.ns.append(event, handler))
    }

    /// Registers a closure for `event`.
    ///
    /// Shorthand for [`add_event_listener`](Self::add_event_listener) with a
    /// [`HandlerFn`] named `"<instance>/<event>"`.
    pub fn on<F>(&self, event: &str, f: F) -> Result<ListenerId, BusError>
    where
        F: Fn(&Event) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let handler: HandlerRef = HandlerFn::arc(format!("{}/{}", self.name, event), f);
        self.add_event_listener(event, handler)
    }

    /// Dispatches `event` with `data` to every handler registered for it in the namespace.
    ///
    /// Handlers run synchronously, in registration order. The first handler
    /// error stops the dispatch and is returned as
    /// [`BusError::HandlerFailure`]; later handlers are not invoked.
    ///
    /// Handlers registered while this dispatch runs are not invoked by it.
    pub fn global_dispatch(&self, event: &str, data: impl Into<Payload>) -> Result<(), BusError> {
        self.config.validate_name(NameKind::Event, event)?;

        let entries = self.ns.snapshot(event);
        if entries.is_empty() {
            trace!(namespace = %self.ns.key(), origin = %self.name, event, "no listeners");
            return Ok(());
        }

        let ev = Event::new(event, data)
            .with_namespace(Arc::clone(self.ns.key()))
            .with_origin(Arc::clone(&self.name));
        trace!(
            namespace = %ev.namespace,
            origin = %ev.origin,
            event,
            seq = ev.seq,
            listeners = entries.len(),
            "dispatch"
        );

        for entry in &entries {
            if let Err(source) = entry.handler.handle(&ev) {
                debug!(
                    namespace = %ev.namespace,
                    event,
                    seq = ev.seq,
                    handler = entry.handler.name(),
                    id = %entry.id,
                    error = %source,
                    "handler failed; remaining listeners skipped"
                );
                return Err(BusError::HandlerFailure {
                    event: event.to_string(),
                    handler: entry.handler.name().to_string(),
                    source,
                });
            }
        }
        Ok(())
    }

    /// Removes the earliest registration of `handler` (compared by pointer) for `event`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_event_listener(&self, event: &str, handler: &HandlerRef) -> bool {
        match self.ns.remove_handler(event, handler) {
            Some(id) => {
                trace!(namespace = %self.ns.key(), event, %id, "listener removed");
                true
            }
            None => false,
        }
    }

    /// Removes the registration identified by `id`.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        match self.ns.remove_id(id) {
            Some(event) => {
                trace!(namespace = %self.ns.key(), event = %event, %id, "listener removed");
                true
            }
            None => false,
        }
    }

    /// True if at least one handler is registered for `event` in the namespace.
    pub fn has_event_listener(&self, event: &str) -> bool {
        self.ns.count(event) > 0
    }

    /// Number of handlers registered for `event` in the namespace.
    pub fn listener_count(&self, event: &str) -> usize {
        self.ns.count(event)
    }

    /// Sorted event names that have handlers in the namespace.
    pub fn events(&self) -> Vec<String> {
        self.ns.events()
    }
}

impl fmt::Debug for GlobalEventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalEventListener")
            .field("namespace", &self.ns.key())
            .field("name", &self.name)
            .field("listeners", &self.ns.total())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    use super::*;

    type Log = Arc<Mutex<Vec<String>>>;

    fn log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn recorder(log: &Log, tag: &'static str) -> HandlerRef {
        let log = Arc::clone(log);
        HandlerFn::arc(tag, move |e: &Event| {
            log.lock().unwrap().push(format!("{tag}:{}", e.data));
            Ok::<_, HandlerError>(())
        })
    }

    fn failing(tag: &'static str) -> HandlerRef {
        HandlerFn::arc(tag, move |_: &Event| Err::<(), _>(HandlerError::fail(tag)))
    }

    #[test]
    fn test_request_scenario() {
        let g = GlobalEventListener::new("Test", "GlboalEventListenerTest").unwrap();
        let list = log();
        let sink = Arc::clone(&list);
        g.on("pong", move |e: &Event| {
            sink.lock().unwrap().push(e.data.to_string());
            Ok::<_, HandlerError>(())
        })
        .unwrap();

        g.global_dispatch("ping", "test").unwrap();
        assert!(list.lock().unwrap().is_empty());

        g.global_dispatch("pong", "hi").unwrap();
        assert_eq!(*list.lock().unwrap(), vec!["hi".to_string()]);
    }

    #[test]
    fn test_namespace_sharing() {
        let a = GlobalEventListener::new("listener-share", "a").unwrap();
        let b = GlobalEventListener::new("listener-share", "b").unwrap();
        let list = log();
        a.add_event_listener("e", recorder(&list, "h")).unwrap();

        b.global_dispatch("e", 1).unwrap();
        assert_eq!(*list.lock().unwrap(), vec!["h:1".to_string()]);
        assert_eq!(b.listener_count("e"), 1);
    }

    #[test]
    fn test_registration_after_other_instance_constructed() {
        let dispatcher = GlobalEventListener::new("listener-late", "d").unwrap();
        let list = log();
        {
            let late = GlobalEventListener::new("listener-late", "late").unwrap();
            late.add_event_listener("e", recorder(&list, "late")).unwrap();
        }
        // `late` dropped; its handler stays registered.
        dispatcher.global_dispatch("e", "x").unwrap();
        assert_eq!(*list.lock().unwrap(), vec!["late:x".to_string()]);
    }

    #[test]
    fn test_namespace_isolation() {
        let a = GlobalEventListener::new("listener-iso-1", "same").unwrap();
        let b = GlobalEventListener::new("listener-iso-2", "same").unwrap();
        let list = log();
        a.add_event_listener("e", recorder(&list, "a")).unwrap();

        b.global_dispatch("e", 1).unwrap();
        assert!(list.lock().unwrap().is_empty());
        assert!(!b.has_event_listener("e"));
    }

    #[test]
    fn test_registration_order() {
        let g = GlobalEventListener::new("listener-order", "g").unwrap();
        let list = log();
        for tag in ["h1", "h2", "h3"] {
            g.add_event_listener("e", recorder(&list, tag)).unwrap();
        }
        g.global_dispatch("e", 0).unwrap();
        assert_eq!(*list.lock().unwrap(), vec!["h1:0", "h2:0", "h3:0"]);
    }

    #[test]
    fn test_no_listener_is_noop() {
        let g = GlobalEventListener::new("listener-empty", "g").unwrap();
        assert!(g.global_dispatch("nobody", "x").is_ok());
        assert!(g.events().is_empty());
    }

    #[test]
    fn test_fail_fast() {
        let g = GlobalEventListener::new("listener-fail", "g").unwrap();
        let list = log();
        g.add_event_listener("e", recorder(&list, "before")).unwrap();
        g.add_event_listener("e", failing("h1")).unwrap();
        g.add_event_listener("e", recorder(&list, "h2")).unwrap();

        let err = g.global_dispatch("e", 7).unwrap_err();
        assert_eq!(err.as_label(), "bus_handler_failure");
        match &err {
            BusError::HandlerFailure { event, handler, .. } => {
                assert_eq!(event, "e");
                assert_eq!(handler, "h1");
            }
            other => panic!("unexpected: {other:?}"),
        }
        match err.into_handler_error() {
            Ok(HandlerError::Fail { error }) => assert_eq!(error, "h1"),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(*list.lock().unwrap(), vec!["before:7".to_string()]);
    }

    #[test]
    fn test_duplicate_registration_runs_twice() {
        let g = GlobalEventListener::new("listener-dup", "g").unwrap();
        let list = log();
        let h = recorder(&list, "h");
        let id1 = g.add_event_listener("e", h.clone()).unwrap();
        let id2 = g.add_event_listener("e", h).unwrap();
        assert_ne!(id1, id2);

        g.global_dispatch("e", "d").unwrap();
        assert_eq!(*list.lock().unwrap(), vec!["h:d", "h:d"]);
    }

    #[test]
    fn test_event_carries_metadata() {
        let a = GlobalEventListener::new("listener-meta", "receiver").unwrap();
        let b = GlobalEventListener::new("listener-meta", "sender").unwrap();
        let seen = Arc::new(Mutex::new(None::<Event>));
        let sink = Arc::clone(&seen);
        a.on("e", move |e: &Event| {
            *sink.lock().unwrap() = Some(e.clone());
            Ok::<_, HandlerError>(())
        })
        .unwrap();

        b.global_dispatch("e", 42).unwrap();
        let ev = seen.lock().unwrap().take().unwrap();
        assert_eq!(&*ev.name, "e");
        assert_eq!(ev.data.as_int(), Some(42));
        assert_eq!(&*ev.namespace, "listener-meta");
        assert_eq!(&*ev.origin, "sender");
    }

    #[test]
    fn test_invalid_event_names() {
        let g = GlobalEventListener::new("listener-invalid", "g").unwrap();
        let h = HandlerFn::arc("h", |_: &Event| Ok::<_, HandlerError>(()));
        let err = g.add_event_listener("", h).unwrap_err();
        assert_eq!(err.name_kind(), Some(NameKind::Event));
        let err = g.global_dispatch("", ()).unwrap_err();
        assert_eq!(err.name_kind(), Some(NameKind::Event));
        assert!(GlobalEventListener::new("ok", "bad\nname").is_err());
    }

    #[test]
    fn test_remove_by_handler_and_id() {
        let g = GlobalEventListener::new("listener-remove", "g").unwrap();
        let list = log();
        let a = recorder(&list, "a");
        let b = recorder(&list, "b");
        g.add_event_listener("e", a.clone()).unwrap();
        let id_b = g.add_event_listener("e", b.clone()).unwrap();
        g.add_event_listener("e", a.clone()).unwrap();

        assert!(g.remove_event_listener("e", &a));
        assert!(g.remove_listener(id_b));
        assert!(!g.remove_listener(id_b));
        assert!(!g.remove_event_listener("other", &a));
        assert!(!g.remove_event_listener("e", &b));

        g.global_dispatch("e", 1).unwrap();
        assert_eq!(*list.lock().unwrap(), vec!["a:1".to_string()]);
    }

    #[test]
    fn test_handler_may_reenter() {
        let g = GlobalEventListener::new("listener-reenter", "g").unwrap();
        let list = log();
        let inner = g.clone();
        let rec = recorder(&list, "late");
        g.on("outer", move |e: &Event| {
            inner
                .add_event_listener("outer", rec.clone())
                .map_err(HandlerError::other)?;
            inner
                .global_dispatch("inner", e.data.clone())
                .map_err(HandlerError::other)?;
            Ok(())
        })
        .unwrap();
        g.add_event_listener("inner", recorder(&list, "inner"))
            .unwrap();

        g.global_dispatch("outer", 1).unwrap();
        // The handler added during the dispatch is not part of its snapshot.
        assert_eq!(*list.lock().unwrap(), vec!["inner:1".to_string()]);
        assert_eq!(g.listener_count("outer"), 2);
    }

    #[test]
    fn test_concurrent_register_and_dispatch() {
        let g = GlobalEventListener::new("listener-concurrent", "g").unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let writers: Vec<_> = (0..8)
            .map(|_| {
                let g = g.clone();
                let hits = Arc::clone(&hits);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let hits = Arc::clone(&hits);
                        g.on("e", move |_: &Event| {
                            hits.fetch_add(1, Ordering::Relaxed);
                            Ok::<_, HandlerError>(())
                        })
                        .unwrap();
                    }
                })
            })
            .collect();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let g = g.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        g.global_dispatch("e", ()).unwrap();
                        thread::sleep(Duration::from_micros(50));
                    }
                })
            })
            .collect();
        for t in writers.into_iter().chain(readers) {
            t.join().unwrap();
        }

        assert_eq!(g.listener_count("e"), 400);
        hits.store(0, Ordering::Relaxed);
        g.global_dispatch("e", ()).unwrap();
        assert_eq!(hits.load(Ordering::Relaxed), 400);
    }

    #[test]
    fn test_panicking_handler_leaves_namespace_usable() {
        let g = GlobalEventListener::new("listener-panic", "g").unwrap();
        g.on("e", |_: &Event| -> Result<(), HandlerError> { panic!("boom") })
            .unwrap();

        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            g.global_dispatch("e", 1)
        }));
        assert!(res.is_err(), "panic must unwind through global_dispatch");

        let list = log();
        g.add_event_listener("after", recorder(&list, "after"))
            .unwrap();
        g.global_dispatch("after", 2).unwrap();
        assert_eq!(*list.lock().unwrap(), vec!["after:2".to_string()]);
        assert_eq!(g.listener_count("e"), 1);
    }

    #[test]
    fn test_removed_during_dispatch_still_runs_once() {
        let g = GlobalEventListener::new("listener-remove-during", "g").unwrap();
        let list = log();
        let b = recorder(&list, "b");

        let remover = g.clone();
        let target = b.clone();
        let sink = Arc::clone(&list);
        g.on("e", move |e: &Event| {
            sink.lock().unwrap().push(format!("a:{}", e.data));
            remover.remove_event_listener("e", &target);
            Ok(())
        })
        .unwrap();
        g.add_event_listener("e", b).unwrap();

        g.global_dispatch("e", 1).unwrap();
        assert_eq!(*list.lock().unwrap(), vec!["a:1", "b:1"]);

        g.global_dispatch("e", 2).unwrap();
        assert_eq!(*list.lock().unwrap(), vec!["a:1", "b:1", "a:2"]);
        assert_eq!(g.listener_count("e"), 1);
    }

    #[test]
    fn test_debug_shows_namespace() {
        let g = GlobalEventListener::new("listener-debug", "g").unwrap();
        let s = format!("{g:?}");
        assert!(s.contains("listener-debug"));
        assert_eq!(g.namespace(), "listener-debug");
        assert_eq!(g.name(), "g");
    }

    #[tokio::test]
    async fn test_registry_survives_across_requests() {
        // Each request builds its own instance, the way a request handler would.
        async fn on_request(data: &'static str, list: Log) -> Result<(), BusError> {
            let g = GlobalEventListener::new("listener-requests", "handler")?;
            if list.lock().unwrap().is_empty() {
                let sink = Arc::clone(&list);
                g.on("pong", move |e: &Event| {
                    sink.lock().unwrap().push(e.data.to_string());
                    Ok::<_, HandlerError>(())
                })?;
            }
            g.global_dispatch("pong", data)
        }

        let list = log();
        tokio::spawn(on_request("first", Arc::clone(&list)))
            .await
            .unwrap()
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        tokio::spawn(on_request("second", Arc::clone(&list)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(*list.lock().unwrap(), vec!["first", "second"]);
    }
}
