//! # Logging handler for debugging and demos.
//!
//! [`LogHandler`] records every event it receives through `tracing::info!`.
//! Register it under the event names you want to watch.
//!
//! ## Output format (fmt subscriber)
//! ```text
//! INFO globalbus::handlers::log: event namespace=Test origin=X event=pong seq=4 kind=text data=hi
//! ```
//!
//! ## Example
//! ```no_run
//! # use std::sync::Arc;
//! # use globalbus::{GlobalEventListener, LogHandler};
//! let g = GlobalEventListener::new("Test", "X").unwrap();
//! g.add_event_listener("pong", Arc::new(LogHandler)).unwrap();
//! ```

use tracing::info;

use crate::error::HandlerError;
use crate::events::Event;
use crate::handlers::Handler;

/// Handler that logs events and never fails.
///
/// Enabled via the `logging` feature. Not intended for production use;
/// implement a custom [`Handler`] for structured audit trails.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHandler;

impl Handler for LogHandler {
    fn handle(&self, e: &Event) -> Result<(), HandlerError> {
        info!(
            namespace = %e.namespace,
            origin = %e.origin,
            event = %e.name,
            seq = e.seq,
            kind = e.data.kind(),
            data = %e.data,
            "event"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_fails() {
        let h = LogHandler;
        assert!(h.handle(&Event::new("pong", "hi")).is_ok());
        assert_eq!(h.name(), "log");
    }
}
