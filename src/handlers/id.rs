//! Registration identity tokens.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for listener ids.
static LISTENER_SEQ: AtomicU64 = AtomicU64::new(1);

/// Opaque token identifying one registration.
///
/// Returned by `add_event_listener`; unique for the life of the process, even
/// when the same handler is registered several times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn next() -> Self {
        Self(LISTENER_SEQ.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value (for logs).
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ListenerId::next();
        let b = ListenerId::next();
        assert_ne!(a, b);
        assert!(b > a);
        assert!(a.to_string().starts_with("listener-"));
    }
}
