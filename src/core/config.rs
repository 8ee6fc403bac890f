//! # Registry configuration.
//!
//! Provides [`BusConfig`], the naming rules applied by a [`Registry`](crate::Registry)
//! to namespace keys, instance names and event names.
//!
//! ## Rules
//! A name is rejected with `BusError::InvalidArgument` if it:
//! - is empty,
//! - is longer than `max_name_len` characters (when the limit is set),
//! - contains a control character (`\n`, `\t`, `\0`, ...),
//! - starts or ends with whitespace.
//!
//! ## Sentinel values
//! - `max_name_len = 0` → no length limit

use crate::error::{BusError, NameKind};

/// Naming rules for one registry.
///
/// The global registry always uses [`BusConfig::default`]. Build a
/// [`Registry`](crate::Registry) with [`Registry::new`](crate::Registry::new) to
/// apply different rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusConfig {
    /// Maximum length of any name, in characters.
    ///
    /// - `0` = unlimited
    /// - `n > 0` = names longer than `n` characters are rejected
    pub max_name_len: usize,
}

impl BusConfig {
    /// Returns the name length limit as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` characters
    #[inline]
    pub fn name_limit(&self) -> Option<usize> {
        if self.max_name_len == 0 {
            None
        } else {
            Some(self.max_name_len)
        }
    }

    /// Checks `value` against these rules.
    ///
    /// # Example
    /// ```
    /// use globalbus::{BusConfig, NameKind};
    ///
    /// let cfg = BusConfig::default();
    /// assert!(cfg.validate_name(NameKind::Event, "pong").is_ok());
    /// assert!(cfg.validate_name(NameKind::Event, "").is_err());
    /// assert!(cfg.validate_name(NameKind::Event, " pong").is_err());
    /// ```
    pub fn validate_name(&self, kind: NameKind, value: &str) -> Result<(), BusError> {
        if value.is_empty() {
            return Err(BusError::invalid(kind, "must not be empty"));
        }
        if let Some(limit) = self.name_limit() {
            let len = value.chars().count();
            if len > limit {
                return Err(BusError::invalid(
                    kind,
                    format!("{len} characters exceeds the limit of {limit}"),
                ));
            }
        }
        if let Some(c) = value.chars().find(|c| c.is_control()) {
            return Err(BusError::invalid(
                kind,
                format!("contains control character {c:?}"),
            ));
        }
        if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
            return Err(BusError::invalid(
                kind,
                "must not start or end with whitespace",
            ));
        }
        Ok(())
    }
}

impl Default for BusConfig {
    /// Default configuration:
    ///
    /// - `max_name_len = 256`
    fn default() -> Self {
        Self { max_name_len: 256 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(res: Result<(), BusError>) -> Option<NameKind> {
        res.err().and_then(|e| e.name_kind())
    }

    #[test]
    fn test_accepts_ordinary_names() {
        let cfg = BusConfig::default();
        for name in ["Test", "GlboalEventListenerTest", "user.created", "a b", "ünïcode"] {
            assert!(cfg.validate_name(NameKind::Namespace, name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_rejects_empty() {
        let cfg = BusConfig::default();
        assert_eq!(
            kind_of(cfg.validate_name(NameKind::Instance, "")),
            Some(NameKind::Instance)
        );
    }

    #[test]
    fn test_rejects_control_and_padding() {
        let cfg = BusConfig::default();
        assert!(cfg.validate_name(NameKind::Event, "a\nb").is_err());
        assert!(cfg.validate_name(NameKind::Event, "a\0").is_err());
        assert!(cfg.validate_name(NameKind::Event, "pong ").is_err());
        assert!(cfg.validate_name(NameKind::Event, "\tpong").is_err());
    }

    #[test]
    fn test_length_limit_counts_chars() {
        let cfg = BusConfig { max_name_len: 3 };
        assert!(cfg.validate_name(NameKind::Event, "äöü").is_ok());
        assert!(cfg.validate_name(NameKind::Event, "abcd").is_err());
    }

    #[test]
    fn test_zero_limit_is_unlimited() {
        let cfg = BusConfig { max_name_len: 0 };
        assert_eq!(cfg.name_limit(), None);
        let long = "x".repeat(10_000);
        assert!(cfg.validate_name(NameKind::Event, &long).is_ok());
        assert!(BusConfig::default()
            .validate_name(NameKind::Event, &long)
            .is_err());
    }
}
