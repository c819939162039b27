//! Keys with a time-to-live.

use super::{KeyInfo, KeyString};

/// Time-to-live in seconds.
pub type Ttl = i64;

/// Sentinel meaning "no expiry set".
pub const NO_TTL: Ttl = -1;

/// Sentinel reported by the backend for a key that does not exist.
pub const EXPIRED_TTL: Ttl = -2;

/// A key paired with its TTL.
///
/// Two `NKey`s are equal only if both the key and the TTL match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NKey {
    key: KeyString,
    ttl: Ttl,
}

impl NKey {
    /// Creates a key with the given TTL.
    pub fn new(key: impl Into<KeyString>, ttl: Ttl) -> Self {
        Self {
            key: key.into(),
            ttl,
        }
    }

    /// Creates a key without expiry.
    pub fn persistent(key: impl Into<KeyString>) -> Self {
        Self::new(key, NO_TTL)
    }

    pub fn key(&self) -> &KeyString {
        &self.key
    }

    pub fn set_key(&mut self, key: KeyString) {
        self.key = key;
    }

    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    pub fn set_ttl(&mut self, ttl: Ttl) {
        self.ttl = ttl;
    }

    /// Returns true if no expiry is set.
    pub fn is_persistent(&self) -> bool {
        self.ttl == NO_TTL
    }

    /// Splits the printable key text on `separator`.
    pub fn info(&self, separator: &str) -> KeyInfo {
        KeyInfo::parse(self.key.key_data(), separator)
    }
}

impl Default for NKey {
    fn default() -> Self {
        Self {
            key: KeyString::default(),
            ttl: NO_TTL,
        }
    }
}
