//! Key Model
//!
//! This module defines how keys are represented before they are spliced into
//! a wire command. Raw key bytes may contain anything, including NUL bytes and
//! non-ASCII data; wire commands are plain printable text. The types here keep
//! those two worlds apart.
//!
//! ## Overview
//!
//! ```text
//!   raw bytes (StringKey)
//!          │
//!          │ KeyString::new()
//!          ▼
//!  ┌──────────────────┐   printable?  ──yes──>  stored verbatim
//!  │    KeyString     │
//!  └──────────────────┘   printable?  ──no───>  \xHH\xHH...
//!          │
//!          │ NKey::new(key, ttl)
//!          ▼
//!  ┌──────────────────┐   get_info(":")   ┌──────────────────────┐
//!  │       NKey       │ ────────────────> │ KeyInfo [ns.., leaf] │
//!  └──────────────────┘                   └──────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `key_string`: raw key bytes and their printable encoding
//! - `key_info`: namespace breakdown of a flat key
//! - `nkey`: a key paired with its time-to-live

pub mod key_info;
pub mod key_string;
pub mod nkey;

// Re-export commonly used types
pub use key_info::KeyInfo;
pub use key_string::{is_binary_key, KeyString, StringKey};
pub use nkey::{NKey, Ttl, EXPIRED_TTL, NO_TTL};

/// The namespace separator used when the caller does not pick one.
pub const DEFAULT_NS_SEPARATOR: &str = ":";
