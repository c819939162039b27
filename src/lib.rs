//! # nkv - Key/Value Model and Wire-Command Translation
//!
//! `nkv` is the layer of a multi-backend NoSQL client that turns a
//! backend-agnostic description of a key/value operation into the exact
//! command text a specific store understands.
//!
//! ## Features
//!
//! - **Binary-Safe Keys**: Arbitrary key bytes are encoded into printable text
//! - **Typed Values**: A closed sum type over strings, numbers and collections
//! - **Namespaces**: Flat keys split into hierarchical segments on demand
//! - **Translators**: Pure, thread-safe command builders, one per backend family
//! - **Capabilities**: Static per-backend descriptions of types and info fields
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                 nkv                                     │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌───────────────────┐            │
//! │  │  Key Model  │───>│ Value Model │───>│ CommandTranslator │──> text    │
//! │  │ (KeyString) │    │ (NDbKValue) │    │ (RedisTranslator) │            │
//! │  └─────────────┘    └─────────────┘    └─────────┬─────────┘            │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │  ┌─────────────────────┐              ┌──────────────────────┐          │
//! │  │ Capability Registry │              │ Command table        │          │
//! │  │ (read-only statics) │              │ (&'static [Command]) │          │
//! │  └─────────────────────┘              └──────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use nkv::keys::{NKey, NO_TTL};
//! use nkv::translator::{CommandTranslator, RedisTranslator};
//! use nkv::values::{NDbKValue, Value, ValueType};
//!
//! let translator = RedisTranslator::default();
//!
//! let record = NDbKValue::new(
//!     NKey::new("user:1", NO_TTL),
//!     Value::hash([("field1", "v1"), ("field2", "v2")]),
//! );
//!
//! let create = translator.create_key_command(&record).unwrap();
//! assert_eq!(create.as_str(), "HMSET user:1 field1 v1 field2 v2");
//!
//! let load = translator.load_key_command(record.key(), ValueType::Hash).unwrap();
//! assert_eq!(load.as_str(), "HGETALL user:1");
//! ```
//!
//! ## Module Overview
//!
//! - [`keys`]: binary-safe keys, namespaces and TTLs
//! - [`values`]: typed values and key/value records
//! - [`capabilities`]: per-backend capability descriptors
//! - [`translator`]: the translator contract and the Redis implementation
//! - [`shell`]: line-oriented front end used by the `nkv` binary
//!
//! ## Design Highlights
//!
//! ### No Raw Keys on the Wire
//!
//! Raw key bytes (`StringKey`) and produced command text (`CommandBuffer`)
//! are different types. The only path from one to the other goes through
//! `KeyString`, which hex-encodes keys containing non-printable bytes.
//!
//! ### Lock-Free Sharing
//!
//! Translators hold only a `'static` command table and the capability
//! registry is built once. Both can be read from any number of threads
//! without synchronization.

pub mod capabilities;
pub mod keys;
pub mod shell;
pub mod translator;
pub mod values;

// Re-export commonly used types for convenience
pub use keys::{KeyInfo, KeyString, NKey, StringKey, NO_TTL};
pub use translator::{
    CommandBuffer, CommandTranslator, RedisTranslator, TranslateError, TranslateResult,
};
pub use values::{NDbKValue, NValue, Value, ValueType};

/// Version of nkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
