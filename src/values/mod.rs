//! Value Model
//!
//! Typed values, the key/value record that wraps them, and pub/sub channels.
//!
//! ## Modules
//!
//! - `value`: the `Value` sum type and its `ValueType` tag
//! - `kvalue`: `NDbKValue`, a key together with its value
//! - `channel`: `NDbPSChannel`, a named pub/sub channel

pub mod channel;
pub mod kvalue;
pub mod value;

// Re-export commonly used types
pub use channel::NDbPSChannel;
pub use kvalue::NDbKValue;
pub use value::{NValue, Value, ValueType};

/// Delimiter used when a composite value is rendered as command arguments.
pub const DEFAULT_DELIMITER: &str = " ";
