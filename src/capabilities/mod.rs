//! Capability Registry
//!
//! A read-only, process-wide table describing what each backend kind can do:
//! which value types it stores natively and which fields its status ("info")
//! reply carries. Callers consult it before asking a translator for a
//! command; the translator itself never looks at it.
//!
//! ## Example
//!
//! ```
//! use nkv::capabilities::{supported_types, ConnectionType};
//! use nkv::values::ValueType;
//!
//! let types = supported_types(ConnectionType::Redis);
//! assert!(types.contains(&ValueType::Hash));
//! ```

pub mod redis;
pub mod registry;

// Re-export commonly used types
pub use registry::{
    descriptor, info_fields, is_supported, supported_types, CapabilityDescriptor,
    ConnectionType, Field, InfoCategory,
};
