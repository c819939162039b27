//! Backend capability descriptors and their lookup functions.

use crate::values::ValueType;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// The kinds of backends a client can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    Redis,
    Memcached,
    Ssdb,
    LevelDb,
    RocksDb,
    UnqLite,
    Lmdb,
    UpscaleDb,
    ForestDb,
}

impl ConnectionType {
    pub const ALL: [ConnectionType; 9] = [
        ConnectionType::Redis,
        ConnectionType::Memcached,
        ConnectionType::Ssdb,
        ConnectionType::LevelDb,
        ConnectionType::RocksDb,
        ConnectionType::UnqLite,
        ConnectionType::Lmdb,
        ConnectionType::UpscaleDb,
        ConnectionType::ForestDb,
    ];

    /// Returns the backend's display name.
    pub fn db_name(&self) -> &'static str {
        match self {
            ConnectionType::Redis => "Redis",
            ConnectionType::Memcached => "Memcached",
            ConnectionType::Ssdb => "SSDB",
            ConnectionType::LevelDb => "LevelDB",
            ConnectionType::RocksDb => "RocksDB",
            ConnectionType::UnqLite => "UnQLite",
            ConnectionType::Lmdb => "LMDB",
            ConnectionType::UpscaleDb => "UpscaleDB",
            ConnectionType::ForestDb => "ForestDB",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.db_name())
    }
}

/// One typed field of a backend's info reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub value_type: ValueType,
}

impl Field {
    pub const fn new(name: &'static str, value_type: ValueType) -> Self {
        Self { name, value_type }
    }

    /// Returns true if the field holds an integral number.
    pub fn is_integral(&self) -> bool {
        matches!(self.value_type, ValueType::Integer | ValueType::UInteger)
    }
}

/// A named section of an info reply and the fields it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoCategory {
    pub name: &'static str,
    pub fields: Vec<Field>,
}

impl InfoCategory {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    /// Finds a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Static description of one backend kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    pub connection_type: ConnectionType,
    pub supported_types: Vec<ValueType>,
    pub info_fields: Vec<InfoCategory>,
}

static REGISTRY: Lazy<HashMap<ConnectionType, CapabilityDescriptor>> = Lazy::new(|| {
    let mut registry = HashMap::new();
    let redis = super::redis::descriptor();
    registry.insert(redis.connection_type, redis);
    registry
});

/// Returns the descriptor of a backend kind, if one is modeled.
pub fn descriptor(ct: ConnectionType) -> Option<&'static CapabilityDescriptor> {
    REGISTRY.get(&ct)
}

/// Returns the value types `ct` stores natively.
///
/// Backend kinds without a descriptor support nothing.
pub fn supported_types(ct: ConnectionType) -> &'static [ValueType] {
    match descriptor(ct) {
        Some(d) => &d.supported_types,
        None => &[],
    }
}

/// Returns the info reply schema of `ct`, in reply order.
pub fn info_fields(ct: ConnectionType) -> &'static [InfoCategory] {
    match descriptor(ct) {
        Some(d) => &d.info_fields,
        None => &[],
    }
}

/// Returns true if `ct` can store values of type `ty`.
pub fn is_supported(ct: ConnectionType, ty: ValueType) -> bool {
    supported_types(ct).contains(&ty)
}
