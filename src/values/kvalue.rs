//! Key/value records.

use super::{NValue, Value, ValueType, DEFAULT_DELIMITER};
use crate::keys::NKey;
use std::sync::Arc;

/// A key together with its (optional) value.
#[derive(Debug, Clone, Default)]
pub struct NDbKValue {
    key: NKey,
    value: Option<NValue>,
}

impl NDbKValue {
    pub fn new(key: NKey, value: impl Into<NValue>) -> Self {
        Self {
            key,
            value: Some(value.into()),
        }
    }

    /// Creates a record with no value attached.
    pub fn without_value(key: NKey) -> Self {
        Self { key, value: None }
    }

    pub fn key(&self) -> &NKey {
        &self.key
    }

    pub fn set_key(&mut self, key: NKey) {
        self.key = key;
    }

    pub fn value(&self) -> Option<&NValue> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: impl Into<NValue>) {
        self.value = Some(value.into());
    }

    /// Returns the value's variant, or `Null` if no value is attached.
    pub fn value_type(&self) -> ValueType {
        self.value
            .as_ref()
            .map_or(ValueType::Null, |v| v.value_type())
    }

    /// Renders the value as trailing command arguments.
    pub fn value_string(&self) -> String {
        self.value
            .as_ref()
            .map(|v| v.render(DEFAULT_DELIMITER))
            .unwrap_or_default()
    }
}

impl PartialEq for NDbKValue {
    fn eq(&self, other: &Self) -> bool {
        if self.key != other.key {
            return false;
        }

        match (&self.value, &other.value) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl From<Value> for NDbKValue {
    fn from(value: Value) -> Self {
        Self::new(NKey::default(), value)
    }
}
