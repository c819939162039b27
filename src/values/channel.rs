//! Pub/Sub channels.

use std::fmt;

/// A named pub/sub channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NDbPSChannel {
    name: String,
    subscribers: usize,
}

impl NDbPSChannel {
    pub fn new(name: impl Into<String>, subscribers: usize) -> Self {
        Self {
            name: name.into(),
            subscribers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of subscribers last reported by the backend.
    pub fn subscribers(&self) -> usize {
        self.subscribers
    }

    pub fn set_subscribers(&mut self, count: usize) {
        self.subscribers = count;
    }
}

impl From<&str> for NDbPSChannel {
    fn from(name: &str) -> Self {
        Self::new(name, 0)
    }
}

impl fmt::Display for NDbPSChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
