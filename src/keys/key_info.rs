//! Namespace breakdown of flat keys.
//!
//! Many applications encode hierarchy in key names, e.g. `app:users:42`.
//! `KeyInfo` holds the segments of such a key so a UI can group keys into a
//! tree without the store knowing anything about namespaces.

/// The segments of a key split on a namespace separator.
///
/// The last segment is the leaf name; everything before it is the namespace
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
    segments: Vec<String>,
    separator: String,
}

impl KeyInfo {
    /// Creates a key info from already split segments.
    pub fn new(segments: Vec<String>, separator: impl Into<String>) -> Self {
        Self {
            segments,
            separator: separator.into(),
        }
    }

    /// Splits `key` on `separator`, dropping empty segments.
    ///
    /// An empty separator keeps the whole key as a single segment.
    pub fn parse(key: &str, separator: &str) -> Self {
        let segments = if separator.is_empty() {
            if key.is_empty() {
                Vec::new()
            } else {
                vec![key.to_string()]
            }
        } else {
            key.split(separator)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };

        Self::new(segments, separator)
    }

    /// Rejoins all segments with the separator.
    pub fn key(&self) -> String {
        self.segments.join(&self.separator)
    }

    /// Returns the segments, namespaces first and the leaf last.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the separator this info was built with.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns the leaf name, if any.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Returns true if the key has at least one namespace segment.
    pub fn has_namespace(&self) -> bool {
        self.nspace_size() > 0
    }

    /// Returns the full namespace path (all segments but the last).
    pub fn nspace(&self) -> String {
        match self.nspace_size() {
            0 => String::new(),
            n => self.join_namespace(n - 1),
        }
    }

    /// Returns the number of namespace segments.
    pub fn nspace_size(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// Joins namespace segments `0..=pos`.
    ///
    /// Returns an empty string if `pos` is not a namespace position.
    pub fn join_namespace(&self, pos: usize) -> String {
        if pos < self.nspace_size() {
            self.segments[..=pos].join(&self.separator)
        } else {
            String::new()
        }
    }
}
