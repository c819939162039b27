//! Binary-Safe Key Strings
//!
//! A key handed to us by the user is an arbitrary byte sequence. Before it can
//! be placed inside a line-oriented command it must be made printable.
//!
//! ## Encoding
//!
//! - If every byte is printable (`0x20..=0x7E`), the key is kept as is.
//! - Otherwise every byte is rewritten as the four characters `\xHH`
//!   (upper-case hex), so the encoded form is exactly four times as long.
//!
//! ```text
//! b"user:1"         ->  user:1
//! b"\x00"           ->  \x00
//! b"a\nb"           ->  \x61\x0A\x62
//! ```

use bytes::Bytes;
use std::fmt;

/// Marker written in front of every hex pair of an encoded binary key.
const HEX_MARKER: &str = "\\x";

/// Raw key bytes as supplied by the caller.
///
/// Kept as a separate type from the command text produced by
/// the translator, so an unescaped key can never end up on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StringKey(Bytes);

impl StringKey {
    /// Creates a raw key from anything convertible into `Bytes`.
    pub fn new(data: impl Into<Bytes>) -> Self {
        StringKey(data.into())
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the key has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for StringKey {
    fn from(s: &str) -> Self {
        StringKey(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for StringKey {
    fn from(s: String) -> Self {
        StringKey(Bytes::from(s))
    }
}

impl From<&[u8]> for StringKey {
    fn from(b: &[u8]) -> Self {
        StringKey(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for StringKey {
    fn from(v: Vec<u8>) -> Self {
        StringKey(Bytes::from(v))
    }
}

impl From<Bytes> for StringKey {
    fn from(b: Bytes) -> Self {
        StringKey(b)
    }
}

/// Returns true if any byte of `key` is not a printable ASCII character.
pub fn is_binary_key(key: &[u8]) -> bool {
    key.iter().any(|&b| !is_printable(b))
}

#[inline]
fn is_printable(b: u8) -> bool {
    (0x20..=0x7e).contains(&b)
}

/// A key in its printable, command-safe form.
///
/// The stored text is always printable ASCII and can be spliced into a
/// command line without any further escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyString {
    key: String,
}

impl KeyString {
    /// Creates a key string from raw key bytes.
    pub fn new(key: impl Into<StringKey>) -> Self {
        let mut ks = KeyString::default();
        ks.set_key(key);
        ks
    }

    /// Replaces the key, encoding it if it contains non-printable bytes.
    pub fn set_key(&mut self, key: impl Into<StringKey>) {
        let raw = key.into();
        let bytes = raw.as_bytes();

        self.key = if is_binary_key(bytes) {
            let hexed = hex::encode_upper(bytes);
            let mut encoded = String::with_capacity(bytes.len() * 4);
            for pair in hexed.as_bytes().chunks(2) {
                encoded.push_str(HEX_MARKER);
                encoded.push(pair[0] as char);
                encoded.push(pair[1] as char);
            }
            encoded
        } else {
            // Printable ASCII is always valid UTF-8.
            bytes.iter().map(|&b| b as char).collect()
        };
    }

    /// Returns the printable representation.
    ///
    /// For binary keys this is the `\xHH` encoding, not the original bytes.
    pub fn key_data(&self) -> &str {
        &self.key
    }

    /// Returns the length of the printable representation.
    pub fn key_size(&self) -> usize {
        self.key.len()
    }

    /// Returns true if the key is empty.
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

impl From<&str> for KeyString {
    fn from(s: &str) -> Self {
        KeyString::new(s)
    }
}

impl fmt::Display for KeyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_detection() {
        assert!(!is_binary_key(b"user:1"));
        assert!(!is_binary_key(b"hello world ~"));
        assert!(!is_binary_key(b""));
        assert!(is_binary_key(b"a\x00b"));
        assert!(is_binary_key(b"tab\there"));
        assert!(is_binary_key(b"\x7f"));
        assert!(is_binary_key("caf\u{e9}".as_bytes()));
    }

    #[test]
    fn test_printable_key_is_kept() {
        for key in ["user:1", "a b c", "!#$%&'()*+,-./", "~"] {
            let ks = KeyString::new(key);
            assert_eq!(ks.key_data(), key);
            assert_eq!(ks.key_size(), key.len());
        }
    }

    #[test]
    fn test_nul_byte_is_hexed() {
        let ks = KeyString::new(&b"\x00"[..]);
        assert_eq!(ks.key_data(), "\\x00");
        assert_eq!(ks.key_size(), 4);
    }

    #[test]
    fn test_binary_key_encodes_every_byte() {
        let ks = KeyString::new(&b"a\nb"[..]);
        assert_eq!(ks.key_data(), "\\x61\\x0A\\x62");
    }

    #[test]
    fn test_binary_key_length_is_four_times() {
        let raw: Vec<u8> = (0u8..=255).collect();
        let ks = KeyString::new(raw.clone());

        assert_eq!(ks.key_size(), raw.len() * 4);
        assert!(ks.key_data().is_ascii());
        assert!(!is_binary_key(ks.key_data().as_bytes()));

        for (i, group) in ks.key_data().as_bytes().chunks(4).enumerate() {
            assert_eq!(&group[..2], b"\\x");
            let expected = format!("{:02X}", raw[i]);
            assert_eq!(&group[2..], expected.as_bytes());
        }
    }

    #[test]
    fn test_set_key_replaces_previous() {
        let mut ks = KeyString::new(&b"\x01"[..]);
        ks.set_key("plain");
        assert_eq!(ks.key_data(), "plain");
    }

    #[test]
    fn test_equality_uses_encoded_form() {
        assert_eq!(KeyString::new("k"), KeyString::from("k"));
        assert_ne!(KeyString::new("k"), KeyString::new("K"));
    }
}
