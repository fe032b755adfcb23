//! Byte bridge between text, raw buffers, and byte strings.
//!
//! The native backend consumes raw buffers; the software backend consumes
//! [`ByteString`]s, where every `char` carries exactly one byte value
//! (U+0000..=U+00FF). Binary data is mapped byte-for-char and is never
//! re-encoded as UTF-8, so `from_byte_string(&to_byte_string(b)) == b` for
//! every buffer.

use std::borrow::Cow;
use std::fmt;

use zeroize::Zeroize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A borrowed text-or-buffer argument.
///
/// Text is UTF-8 encoded on the way in; buffers are used as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input<'a> {
    /// UTF-8 text (a password, a label).
    Text(&'a str),
    /// Raw binary data.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Bytes(value)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Self::Bytes(value.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Self::Bytes(value.as_slice())
    }
}

// ---------------------------------------------------------------------------
// ByteString
// ---------------------------------------------------------------------------

/// Text-shaped carrier for arbitrary bytes, one `char` per byte.
///
/// The invariant (every char ≤ U+00FF) is upheld by construction: the only
/// constructors are [`to_byte_string`] and `From<&[u8]>`.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteString(String);

impl ByteString {
    /// Borrow the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of bytes carried (code units, not UTF-8 length).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Returns `true` if no bytes are carried.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the carried byte values.
    // chars are <= U+00FF by construction, so the cast is lossless.
    #[allow(clippy::cast_possible_truncation)]
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.chars().map(|c| u32::from(c) as u8)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.iter().copied().map(char::from).collect())
    }
}

impl Zeroize for ByteString {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

// Byte strings routinely carry key material.
impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteString({} bytes)", self.len())
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Convert text or a buffer into a raw buffer.
///
/// Text is UTF-8 encoded; buffers are borrowed without copying.
#[must_use]
pub fn to_buffer(value: Input<'_>) -> Cow<'_, [u8]> {
    match value {
        Input::Text(text) => Cow::Borrowed(text.as_bytes()),
        Input::Bytes(bytes) => Cow::Borrowed(bytes),
    }
}

/// Convert text or a buffer into a [`ByteString`].
///
/// Text is UTF-8 encoded first, then each byte becomes one char. Buffers
/// are mapped byte-for-char directly.
#[must_use]
pub fn to_byte_string(value: Input<'_>) -> ByteString {
    ByteString::from(to_buffer(value).as_ref())
}

/// Convert a [`ByteString`] back into a raw buffer.
#[must_use]
pub fn from_byte_string(value: &ByteString) -> Vec<u8> {
    value.bytes().collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
