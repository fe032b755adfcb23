//! Hash algorithm identifiers and their per-backend descriptors.
//!
//! Every operation that takes a hash (digest, HMAC, PBKDF2, RSA-OAEP) is
//! keyed off [`HashAlgorithm`]. The [`DESCRIPTORS`] table is the single
//! place where a variant resolves to its canonical native name and output
//! length. Both backends read from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Closed set of hash algorithms accepted by the facade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-1 (20-byte output). Legacy: HMAC and RSA-OAEP only.
    Sha1,
    /// SHA-256 (32-byte output).
    Sha256,
    /// SHA-512 (64-byte output).
    Sha512,
}

/// Static description of one [`HashAlgorithm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashDescriptor {
    /// Variant this row describes.
    pub algorithm: HashAlgorithm,
    /// Name the native API expects, e.g. `"SHA-256"`.
    pub native_name: &'static str,
    /// Lower-case identifier, e.g. `"sha256"`.
    pub id: &'static str,
    /// Digest / MAC / derived-key length in bytes.
    pub output_len: usize,
}

/// Lookup table, one row per [`HashAlgorithm`] in declaration order.
pub static DESCRIPTORS: [HashDescriptor; 3] = [
    HashDescriptor {
        algorithm: HashAlgorithm::Sha1,
        native_name: "SHA-1",
        id: "sha1",
        output_len: 20,
    },
    HashDescriptor {
        algorithm: HashAlgorithm::Sha256,
        native_name: "SHA-256",
        id: "sha256",
        output_len: 32,
    },
    HashDescriptor {
        algorithm: HashAlgorithm::Sha512,
        native_name: "SHA-512",
        id: "sha512",
        output_len: 64,
    },
];

impl HashAlgorithm {
    /// All variants, in table order.
    pub const ALL: [Self; 3] = [Self::Sha1, Self::Sha256, Self::Sha512];

    const fn index(self) -> usize {
        match self {
            Self::Sha1 => 0,
            Self::Sha256 => 1,
            Self::Sha512 => 2,
        }
    }

    /// Table row for this algorithm.
    #[must_use]
    pub fn descriptor(self) -> &'static HashDescriptor {
        &DESCRIPTORS[self.index()]
    }

    /// Canonical native name (`"SHA-1"`, `"SHA-256"`, `"SHA-512"`).
    #[must_use]
    pub fn native_name(self) -> &'static str {
        self.descriptor().native_name
    }

    /// Output length in bytes (20, 32 or 64).
    #[must_use]
    pub fn output_len(self) -> usize {
        self.descriptor().output_len
    }

    /// Lower-case identifier (`"sha1"`, `"sha256"`, `"sha512"`).
    #[must_use]
    pub fn id(self) -> &'static str {
        self.descriptor().id
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Per-operation restrictions
// ---------------------------------------------------------------------------

/// Accept only the PBKDF2 subset {sha256, sha512}.
///
/// # Errors
///
/// Returns `CryptoError::UnsupportedAlgorithm` for SHA-1.
pub fn require_pbkdf2(algorithm: HashAlgorithm) -> Result<HashAlgorithm, CryptoError> {
    match algorithm {
        HashAlgorithm::Sha256 | HashAlgorithm::Sha512 => Ok(algorithm),
        HashAlgorithm::Sha1 => Err(CryptoError::UnsupportedAlgorithm {
            operation: "pbkdf2",
            algorithm: algorithm.id(),
        }),
    }
}

/// Accept only the RSA-OAEP subset {sha1, sha256}.
///
/// # Errors
///
/// Returns `CryptoError::UnsupportedAlgorithm` for SHA-512.
pub fn require_oaep(algorithm: HashAlgorithm) -> Result<HashAlgorithm, CryptoError> {
    match algorithm {
        HashAlgorithm::Sha1 | HashAlgorithm::Sha256 => Ok(algorithm),
        HashAlgorithm::Sha512 => Err(CryptoError::UnsupportedAlgorithm {
            operation: "rsa-oaep",
            algorithm: algorithm.id(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
