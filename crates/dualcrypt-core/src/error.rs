//! Error types for `dualcrypt-core`.

use thiserror::Error;

/// Errors produced by crypto function operations.
///
/// Backend failures reach the caller unmodified: the facade never retries
/// and never falls back to the other backend after an error.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key material could not be imported (wrong AES key or IV length,
    /// undecodable SPKI / PKCS#8 document).
    #[error("key import failed: {0}")]
    KeyImport(String),

    /// An encrypt primitive rejected its input (e.g. RSA message too long).
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Decryption failed: bad padding, truncated ciphertext or wrong key.
    #[error("decryption failed: wrong key or corrupted data")]
    Decryption,

    /// PBKDF2 derivation failed (e.g. zero iterations).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The algorithm identifier is outside the set the operation accepts.
    #[error("{operation} does not support {algorithm}")]
    UnsupportedAlgorithm {
        /// Operation that rejected the identifier.
        operation: &'static str,
        /// Canonical name of the rejected algorithm.
        algorithm: &'static str,
    },

    /// Key pair generation failed or the modulus length is unsupported.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The secure random number generator failed.
    #[error("random generation failed: {0}")]
    Random(String),

    /// The native worker task was cancelled or panicked.
    #[error("native backend task failed: {0}")]
    Backend(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
