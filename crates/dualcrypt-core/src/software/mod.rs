//! Software backend: synchronous, pure-software primitives over byte strings.
//!
//! [`SoftwareProvider`] takes and returns [`ByteString`]s; the facade
//! converts at the boundary with [`crate::bytes`]. [`PureCrypto`] is the
//! default provider.

mod pure;

pub use pure::PureCrypto;

use crate::algorithm::HashAlgorithm;
use crate::bytes::ByteString;
use crate::error::CryptoError;

/// Synchronous crypto provider operating on byte strings.
///
/// Every call builds a fresh digest, MAC or cipher context and drops it
/// before returning.
pub trait SoftwareProvider: Send + Sync {
    /// PBKDF2 with `algorithm`'s HMAC; output is `algorithm.output_len()` bytes.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyDerivation` for zero iterations.
    fn pbkdf2(
        &self,
        password: &ByteString,
        salt: &ByteString,
        algorithm: HashAlgorithm,
        iterations: u32,
    ) -> Result<ByteString, CryptoError>;

    /// Message digest.
    ///
    /// # Errors
    ///
    /// Infallible for the default provider.
    fn digest(&self, data: &ByteString, algorithm: HashAlgorithm)
        -> Result<ByteString, CryptoError>;

    /// HMAC tag of `data` under `key`, finalized after a single update.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyImport` if the key is rejected.
    fn hmac(
        &self,
        data: &ByteString,
        key: &ByteString,
        algorithm: HashAlgorithm,
    ) -> Result<ByteString, CryptoError>;

    /// AES-CBC decryption with PKCS#7 padding validation.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyImport` for bad key or IV lengths and
    /// `CryptoError::Decryption` for bad padding or truncated input.
    fn aes_cbc_decrypt(
        &self,
        data: &ByteString,
        iv: &ByteString,
        key: &ByteString,
    ) -> Result<ByteString, CryptoError>;
}
