//! Native backend: asynchronous, platform-provided primitives.
//!
//! [`NativeProvider`] is the typed adapter the facade talks to. It exposes
//! only buffer-in / buffer-out primitives; descriptors and key handles stay
//! behind it. [`PlatformCrypto`] is the default provider.

pub mod key;
mod platform;

use async_trait::async_trait;

pub use platform::PlatformCrypto;

use crate::algorithm::HashAlgorithm;
use crate::error::CryptoError;

/// DER-encoded RSA key pair: `(SPKI public key, PKCS#8 private key)`.
pub type RsaKeyPair = (Vec<u8>, Vec<u8>);

/// Asynchronous crypto provider operating on raw buffers.
///
/// Every call imports its key material into a fresh handle and drops it
/// before returning. No state is shared between calls.
#[async_trait]
pub trait NativeProvider: Send + Sync {
    /// PBKDF2 with `algorithm`'s HMAC; output is `algorithm.output_len()` bytes.
    async fn pbkdf2(
        &self,
        password: &[u8],
        salt: &[u8],
        algorithm: HashAlgorithm,
        iterations: u32,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Message digest.
    async fn digest(&self, data: &[u8], algorithm: HashAlgorithm) -> Result<Vec<u8>, CryptoError>;

    /// HMAC tag of `data` under `key`.
    async fn hmac(
        &self,
        data: &[u8],
        key: &[u8],
        algorithm: HashAlgorithm,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Constant-time HMAC verification.
    async fn hmac_verify(
        &self,
        data: &[u8],
        key: &[u8],
        algorithm: HashAlgorithm,
        tag: &[u8],
    ) -> Result<bool, CryptoError>;

    /// AES-CBC encryption with PKCS#7 padding.
    async fn aes_cbc_encrypt(
        &self,
        data: &[u8],
        iv: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// AES-CBC decryption, rejecting bad padding.
    async fn aes_cbc_decrypt(
        &self,
        data: &[u8],
        iv: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// RSA-OAEP encryption; `algorithm` selects both the OAEP hash and MGF1.
    async fn rsa_oaep_encrypt(
        &self,
        data: &[u8],
        public_key_spki: &[u8],
        algorithm: HashAlgorithm,
    ) -> Result<Vec<u8>, CryptoError>;

    /// RSA-OAEP decryption.
    async fn rsa_oaep_decrypt(
        &self,
        data: &[u8],
        private_key_pkcs8: &[u8],
        algorithm: HashAlgorithm,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Generate an RSA key pair with public exponent 65537.
    async fn rsa_generate_key_pair(&self, bits: usize) -> Result<RsaKeyPair, CryptoError>;

    /// SPKI public key of a PKCS#8 private key.
    async fn rsa_extract_public_key(&self, private_key_pkcs8: &[u8])
        -> Result<Vec<u8>, CryptoError>;

    /// `length` bytes from the platform CSPRNG.
    async fn random_bytes(&self, length: usize) -> Result<Vec<u8>, CryptoError>;
}
