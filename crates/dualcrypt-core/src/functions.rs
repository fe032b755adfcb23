//! The crypto function facade.
//!
//! [`CryptoFunctions`] is the public contract. Each operation resolves its
//! backend through [`crate::policy`] *before* the call, bridges its inputs
//! to that backend's representation, and returns a raw buffer. Every
//! operation is `async`, including those served synchronously by the
//! software backend. Backend errors are returned as-is.
//!
//! The default native provider runs on the tokio blocking pool. Awaited
//! outside a tokio runtime, native-backed operations other than
//! `random_bytes` return `CryptoError::Backend` instead of a result.

use zeroize::Zeroizing;

use crate::algorithm::{require_oaep, require_pbkdf2, HashAlgorithm};
use crate::bytes::{from_byte_string, to_buffer, to_byte_string, Input};
use crate::capability::{self, NativeCapability};
use crate::config::CryptoConfig;
use crate::error::CryptoError;
use crate::native::{NativeProvider, PlatformCrypto, RsaKeyPair};
use crate::policy::{self, Backend, Operation, SizePolicy};
use crate::software::{PureCrypto, SoftwareProvider};

/// HMAC key length used by [`CryptoFunctions::compare`].
const COMPARE_KEY_LEN: usize = 32;

/// Crypto function facade over a native and a software provider.
///
/// With the default [`PlatformCrypto`] provider, await operations inside a
/// tokio runtime; elsewhere native-backed calls fail with
/// `CryptoError::Backend`.
#[derive(Clone, Debug)]
pub struct CryptoFunctions<N = PlatformCrypto, S = PureCrypto> {
    native: N,
    software: S,
    capability: NativeCapability,
    sizes: SizePolicy,
}

impl CryptoFunctions {
    /// Facade over the default providers with an injected capability.
    #[must_use]
    pub fn new(capability: NativeCapability) -> Self {
        Self::with_providers(
            PlatformCrypto::new(),
            PureCrypto::new(),
            capability,
            SizePolicy::default(),
        )
    }

    /// Facade configured from a [`CryptoConfig`].
    ///
    /// The capability is evaluated from `config.platform` for this instance
    /// only; the process-wide value is left untouched.
    #[must_use]
    pub fn from_config(config: &CryptoConfig) -> Self {
        Self::with_providers(
            PlatformCrypto::new(),
            PureCrypto::new(),
            capability::detect(&config.platform),
            config.size_policy(),
        )
    }

    /// Facade using the pinned process-wide capability.
    #[must_use]
    pub fn from_process() -> Self {
        Self::new(capability::process_capability())
    }
}

impl<N: NativeProvider, S: SoftwareProvider> CryptoFunctions<N, S> {
    /// Facade over custom providers.
    pub const fn with_providers(
        native: N,
        software: S,
        capability: NativeCapability,
        sizes: SizePolicy,
    ) -> Self {
        Self {
            native,
            software,
            capability,
            sizes,
        }
    }

    /// Capability this facade was built with.
    #[must_use]
    pub const fn capability(&self) -> NativeCapability {
        self.capability
    }

    /// Size policy this facade was built with.
    #[must_use]
    pub const fn size_policy(&self) -> SizePolicy {
        self.sizes
    }

    fn backend(&self, operation: Operation) -> Backend {
        policy::route(operation, self.capability, &self.sizes)
    }

    /// Native provider for an operation the software backend cannot serve.
    fn native_for(&self, operation: Operation) -> Result<&N, CryptoError> {
        match self.backend(operation) {
            Backend::Native => Ok(&self.native),
            Backend::Software => Err(CryptoError::Backend(format!(
                "{operation:?} has no software implementation"
            ))),
        }
    }

    // -----------------------------------------------------------------------
    // Capability-selected operations
    // -----------------------------------------------------------------------

    /// Derive a key with PBKDF2.
    ///
    /// `algorithm` must be SHA-256 or SHA-512; the output is 32 or 64 bytes.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::UnsupportedAlgorithm` for SHA-1 and
    /// `CryptoError::KeyDerivation` for zero iterations.
    pub async fn pbkdf2<'a>(
        &self,
        password: impl Into<Input<'a>>,
        salt: impl Into<Input<'a>>,
        algorithm: HashAlgorithm,
        iterations: u32,
    ) -> Result<Vec<u8>, CryptoError> {
        let algorithm = require_pbkdf2(algorithm)?;
        let (password, salt) = (password.into(), salt.into());
        match self.backend(Operation::Pbkdf2) {
            Backend::Native => {
                self.native
                    .pbkdf2(&to_buffer(password), &to_buffer(salt), algorithm, iterations)
                    .await
            }
            Backend::Software => {
                let password = Zeroizing::new(to_byte_string(password));
                let derived = Zeroizing::new(self.software.pbkdf2(
                    &password,
                    &to_byte_string(salt),
                    algorithm,
                    iterations,
                )?);
                Ok(from_byte_string(&derived))
            }
        }
    }

    /// Hash `value`.
    ///
    /// # Errors
    ///
    /// Propagates backend failures (none expected for the default providers).
    pub async fn hash<'a>(
        &self,
        value: impl Into<Input<'a>>,
        algorithm: HashAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        let value = value.into();
        match self.backend(Operation::Hash) {
            Backend::Native => self.native.digest(&to_buffer(value), algorithm).await,
            Backend::Software => {
                let digest = self.software.digest(&to_byte_string(value), algorithm)?;
                Ok(from_byte_string(&digest))
            }
        }
    }

    /// HMAC of `value` under `key`.
    ///
    /// # Errors
    ///
    /// Propagates key-import failures from the backend.
    pub async fn hmac(
        &self,
        value: &[u8],
        key: &[u8],
        algorithm: HashAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        match self.backend(Operation::Hmac) {
            Backend::Native => self.native.hmac(value, key, algorithm).await,
            Backend::Software => {
                let key = Zeroizing::new(to_byte_string(Input::Bytes(key)));
                let tag = self
                    .software
                    .hmac(&to_byte_string(Input::Bytes(value)), &key, algorithm)?;
                Ok(from_byte_string(&tag))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Fixed-backend operations
    // -----------------------------------------------------------------------

    /// AES-CBC encrypt with PKCS#7 padding. Always native.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyImport` for a key that is not 16/24/32 bytes
    /// or an IV that is not 16 bytes.
    pub async fn aes_encrypt(
        &self,
        data: &[u8],
        iv: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        self.native_for(Operation::AesEncrypt)?
            .aes_cbc_encrypt(data, iv, key)
            .await
    }

    /// AES-CBC decrypt a small payload. Software by default, regardless of
    /// capability.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Decryption` on padding mismatch or truncated
    /// ciphertext, `CryptoError::KeyImport` on bad key or IV length.
    pub async fn aes_decrypt_small(
        &self,
        data: &[u8],
        iv: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        self.aes_decrypt(Operation::AesDecryptSmall, data, iv, key)
            .await
    }

    /// AES-CBC decrypt a large payload. Always native.
    ///
    /// # Errors
    ///
    /// Same as [`Self::aes_decrypt_small`].
    pub async fn aes_decrypt_large(
        &self,
        data: &[u8],
        iv: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        self.aes_decrypt(Operation::AesDecryptLarge, data, iv, key)
            .await
    }

    async fn aes_decrypt(
        &self,
        operation: Operation,
        data: &[u8],
        iv: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        match self.backend(operation) {
            Backend::Native => self.native.aes_cbc_decrypt(data, iv, key).await,
            Backend::Software => {
                let key = Zeroizing::new(to_byte_string(Input::Bytes(key)));
                let plaintext = Zeroizing::new(self.software.aes_cbc_decrypt(
                    &to_byte_string(Input::Bytes(data)),
                    &to_byte_string(Input::Bytes(iv)),
                    &key,
                )?);
                Ok(from_byte_string(&plaintext))
            }
        }
    }

    /// RSA-OAEP encrypt under a DER SPKI public key. Always native.
    ///
    /// `algorithm` (SHA-1 or SHA-256) selects the OAEP hash and MGF1.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::UnsupportedAlgorithm` for SHA-512,
    /// `CryptoError::KeyImport` for an undecodable key and
    /// `CryptoError::Encryption` for an oversized message.
    pub async fn rsa_encrypt(
        &self,
        data: &[u8],
        public_key: &[u8],
        algorithm: HashAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        let algorithm = require_oaep(algorithm)?;
        self.native_for(Operation::RsaEncrypt)?
            .rsa_oaep_encrypt(data, public_key, algorithm)
            .await
    }

    /// RSA-OAEP decrypt under a DER PKCS#8 private key. Always native.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::UnsupportedAlgorithm` for SHA-512,
    /// `CryptoError::KeyImport` for an undecodable key and
    /// `CryptoError::Decryption` when OAEP decoding fails.
    pub async fn rsa_decrypt(
        &self,
        data: &[u8],
        private_key: &[u8],
        algorithm: HashAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        let algorithm = require_oaep(algorithm)?;
        self.native_for(Operation::RsaDecrypt)?
            .rsa_oaep_decrypt(data, private_key, algorithm)
            .await
    }

    /// Generate an RSA key pair `(SPKI public, PKCS#8 private)`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyGeneration` unless `bits` is 1024, 2048 or 4096.
    pub async fn rsa_generate_key_pair(&self, bits: usize) -> Result<RsaKeyPair, CryptoError> {
        self.native_for(Operation::RsaGenerateKeyPair)?
            .rsa_generate_key_pair(bits)
            .await
    }

    /// DER SPKI public key of a DER PKCS#8 private key.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::KeyImport` for an undecodable key.
    pub async fn rsa_extract_public_key(&self, private_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.native_for(Operation::RsaExtractPublicKey)?
            .rsa_extract_public_key(private_key)
            .await
    }

    /// Timing-safe equality of `a` and `b`.
    ///
    /// Both values are MAC'd under a fresh random key and the tags are
    /// compared by the native constant-time verifier.
    ///
    /// # Errors
    ///
    /// Propagates RNG or backend failures.
    pub async fn compare(&self, a: &[u8], b: &[u8]) -> Result<bool, CryptoError> {
        let native = self.native_for(Operation::Compare)?;
        let key = Zeroizing::new(native.random_bytes(COMPARE_KEY_LEN).await?);
        let tag = native.hmac(a, &key, HashAlgorithm::Sha256).await?;
        native
            .hmac_verify(b, &key, HashAlgorithm::Sha256, &tag)
            .await
    }

    /// `length` bytes from the native CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Random` if the system RNG fails.
    pub async fn random_bytes(&self, length: usize) -> Result<Vec<u8>, CryptoError> {
        self.native_for(Operation::RandomBytes)?
            .random_bytes(length)
            .await
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
