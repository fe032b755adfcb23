//! Per-call key import for the native backend.
//!
//! Raw key bytes never reach a primitive directly: they are first imported
//! into an opaque [`CryptoKey`] bound to an [`AlgorithmDescriptor`] and a
//! single [`KeyUsage`]. Handles are non-extractable and live for exactly one
//! operation; dropping one wipes any buffered key bytes.

use std::fmt;

use ring::hmac;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::algorithm::HashAlgorithm;
use crate::error::CryptoError;

/// AES block / IV length in bytes.
pub const AES_BLOCK_LEN: usize = 16;

/// Accepted raw AES key lengths (AES-128, AES-192, AES-256).
pub const AES_KEY_LENS: [usize; 3] = [16, 24, 32];

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// Native algorithm family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgorithmName {
    /// AES in CBC mode with PKCS#7 padding.
    AesCbc,
    /// HMAC over the descriptor's hash.
    Hmac,
    /// PBKDF2 with HMAC over the descriptor's hash.
    Pbkdf2,
    /// RSA-OAEP with the descriptor's hash for OAEP and MGF1.
    RsaOaep,
}

impl AlgorithmName {
    /// Canonical native name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AesCbc => "AES-CBC",
            Self::Hmac => "HMAC",
            Self::Pbkdf2 => "PBKDF2",
            Self::RsaOaep => "RSA-OAEP",
        }
    }
}

/// Algorithm descriptor: canonical name plus the nested hash, where the
/// family takes one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    /// Algorithm family.
    pub name: AlgorithmName,
    /// Nested hash algorithm (HMAC, PBKDF2, RSA-OAEP).
    pub hash: Option<HashAlgorithm>,
}

impl AlgorithmDescriptor {
    /// `{ name: "AES-CBC" }`
    #[must_use]
    pub const fn aes_cbc() -> Self {
        Self {
            name: AlgorithmName::AesCbc,
            hash: None,
        }
    }

    /// `{ name: "HMAC", hash: { name } }`
    #[must_use]
    pub const fn hmac(hash: HashAlgorithm) -> Self {
        Self {
            name: AlgorithmName::Hmac,
            hash: Some(hash),
        }
    }

    /// `{ name: "PBKDF2", hash: { name } }`
    #[must_use]
    pub const fn pbkdf2(hash: HashAlgorithm) -> Self {
        Self {
            name: AlgorithmName::Pbkdf2,
            hash: Some(hash),
        }
    }

    /// `{ name: "RSA-OAEP", hash: { name } }`
    #[must_use]
    pub const fn rsa_oaep(hash: HashAlgorithm) -> Self {
        Self {
            name: AlgorithmName::RsaOaep,
            hash: Some(hash),
        }
    }

    /// Nested hash, or a key-import error naming the family.
    fn required_hash(&self) -> Result<HashAlgorithm, CryptoError> {
        self.hash.ok_or_else(|| {
            CryptoError::KeyImport(format!("{} descriptor requires a hash", self.name.as_str()))
        })
    }
}

/// Encoding of the key material handed to [`import_key`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyFormat {
    /// Raw bytes (AES, HMAC, PBKDF2 password).
    Raw,
    /// DER `SubjectPublicKeyInfo` (RSA public key).
    Spki,
    /// DER PKCS#8 `PrivateKeyInfo` (RSA private key).
    Pkcs8,
}

/// The single operation an imported key may serve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyUsage {
    /// AES-CBC or RSA-OAEP encryption.
    Encrypt,
    /// AES-CBC or RSA-OAEP decryption.
    Decrypt,
    /// HMAC tag computation.
    Sign,
    /// Constant-time HMAC tag check.
    Verify,
    /// PBKDF2 derivation.
    DeriveBits,
}

// ---------------------------------------------------------------------------
// CryptoKey
// ---------------------------------------------------------------------------

pub(crate) enum KeyMaterial {
    Aes(Zeroizing<Vec<u8>>),
    Hmac(hmac::Key),
    Pbkdf2(Zeroizing<Vec<u8>>),
    RsaPublic(RsaPublicKey),
    RsaPrivate(RsaPrivateKey),
}

/// Opaque, non-extractable key handle scoped to one operation.
pub struct CryptoKey {
    descriptor: AlgorithmDescriptor,
    usage: KeyUsage,
    material: KeyMaterial,
}

impl CryptoKey {
    /// Descriptor the key was imported under.
    #[must_use]
    pub const fn descriptor(&self) -> AlgorithmDescriptor {
        self.descriptor
    }

    /// Usage the key was imported for.
    #[must_use]
    pub const fn usage(&self) -> KeyUsage {
        self.usage
    }

    /// Borrow the material for `usage` under `name`.
    pub(crate) fn material(
        &self,
        name: AlgorithmName,
        usage: KeyUsage,
    ) -> Result<&KeyMaterial, CryptoError> {
        if self.descriptor.name != name || self.usage != usage {
            return Err(CryptoError::KeyImport(format!(
                "{} key imported for {:?} cannot serve {} {usage:?}",
                self.descriptor.name.as_str(),
                self.usage,
                name.as_str(),
            )));
        }
        Ok(&self.material)
    }

    /// DER SPKI of the public half of an RSA key.
    pub(crate) fn public_spki(&self) -> Result<Vec<u8>, CryptoError> {
        let public = match &self.material {
            KeyMaterial::RsaPublic(public) => public.clone(),
            KeyMaterial::RsaPrivate(private) => RsaPublicKey::from(private),
            _ => {
                return Err(CryptoError::KeyImport(format!(
                    "{} key has no public half",
                    self.descriptor.name.as_str()
                )))
            }
        };
        public
            .to_public_key_der()
            .map(|doc| doc.into_vec())
            .map_err(|e| CryptoError::KeyImport(format!("SPKI encoding failed: {e}")))
    }
}

impl fmt::Debug for CryptoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoKey")
            .field("algorithm", &self.descriptor.name.as_str())
            .field("hash", &self.descriptor.hash.map(HashAlgorithm::native_name))
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

/// Import key material into a per-call [`CryptoKey`].
///
/// # Errors
///
/// Returns `CryptoError::KeyImport` if the format does not fit the
/// algorithm, the AES key length is not 16/24/32 bytes, or a DER document
/// cannot be decoded.
pub fn import_key(
    format: KeyFormat,
    key_data: &[u8],
    descriptor: AlgorithmDescriptor,
    usage: KeyUsage,
) -> Result<CryptoKey, CryptoError> {
    let material = match (descriptor.name, format) {
        (AlgorithmName::AesCbc, KeyFormat::Raw) => {
            if !AES_KEY_LENS.contains(&key_data.len()) {
                return Err(CryptoError::KeyImport(format!(
                    "invalid AES key length: {} bytes (expected 16, 24 or 32)",
                    key_data.len()
                )));
            }
            KeyMaterial::Aes(Zeroizing::new(key_data.to_vec()))
        }
        (AlgorithmName::Hmac, KeyFormat::Raw) => {
            let hash = descriptor.required_hash()?;
            KeyMaterial::Hmac(hmac::Key::new(ring_hmac_algorithm(hash), key_data))
        }
        (AlgorithmName::Pbkdf2, KeyFormat::Raw) => {
            KeyMaterial::Pbkdf2(Zeroizing::new(key_data.to_vec()))
        }
        (AlgorithmName::RsaOaep, KeyFormat::Spki) => {
            descriptor.required_hash()?;
            let public = RsaPublicKey::from_public_key_der(key_data)
                .map_err(|e| CryptoError::KeyImport(format!("invalid SPKI public key: {e}")))?;
            KeyMaterial::RsaPublic(public)
        }
        (AlgorithmName::RsaOaep, KeyFormat::Pkcs8) => {
            descriptor.required_hash()?;
            let private = RsaPrivateKey::from_pkcs8_der(key_data)
                .map_err(|e| CryptoError::KeyImport(format!("invalid PKCS#8 private key: {e}")))?;
            KeyMaterial::RsaPrivate(private)
        }
        (name, format) => {
            return Err(CryptoError::KeyImport(format!(
                "{format:?} is not an import format for {}",
                name.as_str()
            )))
        }
    };

    Ok(CryptoKey {
        descriptor,
        usage,
        material,
    })
}

pub(crate) fn ring_hmac_algorithm(hash: HashAlgorithm) -> hmac::Algorithm {
    match hash {
        HashAlgorithm::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
        HashAlgorithm::Sha256 => hmac::HMAC_SHA256,
        HashAlgorithm::Sha512 => hmac::HMAC_SHA512,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
