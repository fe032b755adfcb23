//! Default native provider.
//!
//! `ring` supplies digests, HMAC, PBKDF2 and the system CSPRNG; `aes`
//! (hardware AES-NI / ARMv8 when available) with `cbc` supplies AES-CBC;
//! `rsa` supplies RSA-OAEP. Work runs on the tokio blocking pool, so every
//! call yields to the runtime until the primitive completes. Outside a tokio
//! runtime every call except `random_bytes` fails with
//! `CryptoError::Backend`.

use std::num::NonZeroU32;

use aes::{Aes128, Aes192, Aes256};
use async_trait::async_trait;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, hmac, pbkdf2};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};
use rsa::{Oaep, RsaPrivateKey};
use zeroize::Zeroizing;

use super::key::{
    import_key, AlgorithmDescriptor, AlgorithmName, CryptoKey, KeyFormat, KeyMaterial, KeyUsage,
    AES_BLOCK_LEN,
};
use super::{NativeProvider, RsaKeyPair};
use crate::algorithm::HashAlgorithm;
use crate::error::CryptoError;

/// RSA modulus lengths accepted by key generation.
pub const RSA_MODULUS_BITS: [usize; 3] = [1024, 2048, 4096];

/// Native provider backed by `ring`, `aes`/`cbc` and `rsa`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlatformCrypto;

impl PlatformCrypto {
    /// Create the provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NativeProvider for PlatformCrypto {
    async fn pbkdf2(
        &self,
        password: &[u8],
        salt: &[u8],
        algorithm: HashAlgorithm,
        iterations: u32,
    ) -> Result<Vec<u8>, CryptoError> {
        let iterations = NonZeroU32::new(iterations).ok_or_else(|| {
            CryptoError::KeyDerivation("iterations must be greater than zero".into())
        })?;
        let password = Zeroizing::new(password.to_vec());
        let salt = salt.to_vec();
        offload(move || {
            let key = import_key(
                KeyFormat::Raw,
                &password,
                AlgorithmDescriptor::pbkdf2(algorithm),
                KeyUsage::DeriveBits,
            )?;
            derive_bits(&key, &salt, iterations, algorithm.output_len())
        })
        .await
    }

    async fn digest(&self, data: &[u8], algorithm: HashAlgorithm) -> Result<Vec<u8>, CryptoError> {
        let data = data.to_vec();
        offload(move || Ok(digest::digest(ring_digest_algorithm(algorithm), &data).as_ref().to_vec()))
            .await
    }

    async fn hmac(
        &self,
        data: &[u8],
        key: &[u8],
        algorithm: HashAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        let data = data.to_vec();
        let key = Zeroizing::new(key.to_vec());
        offload(move || {
            let key = import_key(
                KeyFormat::Raw,
                &key,
                AlgorithmDescriptor::hmac(algorithm),
                KeyUsage::Sign,
            )?;
            let ring_key = hmac_key(&key, KeyUsage::Sign)?;
            Ok(hmac::sign(ring_key, &data).as_ref().to_vec())
        })
        .await
    }

    async fn hmac_verify(
        &self,
        data: &[u8],
        key: &[u8],
        algorithm: HashAlgorithm,
        tag: &[u8],
    ) -> Result<bool, CryptoError> {
        let data = data.to_vec();
        let tag = tag.to_vec();
        let key = Zeroizing::new(key.to_vec());
        offload(move || {
            let key = import_key(
                KeyFormat::Raw,
                &key,
                AlgorithmDescriptor::hmac(algorithm),
                KeyUsage::Verify,
            )?;
            let ring_key = hmac_key(&key, KeyUsage::Verify)?;
            Ok(hmac::verify(ring_key, &data, &tag).is_ok())
        })
        .await
    }

    async fn aes_cbc_encrypt(
        &self,
        data: &[u8],
        iv: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        check_iv(iv)?;
        let data = data.to_vec();
        let iv = iv.to_vec();
        let key = Zeroizing::new(key.to_vec());
        offload(move || {
            let key = import_key(
                KeyFormat::Raw,
                &key,
                AlgorithmDescriptor::aes_cbc(),
                KeyUsage::Encrypt,
            )?;
            cbc_encrypt(&key, &iv, &data)
        })
        .await
    }

    async fn aes_cbc_decrypt(
        &self,
        data: &[u8],
        iv: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        check_iv(iv)?;
        let data = data.to_vec();
        let iv = iv.to_vec();
        let key = Zeroizing::new(key.to_vec());
        offload(move || {
            let key = import_key(
                KeyFormat::Raw,
                &key,
                AlgorithmDescriptor::aes_cbc(),
                KeyUsage::Decrypt,
            )?;
            cbc_decrypt(&key, &iv, &data)
        })
        .await
    }

    async fn rsa_oaep_encrypt(
        &self,
        data: &[u8],
        public_key_spki: &[u8],
        algorithm: HashAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        let data = data.to_vec();
        let spki = public_key_spki.to_vec();
        offload(move || {
            let key = import_key(
                KeyFormat::Spki,
                &spki,
                AlgorithmDescriptor::rsa_oaep(algorithm),
                KeyUsage::Encrypt,
            )?;
            let KeyMaterial::RsaPublic(public) =
                key.material(AlgorithmName::RsaOaep, KeyUsage::Encrypt)?
            else {
                return Err(material_mismatch());
            };
            public
                .encrypt(&mut OsRng, oaep(algorithm), &data)
                .map_err(|e| CryptoError::Encryption(format!("RSA-OAEP encryption failed: {e}")))
        })
        .await
    }

    async fn rsa_oaep_decrypt(
        &self,
        data: &[u8],
        private_key_pkcs8: &[u8],
        algorithm: HashAlgorithm,
    ) -> Result<Vec<u8>, CryptoError> {
        let data = data.to_vec();
        let pkcs8 = Zeroizing::new(private_key_pkcs8.to_vec());
        offload(move || {
            let key = import_key(
                KeyFormat::Pkcs8,
                &pkcs8,
                AlgorithmDescriptor::rsa_oaep(algorithm),
                KeyUsage::Decrypt,
            )?;
            let KeyMaterial::RsaPrivate(private) =
                key.material(AlgorithmName::RsaOaep, KeyUsage::Decrypt)?
            else {
                return Err(material_mismatch());
            };
            private
                .decrypt(oaep(algorithm), &data)
                .map_err(|_| CryptoError::Decryption)
        })
        .await
    }

    async fn rsa_generate_key_pair(&self, bits: usize) -> Result<RsaKeyPair, CryptoError> {
        if !RSA_MODULUS_BITS.contains(&bits) {
            return Err(CryptoError::KeyGeneration(format!(
                "unsupported RSA modulus length: {bits} bits (expected 1024, 2048 or 4096)"
            )));
        }
        offload(move || {
            let private = RsaPrivateKey::new(&mut OsRng, bits)
                .map_err(|e| CryptoError::KeyGeneration(format!("RSA generation failed: {e}")))?;
            let public_der = private
                .to_public_key()
                .to_public_key_der()
                .map_err(|e| CryptoError::KeyGeneration(format!("SPKI encoding failed: {e}")))?
                .into_vec();
            let private_der = private
                .to_pkcs8_der()
                .map_err(|e| CryptoError::KeyGeneration(format!("PKCS#8 encoding failed: {e}")))?
                .as_bytes()
                .to_vec();
            Ok((public_der, private_der))
        })
        .await
    }

    async fn rsa_extract_public_key(
        &self,
        private_key_pkcs8: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let pkcs8 = Zeroizing::new(private_key_pkcs8.to_vec());
        offload(move || {
            let key = import_key(
                KeyFormat::Pkcs8,
                &pkcs8,
                AlgorithmDescriptor::rsa_oaep(HashAlgorithm::Sha1),
                KeyUsage::Decrypt,
            )?;
            key.public_spki()
        })
        .await
    }

    async fn random_bytes(&self, length: usize) -> Result<Vec<u8>, CryptoError> {
        let mut bytes = vec![0u8; length];
        if length == 0 {
            return Ok(bytes);
        }
        SystemRandom::new()
            .fill(&mut bytes)
            .map_err(|_| CryptoError::Random("system CSPRNG unavailable".into()))?;
        Ok(bytes)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `task` on the blocking pool of the current runtime and wait for it.
///
/// Fails with `CryptoError::Backend` when polled outside a tokio runtime.
async fn offload<T, F>(task: F) -> Result<T, CryptoError>
where
    F: FnOnce() -> Result<T, CryptoError> + Send + 'static,
    T: Send + 'static,
{
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|_| CryptoError::Backend("no tokio runtime".into()))?;
    runtime
        .spawn_blocking(task)
        .await
        .map_err(|e| CryptoError::Backend(e.to_string()))?
}

fn material_mismatch() -> CryptoError {
    CryptoError::KeyImport("key material does not match its descriptor".into())
}

fn check_iv(iv: &[u8]) -> Result<(), CryptoError> {
    if iv.len() == AES_BLOCK_LEN {
        Ok(())
    } else {
        Err(CryptoError::KeyImport(format!(
            "invalid IV length: {} bytes (expected {AES_BLOCK_LEN})",
            iv.len()
        )))
    }
}

fn ring_digest_algorithm(algorithm: HashAlgorithm) -> &'static digest::Algorithm {
    match algorithm {
        HashAlgorithm::Sha1 => &digest::SHA1_FOR_LEGACY_USE_ONLY,
        HashAlgorithm::Sha256 => &digest::SHA256,
        HashAlgorithm::Sha512 => &digest::SHA512,
    }
}

fn ring_pbkdf2_algorithm(algorithm: HashAlgorithm) -> pbkdf2::Algorithm {
    match algorithm {
        HashAlgorithm::Sha1 => pbkdf2::PBKDF2_HMAC_SHA1,
        HashAlgorithm::Sha256 => pbkdf2::PBKDF2_HMAC_SHA256,
        HashAlgorithm::Sha512 => pbkdf2::PBKDF2_HMAC_SHA512,
    }
}

fn oaep(algorithm: HashAlgorithm) -> Oaep {
    match algorithm {
        HashAlgorithm::Sha1 => Oaep::new::<sha1::Sha1>(),
        HashAlgorithm::Sha256 => Oaep::new::<sha2::Sha256>(),
        HashAlgorithm::Sha512 => Oaep::new::<sha2::Sha512>(),
    }
}

fn hmac_key(key: &CryptoKey, usage: KeyUsage) -> Result<&hmac::Key, CryptoError> {
    match key.material(AlgorithmName::Hmac, usage)? {
        KeyMaterial::Hmac(ring_key) => Ok(ring_key),
        _ => Err(material_mismatch()),
    }
}

fn derive_bits(
    key: &CryptoKey,
    salt: &[u8],
    iterations: NonZeroU32,
    length: usize,
) -> Result<Vec<u8>, CryptoError> {
    let KeyMaterial::Pbkdf2(secret) = key.material(AlgorithmName::Pbkdf2, KeyUsage::DeriveBits)?
    else {
        return Err(material_mismatch());
    };
    let hash = key.descriptor().hash.ok_or_else(material_mismatch)?;
    let mut out = vec![0u8; length];
    pbkdf2::derive(ring_pbkdf2_algorithm(hash), iterations, salt, secret, &mut out);
    Ok(out)
}

fn cbc_encrypt(key: &CryptoKey, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let KeyMaterial::Aes(raw) = key.material(AlgorithmName::AesCbc, KeyUsage::Encrypt)? else {
        return Err(material_mismatch());
    };
    let ciphertext = match raw.len() {
        16 => cbc::Encryptor::<Aes128>::new_from_slices(raw, iv)
            .map(|enc| enc.encrypt_padded_vec_mut::<Pkcs7>(data)),
        24 => cbc::Encryptor::<Aes192>::new_from_slices(raw, iv)
            .map(|enc| enc.encrypt_padded_vec_mut::<Pkcs7>(data)),
        _ => cbc::Encryptor::<Aes256>::new_from_slices(raw, iv)
            .map(|enc| enc.encrypt_padded_vec_mut::<Pkcs7>(data)),
    };
    ciphertext.map_err(|e| CryptoError::KeyImport(format!("AES-CBC setup failed: {e}")))
}

fn cbc_decrypt(key: &CryptoKey, iv: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let KeyMaterial::Aes(raw) = key.material(AlgorithmName::AesCbc, KeyUsage::Decrypt)? else {
        return Err(material_mismatch());
    };
    let plaintext = match raw.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(raw, iv)
            .map(|dec| dec.decrypt_padded_vec_mut::<Pkcs7>(data)),
        24 => cbc::Decryptor::<Aes192>::new_from_slices(raw, iv)
            .map(|dec| dec.decrypt_padded_vec_mut::<Pkcs7>(data)),
        _ => cbc::Decryptor::<Aes256>::new_from_slices(raw, iv)
            .map(|dec| dec.decrypt_padded_vec_mut::<Pkcs7>(data)),
    };
    plaintext
        .map_err(|e| CryptoError::KeyImport(format!("AES-CBC setup failed: {e}")))?
        .map_err(|_| CryptoError::Decryption)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
