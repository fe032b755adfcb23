//! Default software provider built on the RustCrypto crates.

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

use super::SoftwareProvider;
use crate::algorithm::HashAlgorithm;
use crate::bytes::{from_byte_string, ByteString};
use crate::error::CryptoError;

/// AES-CBC IV length in bytes.
const IV_LEN: usize = 16;

/// Software provider backed by `sha1`, `sha2`, `hmac`, `pbkdf2`, `aes`, `cbc`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PureCrypto;

impl PureCrypto {
    /// Create the provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SoftwareProvider for PureCrypto {
    fn pbkdf2(
        &self,
        password: &ByteString,
        salt: &ByteString,
        algorithm: HashAlgorithm,
        iterations: u32,
    ) -> Result<ByteString, CryptoError> {
        if iterations == 0 {
            return Err(CryptoError::KeyDerivation(
                "iterations must be greater than zero".into(),
            ));
        }
        let password = Zeroizing::new(from_byte_string(password));
        let salt = from_byte_string(salt);
        let mut out = Zeroizing::new(vec![0u8; algorithm.output_len()]);
        match algorithm {
            HashAlgorithm::Sha1 => {
                pbkdf2::pbkdf2_hmac::<Sha1>(&password, &salt, iterations, &mut out);
            }
            HashAlgorithm::Sha256 => {
                pbkdf2::pbkdf2_hmac::<Sha256>(&password, &salt, iterations, &mut out);
            }
            HashAlgorithm::Sha512 => {
                pbkdf2::pbkdf2_hmac::<Sha512>(&password, &salt, iterations, &mut out);
            }
        }
        Ok(ByteString::from(out.as_slice()))
    }

    fn digest(
        &self,
        data: &ByteString,
        algorithm: HashAlgorithm,
    ) -> Result<ByteString, CryptoError> {
        let data = from_byte_string(data);
        let out = match algorithm {
            HashAlgorithm::Sha1 => Sha1::digest(&data).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(&data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(&data).to_vec(),
        };
        Ok(ByteString::from(out.as_slice()))
    }

    fn hmac(
        &self,
        data: &ByteString,
        key: &ByteString,
        algorithm: HashAlgorithm,
    ) -> Result<ByteString, CryptoError> {
        let data = from_byte_string(data);
        let key = Zeroizing::new(from_byte_string(key));
        let tag = match algorithm {
            HashAlgorithm::Sha1 => mac::<Hmac<Sha1>>(&key, &data)?,
            HashAlgorithm::Sha256 => mac::<Hmac<Sha256>>(&key, &data)?,
            HashAlgorithm::Sha512 => mac::<Hmac<Sha512>>(&key, &data)?,
        };
        Ok(ByteString::from(tag.as_slice()))
    }

    fn aes_cbc_decrypt(
        &self,
        data: &ByteString,
        iv: &ByteString,
        key: &ByteString,
    ) -> Result<ByteString, CryptoError> {
        let key = Zeroizing::new(from_byte_string(key));
        let iv = from_byte_string(iv);
        if iv.len() != IV_LEN {
            return Err(CryptoError::KeyImport(format!(
                "invalid IV length: {} bytes (expected {IV_LEN})",
                iv.len()
            )));
        }
        let mut buf = Zeroizing::new(from_byte_string(data));
        let plaintext_len = match key.len() {
            16 => decipher::<cbc::Decryptor<Aes128>>(&key, &iv, &mut buf)?,
            24 => decipher::<cbc::Decryptor<Aes192>>(&key, &iv, &mut buf)?,
            32 => decipher::<cbc::Decryptor<Aes256>>(&key, &iv, &mut buf)?,
            other => {
                return Err(CryptoError::KeyImport(format!(
                    "invalid AES key length: {other} bytes (expected 16, 24 or 32)"
                )))
            }
        };
        Ok(ByteString::from(&buf[..plaintext_len]))
    }
}

/// Fresh MAC context, one update, finalize.
fn mac<M: Mac + hmac::digest::KeyInit>(key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut ctx = <M as Mac>::new_from_slice(key)
        .map_err(|e| CryptoError::KeyImport(format!("invalid HMAC key: {e}")))?;
    ctx.update(data);
    Ok(ctx.finalize().into_bytes().to_vec())
}

/// Fresh decipher context, whole ciphertext in place, padding checked.
/// Returns the plaintext length within `buf`.
fn decipher<D: KeyIvInit + BlockDecryptMut>(
    key: &[u8],
    iv: &[u8],
    buf: &mut [u8],
) -> Result<usize, CryptoError> {
    let ctx = D::new_from_slices(key, iv)
        .map_err(|e| CryptoError::KeyImport(format!("AES-CBC setup failed: {e}")))?;
    ctx.decrypt_padded_mut::<Pkcs7>(buf)
        .map(<[u8]>::len)
        .map_err(|_| CryptoError::Decryption)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
