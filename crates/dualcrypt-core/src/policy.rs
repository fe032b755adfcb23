//! Backend selection policies.
//!
//! Two independent policies decide which backend runs an operation:
//!
//! - **Capability policy** ([`select_by_capability`]): PBKDF2, hash and HMAC
//!   run natively unless the native backend is untrusted on this platform.
//! - **Fixed policy** ([`fixed_backend`]): AES, RSA and random generation are
//!   pinned per operation. Small AES-CBC decryption is pinned to the software
//!   backend to skip the native per-call overhead; large decryption is pinned
//!   to native for throughput. The small-decrypt pin is tunable through
//!   [`SizePolicy`] and never consults the capability.

use serde::{Deserialize, Serialize};

use crate::capability::NativeCapability;

/// Which provider executes an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Asynchronous, platform-provided implementation.
    Native,
    /// Synchronous, pure-software implementation over byte strings.
    Software,
}

/// Every facade operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// PBKDF2 key derivation.
    Pbkdf2,
    /// Message digest.
    Hash,
    /// HMAC tag.
    Hmac,
    /// AES-CBC encryption.
    AesEncrypt,
    /// AES-CBC decryption of a small payload.
    AesDecryptSmall,
    /// AES-CBC decryption of a large payload.
    AesDecryptLarge,
    /// RSA-OAEP encryption.
    RsaEncrypt,
    /// RSA-OAEP decryption.
    RsaDecrypt,
    /// RSA key pair generation.
    RsaGenerateKeyPair,
    /// SPKI public key from a PKCS#8 private key.
    RsaExtractPublicKey,
    /// Timing-safe equality.
    Compare,
    /// CSPRNG output.
    RandomBytes,
}

impl Operation {
    /// Returns `true` if the backend follows the capability policy.
    #[must_use]
    pub const fn is_capability_selected(self) -> bool {
        matches!(self, Self::Pbkdf2 | Self::Hash | Self::Hmac)
    }
}

/// Size-based pinning for AES-CBC decryption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePolicy {
    /// Backend for `aes_decrypt_small`.
    pub small_decrypt: Backend,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            small_decrypt: Backend::Software,
        }
    }
}

/// Capability policy: software iff the native backend is untrusted.
#[must_use]
pub const fn select_by_capability(capability: NativeCapability) -> Backend {
    if capability.is_trusted() {
        Backend::Native
    } else {
        Backend::Software
    }
}

/// Fixed policy: the pinned backend, or `None` for capability-selected
/// operations.
#[must_use]
pub const fn fixed_backend(operation: Operation, sizes: &SizePolicy) -> Option<Backend> {
    match operation {
        Operation::Pbkdf2 | Operation::Hash | Operation::Hmac => None,
        Operation::AesDecryptSmall => Some(sizes.small_decrypt),
        Operation::AesEncrypt
        | Operation::AesDecryptLarge
        | Operation::RsaEncrypt
        | Operation::RsaDecrypt
        | Operation::RsaGenerateKeyPair
        | Operation::RsaExtractPublicKey
        | Operation::Compare
        | Operation::RandomBytes => Some(Backend::Native),
    }
}

/// Resolve the backend for `operation`.
#[must_use]
pub fn route(operation: Operation, capability: NativeCapability, sizes: &SizePolicy) -> Backend {
    let backend =
        fixed_backend(operation, sizes).unwrap_or_else(|| select_by_capability(capability));
    tracing::trace!(?operation, ?backend, "Routing crypto operation");
    backend
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
