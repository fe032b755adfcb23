//! Facade configuration.

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;
use crate::policy::{Backend, SizePolicy};

/// Construction-time configuration for [`crate::CryptoFunctions`].
///
/// All fields are optional in JSON; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Platform identifier (user agent or short id) used for capability
    /// detection. Empty means "not a known-bad platform".
    pub platform: String,
    /// Backend for small-payload AES-CBC decryption.
    pub small_decrypt_backend: Backend,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            platform: String::new(),
            small_decrypt_backend: SizePolicy::default().small_decrypt,
        }
    }
}

impl CryptoConfig {
    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Config` on malformed JSON or unknown backend
    /// names.
    pub fn from_json(json: &str) -> Result<Self, CryptoError> {
        serde_json::from_str(json).map_err(|e| CryptoError::Config(e.to_string()))
    }

    /// Size policy described by this configuration.
    #[must_use]
    pub const fn size_policy(&self) -> SizePolicy {
        SizePolicy {
            small_decrypt: self.small_decrypt_backend,
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
