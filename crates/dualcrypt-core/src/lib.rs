//! `dualcrypt-core`: crypto function facade for a password-manager client.
//!
//! Routes PBKDF2, hashing, HMAC, AES-CBC, RSA-OAEP and random generation to
//! either a native (asynchronous, hardware-capable) or a software
//! (synchronous, pure-Rust) backend. Hash/HMAC/PBKDF2 follow the detected
//! platform capability; AES, RSA and RNG are pinned per operation.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod algorithm;
pub mod bytes;

pub mod capability;
pub mod config;
pub mod policy;

pub mod native;
pub mod software;

pub mod functions;

pub use algorithm::HashAlgorithm;
pub use bytes::{from_byte_string, to_buffer, to_byte_string, ByteString, Input};
pub use capability::{detect, init_process_capability, native_backend_trusted, NativeCapability};
pub use config::CryptoConfig;
pub use error::CryptoError;
pub use functions::CryptoFunctions;
pub use native::{NativeProvider, PlatformCrypto, RsaKeyPair};
pub use policy::{fixed_backend, route, select_by_capability, Backend, Operation, SizePolicy};
pub use software::{PureCrypto, SoftwareProvider};
