use data_encoding::HEXLOWER;
use dualcrypt_core::{CryptoFunctions, NativeCapability};

mod aes_cbc;
mod pbkdf2_hmac;
mod sha;

/// One facade per backend: `[native, software]`.
fn both_backends() -> [CryptoFunctions; 2] {
    [
        CryptoFunctions::new(NativeCapability::TRUSTED),
        CryptoFunctions::new(NativeCapability::UNTRUSTED),
    ]
}

fn hex(s: &str) -> Vec<u8> {
    HEXLOWER.decode(s.as_bytes()).expect("fixture should be valid hex")
}
