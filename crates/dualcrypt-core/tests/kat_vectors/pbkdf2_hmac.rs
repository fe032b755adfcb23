//! PBKDF2-HMAC-SHA256 / SHA512 with P = "password", S = "salt".
//!
//! dkLen equals the hash output length (32 / 64 bytes).

use dualcrypt_core::HashAlgorithm;

use super::{both_backends, hex};

const SHA256_C1: &str = "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b";
const SHA256_C2: &str = "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43";
const SHA256_C4096: &str = "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a";
const SHA512_C1: &str = "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252\
                         c02d470a285a0501bad999bfe943c08f050235d7d68b1da55e63f73b60a57fce";

#[tokio::test]
async fn sha256_vectors() {
    let cases = [(1, SHA256_C1), (2, SHA256_C2), (4096, SHA256_C4096)];
    for crypto in both_backends() {
        for (iterations, expected) in cases {
            let key = crypto
                .pbkdf2("password", "salt", HashAlgorithm::Sha256, iterations)
                .await
                .expect("pbkdf2 should succeed");
            assert_eq!(key, hex(expected), "c = {iterations}");
        }
    }
}

#[tokio::test]
async fn sha512_vector() {
    for crypto in both_backends() {
        let key = crypto
            .pbkdf2("password", "salt", HashAlgorithm::Sha512, 1)
            .await
            .expect("pbkdf2 should succeed");
        assert_eq!(key, hex(SHA512_C1));
    }
}

/// Text and its UTF-8 bytes derive the same key.
#[tokio::test]
async fn text_password_equals_utf8_bytes() {
    for crypto in both_backends() {
        let from_text = crypto
            .pbkdf2("pässwörd", "salt", HashAlgorithm::Sha256, 2)
            .await
            .expect("pbkdf2 should succeed");
        let from_bytes = crypto
            .pbkdf2("pässwörd".as_bytes(), b"salt", HashAlgorithm::Sha256, 2)
            .await
            .expect("pbkdf2 should succeed");
        assert_eq!(from_text, from_bytes);
    }
}
