//! Integration tests for RSA-OAEP generate→encrypt→decrypt.
//!
//! 1024-bit keys keep generation fast; modulus size does not change the
//! code path.

use dualcrypt_core::{CryptoError, CryptoFunctions, HashAlgorithm, NativeCapability};

#[tokio::test(flavor = "multi_thread")]
async fn oaep_roundtrip_sha1_and_sha256() {
    let crypto = CryptoFunctions::new(NativeCapability::TRUSTED);
    let (public, private) = crypto
        .rsa_generate_key_pair(1024)
        .await
        .expect("keygen should succeed");

    for algorithm in [HashAlgorithm::Sha1, HashAlgorithm::Sha256] {
        let ct = crypto
            .rsa_encrypt(b"org share key", &public, algorithm)
            .await
            .expect("encrypt should succeed");
        assert_eq!(ct.len(), 128, "ciphertext is one modulus wide");
        let pt = crypto
            .rsa_decrypt(&ct, &private, algorithm)
            .await
            .expect("decrypt should succeed");
        assert_eq!(pt, b"org share key");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn oaep_encryption_is_randomized() {
    let crypto = CryptoFunctions::new(NativeCapability::TRUSTED);
    let (public, _) = crypto.rsa_generate_key_pair(1024).await.unwrap();
    let a = crypto.rsa_encrypt(b"m", &public, HashAlgorithm::Sha1).await.unwrap();
    let b = crypto.rsa_encrypt(b"m", &public, HashAlgorithm::Sha1).await.unwrap();
    assert_ne!(a, b);
}

#[tokio::test(flavor = "multi_thread")]
async fn mismatched_hash_fails_decryption() {
    let crypto = CryptoFunctions::new(NativeCapability::TRUSTED);
    let (public, private) = crypto.rsa_generate_key_pair(1024).await.unwrap();
    let ct = crypto
        .rsa_encrypt(b"m", &public, HashAlgorithm::Sha256)
        .await
        .unwrap();
    let result = crypto.rsa_decrypt(&ct, &private, HashAlgorithm::Sha1).await;
    assert!(matches!(result, Err(CryptoError::Decryption)));
}

#[tokio::test(flavor = "multi_thread")]
async fn extracted_public_key_matches_generated() {
    let crypto = CryptoFunctions::new(NativeCapability::UNTRUSTED);
    let (public, private) = crypto.rsa_generate_key_pair(1024).await.unwrap();
    let extracted = crypto
        .rsa_extract_public_key(&private)
        .await
        .expect("extract should succeed");
    assert_eq!(extracted, public);
}

#[tokio::test]
async fn sha512_is_rejected() {
    let crypto = CryptoFunctions::new(NativeCapability::TRUSTED);
    let result = crypto.rsa_encrypt(b"m", &[], HashAlgorithm::Sha512).await;
    assert!(matches!(
        result,
        Err(CryptoError::UnsupportedAlgorithm {
            operation: "rsa-oaep",
            ..
        })
    ));
}

#[tokio::test]
async fn garbage_keys_fail_import() {
    let crypto = CryptoFunctions::new(NativeCapability::TRUSTED);
    let result = crypto
        .rsa_encrypt(b"m", b"not a der key", HashAlgorithm::Sha1)
        .await;
    assert!(matches!(result, Err(CryptoError::KeyImport(_))));
    let result = crypto
        .rsa_decrypt(&[0u8; 128], b"not a der key", HashAlgorithm::Sha1)
        .await;
    assert!(matches!(result, Err(CryptoError::KeyImport(_))));
    let result = crypto.rsa_extract_public_key(b"not a der key").await;
    assert!(matches!(result, Err(CryptoError::KeyImport(_))));
}
