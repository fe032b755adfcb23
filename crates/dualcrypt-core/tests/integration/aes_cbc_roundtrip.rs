//! Integration tests for AES-CBC encrypt→decrypt at realistic payload sizes.
//!
//! Encryption is always native; each payload is decrypted on the small
//! (software) path and the large (native) path.

use dualcrypt_core::{CryptoError, CryptoFunctions, NativeCapability};

const INT_KEY: [u8; 32] = [0xDD; 32];
const INT_IV: [u8; 16] = [0x3C; 16];

async fn roundtrip(len: usize, fill: u8) {
    let crypto = CryptoFunctions::new(NativeCapability::TRUSTED);
    let plaintext = vec![fill; len];
    let ct = crypto
        .aes_encrypt(&plaintext, &INT_IV, &INT_KEY)
        .await
        .expect("encrypt should succeed");
    assert_eq!(ct.len(), (len / 16 + 1) * 16);

    let small = crypto
        .aes_decrypt_small(&ct, &INT_IV, &INT_KEY)
        .await
        .expect("small decrypt should succeed");
    let large = crypto
        .aes_decrypt_large(&ct, &INT_IV, &INT_KEY)
        .await
        .expect("large decrypt should succeed");
    assert_eq!(small, plaintext);
    assert_eq!(large, plaintext);
}

#[tokio::test]
async fn roundtrip_empty_payload() {
    roundtrip(0, 0x00).await;
}

#[tokio::test]
async fn roundtrip_1kb_payload() {
    roundtrip(1024, 0x42).await;
}

#[tokio::test]
async fn roundtrip_64kb_payload() {
    roundtrip(65_536, 0x55).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn roundtrip_1mb_payload() {
    roundtrip(1_048_576, 0x77).await;
}

#[tokio::test]
async fn aes128_and_aes192_keys() {
    let crypto = CryptoFunctions::new(NativeCapability::TRUSTED);
    for key in [&[0x01u8; 16][..], &[0x02u8; 24][..]] {
        let ct = crypto.aes_encrypt(b"payload", &INT_IV, key).await.unwrap();
        let small = crypto.aes_decrypt_small(&ct, &INT_IV, key).await.unwrap();
        let large = crypto.aes_decrypt_large(&ct, &INT_IV, key).await.unwrap();
        assert_eq!(small, b"payload");
        assert_eq!(large, b"payload");
    }
}

#[tokio::test]
async fn tampered_padding_is_rejected_on_both_paths() {
    let crypto = CryptoFunctions::new(NativeCapability::TRUSTED);
    // 16 bytes of plaintext produce one full block of padding (0x10 * 16).
    let mut ct = crypto
        .aes_encrypt(&[0xAB; 16], &INT_IV, &INT_KEY)
        .await
        .unwrap();
    // Flipping a bit in the penultimate block flips the same bit of the
    // final plaintext block, breaking the padding.
    let last = ct.len() - 17;
    ct[last] ^= 0x01;

    let small = crypto.aes_decrypt_small(&ct, &INT_IV, &INT_KEY).await;
    let large = crypto.aes_decrypt_large(&ct, &INT_IV, &INT_KEY).await;
    assert!(matches!(small, Err(CryptoError::Decryption)));
    assert!(matches!(large, Err(CryptoError::Decryption)));
}

#[tokio::test]
async fn bad_iv_length_is_rejected() {
    let crypto = CryptoFunctions::new(NativeCapability::TRUSTED);
    let result = crypto.aes_encrypt(b"payload", &[0u8; 12], &INT_KEY).await;
    assert!(matches!(result, Err(CryptoError::KeyImport(_))));
    let result = crypto
        .aes_decrypt_small(&[0u8; 16], &[0u8; 12], &INT_KEY)
        .await;
    assert!(matches!(result, Err(CryptoError::KeyImport(_))));
}
