//! FIPS 180-4 digests of "" and "abc".

use dualcrypt_core::HashAlgorithm;

use super::{both_backends, hex};

const EMPTY_SHA1: &str = "da39a3ee5e6b4b0d3255bfef95601890afd80709";
const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const EMPTY_SHA512: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
                            47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";

const ABC_SHA1: &str = "a9993e364706816aba3e25717850c26c9cd0d89d";
const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
const ABC_SHA512: &str = "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
                          2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f";

#[tokio::test]
async fn empty_buffer_sha256_regression() {
    for crypto in both_backends() {
        let digest = crypto
            .hash(&[] as &[u8], HashAlgorithm::Sha256)
            .await
            .expect("hash should succeed");
        assert_eq!(digest, hex(EMPTY_SHA256));
    }
}

#[tokio::test]
async fn empty_input_all_algorithms() {
    let cases = [
        (HashAlgorithm::Sha1, EMPTY_SHA1),
        (HashAlgorithm::Sha256, EMPTY_SHA256),
        (HashAlgorithm::Sha512, EMPTY_SHA512),
    ];
    for crypto in both_backends() {
        for (algorithm, expected) in cases {
            let digest = crypto.hash("", algorithm).await.expect("hash should succeed");
            assert_eq!(digest, hex(expected), "{algorithm} of empty input");
        }
    }
}

#[tokio::test]
async fn abc_all_algorithms() {
    let cases = [
        (HashAlgorithm::Sha1, ABC_SHA1),
        (HashAlgorithm::Sha256, ABC_SHA256),
        (HashAlgorithm::Sha512, ABC_SHA512),
    ];
    for crypto in both_backends() {
        for (algorithm, expected) in cases {
            let digest = crypto.hash("abc", algorithm).await.expect("hash should succeed");
            assert_eq!(digest, hex(expected), "{algorithm} of \"abc\"");
        }
    }
}
