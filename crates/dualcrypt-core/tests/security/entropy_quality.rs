//! Entropy quality tests for `random_bytes`.
//!
//! Shannon entropy of uniform random bytes approaches 8.0 bits/byte as the
//! sample grows. Thresholds are set below the p=0.01 minimum for each
//! sample size so they catch degenerate output (all zeros, short cycles)
//! without flaking on natural variance.
//!
//! | Sample size | Expected entropy | Our threshold |
//! |-------------|------------------|---------------|
//! | 32 bytes    | ~4.88            | 4.0           |
//! | 1 KB        | ~7.81            | 7.5           |
//! | 64 KB       | ~7.997           | 7.99          |

use dualcrypt_core::{CryptoFunctions, NativeCapability};

/// Shannon entropy of a byte slice (bits per byte).
#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] = freq[b as usize].saturating_add(1);
    }
    let len = data.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / len;
            -p * p.log2()
        })
        .sum()
}

fn crypto() -> CryptoFunctions {
    CryptoFunctions::new(NativeCapability::TRUSTED)
}

#[tokio::test]
async fn random_32_bytes_entropy() {
    let bytes = crypto().random_bytes(32).await.expect("CSPRNG should succeed");
    let entropy = shannon_entropy(&bytes);
    assert!(entropy > 4.0, "random_bytes(32) entropy too low: {entropy:.4}");
}

#[tokio::test]
async fn random_1kb_entropy() {
    let bytes = crypto().random_bytes(1024).await.expect("CSPRNG should succeed");
    let entropy = shannon_entropy(&bytes);
    assert!(entropy > 7.5, "random_bytes(1024) entropy too low: {entropy:.4}");
}

#[tokio::test]
async fn random_64kb_entropy() {
    let bytes = crypto().random_bytes(65_536).await.expect("CSPRNG should succeed");
    let entropy = shannon_entropy(&bytes);
    assert!(entropy > 7.99, "random_bytes(65536) entropy too low: {entropy:.4}");
}

/// Successive draws differ; checked on the concatenation so the assertion
/// stays statistical rather than an equality test on two samples.
#[tokio::test]
async fn successive_draws_are_independent() {
    let crypto = crypto();
    let a = crypto.random_bytes(512).await.expect("CSPRNG should succeed");
    let b = crypto.random_bytes(512).await.expect("CSPRNG should succeed");
    let mut joined = a.clone();
    joined.extend_from_slice(&b);
    let entropy = shannon_entropy(&joined);
    assert!(entropy > 7.5, "two 512-byte draws entropy too low: {entropy:.4}");
    let matching = a.iter().zip(&b).filter(|(x, y)| x == y).count();
    // Expected ~2 matching positions out of 512.
    assert!(matching < 32, "draws share {matching} positions");
}

#[test]
fn shannon_entropy_of_constant_is_zero() {
    assert!(shannon_entropy(&[0x42; 1024]).abs() < f64::EPSILON);
}
