//! Common functionality shared between tests.

// Different tests may use only a subset of the available functionality
#![allow(dead_code)]

use modinv62::Signed62;
use num_bigint::BigUint;

/// `Signed62` to `num_bigint::BigUint`. The value must be normalized.
pub fn to_biguint(x: &Signed62) -> BigUint {
    let mut bytes = Vec::with_capacity(32);
    for word in x.to_words() {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}

/// `num_bigint::BigUint` to `Signed62`. The value must fit in 256 bits.
pub fn from_biguint(x: &BigUint) -> Signed62 {
    let bytes = x.to_bytes_le();
    assert!(bytes.len() <= 32, "value does not fit in 256 bits");
    let mut words = [0u64; 4];
    for (i, byte) in bytes.iter().enumerate() {
        words[i / 8] |= u64::from(*byte) << (8 * (i % 8));
    }
    Signed62::from_words(words)
}

/// Builds a `Signed62` from 32 little-endian bytes.
pub fn from_le_bytes(bytes: &[u8; 32]) -> Signed62 {
    let mut words = [0u64; 4];
    for (i, chunk) in bytes.chunks_exact(8).enumerate() {
        words[i] = u64::from_le_bytes(chunk.try_into().expect("8-byte chunk"));
    }
    Signed62::from_words(words)
}
