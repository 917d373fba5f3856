#![no_main]
use libfuzzer_sys::fuzz_target;
use modinv62::{modinv, modinv_var, ModInfo, Signed62};

/// The secp256k1 field prime, 2^256 - 2^32 - 977.
const P: ModInfo = ModInfo::new(Signed62::from_be_hex(
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
));

fuzz_target!(|data: [u8; 32]| {
    let mut words = [0u64; 4];
    for (i, chunk) in data.chunks_exact(8).enumerate() {
        words[i] = u64::from_le_bytes(chunk.try_into().expect("8-byte chunk"));
    }
    // Keep the input below the modulus.
    words[3] &= u64::MAX >> 8;
    let x = Signed62::from_words(words);

    // Both variants must agree bit for bit.
    let inv = modinv(&x, &P);
    assert_eq!(inv, modinv_var(&x, &P));

    // Inversion is an involution on [0, p), including the zero fixed point.
    assert_eq!(modinv(&inv, &P), x);
});
