//! Statistical constant-time tests for `modinv62`.
//!
//! These use the `dudect_bencher` crate to compare the timing distribution
//! of the constant-time inversion across two input classes: a fixed small
//! value and uniformly random field elements. A detectable difference means
//! the constant-time property does not hold on this target.

use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use modinv62::{modinv, ModInfo, Signed62};
use rand::Rng;

/// The secp256k1 field prime, 2^256 - 2^32 - 977.
const P: ModInfo = ModInfo::new(Signed62::from_be_hex(
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
));

/// Random value below 2^248, comfortably below the modulus.
fn random_reduced(rng: &mut BenchRng) -> Signed62 {
    let mut words = [0u64; 4];
    for word in &mut words {
        *word = rng.gen();
    }
    words[3] &= u64::MAX >> 8;
    Signed62::from_words(words)
}

/// Check `modinv` for constant-time operation in its input.
fn modinv_ct(runner: &mut CtRunner, rng: &mut BenchRng) {
    const ITERATIONS_OUTER: usize = 10_000;
    const ITERATIONS_INNER: usize = 10;

    // Precomputing the inputs appears to eliminate some noise
    let mut inputs = vec![];

    for _ in 0..ITERATIONS_OUTER {
        inputs.push((Class::Left, Signed62::ONE));
    }

    for _ in 0..ITERATIONS_OUTER {
        inputs.push((Class::Right, random_reduced(rng)));
    }

    for (class, input) in inputs {
        runner.run_one(class, || {
            for _ in 0..ITERATIONS_INNER {
                modinv(&input, &P);
            }
        })
    }
}

ctbench_main!(modinv_ct);
