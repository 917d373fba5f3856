//! Modulus descriptor for the inversion routines.

use core::fmt;

use crate::{signed62::Signed62, M62};

/// Read-only description of an odd modulus `M` with `0 < M < 2^256`,
/// together with the multiplicative inverse of `M` modulo 2^62.
///
/// The precomputed inverse drives the Montgomery-style correction step of
/// the inversion: it is what makes the low 62 bits of the intermediate
/// linear combinations cancel so they can be shifted away exactly.
#[derive(Copy, Clone)]
pub struct ModInfo {
    /// The modulus, fully normalized.
    pub(crate) modulus: Signed62,

    /// `modulus^-1 mod 2^62`.
    pub(crate) modulus_inv62: u64,
}

impl ModInfo {
    /// Creates a descriptor for the given modulus, precomputing its inverse
    /// modulo 2^62.
    ///
    /// The modulus must be odd, fully normalized, and in `(0, 2^256)`;
    /// violations are caught by debug assertions only.
    pub const fn new(modulus: Signed62) -> Self {
        debug_assert!(modulus.v[0] & 1 == 1); // modulus is odd
        debug_assert!(modulus.v[0] >> 62 == 0);
        debug_assert!(modulus.v[1] >> 62 == 0);
        debug_assert!(modulus.v[2] >> 62 == 0);
        debug_assert!(modulus.v[3] >> 62 == 0);
        debug_assert!(modulus.v[4] >> 62 == 0);
        debug_assert!(modulus.mul_cmp(&Signed62::ONE, 0) > 0); // modulus > 0

        let modulus_inv62 = inv62(modulus.v[0] as u64);
        debug_assert!(
            modulus_inv62.wrapping_mul(modulus.v[0] as u64) & (M62 as u64) == 1
        );

        Self {
            modulus,
            modulus_inv62,
        }
    }

    /// Returns the modulus this descriptor was created for.
    pub const fn modulus(&self) -> &Signed62 {
        &self.modulus
    }
}

impl fmt::Debug for ModInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModInfo")
            .field("modulus", &self.modulus)
            .finish()
    }
}

/// Returns the multiplicative inverse of an odd `value` modulo 2^62.
///
/// Based on Hurchalla's method for computing multiplicative inverses modulo
/// a power of two: J. Hurchalla, "An Improved Integer Multiplicative Inverse
/// (modulo 2^w)", <https://arxiv.org/pdf/2204.04342.pdf>. The seed
/// `3*value ^ 2` is correct to 5 bits; each of the four refinement steps
/// doubles the precision, ending at 80 bits before the 62-bit truncation.
const fn inv62(value: u64) -> u64 {
    debug_assert!(value & 1 == 1);
    let x = value.wrapping_mul(3) ^ 2;
    let y = 1u64.wrapping_sub(x.wrapping_mul(value));
    let (x, y) = (x.wrapping_mul(y.wrapping_add(1)), y.wrapping_mul(y));
    let (x, y) = (x.wrapping_mul(y.wrapping_add(1)), y.wrapping_mul(y));
    let (x, y) = (x.wrapping_mul(y.wrapping_add(1)), y.wrapping_mul(y));
    x.wrapping_mul(y.wrapping_add(1)) & (M62 as u64)
}
