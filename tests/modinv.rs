//! Equivalence tests for safegcd inversions against a `num-bigint` oracle.

mod common;

use common::{from_biguint, from_le_bytes, to_biguint};
use modinv62::{modinv, modinv_var, ModInfo, Signed62};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use proptest::prelude::*;

/// The secp256k1 field prime, 2^256 - 2^32 - 977.
const P: ModInfo = ModInfo::new(Signed62::from_be_hex(
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
));

prop_compose! {
    fn signed62()(bytes in any::<[u8; 32]>()) -> Signed62 {
        from_le_bytes(&bytes)
    }
}

prop_compose! {
    fn odd_modulus()(bytes in any::<[u8; 32]>()) -> ModInfo {
        let mut words = [0u64; 4];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            words[i] = u64::from_le_bytes(chunk.try_into().expect("8-byte chunk"));
        }
        words[0] |= 1;
        ModInfo::new(Signed62::from_words(words))
    }
}

proptest! {
    #[test]
    fn invert_mod_field_prime(x in signed62()) {
        let p_bi = to_biguint(P.modulus());
        let x_bi = to_biguint(&x) % &p_bi;
        let x = from_biguint(&x_bi);

        let inv = modinv(&x, &P);
        let inv_var = modinv_var(&x, &P);
        prop_assert_eq!(inv, inv_var);

        if x_bi.is_zero() {
            prop_assert_eq!(inv, Signed62::ZERO);
        } else {
            let inv_bi = to_biguint(&inv);
            prop_assert!(inv_bi < p_bi);
            prop_assert_eq!((&inv_bi * &x_bi) % &p_bi, BigUint::one());

            // The output is fully normalized: re-encoding its integer value
            // must reproduce it limb for limb.
            prop_assert_eq!(inv, from_biguint(&inv_bi));

            // Inverting twice returns to the input.
            prop_assert_eq!(modinv(&inv, &P), x);
        }
    }

    #[test]
    fn invert_mod_random_odd_modulus(x in signed62(), m in odd_modulus()) {
        let m_bi = to_biguint(m.modulus());
        let x_bi = to_biguint(&x) % &m_bi;
        let x = from_biguint(&x_bi);

        if x_bi.is_zero() {
            prop_assert_eq!(modinv(&x, &m), Signed62::ZERO);
            prop_assert_eq!(modinv_var(&x, &m), Signed62::ZERO);
        } else if x_bi.gcd(&m_bi).is_one() {
            // An inverse exists exactly when gcd(x, m) = 1; for gcd > 1
            // (possible since random odd m need not be prime) the result
            // is unspecified.
            let inv = modinv(&x, &m);
            let inv_var = modinv_var(&x, &m);
            prop_assert_eq!(inv, inv_var);

            let inv_bi = to_biguint(&inv);
            prop_assert!(inv_bi < m_bi);
            prop_assert_eq!((&inv_bi * &x_bi) % &m_bi, BigUint::one());
        }
    }

    #[test]
    fn agrees_with_fermat_exponentiation(x in signed62()) {
        // For the prime modulus, x^-1 = x^(p-2) (mod p).
        let p_bi = to_biguint(P.modulus());
        let x_bi = to_biguint(&x) % &p_bi;
        let x = from_biguint(&x_bi);
        prop_assume!(!x_bi.is_zero());

        let expected = x_bi.modpow(&(&p_bi - 2u32), &p_bi);
        prop_assert_eq!(to_biguint(&modinv(&x, &P)), expected);
    }
}

#[test]
fn fixed_points_of_inversion() {
    let p_bi = to_biguint(P.modulus());

    // 1 and p-1 are the only square roots of unity mod p.
    assert_eq!(modinv(&Signed62::ONE, &P), Signed62::ONE);
    let p_minus_1 = from_biguint(&(&p_bi - 1u32));
    assert_eq!(modinv(&p_minus_1, &P), p_minus_1);
    assert_eq!(modinv_var(&p_minus_1, &P), p_minus_1);

    // Zero has no inverse and maps to zero.
    assert_eq!(modinv(&Signed62::ZERO, &P), Signed62::ZERO);
    assert_eq!(modinv_var(&Signed62::ZERO, &P), Signed62::ZERO);
}

#[test]
fn smallest_and_largest_moduli() {
    // The smallest supported modulus: M = 3.
    let m3 = ModInfo::new(Signed62::from_words([3, 0, 0, 0]));
    let two = Signed62::from_words([2, 0, 0, 0]);
    assert_eq!(modinv(&two, &m3), two); // 2*2 = 4 = 1 (mod 3)
    assert_eq!(modinv_var(&two, &m3), two);

    // The largest odd modulus below 2^256.
    let m = ModInfo::new(Signed62::from_words([u64::MAX; 4]));
    let m_bi = to_biguint(m.modulus());
    for x in [2u32, 3, 12345] {
        let x_bi = BigUint::from(x);
        if !x_bi.gcd(&m_bi).is_one() {
            continue;
        }
        let x = from_biguint(&x_bi);
        let inv = modinv(&x, &m);
        assert_eq!(inv, modinv_var(&x, &m));
        assert_eq!((to_biguint(&inv) * x_bi) % &m_bi, BigUint::one());
    }
}
