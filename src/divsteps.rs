//! Transition matrix generators: 62 divsteps per call.
//!
//! A divstep acts on a state `(eta, f, g)` with `f` odd:
//!
//! - if `eta < 0` and `g` is odd: `(eta, f, g) <- (-eta - 1, g, (g - f)/2)`
//! - else if `g` is odd:          `(eta, f, g) <- (eta - 1, f, (g + f)/2)`
//! - else:                        `(eta, f, g) <- (eta - 1, f, g/2)`
//!
//! Sixty-two consecutive divsteps only depend on the bottom 62 bits of `f`
//! and `g`, so their aggregate effect on the full-width values can be
//! captured as a 2x2 integer matrix computed from the low limbs alone.

/// Transition matrix for 62 divsteps, scaled by 2^62:
///
/// ```text
/// t = [ u  v ]
///     [ q  r ]
/// ```
///
/// Entries satisfy `|u| + |v| <= 2^62` and `|q| + |r| <= 2^62`, and the
/// determinant is exactly 2^62.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Trans2x2 {
    pub(crate) u: i64,
    pub(crate) v: i64,
    pub(crate) q: i64,
    pub(crate) r: i64,
}

impl Trans2x2 {
    pub(crate) const fn det(&self) -> i128 {
        self.u as i128 * self.r as i128 - self.v as i128 * self.q as i128
    }
}

/// Computes the transition matrix and new `eta` for 62 divsteps, in
/// constant time.
///
/// `f0` and `g0` are the bottom limbs of `f` and `g`; `f` must be odd.
/// Every call executes the identical instruction sequence regardless of the
/// argument values: the two divstep conditions are evaluated as all-ones /
/// all-zeros masks and applied with AND, XOR, shift and add only.
#[inline]
pub(crate) const fn divsteps_62(mut eta: i64, f0: u64, g0: u64) -> (i64, Trans2x2) {
    // u,v,q,r are the elements of the transition matrix being built up,
    // starting with the identity matrix. Semantically they are signed
    // integers in [-2^62, 2^62], represented here as unsigned mod 2^64 so
    // that left shifts are well defined throughout. The range stays inside
    // [-2^63, 2^63), so the final cast back to signed is value-preserving.
    let (mut u, mut v, mut q, mut r) = (1u64, 0u64, 0u64, 1u64);
    let (mut f, mut g) = (f0, g0);

    let mut i: u32 = 0;
    while i < 62 {
        debug_assert!(f & 1 == 1); // f must always be odd
        debug_assert!(u.wrapping_mul(f0).wrapping_add(v.wrapping_mul(g0)) == f.wrapping_shl(i));
        debug_assert!(q.wrapping_mul(f0).wrapping_add(r.wrapping_mul(g0)) == g.wrapping_shl(i));
        // Compute condition masks for (eta < 0) and for (g & 1).
        let c1 = (eta >> 63) as u64;
        let c2 = (g & 1).wrapping_neg();
        // x,y,z are conditionally negated versions of f,u,v.
        let x = (f ^ c1).wrapping_sub(c1);
        let y = (u ^ c1).wrapping_sub(c1);
        let z = (v ^ c1).wrapping_sub(c1);
        // Conditionally add x,y,z to g,q,r.
        g = g.wrapping_add(x & c2);
        q = q.wrapping_add(y & c2);
        r = r.wrapping_add(z & c2);
        // From here on c1 is a mask for (eta < 0) and (g & 1).
        let c1 = c1 & c2;
        // Conditionally negate eta, then unconditionally decrement it.
        eta = ((eta as u64 ^ c1).wrapping_sub(c1.wrapping_add(1))) as i64;
        // Conditionally add g,q,r to f,u,v.
        f = f.wrapping_add(g & c1);
        u = u.wrapping_add(q & c1);
        v = v.wrapping_add(r & c1);
        // Shifts.
        g >>= 1;
        u <<= 1;
        v <<= 1;
        // Bound on eta implied by the outer loop doing at most 12*62
        // divsteps on 256-bit inputs.
        debug_assert!(eta >= -745 && eta <= 745);
        i += 1;
    }

    let t = Trans2x2 {
        u: u as i64,
        v: v as i64,
        q: q as i64,
        r: r as i64,
    };
    // Each individual divstep matrix has determinant 2, so the aggregate of
    // 62 of them has determinant 2^62. Multiplication by t therefore scales
    // the gcd of f and g by exactly that power of two, which the update
    // routines divide back out.
    debug_assert!(t.det() == 1i128 << 62);
    (eta, t)
}

/// Computes the transition matrix and new `eta` for 62 divsteps, in
/// variable time. Same contract as [`divsteps_62`], but free to branch on
/// `f` and `g`.
#[inline]
pub(crate) const fn divsteps_62_var(mut eta: i64, f0: u64, g0: u64) -> (i64, Trans2x2) {
    let (mut u, mut v, mut q, mut r) = (1u64, 0u64, 0u64, 1u64);
    let (mut f, mut g) = (f0, g0);
    let mut i: u32 = 62;

    loop {
        // A sentinel bit at position i bounds the count to at most i; the
        // eliminated divsteps all just divide g by two.
        let zeros = (g | (u64::MAX << i)).trailing_zeros();
        g >>= zeros;
        u <<= zeros;
        v <<= zeros;
        eta -= zeros as i64;
        i -= zeros;
        // Done once 62 divsteps have been performed.
        if i == 0 {
            break;
        }
        debug_assert!(f & 1 == 1);
        debug_assert!(g & 1 == 1);
        debug_assert!(
            u.wrapping_mul(f0).wrapping_add(v.wrapping_mul(g0)) == f.wrapping_shl(62 - i)
        );
        debug_assert!(
            q.wrapping_mul(f0).wrapping_add(r.wrapping_mul(g0)) == g.wrapping_shl(62 - i)
        );
        debug_assert!(eta >= -745 && eta <= 745);

        let limit;
        let m;
        let w;
        if eta < 0 {
            // Negate eta and replace f,g with g,-f.
            eta = -eta;
            let tmp = f;
            f = g;
            g = tmp.wrapping_neg();
            let tmp = u;
            u = q;
            q = tmp.wrapping_neg();
            let tmp = v;
            v = r;
            r = tmp.wrapping_neg();
            // Use a formula to cancel up to 6 bottom bits of g at once. No
            // more than i bits can go (we would be done before that), and no
            // more than eta+1 (eta would flip sign again at that point).
            limit = if eta + 1 > i as i64 { i as i64 } else { eta + 1 };
            debug_assert!(limit > 0 && limit <= 62);
            // m masks the bottom min(limit, 6) bits.
            m = (u64::MAX >> (64 - limit)) & 63;
            // w = f*g*(f^2 - 2) mod 2^6 is the multiple of f that cancels
            // the bottom bits of g.
            w = f.wrapping_mul(g).wrapping_mul(f.wrapping_mul(f).wrapping_sub(2)) & m;
        } else {
            // eta tends to be small here; a simpler formula canceling up to
            // 4 bits is a better trade.
            limit = if eta + 1 > i as i64 { i as i64 } else { eta + 1 };
            debug_assert!(limit > 0 && limit <= 62);
            // m masks the bottom min(limit, 4) bits.
            m = (u64::MAX >> (64 - limit)) & 15;
            let t = f.wrapping_add((f.wrapping_add(1) & 4) << 1);
            w = t.wrapping_neg().wrapping_mul(g) & m;
        }
        g = g.wrapping_add(f.wrapping_mul(w));
        q = q.wrapping_add(u.wrapping_mul(w));
        r = r.wrapping_add(v.wrapping_mul(w));
        debug_assert!(g & m == 0);
    }

    let t = Trans2x2 {
        u: u as i64,
        v: v as i64,
        q: q as i64,
        r: r as i64,
    };
    debug_assert!(t.det() == 1i128 << 62);
    (eta, t)
}

#[cfg(test)]
mod tests {
    use super::{divsteps_62, divsteps_62_var};
    use rand_core::{RngCore, SeedableRng};

    #[test]
    fn zero_g_only_shifts() {
        let (eta, t) = divsteps_62(-1, 1, 0);
        assert_eq!(eta, -63);
        assert_eq!((t.u, t.v, t.q, t.r), (1 << 62, 0, 0, 1));
    }

    #[test]
    fn vartime_agrees_with_consttime() {
        // The 62-divstep transition matrix is uniquely determined by
        // (eta, f0, g0), so both generators must produce identical output.
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0x6d6f64696e763632);
        for _ in 0..1000 {
            let f0 = rng.next_u64() | 1;
            let g0 = rng.next_u64();
            let eta = (rng.next_u64() % 201) as i64 - 100;

            let (eta_ct, t_ct) = divsteps_62(eta, f0, g0);
            let (eta_var, t_var) = divsteps_62_var(eta, f0, g0);

            assert_eq!(eta_ct, eta_var);
            assert_eq!(t_ct.u, t_var.u);
            assert_eq!(t_ct.v, t_var.v);
            assert_eq!(t_ct.q, t_var.q);
            assert_eq!(t_ct.r, t_var.r);
            assert_eq!(t_ct.det(), 1i128 << 62);
        }
    }

    #[test]
    fn matrix_norm_bound() {
        // |u| + |v| and |q| + |r| stay within 2^62.
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(2);
        for _ in 0..1000 {
            let (_, t) = divsteps_62(-1, rng.next_u64() | 1, rng.next_u64());
            let norm0 = (t.u as i128).abs() + (t.v as i128).abs();
            let norm1 = (t.q as i128).abs() + (t.r as i128).abs();
            assert!(norm0 <= 1 << 62);
            assert!(norm1 <= 1 << 62);
        }
    }
}
