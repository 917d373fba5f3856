//! Inversion drivers: compose the divsteps generators with the update
//! routines and normalize the result.

use crate::{
    divsteps::{divsteps_62, divsteps_62_var},
    modinfo::ModInfo,
    signed62::Signed62,
    update::{update_de_62, update_fg_62},
};

/// Computes the inverse of `x` modulo `modinfo.modulus`, in constant time.
///
/// Returns the unique `y` in `[0, modulus)` with `x * y ≡ 1 (mod modulus)`,
/// or zero when `x ≡ 0 (mod modulus)`. The caller must ensure the modulus
/// is odd and normalized, and pass `x` with limbs in `[0, 2^62)` and value
/// in `[0, modulus)` (values in `(-modulus, modulus)` are also accepted).
///
/// The instruction sequence and memory-access pattern are independent of
/// `x`; timing is a function of the modulus alone. The input is not
/// zeroized; callers holding secrets are responsible for scrubbing their
/// own copies.
pub const fn modinv(x: &Signed62, modinfo: &ModInfo) -> Signed62 {
    // Start with d=0, e=1, f=modulus, g=x, eta=-1.
    let mut d = Signed62::ZERO;
    let mut e = Signed62::ONE;
    let mut f = modinfo.modulus;
    let mut g = *x;
    let mut eta: i64 = -1;

    // 12 iterations of 62 divsteps each = 744 divsteps; 724 suffice for
    // 256-bit inputs, the rest is safety margin.
    let mut i = 0;
    while i < 12 {
        // Compute the transition matrix and new eta after 62 divsteps.
        let (next_eta, t) = divsteps_62(eta, f.v[0] as u64, g.v[0] as u64);
        eta = next_eta;
        // Update d,e using that transition matrix.
        let (nd, ne) = update_de_62(&d, &e, &t, modinfo);
        d = nd;
        e = ne;
        // Update f,g using that transition matrix.
        debug_assert!(f.mul_cmp(&modinfo.modulus, -1) > 0); // f > -modulus
        debug_assert!(f.mul_cmp(&modinfo.modulus, 1) <= 0); // f <= modulus
        debug_assert!(g.mul_cmp(&modinfo.modulus, -1) > 0); // g > -modulus
        debug_assert!(g.mul_cmp(&modinfo.modulus, 1) < 0); // g < modulus
        let (nf, ng) = update_fg_62(&f, &g, &t);
        f = nf;
        g = ng;
        debug_assert!(f.mul_cmp(&modinfo.modulus, -1) > 0);
        debug_assert!(f.mul_cmp(&modinfo.modulus, 1) <= 0);
        debug_assert!(g.mul_cmp(&modinfo.modulus, -1) > 0);
        debug_assert!(g.mul_cmp(&modinfo.modulus, 1) < 0);
        i += 1;
    }

    // At this point sufficient iterations have been performed that g must
    // have reached zero, and (if g was not originally zero) f must now
    // equal +/- gcd of the initial f and g, i.e. +/- 1, with d holding
    // +/- the modular inverse.
    debug_assert!(g.mul_cmp(&Signed62::ONE, 0) == 0); // g == 0
    debug_assert!(
        f.mul_cmp(&Signed62::ONE, -1) == 0 // |f| == 1, unless x == 0
            || f.mul_cmp(&Signed62::ONE, 1) == 0
            || (x.mul_cmp(&Signed62::ONE, 0) == 0
                && d.mul_cmp(&Signed62::ONE, 0) == 0
                && (f.mul_cmp(&modinfo.modulus, 1) == 0
                    || f.mul_cmp(&modinfo.modulus, -1) == 0))
    );

    // Optionally negate d (depending on the sign of f), then normalize to
    // [0, modulus).
    d.normalize(f.v[4], modinfo)
}

/// Computes the inverse of `x` modulo `modinfo.modulus`, in variable time.
///
/// Functionally identical to [`modinv`], but free to branch on `x`: it
/// terminates as soon as the gcd state reaches zero rather than running a
/// fixed number of iterations. Must not be used on secret inputs.
pub const fn modinv_var(x: &Signed62, modinfo: &ModInfo) -> Signed62 {
    // Start with d=0, e=1, f=modulus, g=x, eta=-1.
    let mut d = Signed62::ZERO;
    let mut e = Signed62::ONE;
    let mut f = modinfo.modulus;
    let mut g = *x;
    let mut eta: i64 = -1;
    let mut i = 0;

    // Do iterations of 62 divsteps each until g = 0.
    loop {
        let (next_eta, t) = divsteps_62_var(eta, f.v[0] as u64, g.v[0] as u64);
        eta = next_eta;
        let (nd, ne) = update_de_62(&d, &e, &t, modinfo);
        d = nd;
        e = ne;
        debug_assert!(f.mul_cmp(&modinfo.modulus, -1) > 0); // f > -modulus
        debug_assert!(f.mul_cmp(&modinfo.modulus, 1) <= 0); // f <= modulus
        debug_assert!(g.mul_cmp(&modinfo.modulus, -1) > 0); // g > -modulus
        debug_assert!(g.mul_cmp(&modinfo.modulus, 1) < 0); // g < modulus
        let (nf, ng) = update_fg_62(&f, &g, &t);
        f = nf;
        g = ng;

        // If the bottom limb of g is zero, there is a chance that g = 0.
        if g.v[0] == 0 && (g.v[1] | g.v[2] | g.v[3] | g.v[4]) == 0 {
            break;
        }

        i += 1;
        debug_assert!(i < 12); // never need more than 12*62 = 744 divsteps
        debug_assert!(f.mul_cmp(&modinfo.modulus, -1) > 0);
        debug_assert!(f.mul_cmp(&modinfo.modulus, 1) <= 0);
        debug_assert!(g.mul_cmp(&modinfo.modulus, -1) > 0);
        debug_assert!(g.mul_cmp(&modinfo.modulus, 1) < 0);
    }

    // g is zero here, and (if g was not originally zero) |f| = gcd of the
    // initial f, g = 1, with d holding +/- the modular inverse.
    debug_assert!(g.mul_cmp(&Signed62::ONE, 0) == 0);
    debug_assert!(
        f.mul_cmp(&Signed62::ONE, -1) == 0
            || f.mul_cmp(&Signed62::ONE, 1) == 0
            || (x.mul_cmp(&Signed62::ONE, 0) == 0
                && d.mul_cmp(&Signed62::ONE, 0) == 0
                && (f.mul_cmp(&modinfo.modulus, 1) == 0
                    || f.mul_cmp(&modinfo.modulus, -1) == 0))
    );

    d.normalize(f.v[4], modinfo)
}
