//! Application of a transition matrix to the `(d, e)` and `(f, g)` pairs.

use crate::{divsteps::Trans2x2, modinfo::ModInfo, signed62::Signed62, M62};

/// Absolute value, for assertion bounds.
const fn abs64(v: i64) -> i64 {
    debug_assert!(v > i64::MIN);
    if v < 0 {
        -v
    } else {
        v
    }
}

/// Computes `(t/2^62) * [d, e] mod modulus`.
///
/// Both on input and output, `d` and `e` are in `(-2*modulus, modulus)` and
/// their limbs in `(-2^62, 2^62)`. The transition matrix alone would leave a
/// factor 2^62 behind; a multiple of the modulus is added to each linear
/// combination so that its bottom 62 bits vanish and the shift is exact.
#[inline]
pub(crate) const fn update_de_62(
    d: &Signed62,
    e: &Signed62,
    t: &Trans2x2,
    modinfo: &ModInfo,
) -> (Signed62, Signed62) {
    let [d0, d1, d2, d3, d4] = d.v;
    let [e0, e1, e2, e3, e4] = e.v;
    let (u, v, q, r) = (t.u, t.v, t.q, t.r);

    debug_assert!(d.mul_cmp(&modinfo.modulus, -2) > 0); // d > -2*modulus
    debug_assert!(d.mul_cmp(&modinfo.modulus, 1) < 0); // d < modulus
    debug_assert!(e.mul_cmp(&modinfo.modulus, -2) > 0); // e > -2*modulus
    debug_assert!(e.mul_cmp(&modinfo.modulus, 1) < 0); // e < modulus
    debug_assert!(abs64(u) as i128 + abs64(v) as i128 <= 1i128 << 62); // |u|+|v| <= 2^62
    debug_assert!(abs64(q) as i128 + abs64(r) as i128 <= 1i128 << 62); // |q|+|r| <= 2^62

    // [md,me] start as zero; plus [u,q] if d is negative; plus [v,r] if e is.
    let sd = d4 >> 63;
    let se = e4 >> 63;
    let mut md = (u & sd) + (v & se);
    let mut me = (q & sd) + (r & se);
    // Begin computing t*[d,e].
    let mut cd = u as i128 * d0 as i128 + v as i128 * e0 as i128;
    let mut ce = q as i128 * d0 as i128 + r as i128 * e0 as i128;
    // Correct md,me so that t*[d,e]+modulus*[md,me] has 62 zero bottom bits.
    md -= ((modinfo
        .modulus_inv62
        .wrapping_mul(cd as u64)
        .wrapping_add(md as u64))
        & (M62 as u64)) as i64;
    me -= ((modinfo
        .modulus_inv62
        .wrapping_mul(ce as u64)
        .wrapping_add(me as u64))
        & (M62 as u64)) as i64;
    // Fold the now-known md,me into the bottom limb.
    cd += modinfo.modulus.v[0] as i128 * md as i128;
    ce += modinfo.modulus.v[0] as i128 * me as i128;
    // The low 62 bits of the computation must now be zero; discard them.
    debug_assert!((cd as i64) & M62 == 0);
    debug_assert!((ce as i64) & M62 == 0);
    cd >>= 62;
    ce >>= 62;

    let mut rd = Signed62::ZERO;
    let mut re = Signed62::ZERO;
    // Limb 1 of t*[d,e]+modulus*[md,me], stored as output limb 0 (the
    // accumulator shift between limbs is the division by 2^62).
    cd += u as i128 * d1 as i128 + v as i128 * e1 as i128;
    ce += q as i128 * d1 as i128 + r as i128 * e1 as i128;
    if modinfo.modulus.v[1] != 0 {
        // Skip the multiply when this limb of the modulus is zero, as is
        // common for near-power-of-two primes. The modulus is public.
        cd += modinfo.modulus.v[1] as i128 * md as i128;
        ce += modinfo.modulus.v[1] as i128 * me as i128;
    }
    rd.v[0] = (cd as i64) & M62;
    cd >>= 62;
    re.v[0] = (ce as i64) & M62;
    ce >>= 62;
    // Limb 2, stored as output limb 1.
    cd += u as i128 * d2 as i128 + v as i128 * e2 as i128;
    ce += q as i128 * d2 as i128 + r as i128 * e2 as i128;
    if modinfo.modulus.v[2] != 0 {
        cd += modinfo.modulus.v[2] as i128 * md as i128;
        ce += modinfo.modulus.v[2] as i128 * me as i128;
    }
    rd.v[1] = (cd as i64) & M62;
    cd >>= 62;
    re.v[1] = (ce as i64) & M62;
    ce >>= 62;
    // Limb 3, stored as output limb 2.
    cd += u as i128 * d3 as i128 + v as i128 * e3 as i128;
    ce += q as i128 * d3 as i128 + r as i128 * e3 as i128;
    if modinfo.modulus.v[3] != 0 {
        cd += modinfo.modulus.v[3] as i128 * md as i128;
        ce += modinfo.modulus.v[3] as i128 * me as i128;
    }
    rd.v[2] = (cd as i64) & M62;
    cd >>= 62;
    re.v[2] = (ce as i64) & M62;
    ce >>= 62;
    // Limb 4, stored as output limb 3.
    cd += u as i128 * d4 as i128 + v as i128 * e4 as i128;
    ce += q as i128 * d4 as i128 + r as i128 * e4 as i128;
    cd += modinfo.modulus.v[4] as i128 * md as i128;
    ce += modinfo.modulus.v[4] as i128 * me as i128;
    rd.v[3] = (cd as i64) & M62;
    cd >>= 62;
    re.v[3] = (ce as i64) & M62;
    ce >>= 62;
    // What remains is limb 5; store it as output limb 4.
    rd.v[4] = cd as i64;
    re.v[4] = ce as i64;

    debug_assert!(rd.mul_cmp(&modinfo.modulus, -2) > 0); // d > -2*modulus
    debug_assert!(rd.mul_cmp(&modinfo.modulus, 1) < 0); // d < modulus
    debug_assert!(re.mul_cmp(&modinfo.modulus, -2) > 0); // e > -2*modulus
    debug_assert!(re.mul_cmp(&modinfo.modulus, 1) < 0); // e < modulus

    (rd, re)
}

/// Computes `(t/2^62) * [f, g]`.
///
/// The construction of `t` guarantees the product is divisible by 2^62, so
/// no modular correction is needed; the bottom limb of the pre-shift result
/// must come out zero.
#[inline]
pub(crate) const fn update_fg_62(
    f: &Signed62,
    g: &Signed62,
    t: &Trans2x2,
) -> (Signed62, Signed62) {
    let [f0, f1, f2, f3, f4] = f.v;
    let [g0, g1, g2, g3, g4] = g.v;
    let (u, v, q, r) = (t.u, t.v, t.q, t.r);

    // Start computing t*[f,g].
    let mut cf = u as i128 * f0 as i128 + v as i128 * g0 as i128;
    let mut cg = q as i128 * f0 as i128 + r as i128 * g0 as i128;
    // The bottom 62 bits of the result must be zero; discard them.
    debug_assert!((cf as i64) & M62 == 0);
    debug_assert!((cg as i64) & M62 == 0);
    cf >>= 62;
    cg >>= 62;

    let mut rf = Signed62::ZERO;
    let mut rg = Signed62::ZERO;
    // Limb 1 of t*[f,g], stored as output limb 0 (= the down shift).
    cf += u as i128 * f1 as i128 + v as i128 * g1 as i128;
    cg += q as i128 * f1 as i128 + r as i128 * g1 as i128;
    rf.v[0] = (cf as i64) & M62;
    cf >>= 62;
    rg.v[0] = (cg as i64) & M62;
    cg >>= 62;
    // Limb 2, stored as output limb 1.
    cf += u as i128 * f2 as i128 + v as i128 * g2 as i128;
    cg += q as i128 * f2 as i128 + r as i128 * g2 as i128;
    rf.v[1] = (cf as i64) & M62;
    cf >>= 62;
    rg.v[1] = (cg as i64) & M62;
    cg >>= 62;
    // Limb 3, stored as output limb 2.
    cf += u as i128 * f3 as i128 + v as i128 * g3 as i128;
    cg += q as i128 * f3 as i128 + r as i128 * g3 as i128;
    rf.v[2] = (cf as i64) & M62;
    cf >>= 62;
    rg.v[2] = (cg as i64) & M62;
    cg >>= 62;
    // Limb 4, stored as output limb 3.
    cf += u as i128 * f4 as i128 + v as i128 * g4 as i128;
    cg += q as i128 * f4 as i128 + r as i128 * g4 as i128;
    rf.v[3] = (cf as i64) & M62;
    cf >>= 62;
    rg.v[3] = (cg as i64) & M62;
    cg >>= 62;
    // What remains is limb 5; store it as output limb 4.
    rf.v[4] = cf as i64;
    rg.v[4] = cg as i64;

    (rf, rg)
}
