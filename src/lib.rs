//! Pure Rust implementation of modular inversion based on the paper
//! "Fast constant-time gcd computation and modular inversion" by
//! Daniel J. Bernstein and Bo-Yin Yang: <https://eprint.iacr.org/2019/266>.
//!
//! # About
//! This library computes multiplicative inverses modulo an odd modulus
//! `M` with `0 < M < 2^256`. Given `x`, it returns the unique `y` in
//! `[0, M)` with `x * y ≡ 1 (mod M)`, or zero when `x ≡ 0 (mod M)`.
//!
//! Two variants are provided:
//! - [`modinv`]: the sequence of executed instructions and accessed memory
//!   addresses is independent of `x`. Use this for secret inputs.
//! - [`modinv_var`]: branches on `x` for speed. Only for public inputs.
//!
//! Values are exchanged in the [`Signed62`] representation: five signed
//! 62-bit limbs, little-endian. The modulus is described by a [`ModInfo`],
//! which carries a precomputed inverse of the modulus modulo 2^62.
//!
//! # Goals
//! - No heap allocations i.e. `no_std`-friendly.
//! - No branches or table lookups keyed on secret data in [`modinv`].
//! - Support `const fn` throughout, so inverses and modulus descriptors
//!   can be computed at compile time.
//!
//! For an explanation of the algorithm, the following resources are
//! recommended:
//! - D. Bernstein, B.-Y. Yang, "Fast constant-time gcd computation and
//!   modular inversion", <https://gcd.cr.yp.to/safegcd-20190413.pdf>
//! - P. Wuille, "The safegcd implementation in libsecp256k1 explained",
//!   <https://github.com/bitcoin-core/secp256k1/blob/master/doc/safegcd_implementation.md>

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

mod divsteps;
mod inverse;
mod modinfo;
mod signed62;
mod update;

pub use crate::{
    inverse::{modinv, modinv_var},
    modinfo::ModInfo,
    signed62::Signed62,
};
pub use subtle;

/// Mask of the 62 low bits of a word; limbs are 62 bits wide.
pub(crate) const M62: i64 = (u64::MAX >> 2) as i64;
