//! High/low bit decomposition and hints
//!
//! `power2round` splits t for the public key, `decompose` splits w for the
//! commitment, and the hint functions let a verifier recover the high bits of
//! w from a slightly perturbed value.

use crate::dilithium::{params::*, poly::Poly, polyvec::PolyVecK};

/// Number of high-bit buckets produced by `decompose`
const W1_BUCKETS: i32 = (Q - 1) / (2 * GAMMA2);

/// For a in [0, q) returns (a1, a0) with a = a1·2^D + a0 and -2^(D-1) < a0 <= 2^(D-1).
#[inline]
pub fn power2round(a: i32) -> (i32, i32) {
    let a1 = (a + (1 << (D - 1)) - 1) >> D;
    (a1, a - (a1 << D))
}

/// For a in [0, q) returns (a1, a0) with a ≡ a1·2·GAMMA2 + a0 (mod q),
/// -GAMMA2 < a0 <= GAMMA2, except for the wrap-around case where a1 = 0 and
/// -GAMMA2 <= a0 < 0.
#[inline]
pub fn decompose(a: i32) -> (i32, i32) {
    let mut a1 = (a + 127) >> 7;
    a1 = (a1 * 1025 + (1 << 21)) >> 22;
    a1 &= W1_BUCKETS - 1;

    let mut a0 = a - a1 * 2 * GAMMA2;
    a0 -= (((Q - 1) / 2 - a0) >> 31) & Q;
    (a1, a0)
}

/// Whether the low bits `a0` overflow into the high bits `a1`
#[inline]
pub fn make_hint(a0: i32, a1: i32) -> bool {
    a0 > GAMMA2 || a0 < -GAMMA2 || (a0 == -GAMMA2 && a1 != 0)
}

/// Correct the high bits of `a` according to `hint`
#[inline]
pub fn use_hint(a: i32, hint: bool) -> i32 {
    let (a1, a0) = decompose(a);

    if !hint {
        a1
    } else if a0 > 0 {
        (a1 + 1) & (W1_BUCKETS - 1)
    } else {
        (a1 - 1) & (W1_BUCKETS - 1)
    }
}

/// Split every coefficient of `t` into (t1, t0)
pub fn power2round_vec(t: &PolyVecK) -> (PolyVecK, PolyVecK) {
    let mut t1 = PolyVecK::zero();
    let mut t0 = PolyVecK::zero();

    for ((src, hi), lo) in t.polys.iter().zip(t1.polys.iter_mut()).zip(t0.polys.iter_mut()) {
        for j in 0..N {
            let (a1, a0) = power2round(src.coeffs[j]);
            hi.coeffs[j] = a1;
            lo.coeffs[j] = a0;
        }
    }

    (t1, t0)
}

/// Split every coefficient of `w` into (w1, w0)
pub fn decompose_vec(w: &PolyVecK) -> (PolyVecK, PolyVecK) {
    let mut w1 = PolyVecK::zero();
    let mut w0 = PolyVecK::zero();

    for ((src, hi), lo) in w.polys.iter().zip(w1.polys.iter_mut()).zip(w0.polys.iter_mut()) {
        for j in 0..N {
            let (a1, a0) = decompose(src.coeffs[j]);
            hi.coeffs[j] = a1;
            lo.coeffs[j] = a0;
        }
    }

    (w1, w0)
}

/// Hint vector for (w0, w1) and its number of ones
pub fn make_hint_vec(w0: &PolyVecK, w1: &PolyVecK) -> (PolyVecK, usize) {
    let mut hint = PolyVecK::zero();
    let mut ones = 0;

    for ((h, lo), hi) in hint.polys.iter_mut().zip(w0.polys.iter()).zip(w1.polys.iter()) {
        for j in 0..N {
            let bit = make_hint(lo.coeffs[j], hi.coeffs[j]);
            h.coeffs[j] = bit as i32;
            ones += bit as usize;
        }
    }

    (hint, ones)
}

/// Apply `hint` to every coefficient of `w`
pub fn use_hint_vec(w: &PolyVecK, hint: &PolyVecK) -> PolyVecK {
    let mut out = PolyVecK::zero();

    for ((o, src), h) in out.polys.iter_mut().zip(w.polys.iter()).zip(hint.polys.iter()) {
        apply_hint(o, src, h);
    }

    out
}

fn apply_hint(out: &mut Poly, w: &Poly, hint: &Poly) {
    for j in 0..N {
        out.coeffs[j] = use_hint(w.coeffs[j], hint.coeffs[j] != 0);
    }
}
