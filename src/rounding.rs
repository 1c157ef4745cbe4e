//! `Power2Round`, `Decompose`, and the hint machinery (spec §4.6).
//!
//! No teacher counterpart exists for this module (the teacher's
//! `mldsa.rs` never implemented hints at all — its `try_sign` produced
//! signatures that could not be verified against the standard). Built
//! directly from spec.md §4.6, following the same branchless-arithmetic
//! style as [`crate::field`] throughout: every comparison used to select
//! between two outputs is folded into a mask rather than an `if`, since
//! `Decompose`/`MakeHint`/`UseHint` run over coefficients derived from
//! secret vectors before the hint itself is the only thing disclosed.

use crate::field::{self, Q};
use crate::params::N;
use crate::poly::{Poly, PolyVec};

/// Centers `r` into `(-alpha/2, alpha/2]`. `alpha` must be even.
#[inline(always)]
fn mod_pm(r: i32, alpha: i32) -> i32 {
    let mut t = r % alpha;
    t += alpha & (t >> 31);
    let mask = (alpha / 2 - t) >> 31; // all-ones if t > alpha/2
    t - (alpha & mask)
}

/// `Power2Round`: splits `r ∈ [0, q)` into `(r1, r0)` with
/// `r = r1 * 2^d + r0`, `r0 ∈ (-2^(d-1), 2^(d-1)]`.
pub fn power2round(r_in: i32) -> (i32, i32) {
    let r = field::freeze(r_in);
    let alpha = 1i32 << crate::params::D;
    let r0 = mod_pm(r, alpha);
    let r1 = (r - r0) >> crate::params::D;
    (r1, r0)
}

/// `Decompose`: splits `r ∈ [0, q)` into `(r1, r0)` with
/// `r ≡ r1 * 2*gamma2 + r0 (mod q)`, handling the wraparound case where
/// the naive `r1` would equal `(q-1)/(2*gamma2)`.
pub fn decompose(r_in: i32, gamma2: i32) -> (i32, i32) {
    let r = field::freeze(r_in);
    let alpha = 2 * gamma2;
    let r0 = mod_pm(r, alpha);
    let diff = r - r0;
    let d = diff - (Q - 1);
    let mask_nonzero = (d | d.wrapping_neg()) >> 31; // all-ones unless diff == q-1
    let eq_mask = !mask_nonzero; // all-ones iff diff == q-1
    let r1 = (diff / alpha) & !eq_mask;
    let r0_final = r0 - (eq_mask & 1);
    (r1, r0_final)
}

pub fn high_bits(r: i32, gamma2: i32) -> i32 {
    decompose(r, gamma2).0
}

pub fn low_bits(r: i32, gamma2: i32) -> i32 {
    decompose(r, gamma2).1
}

/// `MakeHint`: `true` iff adding `z` to `r` changes the high bits.
pub fn make_hint(z: i32, r: i32, gamma2: i32) -> bool {
    let r1 = high_bits(r, gamma2);
    let v1 = high_bits(field::freeze(field::add(r, z)), gamma2);
    r1 != v1
}

/// `UseHint`: recovers `r1` from `r` and a hint bit, correcting for the
/// one coefficient at which `r` and the signer's `r + z` landed in
/// different high-bit buckets.
pub fn use_hint(h: bool, r: i32, gamma2: i32) -> i32 {
    let m = (Q - 1) / (2 * gamma2);
    let (r1, r0) = decompose(r, gamma2);
    if !h {
        return r1;
    }
    if r0 > 0 {
        (r1 + 1).rem_euclid(m)
    } else {
        (r1 - 1).rem_euclid(m)
    }
}

pub fn power2round_vec(v: &PolyVec) -> (PolyVec, PolyVec) {
    let mut high = Vec::with_capacity(v.len());
    let mut low = Vec::with_capacity(v.len());
    for p in v.0.iter() {
        let mut h = [0i32; N];
        let mut l = [0i32; N];
        for i in 0..N {
            let (r1, r0) = power2round(p.0[i]);
            h[i] = r1;
            l[i] = r0;
        }
        high.push(Poly(h));
        low.push(Poly(l));
    }
    (PolyVec(high), PolyVec(low))
}

pub fn high_bits_vec(v: &PolyVec, gamma2: i32) -> PolyVec {
    PolyVec(
        v.0.iter()
            .map(|p| {
                let mut out = [0i32; N];
                for i in 0..N {
                    out[i] = high_bits(p.0[i], gamma2);
                }
                Poly(out)
            })
            .collect(),
    )
}

pub fn low_bits_vec(v: &PolyVec, gamma2: i32) -> PolyVec {
    PolyVec(
        v.0.iter()
            .map(|p| {
                let mut out = [0i32; N];
                for i in 0..N {
                    out[i] = low_bits(p.0[i], gamma2);
                }
                Poly(out)
            })
            .collect(),
    )
}

/// Computes the hint vector for `z` relative to `r`, and its Hamming
/// weight (total number of `true` bits across every polynomial).
pub fn make_hint_vec(z: &PolyVec, r: &PolyVec, gamma2: i32) -> (Vec<Vec<bool>>, usize) {
    let mut hints = Vec::with_capacity(z.len());
    let mut weight = 0usize;
    for (zp, rp) in z.0.iter().zip(&r.0) {
        let mut row = Vec::with_capacity(N);
        for i in 0..N {
            let h = make_hint(zp.0[i], rp.0[i], gamma2);
            weight += h as usize;
            row.push(h);
        }
        hints.push(row);
    }
    (hints, weight)
}

/// Applies a hint vector to recover the signer's high bits from the
/// verifier's own reconstructed `r`.
pub fn use_hint_vec(hints: &[Vec<bool>], r: &PolyVec, gamma2: i32) -> PolyVec {
    let mut out = Vec::with_capacity(r.len());
    for (hrow, rp) in hints.iter().zip(&r.0) {
        let mut coeffs = [0i32; N];
        for i in 0..N {
            coeffs[i] = use_hint(hrow[i], rp.0[i], gamma2);
        }
        out.push(Poly(coeffs));
    }
    PolyVec(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAMMA2_44: i32 = (Q - 1) / 88;
    const GAMMA2_65: i32 = (Q - 1) / 32;

    #[test]
    fn power2round_reconstructs_r() {
        for &r in &[0, 1, Q - 1, 4096, 8191999] {
            let r = field::freeze(r);
            let (r1, r0) = power2round(r);
            let recon = field::freeze(r1 * (1 << crate::params::D) + r0);
            assert_eq!(recon, r);
            assert!(r0 > -(1 << 12) && r0 <= (1 << 12));
        }
    }

    #[test]
    fn decompose_reconstructs_r_mod_q() {
        for &gamma2 in &[GAMMA2_44, GAMMA2_65] {
            for &r in &[0, 1, Q - 1, Q / 2, 123_456] {
                let r = field::freeze(r);
                let (r1, r0) = decompose(r, gamma2);
                let recon = field::freeze(r1 * 2 * gamma2 + r0);
                assert_eq!(recon, r);
            }
        }
    }

    #[test]
    fn decompose_r1_always_in_valid_bucket_range() {
        // r1 must land in [0, m) for every r, including the boundary
        // values where the naive (r - r0) / alpha would equal the
        // out-of-range bucket m = (q-1)/alpha.
        for &gamma2 in &[GAMMA2_44, GAMMA2_65] {
            let m = (Q - 1) / (2 * gamma2);
            for &r in &[0, Q - 1, Q - 2, Q / 2, 1] {
                let (r1, _r0) = decompose(field::freeze(r), gamma2);
                assert!((0..m).contains(&r1), "r1={r1} out of range for r={r}, gamma2={gamma2}");
            }
        }
    }

    #[test]
    fn make_hint_use_hint_roundtrip() {
        let gamma2 = GAMMA2_44;
        for &(r, z) in &[(5i32, 3i32), (0, 0), (Q - 1, 10), (gamma2, gamma2 + 1)] {
            let r = field::freeze(r);
            let summed = field::freeze(field::add(r, z));
            let h = make_hint(z, r, gamma2);
            let recovered = use_hint(h, r, gamma2);
            let actual = high_bits(summed, gamma2);
            assert_eq!(recovered, actual);
        }
    }

    #[test]
    fn use_hint_without_hint_is_identity() {
        let gamma2 = GAMMA2_65;
        for &r in &[0, 12345, Q - 1] {
            let r = field::freeze(r);
            assert_eq!(use_hint(false, r, gamma2), high_bits(r, gamma2));
        }
    }
}
