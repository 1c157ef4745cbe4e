//! Ring element and vector-of-ring-element types (spec §4.4).
//!
//! A [`Poly`] always holds standard-domain (non-Montgomery) coefficients
//! in `[0, q)` except while transiently inside [`Poly::ntt`]/[`Poly::intt`]
//! bodies. Secret-carrying polynomials are wiped on drop, grounded on the
//! teacher's `utils/secure_zero.rs` wipe-on-drop pattern, generalized from
//! a single buffer type to every ring element this crate produces.

use zeroize::Zeroize;

use crate::field::{self, Q};
use crate::ntt;
use crate::params::N;

/// A single ring element, `N` coefficients in `[0, q)`.
///
/// Deliberately not `Copy`: a custom `Drop` zeroizes every coefficient on
/// scope exit, and `Copy` types cannot carry a destructor. Callers that
/// need an independent copy use the explicit `Clone` impl.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Poly(pub [i32; N]);

impl Poly {
    pub const fn zero() -> Self {
        Poly([0i32; N])
    }

    pub fn from_coeffs(coeffs: [i32; N]) -> Self {
        Poly(coeffs)
    }

    /// Forward NTT, in place. Coefficients must be standard-domain on
    /// entry; on exit they are Montgomery-domain NTT coefficients.
    pub fn ntt(&mut self) {
        for c in self.0.iter_mut() {
            *c = field::to_mont(*c);
        }
        ntt::forward(&mut self.0);
    }

    /// Inverse NTT, in place. Coefficients must be Montgomery-domain NTT
    /// coefficients on entry; on exit they are standard-domain in `[0, q)`.
    pub fn intt(&mut self) {
        ntt::inverse(&mut self.0);
        ntt::reduce_to_standard(&mut self.0);
    }

    pub fn add(&self, other: &Poly) -> Poly {
        let mut out = [0i32; N];
        for i in 0..N {
            out[i] = field::freeze(field::add(self.0[i], other.0[i]));
        }
        Poly(out)
    }

    pub fn sub(&self, other: &Poly) -> Poly {
        let mut out = [0i32; N];
        for i in 0..N {
            out[i] = field::freeze(field::add(field::sub(self.0[i], other.0[i]), Q));
        }
        Poly(out)
    }

    /// Coefficient-wise product of two NTT-domain, Montgomery-form
    /// polynomials. Result is NTT-domain, Montgomery-form, machine range
    /// `(-q, q)` (un-reduced, per `field::mul`'s own output range).
    pub fn pointwise_mul(&self, other: &Poly) -> Poly {
        let mut out = [0i32; N];
        for i in 0..N {
            out[i] = field::mul(self.0[i], other.0[i]);
        }
        Poly(out)
    }

    /// Normalizes machine-range coefficients into `[0, q)` without
    /// leaving whatever domain (standard or Montgomery) they are
    /// currently in. Needed before feeding a raw `pointwise_mul`/
    /// `scalar_mul` result (range `(-q, q)`) into a further `add`/`sub`,
    /// whose own `freeze` call only tolerates `(-2q, 2q)` inputs —
    /// narrower than the range reachable by combining an un-reduced
    /// `(-q, q)` term with an already-`[0, q)` one.
    pub fn reduce(&self) -> Poly {
        let mut out = [0i32; N];
        for i in 0..N {
            out[i] = field::freeze(self.0[i]);
        }
        Poly(out)
    }

    pub fn neg(&self) -> Poly {
        let mut out = [0i32; N];
        for i in 0..N {
            out[i] = field::freeze(Q - self.0[i]);
        }
        Poly(out)
    }

    pub fn shift_left(&self, bits: u32) -> Poly {
        let mut out = [0i32; N];
        for i in 0..N {
            out[i] = field::freeze(self.0[i] << bits);
        }
        Poly(out)
    }

    /// Infinity norm over the centered representatives (spec §4.4):
    /// `max_i min(c_i, q - c_i)` where `c_i` is the standard-domain value.
    /// Computed without any secret-dependent branch: every coefficient
    /// contributes to a running max via a branchless compare-and-select.
    pub fn infinity_norm(&self) -> i32 {
        let mut max = 0i32;
        for &c in self.0.iter() {
            let centered = field::center(c).abs();
            let gt = ((max - centered) >> 31) & 1; // 1 if max < centered
            max = max ^ ((max ^ centered) & -gt);
        }
        max
    }

    /// `true` iff every coefficient's centered absolute value is strictly
    /// less than `bound`. Used by the `sign` rejection conditions. Must
    /// not branch on individual coefficients in a way that is observable;
    /// this folds all comparisons into a single accumulator before the
    /// one, spec-mandated branch on the aggregate result.
    pub fn check_norm(&self, bound: i32) -> bool {
        self.infinity_norm() < bound
    }
}

impl Drop for Poly {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A vector of ring elements (either a `k`- or `l`-dimensional module
/// element, depending on context).
#[derive(Clone)]
pub struct PolyVec(pub Vec<Poly>);

impl PolyVec {
    pub fn zero(len: usize) -> Self {
        PolyVec(vec![Poly::zero(); len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ntt(&mut self) {
        for p in self.0.iter_mut() {
            p.ntt();
        }
    }

    pub fn intt(&mut self) {
        for p in self.0.iter_mut() {
            p.intt();
        }
    }

    pub fn add(&self, other: &PolyVec) -> PolyVec {
        PolyVec(self.0.iter().zip(&other.0).map(|(a, b)| a.add(b)).collect())
    }

    pub fn sub(&self, other: &PolyVec) -> PolyVec {
        PolyVec(self.0.iter().zip(&other.0).map(|(a, b)| a.sub(b)).collect())
    }

    pub fn shift_left(&self, bits: u32) -> PolyVec {
        PolyVec(self.0.iter().map(|p| p.shift_left(bits)).collect())
    }

    pub fn neg(&self) -> PolyVec {
        PolyVec(self.0.iter().map(|p| p.neg()).collect())
    }

    /// Pointwise-multiplies every entry by a single NTT-domain polynomial
    /// (the challenge `c`, typically). Result stays NTT-domain.
    pub fn scalar_mul(&self, c: &Poly) -> PolyVec {
        PolyVec(self.0.iter().map(|p| p.pointwise_mul(c)).collect())
    }

    /// Per-polynomial [`Poly::reduce`]: normalizes every coefficient of
    /// every entry into `[0, q)` without changing domain.
    pub fn reduce(&self) -> PolyVec {
        PolyVec(self.0.iter().map(|p| p.reduce()).collect())
    }

    pub fn infinity_norm(&self) -> i32 {
        self.0.iter().fold(0, |max, p| max.max(p.infinity_norm()))
    }

    pub fn check_norm(&self, bound: i32) -> bool {
        self.infinity_norm() < bound
    }

    /// Matrix-vector product `A * self` where `a` is `k` rows of `l`
    /// NTT-domain polynomials and `self` is an `l`-length NTT-domain
    /// vector. Returns a `k`-length NTT-domain vector (each entry still
    /// needs `.intt()` applied by the caller if a standard-domain result
    /// is wanted).
    pub fn matrix_mul(a: &[PolyVec], v: &PolyVec) -> PolyVec {
        let k = a.len();
        let mut out = Vec::with_capacity(k);
        for row in a.iter().take(k) {
            let mut acc = Poly::zero();
            for (row_poly, v_poly) in row.0.iter().zip(&v.0) {
                acc = acc.add(&row_poly.pointwise_mul(v_poly));
            }
            out.push(acc);
        }
        PolyVec(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinity_norm_of_zero_is_zero() {
        assert_eq!(Poly::zero().infinity_norm(), 0);
    }

    #[test]
    fn infinity_norm_centers_large_coefficients() {
        let mut p = Poly::zero();
        p.0[0] = Q - 1; // centered value is -1, abs 1
        assert_eq!(p.infinity_norm(), 1);
    }

    #[test]
    fn check_norm_rejects_at_bound() {
        let mut p = Poly::zero();
        p.0[0] = 5;
        assert!(p.check_norm(6));
        assert!(!p.check_norm(5));
    }

    #[test]
    fn add_sub_are_inverses() {
        let mut a = Poly::zero();
        let mut b = Poly::zero();
        for i in 0..N {
            a.0[i] = (i as i32 * 37) % Q;
            b.0[i] = (i as i32 * 101) % Q;
        }
        let sum = a.add(&b);
        let back = sum.sub(&b);
        assert_eq!(back.0, a.0);
    }
}
