//! FIPS 204 Algorithm 2, Fiat-Shamir with aborts (spec §4.9).
//!
//! The teacher's `try_sign()` in `pqcrypto_native/src/algorithms/mldsa.rs`
//! is present but recursive and unbounded (no 1000-attempt cap) and never
//! computes a hint, so its output could not verify against FIPS 204.
//! Replaced with the spec's bounded attempt loop, keeping the teacher's
//! "decode sk, expand, loop, pack" shape and its use of `zeroize` for
//! secret-carrying intermediates (here mostly automatic: every [`Poly`]/
//! [`PolyVec`] zeroizes its coefficients on drop, so scope exit at the
//! end of a rejected attempt already wipes `y`, `w`, `cs2`, `ct0`, `z`).

use crate::encoding::{sig_encode, sk_decode};
use crate::error::{Error, Result};
use crate::keccak::shake256_once;
use crate::params::{MlDsaLevel, MAX_SIGN_ATTEMPTS, RHOP_BYTES, TR_BYTES};
use crate::poly::PolyVec;
use crate::rounding::{high_bits_vec, low_bits_vec, make_hint_vec};
use crate::sampling::{expand_a, expand_mask, sample_in_ball};
use zeroize::Zeroize;

/// Signs `message` (already prepared by the caller, see spec.md §6) with
/// `sk_bytes`, using `rnd` as the 32-byte hedging/determinism input.
pub fn sign(level: MlDsaLevel, sk_bytes: &[u8], message: &[u8], rnd: &[u8]) -> Result<Vec<u8>> {
    if rnd.len() != 32 {
        return Err(Error::InvalidParameter);
    }
    let params = level.params();
    let decoded = sk_decode(params, sk_bytes)?;

    let a = expand_a(&decoded.rho, params.k, params.l);

    let mut s1_ntt = decoded.s1.clone();
    s1_ntt.ntt();
    let mut s2_ntt = decoded.s2.clone();
    s2_ntt.ntt();
    let mut t0_ntt = decoded.t0.clone();
    t0_ntt.ntt();

    let mu: [u8; 64] = shake256_once(&[&decoded.tr, message]);
    let mut rhop_input = Vec::with_capacity(32 + 32 + 64);
    rhop_input.extend_from_slice(&decoded.k_seed);
    rhop_input.extend_from_slice(rnd);
    rhop_input.extend_from_slice(&mu);
    let mut rhop: [u8; RHOP_BYTES] = shake256_once(&[&rhop_input]);
    rhop_input.zeroize();

    let beta = params.beta;
    let result = (0..MAX_SIGN_ATTEMPTS as u32).find_map(|kappa| {
        let nonce_base = kappa
            .checked_mul(params.l as u32)
            .expect("attempt*l fits u32 for all standardized parameter sets");
        let mut y = expand_mask(&rhop, nonce_base as u16, params.l, params.gamma1, params.gamma1_bits);

        let mut y_ntt = y.clone();
        y_ntt.ntt();
        let mut w_ntt = PolyVec::matrix_mul(&a, &y_ntt);
        w_ntt.intt();
        let w = w_ntt;

        let w1 = high_bits_vec(&w, params.gamma2);
        let c_tilde_input = [mu.as_slice(), &crate::encoding::encode_w1(params, &w1)];
        let mut c_tilde = vec![0u8; params.c_tilde_bytes];
        crate::keccak::shake256_into(&c_tilde_input, &mut c_tilde);

        let c = sample_in_ball(&c_tilde, params.tau);
        let mut c_ntt = c.clone();
        c_ntt.ntt();

        let mut z_term = s1_ntt.scalar_mul(&c_ntt);
        z_term.intt();
        let z = y.add(&z_term);

        let mut cs2 = s2_ntt.scalar_mul(&c_ntt);
        cs2.intt();
        let r0 = low_bits_vec(&w.sub(&cs2), params.gamma2);

        y.zeroize_poly_vec();

        if !z.check_norm(params.gamma1 - beta) {
            return None;
        }
        if !r0.check_norm(params.gamma2 - beta) {
            return None;
        }

        let mut ct0 = t0_ntt.scalar_mul(&c_ntt);
        ct0.intt();

        let hint_input = w.sub(&cs2).add(&ct0);
        let (hints, weight) = make_hint_vec(&ct0.neg(), &hint_input, params.gamma2);
        if weight > params.omega {
            return None;
        }
        if !ct0.check_norm(params.gamma2) {
            return None;
        }

        Some(sig_encode(params, &c_tilde, &z, &hints))
    });

    rhop.zeroize();

    match result {
        Some(sig) => Ok(sig),
        None => Err(Error::InternalFault),
    }
}

trait ZeroizePolyVec {
    fn zeroize_poly_vec(&mut self);
}

impl ZeroizePolyVec for PolyVec {
    fn zeroize_poly_vec(&mut self) {
        for p in self.0.iter_mut() {
            p.0.zeroize();
        }
    }
}
