//! Rejection-sampling XOF-driven samplers (spec §4.5).
//!
//! The teacher's `pqcrypto_native/src/algorithms/mldsa.rs` carried
//! `sample_poly_uniform`, `sample_sparse_challenge`, and
//! `reconstruct_matrix_a`, but none of them implement the FIPS 204
//! rejection rules (the uniform sampler used a 23-bit-direct compare with
//! no byte-order contract, the challenge sampler was not the
//! Fisher-Yates-style `SampleInBall`, and the matrix builder never
//! entered the NTT domain explicitly). Rebuilt here to spec.md §4.5
//! exactly, reusing the teacher's "expand from a seed via SHAKE" shape.

use crate::encoding::bit_unpack_raw;
use crate::field::{self, Q};
use crate::keccak::{Xof, SHAKE128_RATE, SHAKE256_RATE};
use crate::params::N;
use crate::poly::{Poly, PolyVec};

/// Expands `rho` into the `k x l` matrix `A`, coefficients uniform in
/// `[0, q)`, stored directly in NTT (Montgomery) domain — `RejNTTPoly`
/// output is sampled in the NTT domain by construction, no forward
/// transform is applied (spec.md §9 open question).
pub fn expand_a(rho: &[u8], k: usize, l: usize) -> Vec<PolyVec> {
    let mut rows = Vec::with_capacity(k);
    for i in 0..k {
        let mut row = Vec::with_capacity(l);
        for j in 0..l {
            row.push(reject_ntt_poly(rho, i as u8, j as u8));
        }
        rows.push(PolyVec(row));
    }
    rows
}

fn reject_ntt_poly(rho: &[u8], i: u8, j: u8) -> Poly {
    let mut xof = Xof::shake128();
    xof.absorb(rho);
    xof.absorb(&[j, i]);

    let mut coeffs = [0i32; N];
    let mut filled = 0usize;
    let mut block = [0u8; SHAKE128_RATE];
    while filled < N {
        xof.squeeze(&mut block);
        let mut pos = 0usize;
        while pos + 3 <= SHAKE128_RATE && filled < N {
            let b0 = block[pos] as u32;
            let b1 = block[pos + 1] as u32;
            let b2 = (block[pos + 2] & 0x7F) as u32;
            pos += 3;
            let t = b0 | (b1 << 8) | (b2 << 16);
            if t < Q as u32 {
                // `A` is sampled directly into Montgomery domain: every
                // vector it is multiplied against (`Poly::ntt`) lifts its
                // coefficients via `to_mont` before the forward transform,
                // so `A` must match that domain for `pointwise_mul` to
                // produce the real Montgomery product rather than one
                // factor of `R` short.
                coeffs[filled] = field::to_mont(t as i32);
                filled += 1;
            }
        }
    }
    Poly(coeffs)
}

/// Expands `rho'` (64 bytes) into a `dim`-length vector of polynomials
/// with coefficients in `[-eta, eta]`, stored in standard form
/// (`[0, q)`). Polynomial `i` uses nonce `nonce_base + i`.
pub fn expand_s(rhop: &[u8], nonce_base: u16, dim: usize, eta: i32) -> PolyVec {
    let mut polys = Vec::with_capacity(dim);
    for i in 0..dim {
        let nonce = nonce_base + i as u16;
        polys.push(reject_bounded_poly(rhop, nonce, eta));
    }
    PolyVec(polys)
}

fn reject_bounded_poly(rhop: &[u8], nonce: u16, eta: i32) -> Poly {
    let mut xof = Xof::shake256();
    xof.absorb(rhop);
    xof.absorb(&[(nonce & 0xFF) as u8, (nonce >> 8) as u8]);

    let mut coeffs = [0i32; N];
    let mut filled = 0usize;
    let mut block = [0u8; SHAKE256_RATE];
    while filled < N {
        xof.squeeze(&mut block);
        for &byte in block.iter() {
            for nibble in [byte & 0x0F, byte >> 4] {
                if filled >= N {
                    break;
                }
                if let Some(c) = nibble_to_coeff(nibble, eta) {
                    coeffs[filled] = if c < 0 { c + Q } else { c };
                    filled += 1;
                }
            }
        }
    }
    Poly(coeffs)
}

fn nibble_to_coeff(nibble: u8, eta: i32) -> Option<i32> {
    if eta == 2 {
        if nibble >= 15 {
            return None;
        }
        let m = if nibble < 5 {
            nibble
        } else if nibble < 10 {
            nibble - 5
        } else {
            nibble - 10
        };
        Some(2 - m as i32)
    } else {
        if nibble >= 9 {
            return None;
        }
        Some(4 - nibble as i32)
    }
}

/// Expands `seed` (64 bytes) and a per-attempt nonce base into an
/// `l`-length mask vector with coefficients in `[-(gamma1-1), gamma1]`,
/// stored in standard form (`[0, q)`).
pub fn expand_mask(seed: &[u8], nonce_base: u16, l: usize, gamma1: i32, gamma1_bits: u32) -> PolyVec {
    let out_bytes = ((gamma1_bits as usize) * N + 7) / 8;
    let mut polys = Vec::with_capacity(l);
    for i in 0..l {
        let nonce = nonce_base + i as u16;
        let mut xof = Xof::shake256();
        xof.absorb(seed);
        xof.absorb(&[(nonce & 0xFF) as u8, (nonce >> 8) as u8]);
        let mut buf = vec![0u8; out_bytes];
        xof.squeeze(&mut buf);

        let values = bit_unpack_raw(&buf, gamma1_bits, N);
        let mut coeffs = [0i32; N];
        for (c, v) in coeffs.iter_mut().zip(values) {
            let centered = gamma1 - v as i32;
            *c = if centered < 0 { centered + Q } else { centered };
        }
        polys.push(Poly(coeffs));
    }
    PolyVec(polys)
}

/// Produces the degree-256 challenge polynomial with exactly `tau`
/// nonzero coefficients in `{+1, q-1}`, via the Fisher-Yates-style
/// rejection shuffle absorbed from `c_tilde`.
pub fn sample_in_ball(c_tilde: &[u8], tau: usize) -> Poly {
    let mut xof = Xof::shake256();
    xof.absorb(c_tilde);

    let mut sign_bytes = [0u8; 8];
    xof.squeeze(&mut sign_bytes);
    let mut signs = u64::from_le_bytes(sign_bytes);

    let mut coeffs = [0i32; N];
    let mut byte_buf = [0u8; 1];
    for i in (N - tau)..N {
        let j = loop {
            xof.squeeze(&mut byte_buf);
            let candidate = byte_buf[0] as usize;
            if candidate <= i {
                break candidate;
            }
        };
        coeffs[i] = coeffs[j];
        coeffs[j] = if signs & 1 == 0 { 1 } else { Q - 1 };
        signs >>= 1;
    }
    Poly(coeffs)
}
