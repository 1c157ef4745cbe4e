//! BitPack/BitUnpack and the canonical pk/sk/sig encodings (spec §4.7).
//!
//! Grounded on the teacher's `pack_public_key`/`pack_secret_key`/
//! `pack_signature`/`unpack_signature` in
//! `pqcrypto_native/src/algorithms/mldsa.rs` — present there only as
//! ungrounded ad-hoc layouts (index+sign byte pairs, 21-bit direct
//! packing) that do not match FIPS 204 — rebuilt here to the exact
//! bit-widths and field order spec.md §4.7 specifies, cross-checked
//! against the `codespree-fips204` reference crate's `pk_encode`/
//! `sk_encode` for field order.

use crate::error::{Error, Result};
use crate::field::Q;
use crate::params::{MlDsaParams, D, N, SEED_BYTES, TR_BYTES};
use crate::poly::{Poly, PolyVec};

/// Writes the low `bits` bits of every value in `values` into a byte
/// buffer, LSB-first, values concatenated in order. `values[i] < 2^bits`
/// for all `i`.
pub fn bit_pack_raw(values: &[u32], bits: u32) -> Vec<u8> {
    let total_bits = values.len() as u64 * bits as u64;
    let mut out = Vec::with_capacity(((total_bits + 7) / 8) as usize);
    let mut acc: u64 = 0;
    let mut acc_bits: u32 = 0;
    for &v in values {
        acc |= (v as u64) << acc_bits;
        acc_bits += bits;
        while acc_bits >= 8 {
            out.push((acc & 0xFF) as u8);
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        out.push((acc & 0xFF) as u8);
    }
    out
}

/// Inverse of [`bit_pack_raw`]: reads `count` values of `bits` bits each.
pub fn bit_unpack_raw(bytes: &[u8], bits: u32, count: usize) -> Vec<u32> {
    let mask: u64 = (1u64 << bits) - 1;
    let mut out = Vec::with_capacity(count);
    let mut acc: u64 = 0;
    let mut acc_bits: u32 = 0;
    let mut byte_idx = 0usize;
    for _ in 0..count {
        while acc_bits < bits {
            acc |= (bytes[byte_idx] as u64) << acc_bits;
            acc_bits += 8;
            byte_idx += 1;
        }
        out.push((acc & mask) as u32);
        acc >>= bits;
        acc_bits -= bits;
    }
    out
}

/// Packs a polynomial's standard-form coefficients (`[0, 2^bits)`) with
/// `bits` bits each.
pub fn bit_pack(p: &Poly, bits: u32) -> Vec<u8> {
    let values: Vec<u32> = p.0.iter().map(|&c| c as u32).collect();
    bit_pack_raw(&values, bits)
}

/// Unpacks `bits`-bit unsigned values into a polynomial's coefficients.
pub fn bit_unpack(bytes: &[u8], bits: u32) -> Poly {
    let values = bit_unpack_raw(bytes, bits, N);
    let mut out = [0i32; N];
    for (o, v) in out.iter_mut().zip(values) {
        *o = v as i32;
    }
    Poly(out)
}

/// Packs a centered polynomial: each coefficient `c` is stored as
/// `bound - c`, so `c = bound` packs as `0` and `c = bound - (2^bits - 1)`
/// packs as `2^bits - 1`.
pub fn bit_pack_centered(p: &Poly, bound: i32, bits: u32) -> Vec<u8> {
    let values: Vec<u32> = p.0.iter().map(|&c| (bound - c) as u32).collect();
    bit_pack_raw(&values, bits)
}

/// Inverse of [`bit_pack_centered`], reconstructing centered coefficients
/// then reducing modulo `q` into `[0, q)` (negative centered values wrap).
pub fn bit_unpack_centered(bytes: &[u8], bound: i32, bits: u32) -> Poly {
    let values = bit_unpack_raw(bytes, bits, N);
    let mut out = [0i32; N];
    for (o, v) in out.iter_mut().zip(values) {
        let centered = bound - v as i32;
        *o = if centered < 0 { centered + Q } else { centered };
    }
    Poly(out)
}

fn pack_vec(v: &PolyVec, bits: u32, pack_one: impl Fn(&Poly, u32) -> Vec<u8>) -> Vec<u8> {
    let mut out = Vec::new();
    for p in v.0.iter() {
        out.extend(pack_one(p, bits));
    }
    out
}

fn pack_vec_centered(v: &PolyVec, bound: i32, bits: u32) -> Vec<u8> {
    let mut out = Vec::new();
    for p in v.0.iter() {
        out.extend(bit_pack_centered(p, bound, bits));
    }
    out
}

fn unpack_vec(bytes: &[u8], bits: u32, dim: usize) -> PolyVec {
    let poly_bytes = ((bits as usize) * N + 7) / 8;
    let mut polys = Vec::with_capacity(dim);
    for chunk in bytes.chunks(poly_bytes).take(dim) {
        polys.push(bit_unpack(chunk, bits));
    }
    PolyVec(polys)
}

fn unpack_vec_centered(bytes: &[u8], bound: i32, bits: u32, dim: usize) -> PolyVec {
    let poly_bytes = ((bits as usize) * N + 7) / 8;
    let mut polys = Vec::with_capacity(dim);
    for chunk in bytes.chunks(poly_bytes).take(dim) {
        polys.push(bit_unpack_centered(chunk, bound, bits));
    }
    PolyVec(polys)
}

/// `pk = ρ ∥ bitpack(t1, 10)`.
pub fn pk_encode(params: &MlDsaParams, rho: &[u8; SEED_BYTES], t1: &PolyVec) -> Vec<u8> {
    let mut out = Vec::with_capacity(params.pk_bytes);
    out.extend_from_slice(rho);
    out.extend(pack_vec(t1, 10, |p, b| bit_pack(p, b)));
    out
}

/// Splits `pk` and validates `t1` coefficients lie in `[0, 2^10)`.
pub fn pk_decode(params: &MlDsaParams, pk: &[u8]) -> Result<([u8; SEED_BYTES], PolyVec)> {
    if pk.len() != params.pk_bytes {
        return Err(Error::InvalidEncoding);
    }
    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(&pk[..SEED_BYTES]);
    let t1 = unpack_vec(&pk[SEED_BYTES..], 10, params.k);
    for p in t1.0.iter() {
        for &c in p.0.iter() {
            if !(0..1 << 10).contains(&c) {
                return Err(Error::InvalidEncoding);
            }
        }
    }
    Ok((rho, t1))
}

/// `sk = ρ ∥ K ∥ tr ∥ pack_centered(s1, η, η_bits) ∥ pack_centered(s2, η, η_bits) ∥ pack_centered(t0, 2^(d-1), d)`.
#[allow(clippy::too_many_arguments)]
pub fn sk_encode(
    params: &MlDsaParams,
    rho: &[u8; SEED_BYTES],
    k_seed: &[u8; SEED_BYTES],
    tr: &[u8; TR_BYTES],
    s1: &PolyVec,
    s2: &PolyVec,
    t0: &PolyVec,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(params.sk_bytes);
    out.extend_from_slice(rho);
    out.extend_from_slice(k_seed);
    out.extend_from_slice(tr);
    out.extend(pack_vec_centered(s1, params.eta, params.eta_bits));
    out.extend(pack_vec_centered(s2, params.eta, params.eta_bits));
    out.extend(pack_vec_centered(t0, 1 << (D - 1), D));
    out
}

pub struct DecodedSk {
    pub rho: [u8; SEED_BYTES],
    pub k_seed: [u8; SEED_BYTES],
    pub tr: [u8; TR_BYTES],
    pub s1: PolyVec,
    pub s2: PolyVec,
    pub t0: PolyVec,
}

impl Drop for DecodedSk {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        // s1/s2/t0 wipe themselves via `Poly`'s own `Drop`; `K` is the one
        // plain byte buffer here that spec §3 marks secret-sensitive.
        self.k_seed.zeroize();
    }
}

/// Splits `sk` and validates every `s1`/`s2` coefficient lies in
/// `{-η, …, η}` (mod q) and every `t0` coefficient in
/// `{-(2^(d-1)-1), …, 2^(d-1)}` (mod q).
pub fn sk_decode(params: &MlDsaParams, sk: &[u8]) -> Result<DecodedSk> {
    if sk.len() != params.sk_bytes {
        return Err(Error::InvalidEncoding);
    }
    let mut off = 0usize;
    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(&sk[off..off + SEED_BYTES]);
    off += SEED_BYTES;
    let mut k_seed = [0u8; SEED_BYTES];
    k_seed.copy_from_slice(&sk[off..off + SEED_BYTES]);
    off += SEED_BYTES;
    let mut tr = [0u8; TR_BYTES];
    tr.copy_from_slice(&sk[off..off + TR_BYTES]);
    off += TR_BYTES;

    let s1_bytes = ((params.eta_bits as usize) * N + 7) / 8 * params.l;
    let s2_bytes = ((params.eta_bits as usize) * N + 7) / 8 * params.k;
    let t0_bytes = ((D as usize) * N + 7) / 8 * params.k;

    let s1 = unpack_vec_centered(&sk[off..off + s1_bytes], params.eta, params.eta_bits, params.l);
    off += s1_bytes;
    let s2 = unpack_vec_centered(&sk[off..off + s2_bytes], params.eta, params.eta_bits, params.k);
    off += s2_bytes;
    let t0 = unpack_vec_centered(&sk[off..off + t0_bytes], 1 << (D - 1), D, params.k);

    let eta_ok = |v: &PolyVec| {
        v.0.iter().all(|p| {
            p.0.iter().all(|&c| {
                let centered = if c > Q / 2 { c - Q } else { c };
                (-params.eta..=params.eta).contains(&centered)
            })
        })
    };
    if !eta_ok(&s1) || !eta_ok(&s2) {
        return Err(Error::InvalidEncoding);
    }
    let t0_bound = 1i32 << (D - 1);
    let t0_ok = t0.0.iter().all(|p| {
        p.0.iter().all(|&c| {
            let centered = if c > Q / 2 { c - Q } else { c };
            (-(t0_bound - 1)..=t0_bound).contains(&centered)
        })
    });
    if !t0_ok {
        return Err(Error::InvalidEncoding);
    }

    Ok(DecodedSk { rho, k_seed, tr, s1, s2, t0 })
}

/// Bit-packs `w1` at `w1_bits` bits per coefficient, used as input to the
/// challenge hash in both sign and verify.
pub fn encode_w1(params: &MlDsaParams, w1: &PolyVec) -> Vec<u8> {
    pack_vec(w1, params.w1_bits, |p, b| bit_pack(p, b))
}

/// Sparse hint encoding: for each polynomial `i`, write its non-zero
/// coefficient indices (ascending) into the next free slots of the first
/// `ω` bytes, then the running cumulative count into byte `ω + i`.
pub fn hint_encode(params: &MlDsaParams, h: &[Vec<bool>]) -> Vec<u8> {
    let mut out = vec![0u8; params.omega + params.k];
    let mut idx = 0usize;
    for (i, row) in h.iter().enumerate() {
        for (j, &bit) in row.iter().enumerate() {
            if bit {
                out[idx] = j as u8;
                idx += 1;
            }
        }
        out[params.omega + i] = idx as u8;
    }
    out
}

/// Strict sparse hint decoding: rejects non-ascending indices, non-
/// monotone counts, and non-zero unused slots.
pub fn hint_decode(params: &MlDsaParams, bytes: &[u8]) -> Result<Vec<Vec<bool>>> {
    if bytes.len() != params.omega + params.k {
        return Err(Error::InvalidEncoding);
    }
    let mut h = vec![vec![false; N]; params.k];
    let mut prev = 0usize;
    for i in 0..params.k {
        let cur = bytes[params.omega + i] as usize;
        if cur < prev || cur > params.omega {
            return Err(Error::InvalidEncoding);
        }
        let mut prev_idx: i32 = -1;
        for &b in &bytes[prev..cur] {
            let idx = b as usize;
            if idx >= N || (idx as i32) <= prev_idx {
                return Err(Error::InvalidEncoding);
            }
            h[i][idx] = true;
            prev_idx = idx as i32;
        }
        prev = cur;
    }
    if bytes[prev..params.omega].iter().any(|&b| b != 0) {
        return Err(Error::InvalidEncoding);
    }
    Ok(h)
}

/// `sig = c̃ ∥ bitpack_centered(z, γ1, γ1_bits) ∥ hint_encode(h)`.
pub fn sig_encode(params: &MlDsaParams, c_tilde: &[u8], z: &PolyVec, h: &[Vec<bool>]) -> Vec<u8> {
    let mut out = Vec::with_capacity(params.sig_bytes);
    out.extend_from_slice(c_tilde);
    out.extend(pack_vec_centered(z, params.gamma1, params.gamma1_bits));
    out.extend(hint_encode(params, h));
    out
}

pub struct DecodedSig {
    pub c_tilde: Vec<u8>,
    pub z: PolyVec,
    pub h: Vec<Vec<bool>>,
}

/// Strict signature decoding per spec.md §4.7: exact size, canonical `z`
/// range, and a strictly-ascending, monotone-count hint encoding.
pub fn sig_decode(params: &MlDsaParams, sig: &[u8]) -> Result<DecodedSig> {
    if sig.len() != params.sig_bytes {
        return Err(Error::InvalidEncoding);
    }
    let mut off = 0usize;
    let c_tilde = sig[off..off + params.c_tilde_bytes].to_vec();
    off += params.c_tilde_bytes;

    let z_bytes = ((params.gamma1_bits as usize) * N + 7) / 8 * params.l;
    let z = unpack_vec_centered(&sig[off..off + z_bytes], params.gamma1, params.gamma1_bits, params.l);
    off += z_bytes;

    for p in z.0.iter() {
        for &c in p.0.iter() {
            let in_low = (0..=params.gamma1).contains(&c);
            let in_high = (Q - (params.gamma1 - 1)..Q).contains(&c);
            if !(in_low || in_high) {
                return Err(Error::InvalidEncoding);
            }
        }
    }

    let h = hint_decode(params, &sig[off..])?;

    Ok(DecodedSig { c_tilde, z, h })
}
