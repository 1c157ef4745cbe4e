//! Frozen parameter sets for ML-DSA-44/65/87 (spec §3, §9).
//!
//! A `MlDsaParams` is a plain data record, not a trait object or generic
//! parameter: the three variants differ only by the numeric constants and
//! vector dimensions below, never by algorithm, so a runtime-dispatched
//! selector (`MlDsaLevel`) resolving to a `&'static MlDsaParams` is enough
//! (spec §9 "Runtime-dispatched parameter sets").

use crate::field::Q;

/// Ring degree, shared by all parameter sets.
pub const N: usize = 256;
/// Dropped-bits parameter for `Power2Round`, shared by all parameter sets.
pub const D: u32 = 13;
/// Seed / `rho` / `K` length in bytes, shared by all parameter sets.
pub const SEED_BYTES: usize = 32;
/// `tr` length in bytes, shared by all parameter sets.
pub const TR_BYTES: usize = 64;
/// `rho'`/`mu` length in bytes, shared by all parameter sets.
pub const RHOP_BYTES: usize = 64;
/// Hard cap on Fiat-Shamir rejection attempts in `sign` (spec §4.9).
pub const MAX_SIGN_ATTEMPTS: usize = 1000;

/// A frozen ML-DSA parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MlDsaParams {
    pub name: &'static str,
    pub k: usize,
    pub l: usize,
    pub eta: i32,
    pub tau: usize,
    pub gamma1: i32,
    pub gamma2: i32,
    pub omega: usize,
    pub lambda: usize,
    pub beta: i32,
    pub eta_bits: u32,
    pub gamma1_bits: u32,
    pub w1_bits: u32,
    pub c_tilde_bytes: usize,
    pub pk_bytes: usize,
    pub sk_bytes: usize,
    pub sig_bytes: usize,
}

const fn eta_bits_of(eta: i32) -> u32 {
    if eta == 2 {
        3
    } else {
        4
    }
}

const fn gamma1_bits_of(gamma1: i32) -> u32 {
    if gamma1 == 1 << 17 {
        18
    } else {
        20
    }
}

const fn w1_bits_of(gamma2: i32) -> u32 {
    // gamma2 = (q-1)/88 -> 6 bits; gamma2 = (q-1)/32 -> 4 bits.
    if gamma2 == (Q - 1) / 88 {
        6
    } else {
        4
    }
}

const fn pk_bytes_of(k: usize) -> usize {
    SEED_BYTES + k * 320
}

const fn sk_bytes_of(k: usize, l: usize, eta_bits: u32, d: u32) -> usize {
    2 * SEED_BYTES + TR_BYTES + 32 * (eta_bits as usize) * (k + l) + 32 * (d as usize) * k
}

const fn sig_bytes_of(c_tilde_bytes: usize, l: usize, gamma1_bits: u32, omega: usize, k: usize) -> usize {
    c_tilde_bytes + l * 32 * (gamma1_bits as usize) + omega + k
}

const fn build(
    name: &'static str,
    k: usize,
    l: usize,
    eta: i32,
    tau: usize,
    gamma1: i32,
    gamma2: i32,
    omega: usize,
    lambda: usize,
) -> MlDsaParams {
    let eta_bits = eta_bits_of(eta);
    let gamma1_bits = gamma1_bits_of(gamma1);
    let w1_bits = w1_bits_of(gamma2);
    let c_tilde_bytes = lambda / 4;
    MlDsaParams {
        name,
        k,
        l,
        eta,
        tau,
        gamma1,
        gamma2,
        omega,
        lambda,
        beta: (tau as i32) * eta,
        eta_bits,
        gamma1_bits,
        w1_bits,
        c_tilde_bytes,
        pk_bytes: pk_bytes_of(k),
        sk_bytes: sk_bytes_of(k, l, eta_bits, D),
        sig_bytes: sig_bytes_of(c_tilde_bytes, l, gamma1_bits, omega, k),
    }
}

pub const MLDSA44: MlDsaParams = build("ML-DSA-44", 4, 4, 2, 39, 1 << 17, (Q - 1) / 88, 80, 128);
pub const MLDSA65: MlDsaParams = build("ML-DSA-65", 6, 5, 4, 49, 1 << 19, (Q - 1) / 32, 55, 192);
pub const MLDSA87: MlDsaParams = build("ML-DSA-87", 8, 7, 2, 60, 1 << 19, (Q - 1) / 32, 75, 256);

/// Selects one of the three standardized ML-DSA parameter sets at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MlDsaLevel {
    MlDsa44,
    MlDsa65,
    MlDsa87,
}

impl MlDsaLevel {
    pub fn params(self) -> &'static MlDsaParams {
        match self {
            MlDsaLevel::MlDsa44 => &MLDSA44,
            MlDsaLevel::MlDsa65 => &MLDSA65,
            MlDsaLevel::MlDsa87 => &MLDSA87,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_fips_204_table_2() {
        assert_eq!(MLDSA44.pk_bytes, 1312);
        assert_eq!(MLDSA44.sk_bytes, 2560);
        assert_eq!(MLDSA44.sig_bytes, 2420);

        assert_eq!(MLDSA65.pk_bytes, 1952);
        assert_eq!(MLDSA65.sk_bytes, 4032);
        assert_eq!(MLDSA65.sig_bytes, 3309);

        assert_eq!(MLDSA87.pk_bytes, 2592);
        assert_eq!(MLDSA87.sk_bytes, 4896);
        assert_eq!(MLDSA87.sig_bytes, 4627);
    }

    #[test]
    fn derived_constants() {
        assert_eq!(MLDSA44.beta, 78);
        assert_eq!(MLDSA65.beta, 196);
        assert_eq!(MLDSA87.beta, 120);

        assert_eq!(MLDSA44.c_tilde_bytes, 32);
        assert_eq!(MLDSA65.c_tilde_bytes, 48);
        assert_eq!(MLDSA87.c_tilde_bytes, 64);

        assert_eq!(MLDSA44.gamma1_bits, 18);
        assert_eq!(MLDSA65.gamma1_bits, 20);
        assert_eq!(MLDSA87.gamma1_bits, 20);

        assert_eq!(MLDSA44.w1_bits, 6);
        assert_eq!(MLDSA65.w1_bits, 4);
        assert_eq!(MLDSA87.w1_bits, 4);
    }
}
