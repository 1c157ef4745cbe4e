//! Extendable-output function wrapper over SHAKE128/SHAKE256.
//!
//! Grounded on the teacher's `Shake256::default()/update()/finalize_xof()`
//! usage in `pqcrypto_native/src/algorithms/mldsa.rs`, generalized to the
//! incremental absorb/squeeze contract spec.md §4.1 requires (multiple
//! `absorb` calls before the first `squeeze`, arbitrary-length squeezing in
//! rate-sized chunks under the hood).

use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake128, Shake256,
};

/// SHAKE128 rate in bytes (used by `RejNTTPoly`/`RejBoundedPoly`).
pub const SHAKE128_RATE: usize = 168;
/// SHAKE256 rate in bytes (used by `H`, `G`, `ExpandMask`, `SampleInBall`).
pub const SHAKE256_RATE: usize = 136;

/// An absorb-then-squeeze XOF session. Once the first byte has been
/// squeezed, further `absorb` calls are not meaningful and are not used
/// anywhere in this crate.
pub enum Xof {
    Shake128(Shake128Reader),
    Shake256(Shake256Reader),
}

pub enum Shake128Reader {
    Absorbing(Shake128),
    Squeezing(<Shake128 as ExtendableOutput>::Reader),
}

pub enum Shake256Reader {
    Absorbing(Shake256),
    Squeezing(<Shake256 as ExtendableOutput>::Reader),
}

impl Xof {
    pub fn shake128() -> Self {
        Xof::Shake128(Shake128Reader::Absorbing(Shake128::default()))
    }

    pub fn shake256() -> Self {
        Xof::Shake256(Shake256Reader::Absorbing(Shake256::default()))
    }

    /// Feeds additional input bytes. Panics if squeezing has already begun
    /// (an internal-only contract; no caller in this crate violates it).
    pub fn absorb(&mut self, data: &[u8]) {
        match self {
            Xof::Shake128(Shake128Reader::Absorbing(h)) => h.update(data),
            Xof::Shake256(Shake256Reader::Absorbing(h)) => h.update(data),
            _ => panic!("absorb called after squeeze began"),
        }
    }

    /// Fills `out` with the next `out.len()` output bytes, switching into
    /// squeezing mode on first call.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        match self {
            Xof::Shake128(r) => {
                if let Shake128Reader::Absorbing(h) = r {
                    let taken = std::mem::replace(h, Shake128::default());
                    *r = Shake128Reader::Squeezing(taken.finalize_xof());
                }
                if let Shake128Reader::Squeezing(reader) = r {
                    reader.read(out);
                }
            }
            Xof::Shake256(r) => {
                if let Shake256Reader::Absorbing(h) = r {
                    let taken = std::mem::replace(h, Shake256::default());
                    *r = Shake256Reader::Squeezing(taken.finalize_xof());
                }
                if let Shake256Reader::Squeezing(reader) = r {
                    reader.read(out);
                }
            }
        }
    }
}

/// One-shot SHAKE256, producing exactly `N` bytes. Used for `H`, `G`, and
/// the fixed-length derivations in keygen/sign/verify.
pub fn shake256_once<const N: usize>(parts: &[&[u8]]) -> [u8; N] {
    let mut h = Shake256::default();
    for part in parts {
        h.update(part);
    }
    let mut reader = h.finalize_xof();
    let mut out = [0u8; N];
    reader.read(&mut out);
    out
}

/// One-shot SHAKE256 into a caller-sized buffer.
pub fn shake256_into(parts: &[&[u8]], out: &mut [u8]) {
    let mut h = Shake256::default();
    for part in parts {
        h.update(part);
    }
    let mut reader = h.finalize_xof();
    reader.read(out);
}
