//! Pure Rust ML-DSA (FIPS 204) signature engine.
//!
//! This crate implements the cryptographic core of ML-DSA: key generation,
//! signing (Fiat-Shamir with aborts), verification, the ring arithmetic
//! (NTT + Montgomery) those depend on, the rejection-sampling XOF-driven
//! samplers, the decomposition/hint logic, and the canonical byte encodings
//! for keys and signatures, for the three standardized parameter sets
//! ML-DSA-44, ML-DSA-65, and ML-DSA-87.
//!
//! Message preparation (context-string / OID domain separation), RNG
//! acquisition, and ACVP test-harness plumbing are external collaborators
//! and are not part of this crate; callers pass already-prepared message
//! buffers and caller-supplied randomness directly.

pub mod encoding;
pub mod error;
pub mod field;
pub mod keccak;
pub mod keygen;
pub mod ntt;
pub mod params;
pub mod poly;
pub mod rounding;
pub mod sampling;
pub mod sign;
pub mod verify;

pub use error::{Error, Result};
pub use params::MlDsaLevel;

/// Deterministically generate an ML-DSA key pair (FIPS 204 Algorithm 1).
///
/// `seed` must be exactly 32 bytes. Returns `(pk_bytes, sk_bytes)` sized per
/// the chosen parameter set.
pub fn keygen(level: MlDsaLevel, seed: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    keygen::keygen(level, seed)
}

/// Sign an already-prepared message buffer with a decoded secret key
/// (FIPS 204 Algorithm 2, Fiat-Shamir with aborts).
///
/// `rnd` must be exactly 32 bytes; pass 32 zero bytes for the deterministic
/// variant, or caller-supplied randomness for hedged signing.
pub fn sign(level: MlDsaLevel, sk_bytes: &[u8], message: &[u8], rnd: &[u8]) -> Result<Vec<u8>> {
    sign::sign(level, sk_bytes, message, rnd)
}

/// Verify a signature over an already-prepared message buffer
/// (FIPS 204 Algorithm 3). Malformed `pk`/`sig` encodings return `false`
/// rather than an error, per spec.
pub fn verify(level: MlDsaLevel, pk_bytes: &[u8], message: &[u8], sig_bytes: &[u8]) -> bool {
    verify::verify(level, pk_bytes, message, sig_bytes)
}

/// Builds the plain-ML-DSA prepared message buffer `0x00 ∥ ctx_len(1) ∥ ctx
/// ∥ M` (spec.md §6). This is a test/demo convenience, not part of the
/// C1–C11 core contract: production callers own message preparation
/// themselves (§1's "application-side context/domain-separation
/// preparation" collaborator). `ctx` must be at most 255 bytes.
pub fn prepare_message(ctx: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    if ctx.len() > 255 {
        return Err(Error::InvalidParameter);
    }
    let mut out = Vec::with_capacity(2 + ctx.len() + message.len());
    out.push(0x00);
    out.push(ctx.len() as u8);
    out.extend_from_slice(ctx);
    out.extend_from_slice(message);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_message_accepts_max_context_length() {
        let ctx = vec![0u8; 255];
        let prepared = prepare_message(&ctx, b"msg").unwrap();
        assert_eq!(prepared[0], 0x00);
        assert_eq!(prepared[1], 255);
        assert_eq!(&prepared[2..257], &ctx[..]);
        assert_eq!(&prepared[257..], b"msg");
    }

    #[test]
    fn prepare_message_rejects_oversized_context() {
        let ctx = vec![0u8; 256];
        assert!(prepare_message(&ctx, b"msg").is_err());
    }

    #[test]
    fn prepared_message_signs_and_verifies() {
        let seed = [9u8; 32];
        let (pk, sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
        let prepared = prepare_message(b"example context", b"hello").unwrap();
        let rnd = [0u8; 32];
        let sig = sign(MlDsaLevel::MlDsa44, &sk, &prepared, &rnd).unwrap();
        assert!(verify(MlDsaLevel::MlDsa44, &pk, &prepared, &sig));
    }
}
