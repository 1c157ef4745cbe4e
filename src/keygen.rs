//! FIPS 204 Algorithm 1 (spec §4.8).
//!
//! The teacher's `pqcrypto_native/src/algorithms/mldsa.rs::keygen()` is
//! present but computes `t = A·s1 + q·s2` (a formula that is simply
//! wrong — `q·s2` vanishes mod `q`) and never calls `Power2Round`.
//! Replaced here with the spec's five-step derivation, keeping the
//! teacher's overall "expand seed, sample secrets, pack" shape.

use crate::encoding::{pk_encode, sk_encode};
use crate::error::{Error, Result};
use crate::keccak::{shake256_into, shake256_once};
use crate::params::{MlDsaLevel, RHOP_BYTES, SEED_BYTES, TR_BYTES};
use crate::poly::PolyVec;
use crate::rounding::power2round_vec;
use crate::sampling::{expand_a, expand_s};

/// Deterministically derives `(pk_bytes, sk_bytes)` from a 32-byte seed.
pub fn keygen(level: MlDsaLevel, seed: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    if seed.len() != SEED_BYTES {
        return Err(Error::InvalidParameter);
    }
    let params = level.params();

    let mut expanded = [0u8; SEED_BYTES + RHOP_BYTES + SEED_BYTES];
    shake256_into(&[seed, &[params.k as u8], &[params.l as u8]], &mut expanded);
    let mut rho = [0u8; SEED_BYTES];
    let mut rhop = [0u8; RHOP_BYTES];
    let mut k_seed = [0u8; SEED_BYTES];
    rho.copy_from_slice(&expanded[..SEED_BYTES]);
    rhop.copy_from_slice(&expanded[SEED_BYTES..SEED_BYTES + RHOP_BYTES]);
    k_seed.copy_from_slice(&expanded[SEED_BYTES + RHOP_BYTES..]);

    let a = expand_a(&rho, params.k, params.l);
    let s1 = expand_s(&rhop, 0, params.l, params.eta);
    let s2 = expand_s(&rhop, params.l as u16, params.k, params.eta);

    let mut s1_ntt = s1.clone();
    s1_ntt.ntt();
    let mut t_ntt = PolyVec::matrix_mul(&a, &s1_ntt);
    t_ntt.intt();
    let t = t_ntt.add(&s2);

    let (t1, t0) = power2round_vec(&t);

    let pk = pk_encode(params, &rho, &t1);
    let tr: [u8; TR_BYTES] = shake256_once(&[&pk]);
    let sk = sk_encode(params, &rho, &k_seed, &tr, &s1, &s2, &t0);

    Ok((pk, sk))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keygen_is_deterministic() {
        let seed = [42u8; SEED_BYTES];
        let (pk1, sk1) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
        let (pk2, sk2) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
        assert_eq!(pk1, pk2);
        assert_eq!(sk1, sk2);
    }

    #[test]
    fn keygen_sizes_match_params() {
        for (level, pk_len, sk_len) in [
            (MlDsaLevel::MlDsa44, 1312, 2560),
            (MlDsaLevel::MlDsa65, 1952, 4032),
            (MlDsaLevel::MlDsa87, 2592, 4896),
        ] {
            let seed = [7u8; SEED_BYTES];
            let (pk, sk) = keygen(level, &seed).unwrap();
            assert_eq!(pk.len(), pk_len);
            assert_eq!(sk.len(), sk_len);
        }
    }

    #[test]
    fn keygen_rejects_wrong_seed_length() {
        assert!(keygen(MlDsaLevel::MlDsa44, &[0u8; 31]).is_err());
    }

    #[test]
    fn known_answer_seed_1_pk_prefix() {
        let seed = hex_decode("D71361C000F9A7BC99DFB425BCB6BB27C32C36AB444FF3708B2D93B4E66D5B5B");
        let (pk, _sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
        assert_eq!(pk.len(), 1312);
        let expected_rho =
            hex_decode("B845FA2881407A59183071629B08223128116014FB58FF6BB4C8C9FE19CF5B0B");
        assert_eq!(&pk[..32], &expected_rho[..]);
    }

    #[test]
    fn known_answer_seed_2_pk_prefix() {
        let seed = hex_decode("AB611F971C44D1B755D289E0FCFEE70F0EB5D9FDFB1BC31CA894A75794235AF8");
        let (pk, _sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
        let expected_rho =
            hex_decode("D712599A161ECD99EF5B7A04313D5507D612565F03AA9695ED7C2DF1CFA18056");
        assert_eq!(&pk[..32], &expected_rho[..]);
    }

    fn hex_decode(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }
}
