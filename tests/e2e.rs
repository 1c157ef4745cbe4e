//! End-to-end keygen/sign/verify regression across all three parameter
//! sets, grounded in the teacher's `deterministic.rs`/`fuzz.rs` style
//! (seeded keypair, sign, verify, then tamper-and-expect-failure) but
//! exercised against the real ML-DSA algorithm rather than Falcon/Dilithium2.

use mldsa_core::{keygen, sign, verify, MlDsaLevel};

const LEVELS: [MlDsaLevel; 3] = [MlDsaLevel::MlDsa44, MlDsaLevel::MlDsa65, MlDsaLevel::MlDsa87];

fn expected_sizes(level: MlDsaLevel) -> (usize, usize, usize) {
    match level {
        MlDsaLevel::MlDsa44 => (1312, 2560, 2420),
        MlDsaLevel::MlDsa65 => (1952, 4032, 3309),
        MlDsaLevel::MlDsa87 => (2592, 4896, 4627),
    }
}

#[test]
fn keygen_sign_verify_roundtrips_for_every_level() {
    for level in LEVELS {
        let seed = [0x42u8; 32];
        let (pk, sk) = keygen(level, &seed).unwrap();
        let (pk_len, sk_len, sig_len) = expected_sizes(level);
        assert_eq!(pk.len(), pk_len);
        assert_eq!(sk.len(), sk_len);

        let msg = b"the quick brown fox jumps over the lazy dog";
        let rnd = [0u8; 32];
        let sig = sign(level, &sk, msg, &rnd).unwrap();
        assert_eq!(sig.len(), sig_len);
        assert!(verify(level, &pk, msg, &sig));
    }
}

#[test]
fn keygen_is_deterministic_across_calls() {
    for level in LEVELS {
        let seed = [0x17u8; 32];
        let (pk1, sk1) = keygen(level, &seed).unwrap();
        let (pk2, sk2) = keygen(level, &seed).unwrap();
        assert_eq!(pk1, pk2);
        assert_eq!(sk1, sk2);
    }
}

#[test]
fn sign_is_deterministic_for_fixed_rnd() {
    let seed = [0x9au8; 32];
    let (_pk, sk) = keygen(MlDsaLevel::MlDsa65, &seed).unwrap();
    let msg = b"deterministic signing";
    let rnd = [0u8; 32];
    let sig1 = sign(MlDsaLevel::MlDsa65, &sk, msg, &rnd).unwrap();
    let sig2 = sign(MlDsaLevel::MlDsa65, &sk, msg, &rnd).unwrap();
    assert_eq!(sig1, sig2);
}

#[test]
fn hedged_signing_with_distinct_rnd_still_verifies() {
    let seed = [0x5cu8; 32];
    let (pk, sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
    let msg = b"hedged";
    let sig_a = sign(MlDsaLevel::MlDsa44, &sk, msg, &[1u8; 32]).unwrap();
    let sig_b = sign(MlDsaLevel::MlDsa44, &sk, msg, &[2u8; 32]).unwrap();
    assert_ne!(sig_a, sig_b);
    assert!(verify(MlDsaLevel::MlDsa44, &pk, msg, &sig_a));
    assert!(verify(MlDsaLevel::MlDsa44, &pk, msg, &sig_b));
}

#[test]
fn single_bit_flip_in_message_is_rejected() {
    let seed = [0x11u8; 32];
    let (pk, sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
    let rnd = [0u8; 32];
    let sig = sign(MlDsaLevel::MlDsa44, &sk, b"test message", &rnd).unwrap();
    assert!(!verify(MlDsaLevel::MlDsa44, &pk, b"test messagE", &sig));
}

#[test]
fn single_bit_flip_in_signature_is_rejected() {
    let seed = [0x22u8; 32];
    let (pk, sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
    let rnd = [0u8; 32];
    let msg = b"flip the sig";
    for byte_idx in [0usize, 100, 2419] {
        let mut sig = sign(MlDsaLevel::MlDsa44, &sk, msg, &rnd).unwrap();
        sig[byte_idx] ^= 0x01;
        assert!(!verify(MlDsaLevel::MlDsa44, &pk, msg, &sig), "byte {byte_idx} flip not detected");
    }
}

#[test]
fn single_bit_flip_in_public_key_is_rejected() {
    let seed = [0x33u8; 32];
    let (pk, sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
    let rnd = [0u8; 32];
    let msg = b"flip the key";
    let sig = sign(MlDsaLevel::MlDsa44, &sk, msg, &rnd).unwrap();
    let mut bad_pk = pk;
    bad_pk[5] ^= 0x01;
    assert!(!verify(MlDsaLevel::MlDsa44, &bad_pk, msg, &sig));
}

#[test]
fn empty_message_signs_and_verifies() {
    let seed = [0x44u8; 32];
    let (pk, sk) = keygen(MlDsaLevel::MlDsa65, &seed).unwrap();
    let rnd = [0u8; 32];
    let sig = sign(MlDsaLevel::MlDsa65, &sk, b"", &rnd).unwrap();
    assert!(verify(MlDsaLevel::MlDsa65, &pk, b"", &sig));
}

#[test]
fn one_mebibyte_message_signs_and_verifies() {
    let seed = [0x55u8; 32];
    let (pk, sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
    let rnd = [0u8; 32];
    let msg = vec![0xABu8; 1 << 20];
    let sig = sign(MlDsaLevel::MlDsa44, &sk, &msg, &rnd).unwrap();
    assert!(verify(MlDsaLevel::MlDsa44, &pk, &msg, &sig));
}

#[test]
fn keygen_rejects_non_32_byte_seed() {
    assert!(keygen(MlDsaLevel::MlDsa44, &[0u8; 16]).is_err());
    assert!(keygen(MlDsaLevel::MlDsa44, &[0u8; 33]).is_err());
}

#[test]
fn sign_rejects_non_32_byte_rnd() {
    let seed = [0x66u8; 32];
    let (_pk, sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
    assert!(sign(MlDsaLevel::MlDsa44, &sk, b"msg", &[0u8; 16]).is_err());
}

#[test]
fn sign_rejects_truncated_sk() {
    let seed = [0x77u8; 32];
    let (_pk, sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
    assert!(sign(MlDsaLevel::MlDsa44, &sk[..sk.len() - 1], b"msg", &[0u8; 32]).is_err());
}

#[test]
fn verify_returns_false_rather_than_panicking_on_garbage_input() {
    assert!(!verify(MlDsaLevel::MlDsa44, &[0u8; 3], b"msg", &[0u8; 3]));
    assert!(!verify(MlDsaLevel::MlDsa87, &vec![0xFFu8; 2592], b"msg", &vec![0u8; 4627]));
}

#[test]
fn cross_level_pk_and_signature_do_not_verify() {
    // A `ML-DSA-65` signature decoded under the `ML-DSA-44` size table
    // simply fails the size check in `sig_decode`, returning `false`.
    let seed = [0x88u8; 32];
    let (pk44, _sk44) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
    let (_pk65, sk65) = keygen(MlDsaLevel::MlDsa65, &seed).unwrap();
    let sig65 = sign(MlDsaLevel::MlDsa65, &sk65, b"msg", &[0u8; 32]).unwrap();
    assert!(!verify(MlDsaLevel::MlDsa44, &pk44, b"msg", &sig65));
}
