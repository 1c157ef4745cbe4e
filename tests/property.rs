//! Property-based sign/verify regression, grounded in the teacher's
//! `fuzz.rs`/`fuzz_extra.rs` stubs (random seeds/messages run through
//! keypair generation and sign/verify) but built on `proptest` instead of
//! a hand-rolled loop, and exercised against the real ML-DSA algorithm.

use mldsa_core::{keygen, sign, verify, MlDsaLevel};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn arbitrary_seed_and_message_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let (pk, sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
        let rnd = [0u8; 32];
        let sig = sign(MlDsaLevel::MlDsa44, &sk, &msg, &rnd).unwrap();
        prop_assert!(verify(MlDsaLevel::MlDsa44, &pk, &msg, &sig));
    }

    #[test]
    fn arbitrary_rnd_still_verifies(
        seed in prop::array::uniform32(any::<u8>()),
        rnd in prop::array::uniform32(any::<u8>()),
    ) {
        let (pk, sk) = keygen(MlDsaLevel::MlDsa65, &seed).unwrap();
        let msg = b"property test message";
        let sig = sign(MlDsaLevel::MlDsa65, &sk, msg, &rnd).unwrap();
        prop_assert!(verify(MlDsaLevel::MlDsa65, &pk, msg, &sig));
    }

    #[test]
    fn mutating_any_single_signature_byte_breaks_verification(
        seed in prop::array::uniform32(any::<u8>()),
        byte_idx in 0usize..2420,
        flip in 1u8..=255,
    ) {
        let (pk, sk) = keygen(MlDsaLevel::MlDsa44, &seed).unwrap();
        let msg = b"mutation target";
        let rnd = [0u8; 32];
        let mut sig = sign(MlDsaLevel::MlDsa44, &sk, msg, &rnd).unwrap();
        sig[byte_idx] ^= flip;
        prop_assert!(!verify(MlDsaLevel::MlDsa44, &pk, msg, &sig));
    }
}
