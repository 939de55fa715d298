//! Property-based tests for key generation, signing and verification

use dilithium_bridge::{
    dilithium::params::{PUBLIC_KEY_BYTES, SIGNATURE_BYTES},
    keypair_from_seed, keypair_with_entropy, sign, verify, EntropySource, Error, InputKind,
    Result,
};
use proptest::prelude::*;

/// Entropy source that always fails
struct FailingEntropy;

impl EntropySource for FailingEntropy {
    fn fill(&mut self, _dest: &mut [u8]) -> Result<()> {
        Err(Error::EntropyFailure)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn seeded_keypair_is_deterministic(seed in any::<[u8; 32]>()) {
        let (pk1, sk1) = keypair_from_seed(&seed).unwrap();
        let (pk2, sk2) = keypair_from_seed(&seed).unwrap();
        prop_assert_eq!(pk1, pk2);
        prop_assert!(sk1 == sk2);
    }

    #[test]
    fn sign_then_verify(
        seed in any::<[u8; 32]>(),
        message in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        let (pk, sk) = keypair_from_seed(&seed).unwrap();
        let sig = sign(&message, &sk).unwrap();
        prop_assert!(verify(sig.as_bytes(), &message, pk.as_bytes()));
    }

    #[test]
    fn distinct_seeds_give_distinct_keys(
        a in any::<[u8; 32]>(),
        b in any::<[u8; 32]>()
    ) {
        prop_assume!(a != b);
        let (pk_a, sk_a) = keypair_from_seed(&a).unwrap();
        let (pk_b, sk_b) = keypair_from_seed(&b).unwrap();
        prop_assert_ne!(pk_a, pk_b);
        prop_assert!(sk_a != sk_b);
    }

    #[test]
    fn signature_bit_flip_is_rejected(
        bit in 0..SIGNATURE_BYTES * 8,
        message in prop::collection::vec(any::<u8>(), 1..64)
    ) {
        let (pk, sk) = keypair_from_seed(&[0x42u8; 32]).unwrap();
        let sig = sign(&message, &sk).unwrap();

        let mut tampered = *sig.as_bytes();
        tampered[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!verify(&tampered, &message, pk.as_bytes()));
    }

    #[test]
    fn message_bit_flip_is_rejected(
        message in prop::collection::vec(any::<u8>(), 1..64),
        bit in any::<prop::sample::Index>()
    ) {
        let (pk, sk) = keypair_from_seed(&[0x43u8; 32]).unwrap();
        let sig = sign(&message, &sk).unwrap();

        let mut tampered = message.clone();
        let bit = bit.index(message.len() * 8);
        tampered[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!verify(sig.as_bytes(), &tampered, pk.as_bytes()));
    }

    #[test]
    fn public_key_bit_flip_is_rejected(bit in 0..PUBLIC_KEY_BYTES * 8) {
        let (pk, sk) = keypair_from_seed(&[0x44u8; 32]).unwrap();
        let sig = sign(b"tamper", &sk).unwrap();

        let mut tampered = *pk.as_bytes();
        tampered[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!verify(sig.as_bytes(), b"tamper", &tampered));
    }
}

proptest! {
    #[test]
    fn wrong_lengths_never_verify(
        sig in prop::collection::vec(any::<u8>(), 0..SIGNATURE_BYTES + 64),
        pk in prop::collection::vec(any::<u8>(), 0..PUBLIC_KEY_BYTES + 64),
        message in prop::collection::vec(any::<u8>(), 0..32)
    ) {
        prop_assume!(sig.len() != SIGNATURE_BYTES || pk.len() != PUBLIC_KEY_BYTES);
        prop_assert!(!verify(&sig, &message, &pk));
    }

    #[test]
    fn random_inputs_of_the_right_length_never_verify(
        sig in prop::collection::vec(any::<u8>(), SIGNATURE_BYTES),
        pk in prop::collection::vec(any::<u8>(), PUBLIC_KEY_BYTES)
    ) {
        prop_assert!(!verify(&sig, b"message", &pk));
    }

    #[test]
    fn wrong_seed_lengths_are_malformed(
        seed in prop::collection::vec(any::<u8>(), 0..64)
    ) {
        prop_assume!(seed.len() != 32);
        prop_assert_eq!(
            keypair_from_seed(&seed).err(),
            Some(Error::MalformedInput(InputKind::Seed))
        );
    }
}

#[test]
fn entropy_failure_yields_no_keys() {
    let result = keypair_with_entropy(&mut FailingEntropy);
    assert_eq!(result.err(), Some(Error::EntropyFailure));
}

#[cfg(feature = "std")]
#[test]
fn randomized_keypair_round_trip() {
    use dilithium_bridge::{keypair, sign_with_entropy};

    let (pk, sk) = keypair().unwrap();
    let sig = sign_with_entropy(b"hedged", &sk, &mut rand_core::OsRng).unwrap();
    assert!(verify(sig.as_bytes(), b"hedged", pk.as_bytes()));

    let (other_pk, _) = keypair().unwrap();
    assert_ne!(pk, other_pk);
}
