//! Buffer-oriented entry points for foreign hosts
//!
//! These mirror the shape of a C/WebAssembly export table: inputs are byte
//! slices, outputs are written into caller-owned buffers, and the return value
//! is an integer status. `0` means success; failures return [`Error::code`].
//! Output buffers may be longer than required; only the leading bytes are
//! written, and nothing is written when the call fails.

use crate::dilithium::{
    self,
    entropy::{EntropySource, HostEntropy},
    params::{PUBLIC_KEY_BYTES, SECRET_KEY_BYTES, SIGNATURE_BYTES},
    PublicKey, SecretKey,
};
use crate::{Error, InputKind, Result};

/// Status returned on success
pub const STATUS_OK: i32 = 0;

/// Status returned by [`dilithium3_verify`] for a signature that does not verify
pub const STATUS_INVALID_SIGNATURE: i32 = -1;

fn status(result: Result<()>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(err) => {
            log::debug!("bridge call failed: {}", err);
            err.code()
        }
    }
}

fn check_key_buffers(pk_out: &[u8], sk_out: &[u8]) -> Result<()> {
    if pk_out.len() < PUBLIC_KEY_BYTES || sk_out.len() < SECRET_KEY_BYTES {
        return Err(Error::MalformedInput(InputKind::OutputBuffer));
    }
    Ok(())
}

fn keypair_into<E: EntropySource + ?Sized>(
    pk_out: &mut [u8],
    sk_out: &mut [u8],
    entropy: &mut E,
) -> Result<()> {
    check_key_buffers(pk_out, sk_out)?;
    let (pk, sk) = dilithium::keypair_with_entropy(entropy)?;
    write_keys(&pk, &sk, pk_out, sk_out);
    Ok(())
}

fn keypair_from_seed_into(pk_out: &mut [u8], sk_out: &mut [u8], seed: &[u8]) -> Result<()> {
    check_key_buffers(pk_out, sk_out)?;
    let (pk, sk) = dilithium::keypair_from_seed(seed)?;
    write_keys(&pk, &sk, pk_out, sk_out);
    Ok(())
}

fn sign_into(
    sig_out: &mut [u8],
    sig_len: &mut usize,
    message: &[u8],
    secret_key: &[u8],
) -> Result<()> {
    if sig_out.len() < SIGNATURE_BYTES {
        return Err(Error::MalformedInput(InputKind::OutputBuffer));
    }
    let sk = SecretKey::from_bytes(secret_key)?;
    let signature = dilithium::sign(message, &sk)?;

    sig_out[..SIGNATURE_BYTES].copy_from_slice(signature.as_bytes());
    *sig_len = signature.len();
    Ok(())
}

fn write_keys(pk: &PublicKey, sk: &SecretKey, pk_out: &mut [u8], sk_out: &mut [u8]) {
    pk_out[..PUBLIC_KEY_BYTES].copy_from_slice(pk.as_bytes());
    sk_out[..SECRET_KEY_BYTES].copy_from_slice(sk.as_bytes());
}

/// Randomized key generation from the host entropy source
pub fn dilithium3_keypair(pk_out: &mut [u8], sk_out: &mut [u8]) -> i32 {
    status(keypair_into(pk_out, sk_out, &mut HostEntropy))
}

/// Randomized key generation from a caller-supplied entropy source
pub fn dilithium3_keypair_with_entropy<E: EntropySource + ?Sized>(
    pk_out: &mut [u8],
    sk_out: &mut [u8],
    entropy: &mut E,
) -> i32 {
    status(keypair_into(pk_out, sk_out, entropy))
}

/// Deterministic key generation from a 32-byte seed
pub fn dilithium3_keypair_from_seed(pk_out: &mut [u8], sk_out: &mut [u8], seed: &[u8]) -> i32 {
    status(keypair_from_seed_into(pk_out, sk_out, seed))
}

/// Deterministically sign `message`, writing the signature into `sig_out` and
/// its length into `sig_len`
pub fn dilithium3_sign(
    sig_out: &mut [u8],
    sig_len: &mut usize,
    message: &[u8],
    secret_key: &[u8],
) -> i32 {
    status(sign_into(sig_out, sig_len, message, secret_key))
}

/// Verify a signature. Returns [`STATUS_OK`] if it is valid and
/// [`STATUS_INVALID_SIGNATURE`] for anything else, including malformed input.
pub fn dilithium3_verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> i32 {
    if dilithium::verify(signature, message, public_key) {
        STATUS_OK
    } else {
        STATUS_INVALID_SIGNATURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::{CryptoRng, RngCore};

    struct FailingHost;

    impl EntropySource for FailingHost {
        fn fill(&mut self, _dest: &mut [u8]) -> Result<()> {
            Err(Error::EntropyFailure)
        }
    }

    /// Deterministic counter generator, good enough for exercising the plumbing
    struct CounterRng(u8);

    impl RngCore for CounterRng {
        fn next_u32(&mut self) -> u32 {
            rand_core::impls::next_u32_via_fill(self)
        }

        fn next_u64(&mut self) -> u64 {
            rand_core::impls::next_u64_via_fill(self)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for b in dest.iter_mut() {
                self.0 = self.0.wrapping_add(1);
                *b = self.0;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for CounterRng {}

    #[test]
    fn test_seeded_round_trip() {
        let mut pk = [0u8; PUBLIC_KEY_BYTES];
        let mut sk = [0u8; SECRET_KEY_BYTES];
        assert_eq!(dilithium3_keypair_from_seed(&mut pk, &mut sk, &[0u8; 32]), STATUS_OK);

        let mut sig = [0u8; SIGNATURE_BYTES];
        let mut sig_len = 0;
        assert_eq!(dilithium3_sign(&mut sig, &mut sig_len, b"abc", &sk), STATUS_OK);
        assert_eq!(sig_len, SIGNATURE_BYTES);

        assert_eq!(dilithium3_verify(&sig[..sig_len], b"abc", &pk), STATUS_OK);
        assert_eq!(dilithium3_verify(&sig[..sig_len], b"abd", &pk), STATUS_INVALID_SIGNATURE);
    }

    #[test]
    fn test_entropy_failure_writes_nothing() {
        let mut pk = [0u8; PUBLIC_KEY_BYTES];
        let mut sk = [0u8; SECRET_KEY_BYTES];
        let code = dilithium3_keypair_with_entropy(&mut pk, &mut sk, &mut FailingHost);

        assert_eq!(code, Error::EntropyFailure.code());
        assert!(pk.iter().all(|&b| b == 0));
        assert!(sk.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_keypair_with_rng() {
        let mut pk = [0u8; PUBLIC_KEY_BYTES];
        let mut sk = [0u8; SECRET_KEY_BYTES];
        assert_eq!(
            dilithium3_keypair_with_entropy(&mut pk, &mut sk, &mut CounterRng(0)),
            STATUS_OK
        );

        // The counter generator yields seed bytes 1..=32
        let mut seed = [0u8; 32];
        for (i, b) in seed.iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        let (expected_pk, _) = dilithium::keypair_from_seed(&seed).unwrap();
        assert_eq!(&pk[..], &expected_pk.as_bytes()[..]);
    }

    #[test]
    fn test_short_buffers_are_rejected() {
        let mut pk = [0u8; PUBLIC_KEY_BYTES - 1];
        let mut sk = [0u8; SECRET_KEY_BYTES];
        assert_eq!(
            dilithium3_keypair_from_seed(&mut pk, &mut sk, &[0u8; 32]),
            Error::MalformedInput(InputKind::OutputBuffer).code()
        );

        let mut pk = [0u8; PUBLIC_KEY_BYTES];
        assert_eq!(
            dilithium3_keypair_from_seed(&mut pk, &mut sk, &[0u8; 31]),
            Error::MalformedInput(InputKind::Seed).code()
        );

        let mut sig = [0u8; SIGNATURE_BYTES - 1];
        let mut sig_len = 0;
        assert_eq!(
            dilithium3_sign(&mut sig, &mut sig_len, b"abc", &sk),
            Error::MalformedInput(InputKind::OutputBuffer).code()
        );
        assert_eq!(sig_len, 0);

        let mut sig = [0u8; SIGNATURE_BYTES];
        assert_eq!(
            dilithium3_sign(&mut sig, &mut sig_len, b"abc", &sk[..100]),
            Error::MalformedInput(InputKind::SecretKey).code()
        );
    }

    #[test]
    fn test_verify_never_panics_on_garbage() {
        assert_eq!(dilithium3_verify(&[], b"", &[]), STATUS_INVALID_SIGNATURE);
        assert_eq!(
            dilithium3_verify(&[0xFF; SIGNATURE_BYTES], b"x", &[0xFF; PUBLIC_KEY_BYTES]),
            STATUS_INVALID_SIGNATURE
        );
    }
}
