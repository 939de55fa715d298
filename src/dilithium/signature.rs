//! Dilithium3 signature generation
//!
//! Fiat-Shamir with aborts: each attempt commits to a fresh masking vector y,
//! derives the challenge from the high bits of A·y, and releases z = y + c·s1
//! only if neither z nor the low bits leak information about the secret key.

use crate::dilithium::{
    entropy::EntropySource,
    expand::{challenge_seed, masking_seed, message_representative},
    keys::{SecretKey, Signature},
    packing,
    params::*,
    polyvec::{Matrix, PolyVecL},
    rounding, sampling,
};
use crate::{Error, Result};
use zeroize::Zeroizing;

/// Why a signing attempt was thrown away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    ResponseNorm,
    LowBitsNorm,
    CarryNorm,
    TooManyHints,
}

/// Sign `message` deterministically: the same key and message always give
/// the same signature.
pub fn sign(message: &[u8], secret_key: &SecretKey) -> Result<Signature> {
    sign_internal(message, secret_key, &[0u8; RHO_BYTES], MAX_SIGN_ATTEMPTS)
}

/// Sign `message` with fresh randomness from `entropy` mixed into the masking seed
pub fn sign_with_entropy<E: EntropySource + ?Sized>(
    message: &[u8],
    secret_key: &SecretKey,
    entropy: &mut E,
) -> Result<Signature> {
    let mut rnd = Zeroizing::new([0u8; RHO_BYTES]);
    entropy.fill(&mut rnd[..])?;
    sign_internal(message, secret_key, &rnd, MAX_SIGN_ATTEMPTS)
}

pub(crate) fn sign_internal(
    message: &[u8],
    secret_key: &SecretKey,
    rnd: &[u8; RHO_BYTES],
    max_attempts: u16,
) -> Result<Signature> {
    let parts = packing::unpack_secret_key(secret_key.as_bytes())?;

    // Step 1: Bind the message to the public key and derive the mask seed
    let mu = message_representative(&parts.tr, message);
    let rho_pp = Zeroizing::new(masking_seed(&parts.key, rnd, &mu));

    // Step 2: Move the key material into the NTT domain
    let a = Matrix::expand(&parts.rho);
    let mut s1_hat = Zeroizing::new(parts.s1.clone());
    s1_hat.ntt();
    let mut s2_hat = Zeroizing::new(parts.s2.clone());
    s2_hat.ntt();
    let mut t0_hat = Zeroizing::new(parts.t0.clone());
    t0_hat.ntt();

    for attempt in 0..max_attempts {
        // Step 3: Commit to a fresh masking vector
        let y = Zeroizing::new(PolyVecL {
            polys: core::array::from_fn(|i| {
                sampling::uniform_gamma1(&rho_pp, L as u16 * attempt + i as u16)
            }),
        });

        let mut y_hat = y.clone();
        y_hat.ntt();
        let mut w = a.mul_vec(&y_hat);
        w.reduce();
        w.invntt_tomont();
        w.caddq();

        let (w1, mut w0) = rounding::decompose_vec(&w);

        // Step 4: Challenge from the commitment's high bits
        let c_tilde = challenge_seed(&mu, &packing::pack_w1_vec(&w1));
        let mut c = sampling::challenge(&c_tilde);
        c.ntt();

        // Step 5: Response and rejection checks
        let mut z = s1_hat.scale_montgomery(&c);
        z.invntt_tomont();
        z.add_assign(&y);
        z.reduce();
        if z.exceeds_norm(GAMMA1 - BETA) {
            log::trace!("signing attempt {} rejected: {:?}", attempt, Rejection::ResponseNorm);
            continue;
        }

        let mut cs2 = s2_hat.scale_montgomery(&c);
        cs2.invntt_tomont();
        w0.sub_assign(&cs2);
        w0.reduce();
        if w0.exceeds_norm(GAMMA2 - BETA) {
            log::trace!("signing attempt {} rejected: {:?}", attempt, Rejection::LowBitsNorm);
            continue;
        }

        let mut ct0 = t0_hat.scale_montgomery(&c);
        ct0.invntt_tomont();
        ct0.reduce();
        if ct0.exceeds_norm(GAMMA2) {
            log::trace!("signing attempt {} rejected: {:?}", attempt, Rejection::CarryNorm);
            continue;
        }

        w0.add_assign(&ct0);
        let (hint, ones) = rounding::make_hint_vec(&w0, &w1);
        if ones > OMEGA {
            log::trace!("signing attempt {} rejected: {:?}", attempt, Rejection::TooManyHints);
            continue;
        }

        // Step 6: Encode
        log::trace!("signature produced after {} attempts", attempt + 1);
        return Ok(Signature::from_array(packing::pack_signature(
            &c_tilde, &z, &hint,
        )));
    }

    log::warn!("signing gave up after {} attempts", max_attempts);
    Err(Error::RejectionLoopExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dilithium::{keypair::keypair_from_seed, verification::verify};

    #[test]
    fn test_sign_and_verify() {
        let (pk, sk) = keypair_from_seed(&[3u8; SEED_BYTES]).unwrap();
        let message = b"Hello, post-quantum world!";

        let signature = sign(message, &sk).unwrap();
        assert_eq!(signature.as_bytes().len(), SIGNATURE_BYTES);
        assert!(verify(signature.as_bytes(), message, pk.as_bytes()));
        assert!(!verify(signature.as_bytes(), b"Hello, classical world!", pk.as_bytes()));
    }

    #[test]
    fn test_deterministic_signing() {
        let (_, sk) = keypair_from_seed(&[4u8; SEED_BYTES]).unwrap();
        let a = sign(b"same message", &sk).unwrap();
        let b = sign(b"same message", &sk).unwrap();
        assert_eq!(a, b);

        let c = sign(b"other message", &sk).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_hedged_signing_varies_with_randomness() {
        let (pk, sk) = keypair_from_seed(&[5u8; SEED_BYTES]).unwrap();
        let message = b"hedged";

        let a = sign_internal(message, &sk, &[1u8; RHO_BYTES], MAX_SIGN_ATTEMPTS).unwrap();
        let b = sign_internal(message, &sk, &[2u8; RHO_BYTES], MAX_SIGN_ATTEMPTS).unwrap();
        assert_ne!(a, b);
        assert!(verify(a.as_bytes(), message, pk.as_bytes()));
        assert!(verify(b.as_bytes(), message, pk.as_bytes()));
    }

    #[test]
    fn test_empty_message() {
        let (pk, sk) = keypair_from_seed(&[6u8; SEED_BYTES]).unwrap();
        let signature = sign(b"", &sk).unwrap();
        assert!(verify(signature.as_bytes(), b"", pk.as_bytes()));
    }

    #[test]
    fn test_exhausted_loop_is_reported() {
        let (_, sk) = keypair_from_seed(&[7u8; SEED_BYTES]).unwrap();
        assert_eq!(
            sign_internal(b"msg", &sk, &[0u8; RHO_BYTES], 0),
            Err(Error::RejectionLoopExhausted)
        );
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_sign_with_os_entropy() {
        let (pk, sk) = keypair_from_seed(&[8u8; SEED_BYTES]).unwrap();
        let signature = sign_with_entropy(b"msg", &sk, &mut rand_core::OsRng).unwrap();
        assert!(verify(signature.as_bytes(), b"msg", pk.as_bytes()));
    }
}
