//! Dilithium3 signature verification
//!
//! Verification recomputes the commitment's high bits from the public key,
//! the response and the hint, and accepts if they hash to the same challenge.
//! Malformed input of any kind is a rejection, never a panic or an error.

use crate::dilithium::{
    expand::{challenge_seed, message_representative, public_key_hash},
    packing,
    params::*,
    polyvec::Matrix,
    rounding, sampling,
};
use subtle::ConstantTimeEq;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Why a signature was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    /// Signature is not exactly 3293 bytes
    InvalidSignatureLength,
    /// Public key is not exactly 1952 bytes
    InvalidPublicKeyLength,
    /// Hint field is not in canonical form
    MalformedHint,
    /// Response z is outside (-(GAMMA1 - BETA), GAMMA1 - BETA)
    ResponseNormExceeded,
    /// Recomputed challenge differs from the one in the signature
    ChallengeMismatch,
}

impl core::fmt::Display for VerificationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            VerificationError::InvalidSignatureLength => write!(f, "Invalid signature length"),
            VerificationError::InvalidPublicKeyLength => write!(f, "Invalid public key length"),
            VerificationError::MalformedHint => write!(f, "Malformed hint encoding"),
            VerificationError::ResponseNormExceeded => write!(f, "Response norm exceeded"),
            VerificationError::ChallengeMismatch => write!(f, "Challenge mismatch"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VerificationError {}

/// Verify `signature` on `message` under `public_key`, reporting why it failed
pub fn verify_detailed(
    signature: &[u8],
    message: &[u8],
    public_key: &[u8],
) -> Result<(), VerificationError> {
    // Step 1: Fixed-size inputs only
    let signature: &[u8; SIGNATURE_BYTES] = signature
        .try_into()
        .map_err(|_| VerificationError::InvalidSignatureLength)?;
    let public_key: &[u8; PUBLIC_KEY_BYTES] = public_key
        .try_into()
        .map_err(|_| VerificationError::InvalidPublicKeyLength)?;

    // Step 2: Decode the signature and bound the response
    let sig = packing::unpack_signature(signature).map_err(|_| VerificationError::MalformedHint)?;
    if sig.z.exceeds_norm(GAMMA1 - BETA) {
        return Err(VerificationError::ResponseNormExceeded);
    }

    // Step 3: μ = H(H(pk) || M)
    let (rho, mut t1) = packing::unpack_public_key(public_key);
    let tr = public_key_hash(public_key);
    let mu = message_representative(&tr, message);

    // Step 4: w1' = UseHint(h, A·z - c·t1·2^D)
    let mut c = sampling::challenge(&sig.c_tilde);
    c.ntt();

    let a = Matrix::expand(&rho);
    let mut z_hat = sig.z.clone();
    z_hat.ntt();
    let mut w = a.mul_vec(&z_hat);

    t1.shiftl();
    t1.ntt();
    let ct1 = t1.scale_montgomery(&c);

    w.sub_assign(&ct1);
    w.reduce();
    w.invntt_tomont();
    w.caddq();

    let w1 = rounding::use_hint_vec(&w, &sig.hint);

    // Step 5: Recompute the challenge
    let c_tilde = challenge_seed(&mu, &packing::pack_w1_vec(&w1));
    if bool::from(c_tilde[..].ct_eq(&sig.c_tilde[..])) {
        Ok(())
    } else {
        Err(VerificationError::ChallengeMismatch)
    }
}

/// Verify `signature` on `message` under `public_key`.
///
/// Returns `false` for forged, tampered or malformed input.
pub fn verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
    match verify_detailed(signature, message, public_key) {
        Ok(()) => true,
        Err(reason) => {
            log::debug!("signature rejected: {}", reason);
            false
        }
    }
}

/// Verify a batch of `(signature, message, public_key)` triples.
///
/// True only if every signature verifies; an empty batch is accepted.
pub fn batch_verify(items: &[(&[u8], &[u8], &[u8])]) -> bool {
    let failures: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, (sig, msg, pk))| !verify(sig, msg, pk))
        .map(|(i, _)| i)
        .collect();

    if !failures.is_empty() {
        log::debug!("batch verification failed for items {:?}", failures);
    }

    failures.is_empty()
}
