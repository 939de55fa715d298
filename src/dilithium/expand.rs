//! Seed expansion and the hash functions used by the scheme
//!
//! All hashing goes through SHAKE-128/256. The key generation seed is expanded
//! with a single absorb-then-squeeze pass over `seed || K || L`; the trailing
//! dimension bytes separate Dilithium3 seeds from other parameter sets.

use crate::dilithium::params::*;
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake128, Shake256,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secrets derived from a key generation seed
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SeedMaterial {
    /// Public randomness for the matrix A
    pub rho: [u8; RHO_BYTES],
    /// Secret randomness for s1 and s2
    pub rho_prime: [u8; CRH_BYTES],
    /// Signing key K
    pub key: [u8; RHO_BYTES],
}

impl SeedMaterial {
    /// Expand a seed into (ρ, ρ′, K)
    pub fn expand(seed: &[u8; SEED_BYTES]) -> Self {
        let mut buf = [0u8; RHO_BYTES + CRH_BYTES + RHO_BYTES];
        shake256(&[seed, &[K as u8, L as u8]], &mut buf);

        let mut material = Self {
            rho: [0u8; RHO_BYTES],
            rho_prime: [0u8; CRH_BYTES],
            key: [0u8; RHO_BYTES],
        };
        material.rho.copy_from_slice(&buf[..RHO_BYTES]);
        material
            .rho_prime
            .copy_from_slice(&buf[RHO_BYTES..RHO_BYTES + CRH_BYTES]);
        material.key.copy_from_slice(&buf[RHO_BYTES + CRH_BYTES..]);

        buf.zeroize();
        material
    }
}

impl core::fmt::Debug for SeedMaterial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeedMaterial").finish_non_exhaustive()
    }
}

/// SHAKE256 over the concatenation of `parts`, filling `out`
pub fn shake256(parts: &[&[u8]], out: &mut [u8]) {
    let mut reader = shake256_reader(parts);
    reader.read(out);
}

/// SHAKE256 stream over the concatenation of `parts`
pub fn shake256_reader(parts: &[&[u8]]) -> impl XofReader {
    let mut hasher = Shake256::default();
    for part in parts {
        Update::update(&mut hasher, part);
    }
    ExtendableOutput::finalize_xof(hasher)
}

/// SHAKE128 stream over the concatenation of `parts`
pub fn shake128_reader(parts: &[&[u8]]) -> impl XofReader {
    let mut hasher = Shake128::default();
    for part in parts {
        Update::update(&mut hasher, part);
    }
    ExtendableOutput::finalize_xof(hasher)
}

/// tr = H(pk), bound into every signature
pub fn public_key_hash(public_key: &[u8]) -> [u8; TR_BYTES] {
    let mut tr = [0u8; TR_BYTES];
    shake256(&[public_key], &mut tr);
    tr
}

/// μ = H(tr || M)
pub fn message_representative(tr: &[u8; TR_BYTES], message: &[u8]) -> [u8; CRH_BYTES] {
    let mut mu = [0u8; CRH_BYTES];
    shake256(&[tr, message], &mut mu);
    mu
}

/// ρ″ = H(K || rnd || μ), the seed of the masking vectors
pub fn masking_seed(
    key: &[u8; RHO_BYTES],
    rnd: &[u8; RHO_BYTES],
    mu: &[u8; CRH_BYTES],
) -> [u8; CRH_BYTES] {
    let mut rho_pp = [0u8; CRH_BYTES];
    shake256(&[key, rnd, mu], &mut rho_pp);
    rho_pp
}

/// c̃ = H(μ || w1)
pub fn challenge_seed(mu: &[u8; CRH_BYTES], w1_packed: &[u8]) -> [u8; CTILDE_BYTES] {
    let mut c_tilde = [0u8; CTILDE_BYTES];
    shake256(&[mu, w1_packed], &mut c_tilde);
    c_tilde
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_expansion_is_deterministic() {
        let seed = [0x5au8; SEED_BYTES];
        let a = SeedMaterial::expand(&seed);
        let b = SeedMaterial::expand(&seed);

        assert_eq!(a.rho, b.rho);
        assert_eq!(a.rho_prime, b.rho_prime);
        assert_eq!(a.key, b.key);

        let c = SeedMaterial::expand(&[0x5bu8; SEED_BYTES]);
        assert_ne!(a.rho, c.rho);
        assert_ne!(a.key, c.key);
    }

    #[test]
    fn test_zero_seed_rho() {
        let material = SeedMaterial::expand(&[0u8; SEED_BYTES]);
        assert_eq!(
            hex::encode(material.rho),
            "424b2f267e58d5b3b44d71acfc6a656bb26950d57c61db1c880bcfa1feab443f"
        );
        assert_eq!(
            hex::encode(material.key),
            "4af658e8ad972c1b58addaabe70b4da655418762e51a98accf5fb3c95e1c4556"
        );
    }

    #[test]
    fn test_split_absorb_matches_concatenation() {
        let mut split = [0u8; 64];
        let mut joined = [0u8; 64];
        shake256(&[b"ab", b"", b"c"], &mut split);
        shake256(&[b"abc"], &mut joined);
        assert_eq!(split, joined);
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_debug_hides_secrets() {
        let material = SeedMaterial::expand(&[1u8; SEED_BYTES]);
        let printed = format!("{:?}", material);
        assert!(!printed.contains("rho"));
    }
}
