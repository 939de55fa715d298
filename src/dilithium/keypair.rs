//! Dilithium3 key generation
//!
//! Randomized and seeded key generation share one derivation: a seed is drawn
//! (or supplied), expanded into (ρ, ρ′, K), and the key pair is a pure function
//! of that seed.

use crate::dilithium::{
    entropy::{EntropySource, HostEntropy},
    expand::{public_key_hash, SeedMaterial},
    keys::{PublicKey, SecretKey, Seed},
    packing::{self, SecretKeyParts},
    params::*,
    polyvec::{Matrix, PolyVecK, PolyVecL},
    rounding, sampling,
};
use crate::Result;

/// Derive the key pair for `seed`.
///
/// t = A·s1 + s2 is split into (t1, t0); the public key carries ρ and t1, the
/// secret key everything needed to sign.
pub fn derive_keypair(seed: &Seed) -> (PublicKey, SecretKey) {
    let material = SeedMaterial::expand(seed.as_bytes());

    // Step 1: Expand the public matrix
    let a = Matrix::expand(&material.rho);

    // Step 2: Sample the short secrets
    let mut s1 = PolyVecL::zero();
    for (i, p) in s1.polys.iter_mut().enumerate() {
        *p = sampling::uniform_eta(&material.rho_prime, i as u16);
    }
    let mut s2 = PolyVecK::zero();
    for (i, p) in s2.polys.iter_mut().enumerate() {
        *p = sampling::uniform_eta(&material.rho_prime, (L + i) as u16);
    }

    // Step 3: t = A·s1 + s2
    let mut s1_hat = s1.clone();
    s1_hat.ntt();
    let mut t = a.mul_vec(&s1_hat);
    t.reduce();
    t.invntt_tomont();
    t.add_assign(&s2);
    t.caddq();

    // Step 4: Split t and encode
    let (t1, t0) = rounding::power2round_vec(&t);
    let public_key = packing::pack_public_key(&material.rho, &t1);

    let parts = SecretKeyParts {
        rho: material.rho,
        key: material.key,
        tr: public_key_hash(&public_key),
        s1,
        s2,
        t0,
    };
    let secret_key = packing::pack_secret_key(&parts);

    log::debug!("derived Dilithium3 key pair");

    (
        PublicKey::from_array(public_key),
        SecretKey::from_array(secret_key),
    )
}

/// Deterministic key generation from a 32-byte seed.
///
/// The same seed always yields the same key pair.
pub fn keypair_from_seed(seed: &[u8]) -> Result<(PublicKey, SecretKey)> {
    let seed = Seed::from_bytes(seed)?;
    Ok(derive_keypair(&seed))
}

/// Randomized key generation with a caller-supplied entropy source
pub fn keypair_with_entropy<E: EntropySource + ?Sized>(
    entropy: &mut E,
) -> Result<(PublicKey, SecretKey)> {
    let seed = Seed::generate(entropy)?;
    Ok(derive_keypair(&seed))
}

/// Randomized key generation using the host's secure random source
pub fn keypair() -> Result<(PublicKey, SecretKey)> {
    keypair_with_entropy(&mut HostEntropy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, InputKind};

    #[test]
    fn test_seeded_keypair_is_deterministic() {
        let (pk1, sk1) = keypair_from_seed(&[0u8; SEED_BYTES]).unwrap();
        let (pk2, sk2) = keypair_from_seed(&[0u8; SEED_BYTES]).unwrap();
        assert_eq!(pk1, pk2);
        assert_eq!(sk1, sk2);

        let (pk3, _) = keypair_from_seed(&[1u8; SEED_BYTES]).unwrap();
        assert_ne!(pk1, pk3);
    }

    #[test]
    fn test_key_layout() {
        let (pk, sk) = keypair_from_seed(&[0u8; SEED_BYTES]).unwrap();

        // Both keys start with ρ, and the secret key carries tr = H(pk)
        assert_eq!(pk.as_bytes()[..RHO_BYTES], sk.as_bytes()[..RHO_BYTES]);
        assert_eq!(
            sk.as_bytes()[2 * RHO_BYTES..2 * RHO_BYTES + TR_BYTES],
            public_key_hash(pk.as_bytes())[..]
        );

        // The secret key decodes with secrets in range
        assert!(SecretKey::from_bytes(sk.as_bytes()).is_ok());
    }

    #[test]
    fn test_keypair_equation() {
        let seed = Seed::new([0x21u8; SEED_BYTES]);
        let (pk, sk) = derive_keypair(&seed);
        let parts = packing::unpack_secret_key(sk.as_bytes()).unwrap();
        let (rho, t1) = packing::unpack_public_key(pk.as_bytes());

        // Recompute t = A·s1 + s2 and compare against t1·2^D + t0
        let a = Matrix::expand(&rho);
        let mut s1_hat = parts.s1.clone();
        s1_hat.ntt();
        let mut t = a.mul_vec(&s1_hat);
        t.reduce();
        t.invntt_tomont();
        t.add_assign(&parts.s2);
        t.caddq();

        for i in 0..K {
            for j in 0..N {
                let recombined = (t1.polys[i].coeffs[j] << D) + parts.t0.polys[i].coeffs[j];
                assert_eq!(recombined, t.polys[i].coeffs[j]);
            }
        }
    }

    #[test]
    fn test_seed_length_is_checked() {
        assert_eq!(
            keypair_from_seed(&[0u8; 16]).err(),
            Some(Error::MalformedInput(InputKind::Seed))
        );
        assert_eq!(
            keypair_from_seed(&[0u8; 33]).err(),
            Some(Error::MalformedInput(InputKind::Seed))
        );
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_randomized_keypairs_differ() {
        let (pk1, _) = keypair().unwrap();
        let (pk2, _) = keypair_with_entropy(&mut rand_core::OsRng).unwrap();
        assert_ne!(pk1, pk2);
    }
}
