//! Rejection sampling of uniform, short and challenge polynomials
//!
//! Every sampler reads from a SHAKE stream seeded by a fixed-length seed and a
//! two-byte little-endian nonce, so all outputs are reproducible from their seeds.

use crate::dilithium::{
    expand::{shake128_reader, shake256, shake256_reader},
    packing,
    params::*,
    poly::Poly,
};
use sha3::digest::XofReader;

/// Uniform polynomial modulo q from SHAKE128(ρ || nonce).
///
/// Candidates are three little-endian bytes with the top bit cleared and are
/// rejected unless below q.
pub fn uniform_poly(rho: &[u8; RHO_BYTES], nonce: u16) -> Poly {
    let mut reader = shake128_reader(&[rho, &nonce.to_le_bytes()]);
    let mut poly = Poly::zero();
    let mut ctr = 0;
    let mut buf = [0u8; 3];

    while ctr < N {
        reader.read(&mut buf);
        let t = (buf[0] as i32 | (buf[1] as i32) << 8 | (buf[2] as i32) << 16) & 0x7F_FFFF;
        if t < Q {
            poly.coeffs[ctr] = t;
            ctr += 1;
        }
    }

    poly
}

/// Polynomial with coefficients in [-ETA, ETA] from SHAKE256(ρ′ || nonce).
///
/// Each byte yields two 4-bit candidates; values above 2·ETA are rejected.
pub fn uniform_eta(rho_prime: &[u8; CRH_BYTES], nonce: u16) -> Poly {
    let mut reader = shake256_reader(&[rho_prime, &nonce.to_le_bytes()]);
    let mut poly = Poly::zero();
    let mut ctr = 0;
    let mut byte = [0u8; 1];

    while ctr < N {
        reader.read(&mut byte);
        let t0 = (byte[0] & 0x0F) as i32;
        let t1 = (byte[0] >> 4) as i32;

        if t0 <= 2 * ETA {
            poly.coeffs[ctr] = ETA - t0;
            ctr += 1;
        }
        if t1 <= 2 * ETA && ctr < N {
            poly.coeffs[ctr] = ETA - t1;
            ctr += 1;
        }
    }

    poly
}

/// Masking polynomial with coefficients in (-GAMMA1, GAMMA1] from SHAKE256(ρ″ || nonce)
pub fn uniform_gamma1(rho_pp: &[u8; CRH_BYTES], nonce: u16) -> Poly {
    let mut buf = [0u8; POLYZ_PACKED_BYTES];
    shake256(&[rho_pp, &nonce.to_le_bytes()], &mut buf);
    packing::unpack_z(&buf)
}

/// Challenge polynomial with exactly TAU coefficients in {-1, 1}, the rest zero.
///
/// The first eight bytes of SHAKE256(c̃) are the sign bits; the remaining stream
/// drives a Fisher-Yates style placement of the nonzero entries.
pub fn challenge(c_tilde: &[u8; CTILDE_BYTES]) -> Poly {
    let mut reader = shake256_reader(&[c_tilde]);
    let mut sign_bytes = [0u8; 8];
    reader.read(&mut sign_bytes);
    let mut signs = u64::from_le_bytes(sign_bytes);

    let mut c = Poly::zero();
    let mut byte = [0u8; 1];

    for i in N - TAU..N {
        let b = loop {
            reader.read(&mut byte);
            if (byte[0] as usize) <= i {
                break byte[0] as usize;
            }
        };

        c.coeffs[i] = c.coeffs[b];
        c.coeffs[b] = 1 - 2 * (signs & 1) as i32;
        signs >>= 1;
    }

    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_poly_range() {
        let rho = [3u8; RHO_BYTES];
        let p = uniform_poly(&rho, 0x0102);
        assert!(p.coeffs.iter().all(|&c| (0..Q).contains(&c)));
        assert_eq!(p, uniform_poly(&rho, 0x0102));
        assert_ne!(p, uniform_poly(&rho, 0x0201));
    }

    #[test]
    fn test_uniform_eta_range() {
        let seed = [9u8; CRH_BYTES];
        for nonce in 0..(K + L) as u16 {
            let p = uniform_eta(&seed, nonce);
            assert!(p.coeffs.iter().all(|&c| (-ETA..=ETA).contains(&c)));
        }
    }

    #[test]
    fn test_uniform_gamma1_range() {
        let seed = [11u8; CRH_BYTES];
        let p = uniform_gamma1(&seed, 42);
        assert!(p.coeffs.iter().all(|&c| c > -GAMMA1 && c <= GAMMA1));
    }

    #[test]
    fn test_challenge_weight() {
        for fill in 0u8..8 {
            let c = challenge(&[fill; CTILDE_BYTES]);
            let nonzero = c.coeffs.iter().filter(|&&x| x != 0).count();
            assert_eq!(nonzero, TAU);
            assert!(c.coeffs.iter().all(|&x| (-1..=1).contains(&x)));
        }
    }

    #[test]
    fn test_challenge_depends_on_seed() {
        let a = challenge(&[0u8; CTILDE_BYTES]);
        let mut seed = [0u8; CTILDE_BYTES];
        seed[31] = 1;
        let b = challenge(&seed);
        assert_ne!(a, b);
    }
}
