//! Dilithium3 parameter set and constants
//!
//! This module contains the lattice parameters and encoded sizes for
//! CRYSTALS-Dilithium at NIST security level 3.

/// Polynomial degree
pub const N: usize = 256;

/// Prime modulus q = 2^23 - 2^13 + 1
pub const Q: i32 = 8380417;

/// Dropped bits from t
pub const D: u32 = 13;

/// Rows of the public matrix A
pub const K: usize = 6;

/// Columns of the public matrix A
pub const L: usize = 5;

/// Secret coefficient bound
pub const ETA: i32 = 4;

/// Number of ±1 coefficients in the challenge
pub const TAU: usize = 49;

/// TAU * ETA
pub const BETA: i32 = 196;

/// Range of the masking vector y
pub const GAMMA1: i32 = 1 << 19;

/// Low-order rounding range
pub const GAMMA2: i32 = (Q - 1) / 32;

/// Maximum number of ones in the hint
pub const OMEGA: usize = 55;

/// Key generation seed length
pub const SEED_BYTES: usize = 32;

/// Length of ρ, K and the random-signing input
pub const RHO_BYTES: usize = 32;

/// Length of ρ′, ρ″ and μ
pub const CRH_BYTES: usize = 64;

/// Length of tr = H(pk)
pub const TR_BYTES: usize = 48;

/// Length of the challenge seed c̃
pub const CTILDE_BYTES: usize = 32;

/// Packed t1 polynomial (10 bits per coefficient)
pub const POLYT1_PACKED_BYTES: usize = 320;

/// Packed t0 polynomial (13 bits per coefficient)
pub const POLYT0_PACKED_BYTES: usize = 416;

/// Packed eta polynomial (4 bits per coefficient)
pub const POLYETA_PACKED_BYTES: usize = 128;

/// Packed z polynomial (20 bits per coefficient)
pub const POLYZ_PACKED_BYTES: usize = 640;

/// Packed w1 polynomial (4 bits per coefficient)
pub const POLYW1_PACKED_BYTES: usize = 128;

/// Encoded public key length
pub const PUBLIC_KEY_BYTES: usize = RHO_BYTES + K * POLYT1_PACKED_BYTES;

/// Encoded secret key length
pub const SECRET_KEY_BYTES: usize = 2 * RHO_BYTES
    + TR_BYTES
    + L * POLYETA_PACKED_BYTES
    + K * POLYETA_PACKED_BYTES
    + K * POLYT0_PACKED_BYTES;

/// Encoded signature length
pub const SIGNATURE_BYTES: usize = CTILDE_BYTES + L * POLYZ_PACKED_BYTES + OMEGA + K;

/// Maximum attempts of the signing rejection loop before giving up
pub const MAX_SIGN_ATTEMPTS: u16 = 1000;

/// Dilithium parameter set description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DilithiumParams {
    /// Human-readable name
    pub name: &'static str,
    /// NIST security category
    pub nist_level: u8,
    /// Matrix dimensions (k, l)
    pub dimensions: (usize, usize),
    /// Seed size in bytes
    pub seed_len: usize,
    /// Public key size in bytes
    pub public_key_len: usize,
    /// Secret key size in bytes
    pub secret_key_len: usize,
    /// Signature size in bytes
    pub signature_len: usize,
}

/// Dilithium3 parameter set (NIST security level 3)
pub const DILITHIUM3: DilithiumParams = DilithiumParams {
    name: "Dilithium3",
    nist_level: 3,
    dimensions: (K, L),
    seed_len: SEED_BYTES,
    public_key_len: PUBLIC_KEY_BYTES,
    secret_key_len: SECRET_KEY_BYTES,
    signature_len: SIGNATURE_BYTES,
};
