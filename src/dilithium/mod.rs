//! CRYSTALS-Dilithium3 implementation
//!
//! This module provides key generation, signing and verification for the
//! Dilithium lattice signature scheme at NIST security level 3, together with
//! the ring arithmetic, sampling and encodings it is built from.

pub mod params;
pub mod poly;
pub mod polyvec;
pub mod expand;
pub mod sampling;
pub mod rounding;
pub mod packing;
pub mod entropy;
pub mod keys;
pub mod keypair;
pub mod signature;
pub mod verification;

// Re-export key types and functions
pub use params::{DilithiumParams, DILITHIUM3};
pub use entropy::{EntropySource, HostEntropy};
pub use keys::{PublicKey, SecretKey, Seed, Signature};
pub use keypair::{derive_keypair, keypair, keypair_from_seed, keypair_with_entropy};
pub use signature::{sign, sign_with_entropy};
pub use verification::{batch_verify, verify, verify_detailed, VerificationError};
