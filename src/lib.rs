#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Dilithium Bridge: a no_std CRYSTALS-Dilithium3 signature core
//!
//! This library provides randomized and seeded key generation, signing and
//! verification for Dilithium at NIST security level 3, with the host's secure
//! random source injected through [`EntropySource`].

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod bridge;
pub mod dilithium;

// Re-export main types and functions
pub use dilithium::{
    DilithiumParams, DILITHIUM3,
    EntropySource, HostEntropy,
    PublicKey, SecretKey, Seed, Signature,
    keypair, keypair_with_entropy, keypair_from_seed,
    sign, sign_with_entropy,
    verify, verify_detailed, batch_verify, VerificationError,
};

/// Which caller-supplied buffer was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Key generation seed
    Seed,
    /// Encoded public key
    PublicKey,
    /// Encoded secret key
    SecretKey,
    /// Encoded signature
    Signature,
    /// Output buffer handed to a bridge entry point
    OutputBuffer,
}

/// Common error types for the library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The entropy source could not supply random bytes
    EntropyFailure,
    /// The signing loop ran out of attempts without producing a signature
    RejectionLoopExhausted,
    /// A caller-supplied buffer has the wrong length or an invalid encoding
    MalformedInput(InputKind),
}

impl Error {
    /// Stable status code for hosts that only see integers.
    ///
    /// `0` is reserved for success.
    pub const fn code(self) -> i32 {
        match self {
            Error::EntropyFailure => -1,
            Error::RejectionLoopExhausted => -2,
            Error::MalformedInput(InputKind::Seed) => -10,
            Error::MalformedInput(InputKind::PublicKey) => -11,
            Error::MalformedInput(InputKind::SecretKey) => -12,
            Error::MalformedInput(InputKind::Signature) => -13,
            Error::MalformedInput(InputKind::OutputBuffer) => -14,
        }
    }
}

impl core::fmt::Display for InputKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InputKind::Seed => write!(f, "seed"),
            InputKind::PublicKey => write!(f, "public key"),
            InputKind::SecretKey => write!(f, "secret key"),
            InputKind::Signature => write!(f, "signature"),
            InputKind::OutputBuffer => write!(f, "output buffer"),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::EntropyFailure => write!(f, "Entropy source failed"),
            Error::RejectionLoopExhausted => write!(f, "Signing rejection loop exhausted"),
            Error::MalformedInput(kind) => write!(f, "Malformed {}", kind),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias for operations that may fail
pub type Result<T> = core::result::Result<T, Error>;
