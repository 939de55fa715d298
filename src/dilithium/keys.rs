//! Encoded key, seed and signature types
//!
//! Each type owns a fixed-size byte array in the wire encoding. Constructors
//! from untrusted slices check the length (and, for secret keys, the
//! coefficient ranges) before anything else touches the bytes.

use crate::dilithium::{entropy::EntropySource, packing, params::*};
use crate::{Error, InputKind, Result};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

fn copy_exact<const LEN: usize>(bytes: &[u8], kind: InputKind) -> Result<[u8; LEN]> {
    <[u8; LEN]>::try_from(bytes).map_err(|_| Error::MalformedInput(kind))
}

/// Key generation seed
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_BYTES]);

impl Seed {
    /// Wrap a seed
    pub const fn new(bytes: [u8; SEED_BYTES]) -> Self {
        Self(bytes)
    }

    /// Parse a seed, rejecting any length other than 32 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        copy_exact(bytes, InputKind::Seed).map(Self)
    }

    /// Draw a fresh seed from `entropy`
    pub fn generate<E: EntropySource + ?Sized>(entropy: &mut E) -> Result<Self> {
        let mut seed = Self([0u8; SEED_BYTES]);
        entropy.fill(&mut seed.0)?;
        Ok(seed)
    }

    /// Seed bytes
    pub fn as_bytes(&self) -> &[u8; SEED_BYTES] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Seed {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl core::fmt::Debug for Seed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// Encoded Dilithium3 public key: ρ || t1
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey([u8; PUBLIC_KEY_BYTES]);

impl PublicKey {
    pub(crate) fn from_array(bytes: [u8; PUBLIC_KEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Parse a public key. Any 1952-byte string decodes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        copy_exact(bytes, InputKind::PublicKey).map(Self)
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_BYTES] {
        &self.0
    }

    /// Copy into an owned vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl core::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PublicKey(")?;
        for b in &self.0[..8] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "..)")
    }
}

/// Encoded Dilithium3 secret key: ρ || K || tr || s1 || s2 || t0
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_BYTES]);

impl SecretKey {
    pub(crate) fn from_array(bytes: [u8; SECRET_KEY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Parse a secret key, rejecting wrong lengths and out-of-range secrets
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let key = Self(copy_exact(bytes, InputKind::SecretKey)?);
        packing::unpack_secret_key(&key.0)?;
        Ok(key)
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_BYTES] {
        &self.0
    }
}

impl AsRef<[u8]> for SecretKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for SecretKey {}

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// Encoded Dilithium3 signature: c̃ || z || hint
#[derive(Clone, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_BYTES]);

impl Signature {
    pub(crate) fn from_array(bytes: [u8; SIGNATURE_BYTES]) -> Self {
        Self(bytes)
    }

    /// Parse a signature of exactly 3293 bytes.
    ///
    /// Only the length is checked here; the hint encoding is checked by
    /// verification, which reports a bad encoding as a rejection.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        copy_exact(bytes, InputKind::Signature).map(Self)
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_BYTES] {
        &self.0
    }

    /// Number of encoded bytes
    pub const fn len(&self) -> usize {
        SIGNATURE_BYTES
    }

    /// Always false; present for symmetry with `len`
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Copy into an owned vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl core::fmt::Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature(")?;
        for b in &self.0[..8] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "..)")
    }
}
