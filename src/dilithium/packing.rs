//! Byte encodings of keys and signatures
//!
//! Every field is a run of fixed-width coefficients packed least-significant bit
//! first. Signed fields are stored as offsets from their upper bound so that the
//! packed value is always non-negative.

use crate::dilithium::{
    params::*,
    poly::Poly,
    polyvec::{PolyVecK, PolyVecL},
};
use crate::{Error, InputKind};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Little-endian bit writer over a fixed output slice
struct BitWriter<'a> {
    out: &'a mut [u8],
    pos: usize,
    acc: u64,
    filled: u32,
}

impl<'a> BitWriter<'a> {
    fn new(out: &'a mut [u8]) -> Self {
        Self { out, pos: 0, acc: 0, filled: 0 }
    }

    fn write(&mut self, value: u32, bits: u32) {
        self.acc |= ((value & ((1u32 << bits) - 1)) as u64) << self.filled;
        self.filled += bits;

        while self.filled >= 8 {
            self.out[self.pos] = self.acc as u8;
            self.pos += 1;
            self.acc >>= 8;
            self.filled -= 8;
        }
    }
}

/// Little-endian bit reader over a fixed input slice
struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    acc: u64,
    filled: u32,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, acc: 0, filled: 0 }
    }

    fn read(&mut self, bits: u32) -> u32 {
        while self.filled < bits {
            self.acc |= (self.data[self.pos] as u64) << self.filled;
            self.pos += 1;
            self.filled += 8;
        }

        let value = (self.acc & ((1u64 << bits) - 1)) as u32;
        self.acc >>= bits;
        self.filled -= bits;
        value
    }
}

fn pack_poly(p: &Poly, bits: u32, out: &mut [u8], map: impl Fn(i32) -> u32) {
    let mut writer = BitWriter::new(out);
    for &c in p.coeffs.iter() {
        writer.write(map(c), bits);
    }
}

fn unpack_poly(data: &[u8], bits: u32, map: impl Fn(u32) -> i32) -> Poly {
    let mut reader = BitReader::new(data);
    let mut p = Poly::zero();
    for c in p.coeffs.iter_mut() {
        *c = map(reader.read(bits));
    }
    p
}

/// t1 coefficients in [0, 2^10)
pub fn pack_t1(p: &Poly, out: &mut [u8]) {
    pack_poly(p, 10, out, |c| c as u32);
}

/// Inverse of [`pack_t1`]
pub fn unpack_t1(data: &[u8]) -> Poly {
    unpack_poly(data, 10, |v| v as i32)
}

/// t0 coefficients in (-2^(D-1), 2^(D-1)]
pub fn pack_t0(p: &Poly, out: &mut [u8]) {
    pack_poly(p, D, out, |c| ((1 << (D - 1)) - c) as u32);
}

/// Inverse of [`pack_t0`]
pub fn unpack_t0(data: &[u8]) -> Poly {
    unpack_poly(data, D, |v| (1 << (D - 1)) - v as i32)
}

/// Secret coefficients in [-ETA, ETA]
pub fn pack_eta(p: &Poly, out: &mut [u8]) {
    pack_poly(p, 4, out, |c| (ETA - c) as u32);
}

/// Inverse of [`pack_eta`]; `None` if a nibble is outside [0, 2·ETA]
pub fn unpack_eta(data: &[u8]) -> Option<Poly> {
    let mut reader = BitReader::new(data);
    let mut p = Poly::zero();
    for c in p.coeffs.iter_mut() {
        let v = reader.read(4) as i32;
        if v > 2 * ETA {
            return None;
        }
        *c = ETA - v;
    }
    Some(p)
}

/// Response coefficients in (-GAMMA1, GAMMA1]
pub fn pack_z(p: &Poly, out: &mut [u8]) {
    pack_poly(p, 20, out, |c| (GAMMA1 - c) as u32);
}

/// Inverse of [`pack_z`]
pub fn unpack_z(data: &[u8]) -> Poly {
    unpack_poly(data, 20, |v| GAMMA1 - v as i32)
}

/// High bits of the commitment in [0, 16)
pub fn pack_w1(p: &Poly, out: &mut [u8]) {
    pack_poly(p, 4, out, |c| c as u32);
}

/// Pack all of w1 for hashing into the challenge
pub fn pack_w1_vec(w1: &PolyVecK) -> [u8; K * POLYW1_PACKED_BYTES] {
    let mut out = [0u8; K * POLYW1_PACKED_BYTES];
    for (p, chunk) in w1.polys.iter().zip(out.chunks_exact_mut(POLYW1_PACKED_BYTES)) {
        pack_w1(p, chunk);
    }
    out
}

/// Encode pk = ρ || t1
pub fn pack_public_key(rho: &[u8; RHO_BYTES], t1: &PolyVecK) -> [u8; PUBLIC_KEY_BYTES] {
    let mut pk = [0u8; PUBLIC_KEY_BYTES];
    pk[..RHO_BYTES].copy_from_slice(rho);

    for (p, chunk) in t1
        .polys
        .iter()
        .zip(pk[RHO_BYTES..].chunks_exact_mut(POLYT1_PACKED_BYTES))
    {
        pack_t1(p, chunk);
    }

    pk
}

/// Decode pk into (ρ, t1); every bit pattern is a valid public key
pub fn unpack_public_key(pk: &[u8; PUBLIC_KEY_BYTES]) -> ([u8; RHO_BYTES], PolyVecK) {
    let mut rho = [0u8; RHO_BYTES];
    rho.copy_from_slice(&pk[..RHO_BYTES]);

    let mut t1 = PolyVecK::zero();
    for (p, chunk) in t1
        .polys
        .iter_mut()
        .zip(pk[RHO_BYTES..].chunks_exact(POLYT1_PACKED_BYTES))
    {
        *p = unpack_t1(chunk);
    }

    (rho, t1)
}

/// Decoded secret key fields
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKeyParts {
    /// Public seed ρ
    pub rho: [u8; RHO_BYTES],
    /// Signing key K
    pub key: [u8; RHO_BYTES],
    /// tr = H(pk)
    pub tr: [u8; TR_BYTES],
    /// Short secret s1
    pub s1: PolyVecL,
    /// Short secret s2
    pub s2: PolyVecK,
    /// Low bits of t
    pub t0: PolyVecK,
}

const SK_KEY_OFFSET: usize = RHO_BYTES;
const SK_TR_OFFSET: usize = SK_KEY_OFFSET + RHO_BYTES;
const SK_S1_OFFSET: usize = SK_TR_OFFSET + TR_BYTES;
const SK_S2_OFFSET: usize = SK_S1_OFFSET + L * POLYETA_PACKED_BYTES;
const SK_T0_OFFSET: usize = SK_S2_OFFSET + K * POLYETA_PACKED_BYTES;

/// Encode sk = ρ || K || tr || s1 || s2 || t0
pub fn pack_secret_key(parts: &SecretKeyParts) -> [u8; SECRET_KEY_BYTES] {
    let mut sk = [0u8; SECRET_KEY_BYTES];
    sk[..SK_KEY_OFFSET].copy_from_slice(&parts.rho);
    sk[SK_KEY_OFFSET..SK_TR_OFFSET].copy_from_slice(&parts.key);
    sk[SK_TR_OFFSET..SK_S1_OFFSET].copy_from_slice(&parts.tr);

    for (p, chunk) in parts
        .s1
        .polys
        .iter()
        .zip(sk[SK_S1_OFFSET..SK_S2_OFFSET].chunks_exact_mut(POLYETA_PACKED_BYTES))
    {
        pack_eta(p, chunk);
    }
    for (p, chunk) in parts
        .s2
        .polys
        .iter()
        .zip(sk[SK_S2_OFFSET..SK_T0_OFFSET].chunks_exact_mut(POLYETA_PACKED_BYTES))
    {
        pack_eta(p, chunk);
    }
    for (p, chunk) in parts
        .t0
        .polys
        .iter()
        .zip(sk[SK_T0_OFFSET..].chunks_exact_mut(POLYT0_PACKED_BYTES))
    {
        pack_t0(p, chunk);
    }

    sk
}

/// Decode sk, rejecting secret coefficients outside [-ETA, ETA]
pub fn unpack_secret_key(sk: &[u8; SECRET_KEY_BYTES]) -> Result<SecretKeyParts, Error> {
    let malformed = Error::MalformedInput(InputKind::SecretKey);

    let mut parts = SecretKeyParts {
        rho: [0u8; RHO_BYTES],
        key: [0u8; RHO_BYTES],
        tr: [0u8; TR_BYTES],
        s1: PolyVecL::zero(),
        s2: PolyVecK::zero(),
        t0: PolyVecK::zero(),
    };
    parts.rho.copy_from_slice(&sk[..SK_KEY_OFFSET]);
    parts.key.copy_from_slice(&sk[SK_KEY_OFFSET..SK_TR_OFFSET]);
    parts.tr.copy_from_slice(&sk[SK_TR_OFFSET..SK_S1_OFFSET]);

    for (p, chunk) in parts
        .s1
        .polys
        .iter_mut()
        .zip(sk[SK_S1_OFFSET..SK_S2_OFFSET].chunks_exact(POLYETA_PACKED_BYTES))
    {
        *p = unpack_eta(chunk).ok_or(malformed)?;
    }
    for (p, chunk) in parts
        .s2
        .polys
        .iter_mut()
        .zip(sk[SK_S2_OFFSET..SK_T0_OFFSET].chunks_exact(POLYETA_PACKED_BYTES))
    {
        *p = unpack_eta(chunk).ok_or(malformed)?;
    }
    for (p, chunk) in parts
        .t0
        .polys
        .iter_mut()
        .zip(sk[SK_T0_OFFSET..].chunks_exact(POLYT0_PACKED_BYTES))
    {
        *p = unpack_t0(chunk);
    }

    Ok(parts)
}

const SIG_Z_OFFSET: usize = CTILDE_BYTES;
const SIG_HINT_OFFSET: usize = SIG_Z_OFFSET + L * POLYZ_PACKED_BYTES;

/// Encode sig = c̃ || z || hint.
///
/// The hint is stored as the positions of its ones (at most OMEGA bytes)
/// followed by one running count per polynomial. `hint` must have at most
/// OMEGA ones.
pub fn pack_signature(
    c_tilde: &[u8; CTILDE_BYTES],
    z: &PolyVecL,
    hint: &PolyVecK,
) -> [u8; SIGNATURE_BYTES] {
    let mut sig = [0u8; SIGNATURE_BYTES];
    sig[..SIG_Z_OFFSET].copy_from_slice(c_tilde);

    for (p, chunk) in z
        .polys
        .iter()
        .zip(sig[SIG_Z_OFFSET..SIG_HINT_OFFSET].chunks_exact_mut(POLYZ_PACKED_BYTES))
    {
        pack_z(p, chunk);
    }

    let hint_bytes = &mut sig[SIG_HINT_OFFSET..];
    let mut k = 0;
    for (i, p) in hint.polys.iter().enumerate() {
        for (j, &h) in p.coeffs.iter().enumerate() {
            if h != 0 {
                hint_bytes[k] = j as u8;
                k += 1;
            }
        }
        hint_bytes[OMEGA + i] = k as u8;
    }

    sig
}

/// Decoded signature fields
#[derive(Debug, Clone)]
pub struct SignatureParts {
    /// Challenge seed
    pub c_tilde: [u8; CTILDE_BYTES],
    /// Response vector
    pub z: PolyVecL,
    /// Hint vector with 0/1 coefficients
    pub hint: PolyVecK,
}

/// Decode a signature, enforcing the canonical hint encoding.
///
/// Rejects counts that decrease or exceed OMEGA, positions that are not
/// strictly increasing within a polynomial, and nonzero padding.
pub fn unpack_signature(sig: &[u8; SIGNATURE_BYTES]) -> Result<SignatureParts, Error> {
    let malformed = Error::MalformedInput(InputKind::Signature);

    let mut c_tilde = [0u8; CTILDE_BYTES];
    c_tilde.copy_from_slice(&sig[..SIG_Z_OFFSET]);

    let mut z = PolyVecL::zero();
    for (p, chunk) in z
        .polys
        .iter_mut()
        .zip(sig[SIG_Z_OFFSET..SIG_HINT_OFFSET].chunks_exact(POLYZ_PACKED_BYTES))
    {
        *p = unpack_z(chunk);
    }

    let hint_bytes = &sig[SIG_HINT_OFFSET..];
    let mut hint = PolyVecK::zero();
    let mut k = 0usize;

    for (i, p) in hint.polys.iter_mut().enumerate() {
        let end = hint_bytes[OMEGA + i] as usize;
        if end < k || end > OMEGA {
            return Err(malformed);
        }

        for j in k..end {
            if j > k && hint_bytes[j] <= hint_bytes[j - 1] {
                return Err(malformed);
            }
            p.coeffs[hint_bytes[j] as usize] = 1;
        }

        k = end;
    }

    if hint_bytes[k..OMEGA].iter().any(|&b| b != 0) {
        return Err(malformed);
    }

    Ok(SignatureParts { c_tilde, z, hint })
}
