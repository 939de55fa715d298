//! Polynomial arithmetic over Z_q[X]/(X^256 + 1)
//!
//! Coefficients are kept as signed 32-bit integers. Multiplication goes through
//! the number theoretic transform with Montgomery reduction (R = 2^32), the same
//! representation throughout key generation, signing and verification.

use crate::dilithium::params::*;
use zeroize::Zeroize;

/// q^(-1) mod 2^32
const QINV: i32 = 58728449;

/// 2^32 mod q, centered
pub const MONT: i32 = -4186625;

/// 512-th root of unity modulo q
const ROOT_OF_UNITY: i64 = 1753;

/// mont^2 / 256, folds the inverse-transform scaling into one Montgomery step
const INV_NTT_FACTOR: i32 = 41978;

/// Powers of the root of unity in bit-reversed order, Montgomery form, centered.
/// Entry 0 is unused by both transforms.
pub const ZETAS: [i32; N] = compute_zetas();

const fn compute_zetas() -> [i32; N] {
    let q = Q as i64;
    let mont = (1i64 << 32) % q;
    let mut zetas = [0i32; N];
    let mut i = 1;
    while i < N {
        let exp = (i as u8).reverse_bits() as u32;
        let value = (mont * mod_pow(ROOT_OF_UNITY, exp, q)) % q;
        zetas[i] = if value > q / 2 {
            (value - q) as i32
        } else {
            value as i32
        };
        i += 1;
    }
    zetas
}

/// Modular exponentiation
const fn mod_pow(base: i64, exp: u32, modulus: i64) -> i64 {
    let mut result = 1i64;
    let mut base = base % modulus;
    let mut exp = exp;

    while exp > 0 {
        if exp & 1 == 1 {
            result = (result * base) % modulus;
        }
        base = (base * base) % modulus;
        exp >>= 1;
    }

    result
}

/// Montgomery reduction: for |a| <= 2^31 * q returns r ≡ a * 2^(-32) (mod q)
/// with -q < r < q.
#[inline]
pub fn montgomery_reduce(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(QINV);
    ((a - t as i64 * Q as i64) >> 32) as i32
}

/// For a <= 2^31 - 2^22 - 1 returns r ≡ a (mod q) with -6283009 <= r <= 6283007.
#[inline]
pub fn reduce32(a: i32) -> i32 {
    let t = (a + (1 << 22)) >> 23;
    a - t * Q
}

/// Add q if the input is negative.
#[inline]
pub fn caddq(a: i32) -> i32 {
    a + ((a >> 31) & Q)
}

/// Standard representative in [0, q).
#[inline]
pub fn freeze(a: i32) -> i32 {
    caddq(reduce32(a))
}

/// Polynomial with coefficients in Z_q
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Poly {
    /// Coefficients, lowest degree first
    pub coeffs: [i32; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self { coeffs: [0; N] }
    }
}

impl core::fmt::Debug for Poly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Poly")
            .field("head", &&self.coeffs[..4])
            .finish_non_exhaustive()
    }
}

impl Poly {
    /// Zero polynomial
    pub fn zero() -> Self {
        Self::default()
    }

    /// Create polynomial from coefficient array
    pub fn from_coeffs(coeffs: [i32; N]) -> Self {
        Self { coeffs }
    }

    /// Reduce every coefficient to [-6283009, 6283007]
    pub fn reduce(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce32(*c);
        }
    }

    /// Add q to every negative coefficient
    pub fn caddq(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = caddq(*c);
        }
    }

    /// Coefficient-wise addition without reduction
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a += *b;
        }
    }

    /// Coefficient-wise subtraction without reduction
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a -= *b;
        }
    }

    /// Multiply by 2^D without reduction
    pub fn shiftl(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c <<= D;
        }
    }

    /// Forward NTT in place. Output is in bit-reversed order; no reduction
    /// beyond the Montgomery multiplications.
    pub fn ntt(&mut self) {
        let a = &mut self.coeffs;
        let mut k = 0;
        let mut len = 128;

        while len > 0 {
            let mut start = 0;
            while start < N {
                k += 1;
                let zeta = ZETAS[k] as i64;
                for j in start..start + len {
                    let t = montgomery_reduce(zeta * a[j + len] as i64);
                    a[j + len] = a[j] - t;
                    a[j] += t;
                }
                start += 2 * len;
            }
            len >>= 1;
        }
    }

    /// Inverse NTT in place, multiplying by the Montgomery factor 2^32.
    /// Input coefficients must be below q in absolute value; so are the outputs.
    pub fn invntt_tomont(&mut self) {
        let a = &mut self.coeffs;
        let mut k = N;
        let mut len = 1;

        while len < N {
            let mut start = 0;
            while start < N {
                k -= 1;
                let zeta = -(ZETAS[k] as i64);
                for j in start..start + len {
                    let t = a[j];
                    a[j] = t + a[j + len];
                    a[j + len] = t - a[j + len];
                    a[j + len] = montgomery_reduce(zeta * a[j + len] as i64);
                }
                start += 2 * len;
            }
            len <<= 1;
        }

        for c in a.iter_mut() {
            *c = montgomery_reduce(INV_NTT_FACTOR as i64 * *c as i64);
        }
    }

    /// Pointwise product of two NTT-domain polynomials, divided by 2^32
    pub fn pointwise_montgomery(&self, other: &Self) -> Self {
        let mut out = Self::zero();
        for ((o, &a), &b) in out
            .coeffs
            .iter_mut()
            .zip(self.coeffs.iter())
            .zip(other.coeffs.iter())
        {
            *o = montgomery_reduce(a as i64 * b as i64);
        }
        out
    }

    /// Check the infinity norm against `bound`.
    ///
    /// Returns `true` when some coefficient has absolute value >= `bound`.
    /// Coefficients must be reduced by [`reduce32`] first. Leaking which
    /// coefficient failed is harmless since rejected candidates are discarded,
    /// but the sign of the coefficient is not branched on.
    pub fn exceeds_norm(&self, bound: i32) -> bool {
        if bound > (Q - 1) / 8 {
            return true;
        }

        for &c in self.coeffs.iter() {
            let sign = c >> 31;
            let abs = c - (sign & (2 * c));
            if abs >= bound {
                return true;
            }
        }

        false
    }
}
