//! Vectors of polynomials and the public matrix A

use crate::dilithium::{params::*, poly::Poly, sampling};
use zeroize::Zeroize;

/// Fixed-length vector of polynomials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyVec<const M: usize> {
    /// Components
    pub polys: [Poly; M],
}

/// Vector of length L (s1, y, z)
pub type PolyVecL = PolyVec<L>;

/// Vector of length K (s2, t, w, hint)
pub type PolyVecK = PolyVec<K>;

impl<const M: usize> Default for PolyVec<M> {
    fn default() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::zero()),
        }
    }
}

impl<const M: usize> Zeroize for PolyVec<M> {
    fn zeroize(&mut self) {
        self.polys.iter_mut().for_each(Zeroize::zeroize);
    }
}

impl<const M: usize> PolyVec<M> {
    /// Zero vector
    pub fn zero() -> Self {
        Self::default()
    }

    /// Forward NTT of every component
    pub fn ntt(&mut self) {
        self.polys.iter_mut().for_each(Poly::ntt);
    }

    /// Inverse NTT of every component
    pub fn invntt_tomont(&mut self) {
        self.polys.iter_mut().for_each(Poly::invntt_tomont);
    }

    /// Reduce every coefficient
    pub fn reduce(&mut self) {
        self.polys.iter_mut().for_each(Poly::reduce);
    }

    /// Add q to negative coefficients
    pub fn caddq(&mut self) {
        self.polys.iter_mut().for_each(Poly::caddq);
    }

    /// Component-wise addition
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.add_assign(b);
        }
    }

    /// Component-wise subtraction
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.sub_assign(b);
        }
    }

    /// Multiply every component by 2^D
    pub fn shiftl(&mut self) {
        self.polys.iter_mut().for_each(Poly::shiftl);
    }

    /// Multiply every NTT-domain component by the NTT-domain polynomial `c`
    pub fn scale_montgomery(&self, c: &Poly) -> Self {
        Self {
            polys: core::array::from_fn(|i| c.pointwise_montgomery(&self.polys[i])),
        }
    }

    /// True if any component has a coefficient with absolute value >= `bound`
    pub fn exceeds_norm(&self, bound: i32) -> bool {
        self.polys.iter().any(|p| p.exceeds_norm(bound))
    }
}

/// Public matrix A, stored in the NTT domain
#[derive(Debug, Clone)]
pub struct Matrix {
    /// Rows A[i] = (A[i][0], ..., A[i][L-1])
    pub rows: [PolyVecL; K],
}

impl Matrix {
    /// Expand A from the public seed ρ
    pub fn expand(rho: &[u8; RHO_BYTES]) -> Self {
        Self {
            rows: core::array::from_fn(|i| PolyVecL {
                polys: core::array::from_fn(|j| {
                    sampling::uniform_poly(rho, ((i as u16) << 8) | j as u16)
                }),
            }),
        }
    }

    /// A·v for an NTT-domain vector `v`; the result stays in the NTT domain
    pub fn mul_vec(&self, v: &PolyVecL) -> PolyVecK {
        PolyVecK {
            polys: core::array::from_fn(|i| {
                let row = &self.rows[i];
                let mut acc = row.polys[0].pointwise_montgomery(&v.polys[0]);
                for j in 1..L {
                    acc.add_assign(&row.polys[j].pointwise_montgomery(&v.polys[j]));
                }
                acc
            }),
        }
    }
}
