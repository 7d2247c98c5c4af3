//! Goldilocks prime field arithmetic (Q₂)
//!
//! p = 2^64 - 2^32 + 1. Products are reduced with the special form of the
//! prime: 2^64 ≡ 2^32 - 1 and 2^96 ≡ -1 (mod p), so a 128-bit product folds
//! back into one word with a few adds and subtracts.

use crate::errors::{CryptoError, Operation, Result};
use crate::types::{Q2_EPSILON, Q2_MODULUS};
use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// Field element in the Goldilocks field, always canonical.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Goldilocks(u64);

impl Goldilocks {
    pub const ZERO: Goldilocks = Goldilocks(0);
    pub const ONE: Goldilocks = Goldilocks(1);

    /// Create from a canonical value, rejecting values ≥ p
    pub fn new(val: u64) -> Result<Self> {
        if val >= Q2_MODULUS {
            return Err(CryptoError::range_q2(Operation::FieldConversion));
        }
        Ok(Goldilocks(val))
    }

    /// Create from any u64, reducing mod p
    pub fn from_u64_reduced(val: u64) -> Self {
        Goldilocks(canonicalize(val))
    }

    pub fn from_biguint(value: &BigUint) -> Result<Self> {
        let val = value
            .to_u64()
            .ok_or(CryptoError::range_q2(Operation::FieldConversion))?;
        Self::new(val)
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from(self.0)
    }

    /// Get the canonical u64 value
    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn square(&self) -> Self {
        *self * *self
    }

    /// Exponentiation by squaring
    pub fn pow(&self, exp: u64) -> Self {
        let mut result = Goldilocks::ONE;
        let mut base = *self;
        let mut e = exp;

        while e > 0 {
            if e & 1 == 1 {
                result *= base;
            }
            base = base.square();
            e >>= 1;
        }

        result
    }

    /// Multiplicative inverse, a^(p-2)
    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(CryptoError::NonInvertible {
                op: Operation::Inversion,
            });
        }
        Ok(self.pow(Q2_MODULUS - 2))
    }

    /// S-box used by the Goldilocks Poseidon permutation
    pub fn pow7(&self) -> Self {
        let x2 = self.square();
        let x3 = x2 * *self;
        let x6 = x3.square();
        x6 * *self
    }
}

#[inline]
fn canonicalize(x: u64) -> u64 {
    if x >= Q2_MODULUS {
        x - Q2_MODULUS
    } else {
        x
    }
}

/// Reduce a 128-bit value mod p
#[inline]
fn reduce128(x: u128) -> u64 {
    let lo = x as u64;
    let hi = (x >> 64) as u64;
    let hi_hi = hi >> 32;
    let hi_lo = hi & Q2_EPSILON;

    // lo - hi_hi·2^96 ≡ lo + hi_hi
    let (mut t0, borrow) = lo.overflowing_sub(hi_hi);
    if borrow {
        t0 = t0.wrapping_sub(Q2_EPSILON);
    }
    // hi_lo·2^64 ≡ hi_lo·(2^32 - 1), fits in a u64
    let t1 = hi_lo * Q2_EPSILON;

    let (sum, carry) = t0.overflowing_add(t1);
    let sum = sum.wrapping_add(Q2_EPSILON * carry as u64);
    canonicalize(sum)
}

impl Add for Goldilocks {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (sum, over) = self.0.overflowing_add(rhs.0);
        let sum = if over { sum.wrapping_add(Q2_EPSILON) } else { sum };
        Goldilocks(canonicalize(sum))
    }
}

impl AddAssign for Goldilocks {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Goldilocks {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        if self.0 >= rhs.0 {
            Goldilocks(self.0 - rhs.0)
        } else {
            Goldilocks(Q2_MODULUS - rhs.0 + self.0)
        }
    }
}

impl SubAssign for Goldilocks {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for Goldilocks {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Goldilocks(reduce128(self.0 as u128 * rhs.0 as u128))
    }
}

impl MulAssign for Goldilocks {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Neg for Goldilocks {
    type Output = Self;

    fn neg(self) -> Self {
        if self.0 == 0 {
            self
        } else {
            Goldilocks(Q2_MODULUS - self.0)
        }
    }
}

impl fmt::Display for Goldilocks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Goldilocks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Goldilocks({})", self.0)
    }
}
