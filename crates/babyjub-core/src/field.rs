//! Scalar field arithmetic for BN254 (Q₁)
//!
//! Implements `Fr` using 4 x 64-bit limbs in Montgomery form. Every
//! operation returns a fully reduced element; conversions in and out of the
//! canonical representation happen only at the byte / integer boundary.

use crate::errors::{CryptoError, Operation, Result};
use crate::types::{
    Q1_HALF, Q1_INV, Q1_MODULUS, Q1_MODULUS_MINUS_2, Q1_R, Q1_R2, Q1_ROOT_OF_UNITY,
    Q1_TRACE_MINUS_ONE_DIV_TWO, Q1_TWO_ADICITY,
};
use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;

/// An element of the BN254 scalar field, stored in Montgomery form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fr([u64; 4]);

impl Fr {
    pub const ZERO: Fr = Fr([0; 4]);
    pub const ONE: Fr = Fr(Q1_R);

    pub fn from_u64(val: u64) -> Self {
        Fr(mont_mul(&[val, 0, 0, 0], &Q1_R2))
    }

    /// Build an element from canonical little-endian limbs.
    /// Fails with a range error if the value is not below Q₁.
    pub fn from_limbs(limbs: [u64; 4]) -> Result<Self> {
        if gte(&limbs, &Q1_MODULUS) {
            return Err(CryptoError::range_q1(Operation::FieldConversion));
        }
        Ok(Self::from_limbs_unchecked(limbs))
    }

    /// Caller guarantees `limbs < Q₁`.
    pub(crate) fn from_limbs_unchecked(limbs: [u64; 4]) -> Self {
        Fr(mont_mul(&limbs, &Q1_R2))
    }

    /// Canonical (non-Montgomery) little-endian limbs
    pub fn to_limbs(&self) -> [u64; 4] {
        mont_mul(&self.0, &[1, 0, 0, 0])
    }

    pub fn from_bytes_le(bytes: &[u8; 32]) -> Result<Self> {
        Self::from_limbs(le_bytes_to_limbs(bytes))
    }

    pub fn to_bytes_le(&self) -> [u8; 32] {
        limbs_to_le_bytes(&self.to_limbs())
    }

    pub fn from_bytes_be(bytes: &[u8; 32]) -> Result<Self> {
        let mut le = *bytes;
        le.reverse();
        Self::from_bytes_le(&le)
    }

    pub fn to_bytes_be(&self) -> [u8; 32] {
        let mut be = self.to_bytes_le();
        be.reverse();
        be
    }

    /// Interpret up to 32 big-endian bytes as an integer below Q₁.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > 32 {
            return Err(CryptoError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut be = [0u8; 32];
        be[32 - bytes.len()..].copy_from_slice(bytes);
        Self::from_bytes_be(&be)
    }

    /// Interpret up to 32 little-endian bytes as an integer below Q₁.
    pub fn from_le_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > 32 {
            return Err(CryptoError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut le = [0u8; 32];
        le[..bytes.len()].copy_from_slice(bytes);
        Self::from_bytes_le(&le)
    }

    /// Reduce any 256-bit big-endian value mod Q₁.
    pub fn from_bytes_be_reduced(bytes: &[u8; 32]) -> Self {
        let mut le = *bytes;
        le.reverse();
        Self::from_bytes_le_reduced(&le)
    }

    /// Reduce any 256-bit little-endian value mod Q₁.
    pub fn from_bytes_le_reduced(bytes: &[u8; 32]) -> Self {
        Self::from_limbs_reduced(le_bytes_to_limbs(bytes))
    }

    /// Reduce any 256-bit limb value mod Q₁.
    pub(crate) fn from_limbs_reduced(limbs: [u64; 4]) -> Self {
        // 2^256 is below 6·Q₁, so a handful of subtractions suffices
        let mut limbs = limbs;
        while gte(&limbs, &Q1_MODULUS) {
            limbs = sub_no_borrow(&limbs, &Q1_MODULUS);
        }
        Self::from_limbs_unchecked(limbs)
    }

    /// True iff the canonical limbs are below Q₁.
    pub(crate) fn limbs_in_range(limbs: &[u64; 4]) -> bool {
        !gte(limbs, &Q1_MODULUS)
    }

    /// Convert an arbitrary-precision integer, rejecting values ≥ Q₁.
    pub fn from_biguint(value: &BigUint) -> Result<Self> {
        let bytes = value.to_bytes_le();
        if bytes.len() > 32 {
            return Err(CryptoError::range_q1(Operation::FieldConversion));
        }
        let mut le = [0u8; 32];
        le[..bytes.len()].copy_from_slice(&bytes);
        Self::from_bytes_le(&le)
    }

    /// Convert an arbitrary-precision integer, reducing it mod Q₁.
    pub fn from_biguint_reduced(value: &BigUint) -> Self {
        let reduced = value % crate::constants::q1();
        let bytes = reduced.to_bytes_le();
        let mut le = [0u8; 32];
        le[..bytes.len()].copy_from_slice(&bytes);
        Self::from_limbs_unchecked(le_bytes_to_limbs(&le))
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.to_bytes_le())
    }

    pub fn is_zero(&self) -> bool {
        *self == Fr::ZERO
    }

    pub fn is_one(&self) -> bool {
        *self == Fr::ONE
    }

    pub fn square(&self) -> Self {
        *self * *self
    }

    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Raise to a power given as little-endian 64-bit limbs of any length.
    pub fn pow(&self, exp: &[u64]) -> Self {
        let mut result = Fr::ONE;
        let mut base = *self;
        for &limb in exp {
            let mut e = limb;
            for _ in 0..64 {
                if e & 1 == 1 {
                    result *= base;
                }
                base = base.square();
                e >>= 1;
            }
        }
        result
    }

    pub fn pow_biguint(&self, exp: &BigUint) -> Self {
        self.pow(&exp.to_u64_digits())
    }

    /// Multiplicative inverse via Fermat's little theorem.
    /// Zero has no inverse and yields a domain error.
    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(CryptoError::NonInvertible {
                op: Operation::Inversion,
            });
        }
        Ok(self.pow(&Q1_MODULUS_MINUS_2))
    }

    /// Euler's criterion; zero counts as a square.
    pub fn is_square(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        self.pow(&Q1_HALF).is_one()
    }

    /// Tonelli-Shanks square root. Returns `None` for non-residues.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(Fr::ZERO);
        }

        let mut z = Fr::from_limbs_unchecked(Q1_ROOT_OF_UNITY);
        let mut w = self.pow(&Q1_TRACE_MINUS_ONE_DIV_TWO);
        let mut x = w * *self;
        let mut b = x * w;
        let mut v = Q1_TWO_ADICITY;

        while !b.is_one() {
            let mut k = 0u32;
            let mut b2k = b;
            while !b2k.is_one() {
                b2k = b2k.square();
                k += 1;
            }
            if k == Q1_TWO_ADICITY {
                return None;
            }
            let j = v - k;
            w = z;
            for _ in 1..j {
                w = w.square();
            }
            z = w.square();
            b *= z;
            x *= w;
            v = k;
        }

        Some(x)
    }

    /// True iff the canonical value is greater than (Q₁ - 1) / 2.
    pub fn is_greater_than_half(&self) -> bool {
        let limbs = self.to_limbs();
        gte(&limbs, &Q1_HALF) && limbs != Q1_HALF
    }
}

impl From<u64> for Fr {
    fn from(val: u64) -> Self {
        Fr::from_u64(val)
    }
}

impl Add for Fr {
    type Output = Fr;

    fn add(self, rhs: Fr) -> Fr {
        Fr(add_mod(&self.0, &rhs.0))
    }
}

impl AddAssign for Fr {
    fn add_assign(&mut self, rhs: Fr) {
        self.0 = add_mod(&self.0, &rhs.0);
    }
}

impl Sub for Fr {
    type Output = Fr;

    fn sub(self, rhs: Fr) -> Fr {
        Fr(sub_mod(&self.0, &rhs.0))
    }
}

impl SubAssign for Fr {
    fn sub_assign(&mut self, rhs: Fr) {
        self.0 = sub_mod(&self.0, &rhs.0);
    }
}

impl Mul for Fr {
    type Output = Fr;

    fn mul(self, rhs: Fr) -> Fr {
        Fr(mont_mul(&self.0, &rhs.0))
    }
}

impl MulAssign for Fr {
    fn mul_assign(&mut self, rhs: Fr) {
        self.0 = mont_mul(&self.0, &rhs.0);
    }
}

impl Neg for Fr {
    type Output = Fr;

    fn neg(self) -> Fr {
        if self.is_zero() {
            return self;
        }
        Fr(sub_no_borrow(&Q1_MODULUS, &self.0))
    }
}

impl fmt::Display for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl fmt::Debug for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fr(0x{})", hex::encode(self.to_bytes_be()))
    }
}

impl fmt::LowerHex for Fr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes_be()))
    }
}

// --- Internal functions for limb arithmetic ---

fn le_bytes_to_limbs(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *limb = u64::from_le_bytes(buf);
    }
    limbs
}

fn limbs_to_le_bytes(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (chunk, limb) in bytes.chunks_exact_mut(8).zip(limbs.iter()) {
        chunk.copy_from_slice(&limb.to_le_bytes());
    }
    bytes
}

/// a + b mod Q₁
fn add_mod(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let (sum, overflow) = add_with_carry(a, b);
    if overflow || gte(&sum, &Q1_MODULUS) {
        sub_no_borrow(&sum, &Q1_MODULUS)
    } else {
        sum
    }
}

/// a - b mod Q₁
fn sub_mod(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    if gte(a, b) {
        sub_no_borrow(a, b)
    } else {
        let diff = sub_no_borrow(b, a);
        sub_no_borrow(&Q1_MODULUS, &diff)
    }
}

/// Montgomery multiplication (CIOS): a · b · 2^-256 mod Q₁
fn mont_mul(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let mut t = [0u64; 6];

    for i in 0..4 {
        let mut carry = 0u64;
        for j in 0..4 {
            let (lo, hi) = mul_with_carry(a[j], b[i], t[j], carry);
            t[j] = lo;
            carry = hi;
        }
        let (sum, c) = t[4].overflowing_add(carry);
        t[4] = sum;
        t[5] = c as u64;

        let m = t[0].wrapping_mul(Q1_INV);
        let (_, mut carry) = mul_with_carry(m, Q1_MODULUS[0], t[0], 0);
        for j in 1..4 {
            let (lo, hi) = mul_with_carry(m, Q1_MODULUS[j], t[j], carry);
            t[j - 1] = lo;
            carry = hi;
        }
        let (sum, c) = t[4].overflowing_add(carry);
        t[3] = sum;
        t[4] = t[5] + c as u64;
    }

    let result = [t[0], t[1], t[2], t[3]];
    if t[4] != 0 || gte(&result, &Q1_MODULUS) {
        sub_no_borrow(&result, &Q1_MODULUS)
    } else {
        result
    }
}

/// Add two 256-bit numbers with carry
fn add_with_carry(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], bool) {
    let mut result = [0u64; 4];
    let mut carry = 0u64;

    for i in 0..4 {
        let (sum1, c1) = a[i].overflowing_add(b[i]);
        let (sum2, c2) = sum1.overflowing_add(carry);
        result[i] = sum2;
        carry = (c1 as u64) + (c2 as u64);
    }

    (result, carry > 0)
}

/// Subtract b from a, wrapping mod 2^256
fn sub_no_borrow(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let mut result = [0u64; 4];
    let mut borrow = 0u64;

    for i in 0..4 {
        let (diff1, b1) = a[i].overflowing_sub(b[i]);
        let (diff2, b2) = diff1.overflowing_sub(borrow);
        result[i] = diff2;
        borrow = (b1 as u64) + (b2 as u64);
    }

    result
}

/// Check if a >= b
fn gte(a: &[u64; 4], b: &[u64; 4]) -> bool {
    for i in (0..4).rev() {
        if a[i] > b[i] {
            return true;
        }
        if a[i] < b[i] {
            return false;
        }
    }
    true
}

/// a * b + c + carry as (lo, hi)
fn mul_with_carry(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let product = (a as u128) * (b as u128) + (c as u128) + (carry as u128);
    (product as u64, (product >> 64) as u64)
}
