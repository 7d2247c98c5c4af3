//! BabyJubJub twisted Edwards curve over Q₁
//!
//! `a·x² + y² = 1 + d·x²·y²` with a = 168700, d = 168696. The group has
//! order 8·l; [`Point::b8`] generates the subgroup of prime order l.
//!
//! Scalar multiplication is plain double-and-add over projective
//! coordinates. It is not constant time: the sequence of additions depends
//! on the scalar bits.

use crate::constants::sub_order;
use crate::errors::{CryptoError, Operation, Result};
use crate::field::Fr;
use crate::types::{CompressedPoint, B8_X, B8_Y, CURVE_A, CURVE_D};
use core::ops::{Add, Neg};
use num_bigint::BigUint;
use once_cell::sync::Lazy;

static A: Lazy<Fr> = Lazy::new(|| Fr::from_u64(CURVE_A));
static D: Lazy<Fr> = Lazy::new(|| Fr::from_u64(CURVE_D));
static B8: Lazy<Point> = Lazy::new(|| Point {
    x: Fr::from_limbs_unchecked(B8_X),
    y: Fr::from_limbs_unchecked(B8_Y),
});

/// Curve coefficient `a` as a field element
pub fn curve_a() -> Fr {
    *A
}

/// Curve coefficient `d` as a field element
pub fn curve_d() -> Fr {
    *D
}

/// A point in affine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: Fr,
    pub y: Fr,
}

/// A point in projective coordinates, x = X/Z and y = Y/Z.
#[derive(Debug, Clone, Copy)]
pub struct ProjectivePoint {
    pub x: Fr,
    pub y: Fr,
    pub z: Fr,
}

impl ProjectivePoint {
    pub fn neutral() -> Self {
        ProjectivePoint {
            x: Fr::ZERO,
            y: Fr::ONE,
            z: Fr::ONE,
        }
    }

    /// Convert back to affine coordinates with a single inversion.
    pub fn affine(&self) -> Result<Point> {
        let zinv = self.z.inverse().map_err(|_| CryptoError::NonInvertible {
            op: Operation::ProjectiveToAffine,
        })?;
        Ok(Point {
            x: self.x * zinv,
            y: self.y * zinv,
        })
    }

    pub fn double(&self) -> Self {
        *self + *self
    }
}

impl Add for ProjectivePoint {
    type Output = ProjectivePoint;

    /// add-2008-bbjlp, unified so it also doubles
    fn add(self, q: ProjectivePoint) -> ProjectivePoint {
        let a = self.z * q.z;
        let b = a.square();
        let c = self.x * q.x;
        let d = self.y * q.y;
        let e = curve_d() * c * d;
        let f = b - e;
        let g = b + e;
        let x1y1 = self.x + self.y;
        let x2y2 = q.x + q.y;

        ProjectivePoint {
            x: a * f * (x1y1 * x2y2 - c - d),
            y: a * g * (d - curve_a() * c),
            z: f * g,
        }
    }
}

impl Point {
    pub const fn new(x: Fr, y: Fr) -> Self {
        Point { x, y }
    }

    /// The neutral element (0, 1)
    pub fn neutral() -> Self {
        Point {
            x: Fr::ZERO,
            y: Fr::ONE,
        }
    }

    /// Generator of the prime-order subgroup (8 times the curve generator)
    pub fn b8() -> Self {
        *B8
    }

    /// Build a point from integer coordinates, both of which must be below Q₁.
    /// Curve membership is not checked.
    pub fn from_biguints(x: &BigUint, y: &BigUint) -> Result<Self> {
        Ok(Point {
            x: Fr::from_biguint(x)?,
            y: Fr::from_biguint(y)?,
        })
    }

    pub fn projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x,
            y: self.y,
            z: Fr::ONE,
        }
    }

    /// Unified affine addition. A zero denominator cannot occur for points on
    /// the curve but is still reported rather than divided by.
    pub fn add(&self, other: &Point) -> Result<Point> {
        let x1x2 = self.x * other.x;
        let y1y2 = self.y * other.y;
        let dxy = curve_d() * x1x2 * y1y2;

        let x_num = self.x * other.y + other.x * self.y;
        let y_num = y1y2 - curve_a() * x1x2;
        let non_invertible = |_| CryptoError::NonInvertible {
            op: Operation::PointAddition,
        };
        let x_den = (Fr::ONE + dxy).inverse().map_err(non_invertible)?;
        let y_den = (Fr::ONE - dxy).inverse().map_err(non_invertible)?;

        Ok(Point {
            x: x_num * x_den,
            y: y_num * y_den,
        })
    }

    /// Scalar multiplication by right-to-left double-and-add.
    pub fn mul(&self, scalar: &BigUint) -> Result<Point> {
        let mut acc = ProjectivePoint::neutral();
        let mut exp = self.projective();
        for i in 0..scalar.bits() {
            if scalar.bit(i) {
                acc = acc + exp;
            }
            exp = exp.double();
        }
        acc.affine()
    }

    /// Evaluate the curve equation exactly.
    pub fn in_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        curve_a() * x2 + y2 == Fr::ONE + curve_d() * x2 * y2
    }

    /// On the curve and annihilated by the subgroup order.
    pub fn in_sub_group(&self) -> bool {
        if !self.in_curve() {
            return false;
        }
        match self.mul(sub_order()) {
            Ok(res) => res == Point::neutral(),
            Err(_) => false,
        }
    }

    /// Compress into 32 bytes: little-endian y with the sign of x in the top bit.
    pub fn compress(&self) -> CompressedPoint {
        pack_sign_y(point_coord_sign(&self.x), &self.y)
    }

    /// Inverse of [`Point::compress`]. Rejects y ≥ Q₁, a zero denominator and
    /// encodings whose x² has no square root.
    pub fn decompress(buf: &CompressedPoint) -> Result<Point> {
        let (sign, y) = unpack_sign_y(buf);
        let point = point_from_sign_and_y(sign, &y)?;
        crate::dbg_point!("decompressed", &point);
        Ok(point)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point {
            x: -self.x,
            y: self.y,
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Point::neutral()
    }
}

/// Sign of a coordinate: true iff its canonical value is above (Q₁ - 1) / 2.
pub fn point_coord_sign(c: &Fr) -> bool {
    c.is_greater_than_half()
}

/// Encode y little-endian and set bit 255 when `sign` is true.
pub fn pack_sign_y(sign: bool, y: &Fr) -> [u8; 32] {
    let mut buf = y.to_bytes_le();
    if sign {
        buf[31] |= 0x80;
    }
    buf
}

/// Split a packed buffer into the sign flag and the integer y.
/// y is not range checked here.
pub fn unpack_sign_y(buf: &[u8; 32]) -> (bool, BigUint) {
    let mut y = *buf;
    let sign = y[31] & 0x80 != 0;
    y[31] &= 0x7f;
    (sign, BigUint::from_bytes_le(&y))
}

/// Recover x from y and the sign of x using x² = (1 - y²) / (a - d·y²).
pub fn point_from_sign_and_y(sign: bool, y: &BigUint) -> Result<Point> {
    let y = Fr::from_biguint(y).map_err(|_| CryptoError::range_q1(Operation::Decompression))?;

    let y2 = y.square();
    let xa = Fr::ONE - y2;
    let xb = curve_a() - curve_d() * y2;
    let xb_inv = xb.inverse().map_err(|_| CryptoError::NonInvertible {
        op: Operation::Decompression,
    })?;

    let x2 = xa * xb_inv;
    crate::dbg_fr!("x^2", &x2);
    let mut x = x2.sqrt().ok_or(CryptoError::NonResidue)?;
    if sign != point_coord_sign(&x) {
        x = -x;
    }

    Ok(Point { x, y })
}
