//! Integer constants for the API boundary
//!
//! Built once on first use from the byte constants in [`crate::types`].

use crate::types::{CURVE_ORDER_BE, Q1_MODULUS_BE, Q2_MODULUS, SUB_ORDER_BE};
use num_bigint::BigUint;
use once_cell::sync::Lazy;

static Q1: Lazy<BigUint> = Lazy::new(|| BigUint::from_bytes_be(&Q1_MODULUS_BE));

static Q2: Lazy<BigUint> = Lazy::new(|| BigUint::from(Q2_MODULUS));

static CURVE_ORDER: Lazy<BigUint> = Lazy::new(|| BigUint::from_bytes_be(&CURVE_ORDER_BE));

static SUB_ORDER: Lazy<BigUint> = Lazy::new(|| BigUint::from_bytes_be(&SUB_ORDER_BE));

/// BN254 scalar field modulus Q₁
pub fn q1() -> &'static BigUint {
    &Q1
}

/// Goldilocks modulus Q₂
pub fn q2() -> &'static BigUint {
    &Q2
}

/// Order of the full BabyJubJub group
pub fn curve_order() -> &'static BigUint {
    &CURVE_ORDER
}

/// Order of the prime subgroup generated by B8
pub fn sub_order() -> &'static BigUint {
    &SUB_ORDER
}
