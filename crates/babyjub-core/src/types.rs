//! Fixed parameters for the two fields and the BabyJubJub curve.
//!
//! Limb arrays are little-endian (limb 0 is least significant). Byte arrays
//! are big-endian, the way the parameters are usually published.

use hex_literal::hex;

/// A compressed curve point: little-endian y with the sign of x in bit 255.
pub type CompressedPoint = [u8; 32];

/// A compressed signature: compressed R8 followed by S (32 bytes LE).
pub type CompressedSignature = [u8; 64];

/// Size of a serialized Q₁ element
pub const FIELD_ELEMENT_SIZE: usize = 32;

/// Size of a compressed point
pub const COMPRESSED_POINT_SIZE: usize = 32;

/// Size of a compressed signature
pub const COMPRESSED_SIGNATURE_SIZE: usize = 64;

/// Size of a private key
pub const PRIVATE_KEY_SIZE: usize = 32;

// --- Q₁: BN254 scalar field ---

/// BN254 scalar field modulus Q₁
/// Q₁ = 21888242871839275222246405745257275088548364400416034343698204186575808495617
pub const Q1_MODULUS: [u64; 4] = [
    0x43e1f593f0000001,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
];

/// Q₁ as 32 big-endian bytes
pub const Q1_MODULUS_BE: [u8; 32] =
    hex!("30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001");

/// 2^256 mod Q₁ (one in Montgomery form)
pub const Q1_R: [u64; 4] = [
    0xac96341c4ffffffb,
    0x36fc76959f60cd29,
    0x666ea36f7879462e,
    0x0e0a77c19a07df2f,
];

/// 2^512 mod Q₁ (for converting into Montgomery form)
pub const Q1_R2: [u64; 4] = [
    0x1bb8e645ae216da7,
    0x53fe3ab1e35c59e3,
    0x8c49833d53bb8085,
    0x0216d0b17f4e44a5,
];

/// -Q₁^{-1} mod 2^64
pub const Q1_INV: u64 = 0xc2e1f593efffffff;

/// Q₁ - 2, the Fermat inversion exponent
pub const Q1_MODULUS_MINUS_2: [u64; 4] = [
    0x43e1f593efffffff,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
];

/// (Q₁ - 1) / 2: sign threshold and Euler criterion exponent
pub const Q1_HALF: [u64; 4] = [
    0xa1f0fac9f8000000,
    0x9419f4243cdcb848,
    0xdc2822db40c0ac2e,
    0x183227397098d014,
];

/// Q₁ - 1 = 2^S · T with T odd
pub const Q1_TWO_ADICITY: u32 = 28;

/// T, the odd part of Q₁ - 1
pub const Q1_TRACE: [u64; 4] = [
    0x9b9709143e1f593f,
    0x181585d2833e8487,
    0x131a029b85045b68,
    0x000000030644e72e,
];

/// (T - 1) / 2
pub const Q1_TRACE_MINUS_ONE_DIV_TWO: [u64; 4] = [
    0xcdcb848a1f0fac9f,
    0x0c0ac2e9419f4243,
    0x098d014dc2822db4,
    0x0000000183227397,
];

/// 5^T, a primitive 2^28-th root of unity
pub const Q1_ROOT_OF_UNITY: [u64; 4] = [
    0x9bd61b6e725b19f0,
    0x402d111e41112ed4,
    0x00e0a7eb8ef62abc,
    0x2a3c09f0a58a7e85,
];

// --- Q₂: Goldilocks ---

/// Goldilocks prime Q₂ = 2^64 - 2^32 + 1
pub const Q2_MODULUS: u64 = 0xffff_ffff_0000_0001;

/// 2^64 mod Q₂ = 2^32 - 1
pub const Q2_EPSILON: u64 = 0xffff_ffff;

// --- BabyJubJub ---

/// Twisted Edwards `a` coefficient
pub const CURVE_A: u64 = 168700;

/// Twisted Edwards `d` coefficient
pub const CURVE_D: u64 = 168696;

/// Full curve order (cofactor 8 times the subgroup order)
pub const CURVE_ORDER_BE: [u8; 32] =
    hex!("30644e72e131a029b85045b68181585d59f76dc1c90770533b94bee1c9093788");

/// Prime subgroup order = curve order >> 3
pub const SUB_ORDER_BE: [u8; 32] =
    hex!("060c89ce5c263405370a08b6d0302b0bab3eedb83920ee0a677297dc392126f1");

/// Base point of the prime-order subgroup, x coordinate
pub const B8_X: [u64; 4] = [
    0x2893f3f6bb957051,
    0x2ab8d8010534e0b6,
    0x4eacb2e09d6277c1,
    0x0bb77a6ad63e739b,
];

/// Base point of the prime-order subgroup, y coordinate
pub const B8_Y: [u64; 4] = [
    0x4b3c257a872d7d8b,
    0xfce0051fb9e13377,
    0x25572e1cd16bf9ed,
    0x25797203f7a0b249,
];
