//! BabyJubJub curve arithmetic, EdDSA signatures and ZK-friendly hashes
//!
//! Everything lives over Q₁, the BN254 scalar field, except the Goldilocks
//! Poseidon instance which works over Q₂ = 2^64 - 2^32 + 1.
//!
//! # Example
//!
//! ```
//! use babyjub_core::{PrivateKey, ChallengeHash};
//! use num_bigint::BigUint;
//!
//! let key = PrivateKey::random();
//! let msg = BigUint::from(42u8);
//! let sig = key.sign(&msg, ChallengeHash::Poseidon).unwrap();
//! assert!(key.public().unwrap().verify(&msg, &sig, ChallengeHash::Poseidon));
//! ```
//!
//! Constant tables (Poseidon per width, legacy Poseidon, MiMC7, Goldilocks)
//! are built on first use and shared read-only afterwards.

pub mod codec;
pub mod constants;
pub mod curve;
pub mod debug;
pub mod eddsa;
pub mod errors;
pub mod field;
pub mod goldilocks;
pub mod mimc7;
pub mod poseidon;
pub mod types;

pub use curve::{Point, ProjectivePoint};
pub use eddsa::{
    ChallengeHash, PrivKeyScalar, PrivateKey, PublicKey, PublicKeyComp, Signature, SignatureComp,
};
pub use errors::{CryptoError, Field, Operation, Result};
pub use field::Fr;
pub use goldilocks::Goldilocks;
