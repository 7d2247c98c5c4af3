//! Rust SDK for BabyJubJub EdDSA keys, signatures and hashes
//!
//! Wraps `babyjub-core` with key files, text parsing for field elements and
//! a single dispatch point for the hash families. The `babyjub` CLI (feature
//! `cli`) is built on this crate.
//!
//! # Example
//!
//! ```
//! use babyjub_sdk::{hash_elements, parse_field_list, HashKind};
//!
//! let inputs = parse_field_list("1,2").unwrap();
//! let out = hash_elements(HashKind::Poseidon, &inputs).unwrap();
//! println!("{}", out);
//! ```

mod client;
mod error;
mod hashing;
mod keystore;
mod message;
mod types;

pub use client::{verify, verify_signed, BabyJubSigner};
pub use error::{Result, SdkError};
pub use hashing::{hash_bytes, hash_elements, hash_file};
pub use keystore::{read_key_file, write_key_file};
pub use message::{parse_field_element, parse_field_list};
pub use types::*;
