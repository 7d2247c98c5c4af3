//! Types shared by the SDK and the CLI

use crate::error::SdkError;
use babyjub_core::{ChallengeHash, PublicKeyComp, SignatureComp};
use num_bigint::BigUint;
use std::fmt;
use std::str::FromStr;

/// Configuration for a [`crate::BabyJubSigner`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SignerConfig {
    /// Challenge hash used when signing (default: Poseidon)
    pub hash: ChallengeHash,
}

impl SignerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the challenge hash
    pub fn with_hash(mut self, hash: ChallengeHash) -> Self {
        self.hash = hash;
        self
    }
}

/// A message together with everything needed to verify its signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    pub public_key: PublicKeyComp,
    pub message: BigUint,
    pub signature: SignatureComp,
    pub hash: ChallengeHash,
}

/// Hash families exposed by the SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashKind {
    /// Width-dependent Poseidon (circomlib parameters)
    Poseidon,
    Mimc7,
    /// Width-6 Poseidon with seed-derived constants
    Legacy,
    /// Width-12 Poseidon over Goldilocks
    Goldilocks,
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashKind::Poseidon => "poseidon",
            HashKind::Mimc7 => "mimc7",
            HashKind::Legacy => "legacy",
            HashKind::Goldilocks => "goldilocks",
        };
        f.write_str(name)
    }
}

impl FromStr for HashKind {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poseidon" => Ok(HashKind::Poseidon),
            "mimc7" | "mimc" => Ok(HashKind::Mimc7),
            "legacy" | "poseidon-legacy" => Ok(HashKind::Legacy),
            "goldilocks" => Ok(HashKind::Goldilocks),
            _ => Err(SdkError::UnknownHash(s.to_string())),
        }
    }
}

/// Result of a hash call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashOutput {
    /// A single Q₁ element
    Field(BigUint),
    /// Four Goldilocks words
    Words([u64; 4]),
}

impl HashOutput {
    /// 32-byte big-endian encoding as lowercase hex
    pub fn to_hex(&self) -> String {
        let bytes = match self {
            HashOutput::Field(v) => {
                let be = v.to_bytes_be();
                let mut out = [0u8; 32];
                out[32 - be.len()..].copy_from_slice(&be);
                out
            }
            HashOutput::Words(w) => babyjub_core::poseidon::goldilocks::digest_to_bytes(w),
        };
        hex::encode(bytes)
    }
}

impl fmt::Display for HashOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashOutput::Field(v) => write!(f, "{}", v),
            HashOutput::Words(w) => write!(f, "[{}, {}, {}, {}]", w[0], w[1], w[2], w[3]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_kind_parse() {
        assert_eq!("Poseidon".parse::<HashKind>().unwrap(), HashKind::Poseidon);
        assert_eq!("mimc".parse::<HashKind>().unwrap(), HashKind::Mimc7);
        assert_eq!("goldilocks".parse::<HashKind>().unwrap(), HashKind::Goldilocks);
        assert!(matches!(
            "sha256".parse::<HashKind>(),
            Err(SdkError::UnknownHash(_))
        ));
        assert_eq!(HashKind::Legacy.to_string(), "legacy");
    }

    #[test]
    fn test_hash_output_hex() {
        let field = HashOutput::Field(BigUint::from(0x0102u16));
        assert_eq!(field.to_hex(), format!("{}0102", "0".repeat(60)));
        assert_eq!(field.to_string(), "258");

        let words = HashOutput::Words([1, 2, 3, 4]);
        assert!(words.to_hex().ends_with("0000000000000004"));
        assert_eq!(words.to_string(), "[1, 2, 3, 4]");
    }

    #[test]
    fn test_signer_config() {
        assert_eq!(SignerConfig::new().hash, ChallengeHash::Poseidon);
        assert_eq!(
            SignerConfig::new().with_hash(ChallengeHash::Mimc7).hash,
            ChallengeHash::Mimc7
        );
    }
}
