//! Error types for the BabyJubJub SDK

use babyjub_core::CryptoError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from key handling, message parsing, signing and hashing
#[derive(Error, Debug)]
pub enum SdkError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("Failed to read {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid key file {path:?}: {source}")]
    InvalidKeyFile {
        path: PathBuf,
        source: CryptoError,
    },

    #[error("Invalid field element '{0}': expected decimal or 0x-prefixed hex")]
    InvalidNumber(String),

    #[error("Unknown hash '{0}': expected poseidon, mimc7, legacy or goldilocks")]
    UnknownHash(String),

    #[error("Signature verification failed")]
    VerificationFailed,
}

pub type Result<T> = std::result::Result<T, SdkError>;
