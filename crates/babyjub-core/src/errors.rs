//! Error types for curve, signature and hash operations

use core::fmt;
use thiserror::Error;

/// Which prime field a value was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// BN254 scalar field (curve base field)
    Q1,
    /// Goldilocks, 2^64 - 2^32 + 1
    Q2,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Q1 => f.write_str("Q1"),
            Field::Q2 => f.write_str("Q2"),
        }
    }
}

/// Operation that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FieldConversion,
    Inversion,
    PointAddition,
    ProjectiveToAffine,
    Decompression,
    Poseidon,
    PoseidonInitialState,
    PoseidonOutputs,
    PoseidonFrameSize,
    PoseidonBytes,
    LegacyPoseidon,
    GoldilocksPoseidon,
    GoldilocksBytes,
    Mimc7,
    Signature,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::FieldConversion => "field conversion",
            Operation::Inversion => "field inversion",
            Operation::PointAddition => "point addition",
            Operation::ProjectiveToAffine => "projective to affine",
            Operation::Decompression => "point decompression",
            Operation::Poseidon => "poseidon",
            Operation::PoseidonInitialState => "poseidon initial state",
            Operation::PoseidonOutputs => "poseidon outputs",
            Operation::PoseidonFrameSize => "poseidon frame size",
            Operation::PoseidonBytes => "poseidon byte sponge",
            Operation::LegacyPoseidon => "legacy poseidon",
            Operation::GoldilocksPoseidon => "goldilocks poseidon",
            Operation::GoldilocksBytes => "goldilocks byte sponge",
            Operation::Mimc7 => "mimc7",
            Operation::Signature => "signature",
        };
        f.write_str(name)
    }
}

/// Errors from field, curve, signature and hash operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CryptoError {
    #[error("{op}: value is not below the {field} modulus")]
    Range { field: Field, op: Operation },

    #[error("{op}: inverse of zero")]
    NonInvertible { op: Operation },

    #[error("Point decompression: x^2 is not a quadratic residue")]
    NonResidue,

    #[error("{op}: invalid number of inputs: expected {min}..={max}, got {actual}")]
    Arity {
        op: Operation,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Malformed hex: {0}")]
    MalformedHex(#[from] hex::FromHexError),

    #[error("{op}: empty input")]
    EmptyInput { op: Operation },
}

impl CryptoError {
    pub(crate) fn range_q1(op: Operation) -> Self {
        CryptoError::Range {
            field: Field::Q1,
            op,
        }
    }

    pub(crate) fn range_q2(op: Operation) -> Self {
        CryptoError::Range {
            field: Field::Q2,
            op,
        }
    }
}

pub type Result<T> = core::result::Result<T, CryptoError>;
