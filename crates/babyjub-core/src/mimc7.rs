//! MiMC7 hash over Q₁
//!
//! 91 rounds of `t ↦ t⁷`. Round constants: constant 0 is zero, the rest come
//! from iterating Keccak-256 from `keccak("mimc")`, each digest fed back as
//! its minimal big-endian encoding and reduced mod Q₁.

use crate::codec::le_chunks_to_fields;
use crate::errors::{CryptoError, Operation, Result};
use crate::field::Fr;
use num_bigint::BigUint;
use once_cell::sync::Lazy;
use sha3::{Digest, Keccak256};

pub const SEED: &str = "mimc";
pub const N_ROUNDS: usize = 91;

static CONSTANTS: Lazy<Vec<Fr>> = Lazy::new(|| constants(N_ROUNDS));

static IV: Lazy<BigUint> = Lazy::new(|| {
    let digest: [u8; 32] = Keccak256::digest(format!("{}_iv", SEED)).into();
    Fr::from_bytes_be_reduced(&digest).to_biguint()
});

/// Round constants for an `n_rounds` instance.
pub fn constants(n_rounds: usize) -> Vec<Fr> {
    let mut out = Vec::with_capacity(n_rounds);
    if n_rounds == 0 {
        return out;
    }
    out.push(Fr::ZERO);

    let mut digest: [u8; 32] = Keccak256::digest(SEED).into();
    for _ in 1..n_rounds {
        let start = digest.iter().position(|b| *b != 0).unwrap_or(digest.len());
        digest = Keccak256::digest(&digest[start..]).into();
        out.push(Fr::from_bytes_be_reduced(&digest));
    }
    out
}

/// `keccak("mimc_iv") mod Q₁`
pub fn iv() -> &'static BigUint {
    &IV
}

fn pow7(t: Fr) -> Fr {
    let t2 = t.square();
    let t4 = t2.square();
    t4 * t2 * t
}

fn round_function(x: Fr, k: Fr, constants: &[Fr]) -> Fr {
    let mut r = Fr::ZERO;
    for (i, c) in constants.iter().enumerate() {
        let t = if i == 0 { x + k } else { r + k + *c };
        r = pow7(t);
    }
    r + k
}

/// Keyed MiMC7 permutation of a single element.
pub fn mimc7_fields(x: Fr, k: Fr) -> Fr {
    round_function(x, k, &CONSTANTS)
}

fn to_field(value: &BigUint) -> Result<Fr> {
    Fr::from_biguint(value).map_err(|_| CryptoError::range_q1(Operation::Mimc7))
}

fn to_fields(values: &[BigUint]) -> Result<Vec<Fr>> {
    values.iter().map(to_field).collect()
}

fn check_non_empty(len: usize) -> Result<()> {
    if len == 0 {
        return Err(CryptoError::EmptyInput {
            op: Operation::Mimc7,
        });
    }
    Ok(())
}

pub fn mimc7_hash(x: &BigUint, k: &BigUint) -> Result<BigUint> {
    Ok(mimc7_fields(to_field(x)?, to_field(k)?).to_biguint())
}

/// Multi-input hash: `r ← r + input + MiMC7(input, r)`, starting from the key
/// (zero when absent).
pub fn hash_fields(inputs: &[Fr], key: Option<Fr>) -> Result<Fr> {
    check_non_empty(inputs.len())?;
    let mut r = key.unwrap_or(Fr::ZERO);
    for input in inputs {
        r = r + *input + mimc7_fields(*input, r);
    }
    Ok(r)
}

pub fn hash(inputs: &[BigUint], key: Option<&BigUint>) -> Result<BigUint> {
    let key = key.map(to_field).transpose()?;
    let fields = to_fields(inputs)?;
    hash_fields(&fields, key).map(|h| h.to_biguint())
}

/// Chained hash with an explicit round count: `r ← MiMC7(r, input)` from `iv`.
pub fn hash_generic(iv: &BigUint, inputs: &[BigUint], n_rounds: usize) -> Result<BigUint> {
    check_non_empty(inputs.len())?;
    let cts = constants(n_rounds);
    let mut r = to_field(iv)?;
    for input in to_fields(inputs)? {
        r = round_function(r, input, &cts);
    }
    Ok(r.to_biguint())
}

/// Hash bytes as 31-byte little-endian chunks.
pub fn hash_bytes(msg: &[u8]) -> Result<BigUint> {
    let fields = le_chunks_to_fields(msg)?;
    hash_fields(&fields, None).map(|h| h.to_biguint())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::q1;

    fn big(s: &str) -> BigUint {
        s.parse().unwrap()
    }

    fn hex_big(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 16).unwrap()
    }

    fn ints(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|v| BigUint::from(*v)).collect()
    }

    #[test]
    fn test_seed_digest() {
        let digest: [u8; 32] = Keccak256::digest(SEED).into();
        assert_eq!(
            hex::encode(digest),
            "b6e489e6b37224a50bebfddbe7d89fa8fdcaa84304a70bd13f79b5d9f7951e9e"
        );
    }

    #[test]
    fn test_constants_shape() {
        let cts = constants(N_ROUNDS);
        assert_eq!(cts.len(), N_ROUNDS);
        assert!(cts[0].is_zero());
        assert!(!cts[1].is_zero());
        assert_eq!(constants(10)[..], cts[..10]);
    }

    #[test]
    fn test_mimc7_round() {
        assert_eq!(
            mimc7_hash(&BigUint::from(12u8), &BigUint::from(45u8)).unwrap(),
            hex_big("2ba7ebad3c6b6f5a20bdecba2333c63173ca1a5f2f49d958081d9fa7179c44e4")
        );
        assert_eq!(
            mimc7_hash(&BigUint::from(1u8), &BigUint::from(2u8)).unwrap(),
            big("10594780656576967754230020536574539122676596303354946869887184401991294982664")
        );
    }

    #[test]
    fn test_hash_vectors() {
        assert_eq!(
            hash(&ints(&[12]), None).unwrap(),
            hex_big("237c92644dbddb86d8a259e0e923aaab65a93f1ec5758b8799988894ac0958fd")
        );
        assert_eq!(
            hash(&ints(&[78, 41]), None).unwrap(),
            hex_big("067f3202335ea256ae6e6aadcd2d5f7f4b06a00b2d1e0de903980d5ab552dc70")
        );
        assert_eq!(
            hash(&ints(&[12, 45]), None).unwrap(),
            hex_big("15ff7fe9793346a17c3150804bcb36d161c8662b110c50f55ccb7113948d8879")
        );
        assert_eq!(
            hash(&ints(&[12, 45, 78, 41]), None).unwrap(),
            hex_big("284bc1f34f335933a23a433b6ff3ee179d682cd5e5e2fcdd2d964afa85104beb")
        );
    }

    #[test]
    fn test_hash_with_zero_key_matches_none() {
        let zero = BigUint::default();
        assert_eq!(
            hash(&ints(&[12, 45]), Some(&zero)).unwrap(),
            hash(&ints(&[12, 45]), None).unwrap()
        );
    }

    #[test]
    fn test_hash_generic() {
        assert_eq!(
            hash_generic(&BigUint::default(), &ints(&[1, 2, 3]), 91).unwrap(),
            big("6464402164086696096195815557694604139393321133243036833927490113253119343397")
        );
    }

    #[test]
    fn test_hash_bytes() {
        let lorem: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";
        assert_eq!(
            hash_bytes(lorem).unwrap(),
            big("16855787120419064316734350414336285711017110414939748784029922801367685456065")
        );
    }

    #[test]
    fn test_iv() {
        assert_eq!(
            *iv(),
            big("15021630795539610737508582392395901278341266317943626182700664337106830745361")
        );
    }

    #[test]
    fn test_errors() {
        let q = q1().clone();
        assert_eq!(
            hash(&[BigUint::from(1u8), q.clone()], None),
            Err(CryptoError::range_q1(Operation::Mimc7))
        );
        assert!(hash(&ints(&[1]), Some(&q)).is_err());
        assert!(mimc7_hash(&q, &BigUint::default()).is_err());
        assert_eq!(
            hash(&[], None),
            Err(CryptoError::EmptyInput {
                op: Operation::Mimc7
            })
        );
        assert!(hash_generic(&BigUint::default(), &[], 91).is_err());
    }
}
