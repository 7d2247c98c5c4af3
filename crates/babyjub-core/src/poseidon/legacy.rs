//! Fixed-width Poseidon (t = 6) with seed-derived constants
//!
//! Kept for compatibility with data hashed by early iden3 tooling. One round
//! constant per round, added to every state element; 8 full and 57 partial
//! rounds; x⁵ S-box. Constants come from a BLAKE2b-256 chain over
//! `"poseidon_constants"`, the Cauchy MDS from `"poseidon_matrix_NNNN"` with
//! the nonce bumped until the 12 samples are non-zero and distinct.

use crate::codec::le_chunks_to_fields;
use crate::errors::{CryptoError, Operation, Result};
use crate::field::Fr;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use num_bigint::BigUint;
use once_cell::sync::Lazy;

type Blake2b256 = Blake2b<U32>;

pub const T: usize = 6;
pub const N_ROUNDS_F: usize = 8;
pub const N_ROUNDS_P: usize = 57;

const SEED: &str = "poseidon";

/// Chunk of inputs absorbed per permutation call
const RATE: usize = T - 1;

struct LegacyConstants {
    round: Vec<Fr>,
    mds: [[Fr; T]; T],
}

static CONSTANTS: Lazy<LegacyConstants> = Lazy::new(|| LegacyConstants {
    round: pseudo_random(&format!("{}_constants", SEED), N_ROUNDS_F + N_ROUNDS_P),
    mds: mds(),
});

/// `n` field elements from an iterated BLAKE2b-256 chain, each digest read
/// little-endian and reduced mod Q₁.
pub fn pseudo_random(seed: &str, n: usize) -> Vec<Fr> {
    let mut digest: [u8; 32] = Blake2b256::digest(seed.as_bytes()).into();
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(Fr::from_bytes_le_reduced(&digest));
        digest = Blake2b256::digest(digest).into();
    }
    out
}

fn mds() -> [[Fr; T]; T] {
    let mut nonce = 0u32;
    loop {
        let samples = pseudo_random(&format!("{}_matrix_{:04}", SEED, nonce), 2 * T);
        if all_nonzero_distinct(&samples) {
            if let Some(m) = cauchy(&samples) {
                crate::trace!("legacy poseidon: mds nonce {}", nonce);
                return m;
            }
        }
        nonce += 1;
    }
}

fn all_nonzero_distinct(values: &[Fr]) -> bool {
    values
        .iter()
        .enumerate()
        .all(|(i, a)| !a.is_zero() && values[i + 1..].iter().all(|b| a != b))
}

/// M[i][j] = 1 / (x_i - y_j)
fn cauchy(samples: &[Fr]) -> Option<[[Fr; T]; T]> {
    let (xs, ys) = samples.split_at(T);
    let mut m = [[Fr::ZERO; T]; T];
    for (row, x) in m.iter_mut().zip(xs) {
        for (cell, y) in row.iter_mut().zip(ys) {
            *cell = (*x - *y).inverse().ok()?;
        }
    }
    Some(m)
}

fn permute(state: &mut [Fr; T]) {
    let c = &*CONSTANTS;
    let half = N_ROUNDS_F / 2;
    for (i, rc) in c.round.iter().enumerate() {
        for x in state.iter_mut() {
            *x += *rc;
        }
        if i < half || i >= half + N_ROUNDS_P {
            for x in state.iter_mut() {
                *x = x.square().square() * *x;
            }
        } else {
            state[0] = state[0].square().square() * state[0];
        }

        let mut mixed = [Fr::ZERO; T];
        for (out, row) in mixed.iter_mut().zip(c.mds.iter()) {
            *out = row
                .iter()
                .zip(state.iter())
                .fold(Fr::ZERO, |acc, (m, s)| acc + *m * *s);
        }
        *state = mixed;
    }
}

/// Single permutation over a full width-6 state, returning element 0.
pub fn poseidon_hash(input: &[Fr; T]) -> Fr {
    let mut state = *input;
    permute(&mut state);
    state[0]
}

/// Absorb the inputs five at a time: each chunk is followed by the running
/// accumulator (starting at 1) and zero padding, and the permutation output
/// is added to the accumulator.
pub fn hash_fields(inputs: &[Fr]) -> Result<Fr> {
    if inputs.is_empty() {
        return Err(CryptoError::EmptyInput {
            op: Operation::LegacyPoseidon,
        });
    }

    let mut acc = Fr::ONE;
    for chunk in inputs.chunks(RATE) {
        let mut state = [Fr::ZERO; T];
        state[..chunk.len()].copy_from_slice(chunk);
        state[chunk.len()] = acc;
        acc += poseidon_hash(&state);
    }
    Ok(acc)
}

/// [`hash_fields`] over integers, every one of which must be below Q₁.
pub fn hash(inputs: &[BigUint]) -> Result<BigUint> {
    let fields = inputs
        .iter()
        .map(|x| Fr::from_biguint(x).map_err(|_| CryptoError::range_q1(Operation::LegacyPoseidon)))
        .collect::<Result<Vec<Fr>>>()?;
    hash_fields(&fields).map(|h| h.to_biguint())
}

/// Hash bytes as 31-byte little-endian chunks.
pub fn hash_bytes(msg: &[u8]) -> Result<BigUint> {
    let fields = le_chunks_to_fields(msg)?;
    hash_fields(&fields).map(|h| h.to_biguint())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::q1;

    const LOREM: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

    fn big(s: &str) -> BigUint {
        s.parse().unwrap()
    }

    #[test]
    fn test_seed_digest() {
        let d: [u8; 32] = Blake2b256::digest(b"poseidon_constants").into();
        assert_eq!(
            hex::encode(d),
            "e57ba154fb2c47811dc1a2369b27e25a44915b4e4ece4eb8ec74850cb78e01b1"
        );
    }

    #[test]
    fn test_hash_pairs() {
        assert_eq!(
            hash(&[BigUint::from(1u8), BigUint::from(2u8)]).unwrap(),
            big("4932297968297298434239270129193057052722409868268166443802652458940273154855")
        );
        assert_eq!(
            hash(&[BigUint::from(3u8), BigUint::from(4u8)]).unwrap(),
            big("4635491972858758537477743930622086396911540895966845494943021655521913507504")
        );
    }

    #[test]
    fn test_hash_lorem_chunks() {
        assert_eq!(
            hash_bytes(LOREM).unwrap(),
            big("16019700159595764790637132363672701294192939959594423814006267756172551741065")
        );

        let mut longer = LOREM.to_vec();
        longer.extend_from_slice(b" Lorem ipsum dolor sit amet.");
        assert_eq!(
            hash_bytes(&longer).unwrap(),
            big("2978613163687734485261639854325792381691890647104372645321246092227111432722")
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            hash(&[]),
            Err(CryptoError::EmptyInput {
                op: Operation::LegacyPoseidon
            })
        );
        assert!(hash_bytes(b"").is_err());
        assert_eq!(
            hash(&[q1().clone()]),
            Err(CryptoError::range_q1(Operation::LegacyPoseidon))
        );
    }

    #[test]
    fn test_mds_is_cauchy() {
        let m = &CONSTANTS.mds;
        assert!(m.iter().flatten().all(|x| !x.is_zero()));
        assert_eq!(CONSTANTS.round.len(), 65);
    }
}
